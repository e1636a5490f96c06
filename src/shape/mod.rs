//! Conversions between the editor's working shapes and the backend's wire shapes.
//!
//! Everything here is total: malformed input maps to defaults, never to an error.

use crate::models::{
    DealSummary, Feature, FeatureComparison, FeaturesData, PositionalFeature, ToolChip,
    ToolMention,
};
use leptos::logging::warn;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

pub(crate) const DEFAULT_TOOL_CATEGORY: &str = "Tool";

const POSITIONAL_KEYS: [&str; 3] = ["0", "1", "2"];

pub(crate) fn to_positional(feature: &Feature) -> PositionalFeature {
    let slot = |k: &str| feature.tool_availability.get(k).copied().unwrap_or(false);
    PositionalFeature {
        feature_name: feature.feature_name.clone(),
        tool1_available: slot(POSITIONAL_KEYS[0]),
        tool2_available: slot(POSITIONAL_KEYS[1]),
        tool3_available: slot(POSITIONAL_KEYS[2]),
    }
}

pub(crate) fn from_positional(feature: &PositionalFeature) -> Feature {
    let slots = [
        feature.tool1_available,
        feature.tool2_available,
        feature.tool3_available,
    ];
    let tool_availability: BTreeMap<String, bool> = POSITIONAL_KEYS
        .iter()
        .zip(slots)
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    Feature {
        feature_name: feature.feature_name.clone(),
        tool_availability,
    }
}

pub(crate) fn features_to_positional(data: &FeaturesData) -> FeatureComparison {
    FeatureComparison {
        section_title: data.section_title.clone(),
        features_headline: data.features_headline.clone(),
        tools: data.tools.clone(),
        features: data.features.iter().map(to_positional).collect(),
    }
}

pub(crate) fn features_from_positional(data: &FeatureComparison) -> FeaturesData {
    FeaturesData {
        section_title: data.section_title.clone(),
        features_headline: data.features_headline.clone(),
        tools: data.tools.clone(),
        features: data.features.iter().map(from_positional).collect(),
    }
}

/// The two physical shapes a mention can arrive in.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum MentionInput {
    /// Deal catalog shape: `{title, logoUri, logoComponent, category, tag, verified}`.
    Deal(DealSummary),
    /// Backend shape: `{toolName, toolLogo, toolCategory, isVerified}`.
    Tool(ToolMention),
    Unknown,
}

impl MentionInput {
    /// Discriminate on the presence of `title` vs `toolName`.
    pub fn classify(raw: &serde_json::Value) -> Self {
        let Some(obj) = raw.as_object() else {
            return Self::Unknown;
        };

        if obj.contains_key("title") {
            let deal = DealSummary {
                title: str_field(raw, "title"),
                category: str_field(raw, "category"),
                tag: str_field(raw, "tag"),
                logo_uri: str_field(raw, "logoUri"),
                logo_component: str_field(raw, "logoComponent"),
                verified: raw.get("verified").and_then(|v| v.as_bool()),
                ..Default::default()
            };
            return Self::Deal(deal);
        }

        if obj.contains_key("toolName") {
            return Self::Tool(ToolMention {
                tool_name: str_field(raw, "toolName").unwrap_or_default(),
                tool_logo: str_field(raw, "toolLogo").unwrap_or_default(),
                tool_category: str_field(raw, "toolCategory").unwrap_or_default(),
                is_verified: raw
                    .get("isVerified")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false),
            });
        }

        Self::Unknown
    }
}

fn str_field(raw: &serde_json::Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn first_non_empty(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub(crate) fn mention_from_deal(deal: &DealSummary) -> ToolMention {
    ToolMention {
        tool_name: deal.title.clone().unwrap_or_default(),
        tool_logo: first_non_empty(&[deal.logo_uri.as_deref(), deal.logo_component.as_deref()])
            .unwrap_or_default(),
        tool_category: first_non_empty(&[deal.category.as_deref(), deal.tag.as_deref()])
            .unwrap_or_else(|| DEFAULT_TOOL_CATEGORY.to_string()),
        is_verified: deal.verified.unwrap_or(false),
    }
}

/// Canonicalize a mention of either shape into [`ToolMention`].
pub(crate) fn normalize_mention(raw: &serde_json::Value) -> ToolMention {
    match MentionInput::classify(raw) {
        MentionInput::Deal(deal) => mention_from_deal(&deal),
        MentionInput::Tool(mut tool) => {
            if tool.tool_category.is_empty() {
                tool.tool_category = DEFAULT_TOOL_CATEGORY.to_string();
            }
            tool
        }
        MentionInput::Unknown => {
            warn!("unrecognized mention shape, using empty mention: {raw}");
            ToolMention {
                tool_category: DEFAULT_TOOL_CATEGORY.to_string(),
                ..Default::default()
            }
        }
    }
}

/// Serde adapter for `dealsMentioned` arrays holding either mention shape (or `null`).
pub(crate) fn deserialize_mentions<'de, D>(deserializer: D) -> Result<Vec<ToolMention>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .map(normalize_mention)
        .collect())
}

/// Strict form used when saving nested deal mentions: name, logo and category must all
/// be present after trimming, otherwise the mention is dropped.
pub(crate) fn backend_mention(mention: &ToolMention) -> Option<ToolMention> {
    let tool_name = mention.tool_name.trim();
    let tool_logo = mention.tool_logo.trim();
    let tool_category = mention.tool_category.trim();
    if tool_name.is_empty() || tool_logo.is_empty() || tool_category.is_empty() {
        return None;
    }
    Some(ToolMention {
        tool_name: tool_name.to_string(),
        tool_logo: tool_logo.to_string(),
        tool_category: tool_category.to_string(),
        is_verified: mention.is_verified,
    })
}

/// How a chip without a logo is rendered in the backend mention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LogoFallback {
    Empty,
    /// Placeholder image carrying the tool name (comparison pages).
    Placeholder,
}

/// Chips as stored in the working document. Missing logo and category stay empty so
/// that `mentions_to_tools(tools_to_mentions(chips)) == chips` for canonical chips;
/// backend defaults are filled in by [`with_mention_defaults`] when saving.
pub(crate) fn tools_to_mentions(tools: &[ToolChip]) -> Vec<ToolMention> {
    tools
        .iter()
        .map(|t| ToolMention {
            tool_name: t.name.clone(),
            tool_logo: t.logo.clone().unwrap_or_default(),
            tool_category: t.category.clone().unwrap_or_default(),
            is_verified: false,
        })
        .collect()
}

/// Tools-mentioned list in its saved form: nameless entries dropped, empty category
/// set to [`DEFAULT_TOOL_CATEGORY`] and empty logos replaced per `fallback`.
pub(crate) fn with_mention_defaults(
    mentions: &[ToolMention],
    fallback: LogoFallback,
) -> Vec<ToolMention> {
    mentions
        .iter()
        .filter(|m| !m.tool_name.trim().is_empty())
        .map(|m| {
            let tool_logo = match (m.tool_logo.is_empty(), fallback) {
                (false, _) | (true, LogoFallback::Empty) => m.tool_logo.clone(),
                (true, LogoFallback::Placeholder) => format!(
                    "https://via.placeholder.com/100?text={}",
                    urlencoding::encode(m.tool_name.trim())
                ),
            };
            let tool_category = if m.tool_category.is_empty() {
                DEFAULT_TOOL_CATEGORY.to_string()
            } else {
                m.tool_category.clone()
            };
            ToolMention {
                tool_logo,
                tool_category,
                ..m.clone()
            }
        })
        .collect()
}

/// Seed chips for the tools-mentioned editor; nameless mentions are skipped.
pub(crate) fn mentions_to_tools(mentions: &[ToolMention]) -> Vec<ToolChip> {
    mentions
        .iter()
        .filter(|m| !m.tool_name.trim().is_empty())
        .map(|m| {
            ToolChip {
                id: String::new(),
                name: m.tool_name.clone(),
                logo: Some(m.tool_logo.clone()),
                category: Some(m.tool_category.clone()),
            }
            .canonical()
        })
        .collect()
}

/// A deal search hit as a tools-mentioned chip. `None` for hits without a title.
pub(crate) fn chip_from_deal(deal: &DealSummary) -> Option<ToolChip> {
    let name = deal.title.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    let mention = mention_from_deal(deal);
    Some(ToolChip {
        id: name.to_string(),
        name: name.to_string(),
        logo: deal.logo_uri.clone(),
        category: Some(mention.tool_category),
    })
}

/// Remove `null` object members at every depth so typed fields fall back to defaults.
pub(crate) fn strip_nulls(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
