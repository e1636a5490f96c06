use super::{encode_payload, SubmitError, ValidationError};
use crate::api::{Collection, ContentApi};
use crate::drafts::ComparisonPageSettings;
use leptos::logging::{error, log};
use serde_json::{json, Value};

impl ComparisonPageSettings {
    /// Trimmed copy with blank and repeated tags dropped and featured comparisons as ids.
    pub fn prepare(&self) -> Result<Value, ValidationError> {
        let mut clean = self.clone();
        for field in [
            &mut clean.comparison_page_top_tagline,
            &mut clean.comparison_page_heading,
            &mut clean.comparison_page_subheading,
        ] {
            *field = field.trim().to_string();
        }
        let mut tags: Vec<String> = vec![];
        for tag in self.comparison_page_tags.iter().map(|t| t.trim()) {
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        clean.comparison_page_tags = tags;

        let mut body = encode_payload(&clean)?;
        if let Some(map) = body.as_object_mut() {
            map.insert("featuredComparisons".into(), json!(clean.featured_ids()));
        }
        Ok(body)
    }
}

/// Replace the comparisons landing page settings with one PUT.
pub(crate) async fn save_page_settings<A: ContentApi>(
    api: &A,
    settings: &ComparisonPageSettings,
) -> Result<(), SubmitError> {
    let payload = settings.prepare()?;
    match api.update_page_settings(Collection::Comparisons, &payload).await {
        Ok(_) => {
            log!("saved comparison page settings");
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}
