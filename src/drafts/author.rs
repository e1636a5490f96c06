use super::record_id;
use crate::shape::strip_nulls;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Byline shown on blogs and comparisons.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct AuthorDraft {
    #[serde(skip)]
    pub id: Option<String>,
    pub author_title: String,
    pub author_name: String,
    pub author_industry: String,
    #[serde(rename = "authorViewProfileURL")]
    pub author_view_profile_url: String,
    pub author_description: String,
    #[serde(rename = "authorImageURL")]
    pub author_image_url: String,
    pub author_x_account: String,
    #[serde(rename = "authorIGAccount")]
    pub author_ig_account: String,
    pub author_linkedin_account: String,
}

impl AuthorDraft {
    pub fn hydrate(mut raw: Value) -> Result<Self, serde_json::Error> {
        let id = record_id(&raw);
        strip_nulls(&mut raw);
        let mut draft: Self = serde_json::from_value(raw)?;
        draft.id = id;
        Ok(draft)
    }
}
