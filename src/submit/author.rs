use super::{check_required, encode_payload, SaveMode, Submittable, ValidationError};
use crate::api::Collection;
use crate::drafts::AuthorDraft;
use serde_json::Value;

impl Submittable for AuthorDraft {
    const COLLECTION: Collection = Collection::Authors;

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn prepare(&self, mode: SaveMode) -> Result<Value, ValidationError> {
        if mode.is_publish() {
            check_required(&[
                ("Title", self.author_title.as_str()),
                ("Name", self.author_name.as_str()),
                ("Industry", self.author_industry.as_str()),
                ("Profile URL", self.author_view_profile_url.as_str()),
                ("Description", self.author_description.as_str()),
            ])?;
        }

        let mut clean = self.clone();
        for field in [
            &mut clean.author_title,
            &mut clean.author_name,
            &mut clean.author_industry,
            &mut clean.author_view_profile_url,
            &mut clean.author_image_url,
            &mut clean.author_x_account,
            &mut clean.author_ig_account,
            &mut clean.author_linkedin_account,
        ] {
            *field = field.trim().to_string();
        }
        encode_payload(&clean)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::RecordingApi;
    use super::super::submit;
    use super::*;
    use futures::executor::block_on;

    fn complete_author() -> AuthorDraft {
        AuthorDraft {
            author_title: "Editor".into(),
            author_name: " Ann Lee ".into(),
            author_industry: "SaaS".into(),
            author_view_profile_url: "https://perkpilot.io/authors/ann".into(),
            author_description: "Writes about note apps.".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_author_fields_are_listed_together() {
        let draft = AuthorDraft {
            author_title: String::new(),
            author_description: "  ".into(),
            ..complete_author()
        };
        let err = draft.prepare(SaveMode::Publish).expect_err("two blanks");
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: Title, Description"
        );
    }

    #[test]
    fn test_new_author_is_posted_trimmed() {
        let api = RecordingApi::default();
        block_on(submit(&api, &complete_author(), SaveMode::Publish)).expect("saved");
        let call = api.last().expect("call recorded");
        assert_eq!(call.method, "POST");
        assert_eq!(call.collection, Collection::Authors);
        assert_eq!(call.body["authorName"], "Ann Lee");
        assert_eq!(call.body["authorViewProfileURL"], "https://perkpilot.io/authors/ann");
        assert_eq!(call.body["authorImageURL"], "");
        assert!(call.body.get("id").is_none());
    }
}
