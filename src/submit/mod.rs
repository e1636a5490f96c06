mod author;
mod blog;
mod comparison;
mod deal;
mod review;
mod settings;

pub(crate) use settings::save_page_settings;

use crate::api::{ApiError, Collection, ContentApi};
use crate::models::SavedRecord;
use leptos::logging::{error, log};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SaveMode {
    /// Normalize and save whatever is there.
    Draft,
    /// Normalize, enforce required fields and structural minimums, then save.
    Publish,
}

impl SaveMode {
    pub fn is_publish(self) -> bool {
        self == SaveMode::Publish
    }
}

fn required_verb(min: &usize) -> &'static str {
    if *min == 1 {
        "is required"
    } else {
        "are required"
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ValidationError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("At least {min} {what} {}", required_verb(.min))]
    TooFewCards { what: &'static str, min: usize },
    #[error("Rating is required")]
    MissingRating,
    #[error("Could not build the request body: {0}")]
    Encode(String),
}

#[derive(Clone, Debug, thiserror::Error)]
pub(crate) enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SubmitError::Api(e) if e.is_unauthorized())
    }
}

/// Every blank (after trimming) field, reported together in declaration order.
pub(crate) fn check_required(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

pub(crate) fn check_min_cards(
    count: usize,
    min: usize,
    what: &'static str,
) -> Result<(), ValidationError> {
    if count < min {
        Err(ValidationError::TooFewCards { what, min })
    } else {
        Ok(())
    }
}

pub(crate) fn encode_payload<T: Serialize>(value: &T) -> Result<Value, ValidationError> {
    serde_json::to_value(value).map_err(|e| ValidationError::Encode(e.to_string()))
}

/// A working document that knows how to become a backend payload.
pub(crate) trait Submittable {
    const COLLECTION: Collection;

    fn record_id(&self) -> Option<&str>;

    /// Clean the document and, in publish mode, validate it. Never touches the network.
    fn prepare(&self, mode: SaveMode) -> Result<Value, ValidationError>;
}

/// Prepare and persist a document with exactly one create-or-update call.
pub(crate) async fn submit<D, A>(
    api: &A,
    draft: &D,
    mode: SaveMode,
) -> Result<SavedRecord, SubmitError>
where
    D: Submittable,
    A: ContentApi,
{
    let payload = draft.prepare(mode)?;
    let collection = D::COLLECTION;

    let saved = match draft.record_id().map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => api.update(collection, id, &payload).await,
        None => api.create(collection, &payload).await,
    };

    match saved {
        Ok(body) => {
            log!("saved {} ({:?})", collection.path(), mode);
            Ok(serde_json::from_value(body).unwrap_or_default())
        }
        Err(e) => {
            error!("saving {} failed: {}", collection.path(), e);
            Err(e.into())
        }
    }
}

/// Allows one outstanding save per editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SubmitLatch {
    busy: bool,
}

impl SubmitLatch {
    pub fn try_begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn finish(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::api::{ApiError, ApiResult, Collection, ContentApi};
    use serde_json::{json, Value};
    use std::cell::RefCell;

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct Call {
        pub method: &'static str,
        pub collection: Collection,
        pub id: Option<String>,
        pub body: Value,
    }

    /// `ContentApi` double that records calls and answers with `_id: "new-id"`.
    #[derive(Default)]
    pub(crate) struct RecordingApi {
        pub calls: RefCell<Vec<Call>>,
        pub fail_with: Option<ApiError>,
    }

    impl RecordingApi {
        pub fn failing(e: ApiError) -> Self {
            Self {
                calls: RefCell::default(),
                fail_with: Some(e),
            }
        }

        pub fn count(&self) -> usize {
            self.calls.borrow().len()
        }

        pub fn last(&self) -> Option<Call> {
            self.calls.borrow().last().cloned()
        }

        fn answer(&self, call: Call) -> ApiResult<Value> {
            let id = call.id.clone().unwrap_or_else(|| "new-id".to_string());
            self.calls.borrow_mut().push(call);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(json!({ "_id": id })),
            }
        }
    }

    impl ContentApi for RecordingApi {
        async fn create(&self, collection: Collection, body: &Value) -> ApiResult<Value> {
            self.answer(Call {
                method: "POST",
                collection,
                id: None,
                body: body.clone(),
            })
        }

        async fn update(&self, collection: Collection, id: &str, body: &Value) -> ApiResult<Value> {
            self.answer(Call {
                method: "PUT",
                collection,
                id: Some(id.to_string()),
                body: body.clone(),
            })
        }

        async fn fetch_page_settings(&self, collection: Collection) -> ApiResult<Value> {
            self.answer(Call {
                method: "GET",
                collection,
                id: None,
                body: Value::Null,
            })
        }

        async fn update_page_settings(
            &self,
            collection: Collection,
            body: &Value,
        ) -> ApiResult<Value> {
            self.answer(Call {
                method: "PUT",
                collection,
                id: None,
                body: body.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingApi;
    use super::*;
    use crate::drafts::DealDraft;
    use futures::executor::block_on;

    fn complete_deal() -> DealDraft {
        DealDraft {
            tool_name: "Notion".to_string(),
            tool_category: "Productivity".to_string(),
            tool_description: "Docs and wikis".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_check_required_lists_every_blank_field() {
        let err = check_required(&[("Hero Heading", " "), ("Slug", "x"), ("Author", "")])
            .expect_err("two blanks");
        assert_eq!(err, ValidationError::MissingFields(vec!["Hero Heading", "Author"]));
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: Hero Heading, Author"
        );
    }

    #[test]
    fn test_card_minimum_messages() {
        assert_eq!(
            check_min_cards(1, 2, "pros/cons cards").map_err(|e| e.to_string()),
            Err("At least 2 pros/cons cards are required".to_string())
        );
        assert_eq!(
            check_min_cards(0, 1, "tool blog card").map_err(|e| e.to_string()),
            Err("At least 1 tool blog card is required".to_string())
        );
        assert!(check_min_cards(3, 2, "pros/cons cards").is_ok());
    }

    #[test]
    fn test_missing_tool_name_never_reaches_network() {
        let api = RecordingApi::default();
        let draft = DealDraft {
            tool_name: String::new(),
            ..complete_deal()
        };
        let err = block_on(submit(&api, &draft, SaveMode::Publish)).expect_err("rejected");
        assert_eq!(err.to_string(), "Please fill in all required fields: Tool Name");
        assert!(matches!(
            err,
            SubmitError::Validation(ValidationError::MissingFields(ref f))
                if f == &vec!["Tool Name"]
        ));
        assert_eq!(api.count(), 0);
    }

    #[test]
    fn test_create_without_id_update_with_id() {
        let api = RecordingApi::default();
        let saved = block_on(submit(&api, &complete_deal(), SaveMode::Publish)).expect("saved");
        assert_eq!(saved.id.as_deref(), Some("new-id"));
        assert_eq!(api.last().map(|c| c.method), Some("POST"));

        let existing = DealDraft {
            id: Some("d7".to_string()),
            ..complete_deal()
        };
        block_on(submit(&api, &existing, SaveMode::Publish)).expect("saved");
        let last = api.last().expect("call recorded");
        assert_eq!(last.method, "PUT");
        assert_eq!(last.id.as_deref(), Some("d7"));
        assert_eq!(last.collection, Collection::Deals);
        assert_eq!(api.count(), 2);
    }

    #[test]
    fn test_blank_id_is_a_create() {
        let api = RecordingApi::default();
        let draft = DealDraft {
            id: Some("  ".to_string()),
            ..complete_deal()
        };
        block_on(submit(&api, &draft, SaveMode::Publish)).expect("saved");
        assert_eq!(api.last().map(|c| c.method), Some("POST"));
    }

    #[test]
    fn test_api_failure_is_surfaced() {
        let api = RecordingApi::failing(ApiError::unauthorized());
        let err = block_on(submit(&api, &complete_deal(), SaveMode::Publish)).expect_err("fails");
        assert!(err.is_unauthorized());
        assert_eq!(api.count(), 1);
    }

    #[test]
    fn test_unencodable_payload_is_reported() {
        use std::collections::BTreeMap;
        let keyed: BTreeMap<(u8, u8), bool> = [((1, 2), true)].into_iter().collect();
        let err = encode_payload(&keyed).expect_err("tuple keys are not JSON");
        assert!(matches!(err, ValidationError::Encode(_)));
        assert!(err.to_string().starts_with("Could not build the request body: "));
    }

    #[test]
    fn test_latch_blocks_second_submit() {
        let mut latch = SubmitLatch::default();
        assert!(latch.try_begin());
        assert!(!latch.try_begin());
        assert!(latch.is_busy());
        latch.finish();
        assert!(latch.try_begin());
    }
}
