use super::{check_required, encode_payload, SaveMode, Submittable, ValidationError};
use crate::api::Collection;
use crate::drafts::ReviewDraft;
use crate::util::clamp_rating;
use serde_json::Value;

fn non_blank(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Submittable for ReviewDraft {
    const COLLECTION: Collection = Collection::Reviews;

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn prepare(&self, mode: SaveMode) -> Result<Value, ValidationError> {
        if mode.is_publish() {
            check_required(&[("Product Name", self.product_name.as_str())])?;
            if !self.aggregate_rating.is_finite() || self.aggregate_rating == 0.0 {
                return Err(ValidationError::MissingRating);
            }
        }

        let mut clean = self.clone();
        clean.product_name = clean.product_name.trim().to_string();
        clean.features.retain(|f| !f.title.trim().is_empty());
        clean.pricing.retain(|p| !p.plan.trim().is_empty());
        clean.faqs
            .retain(|f| !f.question.trim().is_empty() || !f.answer.trim().is_empty());
        clean.alternatives.retain(|a| !a.name.trim().is_empty());
        for alt in &mut clean.alternatives {
            alt.rating = Some(f64::from(clamp_rating(alt.rating)));
        }
        clean.use_cases.retain(|u| !u.title.trim().is_empty());
        for use_case in &mut clean.use_cases {
            use_case.rating = Some(f64::from(clamp_rating(use_case.rating)));
        }
        clean.pros = non_blank(&self.pros);
        clean.cons = non_blank(&self.cons);
        clean.integrations = non_blank(&self.integrations);

        let mut body = encode_payload(&clean)?;
        if clean.rating.is_nan() || clean.rating <= 0.0 {
            if let Some(map) = body.as_object_mut() {
                map.remove("rating");
            }
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::RecordingApi;
    use super::super::submit;
    use super::*;
    use crate::models::{AlternativeReview, UseCase};
    use futures::executor::block_on;
    use serde_json::json;

    fn publishable() -> ReviewDraft {
        ReviewDraft {
            product_name: "Notion".into(),
            aggregate_rating: 4.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_product_name_then_rating_required() {
        let nameless = ReviewDraft {
            product_name: " ".into(),
            ..publishable()
        };
        assert_eq!(
            nameless.prepare(SaveMode::Publish),
            Err(ValidationError::MissingFields(vec!["Product Name"]))
        );
        let unrated = ReviewDraft {
            aggregate_rating: 0.0,
            ..publishable()
        };
        let err = unrated.prepare(SaveMode::Publish).expect_err("no rating");
        assert_eq!(err.to_string(), "Rating is required");
    }

    #[test]
    fn test_ratings_clamped_and_zero_rating_omitted() {
        let draft = ReviewDraft {
            alternatives: vec![
                AlternativeReview {
                    name: "Coda".into(),
                    rating: Some(0.0),
                    ..Default::default()
                },
                AlternativeReview {
                    name: "Craft".into(),
                    rating: Some(7.2),
                    ..Default::default()
                },
                AlternativeReview::default(),
            ],
            use_cases: vec![UseCase {
                title: "Wikis".into(),
                description: None,
                rating: None,
            }],
            pros: vec!["Fast".into(), " ".into()],
            ..publishable()
        };
        let body = draft.prepare(SaveMode::Publish).expect("valid");
        assert!(body.get("rating").is_none());
        assert_eq!(body["alternatives"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["alternatives"][0]["rating"], json!(3.0));
        assert_eq!(body["alternatives"][1]["rating"], json!(5.0));
        assert_eq!(body["useCases"][0]["rating"], json!(3.0));
        assert_eq!(body["pros"], json!(["Fast"]));
        assert_eq!(body["productName"], "Notion");
    }

    #[test]
    fn test_positive_rating_kept_and_extra_round_trips() {
        let mut draft = ReviewDraft {
            rating: 4.0,
            ..publishable()
        };
        draft.extra.insert("headquarters".into(), json!("SF"));
        let body = draft.prepare(SaveMode::Publish).expect("valid");
        assert_eq!(body["rating"], json!(4.0));
        assert_eq!(body["headquarters"], "SF");
    }

    #[test]
    fn test_one_call_to_reviews() {
        let api = RecordingApi::default();
        block_on(submit(&api, &publishable(), SaveMode::Publish)).expect("saved");
        let call = api.last().expect("recorded");
        assert_eq!((call.method, call.collection), ("POST", Collection::Reviews));
    }
}
