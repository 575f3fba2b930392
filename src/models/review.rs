use mongodb::bson::{DateTime, oid::ObjectId};
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::utils::is_blank;

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub id: Option<ObjectId>,
    pub service_type: String,
    pub customer_email: String,
    pub rating: i32, // 1-5
    pub comment: Option<String>,
    #[schemars(with = "String")]
    pub created_at: DateTime,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewDto {
    pub service_type: Option<String>,
    pub customer_email: Option<String>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

impl Review {
    pub fn create(dto: SubmitReviewDto, now: DateTime) -> Result<Review, String> {
        let rating = dto.rating.unwrap_or(0);
        if is_blank(dto.service_type.as_deref())
            || is_blank(dto.customer_email.as_deref())
            || !(1..=5).contains(&rating)
        {
            return Err("Invalid review data".to_string());
        }

        Ok(Review {
            id: None,
            service_type: dto.service_type.unwrap(),
            customer_email: dto.customer_email.unwrap(),
            rating,
            comment: dto.comment,
            created_at: now,
        })
    }
}

/// Aggregate rating figures for one service type.
#[derive(Debug, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    /// Mean rating rounded to one decimal; 0 with no reviews.
    pub average_rating: f64,
    pub total_reviews: u64,
}

pub fn review_stats(ratings: &[i32]) -> ReviewStats {
    if ratings.is_empty() {
        return ReviewStats {
            average_rating: 0.0,
            total_reviews: 0,
        };
    }

    let mean = ratings.iter().map(|r| *r as f64).sum::<f64>() / ratings.len() as f64;
    ReviewStats {
        average_rating: (mean * 10.0).round() / 10.0,
        total_reviews: ratings.len() as u64,
    }
}
