use mongodb::bson::{DateTime, Document, doc};
use mongodb::options::FindOptions;
use rocket::State;
use rocket::futures::TryStreamExt;
use rocket::serde::json::Json;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use serde::Serialize;

use crate::db::DbConn;
use crate::models::{Review, ReviewStats, SubmitReviewDto, review_stats};
use crate::utils::{ApiError, ApiResponse};

#[derive(Debug, Serialize, JsonSchema)]
pub struct ReviewPayload {
    pub review: Review,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ServiceReviewsPayload {
    pub reviews: Vec<Review>,
    pub stats: ReviewStats,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct UserReviewsPayload {
    pub reviews: Vec<Review>,
}

async fn find_reviews(db: &DbConn, filter: Document) -> Result<Vec<Review>, ApiError> {
    let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
    db.collection::<Review>("reviews")
        .find(filter, options)
        .await
        .map_err(ApiError::internal)?
        .try_collect()
        .await
        .map_err(ApiError::internal)
}

/// One review per (customer, service type); repeats are rejected.
#[openapi(tag = "Reviews")]
#[post("/reviews", data = "<dto>")]
pub async fn submit_review(
    db: &State<DbConn>,
    dto: Json<SubmitReviewDto>,
) -> Result<Json<ApiResponse<ReviewPayload>>, ApiError> {
    let mut review =
        Review::create(dto.into_inner(), DateTime::now()).map_err(ApiError::validation)?;

    let reviews = db.collection::<Review>("reviews");
    let already_reviewed = reviews
        .find_one(
            doc! {
                "customerEmail": &review.customer_email,
                "serviceType": &review.service_type,
            },
            None,
        )
        .await
        .map_err(ApiError::internal)?
        .is_some();
    if already_reviewed {
        return Err(ApiError::duplicate("You have already reviewed this service"));
    }

    let result = reviews
        .insert_one(&review, None)
        .await
        .map_err(ApiError::internal)?;
    review.id = result.inserted_id.as_object_id();

    Ok(Json(ApiResponse::success(
        "Review submitted successfully",
        ReviewPayload { review },
    )))
}

#[openapi(tag = "Reviews")]
#[get("/reviews/service/<service_type>")]
pub async fn service_reviews(
    db: &State<DbConn>,
    service_type: String,
) -> Result<Json<ApiResponse<ServiceReviewsPayload>>, ApiError> {
    let reviews = find_reviews(db, doc! { "serviceType": &service_type }).await?;
    let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();

    Ok(Json(ApiResponse::success(
        "Reviews retrieved successfully",
        ServiceReviewsPayload {
            stats: review_stats(&ratings),
            reviews,
        },
    )))
}

#[openapi(tag = "Reviews")]
#[get("/reviews/user/<email>")]
pub async fn user_reviews(
    db: &State<DbConn>,
    email: String,
) -> Result<Json<ApiResponse<UserReviewsPayload>>, ApiError> {
    let reviews = find_reviews(db, doc! { "customerEmail": &email }).await?;

    Ok(Json(ApiResponse::success(
        "User reviews retrieved successfully",
        UserReviewsPayload { reviews },
    )))
}
