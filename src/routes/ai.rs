use chrono::Utc;
use log::info;
use mongodb::bson::doc;
use rocket::State;
use rocket::serde::json::Json;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::DbConn;
use crate::models::User;
use crate::routes::booking::find_bookings;
use crate::services::chat;
use crate::services::recommendation::{self, HistoryAnalysis, Recommendations};
use crate::utils::{ApiError, ApiResponse};

#[derive(Debug, Serialize, JsonSchema)]
pub struct RecommendationsPayload {
    pub recommendations: Recommendations,
}

/// Five rule-derived suggestion lists for the customer's booking history.
#[openapi(tag = "AI")]
#[get("/ai/recommendations/<email>")]
pub async fn recommendations(
    db: &State<DbConn>,
    email: String,
) -> Result<Json<ApiResponse<RecommendationsPayload>>, ApiError> {
    db.collection::<User>("users")
        .find_one(doc! { "email": &email }, None)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let history = find_bookings(db, doc! { "customerEmail": &email }).await?;
    let recommendations = recommendation::generate(&history, Utc::now(), rand::thread_rng());

    Ok(Json(ApiResponse::success(
        "AI recommendations generated",
        RecommendationsPayload { recommendations },
    )))
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatDto {
    pub message: Option<String>,
    pub user_email: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    pub timestamp: String,
    pub message_id: String,
}

/// Stateless canned-response chat; the reply rides in the envelope message.
#[openapi(tag = "AI")]
#[post("/ai/chat", data = "<dto>")]
pub fn ai_chat(dto: Json<ChatDto>) -> Result<Json<ApiResponse<ChatPayload>>, ApiError> {
    let message = dto.message.as_deref().unwrap_or("");
    if message.trim().is_empty() {
        return Err(ApiError::validation("Message cannot be empty"));
    }

    info!("chat message from {}", dto.user_email.as_deref().unwrap_or("anonymous"));

    Ok(Json(ApiResponse::success(
        chat::reply_to(message),
        ChatPayload {
            timestamp: Utc::now().to_rfc3339(),
            message_id: Uuid::new_v4().to_string(),
        },
    )))
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct AnalysisPayload {
    pub analysis: HistoryAnalysis,
}

#[openapi(tag = "AI")]
#[get("/ai/analysis/<email>")]
pub async fn service_analysis(
    db: &State<DbConn>,
    email: String,
) -> Result<Json<ApiResponse<AnalysisPayload>>, ApiError> {
    let history = find_bookings(db, doc! { "customerEmail": &email }).await?;
    let analysis = recommendation::analyze_history(&history, Utc::now());

    Ok(Json(ApiResponse::success(
        "Service analysis completed",
        AnalysisPayload { analysis },
    )))
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiHealthStatus {
    pub status: String,
    pub message: String,
    pub timestamp: String,
    pub version: String,
    pub ai_model: String,
}

#[openapi(tag = "Health")]
#[get("/ai/health")]
pub fn ai_health() -> Json<AiHealthStatus> {
    Json(AiHealthStatus {
        status: "UP".to_string(),
        message: "AI Service is running smoothly".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: "2.0.0".to_string(),
        ai_model: "ServiceNest AI v2".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::{ContentType, Status};
    use rocket::local::blocking::Client;

    fn client() -> Client {
        Client::tracked(rocket::build().mount("/api", routes![ai_chat])).unwrap()
    }

    #[test]
    fn blank_chat_message_is_rejected() {
        let client = client();
        let response = client
            .post("/api/ai/chat")
            .header(ContentType::JSON)
            .body(r#"{"message": "   ", "userEmail": "asha@example.com"}"#)
            .dispatch();

        assert_eq!(response.status(), Status::BadRequest);
        let body = response.into_string().unwrap();
        assert!(body.contains("Message cannot be empty"));
    }

    #[test]
    fn chat_reply_rides_in_the_envelope_message() {
        let client = client();
        let response = client
            .post("/api/ai/chat")
            .header(ContentType::JSON)
            .body(r#"{"message": "My pipe is leaking"}"#)
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
        let value: serde_json::Value =
            serde_json::from_str(&response.into_string().unwrap()).unwrap();
        assert_eq!(value["status"], "SUCCESS");
        assert!(value["message"].as_str().unwrap().contains("Plumbing"));
        assert!(value["messageId"].as_str().is_some());
        assert!(value["timestamp"].as_str().is_some());
    }
}
