use rocket::Request;
use rocket::http::Status;
use rocket::response::{self, Responder, Response};
use rocket_okapi::okapi::Map;
use rocket_okapi::okapi::openapi3::{MediaType, Response as OpenApiResponse, Responses};
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::response::OpenApiResponderInner;
use serde::Serialize;
use std::io::Cursor;

/// -----------------------------
/// Response envelope
/// -----------------------------
#[derive(Debug, Serialize, JsonSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Every endpoint answers `{status, message, ...payload}`. The payload is a
/// typed record flattened into the envelope.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            status: ResponseStatus::Success,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            status: ResponseStatus::Error,
            message: message.into(),
            data: None,
        }
    }
}

/// -----------------------------
/// API Error
/// -----------------------------
#[derive(Debug, Serialize, JsonSchema)]
pub struct ApiError {
    #[schemars(skip)]
    #[serde(skip_serializing)]
    pub status: Status,
    pub message: String,
}

impl ApiError {
    /// Missing, blank or out-of-range input.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError {
            status: Status::BadRequest,
            message: message.into(),
        }
    }

    /// Unknown id or email. Answered as 400, not 404, matching the wire
    /// contract the frontend was written against.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            status: Status::BadRequest,
            message: message.into(),
        }
    }

    /// The record already exists (registered email, repeated review).
    pub fn duplicate(message: impl Into<String>) -> Self {
        ApiError {
            status: Status::BadRequest,
            message: message.into(),
        }
    }

    /// Unexpected failure. The detail goes to the log; the client only sees
    /// a generic message.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        log::error!("internal error: {}", detail);
        ApiError {
            status: Status::InternalServerError,
            message: "Internal server error".to_string(),
        }
    }
}

/// -----------------------------
/// Rocket Responder
/// -----------------------------
impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let body = serde_json::to_string(&ApiResponse::error(self.message))
            .unwrap_or_else(|_| r#"{"status":"ERROR","message":"Internal server error"}"#.to_string());

        Response::build()
            .status(self.status)
            .header(rocket::http::ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

/// -----------------------------
/// OpenAPI integration
/// -----------------------------
impl OpenApiResponderInner for ApiError {
    fn responses(generator: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let schema = generator.json_schema::<ApiResponse<()>>();

        let mut content = Map::new();
        content.insert(
            "application/json".to_owned(),
            MediaType {
                schema: Some(schema),
                ..Default::default()
            },
        );

        let mut responses = Responses::default();

        for (code, description) in [("400", "Bad request"), ("500", "Internal server error")] {
            responses.responses.insert(
                code.to_string(),
                rocket_okapi::okapi::openapi3::RefOr::Object(OpenApiResponse {
                    description: description.to_string(),
                    content: content.clone(),
                    ..Default::default()
                }),
            );
        }

        Ok(responses)
    }
}

/// Liveness payload used by the health endpoints.
#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

impl HealthStatus {
    pub fn up(message: impl Into<String>) -> Self {
        HealthStatus {
            status: "UP".to_string(),
            message: message.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_flattens_payload() {
        #[derive(Serialize, JsonSchema)]
        struct Payload {
            count: usize,
        }

        let value = serde_json::to_value(ApiResponse::success("ok", Payload { count: 3 })).unwrap();
        assert_eq!(value["status"], "SUCCESS");
        assert_eq!(value["message"], "ok");
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn error_envelope_has_no_payload_fields() {
        let value = serde_json::to_value(ApiResponse::error("nope")).unwrap();
        assert_eq!(value["status"], "ERROR");
        assert_eq!(value.as_object().unwrap().len(), 2);
    }
}
