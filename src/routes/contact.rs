use log::info;
use rocket::serde::json::Json;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use serde::Deserialize;

use crate::utils::{ApiError, ApiResponse, is_blank};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ContactDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// Validated and logged; messages are not persisted or delivered anywhere.
#[openapi(tag = "Contact")]
#[post("/contact/send", data = "<dto>")]
pub fn send_contact_message(dto: Json<ContactDto>) -> Result<Json<ApiResponse<()>>, ApiError> {
    if is_blank(dto.name.as_deref())
        || is_blank(dto.email.as_deref())
        || is_blank(dto.subject.as_deref())
        || is_blank(dto.message.as_deref())
    {
        return Err(ApiError::validation("All fields are required"));
    }

    info!(
        "contact message from {} <{}>: {}",
        dto.name.as_deref().unwrap(),
        dto.email.as_deref().unwrap(),
        dto.subject.as_deref().unwrap()
    );
    info!("message body: {}", dto.message.as_deref().unwrap());

    Ok(Json(ApiResponse::message_only(
        "Thank you for your message! We'll get back to you within 24 hours.",
    )))
}
