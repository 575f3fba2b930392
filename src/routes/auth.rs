use log::info;
use mongodb::bson::{DateTime, doc};
use rocket::State;
use rocket::serde::json::Json;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use serde::Serialize;

use crate::db::DbConn;
use crate::models::{
    LoginDto, RegisterDto, RegistrationRequest, User, UserSummary, WorkerProfile,
    WorkerProfileSummary,
};
use crate::services::PasswordService;
use crate::utils::{ApiError, ApiResponse, HealthStatus, is_blank};

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub user: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_profile: Option<WorkerProfileSummary>,
}

/// Combined registration: a USER request creates the account alone, a
/// WORKER request creates the account and its profile in one call.
#[openapi(tag = "Auth")]
#[post("/register", data = "<dto>")]
pub async fn register(
    db: &State<DbConn>,
    dto: Json<RegisterDto>,
) -> Result<Json<ApiResponse<RegisterPayload>>, ApiError> {
    let request = RegistrationRequest::parse(dto.into_inner()).map_err(ApiError::validation)?;
    let email = request.credentials().email.clone();
    info!("registration attempt for {} as {}", email, request.role().as_str());

    let users = db.collection::<User>("users");
    if users
        .find_one(doc! { "email": &email }, None)
        .await
        .map_err(ApiError::internal)?
        .is_some()
    {
        return Err(ApiError::duplicate("Email already registered"));
    }

    let now = DateTime::now();
    let password_hash =
        PasswordService::hash(&request.credentials().password).map_err(ApiError::internal)?;
    let mut user = User {
        id: None,
        email: email.clone(),
        password_hash,
        role: request.role(),
        created_at: now,
    };
    let result = users
        .insert_one(&user, None)
        .await
        .map_err(ApiError::internal)?;
    user.id = result.inserted_id.as_object_id();

    let worker_profile = match request {
        RegistrationRequest::UserOnly { .. } => None,
        RegistrationRequest::UserWithWorkerProfile { worker, .. } => {
            let profile = WorkerProfile::new(email.clone(), worker, now);
            db.collection::<WorkerProfile>("worker_profiles")
                .insert_one(&profile, None)
                .await
                .map_err(ApiError::internal)?;
            info!("worker profile created for {}", email);
            Some(profile.summary())
        }
    };

    Ok(Json(ApiResponse::success(
        "Registration successful",
        RegisterPayload {
            user: user.summary(),
            worker_profile,
        },
    )))
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct LoginPayload {
    pub role: String,
    pub email: String,
}

/// Credentials must match a user with exactly the requested role.
#[openapi(tag = "Auth")]
#[post("/login", data = "<dto>")]
pub async fn login(
    db: &State<DbConn>,
    dto: Json<LoginDto>,
) -> Result<Json<ApiResponse<LoginPayload>>, ApiError> {
    if is_blank(dto.email.as_deref())
        || is_blank(dto.password.as_deref())
        || is_blank(dto.role.as_deref())
    {
        return Err(ApiError::validation("All fields are required"));
    }

    let email = dto.email.as_deref().unwrap().trim().to_lowercase();
    info!("login attempt for {}", email);

    let user = match crate::models::Role::parse(dto.role.as_deref().unwrap()) {
        Some(role) => db
            .collection::<User>("users")
            .find_one(doc! { "email": &email, "role": role.as_str() }, None)
            .await
            .map_err(ApiError::internal)?,
        // An unknown role can never match a stored user.
        None => None,
    }
    .ok_or_else(|| ApiError::not_found("Invalid email or role"))?;

    if !PasswordService::verify(dto.password.as_deref().unwrap(), &user.password_hash) {
        return Err(ApiError::validation("Invalid password"));
    }

    info!("login successful for {}", user.email);

    Ok(Json(ApiResponse::success(
        "LOGIN_SUCCESS",
        LoginPayload {
            role: user.role.as_str().to_string(),
            email: user.email,
        },
    )))
}

#[openapi(tag = "Health")]
#[get("/health")]
pub fn health() -> Json<HealthStatus> {
    Json(HealthStatus::up("ServiceNest Backend is running"))
}

#[openapi(tag = "Health")]
#[get("/test")]
pub fn test_api() -> String {
    format!("Backend is working! {}", chrono::Utc::now().to_rfc3339())
}
