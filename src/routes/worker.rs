use log::info;
use mongodb::bson::{DateTime, doc};
use rocket::State;
use rocket::serde::json::Json;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use serde::{Deserialize, Serialize};

use crate::db::DbConn;
use crate::models::{
    CreateWorkerProfileDto, Role, UpdateWorkerProfileDto, User, WorkerProfile, WorkerProfileCard,
    WorkerProfileFields, WorkerProfileSummary, WorkerProfileView,
};
use crate::services::stubs;
use crate::utils::{ApiError, ApiResponse, is_blank};

// ============================================================================
// PROFILE ENDPOINTS
// ============================================================================

#[derive(Debug, Serialize, JsonSchema)]
pub struct WorkerProfileCardPayload {
    pub profile: WorkerProfileCard,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct WorkerProfileViewPayload {
    pub profile: WorkerProfileView,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct WorkerProfileSummaryPayload {
    pub profile: WorkerProfileSummary,
}

async fn load_profile(db: &DbConn, email: &str) -> Result<WorkerProfile, ApiError> {
    db.collection::<WorkerProfile>("worker_profiles")
        .find_one(doc! { "email": email }, None)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::not_found("Worker profile not found"))
}

/// Adds a worker profile to an already-registered user and upgrades that
/// user's role to WORKER.
#[openapi(tag = "Worker")]
#[post("/worker/create-profile", data = "<dto>")]
pub async fn create_worker_profile(
    db: &State<DbConn>,
    dto: Json<CreateWorkerProfileDto>,
) -> Result<Json<ApiResponse<WorkerProfileCardPayload>>, ApiError> {
    if is_blank(dto.email.as_deref()) {
        return Err(ApiError::validation("Email is required"));
    }
    let email = dto.email.as_deref().unwrap().trim().to_lowercase();

    let users = db.collection::<User>("users");
    users
        .find_one(doc! { "email": &email }, None)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::not_found("User not found. Please register as user first."))?;

    let profiles = db.collection::<WorkerProfile>("worker_profiles");
    if profiles
        .find_one(doc! { "email": &email }, None)
        .await
        .map_err(ApiError::internal)?
        .is_some()
    {
        return Err(ApiError::duplicate("Worker profile already exists for this email"));
    }

    if is_blank(dto.professional_title.as_deref()) {
        return Err(ApiError::validation("Professional title is required"));
    }
    if is_blank(dto.phone_number.as_deref()) {
        return Err(ApiError::validation("Phone number is required"));
    }

    let fields = WorkerProfileFields::normalized(
        dto.professional_title.as_deref().unwrap(),
        dto.phone_number.as_deref().unwrap(),
        dto.experience.as_deref(),
        dto.service_areas.as_deref(),
        dto.hourly_rate,
        dto.skills.as_deref(),
        dto.bio.as_deref(),
    );
    let profile = WorkerProfile::new(email.clone(), fields, DateTime::now());
    profiles
        .insert_one(&profile, None)
        .await
        .map_err(ApiError::internal)?;

    // The owning account becomes a worker as a side effect
    users
        .update_one(
            doc! { "email": &email },
            doc! { "$set": { "role": Role::Worker.as_str() } },
            None,
        )
        .await
        .map_err(ApiError::internal)?;

    info!("worker profile created for {}", email);

    Ok(Json(ApiResponse::success(
        "Worker profile created successfully",
        WorkerProfileCardPayload { profile: profile.card() },
    )))
}

#[openapi(tag = "Worker")]
#[get("/worker/profile/<email>")]
pub async fn get_worker_profile(
    db: &State<DbConn>,
    email: String,
) -> Result<Json<ApiResponse<WorkerProfileViewPayload>>, ApiError> {
    let profile = load_profile(db, &email).await?;

    let user_role = db
        .collection::<User>("users")
        .find_one(doc! { "email": &email }, None)
        .await
        .map_err(ApiError::internal)?
        .map(|user| user.role.as_str().to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    Ok(Json(ApiResponse::success(
        "Worker profile retrieved successfully",
        WorkerProfileViewPayload {
            profile: profile.view(user_role),
        },
    )))
}

#[openapi(tag = "Worker")]
#[put("/worker/profile/<email>", data = "<dto>")]
pub async fn update_worker_profile(
    db: &State<DbConn>,
    email: String,
    dto: Json<UpdateWorkerProfileDto>,
) -> Result<Json<ApiResponse<WorkerProfileSummaryPayload>>, ApiError> {
    let mut profile = load_profile(db, &email).await?;
    profile.apply_update(dto.into_inner(), DateTime::now());

    db.collection::<WorkerProfile>("worker_profiles")
        .replace_one(doc! { "email": &email }, &profile, None)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(ApiResponse::success(
        "Worker profile updated successfully",
        WorkerProfileSummaryPayload { profile: profile.summary() },
    )))
}

// ============================================================================
// STUBBED SURFACES (dashboard, search, availability)
// ============================================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerInfo {
    pub professional_title: String,
    pub experience: String,
    pub hourly_rate: f64,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub dashboard: stubs::DashboardStats,
    pub worker_info: WorkerInfo,
}

#[openapi(tag = "Worker")]
#[get("/worker/dashboard/<email>")]
pub async fn worker_dashboard(
    db: &State<DbConn>,
    email: String,
) -> Result<Json<ApiResponse<DashboardPayload>>, ApiError> {
    let profile = load_profile(db, &email).await?;

    Ok(Json(ApiResponse::success(
        "Dashboard data retrieved successfully",
        DashboardPayload {
            dashboard: stubs::dashboard_stats(),
            worker_info: WorkerInfo {
                professional_title: profile.professional_title,
                experience: profile.experience,
                hourly_rate: profile.hourly_rate,
            },
        },
    )))
}

#[derive(Debug, FromForm, Deserialize, JsonSchema)]
pub struct WorkerSearchQuery {
    pub service: Option<String>,
    pub location: Option<String>,
    #[field(name = "maxRate")]
    pub max_rate: Option<f64>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSearchPayload {
    pub results: Vec<stubs::WorkerSearchResult>,
    pub total_count: usize,
}

/// Accepts the search filters but answers from the fixture set until real
/// search lands.
#[openapi(tag = "Worker")]
#[get("/worker/search?<query..>")]
pub fn search_workers(query: WorkerSearchQuery) -> Json<ApiResponse<WorkerSearchPayload>> {
    info!(
        "worker search: service={:?} location={:?} max_rate={:?}",
        query.service, query.location, query.max_rate
    );

    let results = stubs::search_results();
    let total_count = results.len();

    Json(ApiResponse::success(
        "Workers found successfully",
        WorkerSearchPayload { results, total_count },
    ))
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct AvailabilityPayload {
    pub availability: stubs::WeeklyAvailability,
}

#[openapi(tag = "Worker")]
#[get("/worker/availability/<email>")]
pub async fn worker_availability(
    db: &State<DbConn>,
    email: String,
) -> Result<Json<ApiResponse<AvailabilityPayload>>, ApiError> {
    load_profile(db, &email).await?;

    Ok(Json(ApiResponse::success(
        "Availability retrieved successfully",
        AvailabilityPayload {
            availability: stubs::weekly_availability(),
        },
    )))
}
