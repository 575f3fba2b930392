use log::info;
use mongodb::bson::{DateTime, doc};
use mongodb::options::ReplaceOptions;
use rocket::State;
use rocket::serde::json::Json;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use serde::Serialize;

use crate::db::DbConn;
use crate::models::{
    ChangePasswordDto, UpdateUserProfileDto, User, UserProfile, UserProfileView,
};
use crate::services::PasswordService;
use crate::utils::{ApiError, ApiResponse};

#[derive(Debug, Serialize, JsonSchema)]
pub struct ProfileViewPayload {
    pub profile: UserProfileView,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ProfileRecordPayload {
    pub profile: UserProfile,
}

async fn load_user(db: &DbConn, email: &str) -> Result<User, ApiError> {
    db.collection::<User>("users")
        .find_one(doc! { "email": email }, None)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::not_found("User not found"))
}

#[openapi(tag = "Profile")]
#[get("/profile/user/<email>")]
pub async fn get_user_profile(
    db: &State<DbConn>,
    email: String,
) -> Result<Json<ApiResponse<ProfileViewPayload>>, ApiError> {
    let user = load_user(db, &email).await?;

    let profiles = db.collection::<UserProfile>("user_profiles");
    let profile = match profiles
        .find_one(doc! { "userEmail": &email }, None)
        .await
        .map_err(ApiError::internal)?
    {
        Some(profile) => profile,
        None => {
            // First read creates the empty record
            let mut profile = UserProfile::empty(&email, DateTime::now());
            let result = profiles
                .insert_one(&profile, None)
                .await
                .map_err(ApiError::internal)?;
            profile.id = result.inserted_id.as_object_id();
            profile
        }
    };

    Ok(Json(ApiResponse::success(
        "Profile retrieved successfully",
        ProfileViewPayload {
            profile: UserProfileView::new(&user, &profile),
        },
    )))
}

#[openapi(tag = "Profile")]
#[put("/profile/user/<email>", data = "<dto>")]
pub async fn update_user_profile(
    db: &State<DbConn>,
    email: String,
    dto: Json<UpdateUserProfileDto>,
) -> Result<Json<ApiResponse<ProfileRecordPayload>>, ApiError> {
    let profiles = db.collection::<UserProfile>("user_profiles");
    let mut profile = profiles
        .find_one(doc! { "userEmail": &email }, None)
        .await
        .map_err(ApiError::internal)?
        .unwrap_or_else(|| UserProfile::empty(&email, DateTime::now()));

    profile.apply_update(dto.into_inner());

    profiles
        .replace_one(
            doc! { "userEmail": &email },
            &profile,
            ReplaceOptions::builder().upsert(true).build(),
        )
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(ApiResponse::success(
        "Profile updated successfully",
        ProfileRecordPayload { profile },
    )))
}

#[openapi(tag = "Profile")]
#[put("/profile/user/<email>/password", data = "<dto>")]
pub async fn change_password(
    db: &State<DbConn>,
    email: String,
    dto: Json<ChangePasswordDto>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let (current, new) = match (&dto.current_password, &dto.new_password) {
        (Some(current), Some(new)) => (current, new),
        _ => {
            return Err(ApiError::validation(
                "Current password and new password are required",
            ));
        }
    };

    let user = load_user(db, &email).await?;

    if !PasswordService::verify(current, &user.password_hash) {
        return Err(ApiError::validation("Current password is incorrect"));
    }

    let password_hash = PasswordService::hash(new).map_err(ApiError::internal)?;
    db.collection::<User>("users")
        .update_one(
            doc! { "email": &email },
            doc! { "$set": { "passwordHash": password_hash } },
            None,
        )
        .await
        .map_err(ApiError::internal)?;

    info!("password changed for {}", email);

    Ok(Json(ApiResponse::message_only("Password updated successfully")))
}
