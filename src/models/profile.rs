use mongodb::bson::{DateTime, oid::ObjectId};
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Personal details attached to a user account, kept separate from the
/// credential record. Created lazily on first profile read.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub id: Option<ObjectId>,
    pub user_email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    #[schemars(with = "String")]
    pub created_at: DateTime,
}

impl UserProfile {
    pub fn empty(email: &str, now: DateTime) -> UserProfile {
        UserProfile {
            id: None,
            user_email: email.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            date_of_birth: None,
            gender: None,
            created_at: now,
        }
    }

    /// Partial update; only provided fields change.
    pub fn apply_update(&mut self, dto: UpdateUserProfileDto) {
        if let Some(first_name) = dto.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = dto.last_name {
            self.last_name = last_name;
        }
        if let Some(phone) = dto.phone {
            self.phone = phone;
        }
        if let Some(date_of_birth) = dto.date_of_birth {
            self.date_of_birth = Some(date_of_birth);
        }
        if let Some(gender) = dto.gender {
            self.gender = Some(gender);
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserProfileDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Account plus profile details, as shown on the profile page.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileView {
    pub email: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
}

impl UserProfileView {
    pub fn new(user: &User, profile: &UserProfile) -> UserProfileView {
        UserProfileView {
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            phone: profile.phone.clone(),
            date_of_birth: profile.date_of_birth.clone(),
            gender: profile.gender.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazy_profile_starts_empty() {
        let profile = UserProfile::empty("asha@example.com", DateTime::now());
        assert_eq!(profile.user_email, "asha@example.com");
        assert_eq!(profile.first_name, "");
        assert!(profile.date_of_birth.is_none());
    }

    #[test]
    fn partial_update_keeps_existing_values() {
        let mut profile = UserProfile::empty("asha@example.com", DateTime::now());
        profile.apply_update(UpdateUserProfileDto {
            first_name: Some("Asha".to_string()),
            last_name: None,
            phone: Some("9876543210".to_string()),
            date_of_birth: None,
            gender: None,
        });
        profile.apply_update(UpdateUserProfileDto {
            first_name: None,
            last_name: Some("Rao".to_string()),
            phone: None,
            date_of_birth: None,
            gender: None,
        });

        assert_eq!(profile.first_name, "Asha");
        assert_eq!(profile.last_name, "Rao");
        assert_eq!(profile.phone, "9876543210");
    }
}
