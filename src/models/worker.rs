use mongodb::bson::{DateTime, oid::ObjectId};
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub id: Option<ObjectId>,
    /// 1:1 with a WORKER user.
    pub email: String,
    pub professional_title: String,
    /// Experience bucket, e.g. "0-1" or "5-10".
    pub experience: String,
    pub bio: String,
    pub hourly_rate: f64,
    pub service_areas: String,
    pub phone_number: String,
    pub skills: String,
    #[schemars(with = "String")]
    pub created_at: DateTime,
    #[schemars(with = "String")]
    pub updated_at: DateTime,
}

/// The profile fields a worker supplies at registration or profile
/// creation, after defaults are applied.
#[derive(Debug, Clone)]
pub struct WorkerProfileFields {
    pub professional_title: String,
    pub experience: String,
    pub phone_number: String,
    pub service_areas: String,
    pub hourly_rate: f64,
    pub skills: String,
    pub bio: String,
}

impl WorkerProfileFields {
    /// Trims the required fields and fills the stored defaults for the
    /// optional ones.
    pub fn normalized(
        professional_title: &str,
        phone_number: &str,
        experience: Option<&str>,
        service_areas: Option<&str>,
        hourly_rate: Option<f64>,
        skills: Option<&str>,
        bio: Option<&str>,
    ) -> WorkerProfileFields {
        WorkerProfileFields {
            professional_title: professional_title.trim().to_string(),
            experience: experience.unwrap_or("0-1").to_string(),
            phone_number: phone_number.trim().to_string(),
            service_areas: service_areas.map(str::trim).unwrap_or("").to_string(),
            hourly_rate: hourly_rate.unwrap_or(0.0),
            skills: skills.map(str::trim).unwrap_or("").to_string(),
            bio: bio.map(str::trim).unwrap_or("").to_string(),
        }
    }
}

impl WorkerProfile {
    pub fn new(email: String, fields: WorkerProfileFields, now: DateTime) -> WorkerProfile {
        WorkerProfile {
            id: None,
            email,
            professional_title: fields.professional_title,
            experience: fields.experience,
            bio: fields.bio,
            hourly_rate: fields.hourly_rate,
            service_areas: fields.service_areas,
            phone_number: fields.phone_number,
            skills: fields.skills,
            created_at: now,
            updated_at: now,
        }
    }

    /// Partial update; only provided fields change.
    pub fn apply_update(&mut self, dto: UpdateWorkerProfileDto, now: DateTime) {
        if let Some(title) = dto.professional_title {
            self.professional_title = title.trim().to_string();
        }
        if let Some(experience) = dto.experience {
            self.experience = experience;
        }
        if let Some(bio) = dto.bio {
            self.bio = bio.trim().to_string();
        }
        if let Some(rate) = dto.hourly_rate {
            self.hourly_rate = rate;
        }
        if let Some(areas) = dto.service_areas {
            self.service_areas = areas.trim().to_string();
        }
        if let Some(phone) = dto.phone_number {
            self.phone_number = phone.trim().to_string();
        }
        if let Some(skills) = dto.skills {
            self.skills = skills.trim().to_string();
        }
        self.updated_at = now;
    }

    pub fn summary(&self) -> WorkerProfileSummary {
        WorkerProfileSummary {
            professional_title: self.professional_title.clone(),
            experience: self.experience.clone(),
            phone_number: self.phone_number.clone(),
        }
    }

    pub fn card(&self) -> WorkerProfileCard {
        WorkerProfileCard {
            email: self.email.clone(),
            professional_title: self.professional_title.clone(),
            experience: self.experience.clone(),
            phone_number: self.phone_number.clone(),
        }
    }

    pub fn view(&self, user_role: String) -> WorkerProfileView {
        WorkerProfileView {
            email: self.email.clone(),
            professional_title: self.professional_title.clone(),
            experience: self.experience.clone(),
            phone_number: self.phone_number.clone(),
            service_areas: self.service_areas.clone(),
            hourly_rate: self.hourly_rate,
            skills: self.skills.clone(),
            bio: self.bio.clone(),
            user_role,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkerProfileDto {
    pub email: Option<String>,
    pub professional_title: Option<String>,
    pub experience: Option<String>,
    pub phone_number: Option<String>,
    pub service_areas: Option<String>,
    pub hourly_rate: Option<f64>,
    pub skills: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkerProfileDto {
    pub professional_title: Option<String>,
    pub experience: Option<String>,
    pub bio: Option<String>,
    pub hourly_rate: Option<f64>,
    pub service_areas: Option<String>,
    pub phone_number: Option<String>,
    pub skills: Option<String>,
}

/// Short profile echo used by registration and profile updates.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfileSummary {
    pub professional_title: String,
    pub experience: String,
    pub phone_number: String,
}

/// Summary plus the owning email, returned on profile creation.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfileCard {
    pub email: String,
    pub professional_title: String,
    pub experience: String,
    pub phone_number: String,
}

/// Full profile details plus the owning user's role.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfileView {
    pub email: String,
    pub professional_title: String,
    pub experience: String,
    pub phone_number: String,
    pub service_areas: String,
    pub hourly_rate: f64,
    pub skills: String,
    pub bio: String,
    pub user_role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_fields_trim_and_default() {
        let fields = WorkerProfileFields::normalized(
            "  Senior Plumber ",
            " 9876543210 ",
            None,
            Some(" Chennai, Velachery "),
            None,
            None,
            None,
        );

        assert_eq!(fields.professional_title, "Senior Plumber");
        assert_eq!(fields.phone_number, "9876543210");
        assert_eq!(fields.experience, "0-1");
        assert_eq!(fields.service_areas, "Chennai, Velachery");
        assert_eq!(fields.hourly_rate, 0.0);
        assert_eq!(fields.skills, "");
    }

    #[test]
    fn partial_update_leaves_missing_fields_alone() {
        let created = DateTime::from_millis(0);
        let mut profile = WorkerProfile::new(
            "w@example.com".to_string(),
            WorkerProfileFields::normalized("Plumber", "9876543210", Some("3-5"), None, Some(450.0), None, None),
            created,
        );

        let later = DateTime::from_millis(86_400_000);
        profile.apply_update(
            UpdateWorkerProfileDto {
                professional_title: Some(" Master Plumber ".to_string()),
                experience: None,
                bio: None,
                hourly_rate: Some(500.0),
                service_areas: None,
                phone_number: None,
                skills: None,
            },
            later,
        );

        assert_eq!(profile.professional_title, "Master Plumber");
        assert_eq!(profile.experience, "3-5");
        assert_eq!(profile.hourly_rate, 500.0);
        assert_eq!(profile.phone_number, "9876543210");
        assert_eq!(profile.created_at, created);
        assert_eq!(profile.updated_at, later);
    }
}
