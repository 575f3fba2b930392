use mongodb::bson::{DateTime, oid::ObjectId};
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::worker::WorkerProfileFields;
use crate::utils::{is_blank, validate_email};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Worker,
}

impl Role {
    /// Case-insensitive parse of the uppercase wire form.
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_uppercase().as_str() {
            "USER" => Some(Role::User),
            "WORKER" => Some(Role::Worker),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Worker => "WORKER",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: self.email.clone(),
            role: self.role.as_str().to_string(),
        }
    }
}

/// Client-facing user record; never carries the password hash.
#[derive(Debug, Serialize, JsonSchema)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub role: String,
}

/* ----------------------- registration ----------------------- */

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDto {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub professional_title: Option<String>,
    pub experience: Option<String>,
    pub phone_number: Option<String>,
    pub service_areas: Option<String>,
    pub hourly_rate: Option<f64>,
    pub skills: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    /// Lowercased, trimmed.
    pub email: String,
    pub password: String,
}

/// A registration is either a plain customer or a customer plus worker
/// profile; the constructor is the only place the role-conditional rules
/// live.
#[derive(Debug)]
pub enum RegistrationRequest {
    UserOnly { credentials: Credentials },
    UserWithWorkerProfile { credentials: Credentials, worker: WorkerProfileFields },
}

impl RegistrationRequest {
    pub fn parse(dto: RegisterDto) -> Result<RegistrationRequest, String> {
        if is_blank(dto.email.as_deref()) {
            return Err("Email is required".to_string());
        }
        let email = dto.email.unwrap().trim().to_lowercase();
        if !validate_email(&email) {
            return Err("Invalid email address".to_string());
        }

        if is_blank(dto.password.as_deref()) {
            return Err("Password is required".to_string());
        }
        let password = dto.password.unwrap();

        if is_blank(dto.role.as_deref()) {
            return Err("Role is required".to_string());
        }
        let role = Role::parse(dto.role.as_deref().unwrap())
            .ok_or_else(|| "Role must be USER or WORKER".to_string())?;

        let credentials = Credentials { email, password };

        match role {
            Role::User => Ok(RegistrationRequest::UserOnly { credentials }),
            Role::Worker => {
                if is_blank(dto.professional_title.as_deref()) {
                    return Err("Professional title is required for service providers".to_string());
                }
                if is_blank(dto.phone_number.as_deref()) {
                    return Err("Phone number is required for service providers".to_string());
                }

                let worker = WorkerProfileFields::normalized(
                    dto.professional_title.as_deref().unwrap(),
                    dto.phone_number.as_deref().unwrap(),
                    dto.experience.as_deref(),
                    dto.service_areas.as_deref(),
                    dto.hourly_rate,
                    dto.skills.as_deref(),
                    dto.bio.as_deref(),
                );

                Ok(RegistrationRequest::UserWithWorkerProfile { credentials, worker })
            }
        }
    }

    pub fn credentials(&self) -> &Credentials {
        match self {
            RegistrationRequest::UserOnly { credentials } => credentials,
            RegistrationRequest::UserWithWorkerProfile { credentials, .. } => credentials,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            RegistrationRequest::UserOnly { .. } => Role::User,
            RegistrationRequest::UserWithWorkerProfile { .. } => Role::Worker,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoginDto {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(email: &str, password: &str, role: &str) -> RegisterDto {
        RegisterDto {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
            role: Some(role.to_string()),
            professional_title: None,
            experience: None,
            phone_number: None,
            service_areas: None,
            hourly_rate: None,
            skills: None,
            bio: None,
        }
    }

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("worker"), Some(Role::Worker));
        assert_eq!(Role::parse(" USER "), Some(Role::User));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn user_registration_lowercases_the_email() {
        let request = RegistrationRequest::parse(dto("Asha@Example.COM", "secret", "USER")).unwrap();
        assert_eq!(request.credentials().email, "asha@example.com");
        assert_eq!(request.role(), Role::User);
        assert!(matches!(request, RegistrationRequest::UserOnly { .. }));
    }

    #[test]
    fn user_registration_ignores_worker_fields() {
        let mut register = dto("asha@example.com", "secret", "USER");
        register.professional_title = Some("Plumber".to_string());

        let request = RegistrationRequest::parse(register).unwrap();
        assert!(matches!(request, RegistrationRequest::UserOnly { .. }));
    }

    #[test]
    fn worker_registration_requires_title_and_phone() {
        let err = RegistrationRequest::parse(dto("w@example.com", "secret", "WORKER")).unwrap_err();
        assert_eq!(err, "Professional title is required for service providers");

        let mut register = dto("w@example.com", "secret", "WORKER");
        register.professional_title = Some("Plumber".to_string());
        let err = RegistrationRequest::parse(register).unwrap_err();
        assert_eq!(err, "Phone number is required for service providers");
    }

    #[test]
    fn worker_registration_applies_profile_defaults() {
        let mut register = dto("w@example.com", "secret", "worker");
        register.professional_title = Some("  Plumber ".to_string());
        register.phone_number = Some("9876543210".to_string());

        let request = RegistrationRequest::parse(register).unwrap();
        match request {
            RegistrationRequest::UserWithWorkerProfile { worker, .. } => {
                assert_eq!(worker.professional_title, "Plumber");
                assert_eq!(worker.experience, "0-1");
                assert_eq!(worker.hourly_rate, 0.0);
                assert_eq!(worker.bio, "");
            }
            other => panic!("expected worker registration, got {:?}", other),
        }
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut register = dto(" ", "secret", "USER");
        assert_eq!(RegistrationRequest::parse(register).unwrap_err(), "Email is required");

        register = dto("a@example.com", "", "USER");
        assert_eq!(RegistrationRequest::parse(register).unwrap_err(), "Password is required");

        register = dto("a@example.com", "secret", "  ");
        assert_eq!(RegistrationRequest::parse(register).unwrap_err(), "Role is required");
    }

    #[test]
    fn malformed_email_is_rejected() {
        let err = RegistrationRequest::parse(dto("not-an-email", "secret", "USER")).unwrap_err();
        assert_eq!(err, "Invalid email address");
    }
}
