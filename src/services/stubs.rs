//! Placeholder payloads for surfaces that have no real data source yet
//! (worker dashboards, search and availability). Centralized here so the
//! fixtures have one home to be replaced from once earnings, search and
//! scheduling land.

use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_earnings: f64,
    pub monthly_earnings: f64,
    pub completed_jobs: u32,
    pub pending_jobs: u32,
    pub avg_rating: f64,
    pub response_rate: String,
    pub repeat_clients: u32,
    pub profile_completion: String,
}

pub fn dashboard_stats() -> DashboardStats {
    DashboardStats {
        total_earnings: 12500.0,
        monthly_earnings: 8500.0,
        completed_jobs: 25,
        pending_jobs: 3,
        avg_rating: 4.8,
        response_rate: "95%".to_string(),
        repeat_clients: 15,
        profile_completion: "85%".to_string(),
    }
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSearchResult {
    pub email: String,
    pub professional_title: String,
    pub service: String,
    pub location: String,
    pub hourly_rate: f64,
    pub rating: f64,
    pub experience: String,
    pub completed_jobs: u32,
}

pub fn search_results() -> Vec<WorkerSearchResult> {
    [
        ("plumber@example.com", "Senior Plumber", "Plumbing", 500.0, 4.8, "5-10 years"),
        ("electrician@example.com", "Certified Electrician", "Electrical", 400.0, 4.9, "3-5 years"),
        ("ac@example.com", "AC Technician", "AC Service", 600.0, 4.7, "1-3 years"),
    ]
    .into_iter()
    .map(|(email, title, service, rate, rating, experience)| WorkerSearchResult {
        email: email.to_string(),
        professional_title: title.to_string(),
        service: service.to_string(),
        location: "Chennai".to_string(),
        hourly_rate: rate,
        rating,
        experience: experience.to_string(),
        completed_jobs: 25,
    })
    .collect()
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAvailability {
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
    pub emergency_service: bool,
    pub response_time: String,
}

pub fn weekly_availability() -> WeeklyAvailability {
    let weekday = "9:00 AM - 6:00 PM".to_string();
    WeeklyAvailability {
        monday: weekday.clone(),
        tuesday: weekday.clone(),
        wednesday: weekday.clone(),
        thursday: weekday.clone(),
        friday: weekday,
        saturday: "10:00 AM - 4:00 PM".to_string(),
        sunday: "Not Available".to_string(),
        emergency_service: true,
        response_time: "Within 2 hours".to_string(),
    }
}
