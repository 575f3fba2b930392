//! Rule-based recommendation engine. Every list is a pure function of the
//! customer's booking history, the supplied clock and an injected RNG; the
//! RNG only feeds the cosmetic confidence/popularity fields so tests can
//! pin a seed.

use chrono::{DateTime, Datelike, Utc};
use mongodb::bson::DateTime as BsonDateTime;
use rand::Rng;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::Booking;

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSuggestion {
    pub name: String,
    pub reason: String,
    pub rating: f64,
    pub price: f64,
    pub category: String,
    /// Cosmetic confidence score in [85, 95], one decimal.
    pub ai_score: f64,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BundleSuggestion {
    pub name: String,
    pub description: String,
    pub rating: f64,
    pub price: f64,
    pub original_price: f64,
    pub services: Vec<String>,
    pub savings: f64,
    /// Cosmetic confidence score in [80, 90], one decimal.
    pub ai_score: f64,
    /// Cosmetic popularity percentage in [50, 100].
    pub popularity: u32,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Recommendations {
    pub personalized: Vec<ServiceSuggestion>,
    pub seasonal: Vec<ServiceSuggestion>,
    pub trending: Vec<ServiceSuggestion>,
    pub predicted: Vec<ServiceSuggestion>,
    pub bundles: Vec<BundleSuggestion>,
}

pub fn generate(history: &[Booking], now: DateTime<Utc>, mut rng: impl Rng) -> Recommendations {
    Recommendations {
        personalized: personalized(history, &mut rng),
        seasonal: seasonal(now.month(), &mut rng),
        trending: trending(&mut rng),
        predicted: predicted(history, now, &mut rng),
        bundles: bundles(history, &mut rng),
    }
}

fn history_matches(history: &[Booking], keyword: &str) -> bool {
    history.iter().any(|b| b.service_type.contains(keyword))
}

/// Suggestions keyed off past service types; a fixed pair for customers
/// with no matching history.
fn personalized<R: Rng>(history: &[Booking], rng: &mut R) -> Vec<ServiceSuggestion> {
    let mut services = Vec::new();

    if history_matches(history, "Plumbing") {
        services.push(service(
            "Bathroom Renovation",
            "Based on your plumbing history",
            4.8,
            15000.0,
            "renovation",
            rng,
        ));
    }
    if history_matches(history, "Electrical") {
        services.push(service(
            "Smart Home Setup",
            "Upgrade your electrical systems",
            4.7,
            8000.0,
            "smart-home",
            rng,
        ));
    }
    if history_matches(history, "AC") {
        services.push(service(
            "AC Maintenance Package",
            "Regular maintenance improves efficiency",
            4.6,
            1999.0,
            "maintenance",
            rng,
        ));
    }

    if services.is_empty() {
        services.push(service(
            "Home Deep Cleaning",
            "Perfect for new customers",
            4.9,
            1299.0,
            "cleaning",
            rng,
        ));
        services.push(service(
            "Basic Electrical Check",
            "Ensure home safety",
            4.7,
            599.0,
            "safety",
            rng,
        ));
    }

    services
}

/// Month bands are checked in order; June falls in both the spring and the
/// monsoon range and resolves to spring because that branch comes first.
/// The winter band wraps the year end.
fn seasonal<R: Rng>(month: u32, rng: &mut R) -> Vec<ServiceSuggestion> {
    let mut services = Vec::new();

    if (3..=6).contains(&month) {
        // Spring (Mar-Jun)
        services.push(service(
            "Summer AC Preparation",
            "Get your AC ready for summer",
            4.8,
            1499.0,
            "maintenance",
            rng,
        ));
        services.push(service(
            "Water Cooler Service",
            "Beat the summer heat",
            4.5,
            899.0,
            "cleaning",
            rng,
        ));
    } else if (6..=9).contains(&month) {
        // Monsoon (Jun-Sep)
        services.push(service(
            "Monsoon Home Protection",
            "Waterproofing and drainage check",
            4.7,
            2999.0,
            "maintenance",
            rng,
        ));
        services.push(service(
            "Electrical Safety Audit",
            "Stay safe during rains",
            4.8,
            1299.0,
            "safety",
            rng,
        ));
    } else if month >= 10 || month <= 2 {
        // Winter (Oct-Feb)
        services.push(service(
            "Heater Installation & Service",
            "Stay warm this winter",
            4.6,
            1999.0,
            "installation",
            rng,
        ));
        services.push(service(
            "Geyser Maintenance",
            "Ensure hot water supply",
            4.7,
            899.0,
            "maintenance",
            rng,
        ));
    }

    // Always available regardless of season
    services.push(service(
        "Festival Deep Cleaning",
        "Get ready for celebrations",
        4.9,
        1999.0,
        "cleaning",
        rng,
    ));

    services
}

/// Fixed catalog; stands in for location-based trending until real
/// location data exists.
fn trending<R: Rng>(rng: &mut R) -> Vec<ServiceSuggestion> {
    vec![
        service(
            "Water Purifier Installation",
            "Popular in your area",
            4.8,
            2500.0,
            "installation",
            rng,
        ),
        service(
            "RO Service & Repair",
            "High demand service",
            4.6,
            799.0,
            "maintenance",
            rng,
        ),
        service(
            "Modular Kitchen Setup",
            "Trending home upgrade",
            4.9,
            25000.0,
            "renovation",
            rng,
        ),
        service(
            "Pest Control Service",
            "Seasonal requirement",
            4.7,
            1499.0,
            "cleaning",
            rng,
        ),
    ]
}

/// Threshold rules over the most recent booking. Several rules can fire
/// from the same booking; a history with no bookings gets the welcome
/// inspection instead.
fn predicted<R: Rng>(history: &[Booking], now: DateTime<Utc>, rng: &mut R) -> Vec<ServiceSuggestion> {
    let mut services = Vec::new();

    match history.first() {
        Some(last) => {
            let days = days_since(last.created_at, now);
            log::debug!("days since last service: {}", days);

            let last_service_type = &last.service_type;

            if last_service_type.contains("Plumbing") && days > 90 {
                services.push(service(
                    "Plumbing Health Check",
                    "Time for routine plumbing inspection",
                    4.7,
                    699.0,
                    "maintenance",
                    rng,
                ));
            }
            if last_service_type.contains("Electrical") && days > 180 {
                services.push(service(
                    "Electrical Safety Check",
                    "Regular safety inspection recommended",
                    4.8,
                    899.0,
                    "safety",
                    rng,
                ));
            }
            if last_service_type.contains("AC") && days > 60 {
                services.push(service(
                    "AC Filter Cleaning",
                    "Maintain AC efficiency",
                    4.6,
                    499.0,
                    "maintenance",
                    rng,
                ));
            }

            // Anything half a year old warrants the full check-up
            if days > 180 {
                services.push(service(
                    "Preventive Maintenance Package",
                    "Time for comprehensive home check-up",
                    4.7,
                    1999.0,
                    "maintenance",
                    rng,
                ));
            }
        }
        None => {
            services.push(service(
                "Welcome Home Inspection",
                "Start with a complete home assessment",
                4.8,
                999.0,
                "safety",
                rng,
            ));
        }
    }

    services
}

/// Bundle composition: two evergreen bundles frame up to two
/// history-dependent ones.
fn bundles<R: Rng>(history: &[Booking], rng: &mut R) -> Vec<BundleSuggestion> {
    let has_plumbing = history_matches(history, "Plumbing");
    let has_electrical = history_matches(history, "Electrical");
    let has_cleaning = history_matches(history, "Cleaning");

    let mut bundles = vec![bundle(
        "Essential Home Care",
        "Basic plumbing + electrical + cleaning",
        4.8,
        3499.0,
        4599.0,
        &["Basic Plumbing Check", "Electrical Safety", "Standard Cleaning"],
        rng,
    )];

    if has_plumbing && has_electrical {
        bundles.push(bundle(
            "Complete Home Maintenance",
            "Comprehensive plumbing + electrical + deep cleaning",
            4.9,
            5999.0,
            7899.0,
            &[
                "Advanced Plumbing Check",
                "Complete Electrical Audit",
                "Premium Deep Cleaning",
            ],
            rng,
        ));
    }

    if has_cleaning {
        bundles.push(bundle(
            "Ultimate Clean & Repair",
            "Deep cleaning + minor repairs package",
            4.7,
            4499.0,
            5699.0,
            &[
                "Premium Deep Cleaning",
                "Minor Plumbing Fixes",
                "Electrical Repairs",
            ],
            rng,
        ));
    }

    bundles.push(bundle(
        "Monsoon Ready Package",
        "Waterproofing + drainage + AC service",
        4.6,
        4999.0,
        6299.0,
        &["Waterproofing Service", "Drainage Cleaning", "AC Maintenance"],
        rng,
    ));

    bundles
}

fn service<R: Rng>(
    name: &str,
    reason: &str,
    rating: f64,
    price: f64,
    category: &str,
    rng: &mut R,
) -> ServiceSuggestion {
    ServiceSuggestion {
        name: name.to_string(),
        reason: reason.to_string(),
        rating,
        price,
        category: category.to_string(),
        ai_score: confidence(rng, 85.0),
        image: image_for(category),
    }
}

fn bundle<R: Rng>(
    name: &str,
    description: &str,
    rating: f64,
    price: f64,
    original_price: f64,
    services: &[&str],
    rng: &mut R,
) -> BundleSuggestion {
    // savings must never be negative
    debug_assert!(price <= original_price);
    BundleSuggestion {
        name: name.to_string(),
        description: description.to_string(),
        rating,
        price,
        original_price,
        services: services.iter().map(|s| s.to_string()).collect(),
        savings: original_price - price,
        ai_score: confidence(rng, 80.0),
        popularity: popularity(rng),
    }
}

/// One-decimal score in [base, base + 10].
fn confidence<R: Rng>(rng: &mut R, base: f64) -> f64 {
    ((rng.gen_range(0.0..10.0) + base) * 10.0).round() / 10.0
}

/// Integer percentage in [50, 100].
fn popularity<R: Rng>(rng: &mut R) -> u32 {
    rng.gen_range(50.0..100.0_f64).round() as u32
}

fn image_for(category: &str) -> String {
    match category.to_lowercase().as_str() {
        "plumbing" => "🚰",
        "electrical" => "⚡",
        "cleaning" => "🧹",
        "maintenance" => "🔧",
        "installation" => "🔩",
        "renovation" => "🏠",
        "safety" => "🛡️",
        "smart-home" => "🤖",
        _ => "🔍",
    }
    .to_string()
}

fn days_since(then: BsonDateTime, now: DateTime<Utc>) -> i64 {
    (now.timestamp_millis() - then.timestamp_millis()) / 86_400_000
}

/* ----------------------- history analysis ----------------------- */

#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryAnalysis {
    pub total_bookings: usize,
    pub service_frequency: BTreeMap<String, u64>,
    pub favorite_service: String,
    pub total_spent: f64,
    pub average_booking_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_since_last_service: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_recency: Option<String>,
}

/// Frequency, spending and recency stats over a newest-first history.
pub fn analyze_history(history: &[Booking], now: DateTime<Utc>) -> HistoryAnalysis {
    let mut service_frequency: BTreeMap<String, u64> = BTreeMap::new();
    for booking in history {
        *service_frequency.entry(booking.service_type.clone()).or_insert(0) += 1;
    }

    let favorite_service = service_frequency
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| "No services yet".to_string());

    let total_spent: f64 = history.iter().map(|b| b.price.unwrap_or(0.0)).sum();
    let average_booking_value = if history.is_empty() {
        0.0
    } else {
        total_spent / history.len() as f64
    };

    let (days_since_last_service, service_recency) = match history.first() {
        Some(last) => {
            let days = days_since(last.created_at, now);
            let label = if days < 30 { "Active" } else { "Needs Attention" };
            (Some(days), Some(label.to_string()))
        }
        None => (None, None),
    };

    HistoryAnalysis {
        total_bookings: history.len(),
        service_frequency,
        favorite_service,
        total_spent,
        average_booking_value,
        days_since_last_service,
        service_recency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::status;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn booking(service_type: &str, days_ago: i64, now: DateTime<Utc>) -> Booking {
        Booking {
            id: None,
            service_type: service_type.to_string(),
            customer_name: "Asha Rao".to_string(),
            customer_email: "asha@example.com".to_string(),
            customer_phone: "9876543210".to_string(),
            price: Some(999.0),
            status: status::COMPLETED.to_string(),
            assigned_worker: None,
            created_at: BsonDateTime::from_millis(
                now.timestamp_millis() - days_ago * 86_400_000,
            ),
        }
    }

    fn names(services: &[ServiceSuggestion]) -> Vec<&str> {
        services.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn stale_plumbing_booking_predicts_health_check() {
        let now = at(2025, 6, 15);
        let history = vec![booking("Plumbing Repair", 100, now)];

        let predicted = predicted(&history, now, &mut rng());
        assert_eq!(names(&predicted), vec!["Plumbing Health Check"]);
    }

    #[test]
    fn fresh_plumbing_booking_predicts_nothing() {
        let now = at(2025, 6, 15);
        let history = vec![booking("Plumbing Repair", 30, now)];

        assert!(predicted(&history, now, &mut rng()).is_empty());
    }

    #[test]
    fn very_stale_electrical_booking_fires_two_rules() {
        let now = at(2025, 6, 15);
        let history = vec![booking("Electrical Repair", 200, now)];

        let predicted = predicted(&history, now, &mut rng());
        assert_eq!(
            names(&predicted),
            vec!["Electrical Safety Check", "Preventive Maintenance Package"]
        );
    }

    #[test]
    fn empty_history_predicts_welcome_inspection() {
        let predicted = predicted(&[], at(2025, 6, 15), &mut rng());
        assert_eq!(names(&predicted), vec!["Welcome Home Inspection"]);
    }

    #[test]
    fn only_most_recent_booking_drives_prediction() {
        let now = at(2025, 6, 15);
        // Newest-first history: the stale plumbing booking is not first, so
        // it contributes nothing.
        let history = vec![
            booking("AC Installation", 10, now),
            booking("Plumbing Repair", 400, now),
        ];

        assert!(predicted(&history, now, &mut rng()).is_empty());
    }

    #[test]
    fn june_resolves_to_the_spring_band() {
        let seasonal = seasonal(6, &mut rng());
        let seasonal_names = names(&seasonal);
        assert!(seasonal_names.contains(&"Summer AC Preparation"));
        assert!(!seasonal_names.contains(&"Monsoon Home Protection"));
    }

    #[test]
    fn winter_band_wraps_the_year_end() {
        for month in [10, 12, 1, 2] {
            let seasonal_names: Vec<String> = seasonal(month, &mut rng())
                .into_iter()
                .map(|s| s.name)
                .collect();
            assert!(
                seasonal_names.contains(&"Heater Installation & Service".to_string()),
                "month {} missed the winter band",
                month
            );
        }
    }

    #[test]
    fn festival_cleaning_is_evergreen() {
        for month in 1..=12 {
            let seasonal = seasonal(month, &mut rng());
            assert_eq!(seasonal.last().unwrap().name, "Festival Deep Cleaning");
        }
    }

    #[test]
    fn personalized_matches_accumulate() {
        let now = at(2025, 6, 15);
        let history = vec![
            booking("Plumbing Repair", 5, now),
            booking("AC Service", 9, now),
        ];

        assert_eq!(
            names(&personalized(&history, &mut rng())),
            vec!["Bathroom Renovation", "AC Maintenance Package"]
        );
    }

    #[test]
    fn personalized_falls_back_for_new_customers() {
        assert_eq!(
            names(&personalized(&[], &mut rng())),
            vec!["Home Deep Cleaning", "Basic Electrical Check"]
        );
    }

    #[test]
    fn plumbing_and_electrical_history_unlocks_complete_bundle() {
        let now = at(2025, 6, 15);
        let history = vec![
            booking("Plumbing Check", 5, now),
            booking("Electrical Repair", 9, now),
        ];

        let bundles = bundles(&history, &mut rng());
        let bundle_names: Vec<&str> = bundles.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            bundle_names,
            vec![
                "Essential Home Care",
                "Complete Home Maintenance",
                "Monsoon Ready Package"
            ]
        );
    }

    #[test]
    fn bundle_savings_are_never_negative() {
        let now = at(2025, 6, 15);
        let history = vec![
            booking("Plumbing Check", 5, now),
            booking("Electrical Repair", 9, now),
            booking("Deep Cleaning", 12, now),
        ];

        for bundle in bundles(&history, &mut rng()) {
            assert!(bundle.savings >= 0.0, "{} has negative savings", bundle.name);
            assert_eq!(bundle.savings, bundle.original_price - bundle.price);
        }
    }

    #[test]
    fn cosmetic_scores_stay_in_their_documented_ranges() {
        let now = at(2025, 12, 15);
        let history = vec![booking("Plumbing Repair", 200, now)];
        let recommendations = generate(&history, now, rng());

        let all_services = recommendations
            .personalized
            .iter()
            .chain(&recommendations.seasonal)
            .chain(&recommendations.trending)
            .chain(&recommendations.predicted);
        for suggestion in all_services {
            assert!((85.0..=95.0).contains(&suggestion.ai_score), "{}", suggestion.name);
        }
        for bundle in &recommendations.bundles {
            assert!((80.0..=90.0).contains(&bundle.ai_score), "{}", bundle.name);
            assert!((50..=100).contains(&bundle.popularity), "{}", bundle.name);
        }
    }

    #[test]
    fn category_images_come_from_the_fixed_table() {
        let trending = trending(&mut rng());
        assert_eq!(trending[0].image, "🔩");
        assert_eq!(image_for("unknown-category"), "🔍");
    }

    #[test]
    fn analysis_of_empty_history() {
        let analysis = analyze_history(&[], at(2025, 6, 15));
        assert_eq!(analysis.total_bookings, 0);
        assert_eq!(analysis.favorite_service, "No services yet");
        assert_eq!(analysis.total_spent, 0.0);
        assert_eq!(analysis.average_booking_value, 0.0);
        assert!(analysis.days_since_last_service.is_none());
        assert!(analysis.service_recency.is_none());
    }

    #[test]
    fn analysis_counts_frequency_and_spending() {
        let now = at(2025, 6, 15);
        let mut history = vec![
            booking("Plumbing Repair", 10, now),
            booking("Plumbing Repair", 40, now),
            booking("AC Service", 70, now),
        ];
        history[2].price = Some(501.0);

        let analysis = analyze_history(&history, now);
        assert_eq!(analysis.total_bookings, 3);
        assert_eq!(analysis.service_frequency["Plumbing Repair"], 2);
        assert_eq!(analysis.service_frequency["AC Service"], 1);
        assert_eq!(analysis.favorite_service, "Plumbing Repair");
        assert_eq!(analysis.total_spent, 2499.0);
        assert_eq!(analysis.average_booking_value, 833.0);
        assert_eq!(analysis.days_since_last_service, Some(10));
        assert_eq!(analysis.service_recency.as_deref(), Some("Active"));
    }

    #[test]
    fn analysis_flags_stale_customers() {
        let now = at(2025, 6, 15);
        let history = vec![booking("AC Service", 45, now)];

        let analysis = analyze_history(&history, now);
        assert_eq!(analysis.service_recency.as_deref(), Some("Needs Attention"));
    }
}
