#[macro_use]
extern crate rocket;

mod config;
mod db;
mod models;
mod routes;
mod services;
mod utils;

use dotenvy::dotenv;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Build, Request, Response, Rocket};
use rocket_okapi::swagger_ui::{SwaggerUIConfig, make_swagger_ui};

/* ----------------------------- CORS ----------------------------- */

pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        if let Some(origin) = request.headers().get_one("Origin") {
            response.set_header(Header::new("Access-Control-Allow-Origin", origin));
        }

        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, DELETE, OPTIONS",
        ));

        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Content-Type, Authorization",
        ));

        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

/* ----------------------------- OPTIONS ----------------------------- */

#[options("/<_..>")]
fn options_handler() {}

/* ----------------------------- ERRORS ----------------------------- */

#[catch(404)]
fn not_found() -> rocket::serde::json::Value {
    rocket::serde::json::json!({
        "status": "ERROR",
        "message": "Resource not found (check /api prefix)"
    })
}

#[catch(500)]
fn internal_error() -> rocket::serde::json::Value {
    rocket::serde::json::json!({
        "status": "ERROR",
        "message": "Internal server error"
    })
}

/* ----------------------------- SWAGGER ----------------------------- */

fn swagger_config() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/openapi.json".to_string(),
        ..Default::default()
    }
}

/* ----------------------------- LAUNCH ----------------------------- */

#[launch]
fn rocket() -> Rocket<Build> {
    dotenv().ok();
    env_logger::init();

    println!("🏠 ServiceNest API running");
    println!("📚 Swagger UI → http://localhost:8000/api/docs");

    rocket::build()
        .attach(db::init())
        .attach(db::seed())
        .attach(CORS)
        .mount("/", routes![options_handler])
        .mount(
            "/api",
            routes![
                // Auth
                routes::auth::register,
                routes::auth::login,
                routes::auth::health,
                routes::auth::test_api,
                // Bookings
                routes::booking::create_booking,
                routes::booking::user_bookings,
                routes::booking::worker_bookings,
                routes::booking::pending_bookings,
                routes::booking::update_booking_status,
                routes::booking::assign_worker_to_booking,
                routes::booking::get_booking,
                routes::booking::booking_health,
                // AI
                routes::ai::recommendations,
                routes::ai::ai_chat,
                routes::ai::service_analysis,
                routes::ai::ai_health,
                // Reviews
                routes::review::submit_review,
                routes::review::service_reviews,
                routes::review::user_reviews,
                // User profile
                routes::profile::get_user_profile,
                routes::profile::update_user_profile,
                routes::profile::change_password,
                // Worker
                routes::worker::create_worker_profile,
                routes::worker::get_worker_profile,
                routes::worker::update_worker_profile,
                routes::worker::worker_dashboard,
                routes::worker::search_workers,
                routes::worker::worker_availability,
                // Contact
                routes::contact::send_contact_message,
            ],
        )
        .mount("/api/docs", make_swagger_ui(&swagger_config()))
        .register("/", catchers![not_found, internal_error])
}
