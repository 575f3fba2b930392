use log::{error, info, warn};
use mongodb::bson::{DateTime, doc};
use mongodb::{Client, Database};
use rocket::fairing::AdHoc;

use crate::models::{Role, User};
use crate::services::PasswordService;

pub fn init() -> AdHoc {
    AdHoc::on_ignite("MongoDB", |rocket| async {
        match connect().await {
            Ok(database) => {
                info!("✓ MongoDB connected successfully");
                rocket.manage(database)
            }
            Err(e) => {
                error!("✗ Failed to connect to MongoDB: {}", e);
                rocket
            }
        }
    })
}

async fn connect() -> Result<Database, mongodb::error::Error> {
    let uri = crate::config::Config::mongodb_uri();
    let client = Client::with_uri_str(&uri).await?;

    // Test connection
    client
        .database("admin")
        .run_command(doc! {"ping": 1}, None)
        .await?;

    Ok(client.database("servicenest"))
}

/// Creates the development sample accounts when they are absent.
pub fn seed() -> AdHoc {
    AdHoc::on_ignite("Sample accounts", |rocket| async {
        if !crate::config::Config::is_development() {
            return rocket;
        }
        if let Some(db) = rocket.state::<DbConn>() {
            if let Err(e) = seed_sample_users(db).await {
                warn!("sample account seeding skipped: {}", e);
            }
        }
        rocket
    })
}

async fn seed_sample_users(db: &DbConn) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let users = db.collection::<User>("users");

    for (email, role) in [
        ("user@servicenest.com", Role::User),
        ("worker@servicenest.com", Role::Worker),
    ] {
        if users.find_one(doc! { "email": email }, None).await?.is_none() {
            let user = User {
                id: None,
                email: email.to_string(),
                password_hash: PasswordService::hash("password123")?,
                role,
                created_at: DateTime::now(),
            };
            users.insert_one(&user, None).await?;
            info!("sample {} account created", role.as_str());
        }
    }

    Ok(())
}

pub type DbConn = Database;
