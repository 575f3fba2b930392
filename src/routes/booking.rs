use log::info;
use mongodb::bson::{DateTime, Document, doc, oid::ObjectId};
use mongodb::options::FindOptions;
use rocket::State;
use rocket::futures::TryStreamExt;
use rocket::serde::json::Json;
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use rocket_okapi::openapi;
use serde::Serialize;

use crate::db::DbConn;
use crate::models::{AssignWorkerDto, Booking, CreateBookingDto, UpdateStatusDto, booking::status};
use crate::utils::{ApiError, ApiResponse, HealthStatus};

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreatedPayload {
    pub booking_id: String,
    pub booking: Booking,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingPayload {
    pub booking: Booking,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingListPayload {
    pub bookings: Vec<Booking>,
    pub count: usize,
}

impl BookingListPayload {
    fn new(bookings: Vec<Booking>) -> Self {
        let count = bookings.len();
        BookingListPayload { bookings, count }
    }
}

/// Newest-created-first listing for the given filter.
pub(crate) async fn find_bookings(db: &DbConn, filter: Document) -> Result<Vec<Booking>, ApiError> {
    let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
    db.collection::<Booking>("bookings")
        .find(filter, options)
        .await
        .map_err(ApiError::internal)?
        .try_collect()
        .await
        .map_err(ApiError::internal)
}

async fn load_booking(db: &DbConn, id: &str) -> Result<Booking, ApiError> {
    let object_id =
        ObjectId::parse_str(id).map_err(|_| ApiError::validation("Invalid booking ID"))?;
    db.collection::<Booking>("bookings")
        .find_one(doc! { "_id": object_id }, None)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::not_found("Booking not found"))
}

async fn store_booking(db: &DbConn, booking: &Booking) -> Result<(), ApiError> {
    let id = booking.id.ok_or_else(|| ApiError::internal("booking without id"))?;
    db.collection::<Booking>("bookings")
        .replace_one(doc! { "_id": id }, booking, None)
        .await
        .map_err(ApiError::internal)?;
    Ok(())
}

#[openapi(tag = "Bookings")]
#[post("/bookings", data = "<dto>")]
pub async fn create_booking(
    db: &State<DbConn>,
    dto: Json<CreateBookingDto>,
) -> Result<Json<ApiResponse<BookingCreatedPayload>>, ApiError> {
    let mut booking =
        Booking::create(dto.into_inner(), DateTime::now()).map_err(ApiError::validation)?;

    let result = db
        .collection::<Booking>("bookings")
        .insert_one(&booking, None)
        .await
        .map_err(ApiError::internal)?;
    booking.id = result.inserted_id.as_object_id();

    let booking_id = booking.id.map(|id| id.to_hex()).unwrap_or_default();
    info!("booking {} created for {}", booking_id, booking.customer_email);

    Ok(Json(ApiResponse::success(
        "Booking created successfully",
        BookingCreatedPayload { booking_id, booking },
    )))
}

#[openapi(tag = "Bookings")]
#[get("/bookings/user/<email>")]
pub async fn user_bookings(
    db: &State<DbConn>,
    email: String,
) -> Result<Json<ApiResponse<BookingListPayload>>, ApiError> {
    let bookings = find_bookings(db, doc! { "customerEmail": &email }).await?;
    info!("found {} bookings for user {}", bookings.len(), email);

    Ok(Json(ApiResponse::success(
        "Bookings retrieved successfully",
        BookingListPayload::new(bookings),
    )))
}

#[openapi(tag = "Bookings")]
#[get("/bookings/worker/<worker_email>")]
pub async fn worker_bookings(
    db: &State<DbConn>,
    worker_email: String,
) -> Result<Json<ApiResponse<BookingListPayload>>, ApiError> {
    let bookings = find_bookings(db, doc! { "assignedWorker": &worker_email }).await?;
    info!("found {} bookings for worker {}", bookings.len(), worker_email);

    Ok(Json(ApiResponse::success(
        "Bookings retrieved successfully",
        BookingListPayload::new(bookings),
    )))
}

/// The shared work queue: pending bookings nobody has accepted yet.
#[openapi(tag = "Bookings")]
#[get("/bookings/pending")]
pub async fn pending_bookings(
    db: &State<DbConn>,
) -> Result<Json<ApiResponse<BookingListPayload>>, ApiError> {
    let bookings = find_bookings(
        db,
        doc! { "status": status::PENDING, "assignedWorker": null },
    )
    .await?;

    Ok(Json(ApiResponse::success(
        "Pending bookings retrieved successfully",
        BookingListPayload::new(bookings),
    )))
}

#[openapi(tag = "Bookings")]
#[put("/bookings/<id>/status", data = "<dto>")]
pub async fn update_booking_status(
    db: &State<DbConn>,
    id: String,
    dto: Json<UpdateStatusDto>,
) -> Result<Json<ApiResponse<BookingPayload>>, ApiError> {
    let mut booking = load_booking(db, &id).await?;

    booking
        .apply_status_update(
            dto.status.as_deref().unwrap_or(""),
            dto.worker_email.as_deref(),
        )
        .map_err(ApiError::validation)?;
    store_booking(db, &booking).await?;

    info!("booking {} status updated to {}", id, booking.status);

    Ok(Json(ApiResponse::success(
        "Booking status updated successfully",
        BookingPayload { booking },
    )))
}

#[openapi(tag = "Bookings")]
#[put("/bookings/<id>/assign-worker", data = "<dto>")]
pub async fn assign_worker_to_booking(
    db: &State<DbConn>,
    id: String,
    dto: Json<AssignWorkerDto>,
) -> Result<Json<ApiResponse<BookingPayload>>, ApiError> {
    let mut booking = load_booking(db, &id).await?;

    booking
        .assign_worker(dto.worker_email.as_deref().unwrap_or(""))
        .map_err(ApiError::validation)?;
    store_booking(db, &booking).await?;

    info!(
        "worker {} assigned to booking {}",
        booking.assigned_worker.as_deref().unwrap_or(""),
        id
    );

    Ok(Json(ApiResponse::success(
        "Worker assigned successfully",
        BookingPayload { booking },
    )))
}

#[openapi(tag = "Bookings")]
#[get("/bookings/<id>")]
pub async fn get_booking(
    db: &State<DbConn>,
    id: String,
) -> Result<Json<ApiResponse<BookingPayload>>, ApiError> {
    let booking = load_booking(db, &id).await?;

    Ok(Json(ApiResponse::success(
        "Booking retrieved successfully",
        BookingPayload { booking },
    )))
}

#[openapi(tag = "Bookings")]
#[get("/bookings/health")]
pub fn booking_health() -> Json<HealthStatus> {
    Json(HealthStatus::up("Bookings API is running"))
}
