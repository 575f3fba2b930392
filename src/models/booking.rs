use mongodb::bson::{DateTime, oid::ObjectId};
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::utils::is_blank;

/// Well-known status values. Stored as plain strings: the status update
/// endpoint accepts any non-blank value, and that stays part of the wire
/// contract.
pub mod status {
    pub const PENDING: &str = "pending";
    pub const ACCEPTED: &str = "accepted";
    pub const IN_PROGRESS: &str = "in-progress";
    pub const COMPLETED: &str = "completed";
    pub const CANCELLED: &str = "cancelled";
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<String>")]
    pub id: Option<ObjectId>,
    pub service_type: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub price: Option<f64>,
    pub status: String,
    /// None while the booking sits in the shared pending queue.
    pub assigned_worker: Option<String>,
    #[schemars(with = "String")]
    pub created_at: DateTime,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingDto {
    pub service_type: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub price: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusDto {
    pub status: Option<String>,
    pub worker_email: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignWorkerDto {
    pub worker_email: Option<String>,
}

impl Booking {
    /// Validates the request and builds an unassigned booking. Status
    /// defaults to pending when the caller sends none.
    pub fn create(dto: CreateBookingDto, now: DateTime) -> Result<Booking, String> {
        if is_blank(dto.service_type.as_deref())
            || is_blank(dto.customer_name.as_deref())
            || is_blank(dto.customer_email.as_deref())
            || is_blank(dto.customer_phone.as_deref())
        {
            return Err("All fields are required".to_string());
        }

        Ok(Booking {
            id: None,
            service_type: dto.service_type.unwrap(),
            customer_name: dto.customer_name.unwrap(),
            customer_email: dto.customer_email.unwrap(),
            customer_phone: dto.customer_phone.unwrap(),
            price: dto.price,
            status: dto
                .status
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| status::PENDING.to_string()),
            assigned_worker: None,
            created_at: now,
        })
    }

    /// Applies a status change. A worker accepting the booking is assigned
    /// as part of the same update.
    pub fn apply_status_update(
        &mut self,
        new_status: &str,
        worker_email: Option<&str>,
    ) -> Result<(), String> {
        if new_status.trim().is_empty() {
            return Err("Status is required".to_string());
        }

        if new_status == status::ACCEPTED {
            if let Some(worker) = worker_email {
                self.assigned_worker = Some(worker.to_string());
            }
        }

        self.status = new_status.to_string();
        Ok(())
    }

    /// Assigns a worker and forces acceptance. There is no guard on the
    /// current status: a completed or cancelled booking can be re-assigned.
    pub fn assign_worker(&mut self, worker_email: &str) -> Result<(), String> {
        if worker_email.trim().is_empty() {
            return Err("Worker email is required".to_string());
        }

        self.assigned_worker = Some(worker_email.to_string());
        self.status = status::ACCEPTED.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto() -> CreateBookingDto {
        CreateBookingDto {
            service_type: Some("Plumbing Repair".to_string()),
            customer_name: Some("Asha Rao".to_string()),
            customer_email: Some("asha@example.com".to_string()),
            customer_phone: Some("9876543210".to_string()),
            price: Some(699.0),
            status: None,
        }
    }

    fn booking() -> Booking {
        Booking::create(create_dto(), DateTime::now()).unwrap()
    }

    #[test]
    fn new_bookings_are_pending_and_unassigned() {
        let booking = booking();
        assert_eq!(booking.status, status::PENDING);
        assert!(booking.assigned_worker.is_none());
    }

    #[test]
    fn every_customer_field_is_required() {
        let strips: [fn(&mut CreateBookingDto); 4] = [
            |d| d.service_type = None,
            |d| d.customer_name = Some("   ".to_string()),
            |d| d.customer_email = None,
            |d| d.customer_phone = Some(String::new()),
        ];
        for strip in strips {
            let mut dto = create_dto();
            strip(&mut dto);
            assert_eq!(
                Booking::create(dto, DateTime::now()).unwrap_err(),
                "All fields are required"
            );
        }
    }

    #[test]
    fn price_is_optional() {
        let mut dto = create_dto();
        dto.price = None;
        assert!(Booking::create(dto, DateTime::now()).unwrap().price.is_none());
    }

    #[test]
    fn caller_supplied_status_is_honored() {
        let mut dto = create_dto();
        dto.status = Some(status::ACCEPTED.to_string());
        assert_eq!(Booking::create(dto, DateTime::now()).unwrap().status, status::ACCEPTED);
    }

    #[test]
    fn accepting_with_a_worker_assigns_in_the_same_update() {
        let mut booking = booking();
        booking
            .apply_status_update(status::ACCEPTED, Some("worker@servicenest.com"))
            .unwrap();

        assert_eq!(booking.status, status::ACCEPTED);
        assert_eq!(booking.assigned_worker.as_deref(), Some("worker@servicenest.com"));
    }

    #[test]
    fn non_accept_updates_leave_assignment_alone() {
        let mut booking = booking();
        booking
            .apply_status_update(status::ACCEPTED, Some("worker@servicenest.com"))
            .unwrap();
        booking
            .apply_status_update(status::COMPLETED, Some("other@servicenest.com"))
            .unwrap();

        assert_eq!(booking.status, status::COMPLETED);
        assert_eq!(booking.assigned_worker.as_deref(), Some("worker@servicenest.com"));
    }

    #[test]
    fn cancellation_is_reachable_from_any_active_state() {
        let mut booking = booking();
        booking
            .apply_status_update(status::ACCEPTED, Some("worker@servicenest.com"))
            .unwrap();
        booking.apply_status_update(status::IN_PROGRESS, None).unwrap();
        assert_eq!(booking.status, status::IN_PROGRESS);

        booking.apply_status_update(status::CANCELLED, None).unwrap();
        assert_eq!(booking.status, status::CANCELLED);
        assert_eq!(booking.assigned_worker.as_deref(), Some("worker@servicenest.com"));
    }

    #[test]
    fn blank_status_is_rejected() {
        let mut booking = booking();
        assert_eq!(
            booking.apply_status_update("  ", None).unwrap_err(),
            "Status is required"
        );
        assert_eq!(booking.status, status::PENDING);
    }

    #[test]
    fn assign_worker_forces_acceptance() {
        let mut booking = booking();
        booking.assign_worker("worker@servicenest.com").unwrap();

        assert_eq!(booking.status, status::ACCEPTED);
        assert_eq!(booking.assigned_worker.as_deref(), Some("worker@servicenest.com"));
    }

    // Documents the unguarded behavior: assignment is allowed from any
    // state, including terminal ones.
    #[test]
    fn assign_worker_reassigns_even_terminal_bookings() {
        let mut booking = booking();
        booking.apply_status_update(status::COMPLETED, None).unwrap();
        booking.assign_worker("late@servicenest.com").unwrap();

        assert_eq!(booking.status, status::ACCEPTED);
        assert_eq!(booking.assigned_worker.as_deref(), Some("late@servicenest.com"));
    }

    #[test]
    fn blank_worker_email_is_rejected() {
        let mut booking = booking();
        assert_eq!(
            booking.assign_worker(" ").unwrap_err(),
            "Worker email is required"
        );
        assert!(booking.assigned_worker.is_none());
    }
}
