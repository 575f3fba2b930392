use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A customer's rating of a specific worker, tied to the booking it came
/// from. Stored for the future worker-reputation surface; no endpoint
/// reads it yet.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRating {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub worker_email: String,
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub rating: i32,
    pub comment: Option<String>,
    pub booking_id: Option<String>,
    pub created_at: DateTime,
}
