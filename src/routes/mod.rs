pub mod ai;
pub mod auth;
pub mod booking;
pub mod contact;
pub mod profile;
pub mod review;
pub mod worker;
