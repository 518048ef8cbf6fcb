//! Business logic services.

pub mod auth;
pub mod dashboard;
pub mod histogram;
pub mod project;
pub mod risk;
pub mod store;
pub mod task;
pub mod task_status;
pub mod user;
