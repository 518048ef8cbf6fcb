//! Database models and DTOs for all domain entities.

pub mod activity;
pub mod label;
pub mod pagination;
pub mod project;
pub mod risk;
pub mod task;
pub mod user;
