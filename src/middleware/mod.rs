//! Request extractors: session decoding and role checks.

pub mod auth;
pub mod rbac;
