//! Core workflows for the admissions program management service: applicant
//! document intake and admin-side prerequisite management, both backed by
//! injected store interfaces.

pub mod config;
pub mod error;
pub mod notify;
pub mod telemetry;
pub mod workflows;
