//! Core library for the job board service.
//!
//! The crate owns the job catalog, the application lifecycle (submission,
//! review transitions, and the notification fan-out that follows a
//! submission), and the advisory stats mirror consumed by the admin stats
//! command. Storage and delivery are behind traits so the API service and the
//! tests can plug in their own adapters.

pub mod admin;
pub mod applications;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod stats;
pub mod storage;
pub mod telemetry;
