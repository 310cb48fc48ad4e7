//! # Domain Models
//!
//! Pure Closetr types shared by the features and the apps, with `serde` as the only dependency.
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.

pub mod account;
pub mod config;
pub mod route;
