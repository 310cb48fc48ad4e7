//! Kernel utilities shared across slices and apps.
//! Keep this crate lightweight; today it re-exports the domain and owns layered config loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use closetr_kernel::config::load_config;
//! use closetr_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("closetr.toml")).unwrap_or_default();
//! ```

pub mod config;

pub use closetr_domain as domain;
