//! Facade crate for Closetr features and shared modules.
//! Re-exports domain/kernel primitives and the feature slices.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `closetr` with the slices you need (`register` is on by default).

pub use closetr_domain as domain;
pub use closetr_kernel as kernel;

/// Feature registry for runtime introspection.
pub mod features {
    #[cfg(feature = "register")]
    pub use closetr_register as register;

    /// Build-time enabled slices (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "register")]
        "register",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}
