#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate in the workspace.
//!
//! The only macro today is [`closetr_error`], which turns a plain enum into a
//! `thiserror` error type with optional human-readable context attached to
//! each variant.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for workspace error enums.
///
/// Every variant must use named fields. A variant may carry:
/// * `context: Option<Cow<'static, str>>` - filled in by the generated `.context(..)` helper.
/// * `source` (or a field marked `#[source]` / `#[from]`) - the wrapped error. A variant with a
///   source must also declare `context`.
/// * `message: Cow<'static, str>` on the `Internal` variant - enables `From<&'static str>` and
///   `From<String>`.
///
/// The macro adds `#[derive(Debug, thiserror::Error)]` (unless already present), generates a
/// `<Name>Ext<T>` trait implemented for `Result<T, Name>` and for `Result<T, Source>` of each
/// wrapped source type, plus a private `format_context` helper for the `#[error(..)]` strings.
///
/// # Example
/// ```rust,ignore
/// use closetr_derive::closetr_error;
/// use std::borrow::Cow;
///
/// #[closetr_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io {
///         #[source]
///         source: std::io::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(path: &str) -> Result<String, StoreError> {
///     let raw = std::fs::read_to_string(path).context("Reading wardrobe snapshot")?;
///     raw.lines().next().map(str::to_owned).ok_or_else(|| "Empty snapshot".into())
/// }
/// ```
#[proc_macro_attribute]
pub fn closetr_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
