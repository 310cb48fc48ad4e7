use closetr_derive::closetr_error;
use std::borrow::Cow;

#[closetr_error]
pub enum ShelfError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Shelf is full{}: {message}", format_context(.context))]
    Full { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal shelf error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse_slot(raw: &str) -> Result<u32, ShelfError> {
    let slot = raw.parse::<u32>().context("Reading slot number")?;
    Ok(slot)
}

#[test]
fn closetr_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/closetr_error_pass.rs");
}

#[test]
fn source_context_is_rendered() {
    let err = parse_slot("seven").unwrap_err();
    assert!(matches!(err, ShelfError::Parse { context: Some(_), .. }));
    assert!(err.to_string().starts_with("Parse error (Reading slot number): "));
}

#[test]
fn context_on_own_error_replaces_previous_value() {
    let res: Result<(), ShelfError> =
        Err(ShelfError::Full { message: "no room".into(), context: Some("first".into()) });

    let err = res.context("second").unwrap_err();
    assert_eq!(err.to_string(), "Shelf is full (second): no room");
}

#[test]
fn strings_convert_into_internal() {
    let from_static: ShelfError = "static failure".into();
    let from_owned: ShelfError = format!("owned {}", 1).into();

    assert_eq!(from_static.to_string(), "Internal shelf error: static failure");
    assert!(matches!(from_owned, ShelfError::Internal { ref message, context: None } if message == "owned 1"));
}

#[test]
fn from_source_has_no_context() {
    let source = "x".parse::<u32>().unwrap_err();
    let err = ShelfError::from(source);
    assert!(matches!(err, ShelfError::Parse { context: None, .. }));
}
