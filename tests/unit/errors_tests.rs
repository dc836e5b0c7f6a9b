/*!
 * Tests for error types
 */

use cinefluent::errors::{AppError, CollaboratorError, SubtitleError, ValidationError};

/// Test error messages
#[test]
fn test_errorDisplay_shouldIncludeDetails() {
    assert_eq!(
        SubtitleError::InvalidTimestamp("99:00".to_string()).to_string(),
        "Invalid timestamp format: 99:00"
    );
    assert_eq!(
        ValidationError::UnsupportedFormat { extension: "vtt".to_string() }.to_string(),
        "Unsupported subtitle format: vtt"
    );
    assert!(CollaboratorError::Unavailable("timeout".to_string()).to_string().contains("timeout"));
}

/// Test conversions into the application error
#[test]
fn test_appError_fromComponentErrors_shouldWrap() {
    let app: AppError = SubtitleError::NoBlocks.into();
    assert!(matches!(app, AppError::Subtitle(SubtitleError::NoBlocks)));

    let app: AppError = ValidationError::InvalidConfig("bad".to_string()).into();
    assert!(app.to_string().starts_with("Validation error"));

    let app: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(app, AppError::File(_)));

    let app: AppError = anyhow::anyhow!("something else").into();
    assert!(matches!(app, AppError::Unknown(ref msg) if msg == "something else"));
}

/// Test validation errors survive anyhow round trips
#[test]
fn test_validationError_throughAnyhow_shouldDowncast() {
    let err: anyhow::Error = ValidationError::UnsupportedFormat { extension: "txt".to_string() }.into();
    let inner = err.downcast_ref::<ValidationError>();
    assert!(matches!(inner, Some(ValidationError::UnsupportedFormat { extension }) if extension == "txt"));
}
