// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request validation module.

use blog_common::{
    non_empty, CreateArticleRequest, CreateCommentRequest, LoginRequest, RegisterRequest,
    UpdateArticleRequest, UpdateUserRequest,
};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::auth::MIN_PASSWORD_LENGTH;
use crate::error::AppError;

// Column limits of the relational schema
const MAX_USERNAME_LENGTH: usize = 50;
const MAX_EMAIL_LENGTH: usize = 100;
const MAX_AVATAR_LENGTH: usize = 255;
pub const MAX_TITLE_LENGTH: usize = 200;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern compiles")
});

/// Possible validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("email must be a valid email address")]
    InvalidEmail,
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> ValidationResult<&'a str> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value)
}

fn at_most<'a>(field: &'static str, value: &'a str, max: usize) -> ValidationResult<&'a str> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value)
}

/// Validate a username
pub fn validate_username(username: &str) -> ValidationResult<&str> {
    required("username", username)?;
    at_most("username", username, MAX_USERNAME_LENGTH)
}

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    required("email", email)?;
    at_most("email", email, MAX_EMAIL_LENGTH)?;
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}

/// Validate a new password
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    if password.is_empty() {
        return Err(ValidationError::Required("password"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password",
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(password)
}

/// Validate an avatar URL
pub fn validate_avatar(avatar: &str) -> ValidationResult<&str> {
    at_most("avatar", avatar, MAX_AVATAR_LENGTH)
}

/// Validate an article title
pub fn validate_title(title: &str) -> ValidationResult<&str> {
    required("title", title)?;
    at_most("title", title, MAX_TITLE_LENGTH)
}

/// Validate article or comment content
pub fn validate_content(content: &str) -> ValidationResult<&str> {
    required("content", content)
}

pub fn validate_register(req: &RegisterRequest) -> ValidationResult<()> {
    validate_username(&req.username)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    Ok(())
}

pub fn validate_login(req: &LoginRequest) -> ValidationResult<()> {
    validate_email(&req.email)?;
    if req.password.is_empty() {
        return Err(ValidationError::Required("password"));
    }
    Ok(())
}

/// Only supplied, non-empty fields are checked
pub fn validate_user_update(req: &UpdateUserRequest) -> ValidationResult<()> {
    if let Some(username) = non_empty(&req.username) {
        validate_username(username)?;
    }
    if let Some(avatar) = non_empty(&req.avatar) {
        validate_avatar(avatar)?;
    }
    Ok(())
}

pub fn validate_new_article(req: &CreateArticleRequest) -> ValidationResult<()> {
    validate_title(&req.title)?;
    validate_content(&req.content)?;
    Ok(())
}

/// Only supplied, non-empty fields are checked
pub fn validate_article_update(req: &UpdateArticleRequest) -> ValidationResult<()> {
    if let Some(title) = non_empty(&req.title) {
        validate_title(title)?;
    }
    if let Some(content) = non_empty(&req.content) {
        validate_content(content)?;
    }
    Ok(())
}

pub fn validate_new_comment(req: &CreateCommentRequest) -> ValidationResult<()> {
    validate_content(&req.content)?;
    Ok(())
}
