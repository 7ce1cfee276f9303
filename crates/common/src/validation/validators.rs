// Reusable single-value validators
use once_cell::sync::Lazy;
use regex::Regex;

/// Check one value, returning a user-facing message on failure
pub trait FieldValidator<T: ?Sized> {
    fn validate(&self, value: &T) -> Result<(), String>;
}

#[allow(clippy::expect_used)]
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX pattern is valid")
});

/// Loose `local@domain.tld` shape check
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    pub fn new() -> Self {
        Self::with_message("Invalid email format")
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldValidator<str> for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if EMAIL_REGEX.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

/// Minimum length in characters (not bytes)
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min: usize,
    message: String,
}

impl MinLengthValidator {
    pub fn new(min: usize) -> Self {
        Self { min, message: format!("Must be at least {min} characters") }
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl FieldValidator<str> for MinLengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() >= self.min {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}
