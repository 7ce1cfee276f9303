//! Login and registration form checks
//!
//! Field names match the JSON form keys so the collected errors can be
//! returned to clients as-is.

use super::validators::{EmailValidator, FieldValidator, MinLengthValidator};
use super::{ValidationError, ValidationResult};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Check the login form fields.
pub fn validate_login(email: &str, password: &str, hotel_id: i64) -> ValidationResult<()> {
    let mut errors = ValidationError::new();
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    check_hotel(&mut errors, hotel_id);
    errors.into_result()
}

/// Check the registration form fields, including the password confirmation.
pub fn validate_registration(
    email: &str,
    password: &str,
    confirm_password: &str,
    hotel_id: i64,
) -> ValidationResult<()> {
    let mut errors = ValidationError::new();
    check_email(&mut errors, email);
    check_password(&mut errors, password);

    if confirm_password.is_empty() {
        errors.add_field_error("confirmPassword", "Confirmation du mot de passe requise");
    } else if password != confirm_password {
        errors.add_field_error("confirmPassword", "Les mots de passe ne correspondent pas");
    }

    check_hotel(&mut errors, hotel_id);
    errors.into_result()
}

fn check_email(errors: &mut ValidationError, email: &str) {
    if email.is_empty() {
        errors.add_field_error("email", "Email requis");
    } else if let Err(message) =
        EmailValidator::with_message("Format d'email invalide").validate(email)
    {
        errors.add_field_error("email", message);
    }
}

fn check_password(errors: &mut ValidationError, password: &str) {
    if password.is_empty() {
        errors.add_field_error("password", "Mot de passe requis");
        return;
    }

    let validator = MinLengthValidator::new(MIN_PASSWORD_LENGTH)
        .message("Le mot de passe doit contenir au moins 6 caractères");
    if let Err(message) = validator.validate(password) {
        errors.add_field_error("password", message);
    }
}

fn check_hotel(errors: &mut ValidationError, hotel_id: i64) {
    if hotel_id < 1 {
        errors.add_field_error("hotelId", "Hôtel requis");
    }
}
