//! Form definitions for the sign-in and sign-up screens.
//!
//! Field names, validation schemas and input guards live here so the UI
//! only deals with drawing fields and routing keystrokes.

pub mod validation;

use crate::auth::{Credentials, Registration};

pub use validation::{is_valid_email, FormData, Rule, Schema, ValidationErrors};

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum length for e-mail input (RFC 5321 path limit).
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for name input.
const MAX_NAME_LENGTH: usize = 64;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

pub fn sign_in_schema() -> Schema {
    Schema::new()
        .field(
            FIELD_EMAIL,
            vec![
                Rule::Required("E-mail is required"),
                Rule::Email("Enter a valid e-mail"),
            ],
        )
        .field(FIELD_PASSWORD, vec![Rule::Required("Password is required")])
}

pub fn sign_up_schema() -> Schema {
    Schema::new()
        .field(FIELD_NAME, vec![Rule::Required("Name is required")])
        .field(
            FIELD_EMAIL,
            vec![
                Rule::Required("E-mail is required"),
                Rule::Email("Enter a valid e-mail"),
            ],
        )
        .field(
            FIELD_PASSWORD,
            vec![Rule::MinLength(MIN_PASSWORD_LENGTH, "At least 6 characters")],
        )
}

fn value<'a>(data: &'a FormData, field: &str) -> &'a str {
    data.get(field).map(String::as_str).unwrap_or("")
}

/// Build sign-in credentials from validated form data
pub fn credentials_from(data: &FormData) -> Credentials {
    Credentials::new(value(data, FIELD_EMAIL).trim(), value(data, FIELD_PASSWORD))
}

/// Build a registration from validated form data
pub fn registration_from(data: &FormData) -> Registration {
    Registration::new(
        value(data, FIELD_NAME).trim(),
        value(data, FIELD_EMAIL).trim(),
        value(data, FIELD_PASSWORD),
    )
}

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check whether a typed character should be accepted by `field`
pub fn can_add_char(field: &str, current_len: usize, c: char) -> bool {
    let max = match field {
        FIELD_EMAIL => MAX_EMAIL_LENGTH,
        FIELD_NAME => MAX_NAME_LENGTH,
        FIELD_PASSWORD => MAX_PASSWORD_LENGTH,
        _ => MAX_NAME_LENGTH,
    };
    current_len < max && is_valid_input_char(c)
}
