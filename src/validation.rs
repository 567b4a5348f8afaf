//! Form Validation
//!
//! Client-side checks for the login form and the "new center" form. Each
//! field reports only its first failing rule, which is what the form shows
//! under the input.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::api::{Address, Level, LoginRequest, NewCenterInput};

/// Minimum password length accepted by the login form, in UTF-16 units
pub const MIN_PASSWORD_LEN: usize = 8;

/// A single failed rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    TooShort { min: usize },
    UnknownOption,
}

/// Failed rules keyed by field name, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<(&'static str, FieldError)>,
}

impl FormErrors {
    fn push(&mut self, field: &'static str, error: FieldError) {
        self.errors.push((field, error));
    }

    pub fn get(&self, field: &str) -> Option<FieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, e)| *e)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldError)> + '_ {
        self.errors.iter().copied()
    }

    /// Full message for a field, as the schema words it
    pub fn message(&self, field: &str) -> Option<String> {
        let error = self.get(field)?;
        Some(match (field, error) {
            ("email", FieldError::Required) => "Email is required.".to_string(),
            ("email", FieldError::InvalidEmail) => "Invalid email format.".to_string(),
            ("password", FieldError::Required) => "Password is required.".to_string(),
            ("password", FieldError::TooShort { min }) => {
                format!("Password must be longer than {} characters.", min)
            }
            (field, FieldError::Required) => format!("{} is required.", field_label(field)),
            (field, FieldError::UnknownOption) => format!("Unknown {}.", field_label(field)),
            (field, e) => format!("{}: {}", field_label(field), e),
        })
    }

    fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => f.write_str("required"),
            FieldError::InvalidEmail => f.write_str("invalid email format"),
            FieldError::TooShort { min } => write!(f, "must be at least {} characters", min),
            FieldError::UnknownOption => f.write_str("unknown option"),
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .filter_map(|(field, _)| self.message(field))
            .collect();
        f.write_str(&parts.join(" "))
    }
}

impl std::error::Error for FormErrors {}

fn field_label(field: &str) -> &str {
    match field {
        "center_id" => "Center ID",
        "city" => "City",
        "country" => "Country",
        "level" => "Level",
        other => other,
    }
}

// ============================================
// Login
// ============================================

/// Raw login form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<LoginRequest, FormErrors> {
        let mut errors = FormErrors::default();

        if self.email.is_empty() {
            errors.push("email", FieldError::Required);
        } else if !is_valid_email(&self.email) {
            errors.push("email", FieldError::InvalidEmail);
        }

        if self.password.is_empty() {
            errors.push("password", FieldError::Required);
        } else if self.password.encode_utf16().count() < MIN_PASSWORD_LEN {
            errors.push(
                "password",
                FieldError::TooShort {
                    min: MIN_PASSWORD_LEN,
                },
            );
        }

        errors.into_result(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// Short helper text shown under the login inputs
pub fn login_helper_text(errors: &FormErrors, field: &str) -> Option<&'static str> {
    match (field, errors.get(field)?) {
        ("email", _) => Some("Email is required"),
        ("password", FieldError::Required) => Some("Password is required"),
        ("password", _) => Some("Password must be at least 8 characters"),
        _ => None,
    }
}

const EMAIL_PATTERN: &str =
    r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$";

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| match Regex::new(EMAIL_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(error = %e, "email pattern failed to compile");
                None
            }
        })
        .as_ref()
}

/// Email check matching what the login schema accepts
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.')
        && !email.contains("..")
        && email_regex().is_some_and(|re| re.is_match(email))
}

// ============================================
// New center
// ============================================

/// Raw "NEW CENTER" form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCenterForm {
    pub center_id: String,
    pub city: String,
    pub country: String,
    pub referer_center_id: String,
    pub level: String,
}

impl NewCenterForm {
    pub fn validate(&self) -> Result<NewCenterInput, FormErrors> {
        let mut errors = FormErrors::default();

        let center_id = self.center_id.trim();
        let city = self.city.trim();
        let country = self.country.trim();

        if center_id.is_empty() {
            errors.push("center_id", FieldError::Required);
        }
        if city.is_empty() {
            errors.push("city", FieldError::Required);
        }
        if country.is_empty() {
            errors.push("country", FieldError::Required);
        }

        let level = if self.level.trim().is_empty() {
            errors.push("level", FieldError::Required);
            None
        } else {
            match self.level.parse::<Level>() {
                Ok(level) => Some(level),
                Err(_) => {
                    errors.push("level", FieldError::UnknownOption);
                    None
                }
            }
        };

        let referer = self.referer_center_id.trim();

        match level {
            Some(level) if errors.is_empty() => Ok(NewCenterInput {
                center_id: center_id.to_string(),
                address: Address {
                    city: city.to_string(),
                    country: country.to_string(),
                },
                referer_center_id: (!referer.is_empty()).then(|| referer.to_string()),
                level,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_login() {
        let req = LoginForm::new("amy@center.eu", "secret-pass")
            .validate()
            .unwrap();
        assert_eq!(req.email, "amy@center.eu");
    }

    #[test]
    fn test_empty_login_reports_required_only() {
        let errors = LoginForm::default().validate().unwrap_err();

        assert_eq!(errors.get("email"), Some(FieldError::Required));
        assert_eq!(errors.get("password"), Some(FieldError::Required));
        assert_eq!(errors.message("email").unwrap(), "Email is required.");
        assert_eq!(errors.message("password").unwrap(), "Password is required.");
    }

    #[test]
    fn test_bad_email_and_short_password() {
        let errors = LoginForm::new("not-an-email", "short").validate().unwrap_err();

        assert_eq!(errors.get("email"), Some(FieldError::InvalidEmail));
        assert_eq!(errors.get("password"), Some(FieldError::TooShort { min: 8 }));
        assert_eq!(
            errors.message("password").unwrap(),
            "Password must be longer than 8 characters."
        );
    }

    #[test]
    fn test_password_of_exactly_eight_passes() {
        assert!(LoginForm::new("a@b.co", "12345678").validate().is_ok());
    }

    #[test]
    fn test_password_length_counts_utf16_units() {
        // Each emoji is a surrogate pair
        assert!(LoginForm::new("a@b.co", "😀😀😀😀").validate().is_ok());
        assert_eq!(
            LoginForm::new("a@b.co", "😀😀😀").validate().unwrap_err().get("password"),
            Some(FieldError::TooShort { min: 8 })
        );
        assert!(LoginForm::new("a@b.co", "ééééééé").validate().is_err());
    }

    #[test]
    fn test_email_pattern_compiles() {
        assert!(email_regex().is_some());
    }

    #[test]
    fn test_helper_text() {
        let errors = LoginForm::new("bad", "").validate().unwrap_err();
        assert_eq!(login_helper_text(&errors, "email"), Some("Email is required"));
        assert_eq!(login_helper_text(&errors, "password"), Some("Password is required"));

        let errors = LoginForm::new("a@b.co", "abc").validate().unwrap_err();
        assert_eq!(login_helper_text(&errors, "email"), None);
        assert_eq!(
            login_helper_text(&errors, "password"),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(is_valid_email("O'Neil@Example.COM"));
        assert!(!is_valid_email(".lead@example.com"));
        assert!(!is_valid_email("double..dot@example.com"));
        assert!(!is_valid_email("trailing.@example.com"));
        assert!(!is_valid_email("no-tld@example"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_new_center_form() {
        let form = NewCenterForm {
            center_id: " C-100 ".to_string(),
            city: "Lisbon".to_string(),
            country: "Portugal".to_string(),
            referer_center_id: String::new(),
            level: "silver".to_string(),
        };

        let input = form.validate().unwrap();
        assert_eq!(input.center_id, "C-100");
        assert_eq!(input.referer_center_id, None);
        assert_eq!(input.level, Level::Silver);
    }

    #[test]
    fn test_new_center_form_errors() {
        let form = NewCenterForm {
            level: "diamond".to_string(),
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("center_id"), Some(FieldError::Required));
        assert_eq!(errors.get("level"), Some(FieldError::UnknownOption));
        assert_eq!(errors.message("city").unwrap(), "City is required.");
        assert_eq!(errors.iter().count(), 4);
    }
}
