//! Registration Form Validation
//!
//! Client-side constraints checked before a registration request is sent.
//! Each field reports at most one message: the first rule it fails.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::models::RegisterRequest;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 64;

/// Registration form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    MiddleName,
    LastName,
    Username,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::FirstName,
        Field::MiddleName,
        Field::LastName,
        Field::Username,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// Wire / element id name
    pub fn name(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::MiddleName => "middleName",
            Field::LastName => "lastName",
            Field::Username => "username",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::MiddleName => "Middle name",
            Field::LastName => "Last name",
            Field::Username => "Username",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<Field, String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.errors.insert(field, message.to_string());
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field.label(), msg))
            .collect();
        f.write_str(&lines.join("\n"))
    }
}

/// Raw registration form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Current value of a field
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::MiddleName => &self.middle_name,
            Field::LastName => &self.last_name,
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Replace the value of a field
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::FirstName => self.first_name = value,
            Field::MiddleName => self.middle_name = value,
            Field::LastName => self.last_name = value,
            Field::Username => self.username = value,
            Field::Password => self.password = value,
            Field::ConfirmPassword => self.confirm_password = value,
        }
    }

    /// First failing rule for a single field
    pub fn check(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::FirstName => required_name(&self.first_name, "First name is required"),
            Field::MiddleName => None,
            Field::LastName => required_name(&self.last_name, "Last name is required"),
            Field::Username => check_username(&self.username),
            Field::Password => check_password(&self.password),
            Field::ConfirmPassword => check_confirmation(&self.password, &self.confirm_password),
        }
    }

    /// Validate every field and build the request body.
    pub fn validate(&self) -> Result<RegisterRequest, FormErrors> {
        let mut errors = FormErrors::default();
        for field in Field::ALL {
            if let Some(message) = self.check(field) {
                errors.insert(field, message);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let middle = self.middle_name.trim();
        Ok(RegisterRequest {
            first_name: self.first_name.clone(),
            middle_name: (!middle.is_empty()).then(|| self.middle_name.clone()),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

fn required_name(value: &str, message: &'static str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some(message)
    } else {
        None
    }
}

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_.]+$").expect("valid username pattern"))
}

fn password_classes() -> &'static [Regex; 3] {
    static CLASSES: OnceLock<[Regex; 3]> = OnceLock::new();
    CLASSES.get_or_init(|| {
        [
            Regex::new(r"[A-Z]").expect("valid uppercase pattern"),
            Regex::new(r"[a-z]").expect("valid lowercase pattern"),
            Regex::new(r"[0-9]").expect("valid digit pattern"),
        ]
    })
}

fn check_username(value: &str) -> Option<&'static str> {
    const LENGTH: &str = "Username must be between 3 and 20 characters long";

    if value.is_empty() {
        return Some("Username is required");
    }
    let len = value.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Some(LENGTH);
    }
    if !username_pattern().is_match(value) {
        return Some("Username can only contain letters, numbers, underscores, or periods");
    }
    if value.trim().is_empty() {
        return Some("Username is required");
    }
    None
}

fn check_password(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("Password is required");
    }
    let len = value.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Some("Password must be between 8 and 64 characters long");
    }
    if !password_classes().iter().all(|re| re.is_match(value)) {
        return Some(
            "Password must contain at least one uppercase letter, one lowercase letter, and one number",
        );
    }
    None
}

fn check_confirmation(password: &str, confirmation: &str) -> Option<&'static str> {
    if confirmation.is_empty() {
        return Some("Confirm password is required");
    }
    if confirmation != password {
        return Some("Passwords do not match");
    }
    None
}
