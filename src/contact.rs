//! Contact form validation and simulated submission
//!
//! There is no backend: a valid submission is logged and acknowledged after
//! a short delay.

use std::{sync::LazyLock, time::Duration};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

static EMAIL: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const INVALID_FORM: &str = "Пожалуйста, исправьте ошибки в форме";
pub const SENDING: &str = "Отправка сообщения...";
pub const SENT: &str = "✓ Сообщение отправлено! Мяу, спасибо за обращение!";

/// Lengths are counted in characters.
fn length(value: &str) -> usize {
    value.chars().count()
}

pub fn validate_name(value: &str) -> Option<&'static str> {
    let value = value.trim();
    match length(value) {
        0 => Some("Имя обязательно для заполнения"),
        1 => Some("Имя должно содержать минимум 2 символа"),
        51.. => Some("Имя слишком длинное (макс. 50 символов)"),
        _ => None,
    }
}

pub fn validate_email(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        Some("Email обязателен для заполнения")
    } else if !EMAIL.is_match(value) {
        Some("Введите корректный email адрес")
    } else if length(value) > 100 {
        Some("Email слишком длинный")
    } else {
        None
    }
}

pub fn validate_notes(value: &str) -> Option<&'static str> {
    let value = value.trim();
    match length(value) {
        0 => Some("Сообщение обязательно для заполнения"),
        1..10 => Some("Сообщение должно содержать минимум 10 символов"),
        1001.. => Some("Сообщение слишком длинное (макс. 1000 символов)"),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub notes: String,
}

/// Per-field messages of a rejected form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub notes: Option<&'static str>,
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(INVALID_FORM)?;
        for (field, message) in [
            ("name", self.name),
            ("email", self.email),
            ("notes", self.notes),
        ] {
            if let Some(message) = message {
                write!(f, "\n  {field}: {message}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub submission: Submission,
    pub message: &'static str,
}

impl ContactForm {
    /// Checks every field and returns the trimmed submission.
    pub fn validate(&self) -> Result<Submission, FieldErrors> {
        let errors = FieldErrors {
            name: validate_name(&self.name),
            email: validate_email(&self.email),
            notes: validate_notes(&self.notes),
        };
        if errors != FieldErrors::default() {
            return Err(errors);
        }
        Ok(Submission {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            notes: self.notes.trim().to_owned(),
            timestamp: Utc::now(),
        })
    }
}

pub async fn submit(submission: Submission, delay: Duration) -> Receipt {
    info!(name = %submission.name, email = %submission.email, "sending message");
    tokio::time::sleep(delay).await;
    info!(
        name = %submission.name,
        email = %submission.email,
        notes = %submission.notes,
        timestamp = %submission.timestamp,
        "form submission"
    );
    Receipt {
        submission,
        message: SENT,
    }
}
