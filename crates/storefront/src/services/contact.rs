//! Contact form handling.
//!
//! Messages are validated and logged; nothing is stored or sent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use delicious_bites_core::Email;

/// A contact field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("please fill in all required fields")]
pub struct ContactError {
    pub fields: Vec<ContactField>,
}

/// A message from the contact page. Subject is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A contact message that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: Email,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// # Errors
    ///
    /// Returns `ContactError` listing every missing or malformed field.
    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        let mut fields = Vec::new();
        if self.name.trim().is_empty() {
            fields.push(ContactField::Name);
        }
        let email = Email::parse(&self.email).ok();
        if email.is_none() {
            fields.push(ContactField::Email);
        }
        if self.message.trim().is_empty() {
            fields.push(ContactField::Message);
        }

        match email {
            Some(email) if fields.is_empty() => Ok(ContactMessage {
                name: self.name.trim().to_owned(),
                email,
                subject: Some(self.subject.trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned),
                message: self.message.trim().to_owned(),
            }),
            _ => Err(ContactError { fields }),
        }
    }
}

/// Validate and log a contact submission.
///
/// # Errors
///
/// Returns `ContactError` if required fields are missing.
pub fn submit(form: &ContactForm) -> Result<ContactMessage, ContactError> {
    let message = form.validate()?;
    tracing::info!(
        email_domain = message.email.domain(),
        subject = message.subject.as_deref().unwrap_or("(none)"),
        length = message.message.len(),
        "Contact message received"
    );
    Ok(message)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_message() {
        let form = ContactForm {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            subject: "  ".to_owned(),
            message: "Do you cater?".to_owned(),
        };
        let message = submit(&form).unwrap();
        assert!(message.subject.is_none());
        assert_eq!(message.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_missing_fields_are_collected() {
        let err = ContactForm::default().validate().unwrap_err();
        assert_eq!(
            err.fields,
            vec![ContactField::Name, ContactField::Email, ContactField::Message]
        );
    }
}
