//! Contact form handler.

use axum::{Json, http::StatusCode};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::services::contact::{self, ContactForm};

/// Acknowledgement shown after a contact submission.
#[derive(Debug, Serialize)]
pub struct ContactReceipt {
    pub message: &'static str,
}

/// Accept a contact message.
#[instrument(skip(form))]
pub async fn submit(Json(form): Json<ContactForm>) -> Result<(StatusCode, Json<ContactReceipt>)> {
    contact::submit(&form)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ContactReceipt {
            message: "Thank you for your message! We'll get back to you soon.",
        }),
    ))
}
