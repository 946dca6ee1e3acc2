//! Contact and print inquiry route handlers.
//!
//! Both forms are relayed to their own spreadsheet web app. Unlike orders,
//! a relay failure here is reported to the visitor so they can retry.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use crate::catalog::CatalogKind;
use crate::error::{AppError, Result};
use crate::models::{ContactForm, ContactSubmission, InquiryForm, InquirySubmission};
use crate::state::AppState;

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/contact
#[instrument(skip(state, form))]
pub async fn contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<SubmissionResponse>> {
    let submission = ContactSubmission::new(&form, Utc::now())?;
    state.contact_webhook().submit(&submission).await?;

    tracing::info!(has_subject = submission.subject.is_some(), "Contact message relayed");
    Ok(Json(SubmissionResponse {
        success: true,
        message: "Thank you for your message. I'll get back to you soon.",
    }))
}

/// POST /api/limited-edition/inquiry
///
/// The print must exist in the limited edition catalog as loaded now; its
/// title is taken from the catalog, not the form.
#[instrument(skip(state, form), fields(product_id = %form.product_id))]
pub async fn inquiry(
    State(state): State<AppState>,
    Json(form): Json<InquiryForm>,
) -> Result<Json<SubmissionResponse>> {
    let snapshot = state.catalog(CatalogKind::LimitedEdition).load().await;
    let product = snapshot.find(&form.product_id).ok_or_else(|| {
        AppError::NotFound(format!("limited-edition product {}", form.product_id))
    })?;

    let submission = InquirySubmission::new(&form, product, Utc::now())?;
    state.inquiry_webhook().submit(&submission).await?;

    tracing::info!(
        product_id = %submission.product_id,
        newsletter = submission.newsletter,
        "Print inquiry relayed"
    );
    Ok(Json(SubmissionResponse {
        success: true,
        message: "Thank you for your inquiry. I'll be in touch about this print.",
    }))
}
