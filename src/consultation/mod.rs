//! Consultation module - form capture, validation, and HTTP handlers.

pub mod handlers;
pub mod models;
pub mod multipart;
pub mod validation;

#[cfg(test)]
mod mod_tests;

pub use models::{Consultation, ConsultationSubmission, SubmittedForm, UploadedLogo};
pub use validation::{validate_submission, ValidatedConsultation, ValidationErrors};
