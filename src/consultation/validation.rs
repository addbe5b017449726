//! Field-level validation for consultation submissions.
//!
//! All checks run independently and every violation is collected, so the
//! caller can present the complete error list in one round trip. Validation
//! is pure: no I/O and no persistence happens here.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use super::models::{ConsultationSubmission, UploadedLogo};

/// Canonical message for a phone number that is not 10 digits, optionally
/// prefixed with +91.
pub const PHONE_MESSAGE: &str =
    "Enter a valid Indian phone number with 10 digits or include country code +91.";

/// Maximum length for name fields.
pub const NAME_MAX_LEN: usize = 200;
/// Maximum length for free-text note fields.
pub const NOTE_MAX_LEN: usize = 5000;

const DOB_FORMAT: &str = "%Y-%m-%d";

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^\+91\d{10}$|^\d{10}$").unwrap();
}

/// A single field violation.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The form field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} is required.", label))
    }

    /// Create error for a value exceeding its maximum length
    pub fn too_long(field: &str, label: &str, max: usize) -> Self {
        Self::new(
            field,
            format!("{} must be at most {} characters.", label, max),
        )
    }

    /// Create error for an invalid phone number
    pub fn invalid_phone(field: &str) -> Self {
        Self::new(field, PHONE_MESSAGE)
    }

    /// Create error for an unparseable date
    pub fn invalid_date(field: &str, value: &str) -> Self {
        Self::new(
            field,
            format!("'{}' is not a valid date. Use the format YYYY-MM-DD.", value),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors, keyed by field on output.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Group messages by field, the shape returned in the HTTP error body.
    pub fn into_field_map(self) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for error in self.errors {
            map.entry(error.field).or_default().push(error.message);
        }
        map
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

/// A submission that passed every field rule. Fields are trimmed and typed;
/// the logo upload is guaranteed present.
#[derive(Debug)]
pub struct ValidatedConsultation {
    pub clinic_name: String,
    pub physician_name: String,
    pub physician_contact: String,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub patient_dob: NaiveDate,
    pub patient_contact: String,
    pub chief_complaint: String,
    pub consultation_note: String,
    pub clinic_logo: UploadedLogo,
}

/// Validate a required text field against its maximum length. Exactly `max`
/// characters is accepted.
pub fn validate_text(
    value: &str,
    field: &str,
    label: &str,
    max: usize,
    errors: &mut ValidationErrors,
) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
        return;
    }
    if value.chars().count() > max {
        errors.add(ValidationError::too_long(field, label, max));
    }
}

/// Validate a phone number: `+91` followed by 10 digits, or a bare 10-digit
/// number.
pub fn validate_phone(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, label));
        return;
    }
    if !PHONE_RE.is_match(trimmed) {
        errors.add(ValidationError::invalid_phone(field));
    }
}

/// Validate that an uploaded file looks like an image, by extension.
/// Content-level corruption is caught later, when the renderer decodes it.
pub fn validate_image_filename(filename: &str, field: &str, errors: &mut ValidationErrors) {
    let is_image = mime_guess::from_path(filename)
        .first()
        .map(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .unwrap_or(false);
    if !is_image {
        errors.add(ValidationError::new(
            field,
            "Upload a valid image file for the clinic logo.",
        ));
    }
}

/// Parse a required `YYYY-MM-DD` date field.
pub fn validate_date(
    value: &str,
    field: &str,
    label: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, label));
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, DOB_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(ValidationError::invalid_date(field, trimmed));
            None
        }
    }
}

/// Check a raw submission against every field rule.
///
/// Returns the typed record on success, or the full set of violations. Never
/// fails fast: a submission with three bad fields reports all three.
pub fn validate_submission(
    submission: ConsultationSubmission,
) -> Result<ValidatedConsultation, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    validate_text(
        &submission.clinic_name,
        "clinic_name",
        "Clinic name",
        NAME_MAX_LEN,
        &mut errors,
    );
    validate_text(
        &submission.physician_name,
        "physician_name",
        "Physician name",
        NAME_MAX_LEN,
        &mut errors,
    );
    validate_phone(
        &submission.physician_contact,
        "physician_contact",
        "Physician contact",
        &mut errors,
    );
    validate_text(
        &submission.patient_first_name,
        "patient_first_name",
        "Patient first name",
        NAME_MAX_LEN,
        &mut errors,
    );
    validate_text(
        &submission.patient_last_name,
        "patient_last_name",
        "Patient last name",
        NAME_MAX_LEN,
        &mut errors,
    );
    let patient_dob = validate_date(
        &submission.patient_dob,
        "patient_dob",
        "Date of birth",
        &mut errors,
    );
    validate_phone(
        &submission.patient_contact,
        "patient_contact",
        "Patient contact",
        &mut errors,
    );
    validate_text(
        &submission.chief_complaint,
        "chief_complaint",
        "Chief complaint",
        NOTE_MAX_LEN,
        &mut errors,
    );
    validate_text(
        &submission.consultation_note,
        "consultation_note",
        "Consultation note",
        NOTE_MAX_LEN,
        &mut errors,
    );

    match &submission.clinic_logo {
        None => errors.add(ValidationError::empty_field("clinic_logo", "Clinic logo")),
        Some(logo) => validate_image_filename(&logo.filename, "clinic_logo", &mut errors),
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedConsultation {
        clinic_name: submission.clinic_name.trim().to_string(),
        physician_name: submission.physician_name.trim().to_string(),
        physician_contact: submission.physician_contact.trim().to_string(),
        patient_first_name: submission.patient_first_name.trim().to_string(),
        patient_last_name: submission.patient_last_name.trim().to_string(),
        patient_dob: patient_dob.expect("dob parsed when no errors were recorded"),
        patient_contact: submission.patient_contact.trim().to_string(),
        chief_complaint: submission.chief_complaint.trim().to_string(),
        consultation_note: submission.consultation_note.trim().to_string(),
        clinic_logo: submission
            .clinic_logo
            .expect("logo present when no errors were recorded"),
    })
}
