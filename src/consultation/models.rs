use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted consultation record. One row per form submission; rows are
/// written once and never updated.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Consultation {
    #[schema(example = "f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub id: Uuid,
    #[schema(example = "Acme Clinic")]
    pub clinic_name: String,
    /// Stored filename of the uploaded clinic logo, if any.
    #[schema(example = "3f6c1e2a-1b2c-4d5e-8f90-abcdefabcdef_logo.png")]
    pub clinic_logo: Option<String>,
    #[schema(example = "Dr. A")]
    pub physician_name: String,
    #[schema(example = "+919876543210")]
    pub physician_contact: String,
    #[schema(example = "Jane")]
    pub patient_first_name: String,
    #[schema(example = "Doe")]
    pub patient_last_name: String,
    #[schema(example = "1990-01-01")]
    pub patient_dob: NaiveDate,
    #[schema(example = "9876543210")]
    pub patient_contact: String,
    #[schema(example = "Fever")]
    pub chief_complaint: String,
    #[schema(example = "Prescribed rest")]
    pub consultation_note: String,
    pub created_at: DateTime<Utc>,
}

impl Consultation {
    /// Patient first and last name joined with a single space, as printed in
    /// the report table.
    pub fn patient_name(&self) -> String {
        format!("{} {}", self.patient_first_name, self.patient_last_name)
    }

    /// Download filename for the rendered report:
    /// `CR_{last_name}_{first_name}_{dob}.pdf`.
    pub fn report_filename(&self) -> String {
        format!(
            "CR_{}_{}_{}.pdf",
            self.patient_last_name, self.patient_first_name, self.patient_dob
        )
    }
}

/// Logo file captured from the multipart payload.
#[derive(Debug, Clone)]
pub struct UploadedLogo {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Raw form capture, exactly as submitted. Every text field keeps the string
/// the client sent so validation failures can echo the form back untouched.
#[derive(Debug, Default)]
pub struct ConsultationSubmission {
    pub clinic_name: String,
    pub physician_name: String,
    pub physician_contact: String,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub patient_dob: String,
    pub patient_contact: String,
    pub chief_complaint: String,
    pub consultation_note: String,
    pub clinic_logo: Option<UploadedLogo>,
}

impl ConsultationSubmission {
    /// Snapshot of the submitted text fields, echoed back alongside
    /// validation errors.
    pub fn submitted_values(&self) -> SubmittedForm {
        SubmittedForm {
            clinic_name: self.clinic_name.clone(),
            physician_name: self.physician_name.clone(),
            physician_contact: self.physician_contact.clone(),
            patient_first_name: self.patient_first_name.clone(),
            patient_last_name: self.patient_last_name.clone(),
            patient_dob: self.patient_dob.clone(),
            patient_contact: self.patient_contact.clone(),
            chief_complaint: self.chief_complaint.clone(),
            consultation_note: self.consultation_note.clone(),
        }
    }
}

/// Text fields of a rejected submission, returned with the error map so the
/// client can re-render the form pre-filled.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmittedForm {
    pub clinic_name: String,
    pub physician_name: String,
    pub physician_contact: String,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub patient_dob: String,
    pub patient_contact: String,
    pub chief_complaint: String,
    pub consultation_note: String,
}
