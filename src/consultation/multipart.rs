use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures::StreamExt;
use sanitize_filename::sanitize;

use crate::consultation::models::{ConsultationSubmission, UploadedLogo};
use crate::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum MultipartParseError {
    #[error("Multipart field error: {0}")]
    FieldError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid UTF-8 data: {0}")]
    Utf8Error(String),
}

impl From<MultipartParseError> for HttpResponse {
    fn from(error: MultipartParseError) -> Self {
        match error {
            MultipartParseError::FieldError(_) | MultipartParseError::Utf8Error(_) => {
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!("{}", error)))
            }
            _ => HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&format!("{}", error))),
        }
    }
}

pub struct MultipartParser;

impl MultipartParser {
    /// Read the consultation form out of a multipart payload.
    ///
    /// Text fields are matched by name; the `clinic_logo` file field is
    /// buffered in memory with its sanitized original filename. Unknown
    /// fields are skipped. No validation happens here; the raw strings go to
    /// the validator as submitted.
    pub async fn parse_consultation_multipart(
        mut multipart: Multipart,
    ) -> Result<ConsultationSubmission, MultipartParseError> {
        let mut submission = ConsultationSubmission::default();

        while let Some(item) = multipart.next().await {
            let mut field = item.map_err(|e| MultipartParseError::FieldError(e.to_string()))?;
            let content_disposition = field.content_disposition().ok_or_else(|| {
                MultipartParseError::FieldError("Content disposition not found".to_string())
            })?;
            let name = content_disposition
                .get_name()
                .ok_or_else(|| MultipartParseError::FieldError("Field name not found".to_string()))?
                .to_string();
            let maybe_filename = content_disposition.get_filename().map(|s| s.to_string());

            let mut buffer = Vec::new();
            while let Some(chunk) = field.next().await {
                let data_chunk = chunk.map_err(|e| MultipartParseError::IoError(e.to_string()))?;
                buffer.extend_from_slice(&data_chunk);
            }

            if name == "clinic_logo" {
                // An empty file part counts as no upload at all.
                if !buffer.is_empty() {
                    let original_filename = match maybe_filename {
                        Some(fname) => sanitize(&fname),
                        None => "logo.dat".to_string(),
                    };
                    submission.clinic_logo = Some(UploadedLogo {
                        filename: original_filename,
                        data: buffer,
                    });
                }
                continue;
            }

            let value = String::from_utf8(buffer)
                .map_err(|e| MultipartParseError::Utf8Error(e.to_string()))?;

            match name.as_str() {
                "clinic_name" => submission.clinic_name = value,
                "physician_name" => submission.physician_name = value,
                "physician_contact" => submission.physician_contact = value,
                "patient_first_name" => submission.patient_first_name = value,
                "patient_last_name" => submission.patient_last_name = value,
                "patient_dob" => submission.patient_dob = value,
                "patient_contact" => submission.patient_contact = value,
                "chief_complaint" => submission.chief_complaint = value,
                "consultation_note" => submission.consultation_note = value,
                _ => {
                    continue;
                }
            }
        }

        Ok(submission)
    }
}
