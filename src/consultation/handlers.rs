use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::{
    web::{self, Path},
    HttpRequest, HttpResponse, Responder,
};
use chrono::Utc;
use log::{error, info};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::consultation::models::{Consultation, SubmittedForm};
use crate::consultation::multipart::MultipartParser;
use crate::consultation::validation::validate_submission;
use crate::db::AppState;
use crate::report::{render_report, RequestMetadata};
use crate::ErrorResponse;

/// Body of a 400 response to a rejected submission: every violation keyed by
/// field, plus the submitted values so the client can re-render the form.
#[derive(Serialize, ToSchema)]
pub struct ValidationFailedResponse {
    pub errors: HashMap<String, Vec<String>>,
    pub submitted: SubmittedForm,
}

#[derive(Serialize, ToSchema)]
pub struct ConsultationResponse {
    #[serde(flatten)]
    pub consultation: Consultation,
    /// Resolvable URL of the stored clinic logo
    pub clinic_logo_url: Option<String>,
}

fn request_metadata(req: &HttpRequest) -> RequestMetadata {
    RequestMetadata {
        client_ip: req.peer_addr().map(|addr| addr.ip().to_string()),
        timestamp: Utc::now(),
    }
}

fn pdf_response(filename: &str, pdf: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .append_header((
            "Content-Disposition",
            format!("attachment; filename={}", filename),
        ))
        .body(pdf)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Consultation Service",
    post,
    path = "/consultations",
    request_body(content = inline(SubmittedForm), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Consultation stored; rendered report returned as PDF"),
        (status = 400, description = "Validation failed; nothing persisted", body = ValidationFailedResponse),
        (status = 500, description = "Storage, persistence, or rendering failed", body = ErrorResponse)
    )
)]
pub async fn submit_consultation(
    payload: Multipart,
    req: HttpRequest,
    data: web::Data<AppState>,
) -> impl Responder {
    let submission = match MultipartParser::parse_consultation_multipart(payload).await {
        Ok(submission) => submission,
        Err(e) => {
            error!("Failed to parse consultation multipart: {}", e);
            return HttpResponse::from(e);
        }
    };

    let submitted = submission.submitted_values();
    let validated = match validate_submission(submission) {
        Ok(validated) => validated,
        Err(errors) => {
            info!(
                "Consultation submission rejected: {} validation error(s)",
                errors.len()
            );
            return HttpResponse::BadRequest().json(ValidationFailedResponse {
                errors: errors.into_field_map(),
                submitted,
            });
        }
    };

    let stored_logo = match data
        .storage
        .save_logo(&validated.clinic_logo.filename, &validated.clinic_logo.data)
        .await
    {
        Ok(stored) => stored,
        Err(e) => {
            error!("Failed to store clinic logo: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse::internal_error(
                &format!("Failed to store clinic logo: {}", e),
            ));
        }
    };

    let record = Consultation {
        id: Uuid::new_v4(),
        clinic_name: validated.clinic_name,
        clinic_logo: Some(stored_logo),
        physician_name: validated.physician_name,
        physician_contact: validated.physician_contact,
        patient_first_name: validated.patient_first_name,
        patient_last_name: validated.patient_last_name,
        patient_dob: validated.patient_dob,
        patient_contact: validated.patient_contact,
        chief_complaint: validated.chief_complaint,
        consultation_note: validated.consultation_note,
        created_at: Utc::now(),
    };

    if let Err(e) = data.insert_consultation(&record).await {
        error!("Failed to persist consultation {}: {}", record.id, e);
        return HttpResponse::InternalServerError().json(ErrorResponse::internal_error(
            "Failed to persist consultation",
        ));
    }
    info!("Persisted consultation {}", record.id);

    // Rendering happens after the insert; a render failure leaves the row in
    // place.
    let meta = request_metadata(&req);
    let logo_path = record
        .clinic_logo
        .as_ref()
        .map(|stored| data.storage.logo_path(stored));

    match render_report(&record, logo_path.as_deref(), &meta) {
        Ok(pdf) => pdf_response(&record.report_filename(), pdf),
        Err(e) => {
            error!("Report rendering failed for consultation {}: {}", record.id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&format!(
                "Report rendering failed: {}",
                e
            )))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Consultation Service",
    get,
    path = "/consultations/{id}",
    responses(
        (status = 200, description = "Consultation found", body = ConsultationResponse),
        (status = 404, description = "Consultation not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the consultation to retrieve")
    )
)]
pub async fn get_consultation(id: Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    match data.get_consultation_by_id(&id.into_inner()).await {
        Ok(Some(consultation)) => {
            let clinic_logo_url = consultation
                .clinic_logo
                .as_deref()
                .map(|stored| data.media.logo_url(stored));
            HttpResponse::Ok().json(ConsultationResponse {
                consultation,
                clinic_logo_url,
            })
        }
        Ok(None) => {
            HttpResponse::NotFound().json(ErrorResponse::not_found("Consultation not found"))
        }
        Err(e) => {
            error!("Database error while fetching consultation: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to fetch consultation"))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Consultation Service",
    get,
    path = "/consultations/{id}/report",
    responses(
        (status = 200, description = "Rendered report returned as PDF"),
        (status = 404, description = "Consultation not found", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the consultation to render")
    )
)]
pub async fn download_report(
    id: Path<Uuid>,
    req: HttpRequest,
    data: web::Data<AppState>,
) -> impl Responder {
    let record = match data.get_consultation_by_id(&id.into_inner()).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return HttpResponse::NotFound()
                .json(ErrorResponse::not_found("Consultation not found"))
        }
        Err(e) => {
            error!("Database error while fetching consultation: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Failed to fetch consultation"));
        }
    };

    let meta = request_metadata(&req);
    let logo_path = record
        .clinic_logo
        .as_ref()
        .map(|stored| data.storage.logo_path(stored));

    match render_report(&record, logo_path.as_deref(), &meta) {
        Ok(pdf) => pdf_response(&record.report_filename(), pdf),
        Err(e) => {
            error!("Report rendering failed for consultation {}: {}", record.id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&format!(
                "Report rendering failed: {}",
                e
            )))
        }
    }
}

/// Serve a stored clinic logo from local media storage.
pub async fn serve_logo(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let filename: String = req.match_info().query("filename").into();
    let path = data.storage.logo_path(&filename);

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            HttpResponse::Ok().content_type(mime.as_ref()).body(bytes)
        }
        Err(_) => HttpResponse::NotFound().json(ErrorResponse::not_found(&format!(
            "Logo '{}' not found",
            filename
        ))),
    }
}
