//! Consultation row operations.
//!
//! Expects the table:
//!
//! ```sql
//! CREATE TABLE consultations (
//!     id UUID PRIMARY KEY,
//!     clinic_name TEXT NOT NULL,
//!     clinic_logo TEXT,
//!     physician_name TEXT NOT NULL,
//!     physician_contact TEXT NOT NULL,
//!     patient_first_name TEXT NOT NULL,
//!     patient_last_name TEXT NOT NULL,
//!     patient_dob DATE NOT NULL,
//!     patient_contact TEXT NOT NULL,
//!     chief_complaint TEXT NOT NULL,
//!     consultation_note TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL
//! );
//! ```

use uuid::Uuid;

use super::AppState;
use crate::consultation::models::Consultation;

const CONSULTATION_COLUMNS: &str = "id, clinic_name, clinic_logo, physician_name, \
     physician_contact, patient_first_name, patient_last_name, patient_dob, \
     patient_contact, chief_complaint, consultation_note, created_at";

impl AppState {
    pub async fn insert_consultation(
        &self,
        consultation: &Consultation,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO consultations (id, clinic_name, clinic_logo, physician_name,
                 physician_contact, patient_first_name, patient_last_name, patient_dob,
                 patient_contact, chief_complaint, consultation_note, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(consultation.id)
        .bind(&consultation.clinic_name)
        .bind(consultation.clinic_logo.as_deref())
        .bind(&consultation.physician_name)
        .bind(&consultation.physician_contact)
        .bind(&consultation.patient_first_name)
        .bind(&consultation.patient_last_name)
        .bind(consultation.patient_dob)
        .bind(&consultation.patient_contact)
        .bind(&consultation.chief_complaint)
        .bind(&consultation.consultation_note)
        .bind(consultation.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_consultation_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<Consultation>, sqlx::Error> {
        sqlx::query_as::<_, Consultation>(&format!(
            "SELECT {} FROM consultations WHERE id = $1",
            CONSULTATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}
