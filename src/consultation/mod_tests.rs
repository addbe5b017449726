#[cfg(test)]
mod tests {
    use crate::consultation::models::{Consultation, ConsultationSubmission, UploadedLogo};
    use crate::consultation::validation::{
        validate_submission, ValidationErrors, NAME_MAX_LEN, NOTE_MAX_LEN, PHONE_MESSAGE,
    };
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn logo() -> UploadedLogo {
        UploadedLogo {
            filename: "logo.png".to_string(),
            data: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    fn valid_submission() -> ConsultationSubmission {
        ConsultationSubmission {
            clinic_name: "Acme Clinic".to_string(),
            physician_name: "Dr. A".to_string(),
            physician_contact: "9876543210".to_string(),
            patient_first_name: "Jane".to_string(),
            patient_last_name: "Doe".to_string(),
            patient_dob: "1990-01-01".to_string(),
            patient_contact: "+919876543210".to_string(),
            chief_complaint: "Fever".to_string(),
            consultation_note: "Prescribed rest".to_string(),
            clinic_logo: Some(logo()),
        }
    }

    fn errors_for(submission: ConsultationSubmission) -> ValidationErrors {
        validate_submission(submission).expect_err("expected validation to fail")
    }

    #[test]
    fn test_valid_submission_passes() {
        let validated = validate_submission(valid_submission()).expect("submission should pass");

        assert_eq!(validated.clinic_name, "Acme Clinic");
        assert_eq!(
            validated.patient_dob,
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
        );
        assert_eq!(validated.patient_contact, "+919876543210");
        assert_eq!(validated.clinic_logo.filename, "logo.png");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut submission = valid_submission();
        submission.clinic_name = "  Acme Clinic  ".to_string();
        submission.physician_contact = " 9876543210 ".to_string();

        let validated = validate_submission(submission).expect("submission should pass");
        assert_eq!(validated.clinic_name, "Acme Clinic");
        assert_eq!(validated.physician_contact, "9876543210");
    }

    #[test]
    fn test_phone_accepts_bare_ten_digits_and_country_code() {
        for phone in ["9876543210", "+919876543210", "0123456789"] {
            let mut submission = valid_submission();
            submission.physician_contact = phone.to_string();
            assert!(
                validate_submission(submission).is_ok(),
                "phone {:?} should be accepted",
                phone
            );
        }
    }

    #[test]
    fn test_phone_rejects_everything_else() {
        for phone in [
            "12345",
            "98765432101",
            "987654321",
            "+9198765432",
            "+9198765432101",
            "+929876543210",
            "98765abcde",
            "phone number",
        ] {
            let mut submission = valid_submission();
            submission.physician_contact = phone.to_string();
            let errors = errors_for(submission);
            let map = errors.into_field_map();
            assert_eq!(
                map.get("physician_contact").map(|m| m[0].as_str()),
                Some(PHONE_MESSAGE),
                "phone {:?} should be rejected with the canonical message",
                phone
            );
        }
    }

    #[test]
    fn test_name_at_exact_max_length_passes() {
        let mut submission = valid_submission();
        submission.clinic_name = "a".repeat(NAME_MAX_LEN);
        assert!(validate_submission(submission).is_ok());
    }

    #[test]
    fn test_name_one_over_max_length_fails() {
        let mut submission = valid_submission();
        submission.clinic_name = "a".repeat(NAME_MAX_LEN + 1);
        let map = errors_for(submission).into_field_map();
        let messages = map.get("clinic_name").expect("clinic_name should have an error");
        assert!(messages[0].contains("200"));
        assert!(messages[0].contains("Clinic name"));
    }

    #[test]
    fn test_note_length_boundary() {
        let mut submission = valid_submission();
        submission.chief_complaint = "x".repeat(NOTE_MAX_LEN);
        assert!(validate_submission(submission).is_ok());

        let mut submission = valid_submission();
        submission.chief_complaint = "x".repeat(NOTE_MAX_LEN + 1);
        let map = errors_for(submission).into_field_map();
        let messages = map.get("chief_complaint").expect("chief_complaint should have an error");
        assert!(messages[0].contains("5000"));
    }

    #[test]
    fn test_unparseable_dob_fails() {
        for dob in ["01/01/1990", "1990-13-01", "1990-02-30", "not a date"] {
            let mut submission = valid_submission();
            submission.patient_dob = dob.to_string();
            let map = errors_for(submission).into_field_map();
            assert!(
                map.contains_key("patient_dob"),
                "dob {:?} should be rejected",
                dob
            );
        }
    }

    #[test]
    fn test_missing_logo_fails() {
        let mut submission = valid_submission();
        submission.clinic_logo = None;
        let map = errors_for(submission).into_field_map();
        assert!(map.contains_key("clinic_logo"));
    }

    #[test]
    fn test_non_image_logo_filename_fails() {
        let mut submission = valid_submission();
        submission.clinic_logo = Some(UploadedLogo {
            filename: "logo.txt".to_string(),
            data: vec![1, 2, 3],
        });
        let map = errors_for(submission).into_field_map();
        assert!(map.contains_key("clinic_logo"));
    }

    #[test]
    fn test_all_violations_reported_together() {
        let submission = ConsultationSubmission {
            clinic_name: String::new(),
            physician_name: String::new(),
            physician_contact: "12345".to_string(),
            patient_first_name: "Jane".to_string(),
            patient_last_name: "Doe".to_string(),
            patient_dob: "bad".to_string(),
            patient_contact: "9876543210".to_string(),
            chief_complaint: "Fever".to_string(),
            consultation_note: "Rest".to_string(),
            clinic_logo: None,
        };

        let errors = errors_for(submission);
        assert_eq!(errors.len(), 5);
        let map = errors.into_field_map();
        for field in [
            "clinic_name",
            "physician_name",
            "physician_contact",
            "patient_dob",
            "clinic_logo",
        ] {
            assert!(map.contains_key(field), "expected an error for {}", field);
        }
    }

    #[test]
    fn test_single_bad_field_reports_only_that_field() {
        let mut submission = valid_submission();
        submission.physician_contact = "12345".to_string();
        let map = errors_for(submission).into_field_map();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("physician_contact"));
    }

    #[test]
    fn test_report_filename_convention() {
        let record = Consultation {
            id: Uuid::new_v4(),
            clinic_name: "Acme Clinic".to_string(),
            clinic_logo: None,
            physician_name: "Dr. A".to_string(),
            physician_contact: "9876543210".to_string(),
            patient_first_name: "Jane".to_string(),
            patient_last_name: "Doe".to_string(),
            patient_dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            patient_contact: "+919876543210".to_string(),
            chief_complaint: "Fever".to_string(),
            consultation_note: "Prescribed rest".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(record.report_filename(), "CR_Doe_Jane_1990-01-01.pdf");
        assert_eq!(record.patient_name(), "Jane Doe");
    }

    #[test]
    fn test_submitted_values_echo_raw_strings() {
        let mut submission = valid_submission();
        submission.patient_dob = "not-a-date".to_string();
        let echo = submission.submitted_values();
        assert_eq!(echo.patient_dob, "not-a-date");
        assert_eq!(echo.clinic_name, "Acme Clinic");
    }
}
