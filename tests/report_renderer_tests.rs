//! Renderer scenarios: the full submit-shaped record rendered to PDF.

use std::io::Cursor;

use chrono::{NaiveDate, TimeZone, Utc};
use printpdf::image_crate::{DynamicImage, ImageFormat, RgbImage};
use uuid::Uuid;

use consultation_server::consultation::models::Consultation;
use consultation_server::report::{render_report, RenderError, RequestMetadata};

fn record_with_logo(stored: Option<&str>) -> Consultation {
    Consultation {
        id: Uuid::new_v4(),
        clinic_name: "Acme Clinic".to_string(),
        clinic_logo: stored.map(|s| s.to_string()),
        physician_name: "Dr. A".to_string(),
        physician_contact: "9876543210".to_string(),
        patient_first_name: "Jane".to_string(),
        patient_last_name: "Doe".to_string(),
        patient_dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        patient_contact: "+919876543210".to_string(),
        chief_complaint: "Fever".to_string(),
        consultation_note: "Prescribed rest".to_string(),
        created_at: Utc::now(),
    }
}

fn metadata() -> RequestMetadata {
    RequestMetadata {
        client_ip: Some("192.168.1.20".to_string()),
        timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 9, 15, 30).unwrap(),
    }
}

fn write_png(path: &std::path::Path) {
    let img = RgbImage::from_raw(16, 4, vec![128u8; 16 * 4 * 3]).unwrap();
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    std::fs::write(path, bytes).unwrap();
}

#[test]
fn renders_full_record_with_logo() {
    let dir = tempfile::tempdir().unwrap();
    let logo_path = dir.path().join("acme.png");
    write_png(&logo_path);

    let record = record_with_logo(Some("acme.png"));
    let pdf = render_report(&record, Some(&logo_path), &metadata()).expect("render should succeed");

    assert!(pdf.starts_with(b"%PDF"));
    assert!(pdf.len() > 500);
    assert_eq!(record.report_filename(), "CR_Doe_Jane_1990-01-01.pdf");
}

#[test]
fn record_without_logo_renders_without_image() {
    let record = record_with_logo(None);
    let pdf = render_report(&record, None, &metadata()).expect("render should succeed");

    let haystack = String::from_utf8_lossy(&pdf).into_owned();
    assert!(!haystack.contains("XObject"));
}

#[test]
fn render_twice_with_same_metadata_is_stable() {
    let record = record_with_logo(None);
    let meta = metadata();

    let first = render_report(&record, None, &meta).expect("first render");
    let second = render_report(&record, None, &meta).expect("second render");

    // Same record, same metadata: the laid-out page is the same size both
    // times.
    assert_eq!(first.len(), second.len());
}

#[test]
fn unreadable_logo_surfaces_a_render_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone.png");

    let record = record_with_logo(Some("gone.png"));
    let err =
        render_report(&record, Some(&missing), &metadata()).expect_err("render should fail");
    assert!(matches!(err, RenderError::LogoRead { .. }));
}
