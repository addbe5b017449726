//! Consultation report layout.
//!
//! One letter-size page: clinic logo top-right, a six-row two-column table
//! with the record's fields, and a timestamped footer. All coordinates are
//! fixed; rendering the same record with the same metadata lays out the same
//! page every time. The renderer never reads the clock - the caller stamps
//! the timestamp into [`RequestMetadata`].

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use printpdf::path::PaintMode;
use printpdf::*;

use super::RenderError;
use crate::consultation::models::Consultation;

const INCH: f32 = 72.0;
// Letter, in points.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;

const LOGO_WIDTH: f32 = 2.0 * INCH;
const LOGO_HEIGHT: f32 = 0.5 * INCH;
const LOGO_X: f32 = PAGE_WIDTH - LOGO_WIDTH - 50.0;
const LOGO_Y: f32 = PAGE_HEIGHT - 100.0;
const LOGO_DPI: f32 = 300.0;

const TABLE_X: f32 = 50.0;
const TABLE_Y: f32 = PAGE_HEIGHT - 300.0;
const LABEL_COL_WIDTH: f32 = 2.0 * INCH;
const VALUE_COL_WIDTH: f32 = 4.0 * INCH;
const TABLE_WIDTH: f32 = LABEL_COL_WIDTH + VALUE_COL_WIDTH;

const FONT_SIZE: f32 = 12.0;
const CELL_INSET: f32 = 6.0;
// Header row carries extra bottom padding under its text.
const HEADER_ROW_HEIGHT: f32 = 27.0;
const HEADER_TEXT_RISE: f32 = 12.0;
const BODY_ROW_HEIGHT: f32 = 18.0;
const BODY_TEXT_RISE: f32 = 4.5;
const GRID_WIDTH: f32 = 1.0;

const FOOTER_X: f32 = 50.0;
const FOOTER_Y: f32 = 30.0;

const COLOR_GREY: (u8, u8, u8) = (128, 128, 128);
const COLOR_WHITESMOKE: (u8, u8, u8) = (245, 245, 245);
const COLOR_BEIGE: (u8, u8, u8) = (245, 245, 220);
const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);

/// Request-scoped details stamped into the footer.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    pub client_ip: Option<String>,
    pub timestamp: DateTime<Utc>,
}

fn pt(value: f32) -> Mm {
    Mm::from(Pt(value))
}

fn rgb(color: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    ))
}

fn add_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    x: f32,
    y: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb(color));
    layer.use_text(text, FONT_SIZE, pt(x), pt(y), font);
}

fn add_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    let line = Line {
        points: vec![(Point::new(pt(x1), pt(y1)), false), (Point::new(pt(x2), pt(y2)), false)],
        is_closed: false,
    };
    layer.add_line(line);
}

fn fill_rect(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32, color: (u8, u8, u8)) {
    layer.set_fill_color(rgb(color));
    let rect = Rect::new(pt(x1), pt(y1), pt(x2), pt(y2)).with_mode(PaintMode::Fill);
    layer.add_rect(rect);
}

/// Draw the clinic logo anchored near the top-right corner, scaled to
/// exactly 2in x 0.5in.
fn draw_logo(layer: &PdfLayerReference, path: &Path) -> Result<(), RenderError> {
    let bytes = fs::read(path).map_err(|source| RenderError::LogoRead {
        path: path.to_path_buf(),
        source,
    })?;

    let dynamic_image =
        printpdf::image_crate::load_from_memory(&bytes).map_err(|e| RenderError::LogoDecode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let (px_width, px_height) = (dynamic_image.width(), dynamic_image.height());
    let image = Image::from_dynamic_image(&dynamic_image);

    // At LOGO_DPI, a pixel is 1/LOGO_DPI inch; scale to the fixed box.
    let transform = ImageTransform {
        translate_x: Some(pt(LOGO_X)),
        translate_y: Some(pt(LOGO_Y)),
        scale_x: Some((LOGO_WIDTH / INCH) * LOGO_DPI / px_width as f32),
        scale_y: Some((LOGO_HEIGHT / INCH) * LOGO_DPI / px_height as f32),
        dpi: Some(LOGO_DPI),
        ..Default::default()
    };

    image.add_to_layer(layer.clone(), transform);
    Ok(())
}

/// Draw the six-row key/value table with its lower-left corner at the fixed
/// anchor. The first row is styled as a header: grey background, light bold
/// text; body rows are beige. Every cell gets a 1pt black grid.
fn draw_table(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    rows: &[(&str, String)],
) {
    let table_height =
        HEADER_ROW_HEIGHT + (rows.len().saturating_sub(1)) as f32 * BODY_ROW_HEIGHT;
    let table_top = TABLE_Y + table_height;

    let mut row_top = table_top;
    for (index, (label, value)) in rows.iter().enumerate() {
        let is_header = index == 0;
        let (row_height, text_rise) = if is_header {
            (HEADER_ROW_HEIGHT, HEADER_TEXT_RISE)
        } else {
            (BODY_ROW_HEIGHT, BODY_TEXT_RISE)
        };
        let row_bottom = row_top - row_height;

        let background = if is_header { COLOR_GREY } else { COLOR_BEIGE };
        fill_rect(
            layer,
            TABLE_X,
            row_bottom,
            TABLE_X + TABLE_WIDTH,
            row_top,
            background,
        );

        let text_color = if is_header { COLOR_WHITESMOKE } else { COLOR_BLACK };
        let text_font = if is_header { font_bold } else { font };
        add_text(
            layer,
            text_font,
            label,
            TABLE_X + CELL_INSET,
            row_bottom + text_rise,
            text_color,
        );
        add_text(
            layer,
            text_font,
            value,
            TABLE_X + LABEL_COL_WIDTH + CELL_INSET,
            row_bottom + text_rise,
            text_color,
        );

        row_top = row_bottom;
    }

    // Grid on top of the backgrounds.
    layer.set_outline_color(rgb(COLOR_BLACK));
    layer.set_outline_thickness(GRID_WIDTH);

    let mut boundary = table_top;
    add_line(layer, TABLE_X, boundary, TABLE_X + TABLE_WIDTH, boundary);
    for index in 0..rows.len() {
        boundary -= if index == 0 { HEADER_ROW_HEIGHT } else { BODY_ROW_HEIGHT };
        add_line(layer, TABLE_X, boundary, TABLE_X + TABLE_WIDTH, boundary);
    }
    for x in [TABLE_X, TABLE_X + LABEL_COL_WIDTH, TABLE_X + TABLE_WIDTH] {
        add_line(layer, x, TABLE_Y, x, table_top);
    }
}

fn draw_footer(layer: &PdfLayerReference, font: &IndirectFontRef, meta: &RequestMetadata) {
    let ip = meta.client_ip.as_deref().unwrap_or("Unknown IP");
    let footer_text = format!(
        "This report is generated on {} from {}",
        meta.timestamp.format("%Y-%m-%d %H:%M:%S"),
        ip
    );
    add_text(layer, font, &footer_text, FOOTER_X, FOOTER_Y, COLOR_BLACK);
}

/// Render a consultation record to a single-page PDF byte stream.
///
/// A missing logo (`logo_path` of `None`) is skipped without error; a logo
/// path that cannot be read or decoded fails the whole render.
pub fn render_report(
    record: &Consultation,
    logo_path: Option<&Path>,
    meta: &RequestMetadata,
) -> Result<Vec<u8>, RenderError> {
    let (doc, page, layer) = PdfDocument::new(
        "Consultation Report",
        pt(PAGE_WIDTH),
        pt(PAGE_HEIGHT),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let layer = doc.get_page(page).get_layer(layer);

    if let Some(path) = logo_path {
        draw_logo(&layer, path)?;
    }

    let rows = [
        ("Clinic Name", record.clinic_name.clone()),
        ("Physician Name", record.physician_name.clone()),
        ("Patient Name", record.patient_name()),
        ("Date of Birth", record.patient_dob.to_string()),
        ("Chief Complaint", record.chief_complaint.clone()),
        ("Consultation Note", record.consultation_note.clone()),
    ];
    draw_table(&layer, &font, &font_bold, &rows);

    draw_footer(&layer, &font, meta);

    doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}
