//! Record export to plain text and PDF

use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use fhirview_core::{FhirError, Result};

use crate::record::PatientRecord;
use crate::render::render_record;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const LEFT_MARGIN: Mm = Mm(20.0);
const TOP_START: Mm = Mm(280.0);
const BOTTOM_MARGIN: Mm = Mm(15.0);

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}

/// Write the record as plain text: the rendered record followed by a
/// trailing `Generated:` timestamp line.
pub fn export_text(record: &PatientRecord, path: &Path) -> Result<()> {
    let mut content = render_record(record);
    content.push_str(&format!("\nGenerated: {}\n", timestamp()));
    std::fs::write(path, content)?;
    Ok(())
}

/// Write the record as a PDF, returning the bytes that were written.
pub fn export_pdf(record: &PatientRecord, path: &Path) -> Result<Vec<u8>> {
    let bytes = generate_pdf(record)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes)
}

/// Cursor-based page writer; adds a page when the cursor passes the bottom
/// margin.
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    y: Mm,
}

impl PdfWriter {
    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef, advance: Mm) {
        if self.y.0 < BOTTOM_MARGIN.0 {
            let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_START;
        }
        self.layer.use_text(text, size, LEFT_MARGIN, self.y, font);
        self.y -= advance;
    }

    fn gap(&mut self, advance: Mm) {
        self.y -= advance;
    }
}

/// Generate the PDF document. Returns the raw bytes.
pub fn generate_pdf(record: &PatientRecord) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new("Patient Summary", PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| FhirError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| FhirError::Pdf(format!("font error: {e}")))?;

    let mut writer = PdfWriter {
        doc,
        layer,
        y: TOP_START,
    };

    // Title and detail line
    writer.line("Patient Summary", 14.0, &bold, Mm(10.0));
    for line in wrap_text(&record.patient.detail_line(), 80) {
        writer.line(&line, 11.0, &font, Mm(6.0));
    }
    writer.gap(Mm(4.0));

    // Sections
    for section in &record.sections {
        writer.line(section.title, 11.0, &bold, Mm(6.0));
        for item in &section.items {
            for line in wrap_text(item, 90) {
                writer.line(&line, 9.0, &font, Mm(4.5));
            }
            writer.gap(Mm(1.5));
        }
        writer.gap(Mm(4.0));
    }

    writer.line(&format!("Generated: {}", timestamp()), 8.0, &font, Mm(4.0));

    let mut buf = BufWriter::new(Vec::new());
    writer
        .doc
        .save(&mut buf)
        .map_err(|e| FhirError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| FhirError::Pdf(format!("buffer error: {e}")))
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
