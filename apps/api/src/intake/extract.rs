//! First-page text extraction for staged résumé PDFs.
//!
//! The PDF routine itself is a black box (`pdf-extract`); this module only
//! decides what counts as a usable résumé: the first page must carry
//! non-empty text, anything else fails the run before a single model call.

use crate::errors::AppError;

/// Extracts the plain text of the first page of a PDF held in memory.
///
/// Errors are all `AppError::Extraction`: unparseable bytes, a document
/// with no pages, or a first page with no extractable text.
pub fn first_page_text(bytes: &[u8]) -> Result<String, AppError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| AppError::Extraction(format!("could not parse PDF: {e}")))?;
    require_first_page_text(pages)
}

/// Validates the extracted page list: page 0 must exist and trim to
/// something non-empty.
fn require_first_page_text(pages: Vec<String>) -> Result<String, AppError> {
    let first = pages.into_iter().next().unwrap_or_default();
    let text = first.trim();
    if text.is_empty() {
        return Err(AppError::Extraction(
            "document contains no extractable text on its first page".to_string(),
        ));
    }
    Ok(text.to_string())
}

/// Builds a one-font PDF with one page per entry in `pages`. Object offsets
/// are recorded as the buffer grows, so the xref table is valid by
/// construction. Used by tests across the crate.
#[cfg(test)]
pub(crate) fn minimal_pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let n = pages.len();
    let font_id = 3 + 2 * n;
    let kids = (0..n)
        .map(|i| format!("{} 0 R", 3 + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{kids}] /Count {n} >>"),
    ];
    for (i, text) in pages.iter().enumerate() {
        let escaped = text
            .replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)");
        let stream = format!("BT /F1 12 Tf 72 720 Td ({escaped}) Tj ET");
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {} 0 R >>",
            4 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ));
    }
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    let mut buf: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, obj) in objects.iter().enumerate() {
        offsets.push(buf.len());
        buf.extend(format!("{} 0 obj\n{obj}\nendobj\n", i + 1).into_bytes());
    }
    let xref_offset = buf.len();
    buf.extend(format!("xref\n0 {}\n", objects.len() + 1).into_bytes());
    buf.extend(b"0000000000 65535 f \n");
    for off in offsets {
        buf.extend(format!("{off:010} 00000 n \n").into_bytes());
    }
    buf.extend(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF",
            objects.len() + 1
        )
        .into_bytes(),
    );
    buf
}

/// Single-page convenience wrapper around `minimal_pdf_with_pages`.
#[cfg(test)]
pub(crate) fn minimal_pdf(text: &str) -> Vec<u8> {
    minimal_pdf_with_pages(&[text])
}
