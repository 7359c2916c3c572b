use super::ExtractionError;
use pagemill_core::Page;

/// Extract per-page text from PDF bytes.
///
/// `pdf-extract` returns the whole document as one string with form feed
/// characters (`\x0C`) between pages. Every split segment becomes a page,
/// blank pages included, so page numbers stay dense and `page_count`
/// matches the physical page total.
pub fn extract_pdf(bytes: &[u8]) -> Result<Vec<Page>, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    if !text.contains('\x0C') {
        // No page breaks found -- treat as a single page.
        return Ok(vec![Page::new(1, text)]);
    }

    let pages = text
        .split('\x0C')
        .enumerate()
        .map(|(i, page_text)| Page::new(i as u32 + 1, page_text))
        .collect();

    Ok(pages)
}
