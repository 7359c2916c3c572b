use super::ExtractionError;
use pagemill_core::Page;

/// Plain text: the whole file is page 1.
pub fn extract_txt(bytes: &[u8]) -> Result<Vec<Page>, ExtractionError> {
    // Try UTF-8 first, fall back to lossy conversion.
    let text = String::from_utf8(bytes.to_vec())
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned());

    Ok(vec![Page::new(1, text)])
}
