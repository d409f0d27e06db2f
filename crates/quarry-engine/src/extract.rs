use quarry_core::error::EngineError;
use quarry_core::models::{FieldValue, ScrapeResult, SelectorMap};
use scraper::{ElementRef, Html, Selector};

/// Extract the requested fields from an HTML document.
///
/// Each selector runs against the full document. No match leaves the field
/// out of the result entirely, one match yields a single string, and several
/// matches yield the values in document order. Text content of an element is
/// concatenated across its descendants and trimmed.
pub fn extract_fields(html: &str, fields: &SelectorMap) -> Result<ScrapeResult, EngineError> {
    let document = Html::parse_document(html);
    let mut result = ScrapeResult::new();

    for (name, raw_selector) in fields {
        let selector = Selector::parse(raw_selector).map_err(|e| {
            EngineError::Parse(format!(
                "Invalid selector '{raw_selector}' for field '{name}': {e}"
            ))
        })?;

        let mut values: Vec<String> = document.select(&selector).map(element_text).collect();
        match values.len() {
            0 => {}
            1 => {
                result.insert(name.clone(), FieldValue::Single(values.remove(0)));
            }
            _ => {
                result.insert(name.clone(), FieldValue::Many(values));
            }
        }
    }

    Ok(result)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
