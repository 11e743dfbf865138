//! Small helpers over `scraper` shared by the page parsers.

use std::collections::HashMap;

use scraper::{ElementRef, Selector};

use crate::error::AppError;

pub fn selector(css: &str) -> Result<Selector, AppError> {
    Selector::parse(css).map_err(|e| AppError::parse(format!("Invalid selector '{css}': {e}")))
}

/// Element text with whitespace collapsed.
pub fn element_text(element: &ElementRef) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

/// Map lowercase header text → column index for a table.
///
/// Uses `thead th` when present, otherwise the `th` cells of the first row
/// that has any.
pub fn header_map(table: &ElementRef) -> Result<HashMap<String, usize>, AppError> {
    let thead = selector("thead th")?;
    let rows = selector("tr")?;
    let th = selector("th")?;

    let mut headers: Vec<String> = table.select(&thead).map(|h| element_text(&h)).collect();
    if headers.is_empty() {
        headers = table
            .select(&rows)
            .map(|row| row.select(&th).map(|h| element_text(&h)).collect::<Vec<_>>())
            .find(|cells| !cells.is_empty())
            .unwrap_or_default();
    }

    Ok(headers
        .into_iter()
        .enumerate()
        .map(|(idx, name)| (name.to_lowercase(), idx))
        .collect())
}

/// Body rows of a table as their `td` elements; header-only rows are skipped.
pub fn body_rows<'a>(table: &ElementRef<'a>) -> Result<Vec<Vec<ElementRef<'a>>>, AppError> {
    let rows = selector("tr")?;
    let td = selector("td")?;
    Ok(table
        .select(&rows)
        .map(|row| row.select(&td).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect())
}

/// Text of the named column in a row, or `""` when the table lacks it.
pub fn column_text(cells: &[ElementRef], headers: &HashMap<String, usize>, name: &str) -> String {
    headers
        .get(name)
        .and_then(|idx| cells.get(*idx))
        .map(element_text)
        .unwrap_or_default()
}

/// First link inside the named column: `(text, href)`.
pub fn column_link(
    cells: &[ElementRef],
    headers: &HashMap<String, usize>,
    name: &str,
) -> Result<Option<(String, String)>, AppError> {
    let a = selector("a[href]")?;
    Ok(headers
        .get(name)
        .and_then(|idx| cells.get(*idx))
        .and_then(|cell| cell.select(&a).next())
        .and_then(|link| {
            link.value()
                .attr("href")
                .map(|href| (element_text(&link), href.to_string()))
        }))
}
