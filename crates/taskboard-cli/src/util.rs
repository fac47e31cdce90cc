use anyhow::{anyhow, Result};
use taskboard_core::error::CoreError;
use taskboard_core::models::Category;

/// Resolves a category given by id or by name (case-insensitive) against the
/// cached category list.
pub fn resolve_category_id(categories: &[Category], input: &str) -> Result<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!(CoreError::Validation(
            "Category must not be empty.".to_string()
        )));
    }

    if let Ok(id) = input.parse::<i64>() {
        if categories.iter().any(|c| c.id == id) {
            return Ok(id);
        }
    }

    let matches: Vec<&Category> = categories
        .iter()
        .filter(|c| c.name.eq_ignore_ascii_case(input))
        .collect();

    match matches.as_slice() {
        [category] => Ok(category.id),
        [] => Err(anyhow!(CoreError::NotFound(format!(
            "No category named '{}'",
            input
        )))),
        _ => {
            let ids: Vec<String> = matches.iter().map(|c| c.id.to_string()).collect();
            Err(anyhow!(CoreError::Validation(format!(
                "Category name '{}' is ambiguous; use one of the ids {}",
                input,
                ids.join(", ")
            ))))
        }
    }
}

/// Name for display, falling back to the raw id for dangling references.
pub fn category_label(categories: &[Category], category_id: Option<i64>) -> String {
    match category_id {
        None => "None".to_string(),
        Some(id) => categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("#{}", id)),
    }
}
