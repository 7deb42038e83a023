use serde::Serialize;

use crate::cli::{CategoriesArgs, ListFormat};
use crate::commands::context::load_registry;
use crate::dataset::CategoryRegistry;
use crate::output::print_error;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

#[derive(Serialize)]
struct CategoryEntry<'a> {
    name: &'a str,
    labels: Vec<&'a str>,
}

#[must_use]
pub fn run_categories(args: &CategoriesArgs) -> i32 {
    match run_categories_impl(args) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Render the known categories and their labels.
///
/// # Errors
/// Returns an error if the taxonomy file cannot be read or parsed.
pub fn run_categories_impl(args: &CategoriesArgs) -> Result<String> {
    let registry = load_registry(args.taxonomy.as_deref())?;
    match args.format {
        ListFormat::Text => Ok(format_categories_text(&registry)),
        ListFormat::Json => {
            let entries: Vec<CategoryEntry<'_>> = registry
                .iter()
                .map(|taxonomy| CategoryEntry {
                    name: taxonomy.category(),
                    labels: taxonomy.labels().collect(),
                })
                .collect();
            Ok(serde_json::to_string_pretty(&entries)? + "\n")
        }
    }
}

#[must_use]
pub fn format_categories_text(registry: &CategoryRegistry) -> String {
    registry
        .iter()
        .map(|taxonomy| {
            format!(
                "{}: {}\n",
                taxonomy.category(),
                taxonomy.labels().collect::<Vec<_>>().join(", ")
            )
        })
        .collect()
}
