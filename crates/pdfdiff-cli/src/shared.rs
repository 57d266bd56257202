use std::fs;
use std::path::Path;

use pdfdiff_core::{DiffOptions, DocumentText};

use crate::cli::DiffArgs;
use crate::page_range::parse_page_range;

/// Load a fragment dump with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is missing
/// or is not a valid document JSON.
pub fn load_document(file: &Path) -> Result<DocumentText, i32> {
    let data = read_file(file)?;
    serde_json::from_str(&data).map_err(|e| {
        eprintln!("Error: invalid fragment dump {}: {e}", file.display());
        1
    })
}

/// Build diff options from an optional config file and command-line overrides.
pub fn resolve_options(args: &DiffArgs) -> Result<DiffOptions, i32> {
    let mut options = match &args.config {
        Some(path) => {
            let data = read_file(path)?;
            serde_json::from_str(&data).map_err(|e| {
                eprintln!("Error: invalid config {}: {e}", path.display());
                1
            })?
        }
        None => DiffOptions::default(),
    };

    if let Some(tolerance) = args.tolerance {
        if !tolerance.is_finite() || tolerance < 0.0 {
            eprintln!("Error: tolerance must be a non-negative number, got {tolerance}");
            return Err(1);
        }
        options.tolerance = tolerance;
    }
    if let Some(norm) = &args.unicode_norm {
        options.unicode_norm = norm.to_unicode_norm();
    }
    Ok(options)
}

/// Resolve an optional page range string into 0-indexed page indices.
///
/// If `pages` is `None`, returns all pages (0..page_count).
pub fn resolve_pages(pages: Option<&str>, page_count: usize) -> Result<Vec<usize>, i32> {
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok((0..page_count).collect()),
    }
}

fn read_file(file: &Path) -> Result<String, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }
    fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })
}
