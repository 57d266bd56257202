use std::path::Path;

use pdfdiff_core::{DocumentDiff, PageDecision, PageDiff, compare_documents};

use crate::cli::{DiffArgs, OutputFormat};
use crate::shared::{load_document, resolve_options, resolve_pages};

pub fn run(
    old: &Path,
    new: &Path,
    pages: Option<&str>,
    format: &OutputFormat,
    args: &DiffArgs,
) -> Result<(), i32> {
    let options = resolve_options(args)?;
    let doc_a = load_document(old)?;
    let doc_b = load_document(new)?;
    let page_count = doc_a.pages.len().max(doc_b.pages.len());
    let page_indices = resolve_pages(pages, page_count)?;

    let diff = compare_documents(&doc_a, &doc_b, &options);
    let selected: Vec<&PageDiff> = page_indices.iter().map(|&i| &diff.pages[i]).collect();

    match format {
        OutputFormat::Text => write_text(&selected),
        OutputFormat::Json => write_json(&selected)?,
    }

    report_summary(&diff);
    Ok(())
}

fn write_text(pages: &[&PageDiff]) {
    println!("page\tdecision\tdeleted\tadded\tmodified");
    for page in pages {
        let (deleted, added, modified) = match &page.decision {
            PageDecision::Differs(result) => (
                result.deleted.len(),
                result.added.len(),
                result.modified.len(),
            ),
            _ => (0, 0, 0),
        };
        println!(
            "{}\t{}\t{}\t{}\t{}",
            page.index + 1,
            page.decision.label(),
            deleted,
            added,
            modified,
        );
    }
}

fn write_json(pages: &[&PageDiff]) -> Result<(), i32> {
    let json_str = serde_json::to_string(pages).map_err(|e| {
        eprintln!("Error: failed to serialize result: {e}");
        1
    })?;
    println!("{json_str}");
    Ok(())
}

fn report_summary(diff: &DocumentDiff) {
    let changed = diff.changed_pages().count();
    let failed = diff.failures().count();
    tracing::info!(
        pages = diff.pages.len(),
        changed,
        failed,
        "comparison finished"
    );
}
