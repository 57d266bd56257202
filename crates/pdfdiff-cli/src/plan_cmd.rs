use std::path::Path;

use pdfdiff_core::{HighlightPlan, PlanStyle, compare_documents};

use crate::cli::DiffArgs;
use crate::shared::{load_document, resolve_options};

pub fn run(old: &Path, new: &Path, args: &DiffArgs) -> Result<(), i32> {
    let options = resolve_options(args)?;
    let doc_a = load_document(old)?;
    let doc_b = load_document(new)?;

    let diff = compare_documents(&doc_a, &doc_b, &options);
    let plan = HighlightPlan::build(&diff, &PlanStyle::default()).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let json_str = serde_json::to_string(&plan).map_err(|e| {
        eprintln!("Error: failed to serialize plan: {e}");
        1
    })?;
    println!("{json_str}");

    tracing::info!(
        input_pages = diff.pages.len(),
        output_pages = plan.pages.len(),
        "highlight plan built"
    );
    Ok(())
}
