use std::collections::BTreeMap;
use std::path::Path;

use pagecrop::{BBox, ClusterOptions, CropPlan, CropRatio, DocumentInfo, inspect_file};

use crate::page_range::parse_page_range;

/// Read a PDF file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found
/// or cannot be parsed as a valid PDF.
pub fn open_pdf(file: &Path) -> Result<DocumentInfo, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    inspect_file(file).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

/// Build cluster options from the command-line flags.
///
/// `exclude` is a page range validated against `page_count`.
pub fn cluster_options(
    split_odd_even: bool,
    exclude: Option<&str>,
    page_count: usize,
) -> Result<ClusterOptions, i32> {
    let excluded_pages = match exclude {
        Some(range) => parse_page_range(range, page_count).map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?,
        None => Vec::new(),
    };
    Ok(ClusterOptions {
        split_odd_even,
        excluded_pages,
    })
}

/// Parse a `L,B,R,T` ratio argument.
pub fn parse_ratio(input: &str) -> Result<CropRatio, String> {
    let values = input
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid ratio value: '{}'", part.trim()))
        })
        .collect::<Result<Vec<f64>, String>>()?;
    let &[left, bottom, right, top] = values.as_slice() else {
        return Err(format!(
            "expected 4 comma-separated values (left,bottom,right,top), got {}",
            values.len()
        ));
    };
    CropRatio::new(left, bottom, right, top)
        .validate()
        .map_err(|e| e.to_string())
}

/// Parse a JSON crop plan: an object mapping 1-indexed page numbers to lists
/// of `[left, bottom, right, top]` ratios. Pages that are not listed are
/// copied unmodified.
pub fn parse_plan(json: &str, page_count: usize) -> Result<CropPlan, String> {
    let entries: BTreeMap<usize, Vec<CropRatio>> =
        serde_json::from_str(json).map_err(|e| format!("invalid crop plan: {e}"))?;
    let mut plan = CropPlan::new(page_count);
    for (page, ratios) in entries {
        plan.set_ratios(page, ratios).map_err(|e| e.to_string())?;
    }
    Ok(plan)
}

/// Read and parse a JSON crop plan file.
pub fn load_plan(path: &Path, page_count: usize) -> Result<CropPlan, i32> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: failed to read plan {}: {e}", path.display());
        1
    })?;
    parse_plan(&json, page_count).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

pub fn format_bbox(b: &BBox) -> String {
    format!(
        "[{:.2}, {:.2}, {:.2}, {:.2}]",
        b.left, b.bottom, b.right, b.top
    )
}

pub fn bbox_to_json(b: &BBox) -> serde_json::Value {
    serde_json::json!([b.left, b.bottom, b.right, b.top])
}
