use std::path::Path;

use crate::cli::OutputFormat;
use crate::shared::{bbox_to_json, format_bbox, open_pdf};

pub fn run(file: &Path, format: &OutputFormat) -> Result<(), i32> {
    let info = open_pdf(file)?;

    match format {
        OutputFormat::Text => {
            for page in &info.pages {
                println!("Page {}:", page.page_number);
                println!("  Dimensions: {:.2} x {:.2}", page.width, page.height);
                println!("  Rotation: {}", page.rotation.degrees());
                println!("  MediaBox: {}", format_bbox(&page.media_box));
                if let Some(ref cb) = page.crop_box {
                    println!("  CropBox: {}", format_bbox(cb));
                }
            }

            if !info.metadata.is_empty() {
                println!();
                println!("Metadata:");
                for (key, value) in info.metadata.entries() {
                    println!("  {key}: {value}");
                }
            }

            if !info.bookmarks.is_empty() {
                println!();
                println!("Bookmarks:");
                for bookmark in &info.bookmarks {
                    let target = bookmark
                        .page_number
                        .map_or_else(|| "-".to_string(), |i| (i + 1).to_string());
                    println!(
                        "  {}{} -> {target}",
                        "  ".repeat(bookmark.level),
                        bookmark.title
                    );
                }
            }

            println!();
            println!("Pages: {}", info.page_count());
        }
        OutputFormat::Json => {
            let pages: Vec<serde_json::Value> = info
                .pages
                .iter()
                .map(|page| {
                    let mut page_json = serde_json::json!({
                        "page": page.page_number,
                        "width": page.width,
                        "height": page.height,
                        "rotation": page.rotation.degrees(),
                        "media_box": bbox_to_json(&page.media_box),
                    });
                    if let Some(ref cb) = page.crop_box {
                        page_json["crop_box"] = bbox_to_json(cb);
                    }
                    page_json
                })
                .collect();
            let bookmarks: Vec<serde_json::Value> = info
                .bookmarks
                .iter()
                .map(|b| {
                    serde_json::json!({
                        "title": b.title,
                        "level": b.level,
                        "page": b.page_number.map(|i| i + 1),
                    })
                })
                .collect();
            let metadata: serde_json::Map<String, serde_json::Value> = info
                .metadata
                .entries()
                .map(|(key, value)| (key.to_string(), serde_json::json!(value)))
                .collect();

            let output = serde_json::json!({
                "pages": info.page_count(),
                "page_info": pages,
                "metadata": metadata,
                "bookmarks": bookmarks,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        }
    }

    Ok(())
}
