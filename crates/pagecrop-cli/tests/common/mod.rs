#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use lopdf::{Object, ObjectId, Stream, dictionary};

pub fn cmd() -> Command {
    Command::cargo_bin("pagecrop").unwrap()
}

/// Build a PDF with the given `(width, height, rotate)` pages and one
/// outline entry per page in `bookmarks` (0-indexed).
pub fn pdf_with_pages(pages: &[(i64, i64, i64)], bookmarks: &[usize]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut page_ids: Vec<ObjectId> = Vec::new();
    for (i, &(width, height, rotate)) in pages.iter().enumerate() {
        let content = format!("0 0 m {} {} l S % page {}", width, height, i + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Contents" => content_id,
        };
        if rotate != 0 {
            page.set("Rotate", rotate);
        }
        page_ids.push(doc.add_object(page));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
        }),
    );

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    if !bookmarks.is_empty() {
        let outlines_id = doc.new_object_id();
        let item_ids: Vec<ObjectId> = bookmarks.iter().map(|_| doc.new_object_id()).collect();
        for (i, &target) in bookmarks.iter().enumerate() {
            let mut item = dictionary! {
                "Title" => Object::string_literal(format!("Section {}", i + 1)),
                "Parent" => outlines_id,
                "A" => dictionary! {
                    "S" => "GoTo",
                    "D" => vec![Object::Reference(page_ids[target]), "Fit".into()],
                },
            };
            if i + 1 < item_ids.len() {
                item.set("Next", item_ids[i + 1]);
            }
            doc.objects.insert(item_ids[i], Object::Dictionary(item));
        }
        doc.objects.insert(
            outlines_id,
            Object::Dictionary(dictionary! {
                "Type" => "Outlines",
                "First" => item_ids[0],
                "Last" => item_ids[item_ids.len() - 1],
                "Count" => item_ids.len() as i64,
            }),
        );
        catalog.set("Outlines", outlines_id);
    }
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Lecture Notes"),
    });
    doc.trailer.set("Info", info_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

pub fn write_temp_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
