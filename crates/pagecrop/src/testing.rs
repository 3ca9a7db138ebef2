//! In-memory document backend for tests.
//!
//! Documents are plain text, one directive per line:
//!
//! ```text
//! page SRC L B R T ROT [CL CB CR CT]
//! bookmark LEVEL PAGE|- TITLE
//! title TEXT
//! author TEXT
//! fail-save
//! ```
//!
//! `SRC` is the 1-based source page a page was copied from, `PAGE` a 1-based
//! bookmark target. Saving writes the same format back.

use std::io::Write;

use pagecrop_core::{BBox, Bookmark, CropError, DocumentMetadata, Rotation};
use pagecrop_parse::CropBackend;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FakePage {
    pub source: usize,
    pub media_box: BBox,
    pub crop_box: Option<BBox>,
    pub rotation: Rotation,
}

impl FakePage {
    pub fn new(source: usize, width: f64, height: f64) -> Self {
        Self {
            source,
            media_box: BBox::new(0.0, 0.0, width, height),
            crop_box: None,
            rotation: Rotation::Deg0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FakeDocument {
    pub pages: Vec<FakePage>,
    pub bookmarks: Vec<Bookmark>,
    pub metadata: DocumentMetadata,
    pub fail_save: bool,
}

fn parse_error(line: &str) -> CropError {
    CropError::ParseError(format!("bad line: {line}"))
}

fn bbox_from(values: &[f64]) -> BBox {
    BBox::new(values[0], values[1], values[2], values[3])
}

impl FakeDocument {
    /// `count` pages of `width` x `height`, no rotation.
    pub fn uniform(count: usize, width: f64, height: f64) -> Self {
        Self {
            pages: (1..=count).map(|p| FakePage::new(p, width, height)).collect(),
            ..Default::default()
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::new();
        for page in &self.pages {
            let m = page.media_box;
            out.push_str(&format!(
                "page {} {} {} {} {} {}",
                page.source,
                m.left,
                m.bottom,
                m.right,
                m.top,
                page.rotation.degrees()
            ));
            if let Some(c) = page.crop_box {
                out.push_str(&format!(" {} {} {} {}", c.left, c.bottom, c.right, c.top));
            }
            out.push('\n');
        }
        for bookmark in &self.bookmarks {
            let target = bookmark
                .page_number
                .map_or_else(|| "-".to_string(), |i| (i + 1).to_string());
            out.push_str(&format!(
                "bookmark {} {} {}\n",
                bookmark.level, target, bookmark.title
            ));
        }
        if let Some(title) = &self.metadata.title {
            out.push_str(&format!("title {title}\n"));
        }
        if let Some(author) = &self.metadata.author {
            out.push_str(&format!("author {author}\n"));
        }
        if self.fail_save {
            out.push_str("fail-save\n");
        }
        out.into_bytes()
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, CropError> {
        let text = std::str::from_utf8(bytes).map_err(|e| CropError::ParseError(e.to_string()))?;
        let mut doc = FakeDocument::default();

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let (keyword, rest) = line.split_once(' ').unwrap_or((line, ""));
            match keyword {
                "page" => {
                    let values: Vec<f64> = rest
                        .split_whitespace()
                        .map(str::parse)
                        .collect::<Result<_, _>>()
                        .map_err(|_| parse_error(line))?;
                    if values.len() != 6 && values.len() != 10 {
                        return Err(parse_error(line));
                    }
                    doc.pages.push(FakePage {
                        source: values[0] as usize,
                        media_box: bbox_from(&values[1..5]),
                        crop_box: (values.len() == 10).then(|| bbox_from(&values[6..10])),
                        rotation: Rotation::from_degrees(values[5] as i64),
                    });
                }
                "bookmark" => {
                    let mut parts = rest.splitn(3, ' ');
                    let level = parts
                        .next()
                        .and_then(|v| v.parse().ok())
                        .ok_or_else(|| parse_error(line))?;
                    let page_number = match parts.next() {
                        Some("-") => None,
                        Some(v) => Some(
                            v.parse::<usize>()
                                .ok()
                                .and_then(|p| p.checked_sub(1))
                                .ok_or_else(|| parse_error(line))?,
                        ),
                        None => return Err(parse_error(line)),
                    };
                    let title = parts.next().unwrap_or_default();
                    doc.bookmarks.push(Bookmark::new(title, level, page_number));
                }
                "title" => doc.metadata.title = Some(rest.to_string()),
                "author" => doc.metadata.author = Some(rest.to_string()),
                "fail-save" => doc.fail_save = true,
                _ => return Err(parse_error(line)),
            }
        }

        if doc.pages.is_empty() {
            return Err(CropError::ParseError("document has no pages".to_string()));
        }
        Ok(doc)
    }

    fn page(&self, index: usize) -> Result<&FakePage, CropError> {
        self.pages.get(index).ok_or(CropError::PageOutOfRange {
            page: index + 1,
            page_count: self.pages.len(),
        })
    }
}

pub(crate) struct FakeBackend;

impl CropBackend for FakeBackend {
    type Document = FakeDocument;
    type Error = CropError;

    fn open(bytes: &[u8]) -> Result<FakeDocument, CropError> {
        FakeDocument::parse(bytes)
    }

    fn page_count(doc: &FakeDocument) -> usize {
        doc.pages.len()
    }

    fn page_media_box(doc: &FakeDocument, index: usize) -> Result<BBox, CropError> {
        Ok(doc.page(index)?.media_box)
    }

    fn page_crop_box(doc: &FakeDocument, index: usize) -> Result<Option<BBox>, CropError> {
        Ok(doc.page(index)?.crop_box)
    }

    fn page_rotation(doc: &FakeDocument, index: usize) -> Result<Rotation, CropError> {
        Ok(doc.page(index)?.rotation)
    }

    fn document_metadata(doc: &FakeDocument) -> Result<DocumentMetadata, CropError> {
        Ok(doc.metadata.clone())
    }

    fn bookmarks(doc: &FakeDocument) -> Result<Vec<Bookmark>, CropError> {
        Ok(doc.bookmarks.clone())
    }

    fn multiply_pages(doc: &FakeDocument, copies: &[usize]) -> Result<FakeDocument, CropError> {
        let mut pages = Vec::new();
        for (i, page) in doc.pages.iter().enumerate() {
            let count = copies.get(i).copied().unwrap_or(1).max(1);
            pages.extend(std::iter::repeat_n(page.clone(), count));
        }
        Ok(FakeDocument {
            pages,
            ..doc.clone()
        })
    }

    fn set_page_boxes(doc: &mut FakeDocument, index: usize, bbox: BBox) -> Result<(), CropError> {
        let page_count = doc.pages.len();
        let page = doc.pages.get_mut(index).ok_or(CropError::PageOutOfRange {
            page: index + 1,
            page_count,
        })?;
        page.media_box = bbox;
        page.crop_box = Some(bbox);
        Ok(())
    }

    fn set_bookmarks(doc: &mut FakeDocument, bookmarks: &[Bookmark]) -> Result<(), CropError> {
        if bookmarks.len() != doc.bookmarks.len() {
            return Err(CropError::Other("outline length changed".to_string()));
        }
        doc.bookmarks = bookmarks.to_vec();
        Ok(())
    }

    fn set_document_metadata(
        doc: &mut FakeDocument,
        metadata: &DocumentMetadata,
    ) -> Result<(), CropError> {
        doc.metadata = metadata.clone();
        Ok(())
    }

    fn save(doc: &mut FakeDocument, writer: &mut dyn Write) -> Result<(), CropError> {
        if doc.fail_save {
            return Err(CropError::IoError("disk full".to_string()));
        }
        writer.write_all(&doc.to_bytes())?;
        Ok(())
    }
}
