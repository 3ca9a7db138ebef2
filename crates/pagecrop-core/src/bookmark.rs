//! PDF bookmark / outline types.
//!
//! Provides [`Bookmark`] for entries in the document outline. Entries are
//! listed in outline traversal order (depth first), which is also the order
//! a backend uses when writing retargeted entries back.

/// A single entry in the PDF document outline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bookmark {
    /// The bookmark title text.
    pub title: String,
    /// Nesting depth (0-indexed). Top-level bookmarks have level 0.
    pub level: usize,
    /// The 0-indexed destination page number, if resolvable.
    pub page_number: Option<usize>,
    /// The y-coordinate on the destination page (top of view), if available.
    pub dest_top: Option<f64>,
}

impl Bookmark {
    /// Bookmark pointing at a 0-indexed page.
    pub fn new(title: impl Into<String>, level: usize, page_number: Option<usize>) -> Self {
        Self {
            title: title.into(),
            level,
            page_number,
            dest_top: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookmark_with_all_fields() {
        let bm = Bookmark {
            title: "Chapter 1".to_string(),
            level: 0,
            page_number: Some(0),
            dest_top: Some(792.0),
        };
        assert_eq!(bm.title, "Chapter 1");
        assert_eq!(bm.page_number, Some(0));
        assert_eq!(bm.dest_top, Some(792.0));
    }

    #[test]
    fn new_has_no_dest_top() {
        let bm = Bookmark::new("Appendix", 1, None);
        assert_eq!(bm.level, 1);
        assert!(bm.page_number.is_none());
        assert!(bm.dest_top.is_none());
    }
}
