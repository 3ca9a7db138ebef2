//! Document-level metadata types.
//!
//! Provides [`DocumentMetadata`] for the PDF document information
//! dictionary. The cropper carries it from the source to the output.

/// Document-level metadata from the PDF /Info dictionary.
///
/// All fields are optional since PDFs may omit the /Info dictionary entirely
/// or include only a subset of fields. Dates are raw PDF date strings
/// (`D:YYYYMMDDHHmmSSOHH'mm'`).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    /// Application that created the original document.
    pub creator: Option<String>,
    /// Application that produced the PDF.
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
}

impl DocumentMetadata {
    /// Returns `true` if all metadata fields are `None`.
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// Present fields as `(info dictionary key, value)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Keywords", &self.keywords),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
            ("CreationDate", &self.creation_date),
            ("ModDate", &self.mod_date),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metadata_is_empty() {
        let meta = DocumentMetadata::default();
        assert!(meta.is_empty());
        assert_eq!(meta.entries().count(), 0);
    }

    #[test]
    fn entries_lists_present_fields_in_dictionary_order() {
        let meta = DocumentMetadata {
            title: Some("Test Document".to_string()),
            producer: Some("pagecrop".to_string()),
            ..Default::default()
        };
        assert!(!meta.is_empty());
        let entries: Vec<_> = meta.entries().collect();
        assert_eq!(
            entries,
            vec![("Title", "Test Document"), ("Producer", "pagecrop")]
        );
    }
}
