use crate::loader::{PatternDocument, PatternLoader};
use crate::types::RegulaError;
use log::warn;

use std::sync::RwLock;

// Default embedded pattern documents
const DOCUMENT_TEXTS: [&str; 6] = [
    include_str!("../patterns/ends-with-a.json"),
    include_str!("../patterns/even-binary.json"),
    include_str!("../patterns/repeated-ab.json"),
    include_str!("../patterns/ab-or-a-repeated.json"),
    include_str!("../patterns/signed-unary.json"),
    include_str!("../patterns/nested-star.json"),
];

lazy_static::lazy_static! {
    pub static ref DOCUMENTS: RwLock<Vec<CatalogEntry>> = RwLock::new(Vec::new());
}

/// A decoded catalog document together with the JSON it was decoded from.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub document: PatternDocument,
    pub text: &'static str,
}

/// Decodes `texts`, skipping any that fail to parse. Every entry keeps its own source text.
fn decode(texts: &[&'static str]) -> Vec<CatalogEntry> {
    texts
        .iter()
        .filter_map(|&text| match PatternLoader::load_document_from_string(text) {
            Ok(document) => Some(CatalogEntry { document, text }),
            Err(e) => {
                warn!("Failed to parse embedded pattern document: {e}");
                None
            }
        })
        .collect()
}

pub struct PatternCatalog;

impl PatternCatalog {
    /// Decode the embedded documents into the shared catalog, unless that already happened.
    pub fn load() -> Result<(), RegulaError> {
        let mut write_guard = DOCUMENTS
            .write()
            .map_err(|_| RegulaError::FileError("Failed to acquire write lock".to_string()))?;

        if !write_guard.is_empty() {
            return Ok(());
        }

        *write_guard = decode(&DOCUMENT_TEXTS);

        Ok(())
    }

    /// Get the number of available documents
    pub fn get_document_count() -> usize {
        let _ = Self::load();

        DOCUMENTS.read().map(|documents| documents.len()).unwrap_or(0)
    }

    /// Get a document by its index
    pub fn get_document_by_index(index: usize) -> Result<PatternDocument, RegulaError> {
        let _ = Self::load();

        DOCUMENTS
            .read()
            .map_err(|_| RegulaError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .map(|entry| entry.document.clone())
            .ok_or_else(|| {
                RegulaError::ValidationError(format!("Document index {} out of range", index))
            })
    }

    /// Get a document by its name
    pub fn get_document_by_name(name: &str) -> Result<PatternDocument, RegulaError> {
        let _ = Self::load();

        DOCUMENTS
            .read()
            .map_err(|_| RegulaError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .map(|entry| &entry.document)
            .find(|document| document.name == name)
            .cloned()
            .ok_or_else(|| RegulaError::ValidationError(format!("Pattern '{}' not found", name)))
    }

    /// List all document names
    pub fn list_document_names() -> Vec<String> {
        let _ = Self::load();

        DOCUMENTS
            .read()
            .map(|documents| {
                documents
                    .iter()
                    .map(|entry| entry.document.name.clone())
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get information about a document by its index
    pub fn get_document_info(index: usize) -> Result<DocumentInfo, RegulaError> {
        let document = Self::get_document_by_index(index)?;
        let design = document.design();

        Ok(DocumentInfo {
            index,
            name: document.name.clone(),
            text: document.pattern.to_text(),
            state_count: design.state_count(),
            rule_count: design.rule_count(),
        })
    }

    /// Search for documents by name
    pub fn search_documents(query: &str) -> Vec<usize> {
        let _ = Self::load();
        let query = query.to_lowercase();

        DOCUMENTS
            .read()
            .map(|documents| {
                documents
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.document.name.to_lowercase().contains(&query))
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get the original JSON of a document by its index
    pub fn get_document_text_by_index(index: usize) -> Result<&'static str, RegulaError> {
        let _ = Self::load();

        DOCUMENTS
            .read()
            .map_err(|_| RegulaError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .map(|entry| entry.text)
            .ok_or_else(|| {
                RegulaError::ValidationError(format!("Document text index {} out of range", index))
            })
    }
}

#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub index: usize,
    pub name: String,
    pub text: String,
    pub state_count: usize,
    pub rule_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;

    #[test]
    fn test_catalog_initialization() {
        let result = PatternCatalog::load();
        assert!(result.is_ok());

        assert_eq!(PatternCatalog::get_document_count(), DOCUMENT_TEXTS.len());
    }

    #[test]
    fn test_load_is_idempotent() {
        PatternCatalog::load().unwrap();
        PatternCatalog::load().unwrap();

        assert_eq!(PatternCatalog::get_document_count(), DOCUMENT_TEXTS.len());
    }

    #[test]
    fn test_all_documents_hold() {
        let count = PatternCatalog::get_document_count();
        for i in 0..count {
            let document = PatternCatalog::get_document_by_index(i).unwrap();
            assert!(
                document.verify().is_ok(),
                "Document '{}' has a failing example: {:?}",
                document.name,
                document.verify()
            );
            assert!(analyze(&document.design()).is_ok());
        }
    }

    #[test]
    fn test_document_names() {
        let names = PatternCatalog::list_document_names();
        assert!(names.contains(&"Ends with a".to_string()));
        assert!(names.contains(&"Even binary numbers".to_string()));
        assert!(names.contains(&"Repeated ab".to_string()));
        assert!(names.contains(&"Nested star".to_string()));
    }

    #[test]
    fn test_get_document_by_index() {
        let document = PatternCatalog::get_document_by_index(0);
        assert!(document.is_ok());

        let result = PatternCatalog::get_document_by_index(999);
        assert!(matches!(result, Err(RegulaError::ValidationError(_))));
    }

    #[test]
    fn test_get_document_by_name() {
        let document = PatternCatalog::get_document_by_name("Ends with a").unwrap();
        assert_eq!(document.pattern.to_text(), "(a|b)*a");

        let result = PatternCatalog::get_document_by_name("Nonexistent");
        assert!(result.is_err());
    }

    #[test]
    fn test_get_document_info() {
        let info = PatternCatalog::get_document_info(0).unwrap();

        assert_eq!(info.index, 0);
        assert_eq!(info.name, "Ends with a");
        assert_eq!(info.text, "(a|b)*a");
        // a, b: 2 each; choice: 1; star: 1; final a: 2
        assert_eq!(info.state_count, 8);
        // 2 literals + 2 entries + 2 loops + 1 star entry + 1 literal + 3 links
        assert_eq!(info.rule_count, 11);

        assert!(PatternCatalog::get_document_info(999).is_err());
    }

    #[test]
    fn test_search_documents() {
        let results = PatternCatalog::search_documents("REPEATED");
        assert_eq!(results.len(), 1);

        let results = PatternCatalog::search_documents("a");
        assert!(results.len() >= 3);

        let results = PatternCatalog::search_documents("nonexistent");
        assert!(results.is_empty());
    }

    #[test]
    fn test_get_document_text_by_index() {
        let text = PatternCatalog::get_document_text_by_index(0).unwrap();
        assert!(text.contains("\"Ends with a\""));

        assert!(PatternCatalog::get_document_text_by_index(999).is_err());
    }

    #[test]
    fn test_text_stays_with_document_when_one_fails() {
        let texts = [DOCUMENT_TEXTS[0], "{ not json", DOCUMENT_TEXTS[2]];
        let entries = decode(&texts);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].document.name, "Repeated ab");
        assert_eq!(entries[1].text, DOCUMENT_TEXTS[2]);
    }

    #[test]
    fn test_text_matches_document_at_every_index() {
        for i in 0..PatternCatalog::get_document_count() {
            let document = PatternCatalog::get_document_by_index(i).unwrap();
            let text = PatternCatalog::get_document_text_by_index(i).unwrap();

            assert!(text.contains(&format!("{:?}", document.name)));
        }
    }
}
