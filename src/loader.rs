//! This module provides the `PatternLoader` struct, responsible for loading pattern documents
//! and NFA designs from JSON, either from strings or from files on disk.

use crate::analyzer::analyze;
use crate::compiler::compile;
use crate::design::NfaDesign;
use crate::pattern::Pattern;
use crate::types::{RegulaError, DOCUMENT_EXTENSION, MAX_DOCUMENT_SIZE};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A named pattern together with strings it is known to accept and reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDocument {
    /// The name of the pattern.
    pub name: String,
    /// A human-readable explanation of the language the pattern describes.
    #[serde(default)]
    pub description: String,
    /// The pattern tree.
    pub pattern: Pattern,
    /// Strings the pattern must match.
    #[serde(default)]
    pub matches: Vec<String>,
    /// Strings the pattern must not match.
    #[serde(default)]
    pub rejects: Vec<String>,
}

impl PatternDocument {
    /// Compiles the document's pattern.
    pub fn design(&self) -> NfaDesign {
        compile(&self.pattern)
    }

    /// Checks the document's `matches` and `rejects` examples against its compiled pattern.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if every example behaves as declared.
    /// * `Err(RegulaError::ValidationError)` naming the first example that does not.
    pub fn verify(&self) -> Result<(), RegulaError> {
        let design = self.design();

        if let Some(input) = self.matches.iter().find(|input| !design.accepts(input)) {
            return Err(RegulaError::ValidationError(format!(
                "{} should match {input:?}",
                self.pattern.inspect()
            )));
        }

        if let Some(input) = self.rejects.iter().find(|input| design.accepts(input)) {
            return Err(RegulaError::ValidationError(format!(
                "{} should not match {input:?}",
                self.pattern.inspect()
            )));
        }

        Ok(())
    }
}

/// `PatternLoader` is a utility struct for loading pattern documents and NFA designs.
pub struct PatternLoader;

impl PatternLoader {
    /// Loads a single pattern document from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(PatternDocument)` if the file is read and decoded successfully.
    /// * `Err(RegulaError::FileError)` if the file cannot be read or is too large.
    /// * `Err(RegulaError::ParseError)` if the content is not a valid document.
    pub fn load_document(path: &Path) -> Result<PatternDocument, RegulaError> {
        let content = Self::read(path)?;
        let document = Self::load_document_from_string(&content)?;

        debug!("loaded pattern {:?} from {}", document.name, path.display());

        Ok(document)
    }

    /// Decodes a pattern document from JSON.
    pub fn load_document_from_string(content: &str) -> Result<PatternDocument, RegulaError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads every pattern document (`.json` extension) in a directory.
    ///
    /// Directories and files with other extensions are skipped. Each remaining file yields
    /// one entry, successful or not.
    pub fn load_documents(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, PatternDocument), RegulaError>> {
        if !directory.exists() {
            return vec![Err(RegulaError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(RegulaError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        return Some(Err(RegulaError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                if path.is_dir() || path.extension().is_none_or(|ext| ext != DOCUMENT_EXTENSION) {
                    return None;
                }

                Some(Self::load_document(&path).map(|document| (path, document)))
            })
            .collect()
    }

    /// Loads a hand-written NFA design from JSON and analyzes it.
    ///
    /// # Returns
    ///
    /// * `Ok(NfaDesign)` if the design decodes and passes analysis.
    /// * `Err(RegulaError::ParseError)` if the JSON is malformed.
    /// * `Err(RegulaError::ValidationError)` if the analyzer finds a problem.
    pub fn load_design_from_string(content: &str) -> Result<NfaDesign, RegulaError> {
        let design: NfaDesign = serde_json::from_str(content)?;
        analyze(&design)?;
        Ok(design)
    }

    /// Loads a hand-written NFA design from a file and analyzes it.
    pub fn load_design(path: &Path) -> Result<NfaDesign, RegulaError> {
        Self::load_design_from_string(&Self::read(path)?)
    }

    fn read(path: &Path) -> Result<String, RegulaError> {
        let content = fs::read_to_string(path).map_err(|e| {
            RegulaError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        if content.len() > MAX_DOCUMENT_SIZE {
            return Err(RegulaError::FileError(format!(
                "File {} exceeds the maximum document size of {} bytes",
                path.display(),
                MAX_DOCUMENT_SIZE
            )));
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const VALID_DOCUMENT: &str = r#"{
        "name": "Ends with a",
        "pattern": {"Concatenate": [
            {"Repeat": {"Choose": [{"Literal": "a"}, {"Literal": "b"}]}},
            {"Literal": "a"}
        ]},
        "matches": ["a", "ba"],
        "rejects": ["", "ab"]
    }"#;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_valid_document() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "ends-with-a.json", VALID_DOCUMENT);

        let document = PatternLoader::load_document(&path).unwrap();

        assert_eq!(document.name, "Ends with a");
        assert_eq!(document.description, "");
        assert_eq!(document.pattern.to_text(), "(a|b)*a");
        assert!(document.verify().is_ok());
    }

    #[test]
    fn test_load_invalid_document() {
        let result = PatternLoader::load_document_from_string("This is not a valid document");

        assert!(matches!(result, Err(RegulaError::ParseError(_))));
    }

    #[test]
    fn test_load_document_with_long_literal() {
        let result = PatternLoader::load_document_from_string(
            r#"{"name": "Bad", "pattern": {"Literal": "abc"}}"#,
        );

        let error = result.unwrap_err();
        assert!(matches!(error, RegulaError::ParseError(_)));
        assert!(error.to_string().contains("\"abc\""));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = PatternLoader::load_document(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(RegulaError::FileError(_))));
    }

    #[test]
    fn test_load_oversized_file() {
        let dir = tempdir().unwrap();
        let content = format!("{}{}", VALID_DOCUMENT, " ".repeat(MAX_DOCUMENT_SIZE));
        let path = write_file(dir.path(), "large.json", &content);

        let error = PatternLoader::load_document(&path).unwrap_err();
        assert!(matches!(error, RegulaError::FileError(_)));
        assert!(error.to_string().contains("maximum document size"));
    }

    #[test]
    fn test_verify_reports_wrong_example() {
        let mut document = PatternLoader::load_document_from_string(VALID_DOCUMENT).unwrap();
        document.matches.push("bb".to_string());

        let error = document.verify().unwrap_err();
        assert_eq!(
            error.to_string(),
            "Validation error: /(a|b)*a/ should match \"bb\""
        );
    }

    #[test]
    fn test_load_documents_from_directory() {
        let dir = tempdir().unwrap();

        write_file(dir.path(), "valid.json", VALID_DOCUMENT);
        write_file(dir.path(), "invalid.json", "{\"name\": 1}");
        write_file(dir.path(), "ignored.txt", "This file should be ignored");

        let results = PatternLoader::load_documents(dir.path());

        // We should have 2 results: 1 success and 1 error
        assert_eq!(results.len(), 2);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }

    #[test]
    fn test_load_documents_from_missing_directory() {
        let dir = tempdir().unwrap();
        let results = PatternLoader::load_documents(&dir.path().join("nope"));

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(RegulaError::FileError(_))));
    }

    #[test]
    fn test_load_design() {
        let dir = tempdir().unwrap();
        let content = r#"{
            "start_state": 0,
            "accept_states": [1],
            "rulebook": [
                {"from": 0, "symbol": {"Char": "a"}, "to": 1},
                {"from": 1, "symbol": "Epsilon", "to": 0}
            ]
        }"#;
        let path = write_file(dir.path(), "design.json", content);

        let design = PatternLoader::load_design(&path).unwrap();

        assert!(design.accepts("aaa"));
        assert!(!design.accepts(""));
    }

    #[test]
    fn test_load_design_runs_analysis() {
        let content = r#"{
            "start_state": 0,
            "accept_states": [1],
            "rulebook": [
                {"from": 0, "symbol": {"Char": "a"}, "to": 1},
                {"from": 2, "symbol": {"Char": "b"}, "to": 1}
            ]
        }"#;

        let error = PatternLoader::load_design_from_string(content).unwrap_err();
        assert_eq!(
            error,
            RegulaError::ValidationError("Unreachable states detected: q2".to_string())
        );
    }
}
