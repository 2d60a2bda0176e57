use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{CandidateId, CandidateRecord};

const BUNDLED_VENDORS: &str = include_str!("../../data/vendor_database.json");

/// Failures raised while loading reference data. Any of these blocks evaluation.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid reference data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} contains no entries")]
    Empty(&'static str),
    #[error("duplicate candidate id '{0}'")]
    DuplicateCandidate(String),
    #[error("duplicate question id '{0}'")]
    DuplicateQuestion(String),
    #[error("question id '{0}' does not start with a known category prefix (s, f, q)")]
    UnknownCategory(String),
    #[error("question '{0}' declares no options")]
    EmptyOptions(String),
    #[error("question '{question}' repeats option '{option}'")]
    DuplicateOption { question: String, option: String },
    #[error("question '{question}' has an invalid range: {detail}")]
    InvalidRange { question: String, detail: String },
}

#[derive(Debug, Deserialize)]
struct VendorDocument {
    vendors: Vec<CandidateRecord>,
}

/// Immutable set of candidates every evaluation starts from.
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    candidates: Vec<CandidateRecord>,
}

impl ReferenceCatalog {
    pub fn new(candidates: Vec<CandidateRecord>) -> Result<Self, CatalogError> {
        if candidates.is_empty() {
            return Err(CatalogError::Empty("vendor catalog"));
        }

        let mut seen = HashSet::new();
        for candidate in &candidates {
            if !seen.insert(candidate.id.as_str()) {
                return Err(CatalogError::DuplicateCandidate(candidate.id.0.clone()));
            }
        }

        Ok(Self { candidates })
    }

    /// Vendor dataset shipped with the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_reader(BUNDLED_VENDORS.as_bytes())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: VendorDocument = serde_json::from_reader(reader)?;
        Self::new(document.vendors)
    }

    pub fn candidates(&self) -> &[CandidateRecord] {
        &self.candidates
    }

    pub fn get(&self, id: &CandidateId) -> Option<&CandidateRecord> {
        self.candidates.iter().find(|candidate| &candidate.id == id)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const MINIMAL: &str = r#"{
        "vendors": [
            {
                "id": "duckdb",
                "name": "DuckDB",
                "category": "Query Engine",
                "vendor_type": "open_source",
                "typical_annual_cost_range": "$0 (infrastructure only)",
                "capabilities": {
                    "operational_complexity": "low",
                    "team_size_required": "lean",
                    "deployment_models": ["on-prem", "cloud"],
                    "single_node_only": true
                }
            }
        ]
    }"#;

    #[test]
    fn bundled_catalog_has_unique_ids() {
        let catalog = ReferenceCatalog::bundled().expect("bundled vendors load");
        assert!(catalog.len() >= 10);
        assert!(catalog.get(&CandidateId("duckdb".to_string())).is_some());
    }

    #[test]
    fn reads_catalog_from_reader() {
        let catalog = ReferenceCatalog::from_reader(Cursor::new(MINIMAL)).expect("parses");
        let duckdb = &catalog.candidates()[0];
        assert_eq!(duckdb.name, "DuckDB");
        assert!(duckdb.capabilities.single_node_only);
        assert!(duckdb.website.is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut records = ReferenceCatalog::from_reader(Cursor::new(MINIMAL))
            .expect("parses")
            .candidates()
            .to_vec();
        records.push(records[0].clone());

        let err = ReferenceCatalog::new(records).expect_err("duplicates rejected");
        assert!(matches!(err, CatalogError::DuplicateCandidate(id) if id == "duckdb"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ReferenceCatalog::from_path("/nonexistent/vendors.json").expect_err("missing");
        assert!(err.to_string().contains("/nonexistent/vendors.json"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = ReferenceCatalog::from_reader(Cursor::new(r#"{ "vendors": [] }"#))
            .expect_err("empty rejected");
        assert!(matches!(err, CatalogError::Empty(_)));
    }
}
