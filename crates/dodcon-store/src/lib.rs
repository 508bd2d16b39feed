//! dodcon Batch Store
//!
//! File-based storage for the annotation pipeline.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   clean/      precontract batches (JSON array of Precontract)
//!   blackbox/   annotator output, one response per line, same file name
//!   annotated/  validated Contract artifacts, one per batch
//!   corpus/     NER training corpus
//! ```
//!
//! A batch is identified by its file name, shared between `clean/` and
//! `blackbox/`. Line N of the annotation file belongs to precontract N of the
//! batch.
//!
//! Artifacts are written once, atomically (temporary file in the target
//! directory, then rename), so concurrent batch workers never observe or
//! produce a half-written file.
//!
//! # Examples
//!
//! ```no_run
//! use dodcon_store::BatchStore;
//!
//! let store = BatchStore::open("data").unwrap();
//! for batch in store.list_annotation_batches().unwrap() {
//!     let lines = store.load_annotation_lines(&batch).unwrap();
//!     println!("{}: {} annotations", batch, lines.len());
//! }
//! ```

#![warn(missing_docs)]

mod error;
mod naming;

pub use error::StoreError;
pub use naming::{artifact_file_name, collapse_response, source_reference_suffix};

use dodcon_domain::{Contract, Precontract};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory holding precontract batches
pub const CLEAN_DIR: &str = "clean";
/// Directory holding raw annotator output
pub const BLACKBOX_DIR: &str = "blackbox";
/// Directory holding validated contract artifacts
pub const ANNOTATED_DIR: &str = "annotated";
/// Directory holding the NER corpus
pub const CORPUS_DIR: &str = "corpus";

/// Identifier of a batch: its file name, e.g. `2024-04-17_3691213.json`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatchId(String);

impl BatchId {
    /// Create a batch id from a file name
    pub fn new(file_name: impl Into<String>) -> Self {
        Self(file_name.into())
    }

    /// File name of the batch
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name without its extension
    pub fn stem(&self) -> &str {
        Path::new(&self.0)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File-based store for precontract batches, annotations and artifacts
#[derive(Debug, Clone)]
pub struct BatchStore {
    root: PathBuf,
}

impl BatchStore {
    /// Open a store rooted at `root`, creating missing directories
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let store = Self {
            root: root.as_ref().to_path_buf(),
        };
        for dir in [CLEAN_DIR, BLACKBOX_DIR, ANNOTATED_DIR, CORPUS_DIR] {
            fs::create_dir_all(store.root.join(dir))?;
        }
        debug!("Opened batch store at {}", store.root.display());
        Ok(store)
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of precontract batches
    pub fn clean_dir(&self) -> PathBuf {
        self.root.join(CLEAN_DIR)
    }

    /// Directory of annotation batches
    pub fn blackbox_dir(&self) -> PathBuf {
        self.root.join(BLACKBOX_DIR)
    }

    /// Directory of contract artifacts
    pub fn annotated_dir(&self) -> PathBuf {
        self.root.join(ANNOTATED_DIR)
    }

    /// Directory of corpus files
    pub fn corpus_dir(&self) -> PathBuf {
        self.root.join(CORPUS_DIR)
    }

    /// List annotation batches in name order, skipping hidden files
    pub fn list_annotation_batches(&self) -> Result<Vec<BatchId>, StoreError> {
        list_files(&self.blackbox_dir()).map(|names| names.into_iter().map(BatchId).collect())
    }

    /// Load the precontracts of a batch
    ///
    /// The file holds a JSON array of precontracts; a single object is read
    /// as a batch of one.
    pub fn load_precontracts(&self, batch: &BatchId) -> Result<Vec<Precontract>, StoreError> {
        let path = self.clean_dir().join(batch.as_str());
        if !path.is_file() {
            return Err(StoreError::NotFound(format!(
                "no precontract batch at {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&contents)?;
        let precontracts = match value {
            Value::Array(_) => serde_json::from_value(value)?,
            Value::Object(_) => vec![serde_json::from_value(value)?],
            other => {
                return Err(StoreError::InvalidData(format!(
                    "{}: expected an array of precontracts, found {}",
                    batch, other
                )))
            }
        };
        Ok(precontracts)
    }

    /// Write a precontract batch
    pub fn save_precontracts(
        &self,
        batch: &BatchId,
        precontracts: &[Precontract],
    ) -> Result<PathBuf, StoreError> {
        let path = self.clean_dir().join(batch.as_str());
        write_json_atomic(&path, &precontracts)?;
        Ok(path)
    }

    /// Load the annotation lines of a batch
    ///
    /// Only the empty piece after the file's final newline is dropped. Every
    /// other blank line is an annotator response in its own right and is kept
    /// so the lines stay aligned with the precontracts.
    pub fn load_annotation_lines(&self, batch: &BatchId) -> Result<Vec<String>, StoreError> {
        let path = self.blackbox_dir().join(batch.as_str());
        if !path.is_file() {
            return Err(StoreError::NotFound(format!(
                "no annotation batch at {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(&path)?;
        let mut lines: Vec<String> = contents
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        if lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        Ok(lines)
    }

    /// Write annotator responses for a batch, one per line
    ///
    /// Multi-line responses are collapsed to a single line first.
    pub fn write_annotation_lines<S: AsRef<str>>(
        &self,
        batch: &BatchId,
        responses: &[S],
    ) -> Result<PathBuf, StoreError> {
        let mut contents = String::new();
        for response in responses {
            contents.push_str(&collapse_response(response.as_ref()));
            contents.push('\n');
        }

        let path = self.blackbox_dir().join(batch.as_str());
        write_atomic(&path, contents.as_bytes())?;
        Ok(path)
    }

    /// Write the contracts of a batch as one artifact
    ///
    /// The file is named after the first contract. With no contracts, the
    /// `fallback` name is used if given; otherwise nothing is written and
    /// `None` is returned.
    pub fn write_contracts(
        &self,
        contracts: &[Contract],
        fallback: Option<&BatchId>,
    ) -> Result<Option<PathBuf>, StoreError> {
        let file_name = match (contracts.first(), fallback) {
            (Some(first), _) => artifact_file_name(first),
            (None, Some(batch)) => format!("{}.json", batch.stem()),
            (None, None) => return Ok(None),
        };

        let path = self.annotated_dir().join(file_name);
        write_json_atomic(&path, &contracts)?;
        info!("Wrote {} contracts to {}", contracts.len(), path.display());
        Ok(Some(path))
    }

    /// Load every contract artifact, in file name order
    pub fn load_contracts(&self) -> Result<Vec<Contract>, StoreError> {
        let dir = self.annotated_dir();
        let mut contracts = Vec::new();
        for name in list_files(&dir)? {
            if !name.ends_with(".json") {
                continue;
            }
            let contents = fs::read_to_string(dir.join(&name))?;
            let batch: Vec<Contract> = serde_json::from_str(&contents)
                .map_err(|e| StoreError::InvalidData(format!("{}: {}", name, e)))?;
            contracts.extend(batch);
        }
        Ok(contracts)
    }

    /// Write a corpus file under `corpus/`
    pub fn write_corpus_file<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        value: &T,
    ) -> Result<PathBuf, StoreError> {
        let path = self.corpus_dir().join(file_name);
        write_json_atomic(&path, value)?;
        Ok(path)
    }

    /// Read a corpus file from `corpus/`
    pub fn read_corpus_file(&self, file_name: &str) -> Result<Value, StoreError> {
        let path = self.corpus_dir().join(file_name);
        if !path.is_file() {
            return Err(StoreError::NotFound(path.display().to_string()));
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}

/// Regular, non-hidden file names in a directory, sorted
fn list_files(dir: &Path) -> Result<Vec<String>, StoreError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// Serialize as pretty JSON and write atomically
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    write_atomic(path, &bytes)
}

/// Write bytes to a temporary file next to `path`, then rename it into place
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".dodcon-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_id_stem() {
        let batch = BatchId::new("2024-04-17_3691213.json");
        assert_eq!(batch.stem(), "2024-04-17_3691213");
        assert_eq!(batch.to_string(), "2024-04-17_3691213.json");
        assert_eq!(BatchId::new("noext").stem(), "noext");
    }

    #[test]
    fn test_open_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = BatchStore::open(dir.path()).unwrap();
        assert!(store.clean_dir().is_dir());
        assert!(store.blackbox_dir().is_dir());
        assert!(store.annotated_dir().is_dir());
        assert!(store.corpus_dir().is_dir());
    }

    #[test]
    fn test_write_atomic_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json_atomic(&path, &vec![1, 2, 3]).unwrap();
        write_json_atomic(&path, &vec![4]).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["out.json".to_string()]);

        let back: Vec<i32> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, vec![4]);
    }
}
