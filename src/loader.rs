//! Config discovery and parsing.
//!
//! Walks a directory tree for `.json`/`.jsonc` files and turns each into a
//! list of `(new item id, ItemConfig)` pairs. A bad file is logged and
//! skipped; it never stops the scan.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use json_comments::StripComments;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::record::{validate_new_id, ItemConfig, RecordError};

/// Error type for config file loading
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record '{id}' in {path}: {source}")]
    InvalidRecord {
        path: PathBuf,
        id: String,
        #[source]
        source: RecordError,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

fn is_config_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json") || e.eq_ignore_ascii_case("jsonc"))
            .unwrap_or(false)
}

/// Every `.json`/`.jsonc` file under `dir`, sorted by path.
///
/// With `recursive` unset only the files directly inside `dir` are returned.
///
/// # Errors
/// [`LoadError::DirectoryNotFound`] when `dir` does not exist.
pub fn discover_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut walker = walkdir::WalkDir::new(dir).follow_links(false);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if is_config_file(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    Ok(files)
}

/// Read one JSON or JSONC file into `T`. Comments are stripped first.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(StripComments::new(bytes.as_slice())).map_err(|source| {
        LoadError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Read every config file in `dir` as a `T`, logging and skipping bad files.
///
/// A missing directory yields an empty list.
pub fn load_all<T: DeserializeOwned>(dir: &Path, recursive: bool) -> Vec<(PathBuf, T)> {
    let files = match discover_files(dir, recursive) {
        Ok(files) => files,
        Err(LoadError::DirectoryNotFound(_)) => return Vec::new(),
        Err(e) => {
            tracing::error!("{}", e);
            return Vec::new();
        }
    };

    files
        .into_iter()
        .filter_map(|path| match read_json_file::<T>(&path) {
            Ok(value) => {
                tracing::debug!("Loaded file: {}", path.display());
                Some((path, value))
            }
            Err(e) => {
                tracing::error!("{}", e);
                None
            }
        })
        .collect()
}

/// Whether a parsed file is one record rather than an id → record map.
fn is_single_record(value: &JsonValue) -> bool {
    value
        .as_object()
        .map(|obj| obj.contains_key("itemTplToClone"))
        .unwrap_or(false)
}

/// Parse one item config file.
///
/// The file is either a map `id → record` or a single record carrying its
/// own `id`. Every record is validated; one bad record fails the file.
pub fn parse_record_file(path: &Path) -> Result<Vec<(String, ItemConfig)>, LoadError> {
    let value: JsonValue = read_json_file(path)?;
    let parse_err = |source: serde_json::Error| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let records: Vec<(String, ItemConfig)> = if is_single_record(&value) {
        let record: ItemConfig = serde_json::from_value(value).map_err(parse_err)?;
        let id = record.id.clone().ok_or_else(|| LoadError::InvalidRecord {
            path: path.to_path_buf(),
            id: String::new(),
            source: RecordError::MissingId,
        })?;
        vec![(id, record)]
    } else {
        let map: IndexMap<String, ItemConfig> = serde_json::from_value(value).map_err(parse_err)?;
        map.into_iter().collect()
    };

    for (id, record) in &records {
        validate_new_id(id)
            .and_then(|_| record.validate())
            .map_err(|source| LoadError::InvalidRecord {
                path: path.to_path_buf(),
                id: id.clone(),
                source,
            })?;
    }

    Ok(records)
}

/// Load every item record under `dir` in file order.
///
/// Ids must be unique across the whole directory: the first occurrence
/// wins and later ones are dropped with a warning.
///
/// # Example
/// ```ignore
/// use graft::loader::load_records;
///
/// for (id, record) in load_records(Path::new("db/CustomItems"))? {
///     println!("{} clones {}", id, record.item_tpl_to_clone);
/// }
/// ```
pub fn load_records(dir: &Path) -> Result<Vec<(String, ItemConfig)>, LoadError> {
    let files = discover_files(dir, true)?;
    if files.is_empty() {
        tracing::warn!("No JSON config files found in {}", dir.display());
    }

    let mut seen: IndexMap<String, PathBuf> = IndexMap::new();
    let mut records = Vec::new();

    for path in files {
        let parsed = match parse_record_file(&path) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!("Skipping file: {}", e);
                continue;
            }
        };

        for (id, record) in parsed {
            if let Some(first) = seen.get(&id) {
                tracing::warn!(
                    "Duplicate item id {} in {} (first defined in {}), skipping",
                    id,
                    path.display(),
                    first.display()
                );
                continue;
            }
            seen.insert(id.clone(), path.clone());
            records.push((id, record));
        }
    }

    Ok(records)
}
