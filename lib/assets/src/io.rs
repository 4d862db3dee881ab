//! File I/O helpers.
//!
//! Reads fail with [`IoError::NotFound`] when the path does not exist.
//! Writes create missing parent directories first. Nothing here is atomic:
//! a crash mid-write can leave a partial file.

use crate::error::IoError;
use rootcause::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};
use std::fs;
use std::path::Path;

/// One CSV row: column name to value, in header order.
pub type Record = Map<String, JsonValue>;

fn ensure_exists(path: &Path) -> Result<(), Report<IoError>> {
    if path.exists() {
        Ok(())
    } else {
        Err(IoError::NotFound {
            path: path.to_path_buf(),
        }
        .into())
    }
}

fn write_failed(path: &Path, reason: impl ToString) -> IoError {
    IoError::WriteFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn read_failed(path: &Path, reason: impl ToString) -> IoError {
    IoError::ReadFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Creates `dir` and all of its missing parents.
///
/// # Errors
///
/// Returns `WriteFailed` if a directory cannot be created.
pub fn create_dir(dir: &Path) -> Result<(), Report<IoError>> {
    fs::create_dir_all(dir).map_err(|e| write_failed(dir, e))?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), Report<IoError>> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => create_dir(parent),
        None => Ok(()),
    }
}

/// Reads a UTF-8 text file.
///
/// # Errors
///
/// Returns `NotFound` if the file does not exist, `ReadFailed` otherwise.
pub fn read_text(path: &Path) -> Result<String, Report<IoError>> {
    ensure_exists(path)?;
    Ok(fs::read_to_string(path).map_err(|e| read_failed(path, e))?)
}

/// Writes a UTF-8 text file.
///
/// # Errors
///
/// Returns `WriteFailed` if the file or its directories cannot be written.
pub fn write_text(path: &Path, content: &str) -> Result<(), Report<IoError>> {
    write_bytes(path, content.as_bytes())
}

/// Reads a file as raw bytes.
///
/// # Errors
///
/// Returns `NotFound` if the file does not exist, `ReadFailed` otherwise.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, Report<IoError>> {
    ensure_exists(path)?;
    Ok(fs::read(path).map_err(|e| read_failed(path, e))?)
}

/// Writes raw bytes to a file.
///
/// # Errors
///
/// Returns `WriteFailed` if the file or its directories cannot be written.
pub fn write_bytes(path: &Path, data: &[u8]) -> Result<(), Report<IoError>> {
    ensure_parent(path)?;
    fs::write(path, data).map_err(|e| write_failed(path, e))?;
    Ok(())
}

/// Reads a CSV file with a header row.
///
/// Every value is a JSON string. Short rows get `null` for the missing
/// trailing columns.
///
/// # Errors
///
/// Returns `NotFound` if the file does not exist and `InvalidCsv` if it
/// cannot be parsed.
pub fn read_rows(path: &Path) -> Result<Vec<Record>, Report<IoError>> {
    ensure_exists(path)?;
    let invalid = |e: csv::Error| IoError::InvalidCsv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(invalid)?;
    let headers = reader.headers().map_err(invalid)?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(invalid)?;
        let row = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = record
                    .get(i)
                    .map_or(JsonValue::Null, |v| JsonValue::String(v.to_string()));
                (header.to_string(), value)
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn cell(value: Option<&JsonValue>) -> String {
    match value {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Writes records as CSV with a header row.
///
/// Columns default to the first record's keys. Keys missing from a record
/// are written empty; keys not listed as columns are dropped. Writing no
/// records does nothing, not even create the file.
///
/// # Errors
///
/// Returns `WriteFailed` if the file cannot be written.
pub fn write_rows(
    path: &Path,
    rows: &[Record],
    fieldnames: Option<&[&str]>,
) -> Result<(), Report<IoError>> {
    let Some(first) = rows.first() else {
        return Ok(());
    };
    let columns: Vec<&str> = match fieldnames {
        Some(names) => names.to_vec(),
        None => first.keys().map(String::as_str).collect(),
    };

    ensure_parent(path)?;
    let failed = |e: csv::Error| write_failed(path, e);
    let mut writer = csv::Writer::from_path(path).map_err(failed)?;
    writer.write_record(&columns).map_err(failed)?;
    for row in rows {
        writer
            .write_record(columns.iter().map(|c| cell(row.get(*c))))
            .map_err(failed)?;
    }
    writer.flush().map_err(|e| write_failed(path, e))?;
    Ok(())
}

/// Reads and decodes a JSON file.
///
/// # Errors
///
/// Returns `NotFound` if the file does not exist and `InvalidJson` if it
/// does not decode into `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Report<IoError>> {
    let text = read_text(path)?;
    Ok(serde_json::from_str(&text).map_err(|e| IoError::InvalidJson {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?)
}

/// Encodes `value` as pretty-printed JSON and writes it.
///
/// # Errors
///
/// Returns `InvalidJson` if encoding fails and `WriteFailed` if the file
/// cannot be written.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), Report<IoError>> {
    let text = serde_json::to_string_pretty(value).map_err(|e| IoError::InvalidJson {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    write_text(path, &text)
}
