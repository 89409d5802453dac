//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types. Structured
//! values cross the boundary as JSON strings; allocations come in as
//! plain dicts.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use serde::{de::DeserializeOwned, Serialize};

use crate::models::Allocation;

/// Convert a `{instrument_id: percent}` dict into an allocation
///
/// # Errors
/// Returns PyValueError if a key is not a string or a value is not a number.
pub fn allocation_from_py(dict: &Bound<'_, PyDict>) -> PyResult<Allocation> {
    let mut allocation = Allocation::new();
    for (key, value) in dict.iter() {
        let id: String = key
            .extract()
            .map_err(|_| PyValueError::new_err("Allocation keys must be instrument ids"))?;
        let share: f64 = value.extract().map_err(|_| {
            PyValueError::new_err(format!("Allocation for '{}' must be a number", id))
        })?;
        allocation.set(id, share);
    }
    Ok(allocation)
}

/// Parse a JSON document, mapping failures to ValueError
pub fn from_json<T: DeserializeOwned>(json: &str, what: &str) -> PyResult<T> {
    serde_json::from_str(json)
        .map_err(|e| PyValueError::new_err(format!("Invalid {} JSON: {}", what, e)))
}

/// Serialize a value to JSON, mapping failures to ValueError
pub fn to_json<T: Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value)
        .map_err(|e| PyValueError::new_err(format!("Serialization failed: {}", e)))
}
