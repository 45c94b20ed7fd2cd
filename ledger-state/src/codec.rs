//! Entity codec
//!
//! Pure serialization helpers between entity values and the JSON documents
//! held in the key-value store. Decode failures mean the stored bytes are
//! damaged and surface as [`Error::Corrupt`]; they are never retried.

use crate::error::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};

/// Serialize an entity to its stored byte form
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| Error::Corrupt(format!("encode: {}", e)))
}

/// Deserialize stored bytes into an entity
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| Error::Corrupt(format!("decode: {}", e)))
}
