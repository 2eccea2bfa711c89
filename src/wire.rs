//! JSON wire encoding for API models.
//!
//! Every request and response body crosses this boundary. Decoding failures
//! are reported as [`DecodeError`] rather than raw serde errors, so callers
//! can tell a missing field from a type mismatch or a truncated body.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DecodeError, Result};

/// JSON marshaling for a model type.
///
/// Unset optional fields are omitted on encode and wire field names are used
/// throughout, so `from_wire(&m.to_wire()?)` yields a value equal to `m`.
pub trait Wire: Serialize + DeserializeOwned {
    /// Encode the model as its JSON wire representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be represented as JSON.
    fn to_wire(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a model from its JSON wire representation.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if a required field is missing, a field has
    /// the wrong type, or the bytes are not valid JSON.
    fn from_wire(bytes: &[u8]) -> core::result::Result<Self, DecodeError> {
        decode(bytes)
    }
}

/// Decode any deserializable type from JSON bytes.
pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> core::result::Result<T, DecodeError> {
    serde_json::from_slice(bytes).map_err(DecodeError::from)
}
