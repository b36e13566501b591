//! YAML codec boundary for the configuration overrides blob.
//!
//! The string form is an external contract: server-known fields must
//! round-trip unchanged. An absent or empty document decodes to the
//! all-unset default; a malformed document is a fatal [`CodecError`].

use tracing::trace;

use crate::error::CodecError;

use super::ConfigurationOverrides;

/// Decodes an overrides blob into its structured form.
///
/// An absent string is treated as an empty document, never as an error.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] when the document is malformed. The
/// caller must abort the comparison rather than proceed with a guessed
/// partial structure.
pub fn decode(raw: Option<&str>) -> Result<ConfigurationOverrides, CodecError> {
    let raw = raw.unwrap_or("");
    trace!(len = raw.len(), "decoding configuration overrides");

    // An empty document parses as YAML null, hence the Option layer.
    let decoded: Option<ConfigurationOverrides> =
        serde_yaml::from_str(raw).map_err(|e| CodecError::Decode {
            message: e.to_string(),
        })?;

    Ok(decoded.unwrap_or_default())
}

/// Encodes structured overrides back into their string form.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] when serialization fails.
pub fn encode(overrides: &ConfigurationOverrides) -> Result<String, CodecError> {
    serde_yaml::to_string(overrides).map_err(|e| CodecError::Encode {
        message: e.to_string(),
    })
}
