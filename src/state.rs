//! Parameter state blob for host persistence.
//!
//! The blob is the JSON form of a [`ParamSnapshot`]: a format version plus a
//! map from stable parameter key to plain value.

use mbcomp_core::ParamSnapshot;

use crate::{Error, Result};

/// Serialize `snapshot` into a host state blob.
pub fn encode(snapshot: &ParamSnapshot) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(snapshot)?)
}

/// Parse a host state blob. Does not touch any parameters.
pub fn decode(blob: &[u8]) -> Result<ParamSnapshot> {
    if blob.is_empty() {
        return Err(Error::Core(mbcomp_core::Error::InvalidState(
            "empty state blob".to_string(),
        )));
    }
    Ok(serde_json::from_slice(blob)?)
}
