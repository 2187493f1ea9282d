//! Decoding of images submitted as base64 data URIs.
//!
//! Clients send images inline in JSON as `data:image/<ext>;base64,<payload>`.

use base64::Engine as _;
use serde_json::json;

use crate::error::AppError;

/// An image decoded from a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Normalized file extension, without the dot.
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Maps a data URI subtype to the file extension it is stored with.
fn extension_for(subtype: &str) -> Option<&'static str> {
    match subtype.to_ascii_lowercase().as_str() {
        "png" => Some("png"),
        "jpeg" | "jpg" => Some("jpg"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        _ => None,
    }
}

/// Decodes a `data:image/<ext>;base64,<payload>` URI.
///
/// `field` names the request field in the error details.
///
/// # Errors
///
/// Returns [`AppError::Validation`] keyed by `field` if the value is not a
/// data URI, the format is not supported, or the payload is not valid
/// base64 or is empty.
pub fn decode_data_uri(field: &str, value: &str) -> Result<DecodedImage, AppError> {
    let invalid = || AppError::field(field, "Expected an image as a base64 data URI");

    let rest = value.trim().strip_prefix("data:image/").ok_or_else(invalid)?;
    let (subtype, payload) = rest.split_once(";base64,").ok_or_else(invalid)?;

    let extension = extension_for(subtype).ok_or_else(|| {
        AppError::bad_request(
            "Unsupported image format",
            json!({ field: [format!("Unsupported image format: {}", subtype)] }),
        )
    })?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| AppError::field(field, "Image payload is not valid base64"))?;

    if bytes.is_empty() {
        return Err(AppError::field(field, "Image payload is empty"));
    }

    Ok(DecodedImage { extension, bytes })
}
