//! LNURL-pay metadata array (LUD-06) and its description hash.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::ImageFormat;
use invoice_core::DescriptionHash;
use sha2::{Digest, Sha256};

use crate::error::MetadataError;

/// An icon normalized to base64-encoded PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    png_base64: String,
}

impl Icon {
    /// Decode any supported raster format (PNG, JPEG, GIF) and re-encode it as PNG.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetadataError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| MetadataError::InvalidIcon(e.to_string()))?;

        let mut png = Vec::new();
        decoded
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| MetadataError::Encode(e.to_string()))?;

        Ok(Self {
            png_base64: BASE64.encode(&png),
        })
    }

    pub fn png_base64(&self) -> &str {
        &self.png_base64
    }
}

/// The canonical metadata array of one identity together with its hash.
///
/// `as_str()` is served verbatim at discovery and `hash()` is the SHA-256 of
/// exactly those bytes. Neither is ever recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayMetadata {
    json: String,
    hash: DescriptionHash,
}

impl PayMetadata {
    /// Build the metadata array from raw icon bytes.
    pub fn build(
        identifier: &str,
        short_description: &str,
        icon_bytes: &[u8],
    ) -> Result<Self, MetadataError> {
        let icon = Icon::from_bytes(icon_bytes)?;
        Ok(Self::from_icon(identifier, short_description, &icon))
    }

    /// Build the metadata array from an already normalized icon.
    ///
    /// Entry order is `text/identifier`, `text/plain`, `image/png;base64`.
    pub fn from_icon(identifier: &str, short_description: &str, icon: &Icon) -> Self {
        let entries: [[&str; 2]; 3] = [
            ["text/identifier", identifier],
            ["text/plain", short_description],
            ["image/png;base64", icon.png_base64()],
        ];
        // An array of string pairs always serializes.
        let json = serde_json::to_string(&entries).unwrap_or_default();
        let hash: DescriptionHash = Sha256::digest(json.as_bytes()).into();

        Self { json, hash }
    }

    /// The serialized array, as sent in the `metadata` field.
    pub fn as_str(&self) -> &str {
        &self.json
    }

    /// SHA-256 of [`as_str`](Self::as_str).
    pub fn hash(&self) -> DescriptionHash {
        self.hash
    }

    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}
