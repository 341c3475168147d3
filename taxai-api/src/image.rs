//! Image payload decoding
//!
//! Requests carry the image as base64 text. Pixel decoding and
//! normalization belong to the inference backend; this module only checks
//! that the payload decodes to a recognizable image format.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Image payload errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("No image data provided")]
    Empty,

    #[error("Image data is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("Image data is not a recognized image format")]
    NotAnImage,
}

/// Decoded image bytes with their sniffed MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    mime_type: &'static str,
}

impl ImagePayload {
    /// Decode a base64 string, optionally prefixed with a `data:` URL header
    ///
    /// Whitespace anywhere in the payload is ignored, so line-wrapped
    /// (MIME style) base64 is accepted.
    pub fn from_base64(encoded: &str) -> Result<Self, ImageError> {
        let encoded = match encoded.split_once(',') {
            Some((header, data)) if header.starts_with("data:") => data,
            _ => encoded,
        };
        let cleaned: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if cleaned.is_empty() {
            return Err(ImageError::Empty);
        }

        let bytes = STANDARD
            .decode(&cleaned)
            .map_err(|e| ImageError::InvalidBase64(e.to_string()))?;

        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }

        let kind = infer::get(&bytes).ok_or(ImageError::NotAnImage)?;
        if !matches!(kind.matcher_type(), infer::MatcherType::Image) {
            return Err(ImageError::NotAnImage);
        }

        Ok(Self {
            bytes,
            mime_type: kind.mime_type(),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    #[test]
    fn test_decode_png() {
        let encoded = STANDARD.encode(PNG_HEADER);
        let image = ImagePayload::from_base64(&encoded).expect("png payload");
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.bytes(), PNG_HEADER);
    }

    #[test]
    fn test_decode_data_url() {
        let encoded = format!("data:image/jpeg;base64,{}", STANDARD.encode(JPEG_HEADER));
        let image = ImagePayload::from_base64(&encoded).expect("jpeg payload");
        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.len(), JPEG_HEADER.len());
    }

    #[test]
    fn test_decode_wrapped_base64() {
        let mut raw = PNG_HEADER.to_vec();
        raw.resize(120, 0xAB);
        let encoded = STANDARD.encode(&raw);
        assert!(encoded.len() > 76);

        let wrapped = encoded
            .as_bytes()
            .chunks(76)
            .map(|line| std::str::from_utf8(line).expect("ascii"))
            .collect::<Vec<_>>()
            .join("\r\n");
        let wrapped = format!("{}\n", wrapped);

        let image = ImagePayload::from_base64(&wrapped).expect("wrapped payload");
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.bytes(), raw.as_slice());

        let data_url = format!("data:image/png;base64,\n{}", wrapped);
        let image = ImagePayload::from_base64(&data_url).expect("wrapped data url");
        assert_eq!(image.len(), 120);
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(ImagePayload::from_base64(""), Err(ImageError::Empty));
        assert_eq!(ImagePayload::from_base64("   "), Err(ImageError::Empty));
        assert_eq!(ImagePayload::from_bytes(Vec::new()), Err(ImageError::Empty));
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            ImagePayload::from_base64("not base64!!"),
            Err(ImageError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_not_an_image() {
        let encoded = STANDARD.encode(b"just some text, definitely not pixels");
        assert_eq!(ImagePayload::from_base64(&encoded), Err(ImageError::NotAnImage));
    }
}
