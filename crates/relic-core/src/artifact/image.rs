//! Image sniffing for uploaded artifact photos.
//!
//! Only JPEG and PNG are accepted. The format is detected from magic bytes
//! and the pixel dimensions are read from the PNG `IHDR` chunk or the JPEG
//! start-of-frame marker; the pixel data itself is never decoded.

use serde::{Deserialize, Serialize};

use crate::error::{RelicError, RelicResult};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Supported image container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
        }
    }

    /// Detect the format from the leading bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&PNG_SIGNATURE) {
            Some(Self::Png)
        } else if bytes.starts_with(&JPEG_SOI) {
            Some(Self::Jpeg)
        } else {
            None
        }
    }
}

/// Format and pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    /// Inspect raw image bytes.
    pub fn inspect(bytes: &[u8]) -> RelicResult<Self> {
        let format = ImageFormat::sniff(bytes).ok_or_else(|| {
            RelicError::unsupported_image("expected a JPEG or PNG file")
        })?;

        let (width, height) = match format {
            ImageFormat::Png => png_dimensions(bytes)?,
            ImageFormat::Jpeg => jpeg_dimensions(bytes)?,
        };

        if width == 0 || height == 0 {
            return Err(RelicError::unsupported_image("image has zero width or height"));
        }

        Ok(Self { format, width, height })
    }

    pub fn orientation(&self) -> &'static str {
        use std::cmp::Ordering;
        match self.width.cmp(&self.height) {
            Ordering::Greater => "landscape",
            Ordering::Less => "portrait",
            Ordering::Equal => "square",
        }
    }

    pub fn megapixels(&self) -> f64 {
        (self.width as f64 * self.height as f64) / 1_000_000.0
    }
}

fn png_dimensions(bytes: &[u8]) -> RelicResult<(u32, u32)> {
    // signature(8) + length(4) + "IHDR"(4) + width(4) + height(4)
    if bytes.len() < 24 || &bytes[12..16] != b"IHDR" {
        return Err(RelicError::unsupported_image("truncated PNG header"));
    }
    Ok((read_u32_be(&bytes[16..20]), read_u32_be(&bytes[20..24])))
}

fn jpeg_dimensions(bytes: &[u8]) -> RelicResult<(u32, u32)> {
    let mut pos = 2;

    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return Err(RelicError::unsupported_image("corrupt JPEG marker stream"));
        }
        let marker = bytes[pos + 1];

        // Fill bytes and standalone markers carry no length field.
        if marker == 0xFF {
            pos += 1;
            continue;
        }
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            pos += 2;
            continue;
        }
        if marker == 0xD9 || marker == 0xDA {
            break;
        }

        let len = read_u16_be(&bytes[pos + 2..pos + 4]) as usize;
        if len < 2 {
            return Err(RelicError::unsupported_image("corrupt JPEG segment length"));
        }

        if is_start_of_frame(marker) {
            // length(2) + precision(1) + height(2) + width(2)
            if pos + 9 > bytes.len() {
                break;
            }
            let height = read_u16_be(&bytes[pos + 5..pos + 7]) as u32;
            let width = read_u16_be(&bytes[pos + 7..pos + 9]) as u32;
            return Ok((width, height));
        }

        pos += 2 + len;
    }

    Err(RelicError::unsupported_image("JPEG has no frame header"))
}

/// SOF0..SOF15, excluding DHT (C4), JPG (C8) and DAC (CC).
fn is_start_of_frame(marker: u8) -> bool {
    (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC)
}

fn read_u32_be(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

fn read_u16_be(b: &[u8]) -> u16 {
    u16::from_be_bytes([b[0], b[1]])
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Minimal PNG header (no image data) with the given size.
    pub fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = super::PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 2, 0, 0, 0]);
        bytes
    }

    /// Minimal JPEG: SOI, an APP0 segment, then a baseline SOF0.
    pub fn jpeg_header(width: u16, height: u16) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8];
        bytes.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        bytes.extend_from_slice(b"JFIF\0");
        bytes.extend_from_slice(&[1, 1, 0, 0, 1, 0, 1, 0, 0]);
        bytes.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&[3, 1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1]);
        bytes.extend_from_slice(&[0xFF, 0xD9]);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_png_dimensions() {
        let info = ImageInfo::inspect(&png_header(640, 480)).unwrap();
        assert_eq!(info.format, ImageFormat::Png);
        assert_eq!((info.width, info.height), (640, 480));
        assert_eq!(info.orientation(), "landscape");
    }

    #[test]
    fn test_jpeg_dimensions_after_app0() {
        let info = ImageInfo::inspect(&jpeg_header(300, 1200)).unwrap();
        assert_eq!(info.format, ImageFormat::Jpeg);
        assert_eq!((info.width, info.height), (300, 1200));
        assert_eq!(info.orientation(), "portrait");
        assert_eq!(info.format.media_type(), "image/jpeg");
    }

    #[test]
    fn test_gif_is_rejected() {
        let err = ImageInfo::inspect(b"GIF89a\x01\x00\x01\x00").unwrap_err();
        assert!(matches!(err, RelicError::UnsupportedImage(_)));
    }

    #[test]
    fn test_truncated_png_is_rejected() {
        let bytes = png_header(10, 10);
        assert!(ImageInfo::inspect(&bytes[..14]).is_err());
    }

    #[test]
    fn test_jpeg_without_frame_is_rejected() {
        assert!(ImageInfo::inspect(&[0xFF, 0xD8, 0xFF, 0xD9]).is_err());
    }

    #[test]
    fn test_zero_sized_png_is_rejected() {
        assert!(ImageInfo::inspect(&png_header(0, 5)).is_err());
    }
}
