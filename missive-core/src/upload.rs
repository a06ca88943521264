/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;
use tracing::debug;

use crate::error::UploadError;

/// Formats mail clients can be expected to display inline.
const ACCEPTED: [ImageFormat; 5] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::WebP,
    ImageFormat::Bmp,
];

/// Encodes uploaded bytes as a `data:` URI, sniffing the MIME type from
/// the content rather than trusting the file name.
pub fn image_data_uri(bytes: &[u8]) -> Result<String, UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }

    let format = image::guess_format(bytes).map_err(|_| UploadError::UnsupportedFormat)?;
    if !ACCEPTED.contains(&format) {
        return Err(UploadError::UnsupportedFormat);
    }

    let mime = format.to_mime_type();
    debug!(mime, bytes = bytes.len(), "encoded image upload");
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0x0d];

    #[test]
    fn png_bytes_become_a_png_data_uri() {
        let uri = image_data_uri(PNG_SIGNATURE).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uri.ends_with(&STANDARD.encode(PNG_SIGNATURE)));
    }

    #[test]
    fn gif_is_sniffed_from_the_header() {
        let uri = image_data_uri(b"GIF89a\x01\x00\x01\x00").unwrap();
        assert!(uri.starts_with("data:image/gif;base64,"));
    }

    #[test]
    fn empty_and_unknown_input_is_rejected() {
        assert_eq!(image_data_uri(&[]), Err(UploadError::Empty));
        assert_eq!(image_data_uri(b"plain text, not an image"), Err(UploadError::UnsupportedFormat));
    }
}
