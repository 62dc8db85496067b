//! Inbound frame decoding.
//!
//! Browser clients send frames as base64-encoded JPEG/PNG, usually wrapped
//! in a `data:image/jpeg;base64,` URL. Decode failures are explicit errors
//! that stop at the request boundary.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::RgbImage;

use crate::error::{VisionError, VisionResult};

/// Decode a base64 (optionally data-URL-prefixed) image payload into RGB.
pub fn decode_base64_frame(payload: &str) -> VisionResult<RgbImage> {
    // Strip any `data:...;base64,` prefix; bare base64 has no comma.
    let b64 = payload.rsplit(',').next().unwrap_or(payload).trim();

    let bytes = BASE64
        .decode(b64)
        .map_err(|e| VisionError::decode_failed(format!("invalid base64: {e}")))?;

    let image = image::load_from_memory(&bytes)
        .map_err(|e| VisionError::decode_failed(format!("invalid image data: {e}")))?;

    Ok(image.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageOutputFormat;
    use std::io::Cursor;

    fn png_base64() -> String {
        let img = RgbImage::from_pixel(8, 6, image::Rgb([10, 200, 30]));
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, ImageOutputFormat::Png)
            .unwrap();
        BASE64.encode(bytes.into_inner())
    }

    #[test]
    fn test_decode_bare_base64() {
        let frame = decode_base64_frame(&png_base64()).unwrap();
        assert_eq!(frame.dimensions(), (8, 6));
        assert_eq!(frame.get_pixel(0, 0).0, [10, 200, 30]);
    }

    #[test]
    fn test_decode_data_url() {
        let payload = format!("data:image/png;base64,{}", png_base64());
        let frame = decode_base64_frame(&payload).unwrap();
        assert_eq!(frame.dimensions(), (8, 6));
    }

    #[test]
    fn test_invalid_base64() {
        let err = decode_base64_frame("!!not-base64!!").unwrap_err();
        assert!(matches!(err, VisionError::DecodeFailed(_)));
    }

    #[test]
    fn test_valid_base64_invalid_image() {
        let payload = BASE64.encode(b"definitely not an image");
        let err = decode_base64_frame(&payload).unwrap_err();
        assert!(matches!(err, VisionError::DecodeFailed(_)));
    }
}
