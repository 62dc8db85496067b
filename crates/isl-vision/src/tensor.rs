//! Input tensor packing for ONNX Runtime sessions.

use image::imageops::FilterType;
use image::RgbImage;
use ort::value::{Tensor, Value};

use isl_core::FEATURE_LEN;

use crate::error::{VisionError, VisionResult};

/// Resize a frame to `size x size` and pack it as a `(1, 3, size, size)`
/// CHW tensor normalized to `[-1, 1]`, the convention the landmark models
/// are exported with.
pub fn rgb_to_chw_tensor(frame: &RgbImage, size: u32) -> VisionResult<Value> {
    let resized = image::imageops::resize(frame, size, size, FilterType::Triangle);
    let (w, h) = (size as usize, size as usize);

    let mut chw = Vec::with_capacity(3 * h * w);
    // HWC -> CHW
    for c in 0..3 {
        for y in 0..h {
            for x in 0..w {
                let v = resized.get_pixel(x as u32, y as u32).0[c] as f32 / 255.0;
                chw.push(v * 2.0 - 1.0);
            }
        }
    }

    let shape = vec![1usize, 3, h, w];
    Tensor::from_array((shape, chw.into_boxed_slice()))
        .map(Value::from)
        .map_err(|e| VisionError::detection_failed(format!("ORT input tensor: {e}")))
}

/// Pack an oldest-first flattened window into a `(1, frames, 1563)` tensor
/// for the sequence classifier.
pub fn sequence_tensor(flat: Vec<f32>, frames: usize) -> VisionResult<Value> {
    if flat.len() != frames * FEATURE_LEN {
        return Err(VisionError::classification_failed(format!(
            "sequence buffer holds {} values, expected {} frames x {}",
            flat.len(),
            frames,
            FEATURE_LEN
        )));
    }

    let shape = vec![1usize, frames, FEATURE_LEN];
    Tensor::from_array((shape, flat.into_boxed_slice()))
        .map(Value::from)
        .map_err(|e| VisionError::classification_failed(format!("ORT input tensor: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_tensor_rejects_wrong_size() {
        let err = sequence_tensor(vec![0.0; 10], 30).unwrap_err();
        assert!(matches!(err, VisionError::ClassificationFailed(_)));
    }

    #[test]
    fn test_sequence_tensor_accepts_full_window() {
        let flat = vec![0.0; 30 * FEATURE_LEN];
        assert!(sequence_tensor(flat, 30).is_ok());
    }

    #[test]
    fn test_chw_tensor_from_frame() {
        let frame = RgbImage::from_pixel(4, 4, image::Rgb([255, 0, 128]));
        assert!(rgb_to_chw_tensor(&frame, 8).is_ok());
    }
}
