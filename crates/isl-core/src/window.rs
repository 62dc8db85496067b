//! Sequence windowing.
//!
//! Two variants over the same fixed window length:
//! - [`SequenceWindow`]: a streaming ring buffer that feeds the classifier
//!   one saturated window at a time during live inference.
//! - [`slide_windows`]: batch windowing over a whole video's worth of frames
//!   at dataset-building time.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use tracing::warn;

use crate::feature::FeatureVector;
use crate::SEQUENCE_LEN;

/// Fixed-capacity rolling window of per-frame feature vectors, oldest first.
///
/// Pushing at capacity evicts the oldest vector. A classifier request is
/// only meaningful once the window is saturated.
#[derive(Debug, Clone)]
pub struct SequenceWindow {
    frames: VecDeque<FeatureVector>,
    capacity: usize,
}

impl SequenceWindow {
    /// Window with the standard sequence length of 30 frames.
    pub fn new() -> Self {
        Self::with_capacity(SEQUENCE_LEN)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append the newest vector, evicting the oldest when full.
    pub fn push(&mut self, frame: FeatureVector) {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once exactly `capacity` vectors are buffered.
    pub fn is_saturated(&self) -> bool {
        self.frames.len() == self.capacity
    }

    /// Oldest-first iteration over the buffered vectors.
    pub fn frames(&self) -> impl Iterator<Item = &FeatureVector> {
        self.frames.iter()
    }

    /// Flatten the window oldest-first into one `len * 1563` buffer for the
    /// classifier input tensor.
    pub fn flattened(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.frames.len() * crate::FEATURE_LEN);
        for frame in &self.frames {
            out.extend_from_slice(frame.as_slice());
        }
        out
    }
}

impl Default for SequenceWindow {
    fn default() -> Self {
        Self::new()
    }
}

/// Slide a fixed-length window across an ordered frame list.
///
/// Inputs shorter than the window length are zero-padded up to one full
/// window (with a warning; short clips are usable, just degraded). Otherwise
/// a window is emitted every `stride` frames and the final window must fit
/// entirely in bounds, giving `floor((n - len) / stride) + 1` windows.
pub fn slide_windows(frames: &[FeatureVector], stride: NonZeroUsize) -> Vec<Vec<FeatureVector>> {
    slide_windows_of(frames, SEQUENCE_LEN, stride)
}

fn slide_windows_of(
    frames: &[FeatureVector],
    len: usize,
    stride: NonZeroUsize,
) -> Vec<Vec<FeatureVector>> {
    if frames.len() < len {
        warn!(
            frames = frames.len(),
            window = len,
            "short sequence, zero-padding to a single window"
        );
        let mut window = frames.to_vec();
        window.resize_with(len, FeatureVector::zeroed);
        return vec![window];
    }

    let stride = stride.get();
    let mut windows = Vec::with_capacity((frames.len() - len) / stride + 1);
    let mut start = 0;
    while start + len <= frames.len() {
        windows.push(frames[start..start + len].to_vec());
        start += stride;
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FEATURE_LEN;

    fn frame(fill: f32) -> FeatureVector {
        FeatureVector::from_raw(vec![fill; FEATURE_LEN]).unwrap()
    }

    fn frames(n: usize) -> Vec<FeatureVector> {
        (0..n).map(|i| frame(i as f32)).collect()
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut window = SequenceWindow::with_capacity(3);
        for i in 0..5 {
            window.push(frame(i as f32));
        }

        assert!(window.is_saturated());
        let first: Vec<f32> = window.frames().map(|f| f.as_slice()[0]).collect();
        assert_eq!(first, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_window_saturation() {
        let mut window = SequenceWindow::new();
        assert!(!window.is_saturated());

        for i in 0..SEQUENCE_LEN {
            assert_eq!(window.len(), i);
            window.push(frame(0.0));
        }
        assert!(window.is_saturated());

        window.push(frame(1.0));
        assert_eq!(window.len(), SEQUENCE_LEN);
    }

    #[test]
    fn test_flattened_is_oldest_first() {
        let mut window = SequenceWindow::with_capacity(2);
        window.push(frame(1.0));
        window.push(frame(2.0));

        let flat = window.flattened();
        assert_eq!(flat.len(), 2 * FEATURE_LEN);
        assert_eq!(flat[0], 1.0);
        assert_eq!(flat[FEATURE_LEN], 2.0);
    }

    #[test]
    fn test_slide_window_count_formula() {
        let stride = NonZeroUsize::new(10).unwrap();
        // n=90, len=30, stride=10 -> floor((90-30)/10)+1 = 7
        let windows = slide_windows(&frames(90), stride);
        assert_eq!(windows.len(), 7);
        assert!(windows.iter().all(|w| w.len() == SEQUENCE_LEN));

        // Last window must fit entirely: starts at 60, ends at 89.
        assert_eq!(windows[6][0].as_slice()[0], 60.0);
        assert_eq!(windows[6][29].as_slice()[0], 89.0);
    }

    #[test]
    fn test_slide_exact_fit() {
        let stride = NonZeroUsize::new(10).unwrap();
        let windows = slide_windows(&frames(SEQUENCE_LEN), stride);
        assert_eq!(windows.len(), 1);
    }

    #[test]
    fn test_slide_no_partial_trailing_window() {
        let stride = NonZeroUsize::new(7).unwrap();
        // n=40, len=30, stride=7 -> starts 0 and 7 only (14 would overrun)
        let windows = slide_windows(&frames(40), stride);
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[1][0].as_slice()[0], 7.0);
    }

    #[test]
    fn test_short_input_zero_padded_single_window() {
        let stride = NonZeroUsize::new(10).unwrap();
        let windows = slide_windows(&frames(12), stride);

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].len(), SEQUENCE_LEN);
        assert!(!windows[0][11].is_zero());
        assert!(windows[0][12..].iter().all(|f| f.is_zero()));
    }
}
