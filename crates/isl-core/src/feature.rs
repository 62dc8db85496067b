//! Per-frame landmark feature vectors.
//!
//! A [`FeatureVector`] is the fixed-order concatenation of three blocks:
//! hands (126), face (1404), upper-body pose (33). Missing optional blocks
//! are zero-filled so every slot keeps its positional meaning. Vectors are
//! immutable once built, and any length mismatch is rejected up front rather
//! than silently padded or truncated.

use thiserror::Error;

use crate::{FACE_BLOCK_LEN, FEATURE_LEN, HAND_BLOCK_LEN, POSE_BLOCK_LEN};

/// Errors from feature vector construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeatureError {
    #[error("expected {expected} feature values, got {actual}")]
    BadLength { expected: usize, actual: usize },

    #[error("expected {expected} values in {block} block, got {actual}")]
    BadBlockLength {
        block: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// One frame's worth of landmark features, always exactly 1563 values.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// Build a vector from the three landmark blocks.
    ///
    /// The pose block is mandatory (a frame with no pose never reaches this
    /// point). Absent hands or face blocks are zero-filled. Each provided
    /// block must have its exact fixed length.
    pub fn from_blocks(
        hands: Option<&[f32]>,
        face: Option<&[f32]>,
        pose: &[f32],
    ) -> Result<Self, FeatureError> {
        check_block("hands", hands, HAND_BLOCK_LEN)?;
        check_block("face", face, FACE_BLOCK_LEN)?;
        check_block("pose", Some(pose), POSE_BLOCK_LEN)?;

        let mut values = Vec::with_capacity(FEATURE_LEN);
        match hands {
            Some(block) => values.extend_from_slice(block),
            None => values.resize(HAND_BLOCK_LEN, 0.0),
        }
        match face {
            Some(block) => values.extend_from_slice(block),
            None => values.resize(HAND_BLOCK_LEN + FACE_BLOCK_LEN, 0.0),
        }
        values.extend_from_slice(pose);

        debug_assert_eq!(values.len(), FEATURE_LEN);
        Ok(Self(values))
    }

    /// Validate and wrap an already-flattened vector (e.g. from a request
    /// body or a sample file). Fails with the expected and actual lengths on
    /// any mismatch.
    pub fn from_raw(values: Vec<f32>) -> Result<Self, FeatureError> {
        if values.len() != FEATURE_LEN {
            return Err(FeatureError::BadLength {
                expected: FEATURE_LEN,
                actual: values.len(),
            });
        }
        Ok(Self(values))
    }

    /// An all-zero vector, used for padding short batch sequences.
    pub fn zeroed() -> Self {
        Self(vec![0.0; FEATURE_LEN])
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }

    /// True when every value is zero (a padding frame).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

fn check_block(
    block: &'static str,
    values: Option<&[f32]>,
    expected: usize,
) -> Result<(), FeatureError> {
    match values {
        Some(v) if v.len() != expected => Err(FeatureError::BadBlockLength {
            block,
            expected,
            actual: v.len(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_blocks_full() {
        let hands = vec![0.1; HAND_BLOCK_LEN];
        let face = vec![0.2; FACE_BLOCK_LEN];
        let pose = vec![0.3; POSE_BLOCK_LEN];

        let v = FeatureVector::from_blocks(Some(&hands), Some(&face), &pose).unwrap();
        assert_eq!(v.as_slice().len(), FEATURE_LEN);
        assert_eq!(v.as_slice()[0], 0.1);
        assert_eq!(v.as_slice()[HAND_BLOCK_LEN], 0.2);
        assert_eq!(v.as_slice()[HAND_BLOCK_LEN + FACE_BLOCK_LEN], 0.3);
    }

    #[test]
    fn test_absent_blocks_zero_filled() {
        let pose = vec![0.5; POSE_BLOCK_LEN];
        let v = FeatureVector::from_blocks(None, None, &pose).unwrap();

        assert_eq!(v.as_slice().len(), FEATURE_LEN);
        assert!(v.as_slice()[..HAND_BLOCK_LEN + FACE_BLOCK_LEN]
            .iter()
            .all(|x| *x == 0.0));
        assert!(v.as_slice()[HAND_BLOCK_LEN + FACE_BLOCK_LEN..]
            .iter()
            .all(|x| *x == 0.5));
    }

    #[test]
    fn test_bad_block_length_rejected() {
        let pose = vec![0.0; POSE_BLOCK_LEN - 1];
        let err = FeatureVector::from_blocks(None, None, &pose).unwrap_err();
        assert_eq!(
            err,
            FeatureError::BadBlockLength {
                block: "pose",
                expected: POSE_BLOCK_LEN,
                actual: POSE_BLOCK_LEN - 1,
            }
        );
    }

    #[test]
    fn test_from_raw_validates_length() {
        assert!(FeatureVector::from_raw(vec![0.0; FEATURE_LEN]).is_ok());

        let err = FeatureVector::from_raw(vec![0.0; 100]).unwrap_err();
        assert_eq!(
            err,
            FeatureError::BadLength {
                expected: FEATURE_LEN,
                actual: 100,
            }
        );
    }

    #[test]
    fn test_zeroed_is_zero() {
        assert!(FeatureVector::zeroed().is_zero());

        let pose = vec![1.0; POSE_BLOCK_LEN];
        let v = FeatureVector::from_blocks(None, None, &pose).unwrap();
        assert!(!v.is_zero());
    }
}
