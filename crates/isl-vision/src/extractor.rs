//! Landmark fusion into per-frame feature vectors.
//!
//! Runs the three trackers independently on the same frame and concatenates
//! their outputs in fixed order: hands (126), face (1404), pose (33).
//!
//! Presence policy: the pose is required. Hands or a face without a pose are
//! not accepted as evidence of a person, so such frames yield no vector at
//! all. Missing hands or face on a frame that does have a pose are
//! zero-filled.

use image::RgbImage;
use tracing::trace;

use isl_core::{FeatureVector, HAND_BLOCK_LEN};

use crate::error::VisionResult;
use crate::trackers::{FaceTracker, HandDetection, HandTracker, PoseTracker};

/// Fuses hand, face, and pose tracker outputs into [`FeatureVector`]s.
pub struct LandmarkExtractor {
    hands: Box<dyn HandTracker>,
    face: Box<dyn FaceTracker>,
    pose: Box<dyn PoseTracker>,
}

impl LandmarkExtractor {
    pub fn new(
        hands: Box<dyn HandTracker>,
        face: Box<dyn FaceTracker>,
        pose: Box<dyn PoseTracker>,
    ) -> Self {
        Self { hands, face, pose }
    }

    /// Extract one feature vector from a frame, or `None` when no person is
    /// present.
    pub fn extract(&self, frame: &RgbImage) -> VisionResult<Option<FeatureVector>> {
        let hand_detections = self.hands.detect(frame)?;
        let face_detection = self.face.detect(frame)?;
        let pose_detection = self.pose.detect(frame)?;

        let Some(pose) = pose_detection else {
            trace!("no pose detected, dropping frame");
            return Ok(None);
        };

        let hands_block = if hand_detections.is_empty() {
            None
        } else {
            Some(hands_block(hand_detections))
        };
        let face_block = face_detection.map(|f| f.flatten());

        let vector = FeatureVector::from_blocks(
            hands_block.as_deref(),
            face_block.as_deref(),
            &pose.upper_body(),
        )?;
        Ok(Some(vector))
    }
}

/// Order detections into the two canonical hand slots and flatten.
///
/// Detections are sorted by handedness (left, right, unlabeled) with a
/// stable sort, filled into slots in that order, and trailing empty slots
/// zero-filled. A lone hand therefore always occupies the first slot, which
/// is the layout the trained models expect.
fn hands_block(mut detections: Vec<HandDetection>) -> Vec<f32> {
    detections.sort_by_key(|d| d.handedness.slot_rank());

    let mut block = Vec::with_capacity(HAND_BLOCK_LEN);
    for slot in 0..2 {
        match detections.get(slot) {
            Some(hand) => block.extend(hand.flatten()),
            None => block.resize(block.len() + 21 * 3, 0.0),
        }
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trackers::{FaceDetection, Handedness, Point3, PoseDetection};
    use isl_core::{FACE_BLOCK_LEN, FEATURE_LEN};

    struct MockHands(Vec<HandDetection>);
    struct MockFace(Option<FaceDetection>);
    struct MockPose(Option<PoseDetection>);

    impl HandTracker for MockHands {
        fn detect(&self, _: &RgbImage) -> VisionResult<Vec<HandDetection>> {
            Ok(self.0.clone())
        }
    }

    impl FaceTracker for MockFace {
        fn detect(&self, _: &RgbImage) -> VisionResult<Option<FaceDetection>> {
            Ok(self.0.clone())
        }
    }

    impl PoseTracker for MockPose {
        fn detect(&self, _: &RgbImage) -> VisionResult<Option<PoseDetection>> {
            Ok(self.0.clone())
        }
    }

    fn points(n: usize, fill: f32) -> Vec<Point3> {
        vec![
            Point3 {
                x: fill,
                y: fill,
                z: fill
            };
            n
        ]
    }

    fn hand(handedness: Handedness, fill: f32) -> HandDetection {
        HandDetection {
            points: points(21, fill),
            handedness,
            score: 0.9,
        }
    }

    fn pose(fill: f32) -> PoseDetection {
        PoseDetection {
            points: points(33, fill),
            score: 0.9,
        }
    }

    fn face(fill: f32) -> FaceDetection {
        FaceDetection {
            points: points(468, fill),
            score: 0.9,
        }
    }

    fn extractor(
        hands: Vec<HandDetection>,
        f: Option<FaceDetection>,
        p: Option<PoseDetection>,
    ) -> LandmarkExtractor {
        LandmarkExtractor::new(
            Box::new(MockHands(hands)),
            Box::new(MockFace(f)),
            Box::new(MockPose(p)),
        )
    }

    fn frame() -> RgbImage {
        RgbImage::new(4, 4)
    }

    #[test]
    fn test_no_pose_means_no_person() {
        // Hands and face alone must not count as a person.
        let ex = extractor(
            vec![hand(Handedness::Left, 0.5)],
            Some(face(0.5)),
            None,
        );
        assert!(ex.extract(&frame()).unwrap().is_none());
    }

    #[test]
    fn test_pose_only_zero_fills_hands_and_face() {
        let ex = extractor(vec![], None, Some(pose(0.7)));
        let v = ex.extract(&frame()).unwrap().unwrap();

        assert_eq!(v.as_slice().len(), FEATURE_LEN);
        assert!(v.as_slice()[..HAND_BLOCK_LEN + FACE_BLOCK_LEN]
            .iter()
            .all(|x| *x == 0.0));
        assert!(v.as_slice()[HAND_BLOCK_LEN + FACE_BLOCK_LEN..]
            .iter()
            .all(|x| *x == 0.7));
    }

    #[test]
    fn test_hands_ordered_left_first() {
        let ex = extractor(
            vec![hand(Handedness::Right, 2.0), hand(Handedness::Left, 1.0)],
            None,
            Some(pose(0.0)),
        );
        let v = ex.extract(&frame()).unwrap().unwrap();

        // Left hand fills slot 0 despite being detected second.
        assert_eq!(v.as_slice()[0], 1.0);
        assert_eq!(v.as_slice()[63], 2.0);
    }

    #[test]
    fn test_lone_hand_takes_first_slot() {
        let ex = extractor(vec![hand(Handedness::Right, 3.0)], None, Some(pose(0.0)));
        let v = ex.extract(&frame()).unwrap().unwrap();

        assert_eq!(v.as_slice()[0], 3.0);
        assert!(v.as_slice()[63..HAND_BLOCK_LEN].iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_unlabeled_hands_keep_positional_order() {
        let ex = extractor(
            vec![hand(Handedness::Unknown, 5.0), hand(Handedness::Unknown, 6.0)],
            None,
            Some(pose(0.0)),
        );
        let v = ex.extract(&frame()).unwrap().unwrap();

        assert_eq!(v.as_slice()[0], 5.0);
        assert_eq!(v.as_slice()[63], 6.0);
    }

    #[test]
    fn test_full_detection_block_layout() {
        let ex = extractor(
            vec![hand(Handedness::Left, 1.0)],
            Some(face(2.0)),
            Some(pose(3.0)),
        );
        let v = ex.extract(&frame()).unwrap().unwrap();

        assert_eq!(v.as_slice()[0], 1.0);
        assert_eq!(v.as_slice()[HAND_BLOCK_LEN], 2.0);
        assert_eq!(v.as_slice()[HAND_BLOCK_LEN + FACE_BLOCK_LEN], 3.0);
    }
}
