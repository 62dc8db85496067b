//! Majority-vote prediction smoothing.
//!
//! Raw per-window classifier outputs flicker between neighboring signs. The
//! smoother keeps a short history of confidently predicted class indices and
//! reports the majority class, unless the current raw prediction is so much
//! more confident that the history looks stale.

use std::collections::VecDeque;

/// Bounded history capacity for accepted class indices.
pub const HISTORY_LEN: usize = 5;

/// How much higher the raw confidence must be than the smoothed confidence
/// before a sudden detection overrides the history.
pub const OVERRIDE_MARGIN: f32 = 0.15;

/// A smoothed (or raw, before the history fills) classifier prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Class index into the label map.
    pub class: usize,
    /// Probability the current output assigns to `class`.
    pub confidence: f32,
}

/// Confidence-gated majority-vote smoother over recent predictions.
///
/// Only predictions at or above the configured threshold enter the history,
/// so low-confidence noise never corrupts future votes; the raw prediction
/// is still returned to the caller for display either way.
#[derive(Debug, Clone)]
pub struct PredictionSmoother {
    history: VecDeque<usize>,
    capacity: usize,
    threshold: f32,
    margin: f32,
}

impl PredictionSmoother {
    pub fn new(threshold: f32) -> Self {
        Self::with_params(threshold, HISTORY_LEN, OVERRIDE_MARGIN)
    }

    pub fn with_params(threshold: f32, capacity: usize, margin: f32) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            threshold,
            margin,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Feed one raw probability vector and get the prediction to report.
    ///
    /// Returns `None` only for an empty probability vector.
    pub fn smooth(&mut self, probs: &[f32]) -> Option<Prediction> {
        let (raw_class, raw_conf) = argmax(probs)?;

        if raw_conf >= self.threshold {
            if self.history.len() == self.capacity {
                self.history.pop_front();
            }
            self.history.push_back(raw_class);
        }

        if self.history.len() == self.capacity {
            let majority = majority_class(self.history.iter().copied());
            let smoothed_conf = probs.get(majority).copied().unwrap_or(0.0);

            if raw_conf > smoothed_conf + self.margin {
                // A sudden high-confidence detection outranks stale history.
                return Some(Prediction {
                    class: raw_class,
                    confidence: raw_conf,
                });
            }
            return Some(Prediction {
                class: majority,
                confidence: smoothed_conf,
            });
        }

        Some(Prediction {
            class: raw_class,
            confidence: raw_conf,
        })
    }

    /// Drop all accepted history (e.g. when a stream restarts).
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

/// The arg-max class and its probability, unsmoothed.
pub fn top_prediction(probs: &[f32]) -> Option<Prediction> {
    argmax(probs).map(|(class, confidence)| Prediction { class, confidence })
}

fn argmax(probs: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &p) in probs.iter().enumerate() {
        match best {
            Some((_, bp)) if p <= bp => {}
            _ => best = Some((idx, p)),
        }
    }
    best
}

/// Majority class across the history. Ties go to the lowest class index so
/// the result is deterministic regardless of insertion order.
fn majority_class(history: impl Iterator<Item = usize>) -> usize {
    let mut counts: std::collections::BTreeMap<usize, usize> = std::collections::BTreeMap::new();
    for class in history {
        *counts.entry(class).or_insert(0) += 1;
    }

    let mut best_class = 0;
    let mut best_count = 0;
    for (class, count) in counts {
        if count > best_count {
            best_class = class;
            best_count = count;
        }
    }
    best_class
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probs_for(class: usize, confidence: f32, num_classes: usize) -> Vec<f32> {
        let rest = (1.0 - confidence) / (num_classes - 1) as f32;
        let mut p = vec![rest; num_classes];
        p[class] = confidence;
        p
    }

    #[test]
    fn test_identical_predictions_pass_through() {
        let mut smoother = PredictionSmoother::new(0.6);
        let probs = probs_for(2, 0.9, 4);

        for _ in 0..HISTORY_LEN {
            let p = smoother.smooth(&probs).unwrap();
            assert_eq!(p.class, 2);
            assert!((p.confidence - 0.9).abs() < 1e-6);
        }
    }

    #[test]
    fn test_high_confidence_override() {
        let mut smoother = PredictionSmoother::new(0.6);

        // Fill history with class 1 at 0.7.
        for _ in 0..HISTORY_LEN {
            smoother.smooth(&probs_for(1, 0.7, 4));
        }

        // Class 3 at 0.95; smoothed class 1 now scores ~0.016, so the raw
        // confidence clears the 0.15 margin and overrides.
        let p = smoother.smooth(&probs_for(3, 0.95, 4)).unwrap();
        assert_eq!(p.class, 3);
        assert!((p.confidence - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_history_outvotes_marginal_flicker() {
        let mut smoother = PredictionSmoother::new(0.6);

        for _ in 0..HISTORY_LEN {
            smoother.smooth(&probs_for(1, 0.8, 3));
        }

        // One frame flickers to class 2, but barely above class 1: the
        // override margin is not cleared, so the majority wins.
        let mut probs = vec![0.0; 3];
        probs[1] = 0.45;
        probs[2] = 0.55;
        let p = smoother.smooth(&probs).unwrap();
        assert_eq!(p.class, 1);
        assert!((p.confidence - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_below_threshold_not_admitted_but_returned() {
        let mut smoother = PredictionSmoother::new(0.6);

        for _ in 0..HISTORY_LEN {
            smoother.smooth(&probs_for(0, 0.9, 3));
        }

        // Low-confidence class 2 frames are reported but must not displace
        // the history: the majority stays class 0 throughout.
        for _ in 0..10 {
            let probs = vec![0.35, 0.25, 0.40];
            let p = smoother.smooth(&probs).unwrap();
            assert_eq!(p.class, 0, "majority must survive low-confidence noise");
        }
    }

    #[test]
    fn test_partial_history_returns_raw() {
        let mut smoother = PredictionSmoother::new(0.6);

        for _ in 0..HISTORY_LEN - 1 {
            let p = smoother.smooth(&probs_for(2, 0.7, 4)).unwrap();
            assert_eq!(p.class, 2);
            assert!((p.confidence - 0.7).abs() < 1e-6);
        }
    }

    #[test]
    fn test_majority_tie_breaks_to_lowest_class() {
        // Capacity 4 makes an exact 2-2 tie possible.
        let mut smoother = PredictionSmoother::with_params(0.6, 4, OVERRIDE_MARGIN);
        smoother.smooth(&probs_for(4, 0.9, 8));
        smoother.smooth(&probs_for(4, 0.9, 8));
        smoother.smooth(&probs_for(1, 0.9, 8));

        // Fourth frame: class 1 at 0.9 ties history 2-2. Smoothed class must
        // be 1 (lowest index), and raw == smoothed here anyway.
        let p = smoother.smooth(&probs_for(1, 0.9, 8)).unwrap();
        assert_eq!(p.class, 1);

        // Fifth frame predicts class 4, too weak to override. History after
        // the push is [4, 1, 1, 4]: still a 2-2 tie, lowest index wins.
        let mut probs = vec![0.0; 8];
        probs[4] = 0.7;
        probs[1] = 0.6;
        let p = smoother.smooth(&probs).unwrap();
        assert_eq!(p.class, 1, "exact tie must resolve to the lowest class index");
    }

    #[test]
    fn test_empty_probs() {
        let mut smoother = PredictionSmoother::new(0.6);
        assert!(smoother.smooth(&[]).is_none());
    }

    #[test]
    fn test_reset_clears_history() {
        let mut smoother = PredictionSmoother::new(0.6);
        for _ in 0..HISTORY_LEN {
            smoother.smooth(&probs_for(1, 0.9, 3));
        }
        smoother.reset();

        // First frame after reset is raw again.
        let p = smoother.smooth(&probs_for(2, 0.7, 3)).unwrap();
        assert_eq!(p.class, 2);
    }
}
