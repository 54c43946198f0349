//! Maps attempt outcomes to SM-2 quality grades.
//!
//! The boolean-plus-latency to 0-5 grade mapping is a policy, not a
//! constant: every field can be tuned without touching the algorithm.

use serde::{Deserialize, Serialize};

/// Grading policy for attempt outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMapping {
    /// Answers at or under this latency count as confident recall.
    pub fast_ms: i64,
    /// Answers at or over this latency count as hesitant recall.
    pub slow_ms: i64,
    /// Grade assigned to incorrect answers (clamped to 0-2).
    pub incorrect_quality: u8,
}

impl Default for QualityMapping {
    fn default() -> Self {
        Self {
            fast_ms: 3_000,
            slow_ms: 10_000,
            incorrect_quality: 2,
        }
    }
}

impl QualityMapping {
    /// Grade one attempt. Missing latency is treated as confident recall;
    /// flip-style reviews report no timing.
    pub fn map(&self, is_correct: bool, response_time_ms: Option<i64>) -> u8 {
        if !is_correct {
            return self.incorrect_quality.min(2);
        }
        match response_time_ms {
            None => 5,
            Some(ms) if ms <= self.fast_ms => 5,
            Some(ms) if ms >= self.slow_ms => 3,
            Some(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn incorrect_grades_low_regardless_of_latency() {
        let mapping = QualityMapping::default();
        assert_eq!(mapping.map(false, None), 2);
        assert_eq!(mapping.map(false, Some(100)), 2);
        assert_eq!(mapping.map(false, Some(60_000)), 2);
    }

    #[test]
    fn correct_grades_scale_with_latency() {
        let mapping = QualityMapping::default();
        assert_eq!(mapping.map(true, None), 5);
        assert_eq!(mapping.map(true, Some(1_000)), 5);
        assert_eq!(mapping.map(true, Some(3_000)), 5);
        assert_eq!(mapping.map(true, Some(5_000)), 4);
        assert_eq!(mapping.map(true, Some(10_000)), 3);
        assert_eq!(mapping.map(true, Some(30_000)), 3);
    }

    #[test]
    fn incorrect_quality_is_clamped_to_failing_range() {
        let mapping = QualityMapping {
            incorrect_quality: 4,
            ..Default::default()
        };
        assert_eq!(mapping.map(false, None), 2);
    }
}
