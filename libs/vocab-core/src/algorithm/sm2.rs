//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2 with configurable parameters.

use chrono::{Duration, NaiveDate};

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::WordState;

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Interval after the first successful recall.
    pub first_interval: u32,
    /// Interval after the second successful recall.
    pub second_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            first_interval: 1,
            second_interval: 6,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self) -> WordState {
        WordState {
            ease_factor: self.initial_ease,
            interval_days: 0,
            streak: 0,
        }
    }

    fn schedule(&self, state: &WordState, quality: u8, study_date: NaiveDate) -> SchedulingResult {
        let q = quality.min(5);

        // Ease is re-derived on every attempt; failures pull it toward the
        // floor instead of freezing it.
        let delta = 0.1 - (5.0 - q as f64) * (0.08 + (5.0 - q as f64) * 0.02);
        let ease = (state.ease_factor + delta).max(self.minimum_ease);

        let (interval, streak) = if q < 3 {
            // Lapse: back to short-cycle review.
            (0, 0)
        } else {
            let next = if state.interval_days == 0 {
                self.first_interval
            } else if state.interval_days <= self.first_interval {
                self.second_interval
            } else {
                (state.interval_days as f64 * ease).round().max(1.0) as u32
            };
            (next, state.streak + 1)
        };

        SchedulingResult {
            new_state: WordState {
                ease_factor: ease,
                interval_days: interval,
                streak,
            },
            next_due: study_date + Duration::days(i64::from(interval)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + Duration::days(n)
    }

    #[test]
    fn first_success_graduates_to_one_day() {
        let sm2 = Sm2::default();
        let result = sm2.schedule(&sm2.initial_state(), 5, date(0));
        assert_eq!(result.new_state.interval_days, 1);
        assert_eq!(result.new_state.streak, 1);
        assert_eq!(result.next_due, date(1));
    }

    #[test]
    fn second_success_jumps_to_six_days() {
        let sm2 = Sm2::default();
        let state = WordState {
            ease_factor: 2.6,
            interval_days: 1,
            streak: 1,
        };
        let result = sm2.schedule(&state, 5, date(1));
        assert_eq!(result.new_state.interval_days, 6);
        assert_eq!(result.next_due, date(7));
    }

    #[test]
    fn third_success_scales_by_ease() {
        let sm2 = Sm2::default();
        let state = WordState {
            ease_factor: 2.7,
            interval_days: 6,
            streak: 2,
        };
        let result = sm2.schedule(&state, 5, date(7));
        // ease rises to 2.8, interval = round(6 * 2.8) = 17
        assert!((result.new_state.ease_factor - 2.8).abs() < 1e-9);
        assert_eq!(result.new_state.interval_days, 17);
        assert_eq!(result.next_due, date(24));
    }

    #[test]
    fn failure_resets_interval_and_streak() {
        let sm2 = Sm2::default();
        let state = WordState {
            ease_factor: 2.5,
            interval_days: 10,
            streak: 4,
        };
        let result = sm2.schedule(&state, 2, date(0));
        assert_eq!(result.new_state.interval_days, 0);
        assert_eq!(result.new_state.streak, 0);
        assert!(result.new_state.ease_factor < 2.5);
        assert_eq!(result.next_due, date(0));
    }

    #[test]
    fn ease_never_drops_below_minimum() {
        let sm2 = Sm2::default();
        let mut state = sm2.initial_state();
        for _ in 0..50 {
            state = sm2.schedule(&state, 0, date(0)).new_state;
            assert!(state.ease_factor >= sm2.minimum_ease);
        }
        assert_eq!(state.ease_factor, sm2.minimum_ease);
    }

    #[test]
    fn ease_floor_holds_under_mixed_sequences() {
        let sm2 = Sm2::default();
        let mut state = sm2.initial_state();
        let pattern = [0u8, 5, 1, 4, 2, 3, 0, 5, 1, 1, 4, 0];
        for (i, &q) in pattern.iter().cycle().take(200).enumerate() {
            state = sm2.schedule(&state, q, date(i as i64)).new_state;
            assert!(state.ease_factor >= sm2.minimum_ease);
        }
    }

    #[test]
    fn out_of_range_quality_is_clamped() {
        let sm2 = Sm2::default();
        let result = sm2.schedule(&sm2.initial_state(), 9, date(0));
        // Treated as 5: confident first recall.
        assert_eq!(result.new_state.interval_days, 1);
        assert!((result.new_state.ease_factor - 2.6).abs() < 1e-9);
    }
}
