//! Subject urgency scoring.
//!
//! Produces a dimensionless score from exam proximity, difficulty, the
//! remaining-work ratio, and topic coverage. Scores are never normalized --
//! they only rank subjects against each other within a single day.

use chrono::NaiveDate;

use super::tracker::SubjectState;
use crate::profile::PriorityWeights;

/// Horizon assumed when a subject has no exam date.
const DEFAULT_EXAM_HORIZON_DAYS: i64 = 60;

/// Urgency score for a subject on a given day. Higher is more urgent.
pub(crate) fn score(state: &SubjectState, date: NaiveDate, weights: &PriorityWeights) -> f32 {
    let days_until_exam = state
        .exam_date
        .map(|exam| exam.signed_duration_since(date).num_days().max(1))
        .unwrap_or(DEFAULT_EXAM_HORIZON_DAYS);
    let exam_factor = 1.0 / days_until_exam as f32;

    let difficulty_factor = state.difficulty as f32 / 5.0;

    let remaining_factor = if state.total_minutes == 0 {
        0.0
    } else {
        state.remaining_minutes as f32 / state.total_minutes as f32
    };

    let topics_factor = if state.topics.is_empty() {
        0.0
    } else {
        let open = state
            .topics
            .iter()
            .filter(|t| t.remaining_minutes() > 0)
            .count();
        open as f32 / state.topics.len() as f32
    };

    (weights.exam * exam_factor
        + weights.difficulty * difficulty_factor
        + weights.remaining * remaining_factor
        + weights.topics * topics_factor)
        * state.priority_multiplier.unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Subject, Topic};
    use crate::scheduler::tracker::SubjectProgressTracker;

    fn state_for(subject: Subject) -> SubjectState {
        let id = subject.id.clone();
        let tracker = SubjectProgressTracker::new(&[subject]);
        tracker.state(&id).unwrap().clone()
    }

    #[test]
    fn near_exam_outranks_no_exam() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
        let near = state_for(
            Subject::new("Near", 2.0, 3)
                .with_exam_date(NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()),
        );
        let far = state_for(Subject::new("Far", 2.0, 3));
        let weights = PriorityWeights::default();
        assert!(score(&near, date, &weights) > score(&far, date, &weights));
    }

    #[test]
    fn past_exam_clamps_to_one_day() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
        let overdue = state_for(
            Subject::new("Overdue", 2.0, 3)
                .with_exam_date(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()),
        );
        let tomorrow = state_for(
            Subject::new("Tomorrow", 2.0, 3)
                .with_exam_date(NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()),
        );
        let weights = PriorityWeights::default();
        // Both resolve to a 1-day horizon.
        assert_eq!(
            score(&overdue, date, &weights),
            score(&tomorrow, date, &weights)
        );
    }

    #[test]
    fn multiplier_scales_the_score() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
        let plain = state_for(Subject::new("Plain", 2.0, 3));
        let boosted = state_for(Subject::new("Boosted", 2.0, 3).with_priority_multiplier(2.0));
        let weights = PriorityWeights::default();
        let base = score(&plain, date, &weights);
        assert!((score(&boosted, date, &weights) - base * 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn no_topics_zeroes_the_coverage_factor() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
        let bare = state_for(Subject::new("Bare", 2.0, 3));
        let covered = state_for(Subject::new("Covered", 2.0, 3).with_topic(Topic::new("T", 120)));
        let weights = PriorityWeights {
            exam: 0.0,
            difficulty: 0.0,
            remaining: 0.0,
            topics: 1.0,
        };
        assert_eq!(score(&bare, date, &weights), 0.0);
        assert_eq!(score(&covered, date, &weights), 1.0);
    }

    #[test]
    fn all_zero_weights_score_zero() {
        // Degenerate weight vectors are accepted as-is, never normalized.
        let date = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
        let state = state_for(Subject::new("Any", 2.0, 5).with_topic(Topic::new("T", 120)));
        let weights = PriorityWeights {
            exam: 0.0,
            difficulty: 0.0,
            remaining: 0.0,
            topics: 0.0,
        };
        assert_eq!(score(&state, date, &weights), 0.0);
    }
}
