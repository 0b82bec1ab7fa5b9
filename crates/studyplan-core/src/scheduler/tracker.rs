//! Per-run subject progress state.
//!
//! The tracker is built fresh for every generation run, owned exclusively by
//! it, and discarded when the plan is returned. Entries are kept in profile
//! order (with an id index on the side) so that score ties resolve the same
//! way on every run.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::profile::{Subject, Topic};

/// Live state for one subject during a generation run.
#[derive(Debug, Clone)]
pub(crate) struct SubjectState {
    pub subject_id: String,
    pub name: String,
    pub difficulty: u8,
    pub total_minutes: u32,
    pub remaining_minutes: u32,
    pub topics: Vec<Topic>,
    pub exam_date: Option<NaiveDate>,
    pub priority_multiplier: Option<f32>,
    /// Day index of the most recent coverage: seeded by the first study
    /// allocation, then moved by every revision slot.
    pub last_revision_day: Option<u32>,
}

impl SubjectState {
    fn from_subject(subject: &Subject) -> Self {
        let total = subject.total_minutes();
        Self {
            subject_id: subject.id.clone(),
            name: subject.name.clone(),
            difficulty: subject.difficulty,
            total_minutes: total,
            remaining_minutes: total,
            topics: subject.topics.clone(),
            exam_date: subject.exam_date,
            priority_multiplier: subject.priority_multiplier,
            last_revision_day: None,
        }
    }
}

/// State table for all subjects of one generation run, indexed by subject id.
#[derive(Debug)]
pub(crate) struct SubjectProgressTracker {
    states: Vec<SubjectState>,
    index: HashMap<String, usize>,
}

impl SubjectProgressTracker {
    pub fn new(subjects: &[Subject]) -> Self {
        let states: Vec<SubjectState> = subjects.iter().map(SubjectState::from_subject).collect();
        let index = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.subject_id.clone(), i))
            .collect();
        Self { states, index }
    }

    pub fn states(&self) -> impl Iterator<Item = &SubjectState> {
        self.states.iter()
    }

    pub fn any_remaining(&self) -> bool {
        self.states.iter().any(|s| s.remaining_minutes > 0)
    }

    pub fn remaining(&self, subject_id: &str) -> u32 {
        self.state(subject_id).map_or(0, |s| s.remaining_minutes)
    }

    pub fn state(&self, subject_id: &str) -> Option<&SubjectState> {
        self.index.get(subject_id).map(|&i| &self.states[i])
    }

    fn state_mut(&mut self, subject_id: &str) -> Option<&mut SubjectState> {
        let i = *self.index.get(subject_id)?;
        Some(&mut self.states[i])
    }

    /// Consume study minutes for a subject. Topics absorb the time first-fit
    /// in their stored order; the returned topic id is the first one that
    /// received any of it. When no topic has remaining time, the aggregate is
    /// still decremented and `None` comes back -- the defensive fallback for
    /// profiles whose topic estimates undershoot the subject estimate.
    pub fn consume(&mut self, subject_id: &str, minutes: u32) -> Option<String> {
        let state = self.state_mut(subject_id)?;
        let mut left = minutes;
        let mut attributed = None;
        for topic in state.topics.iter_mut() {
            if left == 0 {
                break;
            }
            let room = topic.remaining_minutes();
            if room == 0 {
                continue;
            }
            let take = left.min(room);
            topic.completed_minutes += take;
            left -= take;
            if attributed.is_none() {
                attributed = Some(topic.id.clone());
            }
        }
        state.remaining_minutes = state.remaining_minutes.saturating_sub(minutes);
        attributed
    }

    /// First study allocation counts as fresh coverage.
    pub fn seed_revision_marker(&mut self, subject_id: &str, day_index: u32) {
        if let Some(state) = self.state_mut(subject_id) {
            if state.last_revision_day.is_none() {
                state.last_revision_day = Some(day_index);
            }
        }
    }

    pub fn revision_due(&self, subject_id: &str, day_index: u32, frequency_days: u32) -> bool {
        self.state(subject_id)
            .and_then(|s| s.last_revision_day)
            .is_some_and(|last| day_index.saturating_sub(last) >= frequency_days)
    }

    pub fn record_revision(&mut self, subject_id: &str, day_index: u32) {
        if let Some(state) = self.state_mut(subject_id) {
            state.last_revision_day = Some(day_index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_subject() -> Subject {
        Subject::new("Maths", 2.0, 3)
            .with_topic(Topic::new("Algebra", 70))
            .with_topic(Topic::new("Geometry", 50))
    }

    #[test]
    fn consume_fills_topics_first_fit() {
        let subject = make_test_subject();
        let id = subject.id.clone();
        let mut tracker = SubjectProgressTracker::new(&[subject]);

        let topic = tracker.consume(&id, 50).unwrap();
        let state = tracker.state(&id).unwrap();
        assert_eq!(state.topics[0].id, topic);
        assert_eq!(state.topics[0].completed_minutes, 50);
        assert_eq!(state.remaining_minutes, 70);
    }

    #[test]
    fn consume_spills_into_the_next_topic() {
        let subject = make_test_subject();
        let id = subject.id.clone();
        let mut tracker = SubjectProgressTracker::new(&[subject]);

        // 70 exhausts Algebra; the next 50 lands in Geometry but the slot is
        // attributed to the first topic that absorbed time.
        let first = tracker.consume(&id, 90).unwrap();
        let state = tracker.state(&id).unwrap();
        assert_eq!(state.topics[0].id, first);
        assert_eq!(state.topics[0].completed_minutes, 70);
        assert_eq!(state.topics[1].completed_minutes, 20);
        assert_eq!(state.remaining_minutes, 30);
    }

    #[test]
    fn consume_without_topic_room_decrements_the_aggregate() {
        // Subject estimate exceeds the topic estimates: once topics fill up,
        // minutes keep draining the aggregate without attribution.
        let subject = Subject::new("Sparse", 2.0, 2).with_topic(Topic::new("Only", 30));
        let id = subject.id.clone();
        let mut tracker = SubjectProgressTracker::new(&[subject]);

        assert!(tracker.consume(&id, 30).is_some());
        assert_eq!(tracker.remaining(&id), 90);

        assert_eq!(tracker.consume(&id, 50), None);
        assert_eq!(tracker.remaining(&id), 40);
    }

    #[test]
    fn revision_marker_seeds_once() {
        let subject = make_test_subject();
        let id = subject.id.clone();
        let mut tracker = SubjectProgressTracker::new(&[subject]);

        assert!(!tracker.revision_due(&id, 0, 3));
        tracker.seed_revision_marker(&id, 0);
        tracker.seed_revision_marker(&id, 2); // no-op, already seeded
        assert!(!tracker.revision_due(&id, 2, 3));
        assert!(tracker.revision_due(&id, 3, 3));

        tracker.record_revision(&id, 3);
        assert!(!tracker.revision_due(&id, 5, 3));
        assert!(tracker.revision_due(&id, 6, 3));
    }

    #[test]
    fn zero_frequency_is_due_immediately() {
        let subject = make_test_subject();
        let id = subject.id.clone();
        let mut tracker = SubjectProgressTracker::new(&[subject]);
        tracker.seed_revision_marker(&id, 0);
        assert!(tracker.revision_due(&id, 0, 0));
    }
}
