//! Per-day slot allocation.
//!
//! Lays one calendar day out as a sequence of study, revision, break, and
//! rest slots inside the day's availability window:
//! - a weekday outside the preferred set becomes a single whole-window rest
//!   slot
//! - otherwise subjects with remaining work are re-ranked by urgency before
//!   every pick and visited round-robin through a cyclic pointer
//! - a break slot separates consecutive focus cycles; none trails the day
//! - leftover window minutes become the day's effective rest buffer

use std::cmp::Ordering;

use chrono::NaiveDate;

use super::scoring::score;
use super::tracker::SubjectProgressTracker;
use crate::plan::{DaySchedule, SlotKind, TimeSlot};
use crate::profile::Profile;

pub(crate) struct DaySlotAllocator<'a> {
    profile: &'a Profile,
    revision_frequency_days: u32,
    honor_rest_days: bool,
}

impl<'a> DaySlotAllocator<'a> {
    pub fn new(profile: &'a Profile, revision_frequency_days: u32, honor_rest_days: bool) -> Self {
        Self {
            profile,
            revision_frequency_days,
            honor_rest_days,
        }
    }

    /// Lay out one calendar day, consuming subject minutes from the tracker.
    pub fn allocate(
        &self,
        tracker: &mut SubjectProgressTracker,
        date: NaiveDate,
        day_index: u32,
    ) -> DaySchedule {
        let mut day = DaySchedule::new(date);
        let window_minutes = self.profile.day_window_minutes(day.weekday);
        if window_minutes == 0 {
            return day;
        }

        if self.honor_rest_days && !self.profile.is_study_day(day.weekday) {
            day.push_slot(TimeSlot::rest(window_minutes));
            day.rest_buffer_minutes = window_minutes;
            return day;
        }

        let focus = self.profile.focus_minutes;
        let break_len = self.profile.break_minutes;
        let mut time_left = window_minutes.saturating_sub(self.profile.rest_buffer_minutes);
        let mut cursor = self.profile.window.start_minutes();
        let mut pointer = 0usize;
        let mut first_cycle = true;

        // A zero focus length can never drain subject minutes; skip straight
        // to the rest handling below.
        while focus > 0 && time_left >= focus + break_len {
            let ranked = ranked_subjects(tracker, date, self.profile);
            if ranked.is_empty() {
                break;
            }
            let subject_id = ranked[pointer % ranked.len()].clone();
            pointer += 1;

            if !first_cycle {
                // The loop guard ensures a full focus block follows the break.
                day.push_slot(TimeSlot::new(SlotKind::Break, cursor, break_len));
                cursor += break_len;
                time_left -= break_len;
            }
            first_cycle = false;

            let study_len = focus.min(tracker.remaining(&subject_id));
            let subject_name = tracker
                .state(&subject_id)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            let topic_id = tracker.consume(&subject_id, study_len);
            tracker.seed_revision_marker(&subject_id, day_index);
            day.push_slot(
                TimeSlot::new(SlotKind::Study, cursor, study_len)
                    .with_subject(subject_id.clone(), subject_name.clone())
                    .with_topic(topic_id),
            );
            cursor += study_len;
            time_left -= study_len;

            if tracker.revision_due(&subject_id, day_index, self.revision_frequency_days)
                && time_left > 0
            {
                let revision_len = self.profile.revision_slot_minutes.min(time_left);
                if revision_len > 0 {
                    day.push_slot(
                        TimeSlot::new(SlotKind::Revision, cursor, revision_len)
                            .with_subject(subject_id.clone(), subject_name)
                            .with_note("Spaced repetition"),
                    );
                    cursor += revision_len;
                    time_left -= revision_len;
                    tracker.record_revision(&subject_id, day_index);
                }
            }
        }

        let residual = window_minutes.saturating_sub(day.total_minutes);
        day.rest_buffer_minutes = residual;
        if residual > 0 && (self.profile.rest_buffer_minutes > 0 || day.slots.is_empty()) {
            day.push_slot(TimeSlot::rest(residual));
        }
        day
    }
}

/// Ids of subjects with remaining work, most urgent first. Re-computed before
/// every pick; the sort is stable, so ties keep profile order.
fn ranked_subjects(
    tracker: &SubjectProgressTracker,
    date: NaiveDate,
    profile: &Profile,
) -> Vec<String> {
    let mut open: Vec<_> = tracker
        .states()
        .filter(|s| s.remaining_minutes > 0)
        .collect();
    open.sort_by(|a, b| {
        score(b, date, &profile.weights)
            .partial_cmp(&score(a, date, &profile.weights))
            .unwrap_or(Ordering::Equal)
    });
    open.into_iter().map(|s| s.subject_id.clone()).collect()
}
