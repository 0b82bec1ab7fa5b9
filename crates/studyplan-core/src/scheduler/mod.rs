//! Study plan generation.
//!
//! [`generate`] orchestrates the per-day allocator across the requested span:
//! it resolves the effective start date, span, and revision cadence, builds
//! one fresh progress tracker, lays out each day in order, and derives the
//! per-subject summaries. Generation is synchronous and deterministic: the
//! same profile, options, and start date produce structurally identical
//! plans. Later days deliberately depend on the remaining-minutes and
//! revision state left behind by earlier ones.

mod day;
mod rebalance;
mod scoring;
mod tracker;

pub use rebalance::rebalance;

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use self::day::DaySlotAllocator;
use self::tracker::SubjectProgressTracker;
use crate::plan::{DaySchedule, Plan, SlotKind, SlotStatus, SubjectSummary};
use crate::profile::{Profile, Subject};

/// Per-call overrides for [`generate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Start date; falls back to the profile's stored date, then today.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Span in days; falls back to the profile's span.
    #[serde(default)]
    pub span_days: Option<u32>,
    /// Revision cadence; falls back to the profile's cadence.
    #[serde(default)]
    pub revision_frequency_days: Option<u32>,
    /// When false, non-preferred weekdays are scheduled like any other day.
    #[serde(default = "default_honor_rest_days")]
    pub honor_rest_days: bool,
}

fn default_honor_rest_days() -> bool {
    true
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            start_date: None,
            span_days: None,
            revision_frequency_days: None,
            honor_rest_days: true,
        }
    }
}

/// Generate a study plan for the profile.
pub fn generate(profile: &Profile, options: &GenerateOptions) -> Plan {
    let start = options
        .start_date
        .or(profile.start_date)
        .unwrap_or_else(|| Utc::now().date_naive());
    let span = options.span_days.unwrap_or(profile.span_days);
    let frequency = options
        .revision_frequency_days
        .unwrap_or(profile.revision_frequency_days);

    let mut tracker = SubjectProgressTracker::new(&profile.subjects);
    let allocator = DaySlotAllocator::new(profile, frequency, options.honor_rest_days);

    let mut days = Vec::with_capacity(span as usize);
    for offset in 0..span {
        let date = start + Duration::days(offset as i64);
        days.push(allocator.allocate(&mut tracker, date, offset));
    }

    let summaries = profile
        .subjects
        .iter()
        .map(|subject| summarize(subject, &tracker, &days))
        .collect();

    Plan {
        id: Uuid::new_v4().to_string(),
        profile_id: profile.id.clone(),
        generated_at: Utc::now(),
        span_days: span,
        revision_frequency_days: frequency,
        days,
        summaries,
        notes: profile.notes.clone(),
    }
}

fn summarize(
    subject: &Subject,
    tracker: &SubjectProgressTracker,
    days: &[DaySchedule],
) -> SubjectSummary {
    let total = subject.total_minutes();
    let remaining = tracker.remaining(&subject.id);
    let allocated = total.saturating_sub(remaining);
    let completion = if total == 0 {
        0.0
    } else {
        (allocated as f32 / total as f32).min(1.0)
    };

    let next_session = days
        .iter()
        .flat_map(|day| day.slots.iter().map(move |slot| (day, slot)))
        .find(|(_, slot)| {
            slot.status == SlotStatus::Pending
                && !matches!(slot.kind, SlotKind::Break | SlotKind::Rest)
                && slot.subject_id.as_deref() == Some(subject.id.as_str())
        })
        .map(|(day, slot)| {
            format!(
                "{} {} {} {}",
                day.date,
                slot.start_time,
                slot.kind.as_str(),
                subject.name
            )
        });

    SubjectSummary {
        subject_id: subject.id.clone(),
        subject_name: subject.name.clone(),
        allocated_minutes: allocated,
        remaining_minutes: remaining,
        completion,
        next_session,
    }
}
