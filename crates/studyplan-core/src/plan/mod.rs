//! Generated plan types: time slots, day schedules, and subject summaries.
//!
//! A [`Plan`] is an immutable value handed to the caller. All mutation
//! (marking slots done, moving slots, rebalancing) operates on a caller-held
//! copy; the engine keeps no reference to a plan after returning it.

mod mutate;

pub use mutate::{move_slot, set_slot_status};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{format_clock, weekday_index};

/// Sentinel used instead of clock times on rest slots: they represent
/// unscheduled buffer, not a fixed appointment.
pub const REST_SENTINEL: &str = "--";

/// Kind of time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Study,
    Revision,
    Break,
    Rest,
}

impl SlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Revision => "revision",
            Self::Break => "break",
            Self::Rest => "rest",
        }
    }
}

/// Completion status of a time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Pending,
    Done,
    Missed,
}

/// A single block on a day's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: String,
    pub kind: SlotKind,
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub topic_id: Option<String>,
    pub start_time: String, // HH:MM, or "--" for rest
    pub end_time: String,   // HH:MM, or "--" for rest
    pub duration_minutes: u32,
    pub status: SlotStatus,
    #[serde(default)]
    pub note: Option<String>,
}

impl TimeSlot {
    /// Create a clocked slot starting at `start_minutes` from midnight.
    pub fn new(kind: SlotKind, start_minutes: u32, duration_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            subject_id: None,
            subject_name: None,
            topic_id: None,
            start_time: format_clock(start_minutes),
            end_time: format_clock(start_minutes + duration_minutes),
            duration_minutes,
            status: SlotStatus::Pending,
            note: None,
        }
    }

    /// Create a rest slot carrying the sentinel instead of clock times.
    pub fn rest(duration_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: SlotKind::Rest,
            subject_id: None,
            subject_name: None,
            topic_id: None,
            start_time: REST_SENTINEL.to_string(),
            end_time: REST_SENTINEL.to_string(),
            duration_minutes,
            status: SlotStatus::Pending,
            note: None,
        }
    }

    /// Attach the subject reference
    pub fn with_subject(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.subject_id = Some(id.into());
        self.subject_name = Some(name.into());
        self
    }

    /// Attach the topic reference
    pub fn with_topic(mut self, topic_id: Option<String>) -> Self {
        self.topic_id = topic_id;
        self
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_rest(&self) -> bool {
        self.kind == SlotKind::Rest
    }
}

/// One calendar day of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub id: String,
    pub date: NaiveDate,
    /// 0=Mon ... 6=Sun
    pub weekday: u8,
    pub slots: Vec<TimeSlot>,
    /// Sum of all slot durations, rest included.
    pub total_minutes: u32,
    /// Sum of done study slots.
    pub completed_minutes: u32,
    /// Effective rest buffer: window minutes not taken by study, revision,
    /// or break slots.
    pub rest_buffer_minutes: u32,
}

impl DaySchedule {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            weekday: weekday_index(date),
            slots: Vec::new(),
            total_minutes: 0,
            completed_minutes: 0,
            rest_buffer_minutes: 0,
        }
    }

    /// Append a slot, keeping the running total in step.
    pub fn push_slot(&mut self, slot: TimeSlot) {
        self.total_minutes += slot.duration_minutes;
        self.slots.push(slot);
    }

    /// Recompute `completed_minutes` by summing done study slots.
    pub fn recompute_completed(&mut self) {
        self.completed_minutes = self
            .slots
            .iter()
            .filter(|s| s.kind == SlotKind::Study && s.status == SlotStatus::Done)
            .map(|s| s.duration_minutes)
            .sum();
    }

    /// Minutes taken by study, revision, and break slots.
    pub fn allocated_minutes(&self) -> u32 {
        self.slots
            .iter()
            .filter(|s| !s.is_rest())
            .map(|s| s.duration_minutes)
            .sum()
    }
}

/// Per-subject rollup across the generated days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub subject_id: String,
    pub subject_name: String,
    pub allocated_minutes: u32,
    pub remaining_minutes: u32,
    /// Completion estimate in 0..=1.
    pub completion: f32,
    /// First pending non-break session for the subject, in date order.
    #[serde(default)]
    pub next_session: Option<String>,
}

/// A generated study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub profile_id: String,
    pub generated_at: DateTime<Utc>,
    pub span_days: u32,
    /// Revision cadence the plan was generated with.
    pub revision_frequency_days: u32,
    pub days: Vec<DaySchedule>,
    pub summaries: Vec<SubjectSummary>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Plan {
    /// Day schedule for a calendar date, if the plan covers it.
    pub fn day(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.date == date)
    }
}
