//! Learner profile types: subjects, topics, and study preferences.
//!
//! A [`Profile`] is the sole input to plan generation. It is plain data owned
//! by the caller; the engine never retains a reference to it between calls.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Weekday index for a calendar date (0=Mon ... 6=Sun).
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Parse an `"HH:MM"` clock string into minutes from midnight.
pub(crate) fn parse_clock(value: &str) -> Option<u32> {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour: u32 = parts[0].parse().ok()?;
    let minute: u32 = parts[1].parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Format minutes from midnight as an `"HH:MM"` clock string.
pub(crate) fn format_clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Weight quadruple for the urgency score.
///
/// The weights are free-form tuning knobs: the engine never validates or
/// normalizes them, and scores are only compared within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    /// Weight for exam proximity
    pub exam: f32,
    /// Weight for subject difficulty
    pub difficulty: f32,
    /// Weight for the remaining-work ratio
    pub remaining: f32,
    /// Weight for topic coverage
    pub topics: f32,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            exam: 0.4,
            difficulty: 0.3,
            remaining: 0.2,
            topics: 0.1,
        }
    }
}

/// Daily availability window as wall-clock bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyWindow {
    pub start: String, // HH:MM
    pub end: String,   // HH:MM
}

impl StudyWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Minutes from midnight at which the window opens (0 if malformed).
    pub fn start_minutes(&self) -> u32 {
        parse_clock(&self.start).unwrap_or(0)
    }

    /// Clock span of the window in minutes (0 if malformed or inverted).
    pub fn span_minutes(&self) -> u32 {
        match (parse_clock(&self.start), parse_clock(&self.end)) {
            (Some(start), Some(end)) if end > start => end - start,
            _ => 0,
        }
    }
}

impl Default for StudyWindow {
    fn default() -> Self {
        Self::new("09:00", "17:00")
    }
}

/// A single unit of study material within a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub estimated_minutes: u32,
    /// Mutable progress marker; reset to its input value (normally 0) at the
    /// start of every generation run.
    #[serde(default)]
    pub completed_minutes: u32,
}

impl Topic {
    pub fn new(title: impl Into<String>, estimated_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            estimated_minutes,
            completed_minutes: 0,
        }
    }

    /// Minutes not yet covered.
    pub fn remaining_minutes(&self) -> u32 {
        self.estimated_minutes.saturating_sub(self.completed_minutes)
    }
}

/// A subject the learner is studying towards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub estimated_hours: f32,
    /// Difficulty on a 1-5 scale.
    pub difficulty: u8,
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub exam_date: Option<NaiveDate>,
    /// Explicit multiplier applied on top of the computed score.
    #[serde(default)]
    pub priority_multiplier: Option<f32>,
}

impl Subject {
    pub fn new(name: impl Into<String>, estimated_hours: f32, difficulty: u8) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            estimated_hours,
            difficulty,
            topics: Vec::new(),
            exam_date: None,
            priority_multiplier: None,
        }
    }

    /// Add a topic
    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topics.push(topic);
        self
    }

    /// Set the exam date
    pub fn with_exam_date(mut self, date: NaiveDate) -> Self {
        self.exam_date = Some(date);
        self
    }

    /// Set the explicit priority multiplier
    pub fn with_priority_multiplier(mut self, multiplier: f32) -> Self {
        self.priority_multiplier = Some(multiplier);
        self
    }

    /// Total workload in minutes derived from the hour estimate.
    pub fn total_minutes(&self) -> u32 {
        (self.estimated_hours * 60.0).round().max(0.0) as u32
    }
}

/// A learner profile: subjects plus scheduling preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub subjects: Vec<Subject>,
    /// Weekdays on which study is scheduled (0=Mon ... 6=Sun).
    pub preferred_days: Vec<u8>,
    pub daily_study_hours: f32,
    /// Per-weekday overrides of `daily_study_hours`, keyed 0=Mon ... 6=Sun.
    #[serde(default)]
    pub weekday_hours: HashMap<u8, f32>,
    #[serde(default)]
    pub window: StudyWindow,
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    #[serde(default = "default_revision_frequency_days")]
    pub revision_frequency_days: u32,
    #[serde(default = "default_revision_slot_minutes")]
    pub revision_slot_minutes: u32,
    #[serde(default = "default_span_days")]
    pub span_days: u32,
    #[serde(default)]
    pub rest_buffer_minutes: u32,
    #[serde(default)]
    pub weights: PriorityWeights,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_focus_minutes() -> u32 {
    50
}
fn default_break_minutes() -> u32 {
    10
}
fn default_revision_frequency_days() -> u32 {
    3
}
fn default_revision_slot_minutes() -> u32 {
    20
}
fn default_span_days() -> u32 {
    14
}

impl Profile {
    /// Create a profile with Mon-Fri study days and default cadence.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            subjects: Vec::new(),
            preferred_days: vec![0, 1, 2, 3, 4],
            daily_study_hours: 4.0,
            weekday_hours: HashMap::new(),
            window: StudyWindow::default(),
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
            revision_frequency_days: default_revision_frequency_days(),
            revision_slot_minutes: default_revision_slot_minutes(),
            span_days: default_span_days(),
            rest_buffer_minutes: 0,
            weights: PriorityWeights::default(),
            start_date: None,
            notes: None,
        }
    }

    /// Add a subject
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Study hours for a weekday, honoring the per-weekday override.
    pub fn hours_for(&self, weekday: u8) -> f32 {
        self.weekday_hours
            .get(&weekday)
            .copied()
            .unwrap_or(self.daily_study_hours)
    }

    /// Whether the weekday is in the preferred study-day set.
    pub fn is_study_day(&self, weekday: u8) -> bool {
        self.preferred_days.contains(&weekday)
    }

    /// Effective window length for a weekday: the clock span of the
    /// availability window or the weekday's hour budget, whichever is tighter.
    pub fn day_window_minutes(&self, weekday: u8) -> u32 {
        let span = self.window.span_minutes();
        let budget = (self.hours_for(weekday) * 60.0).round().max(0.0) as u32;
        span.min(budget)
    }

    /// Check the profile for inconsistencies the allocator would otherwise
    /// paper over (see the aggregate-fallback behavior of the tracker).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "must not be empty".into(),
            });
        }
        if self.window.span_minutes() == 0 {
            return Err(ValidationError::InvalidWindow {
                start: self.window.start.clone(),
                end: self.window.end.clone(),
            });
        }
        if self.daily_study_hours <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "daily_study_hours".into(),
                message: "must be positive".into(),
            });
        }
        if self.focus_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "focus_minutes".into(),
                message: "must be positive".into(),
            });
        }
        for subject in &self.subjects {
            if !(1..=5).contains(&subject.difficulty) {
                return Err(ValidationError::InvalidValue {
                    field: format!("subjects.{}.difficulty", subject.name),
                    message: "must be in 1..=5".into(),
                });
            }
            if subject.estimated_hours <= 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: format!("subjects.{}.estimated_hours", subject.name),
                    message: "must be positive".into(),
                });
            }
            let topic_minutes: u32 = subject.topics.iter().map(|t| t.estimated_minutes).sum();
            if topic_minutes > subject.total_minutes() {
                return Err(ValidationError::TopicMinutesExceedSubject {
                    subject: subject.name.clone(),
                    topic_minutes,
                    subject_minutes: subject.total_minutes(),
                });
            }
        }
        Ok(())
    }
}
