//! # Studyplan Core Library
//!
//! This library implements the study-timetable engine behind Studyplan:
//! given a learner's subjects, topics, available hours, and preferences, it
//! produces a multi-day schedule of study, revision, break, and rest blocks,
//! tracks per-topic progress as time is consumed, and can rebalance the plan
//! after a missed day. The UI layer is a thin consumer of this crate.
//!
//! ## Architecture
//!
//! - **Profile**: caller-supplied subjects, topics, and scheduling
//!   preferences -- the sole input to generation
//! - **Scheduler**: the deterministic allocator; one exclusively-owned
//!   progress tracker per run, urgency-ranked round-robin slot layout per
//!   day, and missed-day rebalancing over the plan's rest capacity
//! - **Plan**: the immutable generated value plus caller-side mutation
//!   helpers (mark done, move slots between days)
//! - **Storage**: TOML defaults configuration and the JSON planner snapshot
//! - **Session**: a cooperative, cancellable wrapper around one generation
//!   call
//!
//! ## Key entry points
//!
//! - [`generate`]: produce a [`Plan`] from a [`Profile`]
//! - [`rebalance`]: relocate a missed day's study slots
//! - [`set_slot_status`] / [`move_slot`]: caller-held plan mutation

pub mod error;
pub mod plan;
pub mod profile;
pub mod scheduler;
pub mod session;
pub mod storage;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use plan::{
    move_slot, set_slot_status, DaySchedule, Plan, SlotKind, SlotStatus, SubjectSummary, TimeSlot,
};
pub use profile::{PriorityWeights, Profile, StudyWindow, Subject, Topic};
pub use scheduler::{generate, rebalance, GenerateOptions};
pub use session::{spawn_generation, GenerationHandle};
pub use storage::{Config, PlannerDefaults, PlannerSnapshot};
