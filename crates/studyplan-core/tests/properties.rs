//! Property tests for the allocator's structural guarantees.

use chrono::NaiveDate;
use proptest::prelude::*;
use studyplan_core::{
    generate, rebalance, GenerateOptions, Plan, Profile, SlotKind, SlotStatus, StudyWindow,
    Subject, Topic,
};

fn subject_strategy() -> impl Strategy<Value = Subject> {
    (
        1u8..=5,
        prop::collection::vec(30u32..=180, 1..=3),
        prop::option::of(1i64..=30),
    )
        .prop_map(|(difficulty, topic_minutes, exam_offset)| {
            let total: u32 = topic_minutes.iter().sum();
            let mut subject = Subject::new("subject", total as f32 / 60.0, difficulty);
            for (i, minutes) in topic_minutes.into_iter().enumerate() {
                subject = subject.with_topic(Topic::new(format!("topic-{i}"), minutes));
            }
            if let Some(offset) = exam_offset {
                subject = subject.with_exam_date(
                    NaiveDate::from_ymd_opt(2026, 8, 3).unwrap() + chrono::Duration::days(offset),
                );
            }
            subject
        })
}

fn profile_strategy() -> impl Strategy<Value = Profile> {
    (
        prop::collection::vec(subject_strategy(), 1..=3),
        25u32..=60,  // focus
        5u32..=15,   // break
        2u32..=8,    // window hours
        0u32..=60,   // rest buffer
        1u32..=10,   // span
        1u32..=4,    // revision frequency
        prop::collection::vec(0u8..=6, 1..=7),
    )
        .prop_map(
            |(subjects, focus, brk, hours, buffer, span, frequency, preferred)| {
                let mut profile = Profile::new("prop");
                profile.subjects = subjects;
                profile.preferred_days = preferred;
                profile.daily_study_hours = hours as f32;
                profile.window = StudyWindow::new("08:00", format!("{:02}:00", 8 + hours));
                profile.focus_minutes = focus;
                profile.break_minutes = brk;
                profile.rest_buffer_minutes = buffer;
                profile.span_days = span;
                profile.revision_frequency_days = frequency;
                profile.start_date = NaiveDate::from_ymd_opt(2026, 8, 3);
                profile
            },
        )
}

fn shape(plan: &Plan) -> Vec<Vec<(SlotKind, String, u32)>> {
    plan.days
        .iter()
        .map(|d| {
            d.slots
                .iter()
                .map(|s| (s.kind, s.start_time.clone(), s.duration_minutes))
                .collect()
        })
        .collect()
}

fn active_study_minutes_per_subject(plan: &Plan, subject_id: &str) -> u32 {
    plan.days
        .iter()
        .flat_map(|d| d.slots.iter())
        .filter(|s| {
            s.kind == SlotKind::Study
                && s.status != SlotStatus::Missed
                && s.subject_id.as_deref() == Some(subject_id)
        })
        .map(|s| s.duration_minutes)
        .sum()
}

proptest! {
    #[test]
    fn window_bound_is_never_exceeded(profile in profile_strategy()) {
        let plan = generate(&profile, &GenerateOptions::default());
        for day in &plan.days {
            let window = profile.day_window_minutes(day.weekday);
            prop_assert!(day.allocated_minutes() + day.rest_buffer_minutes <= window);
        }
    }

    #[test]
    fn generation_is_structurally_deterministic(profile in profile_strategy()) {
        let a = generate(&profile, &GenerateOptions::default());
        let b = generate(&profile, &GenerateOptions::default());
        prop_assert_eq!(shape(&a), shape(&b));
    }

    #[test]
    fn subjects_are_never_over_allocated(profile in profile_strategy()) {
        let plan = generate(&profile, &GenerateOptions::default());
        for subject in &profile.subjects {
            let allocated = active_study_minutes_per_subject(&plan, &subject.id);
            prop_assert!(allocated <= subject.total_minutes());
        }
    }

    #[test]
    fn remaining_minutes_decrease_monotonically(profile in profile_strategy()) {
        // Externally visible form of the tracker invariant: cumulative study
        // minutes per subject never decrease day over day, and never pass the
        // subject's total.
        let plan = generate(&profile, &GenerateOptions::default());
        for subject in &profile.subjects {
            let mut cumulative = 0u32;
            for day in &plan.days {
                let today: u32 = day
                    .slots
                    .iter()
                    .filter(|s| {
                        s.kind == SlotKind::Study
                            && s.subject_id.as_deref() == Some(subject.id.as_str())
                    })
                    .map(|s| s.duration_minutes)
                    .sum();
                cumulative += today;
                prop_assert!(cumulative <= subject.total_minutes());
            }
        }
    }

    #[test]
    fn rebalance_only_relocates_study_minutes(
        profile in profile_strategy(),
        missed_offset in 0i64..10,
    ) {
        let plan = generate(&profile, &GenerateOptions::default());
        let missed_date =
            NaiveDate::from_ymd_opt(2026, 8, 3).unwrap() + chrono::Duration::days(missed_offset);
        let rebalanced = rebalance(&plan, missed_date);

        for subject in &profile.subjects {
            let before = active_study_minutes_per_subject(&plan, &subject.id);
            let after = active_study_minutes_per_subject(&rebalanced, &subject.id);
            // Relocation never grows a subject's minutes; shrinkage only at
            // the plan tail where the queue runs out of days.
            prop_assert!(after <= before);
        }
    }

    #[test]
    fn revision_slots_respect_the_cadence(profile in profile_strategy()) {
        let plan = generate(&profile, &GenerateOptions::default());
        for subject in &profile.subjects {
            let revision_days: Vec<usize> = plan
                .days
                .iter()
                .enumerate()
                .filter(|(_, d)| {
                    d.slots.iter().any(|s| {
                        s.kind == SlotKind::Revision
                            && s.subject_id.as_deref() == Some(subject.id.as_str())
                    })
                })
                .map(|(i, _)| i)
                .collect();
            for pair in revision_days.windows(2) {
                prop_assert!(pair[1] - pair[0] >= profile.revision_frequency_days as usize);
            }
        }
    }
}
