//! Missed-day rebalancing.
//!
//! Moves the incomplete study slots of a missed day into the rest capacity
//! of the days that follow: one relocated slot lands per scanned day, rest
//! slots make room for it, and whatever buffer is left when the queue drains
//! is restored as rest. The walk never resizes a slot; a queue that outlives
//! the plan's day range is dropped at the tail.

use std::collections::VecDeque;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::plan::{Plan, SlotKind, SlotStatus, TimeSlot, REST_SENTINEL};

/// Fallback start for a relocated slot landing on a day with no clocked slot.
const DEFAULT_DAY_START: &str = "09:00";

/// Produce a rebalanced copy of the plan. A `missed_date` the plan does not
/// cover returns the plan unchanged.
pub fn rebalance(plan: &Plan, missed_date: NaiveDate) -> Plan {
    let mut out = plan.clone();
    if !out.days.iter().any(|d| d.date == missed_date) {
        return out;
    }

    let mut queue: VecDeque<TimeSlot> = VecDeque::new();
    for day in out.days.iter_mut().filter(|d| d.date == missed_date) {
        for slot in day.slots.iter_mut() {
            if slot.kind == SlotKind::Study && slot.status != SlotStatus::Done {
                slot.status = SlotStatus::Missed;
                let mut copy = slot.clone();
                copy.id = Uuid::new_v4().to_string();
                copy.status = SlotStatus::Pending;
                queue.push_back(copy);
            }
        }
    }
    if queue.is_empty() {
        return out;
    }

    for day in out.days.iter_mut().filter(|d| d.date > missed_date) {
        let Some(mut slot) = queue.pop_front() else {
            break;
        };

        // Free the day's rest capacity before appending.
        let mut freed = 0u32;
        if let Some(pos) = day.slots.iter().position(|s| s.is_rest()) {
            let rest = day.slots.remove(pos);
            freed = rest.duration_minutes;
            day.total_minutes = day.total_minutes.saturating_sub(rest.duration_minutes);
        }

        // The relocated slot keeps its original end time and duration; only
        // its start is re-derived from whatever now ends the day.
        slot.start_time = day
            .slots
            .iter()
            .rev()
            .find(|s| s.end_time != REST_SENTINEL)
            .map(|s| s.end_time.clone())
            .unwrap_or_else(|| DEFAULT_DAY_START.to_string());
        let landed = slot.duration_minutes;
        day.total_minutes += landed;
        day.slots.push(slot);

        if queue.is_empty() {
            let residual = freed.saturating_sub(landed);
            day.rest_buffer_minutes = residual;
            if residual > 0 {
                let rest = TimeSlot::rest(residual);
                day.total_minutes += rest.duration_minutes;
                day.slots.push(rest);
            }
            break;
        }
        // Capacity fully handed over; any freed remainder is not restored
        // until the queue drains on a later day.
        day.rest_buffer_minutes = 0;
    }

    out
}
