//! Slot and day mutation helpers for a caller-held plan.
//!
//! Unknown ids are graceful no-ops returning `false`; the plan is never left
//! half-updated.

use super::{Plan, SlotKind, SlotStatus};

/// Set a study or revision slot's status and recompute the day's completed
/// minutes. Returns `false` for unknown slots and for break/rest slots.
pub fn set_slot_status(plan: &mut Plan, slot_id: &str, status: SlotStatus) -> bool {
    for day in &mut plan.days {
        if let Some(slot) = day.slots.iter_mut().find(|s| s.id == slot_id) {
            if !matches!(slot.kind, SlotKind::Study | SlotKind::Revision) {
                return false;
            }
            slot.status = status;
            day.recompute_completed();
            return true;
        }
    }
    false
}

/// Move a slot between two named days: the slot leaves the source day, is
/// reset to pending, and lands at the end of the target day. Both days'
/// totals and completed minutes are recomputed.
pub fn move_slot(plan: &mut Plan, slot_id: &str, from_day_id: &str, to_day_id: &str) -> bool {
    let Some(src) = plan.days.iter().position(|d| d.id == from_day_id) else {
        return false;
    };
    let Some(dst) = plan.days.iter().position(|d| d.id == to_day_id) else {
        return false;
    };
    let Some(pos) = plan.days[src].slots.iter().position(|s| s.id == slot_id) else {
        return false;
    };

    let mut slot = plan.days[src].slots.remove(pos);
    slot.status = SlotStatus::Pending;
    plan.days[dst].slots.push(slot);

    for index in [src, dst] {
        let day = &mut plan.days[index];
        day.total_minutes = day.slots.iter().map(|s| s.duration_minutes).sum();
        day.recompute_completed();
    }
    true
}
