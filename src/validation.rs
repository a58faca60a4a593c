//! Input validation run before every generation and repair attempt.
//!
//! Checks are ordered and the first violation wins:
//! 1. At least one group and one subject
//! 2. The calendar is not wholly zero-capacity
//! 3. Every blocked day has `max_pairs` in `0..=5`
//! 4. Every subject has a teacher
//! 5. `weekly_hours <= total_hours`
//! 6. `total_hours` divides into whole sessions (6 for practicals, 2 for theory)

use crate::data::{BlockedDay, DAYS_PER_WEEK, Group, PAIRS_PER_DAY, Subject};
use crate::error::{ScheduleError, ScheduleResult};
use log::debug;

pub fn validate_input(
    groups: &[Group],
    subjects: &[Subject],
    blocked_days: &[BlockedDay],
) -> ScheduleResult<()> {
    if groups.is_empty() {
        return Err(ScheduleError::cannot_schedule("at least 1 group required"));
    }
    if subjects.is_empty() {
        return Err(ScheduleError::cannot_schedule("at least 1 subject required"));
    }

    if blocked_days.len() == DAYS_PER_WEEK as usize && blocked_days.iter().all(|d| d.max_pairs == 0) {
        return Err(ScheduleError::cannot_schedule("all days have 0 hours"));
    }

    if let Some(day) = blocked_days.iter().find(|d| d.max_pairs > PAIRS_PER_DAY) {
        return Err(ScheduleError::cannot_schedule(format!(
            "invalid day config: day {} allows {} pairs",
            day.day, day.max_pairs
        )));
    }

    for subject in subjects {
        if subject.teacher_id.is_none() {
            return Err(ScheduleError::cannot_schedule(format!(
                "subject {} has no teacher",
                subject.id
            )));
        }
        if subject.weekly_hours > subject.total_hours {
            return Err(ScheduleError::InvalidSubjectHours(format!(
                "subject {}: weekly_hours {} > total_hours {}",
                subject.id, subject.weekly_hours, subject.total_hours
            )));
        }
        let block = subject.kind.session_hours();
        if subject.total_hours % block != 0 {
            return Err(ScheduleError::InvalidSubjectHours(format!(
                "subject {}: {} total_hours {} is not a multiple of {}",
                subject.id, subject.kind, subject.total_hours, block
            )));
        }
    }

    debug!(
        "Input valid: {} groups, {} subjects, {} blocked days",
        groups.len(),
        subjects.len(),
        blocked_days.len()
    );
    Ok(())
}
