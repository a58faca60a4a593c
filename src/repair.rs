//! Local repair of a committed timetable after a holiday is declared.
//!
//! Entries on the holiday move one weekday forward (capped at the last
//! weekday) and must pass the feasibility check again. Only the subjects that
//! lost an entry are then topped up. If that focused attempt cannot schedule,
//! the holiday's entries are dropped and every subject is regenerated over the
//! untouched remainder.

use crate::data::{DAYS_PER_WEEK, Dataset, Holiday, ScheduleEntry, Subject};
use crate::error::{ScheduleError, ScheduleResult};
use crate::feasibility::{SlotContext, admit};
use crate::ledger::Board;
use crate::solver::{generate, generate_for};
use crate::validation::validate_input;
use log::{info, warn};
use std::borrow::Cow;

pub fn apply_holiday(
    entries: &[ScheduleEntry],
    holiday: &Holiday,
    dataset: &Dataset,
) -> ScheduleResult<Vec<ScheduleEntry>> {
    let (affected, unaffected): (Vec<ScheduleEntry>, Vec<ScheduleEntry>) = entries
        .iter()
        .partition(|e| holiday.covers(e.week_number, e.day));

    validate_input(&dataset.groups, &dataset.subjects, &dataset.blocked_days)?;

    if affected.is_empty() {
        info!(
            "Holiday {} (week {}, day {}) touches no entries",
            holiday.date, holiday.week_number, holiday.day
        );
        return Ok(entries.to_vec());
    }

    let dataset = with_holiday(dataset, holiday);
    info!(
        "Holiday {} displaces {} of {} entries",
        holiday.date,
        affected.len(),
        entries.len()
    );

    let shifted: Vec<ScheduleEntry> = affected
        .iter()
        .map(|e| ScheduleEntry {
            day: (e.day + 1).min(DAYS_PER_WEEK),
            ..*e
        })
        .collect();

    match shift_and_top_up(&dataset, &affected, &unaffected, &shifted) {
        Err(err) if err.is_cannot_schedule() => {
            warn!("Focused repair failed ({err}); regenerating all subjects");
            generate(&dataset, &unaffected)
        }
        result => result,
    }
}

fn with_holiday<'a>(dataset: &'a Dataset, holiday: &Holiday) -> Cow<'a, Dataset> {
    if dataset.holidays.contains(holiday) {
        Cow::Borrowed(dataset)
    } else {
        let mut owned = dataset.clone();
        owned.holidays.push(holiday.clone());
        Cow::Owned(owned)
    }
}

fn shift_and_top_up(
    dataset: &Dataset,
    affected: &[ScheduleEntry],
    unaffected: &[ScheduleEntry],
    shifted: &[ScheduleEntry],
) -> ScheduleResult<Vec<ScheduleEntry>> {
    let mut board = Board::seeded(unaffected);

    for candidate in shifted {
        let subject = find_subject(dataset, candidate)?;
        let group = dataset.group(candidate.group_id).ok_or_else(|| {
            ScheduleError::cannot_schedule(format!("unknown group {}", candidate.group_id))
        })?;
        let teacher = dataset.teacher(candidate.teacher_id).ok_or_else(|| {
            ScheduleError::cannot_schedule(format!("unknown teacher {}", candidate.teacher_id))
        })?;
        let ctx = SlotContext {
            group,
            teacher,
            subject,
            blocked_day: dataset.blocked_day(candidate.day),
            holiday: dataset.is_holiday(candidate.week_number, candidate.day),
        };
        admit(candidate, &board, &ctx).map_err(|rejection| {
            ScheduleError::cannot_schedule(format!("shifted {candidate}: {rejection}"))
        })?;
        board.commit(*candidate);
    }

    let subjects: Vec<Subject> = dataset
        .subjects
        .iter()
        .filter(|s| affected.iter().any(|a| a.subject_id == s.id))
        .cloned()
        .collect();
    generate_for(dataset, &subjects, board)
}

fn find_subject<'a>(dataset: &'a Dataset, entry: &ScheduleEntry) -> ScheduleResult<&'a Subject> {
    dataset
        .subjects
        .iter()
        .find(|s| s.id == entry.subject_id)
        .ok_or_else(|| ScheduleError::cannot_schedule(format!("unknown subject {}", entry.subject_id)))
}
