use crate::data::{
    DAYS_PER_WEEK, Dataset, Group, PAIRS_PER_DAY, ScheduleEntry, Subject, Teacher,
    WEEKS_PER_YEAR,
};
use crate::error::{ScheduleError, ScheduleResult};
use crate::feasibility::{Rejection, SlotContext, admit};
use crate::ledger::Board;
use crate::priority::placement_order;
use crate::validation::validate_input;
use itertools::iproduct;
use log::{debug, info, trace};
use std::time::Instant;

/// Generates a full timetable for every subject in `dataset`.
///
/// `prior` entries are kept as-is and count toward their subjects' session
/// requirements. The result is `prior` followed by the new entries in the
/// order they were committed.
pub fn generate(dataset: &Dataset, prior: &[ScheduleEntry]) -> ScheduleResult<Vec<ScheduleEntry>> {
    generate_for(dataset, &dataset.subjects, Board::seeded(prior))
}

/// Places the missing sessions of `subjects` on top of an existing board.
///
/// Greedy and first-fit: each session takes the first admissible slot in
/// week, day, pair order and is never revisited. A session with no admissible
/// slot fails the whole run with `CannotSchedule`.
pub fn generate_for(
    dataset: &Dataset,
    subjects: &[Subject],
    mut board: Board,
) -> ScheduleResult<Vec<ScheduleEntry>> {
    let start_time = Instant::now();
    validate_input(&dataset.groups, subjects, &dataset.blocked_days)?;

    let order = placement_order(subjects);
    info!(
        "Placing {} subjects on a board with {} existing entries...",
        order.len(),
        board.len()
    );
    let seeded = board.len();

    for subject in order {
        let (group, teacher) = resolve_owners(dataset, subject)?;
        let required = subject.required_sessions();
        let missing = required.saturating_sub(board.sessions_of(subject.id));
        debug!(
            "Subject {} ({}): {} of {} sessions to place",
            subject.id, subject.kind, missing, required
        );

        for session in 0..missing {
            let entry = find_slot(dataset, &board, subject, group, teacher).map_err(|last| {
                let reason = last.map_or_else(|| "no candidate slots".to_string(), |r| r.to_string());
                ScheduleError::cannot_schedule(format!(
                    "no admissible slot for session {} of {} of subject {} (last rejection: {})",
                    session + 1,
                    missing,
                    subject.id,
                    reason
                ))
            })?;
            trace!("Committed {}", entry);
            board.commit(entry);
        }
    }

    info!(
        "Placed {} new entries in {:.2?}",
        board.len() - seeded,
        start_time.elapsed()
    );
    Ok(board.into_entries())
}

fn resolve_owners<'a>(
    dataset: &'a Dataset,
    subject: &Subject,
) -> ScheduleResult<(&'a Group, &'a Teacher)> {
    let group = dataset.group(subject.group_id).ok_or_else(|| {
        ScheduleError::cannot_schedule(format!(
            "subject {} references unknown group {}",
            subject.id, subject.group_id
        ))
    })?;
    let teacher = subject
        .teacher_id
        .and_then(|id| dataset.teacher(id))
        .ok_or_else(|| {
            ScheduleError::cannot_schedule(format!(
                "subject {} references unknown teacher {:?}",
                subject.id, subject.teacher_id
            ))
        })?;
    Ok((group, teacher))
}

/// Scans at most 52 x 6 x 5 candidates. On failure returns the last rejection
/// seen, if any.
fn find_slot(
    dataset: &Dataset,
    board: &Board,
    subject: &Subject,
    group: &Group,
    teacher: &Teacher,
) -> Result<ScheduleEntry, Option<Rejection>> {
    let pair_length = subject.kind.session_pairs();
    let mut last = None;

    for (week, day, pair) in iproduct!(1..=WEEKS_PER_YEAR, 1..=DAYS_PER_WEEK, 1..=PAIRS_PER_DAY) {
        let ctx = SlotContext {
            group,
            teacher,
            subject,
            blocked_day: dataset.blocked_day(day),
            holiday: dataset.is_holiday(week, day),
        };
        let candidate = ScheduleEntry {
            group_id: group.id,
            teacher_id: teacher.id,
            subject_id: subject.id,
            week_number: week,
            day,
            pair_start: pair,
            pair_length,
        };
        match admit(&candidate, board, &ctx) {
            Ok(()) => return Ok(candidate),
            Err(rejection) => last = Some(rejection),
        }
    }

    Err(last)
}
