//! Admit/reject decision for a single candidate placement.
//!
//! Rules run in a fixed order and the first failing rule names the rejection:
//! day capacity, pair range, group/teacher overlap, hour caps (group before
//! teacher, daily before weekly), practical adjacency, theory anchor pairs.

use crate::data::{
    BlockedDay, Group, Pair, ScheduleEntry, Subject, SubjectKind, Teacher, Week, Weekday,
};
use crate::error::{ErrorCode, ScheduleError};
use crate::ledger::Board;
use thiserror::Error;

/// Pairs a theory session may start at.
pub const THEORY_ANCHOR_PAIRS: [Pair; 2] = [1, 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("day {day} is not a teaching day")]
    ClosedDay { day: Weekday },
    #[error("week {week} day {day} is a holiday")]
    Holiday { week: Week, day: Weekday },
    #[error("pairs up to {last} exceed the {max_pairs} pairs allowed on day {day}")]
    OverCapacity { day: Weekday, last: Pair, max_pairs: Pair },
    #[error("group already busy at pair {pair}")]
    GroupBusy { pair: Pair },
    #[error("teacher already busy at pair {pair}")]
    TeacherBusy { pair: Pair },
    #[error("group daily hours would reach {hours} (max {limit})")]
    GroupDaily { hours: u32, limit: u32 },
    #[error("group weekly hours would reach {hours} (max {limit})")]
    GroupWeekly { hours: u32, limit: u32 },
    #[error("teacher daily hours would reach {hours} (max {limit})")]
    TeacherDaily { hours: u32, limit: u32 },
    #[error("teacher weekly hours would reach {hours} (max {limit})")]
    TeacherWeekly { hours: u32, limit: u32 },
    #[error("practical session on a day adjacent to day {other}")]
    AdjacentPractical { other: Weekday },
    #[error("theory session cannot start at pair {pair}")]
    OffAnchor { pair: Pair },
}

impl Rejection {
    pub fn code(self) -> ErrorCode {
        match self {
            Rejection::GroupBusy { .. } => ErrorCode::GroupConflict,
            Rejection::TeacherBusy { .. } => ErrorCode::TeacherConflict,
            Rejection::GroupDaily { .. } | Rejection::TeacherDaily { .. } => {
                ErrorCode::DailyLimitExceeded
            }
            Rejection::GroupWeekly { .. } | Rejection::TeacherWeekly { .. } => {
                ErrorCode::WeeklyLimitExceeded
            }
            Rejection::ClosedDay { .. }
            | Rejection::Holiday { .. }
            | Rejection::OverCapacity { .. }
            | Rejection::AdjacentPractical { .. }
            | Rejection::OffAnchor { .. } => ErrorCode::CannotSchedule,
        }
    }
}

impl From<Rejection> for ScheduleError {
    fn from(rejection: Rejection) -> Self {
        let message = rejection.to_string();
        match rejection.code() {
            ErrorCode::GroupConflict => ScheduleError::GroupConflict(message),
            ErrorCode::TeacherConflict => ScheduleError::TeacherConflict(message),
            ErrorCode::DailyLimitExceeded => ScheduleError::DailyLimitExceeded(message),
            ErrorCode::WeeklyLimitExceeded => ScheduleError::WeeklyLimitExceeded(message),
            ErrorCode::InvalidSubjectHours => ScheduleError::InvalidSubjectHours(message),
            ErrorCode::CannotSchedule => ScheduleError::CannotSchedule(message),
        }
    }
}

/// Records the candidate's subject placement is checked against.
#[derive(Debug, Clone, Copy)]
pub struct SlotContext<'a> {
    pub group: &'a Group,
    pub teacher: &'a Teacher,
    pub subject: &'a Subject,
    pub blocked_day: Option<&'a BlockedDay>,
    pub holiday: bool,
}

pub fn admit(candidate: &ScheduleEntry, board: &Board, ctx: &SlotContext<'_>) -> Result<(), Rejection> {
    let (week, day) = (candidate.week_number, candidate.day);

    let max_pairs = match ctx.blocked_day {
        Some(d) if d.max_pairs > 0 => d.max_pairs,
        _ => return Err(Rejection::ClosedDay { day }),
    };
    if ctx.holiday {
        return Err(Rejection::Holiday { week, day });
    }
    if candidate.pair_end() > max_pairs {
        return Err(Rejection::OverCapacity {
            day,
            last: candidate.pair_end(),
            max_pairs,
        });
    }

    for pair in candidate.pairs() {
        let mut teacher_busy = false;
        for other in board.occupants(week, day, pair) {
            if other.group_id == candidate.group_id {
                return Err(Rejection::GroupBusy { pair });
            }
            teacher_busy |= other.teacher_id == candidate.teacher_id;
        }
        if teacher_busy {
            return Err(Rejection::TeacherBusy { pair });
        }
    }

    check_hours(candidate, board, ctx)?;

    match ctx.subject.kind {
        SubjectKind::Practical => {
            if let Some(&other) = board
                .subject_days(ctx.subject.id, week)
                .iter()
                .find(|&&other| other.abs_diff(day) == 1)
            {
                return Err(Rejection::AdjacentPractical { other });
            }
        }
        SubjectKind::Theory => {
            if !THEORY_ANCHOR_PAIRS.contains(&candidate.pair_start) {
                return Err(Rejection::OffAnchor {
                    pair: candidate.pair_start,
                });
            }
        }
    }

    Ok(())
}

fn check_hours(candidate: &ScheduleEntry, board: &Board, ctx: &SlotContext<'_>) -> Result<(), Rejection> {
    let ledger = board.hours();
    let add = candidate.hours();
    let (week, day) = (candidate.week_number, candidate.day);

    let hours = ledger.group_daily(week, day, candidate.group_id) + add;
    if hours > ctx.group.daily_limit_max {
        return Err(Rejection::GroupDaily { hours, limit: ctx.group.daily_limit_max });
    }
    let hours = ledger.group_weekly(week, candidate.group_id) + add;
    if hours > ctx.group.weekly_limit_max {
        return Err(Rejection::GroupWeekly { hours, limit: ctx.group.weekly_limit_max });
    }
    let hours = ledger.teacher_daily(week, day, candidate.teacher_id) + add;
    if hours > ctx.teacher.max_daily_hours {
        return Err(Rejection::TeacherDaily { hours, limit: ctx.teacher.max_daily_hours });
    }
    let hours = ledger.teacher_weekly(week, candidate.teacher_id) + add;
    if hours > ctx.teacher.max_weekly_hours {
        return Err(Rejection::TeacherWeekly { hours, limit: ctx.teacher.max_weekly_hours });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: u32) -> Group {
        Group {
            id,
            name: format!("G{id}"),
            weekly_limit_min: 0,
            weekly_limit_max: 30,
            daily_limit_min: 0,
            daily_limit_max: 10,
        }
    }

    fn teacher(id: u32) -> Teacher {
        Teacher {
            id,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            department: "Math".into(),
            max_daily_hours: 10,
            max_weekly_hours: 30,
        }
    }

    fn subject(id: u32, kind: SubjectKind) -> Subject {
        Subject {
            id,
            name: format!("S{id}"),
            kind,
            total_hours: 12,
            weekly_hours: 6,
            priority: 1,
            semester: 1,
            department: "Math".into(),
            group_id: 1,
            teacher_id: Some(1),
        }
    }

    fn entry(subject: &Subject, group: u32, teacher: u32, day: u32, start: u32) -> ScheduleEntry {
        ScheduleEntry {
            group_id: group,
            teacher_id: teacher,
            subject_id: subject.id,
            week_number: 1,
            day,
            pair_start: start,
            pair_length: subject.kind.session_pairs(),
        }
    }

    struct Fixture {
        group: Group,
        teacher: Teacher,
        subject: Subject,
        day: BlockedDay,
    }

    impl Fixture {
        fn new(kind: SubjectKind) -> Self {
            Self {
                group: group(1),
                teacher: teacher(1),
                subject: subject(1, kind),
                day: BlockedDay { day: 1, max_pairs: 5 },
            }
        }

        fn ctx(&self) -> SlotContext<'_> {
            SlotContext {
                group: &self.group,
                teacher: &self.teacher,
                subject: &self.subject,
                blocked_day: Some(&self.day),
                holiday: false,
            }
        }
    }

    #[test]
    fn admits_free_slot() {
        let fx = Fixture::new(SubjectKind::Practical);
        let candidate = entry(&fx.subject, 1, 1, 1, 1);
        assert_eq!(admit(&candidate, &Board::new(), &fx.ctx()), Ok(()));
    }

    #[test]
    fn closed_or_missing_day_is_infeasible() {
        let mut fx = Fixture::new(SubjectKind::Theory);
        let candidate = entry(&fx.subject, 1, 1, 1, 1);

        let ctx = SlotContext { blocked_day: None, ..fx.ctx() };
        assert_eq!(admit(&candidate, &Board::new(), &ctx), Err(Rejection::ClosedDay { day: 1 }));

        fx.day.max_pairs = 0;
        let err = admit(&candidate, &Board::new(), &fx.ctx()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CannotSchedule);
    }

    #[test]
    fn holiday_is_infeasible() {
        let fx = Fixture::new(SubjectKind::Theory);
        let candidate = entry(&fx.subject, 1, 1, 1, 1);
        let ctx = SlotContext { holiday: true, ..fx.ctx() };
        assert_eq!(
            admit(&candidate, &Board::new(), &ctx),
            Err(Rejection::Holiday { week: 1, day: 1 })
        );
    }

    #[test]
    fn session_must_end_within_day_capacity() {
        let mut fx = Fixture::new(SubjectKind::Practical);
        fx.day.max_pairs = 3;
        assert!(admit(&entry(&fx.subject, 1, 1, 1, 1), &Board::new(), &fx.ctx()).is_ok());
        assert_eq!(
            admit(&entry(&fx.subject, 1, 1, 1, 2), &Board::new(), &fx.ctx()),
            Err(Rejection::OverCapacity { day: 1, last: 4, max_pairs: 3 })
        );
    }

    #[test]
    fn overlap_reports_group_before_teacher() {
        let fx = Fixture::new(SubjectKind::Practical);
        let other = subject(2, SubjectKind::Theory);
        let candidate = entry(&fx.subject, 1, 1, 1, 1);

        let board = Board::seeded(&[entry(&other, 1, 1, 1, 2)]);
        assert_eq!(admit(&candidate, &board, &fx.ctx()), Err(Rejection::GroupBusy { pair: 2 }));

        let board = Board::seeded(&[entry(&other, 2, 1, 1, 3)]);
        assert_eq!(admit(&candidate, &board, &fx.ctx()), Err(Rejection::TeacherBusy { pair: 3 }));

        // Another group's teacher first, then this group, in the same cell.
        let board = Board::seeded(&[entry(&other, 2, 1, 1, 1), entry(&other, 1, 5, 1, 1)]);
        assert_eq!(admit(&candidate, &board, &fx.ctx()), Err(Rejection::GroupBusy { pair: 1 }));

        let board = Board::seeded(&[entry(&other, 2, 2, 1, 1)]);
        assert!(admit(&candidate, &board, &fx.ctx()).is_ok());
    }

    #[test]
    fn hour_caps_checked_group_first_daily_first() {
        let mut fx = Fixture::new(SubjectKind::Theory);
        let other = subject(2, SubjectKind::Theory);
        let candidate = entry(&fx.subject, 1, 1, 1, 4);
        let board = Board::seeded(&[entry(&other, 1, 1, 1, 1)]);

        fx.group.daily_limit_max = 2;
        fx.teacher.max_daily_hours = 2;
        let err = admit(&candidate, &board, &fx.ctx()).unwrap_err();
        assert_eq!(err, Rejection::GroupDaily { hours: 4, limit: 2 });
        assert_eq!(err.code(), ErrorCode::DailyLimitExceeded);

        fx.group.daily_limit_max = 10;
        fx.group.weekly_limit_max = 3;
        let err = admit(&candidate, &board, &fx.ctx()).unwrap_err();
        assert_eq!(err, Rejection::GroupWeekly { hours: 4, limit: 3 });
        assert_eq!(err.code(), ErrorCode::WeeklyLimitExceeded);

        fx.group.weekly_limit_max = 30;
        assert_eq!(
            admit(&candidate, &board, &fx.ctx()),
            Err(Rejection::TeacherDaily { hours: 4, limit: 2 })
        );

        fx.teacher.max_daily_hours = 10;
        fx.teacher.max_weekly_hours = 2;
        assert_eq!(
            admit(&candidate, &board, &fx.ctx()),
            Err(Rejection::TeacherWeekly { hours: 4, limit: 2 })
        );
    }

    #[test]
    fn practical_sessions_skip_adjacent_days() {
        let mut fx = Fixture::new(SubjectKind::Practical);
        let board = Board::seeded(&[entry(&fx.subject, 1, 1, 2, 1)]);

        for day in [1, 3] {
            fx.day.day = day;
            let candidate = entry(&fx.subject, 1, 1, day, 1);
            assert_eq!(
                admit(&candidate, &board, &fx.ctx()),
                Err(Rejection::AdjacentPractical { other: 2 })
            );
        }

        fx.day.day = 4;
        assert!(admit(&entry(&fx.subject, 1, 1, 4, 1), &board, &fx.ctx()).is_ok());

        // A different week does not count.
        fx.day.day = 3;
        let mut next_week = entry(&fx.subject, 1, 1, 3, 1);
        next_week.week_number = 2;
        assert!(admit(&next_week, &board, &fx.ctx()).is_ok());
    }

    #[test]
    fn theory_starts_only_at_anchor_pairs() {
        let fx = Fixture::new(SubjectKind::Theory);
        for pair in 1..=5 {
            let result = admit(&entry(&fx.subject, 1, 1, 1, pair), &Board::new(), &fx.ctx());
            if THEORY_ANCHOR_PAIRS.contains(&pair) {
                assert!(result.is_ok(), "pair {pair} should be admitted");
            } else {
                assert_eq!(result, Err(Rejection::OffAnchor { pair }));
            }
        }
    }

    #[test]
    fn rejection_converts_to_typed_error() {
        let err: ScheduleError = Rejection::TeacherBusy { pair: 2 }.into();
        assert_eq!(err.code(), ErrorCode::TeacherConflict);
        let err: ScheduleError = Rejection::OffAnchor { pair: 2 }.into();
        assert!(err.is_cannot_schedule());
    }
}
