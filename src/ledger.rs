//! Working state of one generation run.
//!
//! [`Board`] owns the growing list of committed entries together with the
//! lookup tables the feasibility check needs, so each check costs the same
//! regardless of how many entries are already placed:
//!
//! - `(week, day, pair)` to the entries occupying that cell
//! - running hour totals per `(week, group)`, `(week, day, group)`,
//!   `(week, teacher)` and `(week, day, teacher)`
//! - `(subject, week)` to the weekdays that subject already uses
//!
//! Tables are only ever updated through [`Board::commit`].

use crate::data::{
    GroupId, Hours, Pair, ScheduleEntry, SubjectId, TeacherId, Week, Weekday,
};
use std::collections::HashMap;

/// Running hour totals, keyed the same way the caps are expressed.
#[derive(Debug, Clone, Default)]
pub struct HourLedger {
    group_week: HashMap<(Week, GroupId), Hours>,
    group_day: HashMap<(Week, Weekday, GroupId), Hours>,
    teacher_week: HashMap<(Week, TeacherId), Hours>,
    teacher_day: HashMap<(Week, Weekday, TeacherId), Hours>,
}

impl HourLedger {
    fn record(&mut self, entry: &ScheduleEntry) {
        let add = entry.hours();
        let (week, day) = (entry.week_number, entry.day);
        *self.group_week.entry((week, entry.group_id)).or_default() += add;
        *self.group_day.entry((week, day, entry.group_id)).or_default() += add;
        *self.teacher_week.entry((week, entry.teacher_id)).or_default() += add;
        *self.teacher_day.entry((week, day, entry.teacher_id)).or_default() += add;
    }

    #[inline]
    pub fn group_weekly(&self, week: Week, group: GroupId) -> Hours {
        self.group_week.get(&(week, group)).copied().unwrap_or(0)
    }

    #[inline]
    pub fn group_daily(&self, week: Week, day: Weekday, group: GroupId) -> Hours {
        self.group_day.get(&(week, day, group)).copied().unwrap_or(0)
    }

    #[inline]
    pub fn teacher_weekly(&self, week: Week, teacher: TeacherId) -> Hours {
        self.teacher_week.get(&(week, teacher)).copied().unwrap_or(0)
    }

    #[inline]
    pub fn teacher_daily(&self, week: Week, day: Weekday, teacher: TeacherId) -> Hours {
        self.teacher_day.get(&(week, day, teacher)).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    entries: Vec<ScheduleEntry>,
    cells: HashMap<(Week, Weekday, Pair), Vec<usize>>,
    hours: HourLedger,
    subject_days: HashMap<(SubjectId, Week), Vec<Weekday>>,
    sessions: HashMap<SubjectId, u32>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from entries carried over from an earlier run. The
    /// entries are trusted and recorded without any feasibility check.
    pub fn seeded<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a ScheduleEntry>,
    {
        let mut board = Self::new();
        for entry in entries {
            board.commit(*entry);
        }
        board
    }

    pub fn commit(&mut self, entry: ScheduleEntry) {
        let index = self.entries.len();
        for pair in entry.pairs() {
            self.cells
                .entry((entry.week_number, entry.day, pair))
                .or_default()
                .push(index);
        }
        self.hours.record(&entry);
        self.subject_days
            .entry((entry.subject_id, entry.week_number))
            .or_default()
            .push(entry.day);
        *self.sessions.entry(entry.subject_id).or_default() += 1;
        self.entries.push(entry);
    }

    /// Entries occupying the given pair of the given week and day.
    pub fn occupants(
        &self,
        week: Week,
        day: Weekday,
        pair: Pair,
    ) -> impl Iterator<Item = &ScheduleEntry> + '_ {
        self.cells
            .get(&(week, day, pair))
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
    }

    #[inline]
    pub fn hours(&self) -> &HourLedger {
        &self.hours
    }

    /// Weekdays on which `subject` already has a session in `week`.
    pub fn subject_days(&self, subject: SubjectId, week: Week) -> &[Weekday] {
        self.subject_days
            .get(&(subject, week))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of sessions of `subject` committed so far.
    pub fn sessions_of(&self, subject: SubjectId) -> u32 {
        self.sessions.get(&subject).copied().unwrap_or(0)
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<ScheduleEntry> {
        self.entries
    }
}
