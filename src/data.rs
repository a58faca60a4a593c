use serde::{Deserialize, Serialize};
use std::fmt;

// Type aliases for clarity
pub type GroupId = u32;
pub type TeacherId = u32;
pub type SubjectId = u32;
pub type Week = u32;
pub type Weekday = u32;
pub type Pair = u32;
pub type Hours = u32;

pub const WEEKS_PER_YEAR: Week = 52;
pub const DAYS_PER_WEEK: Weekday = 6;
pub const PAIRS_PER_DAY: Pair = 5;
pub const HOURS_PER_PAIR: Hours = 2;

/// A cohort of learners sharing one timetable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub weekly_limit_min: Hours,
    pub weekly_limit_max: Hours,
    #[serde(default)]
    pub daily_limit_min: Hours,
    pub daily_limit_max: Hours,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub max_daily_hours: Hours,
    pub max_weekly_hours: Hours,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectKind {
    Theory,
    Practical,
}

impl SubjectKind {
    /// Pairs occupied by one session.
    pub fn session_pairs(self) -> Pair {
        match self {
            SubjectKind::Theory => 1,
            SubjectKind::Practical => 3,
        }
    }

    /// Hours one session converts to; `total_hours` must be a multiple of this.
    pub fn session_hours(self) -> Hours {
        self.session_pairs() * HOURS_PER_PAIR
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectKind::Theory => write!(f, "THEORY"),
            SubjectKind::Practical => write!(f, "PRACTICAL"),
        }
    }
}

/// A unit of instruction owned by one group and taught by one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SubjectKind,
    pub total_hours: Hours,
    pub weekly_hours: Hours,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub semester: u32,
    pub department: String,
    pub group_id: GroupId,
    pub teacher_id: Option<TeacherId>,
}

impl Subject {
    pub fn required_sessions(&self) -> u32 {
        self.total_hours / self.kind.session_hours()
    }
}

/// Per-weekday capacity ceiling. `max_pairs == 0` marks a non-teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlockedDay {
    pub day: Weekday,
    pub max_pairs: Pair,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Holiday {
    pub date: String,
    pub week_number: Week,
    pub day: Weekday,
}

impl Holiday {
    pub fn covers(&self, week: Week, day: Weekday) -> bool {
        self.week_number == week && self.day == day
    }

    /// Whether the holiday names a real week and weekday of the calendar.
    pub fn is_in_calendar(&self) -> bool {
        (1..=WEEKS_PER_YEAR).contains(&self.week_number) && (1..=DAYS_PER_WEEK).contains(&self.day)
    }
}

/// One committed placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct ScheduleEntry {
    pub group_id: GroupId,
    pub teacher_id: TeacherId,
    pub subject_id: SubjectId,
    pub week_number: Week,
    pub day: Weekday,
    pub pair_start: Pair,
    pub pair_length: Pair,
}

impl ScheduleEntry {
    pub fn pair_end(&self) -> Pair {
        self.pair_start + self.pair_length - 1
    }

    /// Pair indices this entry occupies, inclusive.
    pub fn pairs(&self) -> std::ops::RangeInclusive<Pair> {
        self.pair_start..=self.pair_end()
    }

    pub fn hours(&self) -> Hours {
        self.pair_length * HOURS_PER_PAIR
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "W{} D{} P{}-{}: subject {} (group {}, teacher {})",
            self.week_number,
            self.day,
            self.pair_start,
            self.pair_end(),
            self.subject_id,
            self.group_id,
            self.teacher_id
        )
    }
}

/// The complete input snapshot for one generation or repair run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Dataset {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub blocked_days: Vec<BlockedDay>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl Dataset {
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    pub fn blocked_day(&self, day: Weekday) -> Option<&BlockedDay> {
        self.blocked_days.iter().find(|d| d.day == day)
    }

    pub fn is_holiday(&self, week: Week, day: Weekday) -> bool {
        self.holidays.iter().any(|h| h.covers(week, day))
    }
}

/// Display severity of an entry, derived at view time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hard,
    Soft,
    Clear,
}

impl Severity {
    pub fn color(self) -> &'static str {
        match self {
            Severity::Hard => "red",
            Severity::Soft => "yellow",
            Severity::Clear => "green",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledEntry {
    #[serde(flatten)]
    pub entry: ScheduleEntry,
    pub severity: Severity,
    pub color: &'static str,
}

/// Everything needed to render one group's printable timetable.
#[derive(Debug, Clone, Serialize)]
pub struct GroupTimetable {
    pub group: Group,
    pub entries: Vec<ScheduleEntry>,
    pub teachers: Vec<Teacher>,
    pub subjects: Vec<Subject>,
}
