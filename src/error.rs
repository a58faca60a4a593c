use serde::Serialize;
use thiserror::Error;

/// Stable, machine-readable failure codes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidSubjectHours,
    WeeklyLimitExceeded,
    DailyLimitExceeded,
    TeacherConflict,
    GroupConflict,
    CannotSchedule,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidSubjectHours => "INVALID_SUBJECT_HOURS",
            ErrorCode::WeeklyLimitExceeded => "WEEKLY_LIMIT_EXCEEDED",
            ErrorCode::DailyLimitExceeded => "DAILY_LIMIT_EXCEEDED",
            ErrorCode::TeacherConflict => "TEACHER_CONFLICT",
            ErrorCode::GroupConflict => "GROUP_CONFLICT",
            ErrorCode::CannotSchedule => "CANNOT_SCHEDULE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid subject hours: {0}")]
    InvalidSubjectHours(String),
    #[error("weekly limit exceeded: {0}")]
    WeeklyLimitExceeded(String),
    #[error("daily limit exceeded: {0}")]
    DailyLimitExceeded(String),
    #[error("teacher conflict: {0}")]
    TeacherConflict(String),
    #[error("group conflict: {0}")]
    GroupConflict(String),
    #[error("cannot schedule: {0}")]
    CannotSchedule(String),
}

impl ScheduleError {
    pub fn cannot_schedule(message: impl Into<String>) -> Self {
        ScheduleError::CannotSchedule(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ScheduleError::InvalidSubjectHours(_) => ErrorCode::InvalidSubjectHours,
            ScheduleError::WeeklyLimitExceeded(_) => ErrorCode::WeeklyLimitExceeded,
            ScheduleError::DailyLimitExceeded(_) => ErrorCode::DailyLimitExceeded,
            ScheduleError::TeacherConflict(_) => ErrorCode::TeacherConflict,
            ScheduleError::GroupConflict(_) => ErrorCode::GroupConflict,
            ScheduleError::CannotSchedule(_) => ErrorCode::CannotSchedule,
        }
    }

    pub fn is_cannot_schedule(&self) -> bool {
        matches!(self, ScheduleError::CannotSchedule(_))
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
