//! In-memory persistence for the dataset and the committed timetable.
//!
//! Entries are only ever replaced as a whole; callers hand in the complete
//! result of a successful run and a failed run never reaches the store.

use crate::data::{Dataset, GroupId, GroupTimetable, Holiday, ScheduleEntry};
use itertools::Itertools;
use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read dataset file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    dataset: Dataset,
    entries: Vec<ScheduleEntry>,
}

impl Store {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            entries: Vec::new(),
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset: Dataset = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "Loaded dataset from {}: {} groups, {} teachers, {} subjects",
            path.display(),
            dataset.groups.len(),
            dataset.teachers.len(),
            dataset.subjects.len()
        );
        Ok(Self::new(dataset))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Swaps in a new dataset. Entries built against the old one are dropped.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.entries.clear();
    }

    pub fn replace_entries(&mut self, entries: Vec<ScheduleEntry>) {
        self.entries = entries;
    }

    pub fn record_holiday(&mut self, holiday: Holiday) {
        if !self.dataset.holidays.contains(&holiday) {
            self.dataset.holidays.push(holiday);
        }
    }

    /// One group's slice of the timetable, ordered by week, day and pair.
    pub fn group_timetable(&self, group_id: GroupId) -> Option<GroupTimetable> {
        let group = self.dataset.group(group_id)?.clone();
        let entries = self
            .entries
            .iter()
            .filter(|e| e.group_id == group_id)
            .sorted_by_key(|e| (e.week_number, e.day, e.pair_start))
            .copied()
            .collect();
        let subjects = self
            .dataset
            .subjects
            .iter()
            .filter(|s| s.group_id == group_id)
            .cloned()
            .collect();

        Some(GroupTimetable {
            group,
            entries,
            teachers: self.dataset.teachers.clone(),
            subjects,
        })
    }
}
