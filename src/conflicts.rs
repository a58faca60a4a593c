use crate::data::{LabeledEntry, ScheduleEntry, Severity, Subject, Teacher};
use itertools::Itertools;
use std::collections::HashMap;

/// Labels each entry for display. Entries sharing week, day and starting pair
/// are compared with each other: a shared teacher or group is hard, a subject
/// taught outside its teacher's department is soft.
///
/// Read-only and advisory; generation never consults it.
pub fn classify(entries: &[ScheduleEntry], subjects: &[Subject], teachers: &[Teacher]) -> Vec<LabeledEntry> {
    let cells: HashMap<_, Vec<usize>> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| ((e.week_number, e.day, e.pair_start), i))
        .into_group_map();
    let departments: HashMap<_, &str> = teachers.iter().map(|t| (t.id, t.department.as_str())).collect();

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let cell = &cells[&(entry.week_number, entry.day, entry.pair_start)];
            let clash = cell.iter().filter(|&&j| j != i).map(|&j| &entries[j]).any(|other| {
                other.teacher_id == entry.teacher_id || other.group_id == entry.group_id
            });

            let mismatch = subjects
                .iter()
                .find(|s| s.id == entry.subject_id)
                .zip(departments.get(&entry.teacher_id))
                .is_some_and(|(subject, &department)| subject.department != department);

            let severity = if clash {
                Severity::Hard
            } else if mismatch {
                Severity::Soft
            } else {
                Severity::Clear
            };
            LabeledEntry {
                entry: *entry,
                severity,
                color: severity.color(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SubjectKind;

    fn teacher(id: u32, department: &str) -> Teacher {
        Teacher {
            id,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            department: department.into(),
            max_daily_hours: 10,
            max_weekly_hours: 30,
        }
    }

    fn subject(id: u32, department: &str) -> Subject {
        Subject {
            id,
            name: format!("S{id}"),
            kind: SubjectKind::Theory,
            total_hours: 2,
            weekly_hours: 2,
            priority: 1,
            semester: 1,
            department: department.into(),
            group_id: 1,
            teacher_id: Some(1),
        }
    }

    fn entry(subject: u32, group: u32, teacher: u32, pair: u32) -> ScheduleEntry {
        ScheduleEntry {
            group_id: group,
            teacher_id: teacher,
            subject_id: subject,
            week_number: 1,
            day: 1,
            pair_start: pair,
            pair_length: 1,
        }
    }

    fn colors(labeled: &[LabeledEntry]) -> Vec<&'static str> {
        labeled.iter().map(|l| l.color).collect()
    }

    #[test]
    fn separate_cells_are_clear() {
        let entries = [entry(1, 1, 1, 1), entry(1, 1, 1, 4)];
        let labeled = classify(&entries, &[subject(1, "Math")], &[teacher(1, "Math")]);
        assert_eq!(colors(&labeled), vec!["green", "green"]);
        assert_eq!(labeled[0].entry, entries[0]);
    }

    #[test]
    fn shared_teacher_or_group_is_hard() {
        let subjects = [subject(1, "Math"), subject(2, "Math")];
        let teachers = [teacher(1, "Math"), teacher(2, "Math")];

        let shared_teacher = [entry(1, 1, 1, 1), entry(2, 2, 1, 1)];
        assert_eq!(colors(&classify(&shared_teacher, &subjects, &teachers)), vec!["red", "red"]);

        let shared_group = [entry(1, 1, 1, 1), entry(2, 1, 2, 1)];
        let labeled = classify(&shared_group, &subjects, &teachers);
        assert!(labeled.iter().all(|l| l.severity == Severity::Hard));
    }

    #[test]
    fn department_mismatch_is_soft() {
        let subjects = [subject(1, "Physics"), subject(2, "Math")];
        let teachers = [teacher(1, "Math"), teacher(2, "Math")];
        let entries = [entry(1, 1, 1, 1), entry(2, 2, 2, 1)];

        assert_eq!(colors(&classify(&entries, &subjects, &teachers)), vec!["yellow", "green"]);
    }

    #[test]
    fn hard_outranks_soft() {
        let subjects = [subject(1, "Physics")];
        let teachers = [teacher(1, "Math")];
        let entries = [entry(1, 1, 1, 1), entry(1, 2, 1, 1)];
        assert_eq!(colors(&classify(&entries, &subjects, &teachers)), vec!["red", "red"]);
    }

    #[test]
    fn overlap_with_different_start_is_not_compared() {
        let subjects = [subject(1, "Math")];
        let teachers = [teacher(1, "Math")];
        let mut long = entry(1, 1, 1, 1);
        long.pair_length = 3;
        let entries = [long, entry(1, 1, 1, 2)];
        assert_eq!(colors(&classify(&entries, &subjects, &teachers)), vec!["green", "green"]);
    }

    #[test]
    fn unknown_references_stay_clear() {
        let entries = [entry(9, 1, 9, 1)];
        let labeled = classify(&entries, &[subject(1, "Physics")], &[teacher(1, "Math")]);
        assert_eq!(labeled[0].severity, Severity::Clear);
    }
}
