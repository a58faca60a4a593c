use crate::data::{Subject, SubjectKind};
use std::cmp::Reverse;

/// Placement order: ascending priority, practicals before theory, then larger
/// `total_hours` first. Fully tied subjects keep their input order.
pub fn placement_order(subjects: &[Subject]) -> Vec<&Subject> {
    let mut ordered: Vec<&Subject> = subjects.iter().collect();
    ordered.sort_by_key(|s| {
        (
            s.priority,
            s.kind != SubjectKind::Practical,
            Reverse(s.total_hours),
        )
    });
    ordered
}
