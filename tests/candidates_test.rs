//! Tests for candidate extraction and diffing.

use offer_revive::candidates::{self, CandidateSet};
use offer_revive::model::*;

fn item(name: &str, status: Status) -> WorkItem {
    WorkItem::from_step(&StepInfo::new(name, status))
}

#[test]
fn extract_keeps_only_pending_and_prepared() {
    let steps = vec![
        StepInfo::new("a", Status::Pending),
        StepInfo::new("b", Status::Prepared),
        StepInfo::new("c", Status::Starting),
        StepInfo::new("d", Status::Started),
        StepInfo::new("e", Status::Complete),
        StepInfo::new("f", Status::Error),
        StepInfo::new("g", Status::Waiting),
        StepInfo::new("h", Status::InProgress),
    ];

    let set = candidates::extract(&steps);

    assert_eq!(set.len(), 2);
    assert!(set.contains(&item("a", Status::Pending)));
    assert!(set.contains(&item("b", Status::Prepared)));
}

#[test]
fn extract_projects_recovery_hint() {
    let hint = RecoveryHint::new("hdfs-1", RecoveryType::Permanent);
    let steps = vec![StepInfo::new("hdfs-1-node", Status::Pending).recovery(hint.clone())];

    let set = candidates::extract(&steps);
    let only = set.iter().next().unwrap();

    assert_eq!(only.recovery.as_ref(), Some(&hint));
}

#[test]
fn same_name_different_hints_are_distinct() {
    let steps = vec![
        StepInfo::new("x", Status::Pending)
            .recovery(RecoveryHint::new("x-0", RecoveryType::Transient)),
        StepInfo::new("x", Status::Pending)
            .recovery(RecoveryHint::new("x-0", RecoveryType::Permanent)),
        StepInfo::new("x", Status::Pending),
    ];

    assert_eq!(candidates::extract(&steps).len(), 3);
}

#[test]
fn identical_steps_collapse() {
    let steps = vec![
        StepInfo::new("x", Status::Pending),
        StepInfo::new("x", Status::Pending),
    ];

    assert_eq!(candidates::extract(&steps).len(), 1);
}

#[test]
fn new_since_is_asymmetric() {
    let old: CandidateSet = [item("a", Status::Pending), item("b", Status::Pending)]
        .into_iter()
        .collect();
    let current: CandidateSet = [item("b", Status::Pending), item("c", Status::Pending)]
        .into_iter()
        .collect();

    let new = current.new_since(&old);

    assert_eq!(new.len(), 1);
    assert!(new.contains(&item("c", Status::Pending)));
    assert!(old.new_since(&old).is_empty());
}

#[test]
fn subset_has_no_new_items() {
    let old: CandidateSet = [item("a", Status::Pending), item("b", Status::Prepared)]
        .into_iter()
        .collect();
    let current: CandidateSet = [item("a", Status::Pending)].into_iter().collect();

    assert!(current.new_since(&old).is_empty());
}

#[test]
fn work_item_display() {
    let plain = item("web-0-server", Status::Pending);
    let recovering = WorkItem::from_step(
        &StepInfo::new("kafka-0-broker", Status::Prepared)
            .recovery(RecoveryHint::new("kafka-0", RecoveryType::Transient)),
    );

    assert_eq!(plain.to_string(), "web-0-server [PENDING][N/A]");
    assert_eq!(recovering.to_string(), "kafka-0-broker [PREPARED][TRANSIENT]");
}

#[test]
fn candidate_set_display_is_sorted() {
    let set: CandidateSet = [item("b", Status::Pending), item("a", Status::Pending)]
        .into_iter()
        .collect();

    assert_eq!(set.to_string(), "[a [PENDING][N/A], b [PENDING][N/A]]");
    assert_eq!(CandidateSet::new().to_string(), "[]");
}
