
#![allow(dead_code)]

extern crate std;

use crate::types::{Project, ProjectStatus};

/// INV-1: Funding goal must always be positive.
pub fn assert_goal_positive(project: &Project) {
    assert!(
        project.goal > 0,
        "INV-1 violated: project {} has non-positive goal ({})",
        project.id,
        project.goal
    );
}

/// INV-2: Raised total must be non-negative and cover everything released.
pub fn assert_released_covered(project: &Project) {
    assert!(
        project.raised >= 0,
        "INV-2 violated: project {} has negative raised ({})",
        project.id,
        project.raised
    );
    assert!(
        project.released <= project.raised,
        "INV-2 violated: project {} released {} of only {} raised",
        project.id,
        project.released,
        project.raised
    );
}

/// INV-3: Milestone percentages never allocate more than the whole escrow.
pub fn assert_percent_within_cap(project: &Project) {
    assert!(
        project.percent_allocated <= 100,
        "INV-3 violated: project {} allocates {}%",
        project.id,
        project.percent_allocated
    );
}

/// INV-4: Project deadline must be positive.
pub fn assert_deadline_positive(project: &Project) {
    assert!(
        project.deadline > 0,
        "INV-4 violated: project {} has zero deadline",
        project.id
    );
}

/// INV-5: Backing invariant — after a contribution of `amount`, the raised
/// total should increase by exactly `amount`.
pub fn assert_backing_invariant(raised_before: i128, raised_after: i128, amount: i128) {
    assert_eq!(
        raised_after,
        raised_before + amount,
        "INV-5 violated: backing invariant broken: {} + {} != {}",
        raised_before,
        amount,
        raised_after
    );
}

/// INV-6: Project IDs are sequential starting from 0.
pub fn assert_sequential_ids(projects: &[Project]) {
    for (i, project) in projects.iter().enumerate() {
        assert_eq!(
            project.id, i as u64,
            "INV-6 violated: expected id {}, got {}",
            i, project.id
        );
    }
}

/// INV-7: Status transition validity. Only forward transitions are allowed:
///   Draft   -> Funding
///   Funding -> Active | Cancelled
///   Active  -> Completed | Cancelled
///   Completed -> (none)
///   Cancelled -> (none)
pub fn assert_valid_status_transition(from: &ProjectStatus, to: &ProjectStatus) {
    let valid = matches!(
        (from, to),
        (ProjectStatus::Draft, ProjectStatus::Funding)
            | (ProjectStatus::Funding, ProjectStatus::Active)
            | (ProjectStatus::Funding, ProjectStatus::Cancelled)
            | (ProjectStatus::Active, ProjectStatus::Completed)
            | (ProjectStatus::Active, ProjectStatus::Cancelled)
    );

    assert!(
        valid,
        "INV-7 violated: invalid status transition from {:?} to {:?}",
        from, to
    );
}

/// INV-8: Release split conservation — the creator share and platform fee
/// recombine to exactly the floor-divided milestone amount, and never exceed
/// what was raised.
pub fn assert_split_conserves(raised: i128, percentage: u32, creator_amount: i128, fee: i128) {
    let gross = raised * percentage as i128 / 100;
    assert_eq!(
        creator_amount + fee,
        gross,
        "INV-8 violated: {} + {} != floor({} * {} / 100)",
        creator_amount,
        fee,
        raised,
        percentage
    );
    assert!(
        gross <= raised,
        "INV-8 violated: milestone amount {} exceeds raised {}",
        gross,
        raised
    );
}

/// Run all stateless project invariants.
pub fn assert_all_project_invariants(project: &Project) {
    assert_goal_positive(project);
    assert_released_covered(project);
    assert_percent_within_cap(project);
    assert_deadline_positive(project);
}
