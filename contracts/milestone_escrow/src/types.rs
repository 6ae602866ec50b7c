//! # Types
//!
//! Shared data structures used across all modules of the escrow contract.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Project` is internally stored as two separate ledger entries:
//!
//! - [`ProjectConfig`] — written once at creation; never mutated.
//! - [`ProjectState`] — written on every backing and lifecycle transition.
//!
//! The public API exposes the reconstructed [`Project`] struct for convenience.
//!
//! ### Status as a Finite-State Machine
//!
//! [`ProjectStatus`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Draft ──► Funding ──► Active ──► Completed
//!               │           └────► Cancelled   (milestone failure)
//!               └──► Cancelled                 (creator cancel)
//! ```
//!
//! Each milestone runs its own sub-machine underneath an `Active` project:
//!
//! ```text
//! Pending ──► Active ──► InReview ──► (funds_released = true, terminal)
//!                 │
//!                 └──► Failed                  (deadline missed)
//! ```
//!
//! A released milestone keeps the `InReview` status; `funds_released` is the
//! terminal marker, so the status enum never moves backward.

use soroban_sdk::{contracttype, Address, String};

/// Current lifecycle state of a funding project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProjectStatus {
    /// Under construction by the creator; milestones and reviewers mutable.
    Draft,
    /// Accepting backer contributions, goal not yet reached.
    Funding,
    /// Goal reached; milestones being delivered and released in order.
    Active,
    /// Every milestone released; nothing left in escrow for this project.
    Completed,
    /// Terminated by the creator or by a failed milestone; refunds unlocked.
    Cancelled,
}

/// Current state of a single milestone.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MilestoneStatus {
    /// Created but not yet reachable; an earlier milestone is still open.
    Pending,
    /// The milestone currently being delivered.
    Active,
    /// Submitted by the creator; collecting votes or reviewer approvals.
    InReview,
    /// Deadline passed while still Active; kills the owning project.
    Failed,
}

/// How milestone completion is verified for a project.
///
/// Exactly two strategies exist, so this is a closed tag rather than an open
/// trait: the verification engine switches on it at release time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VerificationMode {
    /// Backers vote; release requires strictly more approvals than rejections.
    Voting,
    /// Designated reviewers approve; a single approval suffices.
    Reviewer,
}

/// Immutable project configuration, written once at creation.
///
/// Stored separately from mutable state so that high-frequency writes
/// (backings, milestone transitions) touch only the small [`ProjectState`]
/// entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u64,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub goal: i128,
    pub mode: VerificationMode,
    /// Ledger sequence by which the funding goal must be reached.
    pub deadline: u32,
}

/// Mutable project state, updated by funding and lifecycle operations.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    pub status: ProjectStatus,
    /// Total value contributed by backers. Non-decreasing; also the
    /// denominator for milestone and refund arithmetic.
    pub raised: i128,
    /// Total value paid out of escrow by released milestones.
    pub released: i128,
    pub milestone_count: u32,
    /// Running sum of milestone percentages; capped at 100.
    pub percent_allocated: u32,
}

/// Full representation of a funding project.
///
/// Used as the public API return type; reconstructed internally from the
/// split `ProjectConfig` + `ProjectState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    /// Auto-incremented unique ID.
    pub id: u64,
    /// Address that created the project and receives released funds.
    pub creator: Address,
    pub title: String,
    pub description: String,
    /// Funding goal in units of the configured escrow token.
    pub goal: i128,
    /// Verification strategy, fixed at creation.
    pub mode: VerificationMode,
    /// Funding deadline (ledger sequence).
    pub deadline: u32,
    /// Current lifecycle state.
    pub status: ProjectStatus,
    pub raised: i128,
    pub released: i128,
    pub milestone_count: u32,
    pub percent_allocated: u32,
}

/// A single milestone, keyed in storage by `(project id, index)`.
///
/// Indices are dense, zero-based, and creation-ordered.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Milestone {
    pub index: u32,
    pub title: String,
    pub description: String,
    /// Share of `raised` this milestone releases, 1–100.
    pub percentage: u32,
    /// Ledger sequence by which the creator must submit for verification.
    pub deadline: u32,
    pub status: MilestoneStatus,
    pub approvals: u32,
    pub rejections: u32,
    /// Flips false → true exactly once, at release.
    pub funds_released: bool,
}

/// A backer's contribution record, keyed by `(project id, backer)`.
///
/// One record per backer per project; re-backing is rejected rather than
/// accumulated.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Backer {
    pub amount: i128,
    pub refunded: bool,
}

/// A cast vote, keyed by `(project id, milestone index, voter)`.
///
/// Exists only for Voting-mode projects; immutable once cast.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vote {
    pub approved: bool,
}
