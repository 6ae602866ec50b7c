//! # Verification — dual-mode milestone approval
//!
//! Implements the two verification strategies carried on the project config:
//!
//! ```text
//! VerificationMode::Voting    backers vote; release needs approvals > rejections
//! VerificationMode::Reviewer  designated reviewers approve; release needs approvals > 0
//! ```
//!
//! ## Storage layout
//!
//! - `DataKey::Reviewer(project, addr)` → `bool` — reviewer active flag.
//! - `DataKey::Vote(project, index, addr)` → `Vote` — one ballot per backer
//!   per milestone, immutable once cast.
//!
//! ## Decision rules
//!
//! The approval rule is evaluated at release time, not when votes land:
//!
//! - **Voting**: strict majority of *cast* votes (`approvals > rejections`).
//!   Abstaining backers do not count either way, so abstentions favor
//!   approval only if nobody rejects. Votes are unweighted; contribution
//!   size buys no extra weight.
//! - **Reviewer**: any single active reviewer's approval suffices. There is
//!   no rejection entry point — a milestone nobody approves simply stalls in
//!   review.
//!
//! Every mutation emits an event so off-chain indexers can reconstruct the
//! full tally without scanning storage.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::events;
use crate::storage;
use crate::types::{Milestone, VerificationMode, Vote};
use crate::Error;

// ─────────────────────────────────────────────────────────
// Reviewer registration
// ─────────────────────────────────────────────────────────

/// Register `reviewer` as active for `project_id`.
///
/// Re-registering an existing reviewer just rewrites the flag.
/// Emits a `rev_added` event.
pub fn register_reviewer(env: &Env, project_id: u64, reviewer: &Address) {
    storage::set_reviewer(env, project_id, reviewer, true);
    events::emit_reviewer_added(env, project_id, reviewer.clone());
}

/// Assert that `caller` is an active reviewer for `project_id`.
/// Panics with `Error::NotAuthorized` otherwise.
pub fn require_active_reviewer(env: &Env, project_id: u64, caller: &Address) {
    match storage::get_reviewer(env, project_id, caller) {
        Some(true) => {}
        _ => panic_with_error!(env, Error::NotAuthorized),
    }
}

/// Assert that `caller` holds a backer record for `project_id`.
/// Voting rights derive solely from having backed the project.
pub fn require_backer(env: &Env, project_id: u64, caller: &Address) {
    if storage::try_load_backer(env, project_id, caller).is_none() {
        panic_with_error!(env, Error::NotAuthorized);
    }
}

// ─────────────────────────────────────────────────────────
// Ballots
// ─────────────────────────────────────────────────────────

/// Record `voter`'s ballot on `milestone` and update its tally.
///
/// - One vote per backer per milestone; a second ballot panics with
///   `Error::AlreadyVoted`.
/// - The caller persists the updated milestone.
///
/// Emits a `voted` event.
pub fn record_vote(
    env: &Env,
    project_id: u64,
    voter: &Address,
    approve: bool,
    milestone: &mut Milestone,
) {
    if storage::get_vote(env, project_id, milestone.index, voter).is_some() {
        panic_with_error!(env, Error::AlreadyVoted);
    }
    storage::save_vote(env, project_id, milestone.index, voter, &Vote { approved: approve });
    if approve {
        milestone.approvals += 1;
    } else {
        milestone.rejections += 1;
    }
    events::emit_vote_cast(env, project_id, milestone.index, voter.clone(), approve);
}

/// Record an approval from an active reviewer on `milestone`.
///
/// Reviewer approvals are a bare counter, not per-identity ballots; the
/// release rule only asks whether at least one approval exists.
///
/// Emits an `approved` event.
pub fn record_reviewer_approval(
    env: &Env,
    project_id: u64,
    reviewer: &Address,
    milestone: &mut Milestone,
) {
    milestone.approvals += 1;
    events::emit_reviewer_approved(env, project_id, milestone.index, reviewer.clone());
}

// ─────────────────────────────────────────────────────────
// Release gate
// ─────────────────────────────────────────────────────────

/// Evaluate the approval rule for `milestone` under `mode`.
pub fn is_approved(mode: &VerificationMode, milestone: &Milestone) -> bool {
    match mode {
        VerificationMode::Voting => milestone.approvals > milestone.rejections,
        VerificationMode::Reviewer => milestone.approvals > 0,
    }
}

/// Assert the approval rule holds; panics with `Error::NotApproved` otherwise.
/// Gates `release_milestone_funds`.
#[inline]
pub fn require_approved(env: &Env, mode: &VerificationMode, milestone: &Milestone) {
    if !is_approved(mode, milestone) {
        panic_with_error!(env, Error::NotApproved);
    }
}
