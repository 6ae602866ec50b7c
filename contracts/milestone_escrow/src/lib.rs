//! # Milestone Escrow Contract
//!
//! This is the root crate of the **milestone-release crowdfunding escrow**.
//! It exposes the single Soroban contract `MilestoneEscrow` whose entry points
//! cover the full project lifecycle:
//!
//! | Phase        | Entry Point(s)                              |
//! |--------------|---------------------------------------------|
//! | Bootstrap    | [`MilestoneEscrow::init`]                   |
//! | Drafting     | `create_project`, `add_milestone`, `add_project_reviewer`, `activate_project` |
//! | Funding      | `back_project`, `cancel_project`, `request_refund` |
//! | Delivery     | `submit_milestone_for_verification`, `vote_on_milestone`, `reviewer_approve_milestone` |
//! | Settlement   | `release_milestone_funds`, `report_milestone_failure` |
//! | Queries      | `get_project`, `get_milestone`, `get_backer`, `get_reviewer`, `get_vote` |
//!
//! ## Architecture
//!
//! Approval decisions are fully delegated to [`verification`].  Value movement
//! and split arithmetic are fully delegated to [`escrow`].  Storage access is
//! fully delegated to [`storage`].  This file contains **only** the public
//! entry points, precondition checks, and event emissions.
//!
//! Deadlines are ledger sequence numbers; expiry is observed lazily when
//! someone calls `report_milestone_failure` or `request_refund` — there is no
//! active timer.  Every operation validates against current storage before
//! mutating anything, and a panic anywhere (including a rejected token
//! transfer) aborts the invocation with no state change.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, Address, Env, String,
};

pub mod escrow;
pub mod events;
pub mod verification;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod fuzz_test;
#[cfg(test)]
mod test_events;

use storage::{get_and_increment_project_id, load_project_pair, save_project, save_project_state};
pub use types::{
    Backer, Milestone, MilestoneStatus, Project, ProjectStatus, VerificationMode, Vote,
};

/// Upper bound on funding goals (10^30 stroop-scale units).
const MAX_GOAL: i128 = 1_000_000_000_000_000_000_000_000_000_000i128;

/// Bounded-length text limits, in bytes.
const MAX_TITLE_LEN: u32 = 100;
const MAX_DESCRIPTION_LEN: u32 = 500;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    ProjectNotFound = 1,
    MilestoneNotFound = 2,
    BackerNotFound = 3,
    NotAuthorized = 4,
    InvalidGoal = 5,
    InvalidPercentage = 6,
    InvalidDeadline = 7,
    InvalidAmount = 8,
    InvalidText = 9,
    ProjectNotDraft = 10,
    ProjectNotFunding = 11,
    ProjectNotActive = 12,
    MilestoneNotActive = 13,
    MilestoneNotInReview = 14,
    NoMilestones = 15,
    PercentageOverflow = 16,
    WrongVerificationMode = 17,
    AlreadyBacked = 18,
    AlreadyVoted = 19,
    AlreadyReleased = 20,
    AlreadyRefunded = 21,
    AlreadyInitialized = 22,
    DeadlinePassed = 23,
    DeadlineNotReached = 24,
    NotApproved = 25,
    RefundNotAvailable = 26,
    Overflow = 27,
    ProtocolPaused = 28,
}

#[contract]
pub struct MilestoneEscrow;

#[contractimpl]
impl MilestoneEscrow {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract: escrow token, platform treasury, and the
    /// admin who controls the emergency stop.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls panic with `Error::AlreadyInitialized`.
    pub fn init(env: Env, admin: Address, token: Address, treasury: Address) {
        admin.require_auth();
        if storage::has_admin(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        storage::set_admin(&env, &admin);
        storage::set_token(&env, &token);
        storage::set_treasury(&env, &treasury);
    }

    // ─────────────────────────────────────────────────────────
    // Emergency Control
    // ─────────────────────────────────────────────────────────

    /// Pause the protocol, halting every state-mutating project operation.
    ///
    /// - `caller` must be the admin.
    pub fn pause(env: Env, caller: Address) {
        caller.require_auth();
        Self::require_admin(&env, &caller);
        storage::set_paused(&env, true);
        events::emit_protocol_paused(&env, caller);
    }

    /// Unpause the protocol.
    ///
    /// - `caller` must be the admin.
    pub fn unpause(env: Env, caller: Address) {
        caller.require_auth();
        Self::require_admin(&env, &caller);
        storage::set_paused(&env, false);
        events::emit_protocol_unpaused(&env, caller);
    }

    /// Return true if the protocol is paused.
    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Drafting
    // ─────────────────────────────────────────────────────────

    /// Create a new project in `Draft` and return its ID.
    ///
    /// - `goal` must be positive (and below the sanity cap).
    /// - `deadline` must be a future ledger sequence.
    pub fn create_project(
        env: Env,
        creator: Address,
        title: String,
        description: String,
        goal: i128,
        mode: VerificationMode,
        deadline: u32,
    ) -> u64 {
        Self::require_not_paused(&env);
        creator.require_auth();

        Self::validate_text(&env, &title, &description);
        if goal <= 0 || goal > MAX_GOAL {
            panic_with_error!(&env, Error::InvalidGoal);
        }
        if deadline <= env.ledger().sequence() {
            panic_with_error!(&env, Error::InvalidDeadline);
        }

        let id = get_and_increment_project_id(&env);
        let project = Project {
            id,
            creator: creator.clone(),
            title,
            description,
            goal,
            mode,
            deadline,
            status: ProjectStatus::Draft,
            raised: 0,
            released: 0,
            milestone_count: 0,
            percent_allocated: 0,
        };
        save_project(&env, &project);

        events::emit_project_created(&env, id, creator, goal);
        id
    }

    /// Append a milestone to a `Draft` project and return its index.
    ///
    /// - Only the creator may call.
    /// - `percentage` must be 1–100, and the running sum across the
    ///   project's milestones may not exceed 100.
    /// - `deadline` must be a future ledger sequence.
    pub fn add_milestone(
        env: Env,
        project_id: u64,
        title: String,
        description: String,
        percentage: u32,
        deadline: u32,
    ) -> u32 {
        Self::require_not_paused(&env);
        let (config, mut state) = load_project_pair(&env, project_id);
        config.creator.require_auth();

        if state.status != ProjectStatus::Draft {
            panic_with_error!(&env, Error::ProjectNotDraft);
        }
        Self::validate_text(&env, &title, &description);
        if percentage == 0 || percentage > 100 {
            panic_with_error!(&env, Error::InvalidPercentage);
        }
        if state.percent_allocated + percentage > 100 {
            panic_with_error!(&env, Error::PercentageOverflow);
        }
        if deadline <= env.ledger().sequence() {
            panic_with_error!(&env, Error::InvalidDeadline);
        }

        let index = state.milestone_count;
        let milestone = Milestone {
            index,
            title,
            description,
            percentage,
            deadline,
            status: MilestoneStatus::Pending,
            approvals: 0,
            rejections: 0,
            funds_released: false,
        };
        storage::save_milestone(&env, project_id, &milestone);

        state.milestone_count += 1;
        state.percent_allocated += percentage;
        save_project_state(&env, project_id, &state);

        events::emit_milestone_added(&env, project_id, index, percentage, deadline);
        index
    }

    /// Register a reviewer on a `Draft` project in `Reviewer` mode.
    ///
    /// - Only the creator may call.
    pub fn add_project_reviewer(env: Env, project_id: u64, reviewer: Address) {
        Self::require_not_paused(&env);
        let (config, state) = load_project_pair(&env, project_id);
        config.creator.require_auth();

        if config.mode != VerificationMode::Reviewer {
            panic_with_error!(&env, Error::WrongVerificationMode);
        }
        if state.status != ProjectStatus::Draft {
            panic_with_error!(&env, Error::ProjectNotDraft);
        }

        verification::register_reviewer(&env, project_id, &reviewer);
    }

    /// Open a `Draft` project for funding.
    ///
    /// - Only the creator may call.
    /// - At least one milestone must be defined.
    pub fn activate_project(env: Env, project_id: u64) {
        Self::require_not_paused(&env);
        let (config, mut state) = load_project_pair(&env, project_id);
        config.creator.require_auth();

        if state.status != ProjectStatus::Draft {
            panic_with_error!(&env, Error::ProjectNotDraft);
        }
        if state.milestone_count == 0 {
            panic_with_error!(&env, Error::NoMilestones);
        }

        state.status = ProjectStatus::Funding;
        save_project_state(&env, project_id, &state);

        events::emit_project_activated(&env, project_id);
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` to a `Funding` project.
    ///
    /// A backer may contribute at most once per project. Reaching the goal
    /// transitions the project to `Active` and opens milestone 0; funding
    /// beyond the goal is accepted as-is.
    pub fn back_project(env: Env, project_id: u64, backer: Address, amount: i128) {
        Self::require_not_paused(&env);
        backer.require_auth();

        if amount <= 0 {
            panic_with_error!(&env, Error::InvalidAmount);
        }

        let (config, mut state) = load_project_pair(&env, project_id);
        if state.status != ProjectStatus::Funding {
            panic_with_error!(&env, Error::ProjectNotFunding);
        }
        if env.ledger().sequence() >= config.deadline {
            panic_with_error!(&env, Error::DeadlinePassed);
        }
        if storage::try_load_backer(&env, project_id, &backer).is_some() {
            panic_with_error!(&env, Error::AlreadyBacked);
        }
        let raised = state
            .raised
            .checked_add(amount)
            .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));

        escrow::deposit(&env, &backer, amount);

        storage::save_backer(
            &env,
            project_id,
            &backer,
            &Backer {
                amount,
                refunded: false,
            },
        );
        state.raised = raised;
        if state.raised >= config.goal {
            state.status = ProjectStatus::Active;
            let mut first = storage::load_milestone(&env, project_id, 0);
            first.status = MilestoneStatus::Active;
            storage::save_milestone(&env, project_id, &first);
        }
        save_project_state(&env, project_id, &state);

        events::emit_project_backed(&env, project_id, backer, amount, state.raised);
    }

    /// Cancel a `Funding` project, unlocking refunds.
    ///
    /// - Only the creator may call.
    pub fn cancel_project(env: Env, project_id: u64) {
        Self::require_not_paused(&env);
        let (config, mut state) = load_project_pair(&env, project_id);
        config.creator.require_auth();

        if state.status != ProjectStatus::Funding {
            panic_with_error!(&env, Error::ProjectNotFunding);
        }

        state.status = ProjectStatus::Cancelled;
        save_project_state(&env, project_id, &state);

        events::emit_project_cancelled(&env, project_id);
    }

    /// Return a backer's contribution out of escrow.
    ///
    /// Available when the project is `Cancelled`, or still `Funding` past its
    /// deadline with the goal unmet. Refunds are prorated against whatever
    /// has already been released, and succeed at most once per backer.
    pub fn request_refund(env: Env, project_id: u64, backer: Address) {
        Self::require_not_paused(&env);
        backer.require_auth();

        let (config, state) = load_project_pair(&env, project_id);
        let refundable = match state.status {
            ProjectStatus::Cancelled => true,
            ProjectStatus::Funding => {
                env.ledger().sequence() >= config.deadline && state.raised < config.goal
            }
            _ => false,
        };
        if !refundable {
            panic_with_error!(&env, Error::RefundNotAvailable);
        }

        let mut record = storage::load_backer(&env, project_id, &backer);
        if record.refunded {
            panic_with_error!(&env, Error::AlreadyRefunded);
        }

        let amount = escrow::refund_amount(&env, record.amount, state.released, state.raised);
        escrow::payout(&env, &backer, amount);

        record.refunded = true;
        storage::save_backer(&env, project_id, &backer, &record);

        events::emit_refund_issued(&env, project_id, backer, amount);
    }

    // ─────────────────────────────────────────────────────────
    // Delivery & verification
    // ─────────────────────────────────────────────────────────

    /// Submit the currently `Active` milestone for verification.
    ///
    /// - Only the creator may call; the project must be `Active`.
    pub fn submit_milestone_for_verification(env: Env, project_id: u64, index: u32) {
        Self::require_not_paused(&env);
        let (config, state) = load_project_pair(&env, project_id);
        config.creator.require_auth();

        if state.status != ProjectStatus::Active {
            panic_with_error!(&env, Error::ProjectNotActive);
        }
        let mut milestone = storage::load_milestone(&env, project_id, index);
        if milestone.status != MilestoneStatus::Active {
            panic_with_error!(&env, Error::MilestoneNotActive);
        }

        milestone.status = MilestoneStatus::InReview;
        storage::save_milestone(&env, project_id, &milestone);

        events::emit_milestone_submitted(&env, project_id, index);
    }

    /// Cast a ballot on an `InReview` milestone of a `Voting`-mode project.
    ///
    /// - `voter` must hold a backer record and not have voted on this
    ///   milestone before. One unweighted vote per backer.
    pub fn vote_on_milestone(env: Env, project_id: u64, index: u32, voter: Address, approve: bool) {
        Self::require_not_paused(&env);
        voter.require_auth();

        let (config, _state) = load_project_pair(&env, project_id);
        if config.mode != VerificationMode::Voting {
            panic_with_error!(&env, Error::WrongVerificationMode);
        }
        let mut milestone = storage::load_milestone(&env, project_id, index);
        if milestone.status != MilestoneStatus::InReview {
            panic_with_error!(&env, Error::MilestoneNotInReview);
        }
        verification::require_backer(&env, project_id, &voter);

        verification::record_vote(&env, project_id, &voter, approve, &mut milestone);
        storage::save_milestone(&env, project_id, &milestone);
    }

    /// Approve an `InReview` milestone of a `Reviewer`-mode project.
    ///
    /// - `reviewer` must be registered and active for this project.
    pub fn reviewer_approve_milestone(env: Env, project_id: u64, index: u32, reviewer: Address) {
        Self::require_not_paused(&env);
        reviewer.require_auth();

        let (config, _state) = load_project_pair(&env, project_id);
        if config.mode != VerificationMode::Reviewer {
            panic_with_error!(&env, Error::WrongVerificationMode);
        }
        verification::require_active_reviewer(&env, project_id, &reviewer);
        let mut milestone = storage::load_milestone(&env, project_id, index);
        if milestone.status != MilestoneStatus::InReview {
            panic_with_error!(&env, Error::MilestoneNotInReview);
        }

        verification::record_reviewer_approval(&env, project_id, &reviewer, &mut milestone);
        storage::save_milestone(&env, project_id, &milestone);
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Release an approved milestone's share of the escrow.
    ///
    /// Callable by anyone: the access-controlled step is the approval
    /// decision, not the release trigger. Pays the creator their share and
    /// the treasury its fee, then opens the next milestone or completes the
    /// project.
    pub fn release_milestone_funds(env: Env, project_id: u64, index: u32) {
        Self::require_not_paused(&env);

        let (config, mut state) = load_project_pair(&env, project_id);
        let mut milestone = storage::load_milestone(&env, project_id, index);
        if milestone.funds_released {
            panic_with_error!(&env, Error::AlreadyReleased);
        }
        if milestone.status != MilestoneStatus::InReview {
            panic_with_error!(&env, Error::MilestoneNotInReview);
        }
        verification::require_approved(&env, &config.mode, &milestone);

        let (creator_amount, platform_fee) =
            escrow::milestone_split(&env, state.raised, milestone.percentage);
        escrow::payout(&env, &config.creator, creator_amount);
        escrow::payout(&env, &storage::get_treasury(&env), platform_fee);

        milestone.funds_released = true;
        storage::save_milestone(&env, project_id, &milestone);

        state.released = state
            .released
            .checked_add(creator_amount + platform_fee)
            .unwrap_or_else(|| panic_with_error!(&env, Error::Overflow));
        if index + 1 < state.milestone_count {
            let mut next = storage::load_milestone(&env, project_id, index + 1);
            next.status = MilestoneStatus::Active;
            storage::save_milestone(&env, project_id, &next);
        } else {
            state.status = ProjectStatus::Completed;
        }
        save_project_state(&env, project_id, &state);

        events::emit_milestone_released(&env, project_id, index, creator_amount, platform_fee);
    }

    /// Fail an `Active` milestone whose deadline has passed without
    /// submission. Cancels the owning project — a single missed milestone
    /// kills the whole project.
    ///
    /// Callable by anyone; expiry is only ever observed through this call.
    pub fn report_milestone_failure(env: Env, project_id: u64, index: u32) {
        Self::require_not_paused(&env);

        let (_config, mut state) = load_project_pair(&env, project_id);
        if state.status != ProjectStatus::Active {
            panic_with_error!(&env, Error::ProjectNotActive);
        }
        let mut milestone = storage::load_milestone(&env, project_id, index);
        if milestone.status != MilestoneStatus::Active {
            panic_with_error!(&env, Error::MilestoneNotActive);
        }
        if env.ledger().sequence() < milestone.deadline {
            panic_with_error!(&env, Error::DeadlineNotReached);
        }

        milestone.status = MilestoneStatus::Failed;
        storage::save_milestone(&env, project_id, &milestone);
        state.status = ProjectStatus::Cancelled;
        save_project_state(&env, project_id, &state);

        events::emit_milestone_failed(&env, project_id, index);
        events::emit_project_cancelled(&env, project_id);
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_project(env: Env, project_id: u64) -> Option<Project> {
        storage::try_load_project(&env, project_id)
    }

    pub fn get_milestone(env: Env, project_id: u64, index: u32) -> Option<Milestone> {
        storage::try_load_milestone(&env, project_id, index)
    }

    pub fn get_backer(env: Env, project_id: u64, backer: Address) -> Option<Backer> {
        storage::try_load_backer(&env, project_id, &backer)
    }

    /// Return the reviewer's active flag, or `None` if never registered.
    pub fn get_reviewer(env: Env, project_id: u64, reviewer: Address) -> Option<bool> {
        storage::get_reviewer(&env, project_id, &reviewer)
    }

    pub fn get_vote(env: Env, project_id: u64, index: u32, voter: Address) -> Option<Vote> {
        storage::get_vote(&env, project_id, index, &voter)
    }

    /// Return the escrow token contract address.
    pub fn get_funding_token(env: Env) -> Address {
        storage::get_token(&env)
    }

    /// Return the platform treasury address.
    pub fn get_treasury(env: Env) -> Address {
        storage::get_treasury(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn require_not_paused(env: &Env) {
        if storage::is_paused(env) {
            panic_with_error!(env, Error::ProtocolPaused);
        }
    }

    fn require_admin(env: &Env, caller: &Address) {
        if *caller != storage::get_admin(env) {
            panic_with_error!(env, Error::NotAuthorized);
        }
    }

    fn validate_text(env: &Env, title: &String, description: &String) {
        if title.len() == 0 || title.len() > MAX_TITLE_LEN {
            panic_with_error!(env, Error::InvalidText);
        }
        if description.len() > MAX_DESCRIPTION_LEN {
            panic_with_error!(env, Error::InvalidText);
        }
    }
}
