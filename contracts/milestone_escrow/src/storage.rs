//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type      | Description                         |
//! |----------------|-----------|-------------------------------------|
//! | `Admin`        | `Address` | Protocol admin (pause control)      |
//! | `Token`        | `Address` | Escrow token contract               |
//! | `Treasury`     | `Address` | Platform fee recipient              |
//! | `Paused`       | `bool`    | Emergency stop flag                 |
//! | `ProjectCount` | `u64`     | Auto-increment project ID counter   |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                        | Type            | Description                 |
//! |----------------------------|-----------------|-----------------------------|
//! | `ProjConfig(id)`           | `ProjectConfig` | Immutable project config    |
//! | `ProjState(id)`            | `ProjectState`  | Mutable project state       |
//! | `Milestone(id, idx)`       | `Milestone`     | Per-milestone record        |
//! | `Backer(id, addr)`         | `Backer`        | Per-backer contribution     |
//! | `Reviewer(id, addr)`       | `bool`          | Reviewer active flag        |
//! | `Vote(id, idx, addr)`      | `Vote`          | Per-voter ballot            |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! Records are never physically deleted; terminal statuses and flags keep the
//! full project history auditable on-ledger.

use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::types::{Backer, Milestone, Project, ProjectConfig, ProjectState, Vote};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys live as long as the contract and are extended together.
/// Persistent-tier keys hold per-record data with independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Protocol admin address (Instance).
    Admin,
    /// Escrow token contract address (Instance).
    Token,
    /// Platform treasury address (Instance).
    Treasury,
    /// Emergency stop flag (Instance).
    Paused,
    /// Global auto-increment counter for project IDs (Instance).
    ProjectCount,
    /// Immutable project configuration keyed by ID (Persistent).
    ProjConfig(u64),
    /// Mutable project state keyed by ID (Persistent).
    ProjState(u64),
    /// Milestone keyed by (project ID, index) (Persistent).
    Milestone(u64, u32),
    /// Backer record keyed by (project ID, backer) (Persistent).
    Backer(u64, Address),
    /// Reviewer active flag keyed by (project ID, reviewer) (Persistent).
    Reviewer(u64, Address),
    /// Vote keyed by (project ID, milestone index, voter) (Persistent).
    Vote(u64, u32, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    bump_instance(env);
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_admin(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("contract not initialized")
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
}

pub fn get_token(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .expect("contract not initialized")
}

pub fn set_treasury(env: &Env, treasury: &Address) {
    env.storage().instance().set(&DataKey::Treasury, treasury);
}

pub fn get_treasury(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Treasury)
        .expect("contract not initialized")
}

pub fn set_paused(env: &Env, paused: bool) {
    bump_instance(env);
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

// ─────────────────────────────────────────────────────────
// Project counter
// ─────────────────────────────────────────────────────────

/// Atomically read and increment the project counter.
/// Returns the ID that should be used for the next project.
///
/// Project creation is the only caller; no other component assigns IDs.
pub fn get_and_increment_project_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::ProjectCount, &(current + 1));
    current
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save both the immutable config and initial mutable state for a new project.
pub fn save_project(env: &Env, project: &Project) {
    let config_key = DataKey::ProjConfig(project.id);
    let state_key = DataKey::ProjState(project.id);

    let config = ProjectConfig {
        id: project.id,
        creator: project.creator.clone(),
        title: project.title.clone(),
        description: project.description.clone(),
        goal: project.goal,
        mode: project.mode.clone(),
        deadline: project.deadline,
    };

    let state = ProjectState {
        status: project.status.clone(),
        raised: project.raised,
        released: project.released,
        milestone_count: project.milestone_count,
        percent_allocated: project.percent_allocated,
    };

    env.storage().persistent().set(&config_key, &config);
    env.storage().persistent().set(&state_key, &state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load the full `Project`, or `None` if it does not exist.
pub fn try_load_project(env: &Env, id: u64) -> Option<Project> {
    let config_key = DataKey::ProjConfig(id);
    let config: ProjectConfig = env.storage().persistent().get(&config_key)?;
    bump_persistent(env, &config_key);
    let state = load_project_state(env, id);
    Some(merge_project(config, state))
}

/// Load both project entries with a single helper that bumps TTLs together.
/// Panics with `ProjectNotFound` if the project does not exist.
pub fn load_project_pair(env: &Env, id: u64) -> (ProjectConfig, ProjectState) {
    let config_key = DataKey::ProjConfig(id);
    let config: ProjectConfig = env
        .storage()
        .persistent()
        .get(&config_key)
        .unwrap_or_else(|| panic_with_error!(env, Error::ProjectNotFound));
    bump_persistent(env, &config_key);
    let state = load_project_state(env, id);
    (config, state)
}

/// Load only the mutable project state.
fn load_project_state(env: &Env, id: u64) -> ProjectState {
    let key = DataKey::ProjState(id);
    let state: ProjectState = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| panic_with_error!(env, Error::ProjectNotFound));
    bump_persistent(env, &key);
    state
}

/// Save only the mutable project state (optimized for the frequent writes).
pub fn save_project_state(env: &Env, id: u64, state: &ProjectState) {
    let key = DataKey::ProjState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

fn merge_project(config: ProjectConfig, state: ProjectState) -> Project {
    Project {
        id: config.id,
        creator: config.creator,
        title: config.title,
        description: config.description,
        goal: config.goal,
        mode: config.mode,
        deadline: config.deadline,
        status: state.status,
        raised: state.raised,
        released: state.released,
        milestone_count: state.milestone_count,
        percent_allocated: state.percent_allocated,
    }
}

// ─────────────────────────────────────────────────────────
// Milestones
// ─────────────────────────────────────────────────────────

pub fn save_milestone(env: &Env, project_id: u64, milestone: &Milestone) {
    let key = DataKey::Milestone(project_id, milestone.index);
    env.storage().persistent().set(&key, milestone);
    bump_persistent(env, &key);
}

/// Load a milestone by `(project id, index)`.
/// Panics with `MilestoneNotFound` if absent.
pub fn load_milestone(env: &Env, project_id: u64, index: u32) -> Milestone {
    try_load_milestone(env, project_id, index)
        .unwrap_or_else(|| panic_with_error!(env, Error::MilestoneNotFound))
}

pub fn try_load_milestone(env: &Env, project_id: u64, index: u32) -> Option<Milestone> {
    let key = DataKey::Milestone(project_id, index);
    let milestone: Milestone = env.storage().persistent().get(&key)?;
    bump_persistent(env, &key);
    Some(milestone)
}

// ─────────────────────────────────────────────────────────
// Backers
// ─────────────────────────────────────────────────────────

pub fn save_backer(env: &Env, project_id: u64, backer: &Address, record: &Backer) {
    let key = DataKey::Backer(project_id, backer.clone());
    env.storage().persistent().set(&key, record);
    bump_persistent(env, &key);
}

/// Load a backer record.
/// Panics with `BackerNotFound` if the caller never backed the project.
pub fn load_backer(env: &Env, project_id: u64, backer: &Address) -> Backer {
    try_load_backer(env, project_id, backer)
        .unwrap_or_else(|| panic_with_error!(env, Error::BackerNotFound))
}

pub fn try_load_backer(env: &Env, project_id: u64, backer: &Address) -> Option<Backer> {
    let key = DataKey::Backer(project_id, backer.clone());
    let record: Backer = env.storage().persistent().get(&key)?;
    bump_persistent(env, &key);
    Some(record)
}

// ─────────────────────────────────────────────────────────
// Reviewers
// ─────────────────────────────────────────────────────────

pub fn set_reviewer(env: &Env, project_id: u64, reviewer: &Address, active: bool) {
    let key = DataKey::Reviewer(project_id, reviewer.clone());
    env.storage().persistent().set(&key, &active);
    bump_persistent(env, &key);
}

pub fn get_reviewer(env: &Env, project_id: u64, reviewer: &Address) -> Option<bool> {
    let key = DataKey::Reviewer(project_id, reviewer.clone());
    let active: bool = env.storage().persistent().get(&key)?;
    bump_persistent(env, &key);
    Some(active)
}

// ─────────────────────────────────────────────────────────
// Votes
// ─────────────────────────────────────────────────────────

pub fn save_vote(env: &Env, project_id: u64, index: u32, voter: &Address, vote: &Vote) {
    let key = DataKey::Vote(project_id, index, voter.clone());
    env.storage().persistent().set(&key, vote);
    bump_persistent(env, &key);
}

pub fn get_vote(env: &Env, project_id: u64, index: u32, voter: &Address) -> Option<Vote> {
    let key = DataKey::Vote(project_id, index, voter.clone());
    let vote: Vote = env.storage().persistent().get(&key)?;
    bump_persistent(env, &key);
    Some(vote)
}
