use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub project_id: u64,
    pub creator: Address,
    pub goal: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneAdded {
    pub project_id: u64,
    pub index: u32,
    pub percentage: u32,
    pub deadline: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReviewerAdded {
    pub project_id: u64,
    pub reviewer: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectBacked {
    pub project_id: u64,
    pub backer: Address,
    pub amount: i128,
    pub raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCast {
    pub project_id: u64,
    pub index: u32,
    pub voter: Address,
    pub approved: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReviewerApproved {
    pub project_id: u64,
    pub index: u32,
    pub reviewer: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneReleased {
    pub project_id: u64,
    pub index: u32,
    pub creator_amount: i128,
    pub platform_fee: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundIssued {
    pub project_id: u64,
    pub backer: Address,
    pub amount: i128,
}

pub fn emit_project_created(env: &Env, project_id: u64, creator: Address, goal: i128) {
    let topics = (symbol_short!("created"), project_id);
    let data = ProjectCreated {
        project_id,
        creator,
        goal,
    };
    env.events().publish(topics, data);
}

pub fn emit_milestone_added(env: &Env, project_id: u64, index: u32, percentage: u32, deadline: u32) {
    let topics = (symbol_short!("ms_added"), project_id);
    let data = MilestoneAdded {
        project_id,
        index,
        percentage,
        deadline,
    };
    env.events().publish(topics, data);
}

pub fn emit_reviewer_added(env: &Env, project_id: u64, reviewer: Address) {
    let topics = (symbol_short!("rev_added"), project_id);
    let data = ReviewerAdded {
        project_id,
        reviewer,
    };
    env.events().publish(topics, data);
}

pub fn emit_project_activated(env: &Env, project_id: u64) {
    env.events()
        .publish((symbol_short!("activated"), project_id), project_id);
}

pub fn emit_project_backed(env: &Env, project_id: u64, backer: Address, amount: i128, raised: i128) {
    let topics = (symbol_short!("backed"), project_id);
    let data = ProjectBacked {
        project_id,
        backer,
        amount,
        raised,
    };
    env.events().publish(topics, data);
}

pub fn emit_project_cancelled(env: &Env, project_id: u64) {
    env.events()
        .publish((symbol_short!("cancelled"), project_id), project_id);
}

pub fn emit_milestone_submitted(env: &Env, project_id: u64, index: u32) {
    env.events()
        .publish((symbol_short!("submitted"), project_id), index);
}

pub fn emit_vote_cast(env: &Env, project_id: u64, index: u32, voter: Address, approved: bool) {
    let topics = (symbol_short!("voted"), project_id);
    let data = VoteCast {
        project_id,
        index,
        voter,
        approved,
    };
    env.events().publish(topics, data);
}

pub fn emit_reviewer_approved(env: &Env, project_id: u64, index: u32, reviewer: Address) {
    let topics = (symbol_short!("approved"), project_id);
    let data = ReviewerApproved {
        project_id,
        index,
        reviewer,
    };
    env.events().publish(topics, data);
}

pub fn emit_milestone_released(
    env: &Env,
    project_id: u64,
    index: u32,
    creator_amount: i128,
    platform_fee: i128,
) {
    let topics = (symbol_short!("released"), project_id);
    let data = MilestoneReleased {
        project_id,
        index,
        creator_amount,
        platform_fee,
    };
    env.events().publish(topics, data);
}

pub fn emit_milestone_failed(env: &Env, project_id: u64, index: u32) {
    env.events()
        .publish((symbol_short!("failed"), project_id), index);
}

pub fn emit_refund_issued(env: &Env, project_id: u64, backer: Address, amount: i128) {
    let topics = (symbol_short!("refunded"), project_id);
    let data = RefundIssued {
        project_id,
        backer,
        amount,
    };
    env.events().publish(topics, data);
}

pub fn emit_protocol_paused(env: &Env, caller: Address) {
    env.events().publish((symbol_short!("paused"),), caller);
}

pub fn emit_protocol_unpaused(env: &Env, caller: Address) {
    env.events().publish((symbol_short!("unpaused"),), caller);
}
