
extern crate std;

use proptest::prelude::*;
use soroban_sdk::{testutils::Address as _, token, Address, Env, String};

use crate::escrow;
use crate::invariants::*;
pub use crate::types::{ProjectStatus, VerificationMode};
use crate::{MilestoneEscrow, MilestoneEscrowClient};

// ── Helpers ─────────────────────────────────────────────────────────

fn setup_env() -> (
    Env,
    MilestoneEscrowClient<'static>,
    token::StellarAssetClient<'static>,
) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(MilestoneEscrow, ());
    let client = MilestoneEscrowClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let treasury = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let sac = env.register_stellar_asset_contract_v2(token_admin);
    let asset = token::StellarAssetClient::new(&env, &sac.address());

    client.init(&admin, &sac.address(), &treasury);
    (env, client, asset)
}

fn create_project(env: &Env, client: &MilestoneEscrowClient, goal: i128) -> (u64, Address) {
    let creator = Address::generate(env);
    let id = client.create_project(
        &creator,
        &String::from_str(env, "Fuzzed project"),
        &String::from_str(env, "Property-based lifecycle checks"),
        &goal,
        &VerificationMode::Voting,
        &1_000,
    );
    client.add_milestone(
        &id,
        &String::from_str(env, "Everything"),
        &String::from_str(env, "The whole deliverable"),
        &100,
        &2_000,
    );
    client.activate_project(&id);
    (id, creator)
}

// ── 1. Creation Fuzz Tests ──────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fuzz_create_valid_goal(goal in 1i128..=1_000_000_000_000i128) {
        let (_env, client, _asset) = setup_env();
        let (id, _creator) = create_project(&_env, &client, goal);

        let project = client.get_project(&id).unwrap();
        assert_all_project_invariants(&project);
        assert_eq!(project.goal, goal);
        assert_eq!(project.status, ProjectStatus::Funding);
    }

    #[test]
    fn fuzz_backing_accumulates_exactly(amount in 1i128..=1_000_000_000_000i128) {
        let (env, client, asset) = setup_env();
        let goal = 2_000_000_000_000i128;
        let (id, _creator) = create_project(&env, &client, goal);

        let backer = Address::generate(&env);
        asset.mint(&backer, &amount);

        let before = client.get_project(&id).unwrap();
        client.back_project(&id, &backer, &amount);
        let after = client.get_project(&id).unwrap();

        assert_backing_invariant(before.raised, after.raised, amount);
        assert_all_project_invariants(&after);
        assert_eq!(client.get_backer(&id, &backer).unwrap().amount, amount);
    }

    #[test]
    fn fuzz_reaching_goal_activates(goal in 1i128..=1_000_000_000_000i128) {
        let (env, client, asset) = setup_env();
        let (id, _creator) = create_project(&env, &client, goal);

        let backer = Address::generate(&env);
        asset.mint(&backer, &goal);
        client.back_project(&id, &backer, &goal);

        let project = client.get_project(&id).unwrap();
        assert_eq!(project.status, ProjectStatus::Active);
        assert_valid_status_transition(&ProjectStatus::Funding, &project.status);
    }
}

// ── 2. Split Arithmetic Fuzz Tests ──────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fuzz_split_conserves_value(
        raised in 1i128..=1_000_000_000_000_000_000i128,
        percentage in 1u32..=100u32,
    ) {
        let env = Env::default();
        let (creator_amount, fee) = escrow::milestone_split(&env, raised, percentage);

        assert_split_conserves(raised, percentage, creator_amount, fee);
        let gross = creator_amount + fee;
        assert_eq!(fee, gross * escrow::PLATFORM_FEE_NUM / escrow::PLATFORM_FEE_DEN);
        assert!(creator_amount >= 0 && fee >= 0);
    }

    #[test]
    fn fuzz_refund_never_exceeds_contribution(
        contribution in 1i128..=1_000_000_000_000i128,
        released_pct in 0u32..=100u32,
    ) {
        let env = Env::default();
        let raised = 1_000_000_000_000i128;
        let contribution = contribution.min(raised);
        let released = raised * released_pct as i128 / 100;

        let refund = escrow::refund_amount(&env, contribution, released, raised);
        assert!(refund >= 0);
        assert!(refund <= contribution);
        if released == 0 {
            assert_eq!(refund, contribution);
        }
    }

    #[test]
    fn fuzz_prorated_refunds_never_overdraw(
        alice_amount in 1i128..=1_000_000_000i128,
        bob_amount in 1i128..=1_000_000_000i128,
        released_pct in 0u32..=100u32,
    ) {
        let env = Env::default();
        let raised = alice_amount + bob_amount;
        let released = raised * released_pct as i128 / 100;
        let remaining = raised - released;

        let alice_refund = escrow::refund_amount(&env, alice_amount, released, raised);
        let bob_refund = escrow::refund_amount(&env, bob_amount, released, raised);

        // Floor division rounds each refund down, so the pool cannot be
        // overdrawn no matter how contributions split.
        assert!(alice_refund + bob_refund <= remaining);
    }
}
