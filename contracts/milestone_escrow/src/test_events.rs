extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{MilestoneReleased, ProjectBacked, ProjectCreated, RefundIssued};
use crate::{MilestoneEscrow, MilestoneEscrowClient, VerificationMode};
use soroban_sdk::symbol_short;

fn setup() -> (
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
    let asset_client = token::StellarAssetClient::new(&env, &sac.address());

    client.init(&admin, &sac.address(), &treasury);
    (env, client, asset_client)
}

fn sample_project(env: &Env, client: &MilestoneEscrowClient, creator: &Address) -> u64 {
    let id = client.create_project(
        creator,
        &String::from_str(env, "Graphic novel"),
        &String::from_str(env, "A serialized graphic novel"),
        &5_000,
        &VerificationMode::Voting,
        &1_000,
    );
    client.add_milestone(
        &id,
        &String::from_str(env, "Issue one"),
        &String::from_str(env, "Write and ink issue one"),
        &100,
        &2_000,
    );
    client.activate_project(&id);
    id
}

#[test]
fn test_project_created_event() {
    let (env, client, _) = setup();
    let creator = Address::generate(&env);
    let goal = 5_000i128;

    let id = client.create_project(
        &creator,
        &String::from_str(&env, "Graphic novel"),
        &String::from_str(&env, "A serialized graphic novel"),
        &goal,
        &VerificationMode::Voting,
        &1_000,
    );

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("created"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: ProjectCreated struct
    let event_data: ProjectCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProjectCreated {
            project_id: id,
            creator: creator.clone(),
            goal,
        }
    );
}

#[test]
fn test_project_backed_event() {
    let (env, client, asset) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    let amount = 1_200i128;

    let id = sample_project(&env, &client, &creator);
    asset.mint(&backer, &amount);
    client.back_project(&id, &backer, &amount);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("backed"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("backed").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: ProjectBacked struct
    let event_data: ProjectBacked = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProjectBacked {
            project_id: id,
            backer: backer.clone(),
            amount,
            raised: amount,
        }
    );
}

#[test]
fn test_milestone_released_event() {
    let (env, client, asset) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);

    let id = sample_project(&env, &client, &creator);
    asset.mint(&backer, &5_000);
    client.back_project(&id, &backer, &5_000);
    client.submit_milestone_for_verification(&id, &0);
    client.vote_on_milestone(&id, &0, &backer, &true);
    client.release_milestone_funds(&id, &0);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("released"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("released").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: MilestoneReleased struct — 5,000 splits into 4,975 + 25 fee
    let event_data: MilestoneReleased = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        MilestoneReleased {
            project_id: id,
            index: 0,
            creator_amount: 4_975,
            platform_fee: 25,
        }
    );
}

#[test]
fn test_refund_issued_event() {
    let (env, client, asset) = setup();
    let creator = Address::generate(&env);
    let backer = Address::generate(&env);
    let amount = 900i128;

    let id = sample_project(&env, &client, &creator);
    asset.mint(&backer, &amount);
    client.back_project(&id, &backer, &amount);
    client.cancel_project(&id);
    client.request_refund(&id, &backer);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("refunded"), project_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("refunded").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    // Data: RefundIssued struct
    let event_data: RefundIssued = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        RefundIssued {
            project_id: id,
            backer: backer.clone(),
            amount,
        }
    );
}
