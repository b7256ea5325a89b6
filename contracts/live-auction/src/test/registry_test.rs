use crate::test::*;
use crate::{AuctionStatus, Error, LiveAuction, LiveAuctionClient, SlabTier};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address, Env, String};

#[test]
fn test_calls_before_initialize() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(LiveAuction, ());
    let client = LiveAuctionClient::new(&env, &contract_id);
    let admin = Address::generate(&env);

    let result = client.try_register_player(&admin, &1, &String::from_str(&env, "p"), &100);
    assert_eq!(result, Err(Ok(Error::NotInitialized)));
    assert_eq!(client.try_get_session(), Err(Ok(Error::NotInitialized)));
}

#[test]
fn test_registry_requires_admin() {
    let s = setup_test();
    let stranger = Address::generate(&s.env);

    let result = s.client.try_register_franchise(
        &stranger,
        &5,
        &s.text("Echo"),
        &stranger,
        &10_000,
    );
    assert_eq!(result, Err(Ok(Error::Unauthorized)));

    let result = s.client.try_set_franchise_purse(&stranger, &ALPHA, &1);
    assert_eq!(result, Err(Ok(Error::Unauthorized)));
}

#[test]
fn test_duplicate_registration() {
    let s = setup_test();

    let result = s.client.try_register_franchise(
        &s.admin,
        &ALPHA,
        &s.text("Alpha"),
        &s.admin,
        &10_000,
    );
    assert_eq!(result, Err(Ok(Error::AlreadyExists)));

    let result = s.client.try_register_player(&s.admin, &PLAYER_ONE, &s.text("dup"), &BASE_PRICE);
    assert_eq!(result, Err(Ok(Error::AlreadyExists)));

    let result = s
        .client
        .try_configure_auction(&s.admin, &auction_input(&s.env, AUCTION_ID, &s.auctioneer));
    assert_eq!(result, Err(Ok(Error::AlreadyExists)));
}

#[test]
fn test_set_franchise_purse() {
    let s = setup_test();

    let franchise = s.client.set_franchise_purse(&s.admin, &BRAVO, &12_500);
    assert_eq!(franchise.purse_remaining, 12_500);
    assert_eq!(s.client.get_franchise(&BRAVO).purse_remaining, 12_500);

    let result = s.client.try_set_franchise_purse(&s.admin, &BRAVO, &-1);
    assert_eq!(result, Err(Ok(Error::InvalidConfig)));

    let result = s.client.try_set_franchise_purse(&s.admin, &77, &100);
    assert_eq!(result, Err(Ok(Error::NotFound)));
}

#[test]
fn test_configure_auction_validation() {
    let s = setup_test();

    let mut input = auction_input(&s.env, 2, &s.auctioneer);
    input.slabs = vec![
        &s.env,
        SlabTier { max_price: Some(2000), increment: 50 },
        SlabTier { max_price: Some(1000), increment: 25 },
        SlabTier { max_price: None, increment: 100 },
    ];
    assert_eq!(s.client.try_configure_auction(&s.admin, &input), Err(Ok(Error::InvalidConfig)));

    let mut input = auction_input(&s.env, 2, &s.auctioneer);
    input.round_timer_secs = 0;
    assert_eq!(s.client.try_configure_auction(&s.admin, &input), Err(Ok(Error::InvalidConfig)));

    let mut input = auction_input(&s.env, 2, &s.auctioneer);
    input.team_ids = vec![&s.env, ALPHA, ALPHA];
    assert_eq!(s.client.try_configure_auction(&s.admin, &input), Err(Ok(Error::InvalidConfig)));

    let mut input = auction_input(&s.env, 2, &s.auctioneer);
    input.player_pool = vec![&s.env, PLAYER_ONE, 500];
    assert_eq!(s.client.try_configure_auction(&s.admin, &input), Err(Ok(Error::NotFound)));

    let config = s
        .client
        .configure_auction(&s.admin, &auction_input(&s.env, 2, &s.auctioneer));
    assert_eq!(config.status, AuctionStatus::Ready);
    assert_eq!(s.client.get_auction(&2), config);
}
