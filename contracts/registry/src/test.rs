#![cfg(test)]
extern crate std;

use crate::contract::{Registry, RegistryClient};
use crate::error::RegistryError;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, BytesN, Env};

fn reg_err(err: RegistryError) -> soroban_sdk::Error {
    soroban_sdk::Error::from_contract_error(err as u32)
}

struct Fixture {
    e: Env,
    registry: RegistryClient<'static>,
    root: Address,
}

fn setup() -> Fixture {
    let e = Env::default();
    e.mock_all_auths();

    let registry = RegistryClient::new(&e, &e.register_contract(None, Registry {}));
    let root = Address::generate(&e);
    registry.initialize(&root);

    Fixture { e, registry, root }
}

#[test]
fn test_initialize_only_once() {
    let f = setup();

    let other = Address::generate(&f.e);
    assert_eq!(
        f.registry.try_initialize(&other),
        Err(Ok(reg_err(RegistryError::AlreadyInitialized)))
    );
    assert!(f.registry.is_admin(&f.root));
    assert!(!f.registry.is_admin(&other));
}

#[test]
fn test_admin_management() {
    let f = setup();

    let second = Address::generate(&f.e);
    let third = Address::generate(&f.e);

    f.registry.add_admin(&f.root, &second);
    assert!(f.registry.is_admin(&second));

    // Any administrator can appoint further administrators.
    f.registry.add_admin(&second, &third);
    assert!(f.registry.is_admin(&third));

    f.registry.remove_admin(&f.root, &second);
    assert!(!f.registry.is_admin(&second));
    assert_eq!(
        f.registry.try_add_admin(&second, &Address::generate(&f.e)),
        Err(Ok(reg_err(RegistryError::NotAuthorized)))
    );
}

#[test]
fn test_local_node_tiers() {
    let f = setup();

    let node = Address::generate(&f.e);
    f.registry.add_local_node(&f.root, &node, &20_000);
    assert!(f.registry.is_local_node(&node));
    assert_eq!(f.registry.local_node_fee_ratio(&node), 20_000);

    assert_eq!(
        f.registry.try_add_local_node(&f.root, &node, &-1),
        Err(Ok(reg_err(RegistryError::InvalidFeeRatio)))
    );
    assert_eq!(
        f.registry.try_add_local_node(&f.root, &node, &1_000_001),
        Err(Ok(reg_err(RegistryError::InvalidFeeRatio)))
    );

    let outsider = Address::generate(&f.e);
    assert_eq!(
        f.registry.try_add_local_node(&outsider, &node, &20_000),
        Err(Ok(reg_err(RegistryError::NotAuthorized)))
    );

    f.registry.remove_local_node(&f.root, &node);
    assert!(!f.registry.is_local_node(&node));
    assert_eq!(
        f.registry.try_local_node_fee_ratio(&node),
        Err(Ok(reg_err(RegistryError::UnknownLocalNode)))
    );
}

#[test]
fn test_investor_whitelist() {
    let f = setup();

    let node = Address::generate(&f.e);
    f.registry.add_local_node(&f.root, &node, &20_000);

    let alice = Address::generate(&f.e);
    let bob = Address::generate(&f.e);
    assert!(!f.registry.is_whitelisted_investor(&alice));

    f.registry.add_investor(&f.root, &alice);
    f.registry.add_investor(&node, &bob);
    assert!(f.registry.is_whitelisted_investor(&alice));
    assert!(f.registry.is_whitelisted_investor(&bob));

    let outsider = Address::generate(&f.e);
    assert_eq!(
        f.registry.try_add_investor(&outsider, &alice),
        Err(Ok(reg_err(RegistryError::NotAuthorized)))
    );
    assert_eq!(
        f.registry.try_remove_investor(&outsider, &alice),
        Err(Ok(reg_err(RegistryError::NotAuthorized)))
    );

    f.registry.remove_investor(&node, &alice);
    assert!(!f.registry.is_whitelisted_investor(&alice));
}

#[test]
fn test_signer_key_registration() {
    let f = setup();

    let party = Address::generate(&f.e);
    let public_key = BytesN::from_array(&f.e, &[5u8; 65]);
    assert_eq!(f.registry.signer_address(&public_key), None);

    f.registry.register_signer_key(&party, &public_key);
    assert_eq!(f.registry.signer_address(&public_key), Some(party.clone()));

    // Re-registering rebinds the key.
    let other = Address::generate(&f.e);
    f.registry.register_signer_key(&other, &public_key);
    assert_eq!(f.registry.signer_address(&public_key), Some(other));
}

#[test]
fn test_create_proposal_fixes_fees() {
    let f = setup();

    let node = Address::generate(&f.e);
    let borrower = Address::generate(&f.e);
    f.registry.add_local_node(&f.root, &node, &20_000);

    let id = f.registry.create_proposal(
        &node, &borrower, &100_000, &11_000, &10, &2, &10_000, &200_000,
    );
    assert_eq!(id, 1);

    let proposal = f.registry.proposal(&id);
    assert_eq!(proposal.local_node, node);
    assert_eq!(proposal.borrower, borrower);
    assert_eq!(proposal.target_amount, 100_000);
    assert_eq!(proposal.local_node_fee, 2_000);
    assert_eq!(proposal.platform_fee, 1_000);

    // A tier change after creation does not touch existing proposals.
    f.registry.add_local_node(&f.root, &node, &50_000);
    assert_eq!(f.registry.proposal(&id).local_node_fee, 2_000);

    let second = f.registry.create_proposal(
        &node, &borrower, &100_000, &11_000, &10, &2, &10_000, &200_000,
    );
    assert_eq!(second, 2);
    assert_eq!(f.registry.proposal(&second).local_node_fee, 5_000);
}

#[test]
fn test_create_proposal_validates() {
    let f = setup();

    let node = Address::generate(&f.e);
    let borrower = Address::generate(&f.e);
    f.registry.add_local_node(&f.root, &node, &20_000);

    let outsider = Address::generate(&f.e);
    assert_eq!(
        f.registry.try_create_proposal(
            &outsider, &borrower, &100_000, &11_000, &10, &2, &10_000, &200_000,
        ),
        Err(Ok(reg_err(RegistryError::NotAuthorized)))
    );
    assert_eq!(
        f.registry.try_create_proposal(
            &node, &borrower, &0, &11_000, &10, &2, &10_000, &200_000,
        ),
        Err(Ok(reg_err(RegistryError::InvalidTerms)))
    );
    // More insured payments than payments altogether.
    assert_eq!(
        f.registry.try_create_proposal(
            &node, &borrower, &100_000, &11_000, &10, &11, &10_000, &200_000,
        ),
        Err(Ok(reg_err(RegistryError::InvalidTerms)))
    );
    // Ratios are strictly below the fixed-point scale.
    assert_eq!(
        f.registry.try_create_proposal(
            &node, &borrower, &100_000, &11_000, &10, &2, &10_000, &1_000_000,
        ),
        Err(Ok(reg_err(RegistryError::InvalidTerms)))
    );
}

#[test]
fn test_remove_proposal() {
    let f = setup();

    let node = Address::generate(&f.e);
    let borrower = Address::generate(&f.e);
    f.registry.add_local_node(&f.root, &node, &20_000);

    let id = f.registry.create_proposal(
        &node, &borrower, &100_000, &11_000, &10, &2, &10_000, &200_000,
    );

    assert_eq!(
        f.registry.try_remove_proposal(&borrower, &id),
        Err(Ok(reg_err(RegistryError::NotAuthorized)))
    );

    f.registry.remove_proposal(&node, &id);
    assert_eq!(
        f.registry.try_proposal(&id),
        Err(Ok(reg_err(RegistryError::UnknownProposal)))
    );
    assert_eq!(
        f.registry.try_remove_proposal(&node, &id),
        Err(Ok(reg_err(RegistryError::UnknownProposal)))
    );
}
