//! Platform registry: administrators, local-node fee tiers, the investor
//! whitelist, document signing keys and loan proposals. Loan contracts hold
//! a reference to this registry and consult it for whitelisting and
//! signature recovery.

use crate::error::RegistryError;
use crate::event;
use crate::storage_types::{
    DataKey, Proposal, BALANCE_BUMP_AMOUNT, BALANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT,
    INSTANCE_LIFETIME_THRESHOLD, PLATFORM_FEE_RATIO, RATIO,
};
use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Bytes, BytesN, Env};

fn has_administrator(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Admin)
}

fn is_admin_address(e: &Env, who: &Address) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::AdminRole(who.clone()))
        .unwrap_or(false)
}

fn require_admin(e: &Env, caller: &Address) {
    caller.require_auth();
    if !is_admin_address(e, caller) {
        panic_with_error!(e, RegistryError::NotAuthorized);
    }
}

fn is_local_node_address(e: &Env, node: &Address) -> bool {
    e.storage()
        .persistent()
        .has(&DataKey::LocalNode(node.clone()))
}

fn get_and_increase_proposal_id(e: &Env) -> u32 {
    let prev = e
        .storage()
        .instance()
        .get(&DataKey::ProposalId)
        .unwrap_or(0u32);
    e.storage().instance().set(&DataKey::ProposalId, &(prev + 1));
    prev + 1
}

fn signer_key_hash(e: &Env, public_key: &BytesN<65>) -> BytesN<32> {
    let raw: Bytes = public_key.clone().into();
    e.crypto().sha256(&raw)
}

#[contract]
pub struct Registry;

#[contractimpl]
impl Registry {
    pub fn initialize(e: Env, admin: Address) {
        if has_administrator(&e) {
            panic_with_error!(&e, RegistryError::AlreadyInitialized);
        }
        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage()
            .instance()
            .set(&DataKey::AdminRole(admin), &true);
    }

    pub fn add_admin(e: Env, caller: Address, new_admin: Address) {
        require_admin(&e, &caller);
        e.storage()
            .instance()
            .set(&DataKey::AdminRole(new_admin.clone()), &true);
        event::emit_admin_changed(&e, &new_admin, true);
    }

    pub fn remove_admin(e: Env, caller: Address, admin: Address) {
        require_admin(&e, &caller);
        e.storage()
            .instance()
            .remove(&DataKey::AdminRole(admin.clone()));
        event::emit_admin_changed(&e, &admin, false);
    }

    pub fn is_admin(e: Env, who: Address) -> bool {
        is_admin_address(&e, &who)
    }

    pub fn add_local_node(e: Env, caller: Address, node: Address, fee_ratio: i128) {
        require_admin(&e, &caller);
        if fee_ratio < 0 || fee_ratio > RATIO {
            panic_with_error!(&e, RegistryError::InvalidFeeRatio);
        }
        let key = DataKey::LocalNode(node.clone());
        e.storage().persistent().set(&key, &fee_ratio);
        e.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
        event::emit_local_node_changed(&e, &node, Some(fee_ratio));
    }

    pub fn remove_local_node(e: Env, caller: Address, node: Address) {
        require_admin(&e, &caller);
        e.storage()
            .persistent()
            .remove(&DataKey::LocalNode(node.clone()));
        event::emit_local_node_changed(&e, &node, None);
    }

    pub fn is_local_node(e: Env, node: Address) -> bool {
        is_local_node_address(&e, &node)
    }

    pub fn local_node_fee_ratio(e: Env, node: Address) -> i128 {
        e.storage()
            .persistent()
            .get(&DataKey::LocalNode(node))
            .unwrap_or_else(|| panic_with_error!(&e, RegistryError::UnknownLocalNode))
    }

    /// Whitelisting is managed by administrators and local nodes alike.
    pub fn add_investor(e: Env, caller: Address, investor: Address) {
        caller.require_auth();
        if !is_admin_address(&e, &caller) && !is_local_node_address(&e, &caller) {
            panic_with_error!(&e, RegistryError::NotAuthorized);
        }
        let key = DataKey::Investor(investor.clone());
        e.storage().persistent().set(&key, &true);
        e.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
        event::emit_investor_changed(&e, &investor, true);
    }

    pub fn remove_investor(e: Env, caller: Address, investor: Address) {
        caller.require_auth();
        if !is_admin_address(&e, &caller) && !is_local_node_address(&e, &caller) {
            panic_with_error!(&e, RegistryError::NotAuthorized);
        }
        e.storage()
            .persistent()
            .remove(&DataKey::Investor(investor.clone()));
        event::emit_investor_changed(&e, &investor, false);
    }

    pub fn is_whitelisted_investor(e: Env, investor: Address) -> bool {
        e.storage()
            .persistent()
            .get(&DataKey::Investor(investor))
            .unwrap_or(false)
    }

    /// Registers the secp256k1 public key a party signs loan documents with.
    pub fn register_signer_key(e: Env, party: Address, public_key: BytesN<65>) {
        party.require_auth();
        let key = DataKey::SignerKey(signer_key_hash(&e, &public_key));
        e.storage().persistent().set(&key, &party);
        e.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
        event::emit_signer_registered(&e, &party);
    }

    pub fn signer_address(e: Env, public_key: BytesN<65>) -> Option<Address> {
        e.storage()
            .persistent()
            .get(&DataKey::SignerKey(signer_key_hash(&e, &public_key)))
    }

    /// Recovers the identity that produced `signature` over `document_hash`.
    /// The recovered public key must have been registered beforehand.
    pub fn recover_signer(
        e: Env,
        document_hash: BytesN<32>,
        signature: BytesN<64>,
        recovery_id: u32,
    ) -> Address {
        let public_key = e
            .crypto()
            .secp256k1_recover(&document_hash, &signature, recovery_id);
        e.storage()
            .persistent()
            .get(&DataKey::SignerKey(signer_key_hash(&e, &public_key)))
            .unwrap_or_else(|| panic_with_error!(&e, RegistryError::UnknownSigner))
    }

    /// Creates a loan proposal. Both fee amounts are fixed here, once, from
    /// the node's tier and the platform tier.
    pub fn create_proposal(
        e: Env,
        local_node: Address,
        borrower: Address,
        target_amount: i128,
        payment_amount: i128,
        total_payments: u32,
        insured_payments: u32,
        per_payment_interest_ratio: i128,
        downpayment_ratio: i128,
    ) -> u32 {
        local_node.require_auth();
        if !is_local_node_address(&e, &local_node) {
            panic_with_error!(&e, RegistryError::NotAuthorized);
        }
        if target_amount <= 0
            || payment_amount <= 0
            || total_payments == 0
            || insured_payments > total_payments
            || per_payment_interest_ratio < 0
            || per_payment_interest_ratio >= RATIO
            || downpayment_ratio < 0
            || downpayment_ratio >= RATIO
        {
            panic_with_error!(&e, RegistryError::InvalidTerms);
        }

        let fee_ratio: i128 = e
            .storage()
            .persistent()
            .get(&DataKey::LocalNode(local_node.clone()))
            .unwrap_or_else(|| panic_with_error!(&e, RegistryError::UnknownLocalNode));
        let proposal = Proposal {
            local_node: local_node.clone(),
            borrower: borrower.clone(),
            target_amount,
            payment_amount,
            local_node_fee: target_amount * fee_ratio / RATIO,
            platform_fee: target_amount * PLATFORM_FEE_RATIO / RATIO,
            total_payments,
            insured_payments,
            per_payment_interest_ratio,
            downpayment_ratio,
        };

        let id = get_and_increase_proposal_id(&e);
        let key = DataKey::Proposal(id);
        e.storage().persistent().set(&key, &proposal);
        e.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
        event::emit_proposal_created(&e, id, &local_node, &borrower);
        id
    }

    pub fn proposal(e: Env, id: u32) -> Proposal {
        e.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        e.storage()
            .persistent()
            .get(&DataKey::Proposal(id))
            .unwrap_or_else(|| panic_with_error!(&e, RegistryError::UnknownProposal))
    }

    pub fn remove_proposal(e: Env, caller: Address, id: u32) {
        caller.require_auth();
        let proposal: Proposal = e
            .storage()
            .persistent()
            .get(&DataKey::Proposal(id))
            .unwrap_or_else(|| panic_with_error!(&e, RegistryError::UnknownProposal));
        if caller != proposal.local_node && !is_admin_address(&e, &caller) {
            panic_with_error!(&e, RegistryError::NotAuthorized);
        }
        e.storage().persistent().remove(&DataKey::Proposal(id));
        event::emit_proposal_removed(&e, id);
    }
}
