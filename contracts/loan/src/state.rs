use crate::error::LoanError;
use crate::event;
use crate::storage_types::{
    DataKey, DocumentSignature, Investment, LoanLedger, LoanTerms, Status, BALANCE_BUMP_AMOUNT,
    BALANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD,
};
use soroban_sdk::{panic_with_error, Address, BytesN, Env};

pub fn is_initialized(e: &Env) -> bool {
    e.storage().instance().has(&DataKey::Terms)
}

pub fn write_terms(e: &Env, terms: &LoanTerms) {
    e.storage().instance().set(&DataKey::Terms, terms);
}

pub fn read_terms(e: &Env) -> LoanTerms {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    e.storage()
        .instance()
        .get(&DataKey::Terms)
        .unwrap_or_else(|| panic_with_error!(e, LoanError::NotInitialized))
}

pub fn write_status(e: &Env, status: Status) {
    e.storage().instance().set(&DataKey::Status, &status);
}

pub fn read_status(e: &Env) -> Status {
    e.storage()
        .instance()
        .get(&DataKey::Status)
        .unwrap_or_else(|| panic_with_error!(e, LoanError::NotInitialized))
}

/// Moves the loan to `new` and records the change as an event. A no-op when
/// the status does not actually change.
pub fn transition(e: &Env, new: Status) {
    let old = read_status(e);
    if old == new {
        return;
    }
    write_status(e, new);
    event::emit_status_changed(e, old, new);
}

pub fn write_ledger(e: &Env, ledger: &LoanLedger) {
    e.storage().instance().set(&DataKey::Ledger, ledger);
}

pub fn read_ledger(e: &Env) -> LoanLedger {
    e.storage()
        .instance()
        .get(&DataKey::Ledger)
        .unwrap_or_else(|| panic_with_error!(e, LoanError::NotInitialized))
}

pub fn read_investment(e: &Env, investor: &Address) -> Investment {
    let key = DataKey::Investment(investor.clone());
    if let Some(investment) = e.storage().persistent().get::<DataKey, Investment>(&key) {
        e.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
        investment
    } else {
        Investment {
            amount: 0,
            times_collected: 0,
            times_collected_default: 0,
            claimed_property: false,
        }
    }
}

pub fn write_investment(e: &Env, investor: &Address, investment: &Investment) {
    let key = DataKey::Investment(investor.clone());
    e.storage().persistent().set(&key, investment);
    e.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

pub fn read_document_hash(e: &Env) -> Option<BytesN<32>> {
    e.storage().instance().get(&DataKey::DocumentHash)
}

pub fn write_document_hash(e: &Env, hash: &BytesN<32>) {
    e.storage().instance().set(&DataKey::DocumentHash, hash);
}

pub fn read_borrower_signature(e: &Env) -> Option<DocumentSignature> {
    e.storage().instance().get(&DataKey::BorrowerSignature)
}

pub fn write_borrower_signature(e: &Env, sig: &DocumentSignature) {
    e.storage().instance().set(&DataKey::BorrowerSignature, sig);
}

pub fn read_local_node_signature(e: &Env) -> Option<DocumentSignature> {
    e.storage().instance().get(&DataKey::LocalNodeSignature)
}

pub fn write_local_node_signature(e: &Env, sig: &DocumentSignature) {
    e.storage().instance().set(&DataKey::LocalNodeSignature, sig);
}

pub fn clear_signatures(e: &Env) {
    e.storage().instance().remove(&DataKey::BorrowerSignature);
    e.storage().instance().remove(&DataKey::LocalNodeSignature);
}
