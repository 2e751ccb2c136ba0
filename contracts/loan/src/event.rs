use crate::storage_types::Status;
use soroban_sdk::{symbol_short, Address, BytesN, Env};

// Event Emission
/// Emits an event when the loan status changes. Callers must skip the
/// emission when the status does not actually change.
pub fn emit_status_changed(env: &Env, old: Status, new: Status) {
    env.events().publish((symbol_short!("status"),), (old, new));
}

/// Emits an event when the borrower's initial stake is received.
pub fn emit_stake_received(env: &Env, borrower: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("stake_rcv"), borrower.clone()), amount);
}

/// Emits an event when an investment is recorded.
pub fn emit_investment(env: &Env, investor: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("invest"), investor.clone()), amount);
}

/// Emits an event when an investment is refunded.
pub fn emit_investment_collected(env: &Env, investor: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("inv_wd"), investor.clone()), amount);
}

/// Emits an event when the document hash is set or replaced.
pub fn emit_document_hash(env: &Env, hash: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("doc_hash"),), hash.clone());
}

/// Emits an event when a party signs the document.
pub fn emit_document_signed(env: &Env, signer: &Address) {
    env.events()
        .publish((symbol_short!("doc_sign"), signer.clone()), ());
}

/// Emits an event when the pooled funds are disbursed.
pub fn emit_funds_released(env: &Env, local_node_amount: i128, platform_amount: i128) {
    env.events().publish(
        (symbol_short!("released"),),
        (local_node_amount, platform_amount),
    );
}

/// Emits an event when a scheduled payment is recorded.
pub fn emit_payment(env: &Env, borrower: &Address, times_paid: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("payment"), borrower.clone()),
        (times_paid, amount),
    );
}

/// Emits an event when an investor payout is recorded. `insured` marks the
/// insurance-funded path.
pub fn emit_earnings_collected(env: &Env, investor: &Address, amount: i128, insured: bool) {
    env.events().publish(
        (symbol_short!("earn_wd"), investor.clone()),
        (amount, insured),
    );
}

/// Emits an event when a missed payment consumes an insured cycle.
pub fn emit_payment_missed(env: &Env, times_default: u32) {
    env.events()
        .publish((symbol_short!("missed"),), times_default);
}

/// Emits an event when an investor claims property shares after bankruptcy.
pub fn emit_property_claimed(env: &Env, investor: &Address, shares: i128) {
    env.events()
        .publish((symbol_short!("prop_clm"), investor.clone()), shares);
}
