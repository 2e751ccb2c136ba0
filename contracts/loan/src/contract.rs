//! Peer-to-peer property-financing loan.
//!
//! One contract instance per financed property: it collects a refundable
//! stake from the borrower, raises pooled funds from whitelisted investors,
//! gates disbursement behind a two-party document signature and then runs a
//! periodic amortizing repayment schedule with an insurance buffer. The
//! fractional ownership of the backing property moves to the borrower in
//! proportion to the amortized principal.

use crate::error::LoanError;
use crate::investment;
use crate::payment::{self, StakeIntake};
use crate::signature;
use crate::state;
use crate::storage_types::{
    DocumentSignature, Investment, LoanLedger, LoanTerms, Status, RATIO, STAKE_PERIOD,
};
use soroban_sdk::{contract, contractimpl, panic_with_error, token, Address, BytesN, Env};

#[contract]
pub struct Loan;

#[contractimpl]
impl Loan {
    pub fn initialize(e: Env, terms: LoanTerms) {
        if state::is_initialized(&e) {
            panic_with_error!(&e, LoanError::AlreadyInitialized);
        }
        if terms.target_amount <= 0
            || terms.payment_amount <= 0
            || terms.property_shares <= 0
            || terms.total_payments == 0
            || terms.insured_payments > terms.total_payments
            || terms.local_node_fee < 0
            || terms.platform_fee < 0
            || terms.per_payment_interest_ratio < 0
            || terms.per_payment_interest_ratio >= RATIO
            || terms.downpayment_ratio < 0
            || terms.downpayment_ratio >= RATIO
            || terms.payment_amount * terms.insured_payments as i128 > terms.target_amount
            || terms.target_amount * terms.per_payment_interest_ratio / RATIO
                >= terms.payment_amount
        {
            panic_with_error!(&e, LoanError::InvalidTerms);
        }
        state::write_terms(&e, &terms);
        state::write_status(&e, Status::AwaitingStake);
        state::write_ledger(
            &e,
            &LoanLedger {
                invested_amount: 0,
                extra_amount: 0,
                amortized_amount: 0,
                transferred_tokens: 0,
                times_paid: 0,
                times_default: 0,
                next_payment: 0,
                stake_deadline: e.ledger().timestamp() + STAKE_PERIOD,
                funding_deadline: 0,
                signing_deadline: 0,
                stake_received: false,
            },
        );
    }

    /// Stake intake authorized directly by the borrower.
    pub fn send_initial_stake(e: Env, from: Address, amount: i128) {
        from.require_auth();
        payment::receive_stake(&e, from, amount, StakeIntake::Direct);
    }

    /// Stake intake pulled through a token allowance the borrower granted
    /// to this contract beforehand; callable by anyone.
    pub fn send_initial_stake_from(e: Env, from: Address, amount: i128) {
        payment::receive_stake(&e, from, amount, StakeIntake::Allowance);
    }

    pub fn invest(e: Env, investor: Address, amount: i128) {
        investor.require_auth();
        investment::invest(&e, investor, amount);
    }

    pub fn collect_investment(e: Env, investor: Address) {
        investor.require_auth();
        investment::collect_investment(&e, investor);
    }

    pub fn submit_document_hash(e: Env, caller: Address, hash: BytesN<32>) {
        caller.require_auth();
        signature::submit_document_hash(&e, caller, hash);
    }

    /// The signature itself is the proof of intent, so no authorization is
    /// required on top of its verification.
    pub fn sign_document(e: Env, signer: Address, sig: DocumentSignature) {
        signature::sign_document(&e, signer, sig);
    }

    pub fn abort(e: Env, caller: Address) {
        caller.require_auth();
        investment::abort(&e, caller);
    }

    pub fn collect_all_funds(e: Env, caller: Address) {
        caller.require_auth();
        let terms = state::read_terms(&e);
        if caller != terms.local_node {
            panic_with_error!(&e, LoanError::NotLocalNode);
        }
        payment::release_funds(&e);
    }

    pub fn pay(e: Env, from: Address, amount: i128) {
        from.require_auth();
        payment::pay(&e, from, amount);
    }

    pub fn collect_earnings(e: Env, investor: Address) {
        investor.require_auth();
        investment::collect_earnings(&e, investor);
    }

    pub fn collect_property(e: Env, investor: Address) {
        investor.require_auth();
        investment::collect_property(&e, investor);
    }

    /// Permissionless heartbeat: applies any deadline that expired since the
    /// last call. Safe to invoke redundantly.
    pub fn update(e: Env) {
        let status = state::read_status(&e);
        let ledger = state::read_ledger(&e);
        let now = e.ledger().timestamp();
        match status {
            Status::AwaitingStake => {
                if ledger.stake_deadline != 0 && now > ledger.stake_deadline {
                    investment::mark_uncompleted(&e);
                }
            }
            Status::Funding => {
                if ledger.funding_deadline != 0 && now > ledger.funding_deadline {
                    investment::mark_uncompleted(&e);
                }
            }
            Status::AwaitingSignatures => {
                if ledger.signing_deadline != 0 && now > ledger.signing_deadline {
                    investment::mark_uncompleted(&e);
                }
            }
            Status::Active | Status::Default => payment::check_missed_payment(&e),
            _ => {}
        }
    }

    pub fn status(e: Env) -> Status {
        state::read_status(&e)
    }

    pub fn terms(e: Env) -> LoanTerms {
        state::read_terms(&e)
    }

    pub fn invested_amount(e: Env) -> i128 {
        state::read_ledger(&e).invested_amount
    }

    pub fn extra_amount(e: Env) -> i128 {
        state::read_ledger(&e).extra_amount
    }

    pub fn investment(e: Env, investor: Address) -> Investment {
        state::read_investment(&e, &investor)
    }

    pub fn investment_ratio(e: Env, investor: Address) -> i128 {
        investment::investment_ratio(&e, &investor)
    }

    pub fn times_paid(e: Env) -> u32 {
        state::read_ledger(&e).times_paid
    }

    pub fn times_default(e: Env) -> u32 {
        state::read_ledger(&e).times_default
    }

    pub fn amortized_amount(e: Env) -> i128 {
        state::read_ledger(&e).amortized_amount
    }

    pub fn remaining_principal(e: Env) -> i128 {
        let terms = state::read_terms(&e);
        terms.target_amount - state::read_ledger(&e).amortized_amount
    }

    pub fn transferred_tokens(e: Env) -> i128 {
        state::read_ledger(&e).transferred_tokens
    }

    pub fn next_payment(e: Env) -> u64 {
        state::read_ledger(&e).next_payment
    }

    pub fn stake_deadline(e: Env) -> u64 {
        state::read_ledger(&e).stake_deadline
    }

    pub fn funding_deadline(e: Env) -> u64 {
        state::read_ledger(&e).funding_deadline
    }

    pub fn signing_deadline(e: Env) -> u64 {
        state::read_ledger(&e).signing_deadline
    }

    pub fn document_hash(e: Env) -> Option<BytesN<32>> {
        state::read_document_hash(&e)
    }

    pub fn property_share_balance(e: Env, addr: Address) -> i128 {
        let terms = state::read_terms(&e);
        token::Client::new(&e, &terms.property_token).balance(&addr)
    }
}
