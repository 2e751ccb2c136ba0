//! Investment ledger: per-investor contributions, refunds and payouts.
//!
//! All ratios are fixed-point integers scaled by `RATIO`; every division
//! truncates toward zero.

use crate::error::LoanError;
use crate::event;
use crate::state::{
    read_investment, read_ledger, read_status, read_terms, transition, write_investment,
    write_ledger,
};
use crate::storage_types::{LoanTerms, Status, RATIO, SIGNING_PERIOD};
use soroban_sdk::{panic_with_error, token, Address, Env, IntoVal, Symbol};

/// Contribution share of one amount against the funding target, scaled by
/// `RATIO`.
fn ratio_of(terms: &LoanTerms, amount: i128) -> i128 {
    amount * RATIO / terms.target_amount
}

pub fn investment_ratio(e: &Env, investor: &Address) -> i128 {
    let terms = read_terms(e);
    let investment = read_investment(e, investor);
    ratio_of(&terms, investment.amount)
}

fn is_whitelisted_investor(e: &Env, registry: &Address, investor: &Address) -> bool {
    e.invoke_contract(
        registry,
        &Symbol::new(e, "is_whitelisted_investor"),
        (investor.clone(),).into_val(e),
    )
}

pub fn invest(e: &Env, investor: Address, amount: i128) {
    let terms = read_terms(e);
    if read_status(e) != Status::Funding {
        panic_with_error!(e, LoanError::InvalidStatus);
    }
    if amount <= 0 {
        panic_with_error!(e, LoanError::InvalidAmount);
    }
    let mut ledger = read_ledger(e);
    let now = e.ledger().timestamp();
    if ledger.funding_deadline != 0 && now > ledger.funding_deadline {
        panic_with_error!(e, LoanError::DeadlineExpired);
    }
    if !is_whitelisted_investor(e, &terms.registry, &investor) {
        panic_with_error!(e, LoanError::NotWhitelisted);
    }
    // No partial acceptance: an overshooting contribution is rejected whole.
    if ledger.invested_amount + amount > terms.target_amount {
        panic_with_error!(e, LoanError::TargetAmountExceeded);
    }

    let mut investment = read_investment(e, &investor);
    investment.amount += amount;
    ledger.invested_amount += amount;

    let fully_funded = ledger.invested_amount == terms.target_amount;
    if fully_funded {
        ledger.funding_deadline = 0;
        ledger.signing_deadline = now + SIGNING_PERIOD;
    }
    write_investment(e, &investor, &investment);
    write_ledger(e, &ledger);

    token::Client::new(e, &terms.payment_token).transfer(
        &investor,
        &e.current_contract_address(),
        &amount,
    );
    event::emit_investment(e, &investor, amount);

    if fully_funded {
        transition(e, Status::AwaitingSignatures);
    }
}

pub fn collect_investment(e: &Env, investor: Address) {
    let terms = read_terms(e);
    let status = read_status(e);
    let mut ledger = read_ledger(e);
    let mut investment = read_investment(e, &investor);
    if investment.amount <= 0 {
        panic_with_error!(e, LoanError::NothingInvested);
    }

    let refund = match status {
        Status::Funding => {
            ledger.invested_amount -= investment.amount;
            investment.amount
        }
        // After an abort the platform fee pool is shared pro-rata.
        Status::Uncompleted => {
            let bonus = ledger.extra_amount * ratio_of(&terms, investment.amount) / RATIO;
            investment.amount + bonus
        }
        _ => panic_with_error!(e, LoanError::InvalidStatus),
    };
    investment.amount = 0;
    write_investment(e, &investor, &investment);
    write_ledger(e, &ledger);

    token::Client::new(e, &terms.payment_token).transfer(
        &e.current_contract_address(),
        &investor,
        &refund,
    );
    event::emit_investment_collected(e, &investor, refund);
}

/// One unclaimed payout per call: the regular path while `times_collected`
/// lags `times_paid`, then the insurance-funded path while the loan is in
/// default or bankrupt. Counters are committed before funds move.
pub fn collect_earnings(e: &Env, investor: Address) {
    let terms = read_terms(e);
    let status = read_status(e);
    let ledger = read_ledger(e);
    let mut investment = read_investment(e, &investor);
    if investment.amount <= 0 {
        panic_with_error!(e, LoanError::NothingInvested);
    }

    let insured;
    if investment.times_collected < ledger.times_paid {
        investment.times_collected += 1;
        insured = false;
    } else if (status == Status::Default || status == Status::Bankrupt)
        && investment.times_collected_default < ledger.times_default
    {
        investment.times_collected_default += 1;
        insured = true;
    } else {
        panic_with_error!(e, LoanError::NothingToCollect);
    }
    write_investment(e, &investor, &investment);

    let amount = terms.payment_amount * ratio_of(&terms, investment.amount) / RATIO;
    token::Client::new(e, &terms.payment_token).transfer(
        &e.current_contract_address(),
        &investor,
        &amount,
    );
    event::emit_earnings_collected(e, &investor, amount, insured);
}

/// After bankruptcy each investor claims a slice of the property shares the
/// borrower never vested, exactly once.
pub fn collect_property(e: &Env, investor: Address) {
    let terms = read_terms(e);
    if read_status(e) != Status::Bankrupt {
        panic_with_error!(e, LoanError::InvalidStatus);
    }
    let mut investment = read_investment(e, &investor);
    if investment.amount <= 0 {
        panic_with_error!(e, LoanError::NothingInvested);
    }
    if investment.claimed_property {
        panic_with_error!(e, LoanError::PropertyAlreadyClaimed);
    }
    investment.claimed_property = true;
    write_investment(e, &investor, &investment);

    let downpayment_shares = terms.property_shares * terms.downpayment_ratio / RATIO;
    let shares =
        (terms.property_shares - downpayment_shares) * ratio_of(&terms, investment.amount) / RATIO;
    token::Client::new(e, &terms.property_token).transfer(
        &e.current_contract_address(),
        &investor,
        &shares,
    );
    event::emit_property_claimed(e, &investor, shares);
}

pub fn abort(e: &Env, caller: Address) {
    let terms = read_terms(e);
    if caller != terms.local_node {
        panic_with_error!(e, LoanError::NotLocalNode);
    }
    let status = read_status(e);
    if status != Status::Funding && status != Status::AwaitingSignatures {
        panic_with_error!(e, LoanError::InvalidStatus);
    }
    mark_uncompleted(e);
}

/// Shared UNCOMPLETED path for an explicit abort and for deadline expiry.
/// Once the stake was received the local node gets its fee back and the
/// platform fee seeds the pro-rata refund bonus pool.
pub(crate) fn mark_uncompleted(e: &Env) {
    let terms = read_terms(e);
    let mut ledger = read_ledger(e);
    let redistribute = ledger.stake_received;
    if redistribute {
        ledger.extra_amount = terms.platform_fee;
    }
    ledger.stake_deadline = 0;
    ledger.funding_deadline = 0;
    ledger.signing_deadline = 0;
    write_ledger(e, &ledger);

    if redistribute {
        token::Client::new(e, &terms.payment_token).transfer(
            &e.current_contract_address(),
            &terms.local_node,
            &terms.local_node_fee,
        );
    }
    transition(e, Status::Uncompleted);
}
