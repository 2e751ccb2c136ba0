//! Payment and amortization engine.
//!
//! Interest is computed on the outstanding balance; the amortized remainder
//! of each payment converts into property shares for the borrower. All math
//! is integer, truncating toward zero, with the residue delivered at final
//! payoff.

use crate::error::LoanError;
use crate::event;
use crate::signature;
use crate::state::{read_ledger, read_status, read_terms, transition, write_ledger};
use crate::storage_types::{LoanTerms, Status, FUNDING_PERIOD, PERIODICITY, RATIO};
use soroban_sdk::{panic_with_error, token, Address, Env};

/// How the stake arrives: authorized directly by the borrower, or pulled
/// through a prior token allowance granted to this contract.
pub enum StakeIntake {
    Direct,
    Allowance,
}

pub fn downpayment_shares(terms: &LoanTerms) -> i128 {
    terms.property_shares * terms.downpayment_ratio / RATIO
}

fn investor_share_tokens(terms: &LoanTerms) -> i128 {
    terms.property_shares * (RATIO - terms.downpayment_ratio) / RATIO
}

/// Single intake handler behind both stake entry points (the two only
/// differ in how the funds are acquired).
pub(crate) fn receive_stake(e: &Env, from: Address, amount: i128, intake: StakeIntake) {
    let terms = read_terms(e);
    if read_status(e) != Status::AwaitingStake {
        panic_with_error!(e, LoanError::InvalidStatus);
    }
    if from != terms.borrower {
        panic_with_error!(e, LoanError::NotBorrower);
    }
    if amount != terms.local_node_fee + terms.platform_fee {
        panic_with_error!(e, LoanError::InvalidAmount);
    }
    let mut ledger = read_ledger(e);
    let now = e.ledger().timestamp();
    if ledger.stake_deadline != 0 && now > ledger.stake_deadline {
        panic_with_error!(e, LoanError::DeadlineExpired);
    }
    // The backing property shares must already sit in custody.
    let held = token::Client::new(e, &terms.property_token).balance(&e.current_contract_address());
    if held < terms.property_shares {
        panic_with_error!(e, LoanError::PropertySharesMissing);
    }

    ledger.stake_received = true;
    ledger.stake_deadline = 0;
    ledger.funding_deadline = now + FUNDING_PERIOD;
    write_ledger(e, &ledger);

    let funds = token::Client::new(e, &terms.payment_token);
    match intake {
        StakeIntake::Direct => funds.transfer(&from, &e.current_contract_address(), &amount),
        StakeIntake::Allowance => funds.transfer_from(
            &e.current_contract_address(),
            &from,
            &e.current_contract_address(),
            &amount,
        ),
    }
    event::emit_stake_received(e, &from, amount);
    transition(e, Status::Funding);
}

/// Disburses the pooled funds once both signatures are present. The
/// insurance amount stays in custody.
pub(crate) fn release_funds(e: &Env) {
    let terms = read_terms(e);
    if read_status(e) != Status::AwaitingSignatures {
        panic_with_error!(e, LoanError::InvalidStatus);
    }
    signature::require_both_signed(e);

    let insurance_amount = terms.payment_amount * terms.insured_payments as i128;
    let local_node_amount = terms.target_amount - insurance_amount + terms.local_node_fee;
    let down = downpayment_shares(&terms);
    let mut ledger = read_ledger(e);
    ledger.transferred_tokens = down;
    ledger.next_payment = e.ledger().timestamp() + PERIODICITY;
    ledger.signing_deadline = 0;
    write_ledger(e, &ledger);

    let funds = token::Client::new(e, &terms.payment_token);
    funds.transfer(
        &e.current_contract_address(),
        &terms.local_node,
        &local_node_amount,
    );
    funds.transfer(
        &e.current_contract_address(),
        &terms.platform,
        &terms.platform_fee,
    );
    if down > 0 {
        token::Client::new(e, &terms.property_token).transfer(
            &e.current_contract_address(),
            &terms.borrower,
            &down,
        );
    }
    event::emit_funds_released(e, local_node_amount, terms.platform_fee);
    transition(e, Status::Active);
}

pub fn pay(e: &Env, from: Address, amount: i128) {
    let terms = read_terms(e);
    let status = read_status(e);
    if status != Status::Active && status != Status::Default {
        panic_with_error!(e, LoanError::InvalidStatus);
    }
    if from != terms.borrower {
        panic_with_error!(e, LoanError::NotBorrower);
    }
    if amount != terms.payment_amount {
        panic_with_error!(e, LoanError::InvalidAmount);
    }
    let mut ledger = read_ledger(e);
    let now = e.ledger().timestamp();
    // One period of grace past the deadline, nothing beyond it.
    if now > ledger.next_payment + PERIODICITY {
        panic_with_error!(e, LoanError::PaymentWindowClosed);
    }

    ledger.times_paid += 1;
    token::Client::new(e, &terms.payment_token).transfer(
        &from,
        &e.current_contract_address(),
        &amount,
    );

    if ledger.times_paid == terms.total_payments {
        // Final payment: whatever share balance the amortization truncation
        // left behind goes to the borrower here.
        let delta = terms.property_shares - ledger.transferred_tokens;
        ledger.amortized_amount = terms.target_amount;
        ledger.transferred_tokens = terms.property_shares;
        ledger.next_payment = 0;
        write_ledger(e, &ledger);
        if delta > 0 {
            token::Client::new(e, &terms.property_token).transfer(
                &e.current_contract_address(),
                &terms.borrower,
                &delta,
            );
        }
        event::emit_payment(e, &from, ledger.times_paid, amount);
        transition(e, Status::Finished);
        return;
    }

    ledger.next_payment += PERIODICITY;
    let remaining_principal = terms.target_amount - ledger.amortized_amount;
    let interest_portion = remaining_principal * terms.per_payment_interest_ratio / RATIO;
    // A front-loaded schedule can clear the principal before the last
    // installment; amortization never outruns it.
    let amortization_portion = (amount - interest_portion).min(remaining_principal);
    ledger.amortized_amount += amortization_portion;
    let delta_shares =
        amortization_portion * investor_share_tokens(&terms) / terms.target_amount;
    ledger.transferred_tokens += delta_shares;
    write_ledger(e, &ledger);

    if delta_shares > 0 {
        token::Client::new(e, &terms.property_token).transfer(
            &e.current_contract_address(),
            &terms.borrower,
            &delta_shares,
        );
    }
    event::emit_payment(e, &from, ledger.times_paid, amount);
    // A payment inside the grace window clears a running default cycle.
    transition(e, Status::Active);
}

/// Lazy missed-payment detection, run from the permissionless heartbeat.
/// Each call consumes at most one cycle and is a no-op otherwise.
pub(crate) fn check_missed_payment(e: &Env) {
    let terms = read_terms(e);
    let status = read_status(e);
    if status != Status::Active && status != Status::Default {
        return;
    }
    let mut ledger = read_ledger(e);
    let now = e.ledger().timestamp();
    if ledger.next_payment == 0 || now <= ledger.next_payment + PERIODICITY {
        return;
    }
    if ledger.times_default < terms.insured_payments {
        ledger.times_default += 1;
        ledger.next_payment += PERIODICITY;
        write_ledger(e, &ledger);
        event::emit_payment_missed(e, ledger.times_default);
        transition(e, Status::Default);
    } else {
        ledger.next_payment = 0;
        write_ledger(e, &ledger);
        transition(e, Status::Bankrupt);
    }
}
