use soroban_sdk::{contracttype, Address, BytesN};

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Fixed-point scale shared with the loan contract.
pub const RATIO: i128 = 1_000_000;

/// Platform fee tier applied to every proposal, scaled by `RATIO` (1%).
pub const PLATFORM_FEE_RATIO: i128 = 10_000;

/// Loan terms agreed between a local node and a borrower. Fees are computed
/// once, when the proposal is created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub local_node: Address,
    pub borrower: Address,
    pub target_amount: i128,
    pub payment_amount: i128,
    pub local_node_fee: i128,
    pub platform_fee: i128,
    pub total_payments: u32,
    pub insured_payments: u32,
    pub per_payment_interest_ratio: i128,
    pub downpayment_ratio: i128,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    AdminRole(Address),
    LocalNode(Address),
    Investor(Address),
    SignerKey(BytesN<32>),
    Proposal(u32),
    ProposalId,
}
