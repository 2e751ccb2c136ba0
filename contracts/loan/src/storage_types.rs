use soroban_sdk::{contracttype, Address, BytesN};

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub(crate) const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Fixed-point scale for every ratio held by the contract. All divisions
/// truncate toward zero; the residue is only settled at final payoff.
pub const RATIO: i128 = 1_000_000;

pub(crate) const DAY_IN_SECONDS: u64 = 86_400;
/// Interval between two scheduled payments, also the grace window past a
/// missed deadline.
pub(crate) const PERIODICITY: u64 = 30 * DAY_IN_SECONDS;
pub(crate) const STAKE_PERIOD: u64 = 15 * DAY_IN_SECONDS;
pub(crate) const FUNDING_PERIOD: u64 = 90 * DAY_IN_SECONDS;
pub(crate) const SIGNING_PERIOD: u64 = 30 * DAY_IN_SECONDS;

#[contracttype]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    AwaitingStake = 0,
    Funding = 1,
    AwaitingSignatures = 2,
    Active = 3,
    Default = 4,
    Finished = 5,
    Uncompleted = 6,
    Bankrupt = 7,
}

/// Terms are fixed at initialization and never change afterwards.
#[contracttype]
#[derive(Clone)]
pub struct LoanTerms {
    pub borrower: Address,
    pub local_node: Address,
    pub platform: Address,
    pub registry: Address,
    pub payment_token: Address,
    pub property_token: Address,
    pub property_shares: i128,
    pub target_amount: i128,
    pub payment_amount: i128,
    pub local_node_fee: i128,
    pub platform_fee: i128,
    pub total_payments: u32,
    pub insured_payments: u32,
    pub per_payment_interest_ratio: i128,
    pub downpayment_ratio: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct LoanLedger {
    pub invested_amount: i128,
    pub extra_amount: i128,
    pub amortized_amount: i128,
    pub transferred_tokens: i128,
    pub times_paid: u32,
    pub times_default: u32,
    pub next_payment: u64,
    pub stake_deadline: u64,
    pub funding_deadline: u64,
    pub signing_deadline: u64,
    pub stake_received: bool,
}

/// Per-investor record. `amount` is zeroed on refund, the entry itself is
/// never removed.
#[contracttype]
#[derive(Clone)]
pub struct Investment {
    pub amount: i128,
    pub times_collected: u32,
    pub times_collected_default: u32,
    pub claimed_property: bool,
}

#[contracttype]
#[derive(Clone)]
pub struct DocumentSignature {
    pub signature: BytesN<64>,
    pub recovery_id: u32,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Terms,
    Status,
    Ledger,
    DocumentHash,
    BorrowerSignature,
    LocalNodeSignature,
    Investment(Address),
}
