use soroban_sdk::{self, contracterror};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LoanError {
    AlreadyInitialized = 100,
    NotInitialized = 101,
    InvalidTerms = 102,
    InvalidStatus = 103,
    NotBorrower = 104,
    NotLocalNode = 105,
    InvalidAmount = 106,
    PropertySharesMissing = 107,
    NotWhitelisted = 108,
    TargetAmountExceeded = 109,
    DeadlineExpired = 110,
    NothingInvested = 111,
    SignaturesComplete = 112,
    MissingDocumentHash = 113,
    NotASigner = 114,
    SignatureMismatch = 115,
    SignaturesIncomplete = 116,
    PaymentWindowClosed = 117,
    NothingToCollect = 118,
    PropertyAlreadyClaimed = 119,
}
