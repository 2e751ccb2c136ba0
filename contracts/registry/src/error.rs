use soroban_sdk::{self, contracterror};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    AlreadyInitialized = 200,
    NotAuthorized = 201,
    InvalidFeeRatio = 202,
    UnknownLocalNode = 203,
    UnknownSigner = 204,
    UnknownProposal = 205,
    InvalidTerms = 206,
}
