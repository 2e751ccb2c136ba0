#![no_std]

mod contract;
mod error;
mod event;
mod investment;
mod payment;
mod signature;
mod state;
mod storage_types;

pub use crate::contract::LoanClient;
pub use crate::error::LoanError;
pub use crate::storage_types::{DocumentSignature, Investment, LoanTerms, Status, RATIO};
