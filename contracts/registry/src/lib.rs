#![no_std]

mod contract;
mod error;
mod event;
mod storage_types;
mod test;

pub use crate::contract::RegistryClient;
pub use crate::error::RegistryError;
pub use crate::storage_types::Proposal;
