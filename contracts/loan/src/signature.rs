//! Document signature gate: the local node files a document hash, both
//! parties sign it, and disbursement stays blocked until both signatures
//! verify against the stored hash.

use crate::error::LoanError;
use crate::event;
use crate::state::{
    clear_signatures, read_borrower_signature, read_document_hash, read_local_node_signature,
    read_status, read_terms, write_borrower_signature, write_document_hash,
    write_local_node_signature,
};
use crate::storage_types::{DocumentSignature, Status};
use soroban_sdk::{panic_with_error, Address, BytesN, Env, IntoVal, Symbol};

/// Asks the registry to recover the identity that produced `sig` over
/// `hash`. An unrecoverable or unregistered signature aborts the call.
fn recover_signer(
    e: &Env,
    registry: &Address,
    hash: &BytesN<32>,
    sig: &DocumentSignature,
) -> Address {
    e.invoke_contract(
        registry,
        &Symbol::new(e, "recover_signer"),
        (hash.clone(), sig.signature.clone(), sig.recovery_id).into_val(e),
    )
}

pub fn submit_document_hash(e: &Env, caller: Address, hash: BytesN<32>) {
    let terms = read_terms(e);
    if caller != terms.local_node {
        panic_with_error!(e, LoanError::NotLocalNode);
    }
    if read_status(e) != Status::AwaitingSignatures {
        panic_with_error!(e, LoanError::InvalidStatus);
    }
    if read_borrower_signature(e).is_some() && read_local_node_signature(e).is_some() {
        panic_with_error!(e, LoanError::SignaturesComplete);
    }
    // Replacing the hash invalidates anything signed before it.
    clear_signatures(e);
    write_document_hash(e, &hash);
    event::emit_document_hash(e, &hash);
}

pub fn sign_document(e: &Env, signer: Address, sig: DocumentSignature) {
    let terms = read_terms(e);
    if read_status(e) != Status::AwaitingSignatures {
        panic_with_error!(e, LoanError::InvalidStatus);
    }
    let hash = read_document_hash(e)
        .unwrap_or_else(|| panic_with_error!(e, LoanError::MissingDocumentHash));
    if signer != terms.borrower && signer != terms.local_node {
        panic_with_error!(e, LoanError::NotASigner);
    }
    let recovered = recover_signer(e, &terms.registry, &hash, &sig);
    if recovered != signer {
        panic_with_error!(e, LoanError::SignatureMismatch);
    }
    if signer == terms.borrower {
        write_borrower_signature(e, &sig);
    } else {
        write_local_node_signature(e, &sig);
    }
    event::emit_document_signed(e, &signer);
}

pub fn require_both_signed(e: &Env) {
    if read_borrower_signature(e).is_none() || read_local_node_signature(e).is_none() {
        panic_with_error!(e, LoanError::SignaturesIncomplete);
    }
}
