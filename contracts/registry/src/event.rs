use soroban_sdk::{symbol_short, Address, Env};

// Event Emission
/// Emits an event when an administrator is added or removed.
pub fn emit_admin_changed(env: &Env, admin: &Address, added: bool) {
    env.events()
        .publish((symbol_short!("admin"), admin.clone()), added);
}

/// Emits an event when a local node tier is set or removed.
pub fn emit_local_node_changed(env: &Env, node: &Address, fee_ratio: Option<i128>) {
    env.events()
        .publish((symbol_short!("node"), node.clone()), fee_ratio);
}

/// Emits an event when an investor is whitelisted or removed.
pub fn emit_investor_changed(env: &Env, investor: &Address, whitelisted: bool) {
    env.events()
        .publish((symbol_short!("investor"), investor.clone()), whitelisted);
}

/// Emits an event when a party registers its signing key.
pub fn emit_signer_registered(env: &Env, party: &Address) {
    env.events()
        .publish((symbol_short!("signer"), party.clone()), ());
}

/// Emits an event when a proposal is created.
pub fn emit_proposal_created(env: &Env, id: u32, local_node: &Address, borrower: &Address) {
    env.events().publish(
        (symbol_short!("proposal"), id),
        (local_node.clone(), borrower.clone()),
    );
}

/// Emits an event when a proposal is removed.
pub fn emit_proposal_removed(env: &Env, id: u32) {
    env.events().publish((symbol_short!("prop_rm"), id), ());
}
