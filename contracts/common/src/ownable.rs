//! Single-owner administration.
//!
//! The owner is recorded once at initialisation and may later hand the role
//! to another address. Nothing here calls `require_auth`; callers verify the
//! signature before consulting these guards.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{ttl, CommonError};

const OWNER: Symbol = symbol_short!("OWNER");

/// Record the initial owner. Fails if an owner is already set.
pub fn init_owner(env: &Env, owner: &Address) -> Result<(), CommonError> {
    if has_owner(env) {
        return Err(CommonError::AlreadyInitialized);
    }
    env.storage().instance().set(&OWNER, owner);
    ttl::extend_instance(env);
    Ok(())
}

pub fn has_owner(env: &Env) -> bool {
    env.storage().instance().has(&OWNER)
}

pub fn get_owner(env: &Env) -> Result<Address, CommonError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(CommonError::NotInitialized)
}

/// Returns `true` only when `who` is the recorded owner.
pub fn is_owner(env: &Env, who: &Address) -> bool {
    match get_owner(env) {
        Ok(owner) => owner == *who,
        Err(_) => false,
    }
}

/// Guard: `AccessDenied` unless `caller` is the owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), CommonError> {
    let owner = get_owner(env)?;
    if owner != *caller {
        return Err(CommonError::AccessDenied);
    }
    Ok(())
}

/// Hand ownership to `new_owner`, returning the previous owner.
pub fn transfer_ownership(
    env: &Env,
    caller: &Address,
    new_owner: &Address,
) -> Result<Address, CommonError> {
    require_owner(env, caller)?;
    env.storage().instance().set(&OWNER, new_owner);
    ttl::extend_instance(env);
    Ok(caller.clone())
}
