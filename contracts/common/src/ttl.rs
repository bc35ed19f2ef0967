use soroban_sdk::{Env, IntoVal, Val};

/// ~60 days at 5s/ledger.
pub const TTL_THRESHOLD: u32 = 1_036_800;
/// ~120 days at 5s/ledger.
pub const TTL_EXTEND_TO: u32 = 2_073_600;

/// Keeps the contract instance (and its instance storage) alive.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Keeps a persistent entry alive. The key must already exist.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
