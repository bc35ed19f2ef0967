//! Shared utilities and error types for the ballot contract suite.
//!
//! This crate provides:
//! - [`CommonError`]: standardised error codes for all contracts.
//! - [`ownable`]: single-owner administration (initialise, check, transfer).
//! - [`ttl`]: storage time-to-live helpers shared by every contract.
//!
//! Contract-specific errors convert from [`CommonError`] so guards defined
//! here compose with `?` at the contract boundary.

#![no_std]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod ownable;
pub mod ttl;

pub use ownable::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by every ballot contract.
///
/// # Code ranges
/// | Range   | Purpose                       |
/// |---------|-------------------------------|
/// | 1 – 9   | Lifecycle / initialisation    |
/// | 10 – 19 | Authentication & authorisation|
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    AccessDenied = 10,
}
