//! Campaign Escrow & Reward Distribution Logic
//!
//! This crate implements the contract layer of the campaign reward platform:
//! creators escrow an asset into a named campaign, a trusted executor releases
//! fixed-size shares to recipients once a social-media action is verified
//! off-chain, and the platform owner collects a basis-point fee per share.
//!
//! # Modules
//! - `errors`: Error taxonomy (authorization, validation, state, transfer)
//! - `events`: Notifications emitted on successful state changes
//! - `security`: Capability-based access control (owner, executor, creator)
//! - `bank`: Asset custody — token ledgers, native balances, escrow moves
//! - `campaign`: The per-campaign escrow record and its dedup sets
//! - `engine`: The single mutation entry point for every operation
//!
//! Every top-level operation is atomic: it either commits all of its effects
//! (registry mutation, dedup insertion, asset transfer, event) or none.

pub mod bank;
pub mod campaign;
pub mod engine;
pub mod errors;
pub mod events;
pub mod security;

/// Engine API version — frozen after release
pub const ENGINE_API_VERSION: &str = "1.0.0";
