//! Error taxonomy for campaign operations
//!
//! Four categories, aggregated into `EngineError`: wrong capability,
//! malformed input, wrong campaign state, and failed asset movement.
//! Every error aborts the enclosing operation (an entire batch included)
//! with no observable partial state.

use thiserror::Error;
use types::ids::{CampaignId, TokenId};

/// Caller lacks the capability an operation requires
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("only the owner may call this")]
    NotOwner,

    #[error("only the executor may call this")]
    NotExecutor,

    #[error("only the campaign creator may call this")]
    NotCreator,
}

/// Input rejected before any state was touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("fee exceeds the configured cap: {bps} bps > {cap_bps} bps")]
    FeeAboveCap { bps: u32, cap_bps: u32 },

    #[error("value must be greater than zero")]
    ZeroValue,

    #[error("value per share must not exceed total value: {share} > {total}")]
    ShareExceedsTotal { share: u128, total: u128 },

    #[error("attached native value must equal the amount: expected {expected}, provided {provided}")]
    NativeValueMismatch { expected: u128, provided: u128 },

    #[error("native value attached to a token-denominated operation")]
    UnexpectedNativeValue,

    #[error("recipient must not be the null identity")]
    NullRecipient,

    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("tweet url must not be empty")]
    EmptyTweetUrl,

    #[error("batch arrays must have equal length")]
    BatchLengthMismatch,

    #[error("campaign has no fees to withdraw")]
    NoFees,

    #[error("arithmetic overflow")]
    Overflow,
}

/// Operation conflicts with the current campaign state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("campaign already exists: {id}")]
    CampaignExists { id: CampaignId },

    #[error("campaign not found: {id}")]
    CampaignNotFound { id: CampaignId },

    #[error("campaign is paused")]
    CampaignIsPaused,

    #[error("campaign is already paused")]
    AlreadyPaused,

    #[error("campaign is not paused")]
    NotPaused,

    #[error("campaign has no funds")]
    NoFunds,

    #[error("recipient was already funded by this campaign")]
    AlreadyFunded,

    #[error("user id was already used in this campaign")]
    UserIdAlreadyUsed,

    #[error("withdraw value too high: requested {requested}, available {available}")]
    WithdrawTooHigh { requested: u128, available: u128 },

    #[error("insufficient campaign funds: required {required}, available {available}")]
    InsufficientFunds { required: u128, available: u128 },
}

/// The underlying asset movement was rejected by its ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("unknown token: {token}")]
    UnknownToken { token: TokenId },

    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u128, available: u128 },

    #[error("insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance { required: u128, available: u128 },

    #[error("arithmetic overflow in balance update")]
    Overflow,
}

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("authorization error: {0}")]
    Authorization(#[from] AuthorizationError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("state error: {0}")]
    State(#[from] StateError),

    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),
}
