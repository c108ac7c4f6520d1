//! Notifications emitted on successful state changes
//!
//! One struct per notification plus an enum wrapper for uniform handling.
//! The engine appends events to an internal log; a batch operation's events
//! become visible only when the whole batch commits.

use serde::{Deserialize, Serialize};
use types::asset::Asset;
use types::ids::{AccountId, CampaignId};

/// A campaign was created and funded with its initial escrow
///
/// `value_per_share` is the net amount a recipient receives, after the
/// fee split current at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignCreated {
    pub campaign_id: CampaignId,
    pub asset: Asset,
    pub value_per_share: u128,
    pub total_value: u128,
}

/// Additional funds were escrowed into an existing campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignFunded {
    pub campaign_id: CampaignId,
    pub amount: u128,
}

/// The creator withdrew unspent escrow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignWithdrawn {
    pub campaign_id: CampaignId,
    pub amount: u128,
}

/// Distribution halted, either by the creator or by the depletion guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignPaused {
    pub campaign_id: CampaignId,
}

/// Distribution re-enabled by the creator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignResumed {
    pub campaign_id: CampaignId,
}

/// The creator changed the gross per-share value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignValuePerShareUpdated {
    pub campaign_id: CampaignId,
    /// New gross value; the stored net/fee split is recomputed from it
    pub value_per_share: u128,
}

/// A verified social-media action was rewarded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFunded {
    pub campaign_id: CampaignId,
    pub recipient: AccountId,
    pub tweet_url: String,
}

/// The owner collected a campaign's accumulated fees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeesWithdrawn {
    pub campaign_id: CampaignId,
    pub amount: u128,
}

/// Enum wrapper for all engine events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    CampaignCreated(CampaignCreated),
    CampaignFunded(CampaignFunded),
    CampaignWithdrawn(CampaignWithdrawn),
    CampaignPaused(CampaignPaused),
    CampaignResumed(CampaignResumed),
    CampaignValuePerShareUpdated(CampaignValuePerShareUpdated),
    UserFunded(UserFunded),
    FeesWithdrawn(FeesWithdrawn),
}
