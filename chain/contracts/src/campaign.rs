//! The per-campaign escrow record
//!
//! A campaign holds one asset, a fixed per-share reward split, and two
//! monotonically growing dedup sets: recipients already rewarded and user
//! ids already consumed. Records are created once and never removed; a
//! depleted campaign is simply paused with zero value.
//!
//! The dedup sets grow without bound over a campaign's lifetime. That is a
//! known scaling limit, not a correctness concern.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use types::asset::Asset;
use types::fee::ShareSplit;
use types::ids::{AccountId, CampaignId};

/// One campaign's escrow state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    /// Identity holding withdrawal and pause rights
    pub creator: AccountId,
    pub asset: Asset,
    /// Escrowed balance currently available for distribution or withdrawal
    pub total_value: u128,
    /// Net amount paid to a recipient per distribution
    pub value_per_share: u128,
    /// Fee retained by the platform per distribution
    pub fee_per_share: u128,
    /// Accumulated fees not yet collected by the owner
    pub total_fees: u128,
    /// Blocks distribution while set
    pub paused: bool,
    funded_addresses: HashSet<AccountId>,
    funded_user_ids: HashSet<String>,
}

impl Campaign {
    pub fn new(
        id: CampaignId,
        creator: AccountId,
        asset: Asset,
        split: ShareSplit,
        total_value: u128,
    ) -> Self {
        Self {
            id,
            creator,
            asset,
            total_value,
            value_per_share: split.net,
            fee_per_share: split.fee,
            total_fees: 0,
            paused: false,
            funded_addresses: HashSet::new(),
            funded_user_ids: HashSet::new(),
        }
    }

    /// Gross cost of one distribution: net share plus fee.
    pub fn gross_per_share(&self) -> u128 {
        self.value_per_share + self.fee_per_share
    }

    /// Whether the escrow still covers one full distribution.
    pub fn can_cover_share(&self) -> bool {
        self.total_value >= self.gross_per_share()
    }

    /// Whether `account` has already received a reward from this campaign.
    pub fn address_funded(&self, account: &AccountId) -> bool {
        self.funded_addresses.contains(account)
    }

    /// Whether `user_id` has already been consumed by this campaign.
    pub fn user_id_funded(&self, user_id: &str) -> bool {
        self.funded_user_ids.contains(user_id)
    }

    /// Record a completed distribution in both dedup sets.
    pub(crate) fn mark_funded(&mut self, recipient: AccountId, user_id: String) {
        self.funded_addresses.insert(recipient);
        self.funded_user_ids.insert(user_id);
    }

    /// Replace the per-share split after a gross rate update.
    pub(crate) fn apply_split(&mut self, split: ShareSplit) {
        self.value_per_share = split.net;
        self.fee_per_share = split.fee;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::fee::FeeSchedule;

    fn sample() -> Campaign {
        let fees = FeeSchedule::new(500, 1_000).unwrap();
        Campaign::new(
            CampaignId::from_content(b"sample"),
            AccountId::new(),
            Asset::Native,
            fees.split(1_000).unwrap(),
            100_000,
        )
    }

    #[test]
    fn test_new_campaign_split() {
        let campaign = sample();
        assert_eq!(campaign.value_per_share, 950);
        assert_eq!(campaign.fee_per_share, 50);
        assert_eq!(campaign.gross_per_share(), 1_000);
        assert_eq!(campaign.total_fees, 0);
        assert!(!campaign.paused);
    }

    #[test]
    fn test_can_cover_share_boundary() {
        let mut campaign = sample();
        campaign.total_value = 1_000;
        assert!(campaign.can_cover_share());
        campaign.total_value = 999;
        assert!(!campaign.can_cover_share());
    }

    #[test]
    fn test_mark_funded_is_permanent() {
        let mut campaign = sample();
        let recipient = AccountId::new();
        assert!(!campaign.address_funded(&recipient));
        campaign.mark_funded(recipient, "user_1".to_string());
        assert!(campaign.address_funded(&recipient));
        assert!(campaign.user_id_funded("user_1"));
        assert!(!campaign.user_id_funded("user_2"));
    }

    #[test]
    fn test_apply_split_replaces_rates() {
        let mut campaign = sample();
        let fees = FeeSchedule::new(500, 1_000).unwrap();
        campaign.apply_split(fees.split(2_000).unwrap());
        assert_eq!(campaign.value_per_share, 1_900);
        assert_eq!(campaign.fee_per_share, 100);
    }
}
