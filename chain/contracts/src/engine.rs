//! The campaign engine — single mutation entry point
//!
//! Owns the global config, the campaign registry, and the event log, and
//! implements every top-level operation. All state changes flow through
//! `&mut self`, so operations are serialized by construction; callers
//! needing cross-thread access wrap the engine in a lock.
//!
//! Atomicity: single operations order every fallible step (authorization,
//! validation, asset transfer) before the first registry write. Batch
//! operations run on a cloned scratch copy of the registry, the bank, and
//! the event log, and commit by swap only when every item succeeded.

use std::collections::HashMap;
use tracing::{debug, info, warn};
use types::asset::Asset;
use types::fee::{FeeSchedule, DEFAULT_FEE_CAP_BPS};
use types::ids::{AccountId, CampaignId};

use crate::bank::Bank;
use crate::campaign::Campaign;
use crate::errors::{EngineError, StateError, ValidationError};
use crate::events::{
    CampaignCreated, CampaignFunded, CampaignPaused, CampaignResumed,
    CampaignValuePerShareUpdated, CampaignWithdrawn, EngineEvent, FeesWithdrawn, UserFunded,
};
use crate::security::{AccessControl, Capability};

/// Campaign escrow and reward distribution engine.
#[derive(Debug, Clone)]
pub struct CampaignEngine {
    access: AccessControl,
    fees: FeeSchedule,
    /// Custody identity all escrowed value is held under
    escrow: AccountId,
    campaigns: HashMap<CampaignId, Campaign>,
    /// Emitted events log (append-only)
    events: Vec<EngineEvent>,
}

impl CampaignEngine {
    /// Create an engine with an explicit fee cap.
    ///
    /// Fails if the initial rate already exceeds the cap.
    pub fn new(
        owner: AccountId,
        executor: AccountId,
        fee_bps: u32,
        fee_cap_bps: u32,
    ) -> Result<Self, EngineError> {
        let fees = FeeSchedule::new(fee_bps, fee_cap_bps).ok_or(ValidationError::FeeAboveCap {
            bps: fee_bps,
            cap_bps: fee_cap_bps,
        })?;
        Ok(Self {
            access: AccessControl::new(owner, executor),
            fees,
            escrow: AccountId::new(),
            campaigns: HashMap::new(),
            events: Vec::new(),
        })
    }

    /// Create an engine with the default fee cap.
    pub fn with_default_cap(
        owner: AccountId,
        executor: AccountId,
        fee_bps: u32,
    ) -> Result<Self, EngineError> {
        Self::new(owner, executor, fee_bps, DEFAULT_FEE_CAP_BPS)
    }

    // ───────────────────────── Global Config ─────────────────────────

    /// Update the platform fee rate. Owner-only, capped.
    pub fn set_fee_percentage(&mut self, caller: AccountId, bps: u32) -> Result<(), EngineError> {
        self.access.require(caller, Capability::Owner, None)?;
        if !self.fees.try_set_bps(bps) {
            return Err(ValidationError::FeeAboveCap {
                bps,
                cap_bps: self.fees.cap_bps(),
            }
            .into());
        }
        info!(bps, "fee percentage updated");
        Ok(())
    }

    /// Rotate the executor identity. Owner-only.
    pub fn update_executor(
        &mut self,
        caller: AccountId,
        executor: AccountId,
    ) -> Result<(), EngineError> {
        self.access.require(caller, Capability::Owner, None)?;
        self.access.set_executor(executor);
        info!(executor = %executor, "executor updated");
        Ok(())
    }

    // ───────────────────────── Campaign Creation ─────────────────────────

    /// Create a campaign and escrow its initial funds.
    ///
    /// The caller becomes the campaign's creator. Token-denominated
    /// campaigns pull `total_value` from the caller (requires a prior
    /// allowance to the escrow identity); native campaigns require the
    /// caller to attach exactly `total_value` as `provided_native`.
    pub fn create_campaign(
        &mut self,
        bank: &mut Bank,
        caller: AccountId,
        id: CampaignId,
        asset: Asset,
        gross_value_per_share: u128,
        total_value: u128,
        provided_native: Option<u128>,
    ) -> Result<(), EngineError> {
        if self.campaigns.contains_key(&id) {
            return Err(StateError::CampaignExists { id }.into());
        }
        if gross_value_per_share == 0 || total_value == 0 {
            return Err(ValidationError::ZeroValue.into());
        }
        if gross_value_per_share > total_value {
            return Err(ValidationError::ShareExceedsTotal {
                share: gross_value_per_share,
                total: total_value,
            }
            .into());
        }
        check_provided(&asset, total_value, provided_native)?;
        let split = self
            .fees
            .split(gross_value_per_share)
            .ok_or(ValidationError::Overflow)?;

        bank.escrow_in(&asset, caller, self.escrow, total_value)?;

        let campaign = Campaign::new(id, caller, asset, split, total_value);
        self.events.push(EngineEvent::CampaignCreated(CampaignCreated {
            campaign_id: id,
            asset,
            value_per_share: split.net,
            total_value,
        }));
        self.campaigns.insert(id, campaign);
        info!(campaign = %id, %asset, total_value = %total_value, "campaign created");
        Ok(())
    }

    // ───────────────────────── Funding & Withdrawal ─────────────────────────

    /// Escrow additional funds into a campaign. Creator-only.
    ///
    /// The per-share split is untouched; only `total_value` grows.
    pub fn fund_campaign(
        &mut self,
        bank: &mut Bank,
        caller: AccountId,
        id: CampaignId,
        amount: u128,
        provided_native: Option<u128>,
    ) -> Result<(), EngineError> {
        let campaign = self
            .campaigns
            .get_mut(&id)
            .ok_or(StateError::CampaignNotFound { id })?;
        self.access
            .require(caller, Capability::Creator, Some(campaign.creator))?;
        if amount == 0 {
            return Err(ValidationError::ZeroValue.into());
        }
        check_provided(&campaign.asset, amount, provided_native)?;
        let new_total = campaign
            .total_value
            .checked_add(amount)
            .ok_or(ValidationError::Overflow)?;

        bank.escrow_in(&campaign.asset, caller, self.escrow, amount)?;

        campaign.total_value = new_total;
        self.events.push(EngineEvent::CampaignFunded(CampaignFunded {
            campaign_id: id,
            amount,
        }));
        debug!(campaign = %id, amount = %amount, "campaign funded");
        Ok(())
    }

    /// Withdraw unspent escrow back to the creator. Creator-only.
    pub fn withdraw_funds(
        &mut self,
        bank: &mut Bank,
        caller: AccountId,
        id: CampaignId,
        amount: u128,
    ) -> Result<(), EngineError> {
        let campaign = self
            .campaigns
            .get_mut(&id)
            .ok_or(StateError::CampaignNotFound { id })?;
        self.access
            .require(caller, Capability::Creator, Some(campaign.creator))?;
        if amount == 0 {
            return Err(ValidationError::ZeroValue.into());
        }
        if amount > campaign.total_value {
            return Err(StateError::WithdrawTooHigh {
                requested: amount,
                available: campaign.total_value,
            }
            .into());
        }

        bank.escrow_out(&campaign.asset, self.escrow, campaign.creator, amount)?;

        campaign.total_value -= amount;
        self.events.push(EngineEvent::CampaignWithdrawn(CampaignWithdrawn {
            campaign_id: id,
            amount,
        }));
        debug!(campaign = %id, amount = %amount, remaining = %campaign.total_value, "funds withdrawn");
        Self::auto_pause_guard(campaign, &mut self.events);
        Ok(())
    }

    // ───────────────────────── Reward Distribution ─────────────────────────

    /// Reward one verified social-media action. Executor-only.
    ///
    /// Pays the net share to `recipient`, accrues the fee, and permanently
    /// consumes both the recipient address and the user id for this
    /// campaign.
    pub fn check_tweet(
        &mut self,
        bank: &mut Bank,
        caller: AccountId,
        id: CampaignId,
        recipient: AccountId,
        user_id: &str,
        tweet_url: &str,
    ) -> Result<(), EngineError> {
        self.access.require(caller, Capability::Executor, None)?;
        let campaign = self
            .campaigns
            .get_mut(&id)
            .ok_or(StateError::CampaignNotFound { id })?;
        if recipient.is_nil() {
            return Err(ValidationError::NullRecipient.into());
        }
        if user_id.is_empty() {
            return Err(ValidationError::EmptyUserId.into());
        }
        if tweet_url.is_empty() {
            return Err(ValidationError::EmptyTweetUrl.into());
        }
        if campaign.paused {
            return Err(StateError::CampaignIsPaused.into());
        }
        if campaign.address_funded(&recipient) {
            return Err(StateError::AlreadyFunded.into());
        }
        if campaign.user_id_funded(user_id) {
            return Err(StateError::UserIdAlreadyUsed.into());
        }
        let gross = campaign.gross_per_share();
        if campaign.total_value < gross {
            return Err(StateError::InsufficientFunds {
                required: gross,
                available: campaign.total_value,
            }
            .into());
        }
        let new_fees = campaign
            .total_fees
            .checked_add(campaign.fee_per_share)
            .ok_or(ValidationError::Overflow)?;

        bank.escrow_out(&campaign.asset, self.escrow, recipient, campaign.value_per_share)?;

        campaign.total_value -= gross;
        campaign.total_fees = new_fees;
        campaign.mark_funded(recipient, user_id.to_string());
        self.events.push(EngineEvent::UserFunded(UserFunded {
            campaign_id: id,
            recipient,
            tweet_url: tweet_url.to_string(),
        }));
        debug!(
            campaign = %id,
            recipient = %recipient,
            paid = %campaign.value_per_share,
            remaining = %campaign.total_value,
            "user funded"
        );
        Self::auto_pause_guard(campaign, &mut self.events);
        Ok(())
    }

    /// Reward many verified actions in one atomic transaction.
    ///
    /// The four slices are matched by index. Any failing tuple rolls the
    /// whole batch back, including tuples already applied.
    pub fn batch_check_tweets(
        &mut self,
        bank: &mut Bank,
        caller: AccountId,
        campaign_ids: &[CampaignId],
        recipients: &[AccountId],
        user_ids: &[String],
        tweet_urls: &[String],
    ) -> Result<(), EngineError> {
        let len = campaign_ids.len();
        if recipients.len() != len || user_ids.len() != len || tweet_urls.len() != len {
            return Err(ValidationError::BatchLengthMismatch.into());
        }

        let mut staged = self.clone();
        let mut staged_bank = bank.clone();
        for i in 0..len {
            staged.check_tweet(
                &mut staged_bank,
                caller,
                campaign_ids[i],
                recipients[i],
                &user_ids[i],
                &tweet_urls[i],
            )?;
        }
        *self = staged;
        *bank = staged_bank;
        info!(count = len, "tweet batch committed");
        Ok(())
    }

    // ───────────────────────── Fee Collection ─────────────────────────

    /// Collect a campaign's accumulated fees. Owner-only.
    pub fn withdraw_fees(
        &mut self,
        bank: &mut Bank,
        caller: AccountId,
        id: CampaignId,
    ) -> Result<(), EngineError> {
        self.access.require(caller, Capability::Owner, None)?;
        let owner = self.access.owner();
        let campaign = self
            .campaigns
            .get_mut(&id)
            .ok_or(StateError::CampaignNotFound { id })?;
        if campaign.total_fees == 0 {
            return Err(ValidationError::NoFees.into());
        }
        let amount = campaign.total_fees;

        bank.escrow_out(&campaign.asset, self.escrow, owner, amount)?;

        campaign.total_fees = 0;
        self.events.push(EngineEvent::FeesWithdrawn(FeesWithdrawn {
            campaign_id: id,
            amount,
        }));
        debug!(campaign = %id, amount = %amount, "fees withdrawn");
        Ok(())
    }

    /// Collect fees from many campaigns in one atomic transaction.
    pub fn batch_withdraw_fees(
        &mut self,
        bank: &mut Bank,
        caller: AccountId,
        campaign_ids: &[CampaignId],
    ) -> Result<(), EngineError> {
        let mut staged = self.clone();
        let mut staged_bank = bank.clone();
        for id in campaign_ids {
            staged.withdraw_fees(&mut staged_bank, caller, *id)?;
        }
        *self = staged;
        *bank = staged_bank;
        info!(count = campaign_ids.len(), "fee batch committed");
        Ok(())
    }

    // ───────────────────────── Rate & Pause Lifecycle ─────────────────────────

    /// Change the gross per-share value. Creator-only.
    pub fn update_value_per_share(
        &mut self,
        caller: AccountId,
        id: CampaignId,
        gross_value_per_share: u128,
    ) -> Result<(), EngineError> {
        let campaign = self
            .campaigns
            .get_mut(&id)
            .ok_or(StateError::CampaignNotFound { id })?;
        self.access
            .require(caller, Capability::Creator, Some(campaign.creator))?;
        if gross_value_per_share == 0 {
            return Err(ValidationError::ZeroValue.into());
        }
        if gross_value_per_share > campaign.total_value {
            return Err(ValidationError::ShareExceedsTotal {
                share: gross_value_per_share,
                total: campaign.total_value,
            }
            .into());
        }
        let split = self
            .fees
            .split(gross_value_per_share)
            .ok_or(ValidationError::Overflow)?;
        campaign.apply_split(split);
        self.events
            .push(EngineEvent::CampaignValuePerShareUpdated(
                CampaignValuePerShareUpdated {
                    campaign_id: id,
                    value_per_share: gross_value_per_share,
                },
            ));
        debug!(campaign = %id, gross = %gross_value_per_share, "value per share updated");
        Ok(())
    }

    /// Halt distribution. Creator-only.
    pub fn pause_campaign(&mut self, caller: AccountId, id: CampaignId) -> Result<(), EngineError> {
        let campaign = self
            .campaigns
            .get_mut(&id)
            .ok_or(StateError::CampaignNotFound { id })?;
        self.access
            .require(caller, Capability::Creator, Some(campaign.creator))?;
        if campaign.paused {
            return Err(StateError::AlreadyPaused.into());
        }
        campaign.paused = true;
        self.events.push(EngineEvent::CampaignPaused(CampaignPaused {
            campaign_id: id,
        }));
        debug!(campaign = %id, "campaign paused");
        Ok(())
    }

    /// Re-enable distribution. Creator-only; requires remaining funds.
    pub fn resume_campaign(
        &mut self,
        caller: AccountId,
        id: CampaignId,
    ) -> Result<(), EngineError> {
        let campaign = self
            .campaigns
            .get_mut(&id)
            .ok_or(StateError::CampaignNotFound { id })?;
        self.access
            .require(caller, Capability::Creator, Some(campaign.creator))?;
        if !campaign.paused {
            return Err(StateError::NotPaused.into());
        }
        if campaign.total_value == 0 {
            return Err(StateError::NoFunds.into());
        }
        campaign.paused = false;
        self.events.push(EngineEvent::CampaignResumed(CampaignResumed {
            campaign_id: id,
        }));
        debug!(campaign = %id, "campaign resumed");
        Ok(())
    }

    // ───────────────────────── Auto-Pause Guard ─────────────────────────

    /// Pause a campaign that can no longer cover one gross share.
    ///
    /// Runs as the last step of every value-decreasing operation. The
    /// threshold is the gross cost of one distribution (net share plus
    /// fee) on both the withdrawal and distribution paths.
    fn auto_pause_guard(campaign: &mut Campaign, events: &mut Vec<EngineEvent>) {
        if !campaign.paused && !campaign.can_cover_share() {
            campaign.paused = true;
            warn!(
                campaign = %campaign.id,
                total_value = %campaign.total_value,
                "campaign auto-paused: escrow below one share"
            );
            events.push(EngineEvent::CampaignPaused(CampaignPaused {
                campaign_id: campaign.id,
            }));
        }
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Look up a campaign record.
    pub fn campaign(&self, id: &CampaignId) -> Option<&Campaign> {
        self.campaigns.get(id)
    }

    /// Whether `account` has been rewarded by the campaign. Unknown
    /// campaigns read as `false`.
    pub fn address_funded(&self, id: &CampaignId, account: &AccountId) -> bool {
        self.campaigns
            .get(id)
            .map(|c| c.address_funded(account))
            .unwrap_or(false)
    }

    /// Whether `user_id` has been consumed by the campaign.
    pub fn user_id_funded(&self, id: &CampaignId, user_id: &str) -> bool {
        self.campaigns
            .get(id)
            .map(|c| c.user_id_funded(user_id))
            .unwrap_or(false)
    }

    /// Current fee rate in basis points.
    pub fn fee_percentage(&self) -> u32 {
        self.fees.bps()
    }

    /// The platform owner.
    pub fn owner(&self) -> AccountId {
        self.access.owner()
    }

    /// The current executor.
    pub fn executor(&self) -> AccountId {
        self.access.executor()
    }

    /// The custody identity token holders approve before creating or
    /// funding a token-denominated campaign.
    pub fn escrow_account(&self) -> AccountId {
        self.escrow
    }

    /// Get all emitted events.
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Enforce the native-value attachment rule for escrow-in operations.
///
/// Native campaigns must attach exactly the declared amount; token
/// campaigns must attach nothing.
fn check_provided(
    asset: &Asset,
    amount: u128,
    provided: Option<u128>,
) -> Result<(), ValidationError> {
    match (asset, provided) {
        (Asset::Native, Some(value)) if value == amount => Ok(()),
        (Asset::Native, Some(value)) => Err(ValidationError::NativeValueMismatch {
            expected: amount,
            provided: value,
        }),
        (Asset::Native, None) => Err(ValidationError::NativeValueMismatch {
            expected: amount,
            provided: 0,
        }),
        (Asset::Token(_), None) => Ok(()),
        (Asset::Token(_), Some(_)) => Err(ValidationError::UnexpectedNativeValue),
    }
}
