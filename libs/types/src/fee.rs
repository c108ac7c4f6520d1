//! Basis-point fee schedule and per-share split math
//!
//! The platform retains a percentage of every distributed share, expressed
//! in basis points (1 bps = 0.01%). The fee portion of a gross share value
//! is always `floor(bps * gross / 10_000)`; the recipient receives the
//! remainder.

use serde::{Deserialize, Serialize};

/// One hundred percent, in basis points
pub const BASIS_POINTS: u32 = 10_000;

/// Default upper bound on the platform fee (10%). Deployed configurations
/// have used 1000 and 2000; the cap is a constructor parameter, this is
/// only the default.
pub const DEFAULT_FEE_CAP_BPS: u32 = 1_000;

/// The two portions a gross per-share value splits into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSplit {
    /// Amount paid to the recipient
    pub net: u128,
    /// Amount retained by the platform
    pub fee: u128,
}

impl ShareSplit {
    /// The gross value this split was derived from
    pub fn gross(&self) -> u128 {
        self.net + self.fee
    }
}

/// Global fee configuration: the current rate and its configured cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    bps: u32,
    cap_bps: u32,
}

impl FeeSchedule {
    /// Create a schedule, rejecting a rate above the cap.
    pub fn new(bps: u32, cap_bps: u32) -> Option<Self> {
        if bps > cap_bps {
            return None;
        }
        Some(Self { bps, cap_bps })
    }

    /// Create a schedule with the default cap.
    pub fn with_default_cap(bps: u32) -> Option<Self> {
        Self::new(bps, DEFAULT_FEE_CAP_BPS)
    }

    /// Current rate in basis points.
    pub fn bps(&self) -> u32 {
        self.bps
    }

    /// Configured maximum rate in basis points.
    pub fn cap_bps(&self) -> u32 {
        self.cap_bps
    }

    /// Update the rate. Returns `false` (unchanged) if above the cap.
    pub fn try_set_bps(&mut self, bps: u32) -> bool {
        if bps > self.cap_bps {
            return false;
        }
        self.bps = bps;
        true
    }

    /// Fee portion of a gross value: `floor(bps * gross / 10_000)`.
    ///
    /// `None` on arithmetic overflow of the intermediate product.
    pub fn fee_for(&self, gross: u128) -> Option<u128> {
        gross
            .checked_mul(self.bps as u128)
            .map(|scaled| scaled / BASIS_POINTS as u128)
    }

    /// Split a gross per-share value into net and fee portions.
    pub fn split(&self, gross: u128) -> Option<ShareSplit> {
        let fee = self.fee_for(gross)?;
        Some(ShareSplit {
            net: gross - fee,
            fee,
        })
    }
}
