//! Asset custody — token ledgers, native balances, escrow moves
//!
//! The bank is the asset-transfer collaborator of the engine. It holds a
//! registry of fungible-token ledgers with balance/allowance semantics and
//! a native-currency balance map, and exposes exactly two moves to the
//! engine: `escrow_in` (pull value into custody) and `escrow_out` (push
//! value out of custody), dispatching on the asset tag.
//!
//! All balance updates use checked arithmetic; a failed move leaves every
//! balance untouched.

use std::collections::HashMap;
use types::asset::Asset;
use types::ids::{AccountId, TokenId};

use crate::errors::TransferError;

/// A fungible-token ledger with balance and allowance semantics.
///
/// Mirrors the standard token contract surface: holders `approve` a
/// spender, the spender moves value with `transfer_from` up to the
/// approved amount.
#[derive(Debug, Clone, Default)]
pub struct TokenLedger {
    balances: HashMap<AccountId, u128>,
    allowances: HashMap<(AccountId, AccountId), u128>,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance held by an account.
    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Remaining amount `spender` may move out of `owner`'s balance.
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    /// Create new supply for `to`.
    pub fn mint(&mut self, to: AccountId, amount: u128) -> Result<(), TransferError> {
        let balance = self.balances.entry(to).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(TransferError::Overflow)?;
        Ok(())
    }

    /// Set the amount `spender` may move out of `owner`'s balance.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: u128) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Move value directly between accounts.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<(), TransferError> {
        move_value(&mut self.balances, from, to, amount)
    }

    /// Move value on behalf of `from`, consuming `spender`'s allowance.
    pub fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<(), TransferError> {
        let allowed = self.allowance(&from, &spender);
        if allowed < amount {
            return Err(TransferError::InsufficientAllowance {
                required: amount,
                available: allowed,
            });
        }
        move_value(&mut self.balances, from, to, amount)?;
        self.allowances.insert((from, spender), allowed - amount);
        Ok(())
    }
}

/// Debit `from`, credit `to`, with all checks before any write.
fn move_value(
    balances: &mut HashMap<AccountId, u128>,
    from: AccountId,
    to: AccountId,
    amount: u128,
) -> Result<(), TransferError> {
    let from_balance = balances.get(&from).copied().unwrap_or(0);
    if from_balance < amount {
        return Err(TransferError::InsufficientBalance {
            required: amount,
            available: from_balance,
        });
    }
    if from == to {
        return Ok(());
    }
    let to_balance = balances.get(&to).copied().unwrap_or(0);
    let new_to = to_balance.checked_add(amount).ok_or(TransferError::Overflow)?;
    balances.insert(from, from_balance - amount);
    balances.insert(to, new_to);
    Ok(())
}

/// Custody for every asset the platform knows about.
#[derive(Debug, Clone, Default)]
pub struct Bank {
    tokens: HashMap<TokenId, TokenLedger>,
    native: HashMap<AccountId, u128>,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    // ───────────────────────── Token Registry ─────────────────────────

    /// Register a fresh token ledger and return its id.
    pub fn register_token(&mut self) -> TokenId {
        let id = TokenId::new();
        self.tokens.insert(id, TokenLedger::new());
        id
    }

    pub fn token(&self, id: &TokenId) -> Option<&TokenLedger> {
        self.tokens.get(id)
    }

    pub fn token_mut(&mut self, id: &TokenId) -> Option<&mut TokenLedger> {
        self.tokens.get_mut(id)
    }

    // ───────────────────────── Native Balances ─────────────────────────

    /// Credit native currency to an account.
    pub fn credit_native(
        &mut self,
        account: AccountId,
        amount: u128,
    ) -> Result<(), TransferError> {
        let balance = self.native.entry(account).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(TransferError::Overflow)?;
        Ok(())
    }

    /// Native balance held by an account.
    pub fn native_balance_of(&self, account: &AccountId) -> u128 {
        self.native.get(account).copied().unwrap_or(0)
    }

    /// Balance of `account` in `asset`. Unknown tokens read as zero.
    pub fn balance_of(&self, asset: &Asset, account: &AccountId) -> u128 {
        match asset {
            Asset::Native => self.native_balance_of(account),
            Asset::Token(id) => self
                .tokens
                .get(id)
                .map(|ledger| ledger.balance_of(account))
                .unwrap_or(0),
        }
    }

    // ───────────────────────── Escrow Moves ─────────────────────────

    /// Pull `amount` of `asset` from `from` into custody under `escrow`.
    ///
    /// Token assets are moved via `transfer_from` with the escrow identity
    /// as spender, so the holder must have approved the escrow first.
    pub fn escrow_in(
        &mut self,
        asset: &Asset,
        from: AccountId,
        escrow: AccountId,
        amount: u128,
    ) -> Result<(), TransferError> {
        match asset {
            Asset::Native => move_value(&mut self.native, from, escrow, amount),
            Asset::Token(id) => {
                let ledger = self
                    .tokens
                    .get_mut(id)
                    .ok_or(TransferError::UnknownToken { token: *id })?;
                ledger.transfer_from(escrow, from, escrow, amount)
            }
        }
    }

    /// Push `amount` of `asset` from custody under `escrow` to `to`.
    pub fn escrow_out(
        &mut self,
        asset: &Asset,
        escrow: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<(), TransferError> {
        match asset {
            Asset::Native => move_value(&mut self.native, escrow, to, amount),
            Asset::Token(id) => {
                let ledger = self
                    .tokens
                    .get_mut(id)
                    .ok_or(TransferError::UnknownToken { token: *id })?;
                ledger.transfer(escrow, to, amount)
            }
        }
    }
}
