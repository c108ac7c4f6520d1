//! Capability-based access control
//!
//! Three capabilities gate every mutating operation: the global owner
//! (fee configuration, executor rotation, fee collection), the global
//! executor (reward distribution), and the per-campaign creator
//! (funding, withdrawal, pause lifecycle, rate updates). Each operation
//! declares its required capability and runs one `require` pre-check
//! before touching any state.

use serde::{Deserialize, Serialize};
use types::ids::AccountId;

use crate::errors::AuthorizationError;

/// Capability an operation requires of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Global platform owner
    Owner,
    /// Delegated distribution authority
    Executor,
    /// Creator of the campaign an operation targets
    Creator,
}

/// Holds the two global identities and answers capability checks.
///
/// The owner is fixed at construction; the executor can be rotated by the
/// owner. Creator checks take the target campaign's creator as context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessControl {
    owner: AccountId,
    executor: AccountId,
}

impl AccessControl {
    /// Create access control with the initial owner and executor.
    pub fn new(owner: AccountId, executor: AccountId) -> Self {
        Self { owner, executor }
    }

    /// The platform owner.
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// The current executor.
    pub fn executor(&self) -> AccountId {
        self.executor
    }

    /// Rotate the executor. The engine enforces that only the owner calls
    /// this.
    pub(crate) fn set_executor(&mut self, executor: AccountId) {
        self.executor = executor;
    }

    /// Check that `caller` holds `capability`. `creator` supplies the
    /// campaign context for `Capability::Creator` checks.
    pub fn require(
        &self,
        caller: AccountId,
        capability: Capability,
        creator: Option<AccountId>,
    ) -> Result<(), AuthorizationError> {
        match capability {
            Capability::Owner if caller == self.owner => Ok(()),
            Capability::Owner => Err(AuthorizationError::NotOwner),
            Capability::Executor if caller == self.executor => Ok(()),
            Capability::Executor => Err(AuthorizationError::NotExecutor),
            Capability::Creator if creator == Some(caller) => Ok(()),
            Capability::Creator => Err(AuthorizationError::NotCreator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (AccessControl, AccountId, AccountId) {
        let owner = AccountId::new();
        let executor = AccountId::new();
        (AccessControl::new(owner, executor), owner, executor)
    }

    #[test]
    fn test_owner_capability() {
        let (ac, owner, executor) = setup();
        assert!(ac.require(owner, Capability::Owner, None).is_ok());
        assert_eq!(
            ac.require(executor, Capability::Owner, None),
            Err(AuthorizationError::NotOwner)
        );
    }

    #[test]
    fn test_executor_capability() {
        let (ac, owner, executor) = setup();
        assert!(ac.require(executor, Capability::Executor, None).is_ok());
        assert_eq!(
            ac.require(owner, Capability::Executor, None),
            Err(AuthorizationError::NotExecutor)
        );
    }

    #[test]
    fn test_creator_capability_uses_context() {
        let (ac, owner, _) = setup();
        let creator = AccountId::new();
        assert!(ac
            .require(creator, Capability::Creator, Some(creator))
            .is_ok());
        assert_eq!(
            ac.require(owner, Capability::Creator, Some(creator)),
            Err(AuthorizationError::NotCreator)
        );
    }

    #[test]
    fn test_creator_capability_without_context_fails() {
        let (ac, owner, _) = setup();
        assert_eq!(
            ac.require(owner, Capability::Creator, None),
            Err(AuthorizationError::NotCreator)
        );
    }

    #[test]
    fn test_set_executor_rotates() {
        let (mut ac, _, old_executor) = setup();
        let new_executor = AccountId::new();
        ac.set_executor(new_executor);
        assert_eq!(ac.executor(), new_executor);
        assert_eq!(
            ac.require(old_executor, Capability::Executor, None),
            Err(AuthorizationError::NotExecutor)
        );
    }
}
