//! # Access Gateway
//!
//! The owner principal and the authorized-caller list. Privileged external
//! entry points — today only the oracle's status report — are accepted
//! solely from principals on the list; the list itself is owner-managed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use aerosure_core::{EngineError, Principal};

/// Owner principal plus the set of authorized external callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessGateway {
    owner: Principal,
    authorized: BTreeSet<Principal>,
}

impl AccessGateway {
    /// Create a gateway with the given owner and an empty caller list.
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            authorized: BTreeSet::new(),
        }
    }

    /// The owner principal.
    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    /// Whether `principal` is on the authorized-caller list.
    pub fn is_authorized(&self, principal: &Principal) -> bool {
        self.authorized.contains(principal)
    }

    /// Add a principal to the authorized-caller list. Owner only.
    /// Re-adding an already-listed principal is a no-op.
    pub fn authorize(&mut self, caller: &Principal, who: Principal) -> Result<(), EngineError> {
        self.require_owner(caller, "authorize callers")?;
        self.authorized.insert(who);
        tracing::info!(principal = %who, "caller authorized");
        Ok(())
    }

    /// Remove a principal from the authorized-caller list. Owner only.
    /// Removing an unlisted principal is a no-op.
    pub fn deauthorize(&mut self, caller: &Principal, who: &Principal) -> Result<(), EngineError> {
        self.require_owner(caller, "deauthorize callers")?;
        self.authorized.remove(who);
        tracing::info!(principal = %who, "caller deauthorized");
        Ok(())
    }

    /// Guard for owner-only operations.
    pub fn require_owner(
        &self,
        caller: &Principal,
        operation: &'static str,
    ) -> Result<(), EngineError> {
        if caller == &self.owner {
            Ok(())
        } else {
            Err(EngineError::Unauthorized {
                caller: caller.to_string(),
                operation,
            })
        }
    }

    /// Guard for authorized-caller-only operations.
    pub fn require_authorized(
        &self,
        caller: &Principal,
        operation: &'static str,
    ) -> Result<(), EngineError> {
        if self.is_authorized(caller) {
            Ok(())
        } else {
            Err(EngineError::Unauthorized {
                caller: caller.to_string(),
                operation,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(byte: u8) -> Principal {
        Principal::from_bytes([byte; 20])
    }

    #[test]
    fn test_owner_manages_list() {
        let owner = principal(1);
        let oracle = principal(2);
        let mut gw = AccessGateway::new(owner);

        assert!(!gw.is_authorized(&oracle));
        gw.authorize(&owner, oracle).unwrap();
        assert!(gw.is_authorized(&oracle));
        gw.require_authorized(&oracle, "report").unwrap();

        gw.deauthorize(&owner, &oracle).unwrap();
        assert!(!gw.is_authorized(&oracle));
    }

    #[test]
    fn test_non_owner_cannot_manage_list() {
        let mut gw = AccessGateway::new(principal(1));
        let result = gw.authorize(&principal(2), principal(3));
        assert!(matches!(result, Err(EngineError::Unauthorized { .. })));
        let result = gw.deauthorize(&principal(2), &principal(3));
        assert!(matches!(result, Err(EngineError::Unauthorized { .. })));
    }

    #[test]
    fn test_owner_is_not_implicitly_authorized() {
        let gw = AccessGateway::new(principal(1));
        assert!(gw.require_authorized(&principal(1), "report").is_err());
    }

    #[test]
    fn test_reauthorize_is_noop() {
        let owner = principal(1);
        let mut gw = AccessGateway::new(owner);
        gw.authorize(&owner, principal(2)).unwrap();
        gw.authorize(&owner, principal(2)).unwrap();
        assert!(gw.is_authorized(&principal(2)));
    }
}
