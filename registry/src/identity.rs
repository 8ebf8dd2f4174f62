//! # Identity Registry
//!
//! User onboarding and the coin balance. The lifecycle is:
//!
//! 1. **Request** — a user submits their details; the request is recorded
//!    under the user-request namespace. Re-submission overwrites.
//! 2. **Approve** — the registrar consumes the request and creates the
//!    approved-user record with a zero coin balance.
//! 3. **Recharge** — the user converts a settled bank transaction into
//!    coins via the fixed denomination table.
//!
//! Approval is idempotent-safe: re-approving an already-approved user
//! returns the existing record untouched. A second approval must never
//! zero out a balance someone has already recharged.

use chrono::Utc;
use tracing::{debug, info};

use crate::access::{authorize, Operation, Role};
use crate::config;
use crate::error::{RegistryError, RegistryResult};
use crate::keys;
use crate::records::{ApprovedUser, UserRequest};
use crate::store::{self, StateStore};

/// The user onboarding and balance workflow.
///
/// Generic over the store so the same registry runs against an in-memory
/// backend in tests and sled in deployments. Share one store instance
/// (via `Arc`) with the [`AssetRegistry`](crate::assets::AssetRegistry) —
/// the purchase transaction reads records written here.
#[derive(Debug)]
pub struct IdentityRegistry<S> {
    store: S,
}

impl<S: StateStore> IdentityRegistry<S> {
    /// Creates a registry over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records a new onboarding request.
    ///
    /// Caller role must be `user`. The request is written at
    /// `(user-request, name-nationalID)` with the current timestamp and
    /// returned. There is deliberately no duplicate check — a re-submission
    /// silently overwrites the previous request (last write wins).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for any non-user caller.
    /// Returns [`RegistryError::StoreUnavailable`] if the write fails.
    pub fn request_new_user(
        &self,
        caller: Role,
        name: &str,
        email: &str,
        phone: &str,
        national_id: &str,
    ) -> RegistryResult<UserRequest> {
        let op = Operation::RequestNewUser;
        authorize(caller, op)?;

        let request = UserRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            national_id: national_id.to_string(),
            created_at: Utc::now(),
        };

        let address = keys::user_request(name, national_id);
        store::put_record(&self.store, op.name(), &address, &request)?;

        info!(%address, "user onboarding request recorded");
        Ok(request)
    }

    /// Approves a pending onboarding request.
    ///
    /// Caller role must be `registrar`. Reads the request, copies its
    /// fields into an approved-user record with a zero coin balance, and
    /// persists it under the approved-user namespace. The request itself
    /// is never deleted.
    ///
    /// If the user is already approved, the existing record is returned
    /// unchanged — the balance survives.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for any non-registrar caller.
    /// Returns [`RegistryError::NotFound`] if no request exists.
    pub fn approve_new_user(
        &self,
        caller: Role,
        name: &str,
        national_id: &str,
    ) -> RegistryResult<ApprovedUser> {
        let op = Operation::ApproveNewUser;
        authorize(caller, op)?;

        let request_address = keys::user_request(name, national_id);
        let request: UserRequest =
            store::require_record(&self.store, op.name(), &request_address)?;

        let approved_address = keys::approved_user(name, national_id);
        if let Some(existing) =
            store::get_record::<_, ApprovedUser>(&self.store, op.name(), &approved_address)?
        {
            debug!(%approved_address, "user already approved, returning existing record");
            return Ok(existing);
        }

        let approved = ApprovedUser::from_request(request);
        store::put_record(&self.store, op.name(), &approved_address, &approved)?;

        info!(%approved_address, "user approved");
        Ok(approved)
    }

    /// Credits an approved user's balance from a settled bank transaction.
    ///
    /// Caller role must be `user`. The transaction ID is matched exactly
    /// against the fixed denomination table (`upg100`, `upg500`,
    /// `upg1000`); anything else is rejected with the stored balance
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for any non-user caller.
    /// Returns [`RegistryError::NotFound`] if the user is not approved.
    /// Returns [`RegistryError::InvalidArgument`] for an unrecognized code.
    pub fn recharge_account(
        &self,
        caller: Role,
        name: &str,
        national_id: &str,
        transaction_id: &str,
    ) -> RegistryResult<ApprovedUser> {
        let op = Operation::RechargeAccount;
        authorize(caller, op)?;

        let address = keys::approved_user(name, national_id);
        let mut user: ApprovedUser = store::require_record(&self.store, op.name(), &address)?;

        let amount = config::recharge_amount(transaction_id).ok_or_else(|| {
            RegistryError::InvalidArgument {
                operation: op.name(),
                message: format!("unrecognized bank transaction ID '{transaction_id}'"),
            }
        })?;

        user.coin_balance = user.coin_balance.checked_add(amount).ok_or_else(|| {
            RegistryError::InvalidOperation {
                operation: op.name(),
                reason: "coin balance overflow".to_string(),
            }
        })?;

        store::put_record(&self.store, op.name(), &address, &user)?;

        info!(%address, amount, balance = user.coin_balance, "account recharged");
        Ok(user)
    }

    /// Looks up an approved user. Read-only, no role restriction.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the user is not approved.
    pub fn view_user(&self, name: &str, national_id: &str) -> RegistryResult<ApprovedUser> {
        let op = Operation::ViewUser;
        let address = keys::approved_user(name, national_id);
        store::require_record(&self.store, op.name(), &address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn registry() -> IdentityRegistry<MemoryStore> {
        IdentityRegistry::new(MemoryStore::new())
    }

    fn onboard(reg: &IdentityRegistry<MemoryStore>, name: &str, national_id: &str) {
        reg.request_new_user(Role::User, name, "a@example.com", "555-0100", national_id)
            .unwrap();
        reg.approve_new_user(Role::Registrar, name, national_id)
            .unwrap();
    }

    #[test]
    fn request_then_approve_preserves_fields() {
        let reg = registry();
        let request = reg
            .request_new_user(Role::User, "alice", "alice@example.com", "555-0100", "111")
            .unwrap();

        let approved = reg.approve_new_user(Role::Registrar, "alice", "111").unwrap();

        assert_eq!(approved.name, request.name);
        assert_eq!(approved.email, request.email);
        assert_eq!(approved.phone, request.phone);
        assert_eq!(approved.national_id, request.national_id);
        assert_eq!(approved.created_at, request.created_at);
        assert_eq!(approved.coin_balance, 0);
    }

    #[test]
    fn request_requires_the_user_role() {
        let reg = registry();
        let result =
            reg.request_new_user(Role::Registrar, "alice", "a@example.com", "555-0100", "111");
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
    }

    #[test]
    fn approve_requires_the_registrar_role() {
        let reg = registry();
        reg.request_new_user(Role::User, "alice", "a@example.com", "555-0100", "111")
            .unwrap();

        let result = reg.approve_new_user(Role::User, "alice", "111");
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
    }

    #[test]
    fn approve_without_request_is_not_found() {
        let reg = registry();
        let result = reg.approve_new_user(Role::Registrar, "ghost", "000");
        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
    }

    #[test]
    fn resubmission_overwrites_the_request() {
        let reg = registry();
        reg.request_new_user(Role::User, "alice", "old@example.com", "555-0100", "111")
            .unwrap();
        reg.request_new_user(Role::User, "alice", "new@example.com", "555-0199", "111")
            .unwrap();

        let approved = reg.approve_new_user(Role::Registrar, "alice", "111").unwrap();
        assert_eq!(approved.email, "new@example.com");
        assert_eq!(approved.phone, "555-0199");
    }

    #[test]
    fn reapproval_does_not_reset_the_balance() {
        let reg = registry();
        onboard(&reg, "alice", "111");
        reg.recharge_account(Role::User, "alice", "111", "upg500")
            .unwrap();

        // A second approval must return the funded record, not zero it.
        let again = reg.approve_new_user(Role::Registrar, "alice", "111").unwrap();
        assert_eq!(again.coin_balance, 500);
        assert_eq!(reg.view_user("alice", "111").unwrap().coin_balance, 500);
    }

    #[test]
    fn recharge_applies_the_table_amounts() {
        let reg = registry();
        onboard(&reg, "alice", "111");

        assert_eq!(
            reg.recharge_account(Role::User, "alice", "111", "upg100")
                .unwrap()
                .coin_balance,
            100
        );
        assert_eq!(
            reg.recharge_account(Role::User, "alice", "111", "upg500")
                .unwrap()
                .coin_balance,
            600
        );
        assert_eq!(
            reg.recharge_account(Role::User, "alice", "111", "upg1000")
                .unwrap()
                .coin_balance,
            1600
        );
    }

    #[test]
    fn recharge_changes_nothing_but_the_balance() {
        let reg = registry();
        onboard(&reg, "alice", "111");
        let before = reg.view_user("alice", "111").unwrap();

        let after = reg
            .recharge_account(Role::User, "alice", "111", "upg100")
            .unwrap();

        assert_eq!(after.coin_balance, before.coin_balance + 100);
        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.phone, before.phone);
        assert_eq!(after.national_id, before.national_id);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn unknown_recharge_code_leaves_the_balance_unchanged() {
        let reg = registry();
        onboard(&reg, "alice", "111");
        reg.recharge_account(Role::User, "alice", "111", "upg500")
            .unwrap();

        let result = reg.recharge_account(Role::User, "alice", "111", "upg9999");
        assert!(matches!(result, Err(RegistryError::InvalidArgument { .. })));
        assert_eq!(reg.view_user("alice", "111").unwrap().coin_balance, 500);
    }

    #[test]
    fn recharge_of_unapproved_user_is_not_found() {
        let reg = registry();
        reg.request_new_user(Role::User, "alice", "a@example.com", "555-0100", "111")
            .unwrap();

        // Requested but not yet approved — no balance to credit.
        let result = reg.recharge_account(Role::User, "alice", "111", "upg100");
        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
    }

    #[test]
    fn recharge_requires_the_user_role() {
        let reg = registry();
        onboard(&reg, "alice", "111");

        let result = reg.recharge_account(Role::Registrar, "alice", "111", "upg100");
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
        assert_eq!(reg.view_user("alice", "111").unwrap().coin_balance, 0);
    }

    #[test]
    fn view_user_absent_is_not_found() {
        let reg = registry();
        let result = reg.view_user("nobody", "000");
        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
    }
}
