//! # Asset Registry
//!
//! Property registration and the marketplace. The lifecycle is:
//!
//! 1. **Request** — a user registers a property they claim to own. The
//!    request records the claimed owner as a back-reference (the caller's
//!    derived approved-user address).
//! 2. **Approve** — the registrar copies the request into the tradeable
//!    approved-property record.
//! 3. **List / delist** — the owner (and only the owner) flips the status
//!    between `registered` and `onSale`.
//! 4. **Purchase** — any approved user with enough coins buys a listed
//!    property: coins move from buyer to seller, ownership moves to the
//!    buyer, and the listing closes.
//!
//! ## Purchase Atomicity
//!
//! A purchase touches three records (seller, buyer, property). The store
//! only guarantees per-call atomicity, so the registry stages the full
//! write set up front and restores already-written records if a later
//! write fails. After a failed purchase the store holds the same records
//! it held before.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::access::{authorize, Operation, Role};
use crate::error::{RegistryError, RegistryResult};
use crate::keys::{self, Address};
use crate::records::{ApprovedProperty, ApprovedUser, PropertyRequest, PropertyStatus};
use crate::store::{self, StateStore};

// ---------------------------------------------------------------------------
// PurchaseReceipt
// ---------------------------------------------------------------------------

/// Receipt returned by a completed purchase, with everything the boundary
/// layer needs to report the trade without re-reading the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Unique identifier for this purchase.
    pub receipt_id: String,
    /// The property that changed hands.
    pub property_id: String,
    /// The price paid, in coins.
    pub price: u64,
    /// Address of the seller's approved-user record.
    pub seller: Address,
    /// Address of the buyer's approved-user record (the new owner).
    pub buyer: Address,
    /// Seller's coin balance after the trade.
    pub seller_balance: u64,
    /// Buyer's coin balance after the trade.
    pub buyer_balance: u64,
    /// When the trade was executed (UTC).
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// AssetRegistry
// ---------------------------------------------------------------------------

/// The property registration and marketplace workflow.
///
/// Shares its store with the [`IdentityRegistry`](crate::identity::IdentityRegistry):
/// the purchase transaction debits and credits the approved-user records
/// the identity side maintains.
#[derive(Debug)]
pub struct AssetRegistry<S> {
    store: S,
}

impl<S: StateStore> AssetRegistry<S> {
    /// Creates a registry over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records a property registration request.
    ///
    /// Caller role must be `user`. The caller's approved-user address is
    /// derived and recorded as the owner back-reference — deliberately
    /// without an existence check at this stage; the reference is resolved
    /// when trading begins.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for any non-user caller.
    /// Returns [`RegistryError::InvalidArgument`] if `price` is zero.
    pub fn property_registration_request(
        &self,
        caller: Role,
        name: &str,
        national_id: &str,
        property_id: &str,
        price: u64,
        status: PropertyStatus,
    ) -> RegistryResult<PropertyRequest> {
        let op = Operation::PropertyRegistrationRequest;
        authorize(caller, op)?;

        if price == 0 {
            return Err(RegistryError::InvalidArgument {
                operation: op.name(),
                message: "price must be greater than zero".to_string(),
            });
        }

        let request = PropertyRequest {
            property_id: property_id.to_string(),
            owner: keys::approved_user(name, national_id),
            price,
            status,
        };

        let address = keys::property_request(property_id);
        store::put_record(&self.store, op.name(), &address, &request)?;

        info!(%address, price, "property registration request recorded");
        Ok(request)
    }

    /// Approves a pending property registration.
    ///
    /// Caller role must be `registrar`. Copies the request verbatim into
    /// the approved-property namespace. Idempotent-safe: if the property
    /// is already approved, the existing record is returned unchanged — a
    /// re-approval must not resurrect a sold property's previous owner.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for any non-registrar caller.
    /// Returns [`RegistryError::NotFound`] if no request exists.
    pub fn approve_property_registration(
        &self,
        caller: Role,
        property_id: &str,
    ) -> RegistryResult<ApprovedProperty> {
        let op = Operation::ApprovePropertyRegistration;
        authorize(caller, op)?;

        let request_address = keys::property_request(property_id);
        let request: PropertyRequest =
            store::require_record(&self.store, op.name(), &request_address)?;

        let approved_address = keys::approved_property(property_id);
        if let Some(existing) =
            store::get_record::<_, ApprovedProperty>(&self.store, op.name(), &approved_address)?
        {
            debug!(%approved_address, "property already approved, returning existing record");
            return Ok(existing);
        }

        let approved = ApprovedProperty::from_request(request);
        store::put_record(&self.store, op.name(), &approved_address, &approved)?;

        info!(%approved_address, "property registration approved");
        Ok(approved)
    }

    /// Looks up an approved property. Read-only, no role restriction.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the property is not approved.
    pub fn view_property(&self, property_id: &str) -> RegistryResult<ApprovedProperty> {
        let op = Operation::ViewProperty;
        let address = keys::approved_property(property_id);
        store::require_record(&self.store, op.name(), &address)
    }

    /// Changes a property's listing status. Owner only.
    ///
    /// Caller role must be `user`, and the caller's derived approved-user
    /// address must exactly equal the property's stored owner — anything
    /// else is Unauthorized with the record untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for a non-user caller or a
    /// caller who is not the owner.
    /// Returns [`RegistryError::NotFound`] if the property is not approved.
    pub fn update_property(
        &self,
        caller: Role,
        name: &str,
        national_id: &str,
        property_id: &str,
        new_status: PropertyStatus,
    ) -> RegistryResult<ApprovedProperty> {
        let op = Operation::UpdateProperty;
        authorize(caller, op)?;

        let address = keys::approved_property(property_id);
        let mut property: ApprovedProperty =
            store::require_record(&self.store, op.name(), &address)?;

        let caller_address = keys::approved_user(name, national_id);
        if property.owner != caller_address {
            return Err(RegistryError::Unauthorized {
                operation: op.name(),
                reason: format!("caller {caller_address} is not the owner of {address}"),
            });
        }

        property.status = new_status;
        store::put_record(&self.store, op.name(), &address, &property)?;

        info!(%address, status = %new_status, "property status updated");
        Ok(property)
    }

    /// Buys a listed property.
    ///
    /// Caller role must be `user` (the buyer). The property must be on
    /// sale and affordable; the seller is resolved through the property's
    /// owner back-reference. On success the price moves from buyer to
    /// seller, the buyer becomes the owner, and the status transitions to
    /// `registered` — a sold property is no longer listed.
    ///
    /// The three writes (seller, buyer, property) are staged and applied
    /// in that order with compensating rollback; a failed purchase leaves
    /// all three records exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unauthorized`] for any non-user caller.
    /// Returns [`RegistryError::NotFound`] if the property, buyer, or
    /// seller record is absent.
    /// Returns [`RegistryError::InvalidOperation`] if the property is not
    /// on sale, the buyer cannot afford it, or the buyer already owns it.
    pub fn purchase_property(
        &self,
        caller: Role,
        name: &str,
        national_id: &str,
        property_id: &str,
    ) -> RegistryResult<PurchaseReceipt> {
        let op = Operation::PurchaseProperty;
        authorize(caller, op)?;

        let property_address = keys::approved_property(property_id);
        let property_before: ApprovedProperty =
            store::require_record(&self.store, op.name(), &property_address)?;

        let buyer_address = keys::approved_user(name, national_id);
        let buyer_before: ApprovedUser =
            store::require_record(&self.store, op.name(), &buyer_address)?;

        if property_before.status != PropertyStatus::OnSale {
            return Err(RegistryError::InvalidOperation {
                operation: op.name(),
                reason: format!("sale not possible: {property_address} is not on sale"),
            });
        }
        if property_before.price > buyer_before.coin_balance {
            return Err(RegistryError::InvalidOperation {
                operation: op.name(),
                reason: format!(
                    "sale not possible: price {} exceeds buyer balance {}",
                    property_before.price, buyer_before.coin_balance
                ),
            });
        }

        let seller_address = property_before.owner.clone();
        if seller_address == buyer_address {
            // Aliased seller/buyer records would corrupt the books under
            // copy-modify-write.
            return Err(RegistryError::InvalidOperation {
                operation: op.name(),
                reason: format!("sale not possible: buyer already owns {property_address}"),
            });
        }
        let seller_before: ApprovedUser =
            store::require_record(&self.store, op.name(), &seller_address)?;

        let price = property_before.price;

        let mut seller = seller_before.clone();
        seller.coin_balance = seller.coin_balance.checked_add(price).ok_or_else(|| {
            RegistryError::InvalidOperation {
                operation: op.name(),
                reason: "sale not possible: seller balance overflow".to_string(),
            }
        })?;

        let mut buyer = buyer_before.clone();
        // Guarded by the affordability precondition above.
        buyer.coin_balance -= price;

        let mut property = property_before.clone();
        property.owner = buyer_address.clone();
        property.status = PropertyStatus::Registered;

        // Stage the full write set (and the rollback images) before the
        // first byte hits the store.
        let plan = [
            (
                &seller_address,
                store::encode_record(op.name(), &seller_address, &seller)?,
                store::encode_record(op.name(), &seller_address, &seller_before)?,
            ),
            (
                &buyer_address,
                store::encode_record(op.name(), &buyer_address, &buyer)?,
                store::encode_record(op.name(), &buyer_address, &buyer_before)?,
            ),
            (
                &property_address,
                store::encode_record(op.name(), &property_address, &property)?,
                store::encode_record(op.name(), &property_address, &property_before)?,
            ),
        ];

        let mut written: Vec<(&Address, &[u8])> = Vec::with_capacity(plan.len());
        for (address, new_bytes, old_bytes) in &plan {
            if let Err(source) = self.store.put(address, new_bytes) {
                self.roll_back(op, &written);
                return Err(RegistryError::StoreUnavailable {
                    operation: op.name(),
                    source,
                });
            }
            written.push((*address, old_bytes.as_slice()));
        }

        let receipt = PurchaseReceipt {
            receipt_id: Uuid::new_v4().to_string(),
            property_id: property.property_id.clone(),
            price,
            seller: seller_address.clone(),
            buyer: buyer_address.clone(),
            seller_balance: seller.coin_balance,
            buyer_balance: buyer.coin_balance,
            timestamp: Utc::now(),
        };

        info!(
            property = %property_address,
            price,
            seller = %receipt.seller,
            buyer = %receipt.buyer,
            "property purchased"
        );
        Ok(receipt)
    }

    /// Restores the pre-purchase images of records already written.
    ///
    /// A rollback failure leaves the store inconsistent; that is logged at
    /// error level with every address involved, since the operator has to
    /// repair it from the log.
    fn roll_back(&self, op: Operation, written: &[(&Address, &[u8])]) {
        for (address, old_bytes) in written.iter().rev() {
            if let Err(source) = self.store.put(address, old_bytes) {
                error!(
                    operation = op.name(),
                    %address,
                    %source,
                    "rollback write failed, store is inconsistent at this address"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityRegistry;
    use crate::store::{MemoryStore, StoreError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn setup() -> (
        Arc<MemoryStore>,
        IdentityRegistry<Arc<MemoryStore>>,
        AssetRegistry<Arc<MemoryStore>>,
    ) {
        let store = Arc::new(MemoryStore::new());
        let identity = IdentityRegistry::new(Arc::clone(&store));
        let assets = AssetRegistry::new(Arc::clone(&store));
        (store, identity, assets)
    }

    /// Onboards and funds a user in one call.
    fn fund_user(
        identity: &IdentityRegistry<Arc<MemoryStore>>,
        name: &str,
        national_id: &str,
        codes: &[&str],
    ) {
        identity
            .request_new_user(Role::User, name, "u@example.com", "555-0100", national_id)
            .unwrap();
        identity
            .approve_new_user(Role::Registrar, name, national_id)
            .unwrap();
        for code in codes {
            identity
                .recharge_account(Role::User, name, national_id, code)
                .unwrap();
        }
    }

    /// Registers and approves a property owned by `name`.
    fn list_property(
        assets: &AssetRegistry<Arc<MemoryStore>>,
        name: &str,
        national_id: &str,
        property_id: &str,
        price: u64,
        status: PropertyStatus,
    ) {
        assets
            .property_registration_request(Role::User, name, national_id, property_id, price, status)
            .unwrap();
        assets
            .approve_property_registration(Role::Registrar, property_id)
            .unwrap();
    }

    #[test]
    fn registration_request_records_the_owner_back_reference() {
        let (_, _, assets) = setup();
        let request = assets
            .property_registration_request(
                Role::User,
                "alice",
                "111",
                "P1",
                300,
                PropertyStatus::Registered,
            )
            .unwrap();

        assert_eq!(request.owner, keys::approved_user("alice", "111"));
        assert_eq!(request.price, 300);
    }

    #[test]
    fn registration_request_rejects_zero_price() {
        let (_, _, assets) = setup();
        let result = assets.property_registration_request(
            Role::User,
            "alice",
            "111",
            "P1",
            0,
            PropertyStatus::Registered,
        );
        assert!(matches!(result, Err(RegistryError::InvalidArgument { .. })));
    }

    #[test]
    fn registration_request_requires_the_user_role() {
        let (_, _, assets) = setup();
        let result = assets.property_registration_request(
            Role::Registrar,
            "alice",
            "111",
            "P1",
            300,
            PropertyStatus::Registered,
        );
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
    }

    #[test]
    fn approval_copies_the_request_verbatim() {
        let (_, _, assets) = setup();
        let request = assets
            .property_registration_request(
                Role::User,
                "alice",
                "111",
                "P1",
                300,
                PropertyStatus::OnSale,
            )
            .unwrap();

        let approved = assets
            .approve_property_registration(Role::Registrar, "P1")
            .unwrap();

        assert_eq!(approved.property_id, request.property_id);
        assert_eq!(approved.owner, request.owner);
        assert_eq!(approved.price, request.price);
        assert_eq!(approved.status, request.status);
        assert_eq!(assets.view_property("P1").unwrap(), approved);
    }

    #[test]
    fn approval_requires_the_registrar_role() {
        let (_, _, assets) = setup();
        assets
            .property_registration_request(
                Role::User,
                "alice",
                "111",
                "P1",
                300,
                PropertyStatus::OnSale,
            )
            .unwrap();

        let result = assets.approve_property_registration(Role::User, "P1");
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
    }

    #[test]
    fn approval_without_request_is_not_found() {
        let (_, _, assets) = setup();
        let result = assets.approve_property_registration(Role::Registrar, "P404");
        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
    }

    #[test]
    fn reapproval_does_not_resurrect_a_previous_owner() {
        let (_, identity, assets) = setup();
        fund_user(&identity, "alice", "111", &[]);
        fund_user(&identity, "bob", "222", &["upg500"]);
        list_property(&assets, "alice", "111", "P1", 300, PropertyStatus::OnSale);

        assets
            .purchase_property(Role::User, "bob", "222", "P1")
            .unwrap();

        // The stale request is still stored; re-approving must not hand
        // the property back to alice.
        let again = assets
            .approve_property_registration(Role::Registrar, "P1")
            .unwrap();
        assert_eq!(again.owner, keys::approved_user("bob", "222"));
    }

    #[test]
    fn owner_can_flip_the_listing_status() {
        let (_, identity, assets) = setup();
        fund_user(&identity, "alice", "111", &[]);
        list_property(&assets, "alice", "111", "P1", 300, PropertyStatus::Registered);

        let updated = assets
            .update_property(Role::User, "alice", "111", "P1", PropertyStatus::OnSale)
            .unwrap();
        assert_eq!(updated.status, PropertyStatus::OnSale);

        let updated = assets
            .update_property(Role::User, "alice", "111", "P1", PropertyStatus::Registered)
            .unwrap();
        assert_eq!(updated.status, PropertyStatus::Registered);
    }

    #[test]
    fn non_owner_update_is_unauthorized_and_changes_nothing() {
        let (_, identity, assets) = setup();
        fund_user(&identity, "alice", "111", &[]);
        fund_user(&identity, "mallory", "666", &[]);
        list_property(&assets, "alice", "111", "P1", 300, PropertyStatus::Registered);

        let result =
            assets.update_property(Role::User, "mallory", "666", "P1", PropertyStatus::OnSale);
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
        assert_eq!(
            assets.view_property("P1").unwrap().status,
            PropertyStatus::Registered
        );
    }

    #[test]
    fn purchase_moves_coins_and_ownership_together() {
        let (_, identity, assets) = setup();
        fund_user(&identity, "alice", "111", &["upg500"]);
        fund_user(&identity, "bob", "222", &["upg1000"]);
        list_property(&assets, "alice", "111", "P1", 300, PropertyStatus::OnSale);

        let receipt = assets
            .purchase_property(Role::User, "bob", "222", "P1")
            .unwrap();

        assert_eq!(receipt.price, 300);
        assert_eq!(receipt.seller_balance, 800);
        assert_eq!(receipt.buyer_balance, 700);

        let seller = identity.view_user("alice", "111").unwrap();
        let buyer = identity.view_user("bob", "222").unwrap();
        assert_eq!(seller.coin_balance, 800);
        assert_eq!(buyer.coin_balance, 700);

        let property = assets.view_property("P1").unwrap();
        assert_eq!(property.owner, keys::approved_user("bob", "222"));
        assert_eq!(property.status, PropertyStatus::Registered);
    }

    #[test]
    fn purchase_conserves_total_coins() {
        let (_, identity, assets) = setup();
        fund_user(&identity, "alice", "111", &["upg100", "upg500"]);
        fund_user(&identity, "bob", "222", &["upg1000"]);
        list_property(&assets, "alice", "111", "P1", 450, PropertyStatus::OnSale);

        let before = identity.view_user("alice", "111").unwrap().coin_balance
            + identity.view_user("bob", "222").unwrap().coin_balance;

        assets
            .purchase_property(Role::User, "bob", "222", "P1")
            .unwrap();

        let after = identity.view_user("alice", "111").unwrap().coin_balance
            + identity.view_user("bob", "222").unwrap().coin_balance;
        assert_eq!(before, after);
    }

    #[test]
    fn purchase_of_unlisted_property_fails_with_zero_writes() {
        let (_, identity, assets) = setup();
        fund_user(&identity, "alice", "111", &[]);
        fund_user(&identity, "bob", "222", &["upg1000"]);
        list_property(&assets, "alice", "111", "P1", 300, PropertyStatus::Registered);

        let result = assets.purchase_property(Role::User, "bob", "222", "P1");
        assert!(matches!(result, Err(RegistryError::InvalidOperation { .. })));

        assert_eq!(identity.view_user("alice", "111").unwrap().coin_balance, 0);
        assert_eq!(identity.view_user("bob", "222").unwrap().coin_balance, 1000);
        let property = assets.view_property("P1").unwrap();
        assert_eq!(property.owner, keys::approved_user("alice", "111"));
        assert_eq!(property.status, PropertyStatus::Registered);
    }

    #[test]
    fn purchase_beyond_the_buyer_balance_fails_with_zero_writes() {
        let (_, identity, assets) = setup();
        fund_user(&identity, "alice", "111", &[]);
        fund_user(&identity, "bob", "222", &["upg100"]);
        list_property(&assets, "alice", "111", "P1", 300, PropertyStatus::OnSale);

        let result = assets.purchase_property(Role::User, "bob", "222", "P1");
        assert!(matches!(result, Err(RegistryError::InvalidOperation { .. })));
        assert_eq!(identity.view_user("bob", "222").unwrap().coin_balance, 100);
        assert_eq!(
            assets.view_property("P1").unwrap().status,
            PropertyStatus::OnSale
        );
    }

    #[test]
    fn self_purchase_is_rejected() {
        let (_, identity, assets) = setup();
        fund_user(&identity, "alice", "111", &["upg1000"]);
        list_property(&assets, "alice", "111", "P1", 300, PropertyStatus::OnSale);

        let result = assets.purchase_property(Role::User, "alice", "111", "P1");
        assert!(matches!(result, Err(RegistryError::InvalidOperation { .. })));
        assert_eq!(identity.view_user("alice", "111").unwrap().coin_balance, 1000);
    }

    #[test]
    fn purchase_with_a_dangling_owner_reference_is_not_found() {
        let (_, identity, assets) = setup();
        // alice registers a property but is never approved as a user.
        identity
            .request_new_user(Role::User, "alice", "a@example.com", "555-0100", "111")
            .unwrap();
        fund_user(&identity, "bob", "222", &["upg1000"]);
        list_property(&assets, "alice", "111", "P1", 300, PropertyStatus::OnSale);

        let result = assets.purchase_property(Role::User, "bob", "222", "P1");
        assert!(matches!(result, Err(RegistryError::NotFound { .. })));
        // The buyer's coins are untouched.
        assert_eq!(identity.view_user("bob", "222").unwrap().coin_balance, 1000);
    }

    #[test]
    fn purchase_requires_the_user_role() {
        let (_, identity, assets) = setup();
        fund_user(&identity, "alice", "111", &[]);
        fund_user(&identity, "bob", "222", &["upg1000"]);
        list_property(&assets, "alice", "111", "P1", 300, PropertyStatus::OnSale);

        let result = assets.purchase_property(Role::Registrar, "bob", "222", "P1");
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
    }

    // -- Rollback ----------------------------------------------------------

    /// Store wrapper that fails exactly one `put` — the one scheduled by
    /// [`fail_after`](Self::fail_after) — and works normally otherwise.
    /// Reads always succeed, so rollback writes can restore state.
    struct FailingStore {
        inner: MemoryStore,
        /// Successful puts remaining before the single injected failure.
        /// `usize::MAX` means no failure is scheduled.
        fail_countdown: AtomicUsize,
    }

    impl FailingStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                fail_countdown: AtomicUsize::new(usize::MAX),
            }
        }

        /// Schedules the (`n` + 1)-th upcoming `put` to fail once.
        fn fail_after(&self, n: usize) {
            self.fail_countdown.store(n, Ordering::SeqCst);
        }
    }

    impl StateStore for FailingStore {
        fn get(&self, address: &Address) -> Result<Option<Vec<u8>>, StoreError> {
            self.inner.get(address)
        }

        fn put(&self, address: &Address, value: &[u8]) -> Result<(), StoreError> {
            let previous = self
                .fail_countdown
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                    Some(if v == 0 { usize::MAX } else { v.saturating_sub(1) })
                })
                .expect("fetch_update closure never returns None");
            if previous == 0 {
                return Err(StoreError::Backend("injected write failure".into()));
            }
            self.inner.put(address, value)
        }
    }

    #[test]
    fn failed_purchase_write_rolls_back_earlier_writes() {
        let store = Arc::new(FailingStore::new());
        let identity = IdentityRegistry::new(Arc::clone(&store));
        let assets = AssetRegistry::new(Arc::clone(&store));

        identity
            .request_new_user(Role::User, "alice", "a@example.com", "555-0100", "111")
            .unwrap();
        identity
            .approve_new_user(Role::Registrar, "alice", "111")
            .unwrap();
        identity
            .recharge_account(Role::User, "alice", "111", "upg500")
            .unwrap();
        identity
            .request_new_user(Role::User, "bob", "b@example.com", "555-0101", "222")
            .unwrap();
        identity
            .approve_new_user(Role::Registrar, "bob", "222")
            .unwrap();
        identity
            .recharge_account(Role::User, "bob", "222", "upg1000")
            .unwrap();
        assets
            .property_registration_request(
                Role::User,
                "alice",
                "111",
                "P1",
                300,
                PropertyStatus::OnSale,
            )
            .unwrap();
        assets
            .approve_property_registration(Role::Registrar, "P1")
            .unwrap();

        // The seller write lands, the buyer write fails once, and the
        // rollback must restore the seller's pre-purchase balance.
        store.fail_after(1);
        let result = assets.purchase_property(Role::User, "bob", "222", "P1");

        assert!(matches!(
            result,
            Err(RegistryError::StoreUnavailable { .. })
        ));
        assert_eq!(identity.view_user("alice", "111").unwrap().coin_balance, 500);
        assert_eq!(identity.view_user("bob", "222").unwrap().coin_balance, 1000);
        let property = assets.view_property("P1").unwrap();
        assert_eq!(property.owner, keys::approved_user("alice", "111"));
        assert_eq!(property.status, PropertyStatus::OnSale);
    }
}
