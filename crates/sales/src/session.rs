use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fruitshop_core::{
    Aggregate, AggregateRoot, DomainError, InvoiceId, Money, SessionId, ValidationError,
};
use fruitshop_events::Event;
use fruitshop_inventory::{Catalog, InventoryStore};

use crate::cart::Cart;
use crate::pricing::{STANDARD_DISCOUNT, Totals};
use crate::quantity::parse_quantity;

/// Session status lifecycle.
///
/// `Idle → Building → Finalized → Idle`; `Building → Idle` on clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Building,
    Finalized,
}

/// What to do when an add names an item the store does not carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownItemPolicy {
    /// Fail with `ValidationError::UnknownItem`.
    #[default]
    Reject,
    /// Accept the add as a no-op: nothing is decremented or recorded.
    Ignore,
}

impl FromStr for UnknownItemPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "ignore" => Ok(Self::Ignore),
            other => Err(DomainError::invalid_value(format!(
                "unknown item policy must be \"reject\" or \"ignore\" (got {other:?})"
            ))),
        }
    }
}

/// Aggregate root: one operator's checkout session.
///
/// Owns the inventory and the cart so that, per item,
/// `catalog stock == store stock + cart quantity` holds until `clear`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    inventory: InventoryStore,
    cart: Cart,
    customer_name: String,
    status: SessionStatus,
    unknown_item_policy: UnknownItemPolicy,
    last_invoice: Option<InvoiceId>,
    version: u64,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            id: SessionId::new(),
            inventory: InventoryStore::from_catalog(catalog),
            cart: Cart::new(),
            customer_name: String::new(),
            status: SessionStatus::Idle,
            unknown_item_policy: UnknownItemPolicy::default(),
            last_invoice: None,
            version: 0,
        }
    }

    pub fn with_unknown_item_policy(mut self, policy: UnknownItemPolicy) -> Self {
        self.unknown_item_policy = policy;
        self
    }

    pub fn inventory(&self) -> &InventoryStore {
        &self.inventory
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn unknown_item_policy(&self) -> UnknownItemPolicy {
        self.unknown_item_policy
    }

    pub fn last_invoice(&self) -> Option<InvoiceId> {
        self.last_invoice
    }

    pub fn is_modifiable(&self) -> bool {
        !matches!(self.status, SessionStatus::Finalized)
    }

    /// Undiscounted cart total.
    pub fn compute_total(&self) -> Money {
        self.cart.compute_total(&self.inventory)
    }

    pub fn totals(&self) -> Totals {
        self.cart.totals(&self.inventory, STANDARD_DISCOUNT)
    }

    /// Discounted running total, two decimals (`"135.00"`).
    pub fn running_total_display(&self) -> String {
        STANDARD_DISCOUNT.apply_to(self.compute_total()).to_plain_string()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Catalog::fruit_shop())
    }
}

impl AggregateRoot for Session {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddToCart (raw operator input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCart {
    pub item: String,
    pub quantity_text: String,
    pub customer_name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: FinalizeSession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeSession {
    pub invoice_id: InvoiceId,
    pub customer_name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearSession.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearSession {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionCommand {
    AddToCart(AddToCart),
    Finalize(FinalizeSession),
    Clear(ClearSession),
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub item: String,
    pub quantity: u32,
    pub customer_name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SessionFinalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFinalized {
    pub invoice_id: InvoiceId,
    pub customer_name: String,
    pub totals: Totals,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SessionCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCleared {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    ItemAdded(ItemAdded),
    Finalized(SessionFinalized),
    Cleared(SessionCleared),
}

impl Event for SessionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::ItemAdded(_) => "sales.session.item_added",
            SessionEvent::Finalized(_) => "sales.session.finalized",
            SessionEvent::Cleared(_) => "sales.session.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::ItemAdded(e) => e.occurred_at,
            SessionEvent::Finalized(e) => e.occurred_at,
            SessionEvent::Cleared(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Session {
    type Command = SessionCommand;
    type Event = SessionEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SessionEvent::ItemAdded(e) => {
                // `handle` already checked availability; the cart only takes
                // what the store gave up.
                match self.inventory.decrement_stock(&e.item, e.quantity) {
                    Ok(()) => self.cart.add(&e.item, e.quantity),
                    Err(err) => {
                        tracing::error!(item = %e.item, error = %err, "item_added applied without stock");
                    }
                }
                self.customer_name = e.customer_name.clone();
                self.status = SessionStatus::Building;
            }
            SessionEvent::Finalized(e) => {
                self.customer_name = e.customer_name.clone();
                self.last_invoice = Some(e.invoice_id);
                self.status = SessionStatus::Finalized;
            }
            SessionEvent::Cleared(_) => {
                self.cart.clear();
                self.customer_name.clear();
                self.inventory.reset();
                self.status = SessionStatus::Idle;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SessionCommand::AddToCart(cmd) => self.handle_add(cmd),
            SessionCommand::Finalize(cmd) => self.handle_finalize(cmd),
            SessionCommand::Clear(cmd) => Ok(vec![SessionEvent::Cleared(SessionCleared {
                occurred_at: cmd.occurred_at,
            })]),
        }
    }
}

impl Session {
    fn ensure_modifiable(&self) -> Result<(), DomainError> {
        if !self.is_modifiable() {
            return Err(DomainError::invalid_operation(
                "session is finalized; clear it to start a new sale",
            ));
        }
        Ok(())
    }

    fn handle_add(&self, cmd: &AddToCart) -> Result<Vec<SessionEvent>, DomainError> {
        self.ensure_modifiable()?;

        let quantity = parse_quantity(&cmd.quantity_text)?;

        let Some(item) = self.inventory.get(&cmd.item) else {
            return match self.unknown_item_policy {
                UnknownItemPolicy::Reject => {
                    Err(ValidationError::UnknownItem(cmd.item.clone()).into())
                }
                UnknownItemPolicy::Ignore => Ok(vec![]),
            };
        };

        if item.stock() < quantity {
            return Err(ValidationError::InsufficientStock {
                item: cmd.item.clone(),
                requested: quantity,
                available: item.stock(),
            }
            .into());
        }

        Ok(vec![SessionEvent::ItemAdded(ItemAdded {
            item: cmd.item.clone(),
            quantity,
            customer_name: cmd.customer_name.trim().to_string(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_finalize(&self, cmd: &FinalizeSession) -> Result<Vec<SessionEvent>, DomainError> {
        self.ensure_modifiable()?;

        let customer_name = cmd.customer_name.trim();
        if customer_name.is_empty() {
            return Err(ValidationError::MissingName.into());
        }

        if self.cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        Ok(vec![SessionEvent::Finalized(SessionFinalized {
            invoice_id: cmd.invoice_id,
            customer_name: customer_name.to_string(),
            totals: self.totals(),
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fruitshop_inventory::CatalogEntry;
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn add(item: &str, quantity: &str) -> SessionCommand {
        SessionCommand::AddToCart(AddToCart {
            item: item.to_string(),
            quantity_text: quantity.to_string(),
            customer_name: "Asha".to_string(),
            occurred_at: test_time(),
        })
    }

    fn finalize(name: &str) -> SessionCommand {
        SessionCommand::Finalize(FinalizeSession {
            invoice_id: InvoiceId::new(),
            customer_name: name.to_string(),
            occurred_at: test_time(),
        })
    }

    fn clear() -> SessionCommand {
        SessionCommand::Clear(ClearSession {
            occurred_at: test_time(),
        })
    }

    fn execute(session: &mut Session, command: SessionCommand) -> Result<(), DomainError> {
        let events = session.handle(&command)?;
        for event in &events {
            session.apply(event);
        }
        Ok(())
    }

    fn validation(err: DomainError) -> ValidationError {
        match err {
            DomainError::Validation(v) => v,
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn add_moves_stock_into_the_cart() {
        let mut session = Session::default();
        execute(&mut session, add("Apple", "3")).unwrap();

        assert_eq!(session.inventory().stock("Apple"), Some(7));
        assert_eq!(session.cart().quantity("Apple"), 3);
        assert_eq!(session.compute_total(), Money::from_rupees(150));
        assert_eq!(session.running_total_display(), "135.00");
        assert_eq!(session.status(), SessionStatus::Building);
        assert_eq!(session.customer_name(), "Asha");
    }

    #[test]
    fn add_emits_item_added_event() {
        let session = Session::default();
        let events = session.handle(&add("Banana", " 4 ")).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "sales.session.item_added");
        match &events[0] {
            SessionEvent::ItemAdded(e) => {
                assert_eq!(e.item, "Banana");
                assert_eq!(e.quantity, 4);
            }
            _ => panic!("Expected ItemAdded event"),
        }
    }

    #[test]
    fn more_than_available_is_insufficient_stock() {
        let mut session = Session::default();
        let err = execute(&mut session, add("Apple", "20")).unwrap_err();
        assert_eq!(
            validation(err),
            ValidationError::InsufficientStock {
                item: "Apple".into(),
                requested: 20,
                available: 10,
            }
        );
        assert_eq!(session.inventory().stock("Apple"), Some(10));
        assert!(session.cart().is_empty());
    }

    #[test]
    fn bad_quantity_text_changes_nothing() {
        let mut session = Session::default();
        let before = session.clone();

        let err = execute(&mut session, add("Apple", "abc")).unwrap_err();
        assert!(matches!(validation(err), ValidationError::NotANumber(_)));
        let err = execute(&mut session, add("Apple", "")).unwrap_err();
        assert_eq!(validation(err), ValidationError::EmptyQuantity);
        let err = execute(&mut session, add("Apple", "0")).unwrap_err();
        assert_eq!(validation(err), ValidationError::NonPositive(0));
        let err = execute(&mut session, add("Apple", "-2")).unwrap_err();
        assert_eq!(validation(err), ValidationError::NonPositive(-2));

        assert_eq!(session, before);
    }

    #[test]
    fn unknown_item_is_rejected_by_default() {
        let mut session = Session::default();
        let err = execute(&mut session, add("Durian", "1")).unwrap_err();
        assert_eq!(validation(err), ValidationError::UnknownItem("Durian".into()));
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[test]
    fn unknown_item_is_a_silent_no_op_when_ignored() {
        let mut session = Session::default().with_unknown_item_policy(UnknownItemPolicy::Ignore);
        let before = session.clone();

        let events = session.handle(&add("Durian", "1")).unwrap();
        assert!(events.is_empty());
        execute(&mut session, add("Durian", "1")).unwrap();
        assert_eq!(session, before);

        // Quantity is still validated before the lookup.
        let err = execute(&mut session, add("Durian", "x")).unwrap_err();
        assert!(matches!(validation(err), ValidationError::NotANumber(_)));
    }

    #[test]
    fn finalize_requires_a_name_then_a_cart() {
        let mut session = Session::default();
        let err = session.handle(&finalize("   ")).unwrap_err();
        assert_eq!(validation(err), ValidationError::MissingName);
        let err = session.handle(&finalize("Asha")).unwrap_err();
        assert_eq!(validation(err), ValidationError::EmptyCart);

        execute(&mut session, add("Mango", "2")).unwrap();
        let err = session.handle(&finalize("")).unwrap_err();
        assert_eq!(validation(err), ValidationError::MissingName);
    }

    #[test]
    fn finalize_carries_discounted_totals() {
        let mut session = Session::default();
        execute(&mut session, add("Apple", "3")).unwrap();

        let events = session.handle(&finalize(" Asha ")).unwrap();
        match &events[0] {
            SessionEvent::Finalized(e) => {
                assert_eq!(e.customer_name, "Asha");
                assert_eq!(e.totals.subtotal, Money::from_rupees(150));
                assert_eq!(e.totals.discount, Money::from_rupees(15));
                assert_eq!(e.totals.total, Money::from_rupees(135));
            }
            _ => panic!("Expected Finalized event"),
        }

        session.apply(&events[0]);
        assert_eq!(session.status(), SessionStatus::Finalized);
        assert!(session.last_invoice().is_some());
    }

    #[test]
    fn running_total_rounds_ninety_percent_half_up() {
        let catalog = Catalog::new(vec![CatalogEntry::new("Kiwi", Money::from_paise(1_225), 4, "KG")]).unwrap();
        let mut session = Session::new(catalog);
        execute(&mut session, add("Kiwi", "1")).unwrap();

        assert_eq!(session.running_total_display(), "11.03");
        let totals = session.totals();
        assert_eq!(totals.discount, Money::from_paise(123));
        assert_eq!(totals.total, Money::from_paise(1_103));
    }

    #[test]
    fn finalized_session_rejects_changes_until_cleared() {
        let mut session = Session::default();
        execute(&mut session, add("Apple", "1")).unwrap();
        execute(&mut session, finalize("Asha")).unwrap();

        let err = execute(&mut session, add("Apple", "1")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidOperation(_)));
        let err = execute(&mut session, finalize("Asha")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidOperation(_)));

        execute(&mut session, clear()).unwrap();
        assert_eq!(session.status(), SessionStatus::Idle);
        execute(&mut session, add("Apple", "1")).unwrap();
    }

    #[test]
    fn clear_reseeds_inventory_and_empties_cart() {
        let mut session = Session::default();
        execute(&mut session, add("Apple", "3")).unwrap();
        execute(&mut session, add("Grapes", "12")).unwrap();
        execute(&mut session, clear()).unwrap();

        assert!(session.cart().is_empty());
        assert_eq!(session.customer_name(), "");
        assert_eq!(session.inventory(), &InventoryStore::initialize());
        assert_eq!(session.compute_total(), Money::ZERO);
        assert_eq!(session.running_total_display(), "0.00");
    }

    #[test]
    fn version_increments_on_apply() {
        let mut session = Session::default();
        assert_eq!(session.version(), 0);
        execute(&mut session, add("Apple", "1")).unwrap();
        assert_eq!(session.version(), 1);
        execute(&mut session, clear()).unwrap();
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn policy_parses_from_config_text() {
        assert_eq!("Reject".parse::<UnknownItemPolicy>().unwrap(), UnknownItemPolicy::Reject);
        assert_eq!(" ignore".parse::<UnknownItemPolicy>().unwrap(), UnknownItemPolicy::Ignore);
        assert!("skip".parse::<UnknownItemPolicy>().is_err());
    }

    fn item_name() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["Apple", "Banana", "Orange", "Mango", "Grapes"])
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: stock plus cart quantity always equals catalog stock, and
        /// the total is the exact sum of price times quantity.
        #[test]
        fn stock_is_conserved_across_adds(
            adds in prop::collection::vec((item_name(), -3i32..15i32), 1..40)
        ) {
            let catalog = Catalog::fruit_shop();
            let mut session = Session::new(catalog.clone());

            for (item, quantity) in adds {
                let before = session.clone();
                let stock_before = before.inventory().stock(item).unwrap();
                match execute(&mut session, add(item, &quantity.to_string())) {
                    Ok(()) => {
                        let quantity = u32::try_from(quantity).unwrap();
                        prop_assert_eq!(session.inventory().stock(item), Some(stock_before - quantity));
                        prop_assert_eq!(
                            session.cart().quantity(item),
                            before.cart().quantity(item) + quantity
                        );
                    }
                    Err(_) => {
                        prop_assert_eq!(&session, &before);
                    }
                }
            }

            let mut expected_total = Money::ZERO;
            for entry in catalog.entries() {
                let in_cart = session.cart().quantity(&entry.name);
                prop_assert_eq!(session.inventory().stock(&entry.name), Some(entry.stock - in_cart));
                expected_total = expected_total + entry.price.times(in_cart);
            }
            prop_assert_eq!(session.compute_total(), expected_total);
            // 90% of the subtotal, half-up to the paisa.
            let paise = (expected_total.paise() * 90 + 50) / 100;
            prop_assert_eq!(
                session.running_total_display(),
                format!("{}.{:02}", paise / 100, paise % 100)
            );
        }
    }
}
