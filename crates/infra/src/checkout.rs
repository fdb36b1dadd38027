//! Checkout pipeline (application-level orchestration).
//!
//! `Checkout` is the single entry point the presentation layer talks to. It
//! owns the `Session` aggregate and the invoice log, and runs every operation
//! the same way:
//!
//! ```text
//! raw input
//!   ↓
//! 1. Session::handle (validate, decide events; no mutation)
//!   ↓
//! 2. Side effect, finalize only (append rendered invoice to the log)
//!   ↓
//! 3. Session::apply (evolve state)
//!   ↓
//! SessionView (render-ready state)
//! ```
//!
//! Events are applied only after the log append succeeds, so a failed write
//! leaves the session exactly as it was and the finalize can be retried.

use chrono::Utc;
use thiserror::Error;

use fruitshop_core::{Aggregate, AggregateRoot, DomainError, InvoiceId, Money, ValidationError};
use fruitshop_events::Event;
use fruitshop_inventory::DisplayEntry;
use fruitshop_invoicing::{Invoice, InvoiceLine};
use fruitshop_sales::{
    AddToCart, ClearSession, FinalizeSession, STANDARD_DISCOUNT, Session, SessionCommand,
    SessionEvent, SessionStatus,
};

use crate::invoice_log::{InvoiceLog, InvoiceLogError};

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The operation was rejected by the session (bad input or wrong state).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The invoice could not be written; the session is unchanged.
    #[error(transparent)]
    Log(#[from] InvoiceLogError),
}

impl CheckoutError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            CheckoutError::Domain(err) => err.as_validation(),
            CheckoutError::Log(_) => None,
        }
    }
}

/// Everything the presentation layer needs to redraw after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub status: SessionStatus,
    pub customer_name: String,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: Money,
    /// Discounted total, two decimals (`"135.00"`).
    pub running_total: String,
    /// Invoice preview without the totals block.
    pub invoice_preview: String,
    pub entries: Vec<DisplayEntry>,
}

#[derive(Debug)]
pub struct Checkout<L> {
    session: Session,
    log: L,
}

impl<L> Checkout<L> {
    pub fn new(session: Session, log: L) -> Self {
        Self { session, log }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    /// Current state, with the preview addressed to the session's customer.
    pub fn view(&self) -> SessionView {
        let customer_name = self.session.customer_name();
        let invoice = Invoice::from_cart(
            customer_name,
            self.session.cart(),
            self.session.inventory(),
            STANDARD_DISCOUNT,
        );
        SessionView {
            status: self.session.status(),
            customer_name: customer_name.to_string(),
            subtotal: invoice.totals.subtotal,
            running_total: self.session.running_total_display(),
            invoice_preview: self.render_invoice(customer_name, false),
            lines: invoice.lines,
            entries: self.session.inventory().list_display_entries(),
        }
    }

    /// Render the cart for `customer_name`; `finalize` adds the totals block.
    pub fn render_invoice(&self, customer_name: &str, finalize: bool) -> String {
        fruitshop_invoicing::render_invoice(&self.session, customer_name, finalize)
    }

    fn decide(&self, command: &SessionCommand) -> Result<Vec<SessionEvent>, DomainError> {
        self.session.handle(command).inspect_err(|err| {
            tracing::warn!(error = %err, "operation rejected");
        })
    }

    fn commit(&mut self, events: &[SessionEvent]) {
        for event in events {
            self.session.apply(event);
            tracing::debug!(
                event_type = event.event_type(),
                version = self.session.version(),
                "event applied"
            );
        }
    }
}

impl<L> Checkout<L>
where
    L: InvoiceLog,
{
    /// Validate and add `quantity_text` of `item` to the cart.
    pub fn add_to_cart(
        &mut self,
        item: &str,
        quantity_text: &str,
        customer_name: &str,
    ) -> Result<SessionView, CheckoutError> {
        let command = SessionCommand::AddToCart(AddToCart {
            item: item.to_string(),
            quantity_text: quantity_text.to_string(),
            customer_name: customer_name.to_string(),
            occurred_at: Utc::now(),
        });

        let events = self.decide(&command)?;
        if events.is_empty() {
            tracing::info!(item, "item not stocked; add ignored");
        }
        self.commit(&events);

        for event in &events {
            if let SessionEvent::ItemAdded(e) = event {
                tracing::info!(
                    item = %e.item,
                    quantity = e.quantity,
                    remaining = self.session.inventory().stock(&e.item).unwrap_or(0),
                    in_cart = self.session.cart().quantity(&e.item),
                    "item added to cart"
                );
            }
        }

        Ok(self.view())
    }

    /// Render the final invoice, append it to the log and mark the session
    /// finalized. Returns the invoice text.
    pub fn finalize(&mut self, customer_name: &str) -> Result<String, CheckoutError> {
        let command = SessionCommand::Finalize(FinalizeSession {
            invoice_id: InvoiceId::new(),
            customer_name: customer_name.to_string(),
            occurred_at: Utc::now(),
        });

        let events = self.decide(&command)?;
        let text = self.render_invoice(customer_name, true);

        if let Err(err) = self.log.append(&text) {
            tracing::warn!(error = %err, "invoice not saved; session left open");
            return Err(err.into());
        }

        self.commit(&events);

        for event in &events {
            if let SessionEvent::Finalized(e) = event {
                tracing::info!(
                    invoice_id = %e.invoice_id,
                    customer = %e.customer_name,
                    subtotal = %e.totals.subtotal,
                    total = %e.totals.total,
                    "invoice saved"
                );
            }
        }

        Ok(text)
    }

    /// Empty the cart and re-seed the inventory from the catalog.
    pub fn clear(&mut self) -> Result<SessionView, CheckoutError> {
        let command = SessionCommand::Clear(ClearSession {
            occurred_at: Utc::now(),
        });
        let events = self.decide(&command)?;
        self.commit(&events);
        tracing::info!("session cleared; inventory reset");
        Ok(self.view())
    }
}
