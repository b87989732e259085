//! Ticket Model
//!
//! Read-only view of the external ticket catalog, used to resolve
//! `Zone::ticket_refs` into a name and price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::zone::TicketId;

/// Ticket type entity (票种)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Ticket {
    pub fn new(id: impl Into<TicketId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            currency: None,
            description: None,
        }
    }
}

/// Tickets keyed by id
pub type TicketCatalog = HashMap<TicketId, Ticket>;

/// Index a ticket listing by id. Later duplicates win.
pub fn index_tickets(tickets: impl IntoIterator<Item = Ticket>) -> TicketCatalog {
    tickets.into_iter().map(|t| (t.id.clone(), t)).collect()
}
