//! # Support Tickets
//!
//! Customer support threads. A ticket holds a message list shared by the
//! customer and staff; once a ticket is Resolved or Closed the customer
//! side is read-only, while staff can always write.

use chrono::Utc;
use tracing::{debug, info};

use hind_core::new_entity_id;
use hind_core::types::{MessageAuthor, SupportMessage, SupportTicket, TicketStatus};
use hind_core::validation;

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

impl Store {
    /// Opens a ticket on behalf of a user, with the first message.
    pub fn open_ticket(
        &mut self,
        user_id: &str,
        subject: &str,
        message: String,
    ) -> StoreResult<SupportTicket> {
        validation::require(subject, "subject")?;
        validation::require(&message, "message")?;

        let user = self.user(user_id)?;
        let now = Utc::now();

        let ticket = SupportTicket {
            id: new_entity_id(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            subject: subject.trim().to_string(),
            status: TicketStatus::Open,
            created_at: now,
            updated_at: now,
            messages: vec![SupportMessage {
                author: MessageAuthor::User,
                text: message,
                date: now,
            }],
        };

        self.tickets.push(ticket.clone());
        info!(ticket_id = %ticket.id, user_id, "Support ticket opened");
        Ok(ticket)
    }

    /// Appends a reply to a ticket thread.
    ///
    /// Customer replies are rejected once the ticket is Resolved or
    /// Closed; staff replies always land (and are how a closed thread
    /// gets a final word).
    pub fn reply_to_ticket(
        &mut self,
        ticket_id: &str,
        author: MessageAuthor,
        text: String,
    ) -> StoreResult<()> {
        validation::require(&text, "message")?;

        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or_else(|| StoreError::not_found("Ticket", ticket_id))?;

        if author == MessageAuthor::User && !ticket.status.accepts_user_reply() {
            return Err(StoreError::TicketNotAcceptingReplies {
                ticket_id: ticket.id.clone(),
            });
        }

        let now = Utc::now();
        ticket.messages.push(SupportMessage { author, text, date: now });
        ticket.updated_at = now;
        Ok(())
    }

    /// Moves a ticket to a new status and stamps `updated_at`.
    pub fn set_ticket_status(&mut self, ticket_id: &str, status: TicketStatus) -> StoreResult<()> {
        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or_else(|| StoreError::not_found("Ticket", ticket_id))?;

        ticket.status = status;
        ticket.updated_at = Utc::now();

        debug!(ticket_id, ?status, "Ticket status updated");
        Ok(())
    }
}
