//! Order validation, purchase log and notification dispatch

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::notify::{Notifier, NotifyError};
use super::selection::{parse_quantity, Selection};
use crate::catalog::Catalog;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Please select an item first!")]
    NoSelection,
    #[error("Please enter a valid number for quantity!")]
    InvalidQuantity,
    #[error("{0} is no longer for sale")]
    UnknownItem(String),
    #[error("Could not write purchase log: {0}")]
    LogWrite(#[from] std::io::Error),
}

/// A validated order, ready to be logged and announced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub player: String,
    pub item: String,
    pub quantity: u32,
    pub total_cost: u64,
}

impl OrderRecord {
    pub fn new(player: &str, item: &str, quantity: u32, unit_price: u32) -> Self {
        Self {
            player: player.to_string(),
            item: item.to_string(),
            quantity,
            total_cost: u64::from(unit_price) * u64::from(quantity),
        }
    }

    /// Text used for both the purchase log and the webhook
    pub fn message(&self) -> String {
        format!(
            "Order from {}:\n- Item: {}\n- Amount: {}\n- Total Cost: ${}",
            self.player, self.item, self.quantity, self.total_cost
        )
    }
}

/// Outcome of the webhook half of an order
#[derive(Debug)]
pub enum NotificationStatus {
    Sent,
    Disabled,
    Failed(NotifyError),
}

#[derive(Debug)]
pub struct OrderReceipt {
    pub record: OrderRecord,
    pub notification: NotificationStatus,
}

pub struct OrderSubmitter {
    log_path: PathBuf,
    notifier: Box<dyn Notifier>,
    notify_attempts: u32,
}

impl OrderSubmitter {
    pub fn new(log_path: impl Into<PathBuf>, notifier: Box<dyn Notifier>, notify_attempts: u32) -> Self {
        Self {
            log_path: log_path.into(),
            notifier,
            notify_attempts: notify_attempts.max(1),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Validate and fully process an order
    pub fn place_order(
        &self,
        player: &str,
        selection: &Selection,
        catalog: &Catalog,
    ) -> Result<OrderReceipt, OrderError> {
        let record = Self::prepare(player, selection, catalog)?;
        self.submit(record)
    }

    /// Check the selection and build the record without touching disk or network
    pub fn prepare(player: &str, selection: &Selection, catalog: &Catalog) -> Result<OrderRecord, OrderError> {
        let item = selection.active_item().ok_or(OrderError::NoSelection)?;
        let quantity = parse_quantity(&selection.quantity_text).ok_or(OrderError::InvalidQuantity)?;
        let unit_price = catalog
            .price(item)
            .ok_or_else(|| OrderError::UnknownItem(item.to_string()))?;

        Ok(OrderRecord::new(player, item, quantity, unit_price))
    }

    /// Append the record to the purchase log, then announce it.
    ///
    /// A webhook failure does not undo the log line; it is reported in the
    /// receipt instead.
    pub fn submit(&self, record: OrderRecord) -> Result<OrderReceipt, OrderError> {
        let message = record.message();
        self.append_log(&message)?;
        log::info!("{}", message);

        let notification = self.notify(&message);
        Ok(OrderReceipt {
            record,
            notification,
        })
    }

    fn append_log(&self, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{}", message)?;
        file.flush()
    }

    fn notify(&self, message: &str) -> NotificationStatus {
        if !self.notifier.is_enabled() {
            log::info!("Webhook not configured, skipping notification");
            return NotificationStatus::Disabled;
        }

        let mut attempt = 1;
        loop {
            match self.notifier.send(message) {
                Ok(()) => {
                    log::info!("Order message sent to webhook");
                    return NotificationStatus::Sent;
                }
                Err(e) if attempt < self.notify_attempts => {
                    log::warn!("Webhook send failed (attempt {}): {}", attempt, e);
                    attempt += 1;
                }
                Err(e) => {
                    log::error!("Failed to send order message: {}", e);
                    return NotificationStatus::Failed(e);
                }
            }
        }
    }
}
