//! Minecraft shop window: pick an item from the shared price sheet, enter a
//! quantity and place an order that is logged locally and posted to the
//! server's chat webhook.

pub mod app;
pub mod catalog;
pub mod config;
pub mod jobs;
pub mod order;
pub mod ui;
