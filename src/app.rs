// Window setup and the collaborators shared by both screens

use std::sync::Arc;

use macroquad::prelude::*;

use crate::catalog::{PriceSource, SheetClient};
use crate::config::ShopConfig;
use crate::order::{OrderSubmitter, WebhookNotifier};
use crate::ui::{LoginScreen, ShopScreen};

pub fn window_conf() -> Conf {
    Conf {
        window_title: "Minecraft Shop".to_string(),
        window_width: 420,
        window_height: 640,
        window_resizable: true,
        ..Default::default()
    }
}

/// Handles to the price sheet and the order pipeline, plus the settings
/// they were built from. Cloned into workers.
#[derive(Clone)]
pub struct ShopServices {
    pub config: ShopConfig,
    pub prices: Arc<dyn PriceSource>,
    pub orders: Arc<OrderSubmitter>,
}

impl ShopServices {
    pub fn from_config(config: &ShopConfig) -> Self {
        let timeout = config.http_timeout();
        let notifier = WebhookNotifier::new(&config.webhook_url, timeout);
        Self {
            config: config.clone(),
            prices: Arc::new(SheetClient::new(&config.sheet_id, timeout)),
            orders: Arc::new(OrderSubmitter::new(
                config.log_file.clone(),
                Box::new(notifier),
                config.notify_attempts,
            )),
        }
    }
}

/// Which screen is up. Login only ever moves forward to the shop.
pub enum AppState {
    Login(LoginScreen),
    Shop(ShopScreen),
}
