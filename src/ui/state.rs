//! Screen state, kept free of drawing so it can be driven from tests

use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveTime};
use thiserror::Error;

use crate::app::ShopServices;
use crate::catalog::{load_catalog, Catalog, CatalogLoad, CatalogOrigin, CatalogStats};
use crate::config::{ConfigError, ShopConfig};
use crate::jobs::{Job, JobPoll};
use crate::order::{NotificationStatus, OrderError, OrderReceipt, OrderSubmitter, Selection};

pub const MAX_NAME_LEN: usize = 20;
pub const MAX_QUANTITY_LEN: usize = 9;
pub const MAX_SETTING_LEN: usize = 256;

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Please enter your name")]
    EmptyPlayerName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Error,
}

/// Modal message; blocks other input until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    pub fn info(title: &str, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
}

/// Non-blocking one-line status under the shop controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

#[derive(Default)]
pub struct LoginState {
    name: String,
    pub dialog: Option<Dialog>,
    loading: Option<Job<CatalogLoad>>,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    fn accepts_input(&self) -> bool {
        !self.is_loading() && self.dialog.is_none()
    }

    pub fn push_char(&mut self, c: char) {
        if !self.accepts_input() {
            return;
        }
        if (c.is_alphanumeric() || c == '_' || c == '-') && self.name.chars().count() < MAX_NAME_LEN {
            self.name.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.accepts_input() {
            self.name.pop();
        }
    }

    /// Start loading prices for the entered name
    pub fn submit(&mut self, services: &ShopServices) -> Result<(), LoginError> {
        if !self.accepts_input() {
            return Ok(());
        }

        let name = self.name.trim();
        if name.is_empty() {
            let err = LoginError::EmptyPlayerName;
            self.dialog = Some(Dialog::error(err.to_string()));
            return Err(err);
        }

        log::info!("{} entering the shop, fetching prices", name);
        let prices = Arc::clone(&services.prices);
        self.loading = Some(Job::spawn("price-load", move || load_catalog(prices.as_ref())));
        Ok(())
    }

    /// Returns the shop once the initial price load has finished
    pub fn poll(&mut self) -> Option<ShopState> {
        let load = match self.loading.as_ref()?.poll() {
            JobPoll::Pending => return None,
            JobPoll::Ready(load) => load,
            JobPoll::Lost => {
                log::error!("Price loader stopped unexpectedly, using built-in prices");
                fallback_load()
            }
        };
        self.loading = None;
        Some(ShopState::new(self.name.trim(), load))
    }
}

fn fallback_load() -> CatalogLoad {
    CatalogLoad {
        catalog: Catalog::fallback(),
        money_supply: None,
        origin: CatalogOrigin::Fallback,
    }
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Sheet ID cannot be empty")]
    EmptySheetId,
    #[error("Webhook URL must start with http:// or https://")]
    InvalidWebhookUrl,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    WebhookUrl,
    SheetId,
}

/// Edit buffer for the settings panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub webhook_url: String,
    pub sheet_id: String,
    pub focus: SettingsField,
    pub error: Option<String>,
}

impl SettingsForm {
    pub fn from_config(config: &ShopConfig) -> Self {
        Self {
            webhook_url: config.webhook_url.clone(),
            sheet_id: config.sheet_id.clone(),
            focus: SettingsField::WebhookUrl,
            error: None,
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            SettingsField::WebhookUrl => &mut self.webhook_url,
            SettingsField::SheetId => &mut self.sheet_id,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if c.is_control() || c.is_whitespace() {
            return;
        }
        let field = self.field_mut();
        if field.chars().count() < MAX_SETTING_LEN {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.field_mut().pop();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            SettingsField::WebhookUrl => SettingsField::SheetId,
            SettingsField::SheetId => SettingsField::WebhookUrl,
        };
    }

    /// `base` with the edited values in place. An empty webhook URL turns
    /// notifications off.
    pub fn apply_to(&self, base: &ShopConfig) -> Result<ShopConfig, SettingsError> {
        let webhook_url = self.webhook_url.trim();
        let sheet_id = self.sheet_id.trim();

        if sheet_id.is_empty() {
            return Err(SettingsError::EmptySheetId);
        }
        if !webhook_url.is_empty() && !webhook_url.starts_with("http://") && !webhook_url.starts_with("https://") {
            return Err(SettingsError::InvalidWebhookUrl);
        }

        Ok(ShopConfig {
            webhook_url: webhook_url.to_string(),
            sheet_id: sheet_id.to_string(),
            ..base.clone()
        })
    }
}

// ============================================================================
// Shop
// ============================================================================

/// An item button. Holds its item name; the label is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemButton {
    pub item: String,
    pub price: u32,
}

impl ItemButton {
    pub fn label(&self) -> String {
        format!("{} (${})", self.item, self.price)
    }
}

pub struct ShopState {
    player: String,
    catalog: Catalog,
    origin: CatalogOrigin,
    /// When the sheet last loaded successfully
    last_update: Option<NaiveTime>,
    money_supply: Option<u64>,
    /// Fixed at shop open; refreshes only relabel these
    buttons: Vec<ItemButton>,
    pub selection: Selection,
    quantity_focused: bool,
    pub dialog: Option<Dialog>,
    settings: Option<SettingsForm>,
    pub status: Option<StatusLine>,
    refresh_job: Option<Job<CatalogLoad>>,
    order_job: Option<Job<Result<OrderReceipt, OrderError>>>,
}

impl ShopState {
    pub fn new(player: &str, load: CatalogLoad) -> Self {
        let buttons = load
            .catalog
            .iter()
            .map(|(name, price)| ItemButton {
                item: name.to_string(),
                price,
            })
            .collect();

        Self {
            player: player.to_string(),
            status: origin_status(load.origin),
            catalog: load.catalog,
            origin: load.origin,
            last_update: (load.origin == CatalogOrigin::Remote).then(|| Local::now().time()),
            money_supply: load.money_supply,
            buttons,
            selection: Selection::new(),
            quantity_focused: true,
            dialog: None,
            settings: None,
            refresh_job: None,
            order_job: None,
        }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn buttons(&self) -> &[ItemButton] {
        &self.buttons
    }

    pub fn header_text(&self) -> String {
        match self.money_supply {
            Some(money) if money > 0 => format!("Welcome {}! | Money: ${}", self.player, money),
            _ => format!("Welcome {}!", self.player),
        }
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::new(&self.catalog, self.last_update)
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_job.is_some()
    }

    pub fn is_ordering(&self) -> bool {
        self.order_job.is_some()
    }

    pub fn is_button_selected(&self, index: usize) -> bool {
        self.buttons
            .get(index)
            .is_some_and(|b| self.selection.is_selected(&b.item))
    }

    pub fn select(&mut self, index: usize) {
        if let Some(button) = self.buttons.get(index) {
            self.selection.select(&button.item);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn total_text(&self) -> String {
        self.selection.display_total(&self.catalog)
    }

    pub fn is_quantity_focused(&self) -> bool {
        self.quantity_focused
    }

    pub fn focus_quantity(&mut self, focused: bool) {
        self.quantity_focused = focused;
    }

    /// Typed characters only land in the quantity field while it has focus
    pub fn push_quantity_char(&mut self, c: char) {
        if self.quantity_focused && !c.is_control() && self.selection.quantity_text.chars().count() < MAX_QUANTITY_LEN {
            self.selection.quantity_text.push(c);
        }
    }

    pub fn quantity_backspace(&mut self) {
        if self.quantity_focused {
            self.selection.quantity_text.pop();
        }
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn settings(&self) -> Option<&SettingsForm> {
        self.settings.as_ref()
    }

    pub fn settings_mut(&mut self) -> Option<&mut SettingsForm> {
        self.settings.as_mut()
    }

    pub fn open_settings(&mut self, config: &ShopConfig) {
        if self.dialog.is_none() {
            self.settings = Some(SettingsForm::from_config(config));
        }
    }

    pub fn cancel_settings(&mut self) {
        self.settings = None;
    }

    /// Validate the open form and write it to `path`. Returns the new
    /// config once it is on disk; on failure the form stays open with the
    /// error shown.
    pub fn save_settings(&mut self, base: &ShopConfig, path: &Path) -> Option<ShopConfig> {
        let form = self.settings.as_mut()?;
        let saved = form.apply_to(base).and_then(|config| {
            config.save_to(path)?;
            Ok(config)
        });

        match saved {
            Ok(config) => {
                self.settings = None;
                self.dialog = Some(Dialog::info("Settings", "Settings saved successfully!"));
                Some(config)
            }
            Err(e) => {
                log::error!("Settings not saved: {}", e);
                form.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn refresh_prices(&mut self, services: &ShopServices) {
        if self.is_refreshing() {
            return;
        }
        let prices = Arc::clone(&services.prices);
        self.refresh_job = Some(Job::spawn("price-refresh", move || load_catalog(prices.as_ref())));
        self.status = Some(StatusLine::new(StatusKind::Info, "Refreshing prices..."));
    }

    /// Swap in a freshly loaded catalog and relabel the existing buttons.
    /// Buttons for items the new catalog lacks keep their old label.
    ///
    /// A refresh that fell back to built-in prices never replaces prices
    /// that came from the sheet.
    pub fn apply_catalog(&mut self, load: CatalogLoad) {
        if load.origin == CatalogOrigin::Fallback && self.origin == CatalogOrigin::Remote {
            log::warn!("Price refresh failed, keeping {} sheet prices", self.catalog.len());
            self.status = Some(StatusLine::new(
                StatusKind::Warning,
                "Failed to refresh prices, keeping current prices",
            ));
            return;
        }

        for button in &mut self.buttons {
            if let Some(price) = load.catalog.price(&button.item) {
                button.price = price;
            }
        }
        if load.origin == CatalogOrigin::Remote {
            self.money_supply = load.money_supply;
            self.last_update = Some(Local::now().time());
        }
        self.status = match load.origin {
            CatalogOrigin::Remote => Some(StatusLine::new(StatusKind::Success, "Prices updated")),
            CatalogOrigin::Fallback => origin_status(load.origin),
        };
        self.origin = load.origin;
        self.catalog = load.catalog;
    }

    /// Validate now, then log and notify in the background
    pub fn place_order(&mut self, services: &ShopServices) {
        if self.is_ordering() {
            return;
        }

        match OrderSubmitter::prepare(&self.player, &self.selection, &self.catalog) {
            Ok(record) => {
                let orders = Arc::clone(&services.orders);
                self.order_job = Some(Job::spawn("order-submit", move || orders.submit(record)));
                self.status = Some(StatusLine::new(StatusKind::Info, "Placing order..."));
            }
            Err(e) => self.dialog = Some(Dialog::error(e.to_string())),
        }
    }

    /// Collect finished background work; call once per frame
    pub fn poll(&mut self) {
        if let Some(job) = &self.refresh_job {
            match job.poll() {
                JobPoll::Pending => {}
                JobPoll::Ready(load) => {
                    self.refresh_job = None;
                    self.apply_catalog(load);
                }
                JobPoll::Lost => {
                    self.refresh_job = None;
                    log::error!("Price refresh stopped unexpectedly");
                    self.status = Some(StatusLine::new(StatusKind::Warning, "Price refresh failed"));
                }
            }
        }

        if let Some(job) = &self.order_job {
            match job.poll() {
                JobPoll::Pending => {}
                JobPoll::Ready(result) => {
                    self.order_job = None;
                    self.finish_order(result);
                }
                JobPoll::Lost => {
                    self.order_job = None;
                    self.status = None;
                    self.dialog = Some(Dialog::error("Order processing stopped unexpectedly"));
                }
            }
        }
    }

    fn finish_order(&mut self, result: Result<OrderReceipt, OrderError>) {
        let receipt = match result {
            Ok(receipt) => receipt,
            Err(e) => {
                self.status = None;
                self.dialog = Some(Dialog::error(e.to_string()));
                return;
            }
        };

        let summary = format!("{} x {}", receipt.record.quantity, receipt.record.item);
        let (dialog_text, status) = match receipt.notification {
            NotificationStatus::Sent => (
                "Your order has been sent!",
                StatusLine::new(StatusKind::Success, format!("Order sent: {}", summary)),
            ),
            NotificationStatus::Disabled => (
                "Your order has been logged.",
                StatusLine::new(StatusKind::Info, format!("Order logged: {} (notifications off)", summary)),
            ),
            NotificationStatus::Failed(e) => (
                "Your order has been logged.",
                StatusLine::new(StatusKind::Warning, format!("Order logged, notification failed: {}", e)),
            ),
        };
        self.status = Some(status);
        self.dialog = Some(Dialog::info("Order Placed", dialog_text));
        self.selection.reset();
    }
}

fn origin_status(origin: CatalogOrigin) -> Option<StatusLine> {
    match origin {
        CatalogOrigin::Remote => None,
        CatalogOrigin::Fallback => Some(StatusLine::new(
            StatusKind::Warning,
            "Price sheet unavailable, showing built-in prices",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, PriceSource};
    use crate::jobs::wait_for;
    use crate::order::{Notifier, NotifyError};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct StaticSheet(&'static str);

    impl PriceSource for StaticSheet {
        fn fetch_csv(&self) -> Result<String, CatalogError> {
            Ok(self.0.to_string())
        }
    }

    struct CountingNotifier(Arc<AtomicU32>, bool);

    impl Notifier for CountingNotifier {
        fn send(&self, _message: &str) -> Result<(), NotifyError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            if self.1 {
                Ok(())
            } else {
                Err(NotifyError::Network("connection reset".to_string()))
            }
        }
    }

    fn services(dir: &tempfile::TempDir, sheet: &'static str, notify_ok: bool) -> (ShopServices, Arc<AtomicU32>) {
        let sent = Arc::new(AtomicU32::new(0));
        let orders = OrderSubmitter::new(
            dir.path().join("purchases.log"),
            Box::new(CountingNotifier(Arc::clone(&sent), notify_ok)),
            1,
        );
        let services = ShopServices {
            config: ShopConfig::default(),
            prices: Arc::new(StaticSheet(sheet)),
            orders: Arc::new(orders),
        };
        (services, sent)
    }

    fn load_of(pairs: &[(&str, u32)]) -> CatalogLoad {
        let mut catalog = Catalog::new();
        for (name, price) in pairs {
            catalog.insert(name, *price);
        }
        CatalogLoad {
            catalog,
            money_supply: None,
            origin: CatalogOrigin::Remote,
        }
    }

    fn button_index(shop: &ShopState, item: &str) -> usize {
        shop.buttons().iter().position(|b| b.item == item).unwrap()
    }

    #[test]
    fn test_empty_name_blocks_login() {
        let dir = tempfile::tempdir().unwrap();
        let (services, _) = services(&dir, "Item,Price\nDiamond,50\n", true);
        let mut login = LoginState::new();

        assert!(matches!(login.submit(&services), Err(LoginError::EmptyPlayerName)));
        assert_eq!(login.dialog, Some(Dialog::error("Please enter your name")));
        assert!(!login.is_loading());
        assert!(login.poll().is_none());
    }

    #[test]
    fn test_name_input_filtering() {
        let mut login = LoginState::new();
        for c in "Steve 2!_x".chars() {
            login.push_char(c);
        }
        assert_eq!(login.name(), "Steve2_x");

        for _ in 0..40 {
            login.push_char('a');
        }
        assert_eq!(login.name().len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_login_opens_shop() {
        let dir = tempfile::tempdir().unwrap();
        let (services, _) = services(&dir, "Money Supply: 900\nItem,Price\nDiamond,50\nIron,20\n", true);
        let mut login = LoginState::new();
        for c in "Alex".chars() {
            login.push_char(c);
        }

        login.submit(&services).unwrap();
        assert!(login.is_loading());
        // Input is ignored while prices load
        login.push_char('z');
        assert_eq!(login.name(), "Alex");

        let shop = wait_for(|| login.poll());
        assert_eq!(shop.player(), "Alex");
        assert_eq!(shop.header_text(), "Welcome Alex! | Money: $900");
        let labels: Vec<String> = shop.buttons().iter().map(ItemButton::label).collect();
        assert_eq!(labels, vec!["Diamond ($50)", "Iron ($20)"]);
        assert!(shop.status.is_none());
    }

    #[test]
    fn test_login_with_bad_sheet_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let (services, _) = services(&dir, "<html>not a sheet</html>", true);
        let mut login = LoginState::new();
        login.push_char('A');
        login.submit(&services).unwrap();

        let shop = wait_for(|| login.poll());
        assert_eq!(shop.catalog(), &Catalog::fallback());
        assert_eq!(shop.header_text(), "Welcome A!");
        assert_eq!(shop.status.as_ref().map(|s| s.kind), Some(StatusKind::Warning));
    }

    #[test]
    fn test_selection_highlight_follows_state() {
        let mut shop = ShopState::new("Steve", load_of(&[("Iron", 20), ("Gold", 30)]));
        assert_eq!(shop.total_text(), "Total: $0");

        shop.select(0);
        assert!(shop.is_button_selected(0));
        assert!(!shop.is_button_selected(1));

        shop.select(1);
        assert!(!shop.is_button_selected(0));
        assert!(shop.is_button_selected(1));

        shop.clear_selection();
        shop.clear_selection();
        assert!(!shop.is_button_selected(1));
        assert_eq!(shop.total_text(), "Total: $0");
    }

    #[test]
    fn test_total_updates_per_keystroke() {
        let mut shop = ShopState::new("Steve", load_of(&[("Iron", 20)]));
        shop.select(0);

        shop.push_quantity_char('3');
        assert_eq!(shop.total_text(), "Total: $20 × 3 = $60");
        shop.push_quantity_char('x');
        assert_eq!(shop.total_text(), "Total: $20 × 0 = $0");
        shop.quantity_backspace();
        shop.push_quantity_char('0');
        assert_eq!(shop.total_text(), "Total: $20 × 30 = $600");
    }

    #[test]
    fn test_refresh_relabels_in_place() {
        let mut shop = ShopState::new("Steve", load_of(&[("Iron", 20), ("Dirt", 1)]));
        assert_eq!(shop.buttons()[0].label(), "Iron ($20)");

        shop.apply_catalog(load_of(&[("Iron", 25), ("Emerald", 99)]));

        let labels: Vec<String> = shop.buttons().iter().map(ItemButton::label).collect();
        assert_eq!(labels, vec!["Iron ($25)", "Dirt ($1)"]);
        assert_eq!(shop.catalog().price("Iron"), Some(25));
    }

    #[test]
    fn test_failed_refresh_keeps_sheet_prices() {
        let mut shop = ShopState::new("Steve", load_of(&[("Diamond", 52), ("Emerald", 99)]));
        shop.select(button_index(&shop, "Emerald"));
        shop.push_quantity_char('2');
        let updated_at = shop.stats().last_update;

        shop.apply_catalog(fallback_load());

        let labels: Vec<String> = shop.buttons().iter().map(ItemButton::label).collect();
        assert_eq!(labels, vec!["Diamond ($52)", "Emerald ($99)"]);
        assert_eq!(shop.catalog().price("Diamond"), Some(52));
        assert_eq!(shop.stats().last_update, updated_at);
        let status = shop.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Warning);
        assert_eq!(status.text, "Failed to refresh prices, keeping current prices");

        let record = OrderSubmitter::prepare("Steve", &shop.selection, shop.catalog()).unwrap();
        assert_eq!(record.item, "Emerald");
        assert_eq!(record.total_cost, 198);
    }

    #[test]
    fn test_fallback_shop_takes_sheet_prices_on_refresh() {
        let mut shop = ShopState::new("Steve", fallback_load());
        assert_eq!(shop.stats().last_update, None);

        shop.apply_catalog(load_of(&[("Diamond", 52)]));
        assert_eq!(shop.buttons()[0].label(), "Diamond ($52)");
        assert!(shop.stats().last_update.is_some());

        // Now on sheet prices, a later failure leaves them alone
        shop.apply_catalog(fallback_load());
        assert_eq!(shop.buttons()[0].label(), "Diamond ($52)");
    }

    #[test]
    fn test_stats_line() {
        let shop = ShopState::new("Steve", fallback_load());
        assert_eq!(shop.stats().summary(), "Items: 4 | Range: $1 - $50 | Updated: Never");

        let shop = ShopState::new("Steve", load_of(&[("Iron", 20), ("Emerald", 99)]));
        let stats = shop.stats();
        assert_eq!(stats.items, 2);
        assert_eq!(stats.price_range, Some((20, 99)));
        assert!(stats.last_update.is_some());
    }

    #[test]
    fn test_unfocused_quantity_ignores_typing() {
        let mut shop = ShopState::new("Steve", load_of(&[("Iron", 20)]));
        shop.select(0);
        assert!(shop.is_quantity_focused());
        shop.push_quantity_char('3');

        shop.focus_quantity(false);
        shop.push_quantity_char('7');
        shop.quantity_backspace();
        assert_eq!(shop.selection.quantity_text, "3");

        shop.focus_quantity(true);
        shop.push_quantity_char('7');
        assert_eq!(shop.total_text(), "Total: $20 × 37 = $740");
    }

    #[test]
    fn test_settings_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        let base = ShopConfig::default();
        let mut shop = ShopState::new("Steve", load_of(&[("Iron", 20)]));

        shop.open_settings(&base);
        let form = shop.settings_mut().unwrap();
        form.webhook_url.clear();
        form.toggle_focus();
        form.sheet_id.clear();
        for c in "new-sheet".chars() {
            form.push_char(c);
        }

        let saved = shop.save_settings(&base, &path).unwrap();
        assert_eq!(saved.sheet_id, "new-sheet");
        assert_eq!(saved.webhook_url, "");
        assert_eq!(saved.log_file, base.log_file);
        assert!(shop.settings().is_none());
        assert_eq!(shop.dialog, Some(Dialog::info("Settings", "Settings saved successfully!")));
        assert_eq!(ShopConfig::from_file(&path).unwrap(), saved);
    }

    #[test]
    fn test_invalid_settings_stay_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        let base = ShopConfig::default();
        let mut shop = ShopState::new("Steve", load_of(&[("Iron", 20)]));

        shop.open_settings(&base);
        let form = shop.settings_mut().unwrap();
        form.webhook_url = "discord.com/hook".to_string();

        assert!(shop.save_settings(&base, &path).is_none());
        let form = shop.settings().unwrap();
        assert_eq!(form.error.as_deref(), Some("Webhook URL must start with http:// or https://"));
        assert!(!path.exists());

        shop.cancel_settings();
        assert!(shop.settings().is_none());
        assert!(shop.dialog.is_none());
    }

    #[test]
    fn test_settings_input() {
        let mut form = SettingsForm::from_config(&ShopConfig::default());
        form.sheet_id = "ab".to_string();
        form.toggle_focus();
        assert_eq!(form.focus, SettingsField::SheetId);

        form.push_char(' ');
        form.push_char('\t');
        form.push_char('c');
        form.backspace();
        form.backspace();
        assert_eq!(form.sheet_id, "a");

        form.sheet_id.clear();
        let err = form.apply_to(&ShopConfig::default()).unwrap_err();
        assert!(matches!(err, SettingsError::EmptySheetId));
    }

    #[test]
    fn test_background_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let (services, _) = services(&dir, "Item,Price\nIron,25\n", true);
        let mut shop = ShopState::new("Steve", load_of(&[("Iron", 20)]));

        shop.refresh_prices(&services);
        assert!(shop.is_refreshing());
        wait_for(|| {
            shop.poll();
            (!shop.is_refreshing()).then_some(())
        });

        assert_eq!(shop.buttons()[0].label(), "Iron ($25)");
        assert_eq!(shop.status.as_ref().map(|s| s.kind), Some(StatusKind::Success));
    }

    #[test]
    fn test_order_validation_shows_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let (services, sent) = services(&dir, "", true);
        let mut shop = ShopState::new("Steve", load_of(&[("Gold", 30)]));

        shop.place_order(&services);
        assert_eq!(shop.dialog, Some(Dialog::error("Please select an item first!")));
        assert!(!shop.is_ordering());

        shop.dismiss_dialog();
        shop.select(0);
        shop.push_quantity_char('0');
        shop.place_order(&services);
        assert_eq!(shop.dialog, Some(Dialog::error("Please enter a valid number for quantity!")));
        assert!(shop.selection.is_selected("Gold"));
        assert_eq!(sent.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_order_placed() {
        let dir = tempfile::tempdir().unwrap();
        let (services, sent) = services(&dir, "", true);
        let mut shop = ShopState::new("Steve", load_of(&[("Gold", 30)]));
        shop.select(button_index(&shop, "Gold"));
        shop.push_quantity_char('4');

        shop.place_order(&services);
        assert!(shop.is_ordering());
        wait_for(|| {
            shop.poll();
            (!shop.is_ordering()).then_some(())
        });

        assert_eq!(shop.dialog, Some(Dialog::info("Order Placed", "Your order has been sent!")));
        assert_eq!(shop.status.as_ref().map(|s| s.kind), Some(StatusKind::Success));
        assert_eq!(sent.load(Ordering::SeqCst), 1);
        // Ready for the next order
        assert_eq!(shop.selection.active_item(), None);
        assert_eq!(shop.selection.quantity_text, "");
        assert_eq!(shop.total_text(), "Total: $0");
        let log = std::fs::read_to_string(dir.path().join("purchases.log")).unwrap();
        assert_eq!(log, "Order from Steve:\n- Item: Gold\n- Amount: 4\n- Total Cost: $120\n");
    }

    #[test]
    fn test_notification_failure_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let (services, _) = services(&dir, "", false);
        let mut shop = ShopState::new("Steve", load_of(&[("Dirt", 1)]));
        shop.select(0);
        shop.push_quantity_char('2');

        shop.place_order(&services);
        wait_for(|| {
            shop.poll();
            (!shop.is_ordering()).then_some(())
        });

        assert_eq!(shop.dialog.as_ref().map(|d| d.kind), Some(DialogKind::Info));
        let status = shop.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Warning);
        assert!(status.text.contains("connection reset"));
    }
}
