use macroquad::prelude::*;

use crate::app::ShopServices;
use crate::config::ShopConfig;

use super::layout::{UiElementId, UiLayout};
use super::scroll::{draw_scrollbar, handle_scroll, GridScrollConfig};
use super::state::{LoginState, SettingsField, ShopState};
use super::theme::*;
use super::widgets::*;

/// Result of screen update - tells main loop what to do next
pub enum ScreenState {
    /// Stay on current screen
    Continue,
    /// Prices are in, open the shop
    ToShop(ShopState),
    /// Settings were saved; rebuild the services from them
    Reconfigure(ShopConfig),
}

pub trait Screen {
    fn update(&mut self, services: &ShopServices) -> ScreenState;
    fn render(&self);
}

/// Hovered element under the mouse, and the clicked one if the button went down
fn pointer(layout: &UiLayout) -> (Option<UiElementId>, Option<UiElementId>) {
    let (mx, my) = mouse_position();
    let hovered = layout.hit_test(mx, my).cloned();
    let clicked = if is_mouse_button_pressed(MouseButton::Left) {
        hovered.clone()
    } else {
        None
    };
    (hovered, clicked)
}

fn submit_pressed() -> bool {
    is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter)
}

// ============================================================================
// Login Screen
// ============================================================================

pub struct LoginScreen {
    state: LoginState,
    layout: UiLayout,
    hovered: Option<UiElementId>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            state: LoginState::new(),
            layout: UiLayout::new(),
            hovered: None,
        }
    }

    fn build_layout(&self) -> UiLayout {
        let sw = screen_width();
        let sh = screen_height();
        let box_w = (sw - 2.0 * PADDING).min(320.0);
        let box_x = ((sw - box_w) / 2.0).floor();
        let field_y = (sh * 0.40).floor();

        let mut layout = UiLayout::new();
        layout.add(UiElementId::NameField, Rect::new(box_x, field_y, box_w, 44.0));
        layout.add(UiElementId::EnterShop, Rect::new(box_x, field_y + 64.0, box_w, BUTTON_HEIGHT));
        if self.state.dialog.is_some() {
            add_dialog_layout(&mut layout);
        }
        layout
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for LoginScreen {
    fn update(&mut self, services: &ShopServices) -> ScreenState {
        self.layout = self.build_layout();
        let (hovered, clicked) = pointer(&self.layout);
        self.hovered = hovered;

        if self.state.dialog.is_some() {
            if dialog_dismissed(clicked.as_ref()) {
                self.state.dialog = None;
            }
            return ScreenState::Continue;
        }

        while let Some(c) = get_char_pressed() {
            self.state.push_char(c);
        }
        if is_key_pressed(KeyCode::Backspace) {
            self.state.backspace();
        }

        if submit_pressed() || clicked == Some(UiElementId::EnterShop) {
            if let Err(e) = self.state.submit(services) {
                log::warn!("Login blocked: {}", e);
            }
        }

        match self.state.poll() {
            Some(shop) => ScreenState::ToShop(shop),
            None => ScreenState::Continue,
        }
    }

    fn render(&self) {
        draw_backdrop();
        let sw = screen_width();
        let sh = screen_height();
        let center_x = sw / 2.0;

        draw_text_centered("MINECRAFT SHOP", center_x, sh * 0.18, FONT_TITLE, TEXT_TITLE);
        draw_text_centered("Enter your player name:", center_x, sh * 0.18 + 40.0, FONT_NORMAL, GRAY);

        let loading = self.state.is_loading();
        if let Some(field) = self.layout.bounds(&UiElementId::NameField) {
            draw_text_field(field, self.state.name(), "Player name...", !loading);
        }

        if let Some(button) = self.layout.bounds(&UiElementId::EnterShop) {
            let (label, look) = if loading {
                ("Loading...", ButtonLook::Disabled)
            } else {
                ("Enter Shop", ButtonLook::Normal)
            };
            let hovered = self.hovered == Some(UiElementId::EnterShop);
            draw_button(button, label, look, hovered);

            if loading {
                let dots = ".".repeat((get_time() * 3.0) as usize % 4);
                let status = format!("Fetching latest prices{}", dots);
                draw_text_centered(&status, center_x, button.y + button.h + 32.0, FONT_SMALL, STATUS_INFO);
            } else {
                draw_text_centered("[Enter] Enter shop", center_x, button.y + button.h + 32.0, FONT_SMALL, DARKGRAY);
            }
        }

        if let Some(dialog) = &self.state.dialog {
            draw_dialog(dialog, &self.layout, self.hovered.as_ref());
        }
    }
}

// ============================================================================
// Shop Screen
// ============================================================================

const GRID_TOP: f32 = 100.0;
/// Space below the item grid for the order controls
const CONTROLS_HEIGHT: f32 = 280.0;
const GRID_GAP: f32 = 8.0;

pub struct ShopScreen {
    state: ShopState,
    layout: UiLayout,
    hovered: Option<UiElementId>,
    scroll: f32,
}

impl ShopScreen {
    pub fn new(state: ShopState) -> Self {
        log::info!("Opening shop for {} with {} items", state.player(), state.buttons().len());
        Self {
            state,
            layout: UiLayout::new(),
            hovered: None,
            scroll: 0.0,
        }
    }

    fn grid_rect(&self) -> Rect {
        let sw = screen_width();
        let sh = screen_height();
        let bottom = (sh - CONTROLS_HEIGHT).max(GRID_TOP + ITEM_ROW_HEIGHT);
        Rect::new(PADDING, GRID_TOP, sw - 2.0 * PADDING, bottom - GRID_TOP)
    }

    fn grid_config(&self, grid: Rect) -> GridScrollConfig {
        GridScrollConfig {
            visible_height: grid.h,
            row_height: ITEM_ROW_HEIGHT,
            row_spacing: ITEM_ROW_SPACING,
            columns: ITEM_COLUMNS,
            total_items: self.state.buttons().len(),
            scroll_offset: self.scroll,
        }
    }

    fn build_layout(&self) -> UiLayout {
        let mut layout = UiLayout::new();
        let grid = self.grid_rect();
        layout.add(UiElementId::ItemScrollArea, grid);

        let config = self.grid_config(grid);
        let scroll = config.calculate().clamped_scroll;
        let cells_w = grid.w - SCROLLBAR_WIDTH - GRID_GAP;
        let cell_w = (cells_w - GRID_GAP * (ITEM_COLUMNS - 1) as f32) / ITEM_COLUMNS as f32;

        for index in 0..self.state.buttons().len() {
            let row = index / ITEM_COLUMNS;
            let col = index % ITEM_COLUMNS;
            let y = grid.y + config.row_y(row, scroll);
            // Only whole rows are shown
            if y < grid.y - 0.5 || y + ITEM_ROW_HEIGHT > grid.y + grid.h + 0.5 {
                continue;
            }
            let x = grid.x + col as f32 * (cell_w + GRID_GAP);
            layout.add(UiElementId::ItemButton(index), Rect::new(x, y, cell_w, ITEM_ROW_HEIGHT));
        }

        let x = PADDING;
        let w = screen_width() - 2.0 * PADDING;
        let mut y = grid.y + grid.h + 12.0;
        let half_w = (w - GRID_GAP) / 2.0;
        layout.add(UiElementId::RefreshPrices, Rect::new(x, y, half_w, BUTTON_HEIGHT));
        layout.add(UiElementId::OpenSettings, Rect::new(x + half_w + GRID_GAP, y, half_w, BUTTON_HEIGHT));
        // "Enter Quantity:" label sits above the field
        y += BUTTON_HEIGHT + 36.0;
        layout.add(UiElementId::QuantityField, Rect::new(x, y, w, 36.0));
        // Running total line
        y += 36.0 + 42.0;
        layout.add(UiElementId::PlaceOrder, Rect::new(x, y, w, BUTTON_HEIGHT));
        y += BUTTON_HEIGHT + 8.0;
        layout.add(UiElementId::ClearSelection, Rect::new(x, y, w, BUTTON_HEIGHT));

        if self.state.settings().is_some() {
            add_settings_layout(&mut layout);
        }
        if self.state.dialog.is_some() {
            add_dialog_layout(&mut layout);
        }
        layout
    }

    fn update_settings(&mut self, clicked: Option<UiElementId>, services: &ShopServices) -> ScreenState {
        let Some(form) = self.state.settings_mut() else {
            return ScreenState::Continue;
        };

        while let Some(c) = get_char_pressed() {
            form.push_char(c);
        }
        if is_key_pressed(KeyCode::Backspace) {
            form.backspace();
        }
        if is_key_pressed(KeyCode::Tab) {
            form.toggle_focus();
        }
        match clicked {
            Some(UiElementId::SettingsWebhookField) => form.focus = SettingsField::WebhookUrl,
            Some(UiElementId::SettingsSheetField) => form.focus = SettingsField::SheetId,
            _ => {}
        }

        if is_key_pressed(KeyCode::Escape) || clicked == Some(UiElementId::SettingsCancel) {
            self.state.cancel_settings();
        } else if submit_pressed() || clicked == Some(UiElementId::SettingsSave) {
            if let Some(config) = self.state.save_settings(&services.config, &ShopConfig::save_path()) {
                return ScreenState::Reconfigure(config);
            }
        }
        ScreenState::Continue
    }

    fn is_hovered(&self, id: &UiElementId) -> bool {
        self.hovered.as_ref() == Some(id)
    }

    fn render_items(&self) {
        for element in &self.layout.elements {
            let UiElementId::ItemButton(index) = element.id else {
                continue;
            };
            let Some(button) = self.state.buttons().get(index) else {
                continue;
            };
            let look = if self.state.is_button_selected(index) {
                ButtonLook::Selected
            } else {
                ButtonLook::Normal
            };
            draw_button(element.bounds, &button.label(), look, self.is_hovered(&element.id));
        }

        let grid = self.grid_rect();
        let scroll_state = self.grid_config(grid).calculate();
        if scroll_state.show_scrollbar {
            let track = Rect::new(grid.x + grid.w - SCROLLBAR_WIDTH, grid.y, SCROLLBAR_WIDTH, grid.h);
            draw_scrollbar(track, &scroll_state, SCROLL_TRACK, SCROLL_THUMB);
        }
    }
}

impl Screen for ShopScreen {
    fn update(&mut self, services: &ShopServices) -> ScreenState {
        self.state.poll();

        self.layout = self.build_layout();
        let (hovered, clicked) = pointer(&self.layout);
        self.hovered = hovered;

        if self.state.dialog.is_some() {
            if dialog_dismissed(clicked.as_ref()) {
                self.state.dismiss_dialog();
            }
            return ScreenState::Continue;
        }
        if self.state.settings().is_some() {
            return self.update_settings(clicked, services);
        }

        let grid = self.grid_rect();
        let (mx, my) = mouse_position();
        if grid.contains(vec2(mx, my)) {
            let max_scroll = self.grid_config(grid).calculate().max_scroll;
            self.scroll = handle_scroll(self.scroll, max_scroll, ITEM_ROW_HEIGHT + ITEM_ROW_SPACING);
        }

        // Clicking the field focuses it; clicking empty space or the grid
        // background releases it. Buttons leave focus alone.
        if is_mouse_button_pressed(MouseButton::Left) {
            match clicked {
                Some(UiElementId::QuantityField) => self.state.focus_quantity(true),
                None | Some(UiElementId::ItemScrollArea) => self.state.focus_quantity(false),
                _ => {}
            }
        }
        if is_key_pressed(KeyCode::Tab) {
            let focused = self.state.is_quantity_focused();
            self.state.focus_quantity(!focused);
        }

        while let Some(c) = get_char_pressed() {
            self.state.push_quantity_char(c);
        }
        if is_key_pressed(KeyCode::Backspace) {
            self.state.quantity_backspace();
        }
        if submit_pressed() {
            self.state.place_order(services);
        }

        match clicked {
            Some(UiElementId::ItemButton(index)) => self.state.select(index),
            Some(UiElementId::RefreshPrices) => self.state.refresh_prices(services),
            Some(UiElementId::PlaceOrder) => self.state.place_order(services),
            Some(UiElementId::ClearSelection) => self.state.clear_selection(),
            Some(UiElementId::OpenSettings) => self.state.open_settings(&services.config),
            _ => {}
        }

        ScreenState::Continue
    }

    fn render(&self) {
        draw_backdrop();
        let center_x = screen_width() / 2.0;

        draw_text_centered(&self.state.header_text(), center_x, 36.0, FONT_LARGE, TEXT_TITLE);
        draw_text_centered(&self.state.stats().summary(), center_x, 60.0, FONT_SMALL, TEXT_DIM);
        draw_text_centered("Select an item:", center_x, 88.0, FONT_NORMAL, TEXT_NORMAL);

        self.render_items();

        if let Some(refresh) = self.layout.bounds(&UiElementId::RefreshPrices) {
            let (label, look) = if self.state.is_refreshing() {
                ("Refreshing...", ButtonLook::Disabled)
            } else {
                ("Refresh Prices", ButtonLook::Normal)
            };
            draw_button(refresh, label, look, self.is_hovered(&UiElementId::RefreshPrices));
        }
        if let Some(settings) = self.layout.bounds(&UiElementId::OpenSettings) {
            draw_button(settings, "Settings", ButtonLook::Normal, self.is_hovered(&UiElementId::OpenSettings));
        }

        if let Some(field) = self.layout.bounds(&UiElementId::QuantityField) {
            draw_text_centered("Enter Quantity:", center_x, field.y - 10.0, FONT_NORMAL, TEXT_NORMAL);
            let focused = self.state.is_quantity_focused() && self.state.dialog.is_none() && self.state.settings().is_none();
            draw_text_field(field, &self.state.selection.quantity_text, "0", focused);
            draw_text_centered(&self.state.total_text(), center_x, field.y + field.h + 28.0, FONT_NORMAL, TEXT_TOTAL);
        }

        if let Some(place) = self.layout.bounds(&UiElementId::PlaceOrder) {
            let (label, look) = if self.state.is_ordering() {
                ("Placing order...", ButtonLook::Disabled)
            } else {
                ("Place Order", ButtonLook::Normal)
            };
            draw_button(place, label, look, self.is_hovered(&UiElementId::PlaceOrder));
        }

        if let Some(clear) = self.layout.bounds(&UiElementId::ClearSelection) {
            draw_button(clear, "Clear Selection", ButtonLook::Normal, self.is_hovered(&UiElementId::ClearSelection));

            if let Some(status) = &self.state.status {
                let max_w = screen_width() - 2.0 * PADDING;
                let mut y = clear.y + clear.h + 24.0;
                for line in wrap_lines(&status.text, max_w, FONT_SMALL) {
                    draw_text_centered(&line, center_x, y, FONT_SMALL, status_color(status.kind));
                    y += FONT_SMALL + 2.0;
                }
            }
        }

        if let Some(form) = self.state.settings() {
            draw_settings(form, &self.layout, self.hovered.as_ref());
        }
        if let Some(dialog) = &self.state.dialog {
            draw_dialog(dialog, &self.layout, self.hovered.as_ref());
        }
    }
}
