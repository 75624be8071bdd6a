//! Drawing helpers shared by the login and shop screens

use macroquad::prelude::*;

use super::layout::{UiElementId, UiLayout};
use super::state::{Dialog, DialogKind, SettingsField, SettingsForm, StatusKind};
use super::theme::*;

pub fn text_width(text: &str, font_size: f32) -> f32 {
    measure_text(text, None, font_size as u16, 1.0).width
}

pub fn draw_text_centered(text: &str, center_x: f32, y: f32, font_size: f32, color: Color) {
    let x = center_x - text_width(text, font_size) / 2.0;
    draw_text(text, x.floor(), y.floor(), font_size, color);
}

pub fn draw_backdrop() {
    let sw = screen_width();
    let sh = screen_height();
    clear_background(BACKGROUND);
    for i in 0..24 {
        draw_line(0.0, i as f32 * 40.0, sw, i as f32 * 40.0, 1.0, GRID_LINE);
        draw_line(i as f32 * 70.0, 0.0, i as f32 * 70.0, sh, 1.0, GRID_LINE);
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum ButtonLook {
    Normal,
    Selected,
    Disabled,
}

pub fn draw_button(bounds: Rect, label: &str, look: ButtonLook, hovered: bool) {
    let (bg, border, text) = match look {
        ButtonLook::Selected => (ITEM_SELECTED_BG, ITEM_SELECTED_BORDER, WHITE),
        ButtonLook::Disabled => (BUTTON_DISABLED_BG, BUTTON_BORDER, TEXT_DIM),
        ButtonLook::Normal if hovered => (BUTTON_HOVER_BG, BUTTON_HOVER_BORDER, TEXT_NORMAL),
        ButtonLook::Normal => (BUTTON_BG, BUTTON_BORDER, TEXT_NORMAL),
    };

    draw_rectangle(bounds.x, bounds.y, bounds.w, bounds.h, border);
    draw_rectangle(bounds.x + 1.0, bounds.y + 1.0, bounds.w - 2.0, bounds.h - 2.0, bg);
    draw_text_centered(
        label,
        bounds.x + bounds.w / 2.0,
        bounds.y + bounds.h / 2.0 + FONT_NORMAL / 3.0,
        FONT_NORMAL,
        text,
    );
}

/// Single-line text field; `placeholder` shows while empty and unfocused
pub fn draw_text_field(bounds: Rect, text: &str, placeholder: &str, focused: bool) {
    let bg = if focused { FIELD_BG_ACTIVE } else { FIELD_BG };
    draw_rectangle(bounds.x, bounds.y, bounds.w, bounds.h, bg);
    draw_rectangle_lines(bounds.x, bounds.y, bounds.w, bounds.h, 2.0, if focused { WHITE } else { GRAY });

    let text_y = bounds.y + bounds.h / 2.0 + FONT_NORMAL / 3.0;
    if text.is_empty() && !focused {
        draw_text(placeholder, bounds.x + 10.0, text_y, FONT_NORMAL, DARKGRAY);
        return;
    }

    let cursor = if focused && (get_time() * 2.0) as i64 % 2 == 0 { "|" } else { "" };
    let shown = visible_tail(text, bounds.w - 24.0, FONT_NORMAL);
    draw_text(&format!("{}{}", shown, cursor), bounds.x + 10.0, text_y, FONT_NORMAL, WHITE);
}

/// Longest suffix of `text` that fits in `max_width`, so the end being typed
/// stays visible
fn visible_tail(text: &str, max_width: f32, font_size: f32) -> &str {
    let mut start = 0;
    let mut chars = text.char_indices();
    while text_width(&text[start..], font_size) > max_width {
        match chars.next() {
            Some((_, c)) => start += c.len_utf8(),
            None => break,
        }
    }
    &text[start..]
}

pub fn status_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Info => STATUS_INFO,
        StatusKind::Success => STATUS_SUCCESS,
        StatusKind::Warning => STATUS_WARNING,
    }
}

/// Greedy word wrap against the default font
pub fn wrap_lines(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    wrap_measured(text, max_width, |line| text_width(line, font_size))
}

fn wrap_measured(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if !line.is_empty() && measure(&candidate) > max_width {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    lines
}

const DIALOG_WIDTH: f32 = 320.0;
const DIALOG_HEIGHT: f32 = 170.0;

fn dialog_rect() -> Rect {
    let sw = screen_width();
    let sh = screen_height();
    let w = DIALOG_WIDTH.min(sw - 2.0 * PADDING);
    Rect::new(((sw - w) / 2.0).floor(), ((sh - DIALOG_HEIGHT) / 2.0).floor(), w, DIALOG_HEIGHT)
}

/// Register the dialog's OK button; added last so it wins hit tests
pub fn add_dialog_layout(layout: &mut UiLayout) {
    let rect = dialog_rect();
    let ok = Rect::new(rect.x + (rect.w - 100.0) / 2.0, rect.y + rect.h - BUTTON_HEIGHT - 14.0, 100.0, BUTTON_HEIGHT);
    layout.add(UiElementId::DialogOk, ok);
}

/// Whether this frame's input closes the open dialog
pub fn dialog_dismissed(clicked: Option<&UiElementId>) -> bool {
    // Typed characters belong to nothing while a dialog is up
    while get_char_pressed().is_some() {}

    clicked == Some(&UiElementId::DialogOk)
        || is_key_pressed(KeyCode::Enter)
        || is_key_pressed(KeyCode::KpEnter)
        || is_key_pressed(KeyCode::Escape)
}

pub fn draw_dialog(dialog: &Dialog, layout: &UiLayout, hovered: Option<&UiElementId>) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), OVERLAY);

    let rect = dialog_rect();
    draw_rectangle(rect.x - 2.0, rect.y - 2.0, rect.w + 4.0, rect.h + 4.0, DIALOG_FRAME);
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, DIALOG_BG);

    let title_color = match dialog.kind {
        DialogKind::Info => TEXT_TITLE,
        DialogKind::Error => TEXT_ERROR,
    };
    let center_x = rect.x + rect.w / 2.0;
    draw_text_centered(&dialog.title, center_x, rect.y + 32.0, FONT_LARGE, title_color);

    let mut y = rect.y + 64.0;
    for line in wrap_lines(&dialog.message, rect.w - 2.0 * PADDING, FONT_NORMAL) {
        draw_text_centered(&line, center_x, y, FONT_NORMAL, TEXT_NORMAL);
        y += FONT_NORMAL + 4.0;
    }

    if let Some(ok) = layout.bounds(&UiElementId::DialogOk) {
        let hovered = hovered == Some(&UiElementId::DialogOk);
        draw_button(ok, "OK", ButtonLook::Normal, hovered);
    }
}

const SETTINGS_WIDTH: f32 = 380.0;
const SETTINGS_HEIGHT: f32 = 300.0;

fn settings_rect() -> Rect {
    let sw = screen_width();
    let sh = screen_height();
    let w = SETTINGS_WIDTH.min(sw - 2.0 * PADDING);
    Rect::new(((sw - w) / 2.0).floor(), ((sh - SETTINGS_HEIGHT) / 2.0).floor(), w, SETTINGS_HEIGHT)
}

/// Register the settings panel's fields and buttons on top of the shop
pub fn add_settings_layout(layout: &mut UiLayout) {
    let rect = settings_rect();
    let field_w = rect.w - 2.0 * PADDING;
    layout.add(UiElementId::SettingsWebhookField, Rect::new(rect.x + PADDING, rect.y + 78.0, field_w, 36.0));
    layout.add(UiElementId::SettingsSheetField, Rect::new(rect.x + PADDING, rect.y + 152.0, field_w, 36.0));

    let button_y = rect.y + rect.h - BUTTON_HEIGHT - 14.0;
    let center_x = rect.x + rect.w / 2.0;
    layout.add(UiElementId::SettingsSave, Rect::new(center_x - 108.0, button_y, 100.0, BUTTON_HEIGHT));
    layout.add(UiElementId::SettingsCancel, Rect::new(center_x + 8.0, button_y, 100.0, BUTTON_HEIGHT));
}

pub fn draw_settings(form: &SettingsForm, layout: &UiLayout, hovered: Option<&UiElementId>) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), OVERLAY);

    let rect = settings_rect();
    draw_rectangle(rect.x - 2.0, rect.y - 2.0, rect.w + 4.0, rect.h + 4.0, DIALOG_FRAME);
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, DIALOG_BG);
    draw_text_centered("Settings", rect.x + rect.w / 2.0, rect.y + 32.0, FONT_LARGE, TEXT_TITLE);

    let fields = [
        (UiElementId::SettingsWebhookField, "Webhook URL (empty = off):", &form.webhook_url, SettingsField::WebhookUrl),
        (UiElementId::SettingsSheetField, "Price sheet ID:", &form.sheet_id, SettingsField::SheetId),
    ];
    for (id, label, value, field) in fields {
        if let Some(bounds) = layout.bounds(&id) {
            draw_text(label, bounds.x, bounds.y - 8.0, FONT_SMALL, TEXT_NORMAL);
            draw_text_field(bounds, value, "", form.focus == field);
        }
    }

    if let Some(error) = &form.error {
        let mut y = rect.y + 214.0;
        for line in wrap_lines(error, rect.w - 2.0 * PADDING, FONT_SMALL) {
            draw_text_centered(&line, rect.x + rect.w / 2.0, y, FONT_SMALL, TEXT_ERROR);
            y += FONT_SMALL + 2.0;
        }
    }

    for (id, label) in [(UiElementId::SettingsSave, "Save"), (UiElementId::SettingsCancel, "Cancel")] {
        if let Some(bounds) = layout.bounds(&id) {
            draw_button(bounds, label, ButtonLook::Normal, hovered == Some(&id));
        }
    }
}
