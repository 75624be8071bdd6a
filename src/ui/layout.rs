use macroquad::prelude::{Rect, Vec2};

/// Identifier for a clickable UI element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiElementId {
    // Login
    NameField,
    EnterShop,

    // Shop
    ItemButton(usize), // index into the shop's buttons
    ItemScrollArea,
    QuantityField,
    RefreshPrices,
    PlaceOrder,
    ClearSelection,
    OpenSettings,

    // Settings panel
    SettingsWebhookField,
    SettingsSheetField,
    SettingsSave,
    SettingsCancel,

    // Modal
    DialogOk,
}

/// A single interactive UI element with its bounds
pub struct UiElement {
    pub id: UiElementId,
    pub bounds: Rect,
}

/// Layout for all interactive elements in the current frame
#[derive(Default)]
pub struct UiLayout {
    pub elements: Vec<UiElement>,
}

impl UiLayout {
    pub fn new() -> Self {
        Self {
            elements: Vec::with_capacity(16),
        }
    }

    pub fn add(&mut self, id: UiElementId, bounds: Rect) {
        self.elements.push(UiElement { id, bounds });
    }

    pub fn bounds(&self, id: &UiElementId) -> Option<Rect> {
        self.elements.iter().find(|e| &e.id == id).map(|e| e.bounds)
    }

    /// Find element at mouse position (topmost - iterate in reverse)
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&UiElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.bounds.contains(Vec2::new(x, y)))
            .map(|e| &e.id)
    }
}
