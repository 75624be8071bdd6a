mod screens;
pub mod layout;
pub mod scroll;
pub mod state;
pub mod theme;
mod widgets;

pub use screens::{Screen, ScreenState, LoginScreen, ShopScreen};
pub use layout::{UiElementId, UiElement, UiLayout};
pub use state::{
    Dialog, DialogKind, ItemButton, LoginError, LoginState, SettingsError, SettingsField, SettingsForm, ShopState,
    StatusKind, StatusLine,
};
