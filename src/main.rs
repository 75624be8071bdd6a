use macroquad::prelude::*;

use block_shop::app::{window_conf, AppState, ShopServices};
use block_shop::config::ShopConfig;
use block_shop::ui::{LoginScreen, Screen, ScreenState, ShopScreen};

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Set panic hook to capture crash info
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        if let Some(location) = panic_info.location() {
            eprintln!("  at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    let config = ShopConfig::load();
    let mut services = ShopServices::from_config(&config);
    log::info!("Orders are logged to {}", services.orders.log_path().display());

    let mut app_state = AppState::Login(LoginScreen::new());

    loop {
        match &mut app_state {
            AppState::Login(screen) => {
                let result = screen.update(&services);
                screen.render();

                if let ScreenState::ToShop(shop) = result {
                    app_state = AppState::Shop(ShopScreen::new(shop));
                }
            }
            AppState::Shop(screen) => {
                let result = screen.update(&services);
                screen.render();

                if let ScreenState::Reconfigure(config) = result {
                    log::info!("Settings changed, reconnecting to price sheet {}", config.sheet_id);
                    services = ShopServices::from_config(&config);
                }
            }
        }

        next_frame().await;
    }
}
