//! Print the menu and the current cart for this shell's session

use anyhow::Context;
use lakay_client::StorefrontApi;
use lakay_shop::{
    CartStore, CartView, FileSessionStorage, MenuView, SessionProvider, ShopConfig, ViewScope,
    logger,
};
use shared::money;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ShopConfig::from_env();
    logger::init_logger_with_file(&config.log_level, Some(config.log_dir().as_path()));

    let storage = FileSessionStorage::new(config.work_dir.clone());
    let session = SessionProvider::load(&storage).context("Failed to load session id")?;
    tracing::info!(session_id = %session, base_url = %config.api_base_url, "Starting");

    let http = config
        .client_config()
        .build_http_client()
        .context("Failed to build HTTP client")?;
    let api = StorefrontApi::new(http);
    let cart = CartStore::new();
    let root = ViewScope::new();

    let shutdown = root.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.cancel();
        }
    });

    let mut menu = MenuView::new(api.clone(), cart.clone(), session.clone(), root.child());
    match menu.load().await.map(|_| ()) {
        Ok(()) => {
            println!("Menu");
            for dish in menu.dishes() {
                println!("  #{:<3} {:<24} {:>8}", dish.id, dish.name, money::format(dish.price));
            }
        }
        Err(e) => println!("{}", menu.error().unwrap_or(&e.to_string())),
    }

    let mut cart_view = CartView::new(api, cart, session, root.child());
    match cart_view.mount().await {
        Ok(()) => {
            println!("\nCart ({})", cart_view.session());
            for item in cart_view.items() {
                println!(
                    "  {:<24} x{:<3} {:>8}",
                    item.name,
                    item.quantity,
                    money::format(item.line_total())
                );
            }
            println!("  {}", cart_view.totals().summary());
        }
        Err(e) => println!("{}", cart_view.error().unwrap_or(&e.to_string())),
    }

    root.cancel();
    Ok(())
}
