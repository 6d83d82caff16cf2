//! Catalog listing and product detail commands.

use shopkeeper_client::{ClientConfig, ConfigError, Controller};

use crate::console::ConsoleNotifier;

async fn start() -> Result<Controller<ConsoleNotifier>, ConfigError> {
    let config = ClientConfig::from_env()?;
    let mut controller = Controller::from_config(&config, ConsoleNotifier);
    controller.startup().await;
    Ok(controller)
}

/// Print the catalog as a table.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), ConfigError> {
    let controller = start().await?;

    if !controller.is_authenticated() {
        println!("Not signed in. Run `shopkeeper login` first.");
        return Ok(());
    }

    let catalog = controller.catalog();
    if catalog.is_empty() {
        println!("No products yet.");
        return Ok(());
    }

    println!(
        "{:<24} {:>10} {:>10}  {:<8} {}",
        "ID", "ORIGIN", "PRICE", "ENABLED", "TITLE"
    );
    let mut products: Vec<_> = catalog.products().values().collect();
    products.sort_by(|a, b| a.title.cmp(&b.title));
    for product in products {
        println!(
            "{:<24} {:>10} {:>10}  {:<8} {}",
            product.id,
            product.origin_price,
            product.price,
            if product.is_enabled { "yes" } else { "no" },
            product.title
        );
    }
    Ok(())
}

/// Print the detail card for a single product.
#[allow(clippy::print_stdout)]
pub async fn show(id: &str) -> Result<(), ConfigError> {
    let mut controller = start().await?;

    if !controller.is_authenticated() {
        println!("Not signed in. Run `shopkeeper login` first.");
        return Ok(());
    }

    controller.select(id);
    let Some(product) = controller.catalog().selected_product() else {
        println!("No product with id {id} in the current catalog.");
        return Ok(());
    };

    println!("{} [{}]", product.title, product.category);
    println!("  description: {}", product.description);
    println!("  content:     {}", product.content);
    println!("  price:       {} (was {})", product.price, product.origin_price);
    println!("  enabled:     {}", if product.is_enabled { "yes" } else { "no" });
    println!("  image:       {}", product.image_url);
    for url in &product.images_url {
        println!("  more:        {url}");
    }
    Ok(())
}
