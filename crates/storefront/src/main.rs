//! # Storefront
//!
//! Incrementally built product pages with an add-to-cart flow, on top of the page framework.
//!
//! ## 🚀 Core Components
//!
//! - **[page_framework]**: The generic [`PageActor`](page_framework::PageActor) that decides when a page is built, served stale, or rebuilt.
//! - **[model]**: Pure data structures ([`Product`], [`ContentDocument`], [`PageViewModel`]).
//! - **[page]**: The [`PageEntity`](page_framework::PageEntity) implementation that merges catalog and content.
//! - **[cart]**: The [`CartController`] driving the add-to-cart notification.
//! - **[lifecycle]**: The [`Storefront`] system that wires everything together.
//!
//! ## 📚 Commands
//!
//! ```text
//! storefront [--config storefront.toml] paths        # every prebuilt product path
//! storefront [--config storefront.toml] render <id>  # status, title and HTML of one page
//! storefront demo                                     # in-memory walkthrough
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use page_framework::tracing::setup_tracing;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storefront::cart::{CartController, MemoryCart, TracingToaster};
use storefront::catalog::Catalog;
use storefront::config::{StorefrontConfig, CONFIG_FILE};
use storefront::content::MemoryContentSource;
use storefront::lifecycle::Storefront;
use storefront::model::{ContentDocument, PageViewModel, Product};
use storefront::route::PREFIX;
use tracing::{info, warn, Instrument};

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Product pages and cart for a static storefront")]
struct Cli {
    /// Path to the config file.
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the product paths built ahead of time.
    Paths,
    /// Build and print one product page.
    Render { id: String },
    /// Run an in-memory walkthrough of page resolution and the cart flow.
    Demo,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Paths => paths(&load_config(&cli.config)?).await,
        Command::Render { id } => render(&load_config(&cli.config)?, &id).await,
        Command::Demo => demo().await,
    }
}

fn load_config(path: &Path) -> anyhow::Result<StorefrontConfig> {
    if !path.exists() && path.as_os_str() == CONFIG_FILE {
        warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(StorefrontConfig::default());
    }
    StorefrontConfig::load(path).with_context(|| format!("loading {}", path.display()))
}

async fn paths(config: &StorefrontConfig) -> anyhow::Result<()> {
    let storefront = Storefront::from_config(config).context("starting storefront")?;

    for id in storefront.pages.sorted_paths().await? {
        println!("{PREFIX}{id}");
    }

    storefront.shutdown().await;
    Ok(())
}

async fn render(config: &StorefrontConfig, id: &str) -> anyhow::Result<()> {
    let storefront = Storefront::from_config(config).context("starting storefront")?;

    let built = storefront.pages.prebuild().await?;
    info!(built, "Pages prebuilt");

    let response = storefront
        .handle("GET", &format!("{PREFIX}{id}"))
        .await?;
    println!("{} {}", response.status, response.title);
    println!();
    print!("{}", response.body);

    storefront.shutdown().await;
    Ok(())
}

async fn demo() -> anyhow::Result<()> {
    info!("Starting storefront demo");

    let catalog = Catalog::from_products(vec![
        Product::new("sku-1", "Mug", 1200, "usd").with_image("/img/mug.png"),
        Product::new("sku-2", "Tote", 2400, "eur"),
    ])?;
    let content = Arc::new(MemoryContentSource::new().with_document(
        "sku-1.md",
        ContentDocument::new("sku-1", "A sturdy **stoneware** mug."),
    ));
    let cart = Arc::new(MemoryCart::with_count(2));

    let config = StorefrontConfig::default();
    let storefront = Storefront::new(catalog, content, cart.clone(), &config);

    // Page resolution: fallback first, then the built page, then a miss
    let span = tracing::info_span!("page_resolution");
    async {
        let first = storefront.handle("GET", "/products/sku-1").await?;
        info!(status = first.status, title = %first.title, "First request");

        storefront.pages.page_blocking("sku-1".into()).await?;
        let second = storefront.handle("GET", "/products/sku-1").await?;
        info!(status = second.status, title = %second.title, "Second request");

        let missing = storefront.handle("GET", "/products/sku-404").await?;
        info!(status = missing.status, "Unknown product");
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;

    // Cart flow: the cart holds 2 items, add 3 more
    let span = tracing::info_span!("add_to_cart");
    async {
        let page: PageViewModel = storefront
            .pages
            .page_blocking("sku-1".into())
            .await?
            .into_page()
            .context("sku-1 should be ready")?;

        let mut controller =
            CartController::mount(page.product, cart.clone(), Arc::new(TracingToaster::new()))
                .with_add_timeout(Some(Duration::from_secs(5)));
        controller.increment_quantity();
        controller.increment_quantity();

        let request = controller.submit_add().await?;
        let state = controller.next_change().await?;
        info!(%request, ?state, count = cart.count(), "Add finished");
        controller.leave();
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;

    storefront.shutdown().await;
    info!("Demo completed successfully");
    Ok(())
}
