use async_trait::async_trait;
use page_framework::{FallbackMode, PageActorConfig, PageClient, PageClientExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use storefront::catalog::Catalog;
use storefront::clients::PageService;
use storefront::content::{ContentError, ContentSource, MemoryContentSource};
use storefront::model::{ContentDocument, PageViewModel, Product, ProductId};
use storefront::page::{self, ContentFailurePolicy, PageContext};

// --- Helpers ---

fn catalog() -> Arc<Catalog> {
    Arc::new(
        Catalog::from_products(vec![
            Product::new("sku-1", "Mug", 1200, "usd"),
            Product::new("sku-2", "Tote", 2400, "usd"),
        ])
        .unwrap(),
    )
}

/// Starts a page actor and returns the domain service plus a raw client for inspection.
fn start(context: PageContext, config: PageActorConfig) -> (PageService, PageClient<PageViewModel>) {
    let (actor, client) = page::new(config);
    tokio::spawn(actor.run(context));
    (PageService::new(client.clone()), client)
}

async fn settle(client: &PageClient<PageViewModel>, id: &str) {
    loop {
        let info = client.inspect(ProductId::from(id)).await.unwrap();
        if info.is_some_and(|info| info.in_flight == 0) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}

struct Offline;

#[async_trait]
impl ContentSource for Offline {
    async fn fetch(&self, _: &str) -> Result<ContentDocument, ContentError> {
        Err(ContentError::Unavailable(std::io::Error::other(
            "connection refused",
        )))
    }
}

/// Serves from memory until switched offline.
struct Switchable {
    documents: MemoryContentSource,
    offline: AtomicBool,
}

#[async_trait]
impl ContentSource for Switchable {
    async fn fetch(&self, relative_path: &str) -> Result<ContentDocument, ContentError> {
        if self.offline.load(Ordering::SeqCst) {
            return Offline.fetch(relative_path).await;
        }
        self.documents.fetch(relative_path).await
    }
}

// --- Tests ---

#[tokio::test]
async fn test_known_id_falls_back_then_becomes_ready() {
    let context = PageContext::new(catalog(), Arc::new(MemoryContentSource::new()));
    let (pages, client) = start(context, PageActorConfig::default());

    assert!(pages.page("sku-1".into()).await.unwrap().is_fallback());

    settle(&client, "sku-1").await;
    let page = pages.page("sku-1".into()).await.unwrap().into_page().unwrap();
    assert_eq!(page.product.name, "Mug");
    assert_eq!(page.product.price, 1200);
    assert!(page.description().is_empty());
}

#[tokio::test]
async fn test_catalog_miss_is_not_found_regardless_of_content() {
    let content = MemoryContentSource::new()
        .with_document("sku-404.md", ContentDocument::new("sku-404", "orphan"));
    let context = PageContext::new(catalog(), Arc::new(content));
    let (pages, client) = start(context, PageActorConfig::default());

    assert!(pages.page("sku-404".into()).await.unwrap().is_not_found());
    assert!(pages
        .page_blocking("sku-404".into())
        .await
        .unwrap()
        .is_not_found());
    assert_eq!(client.inspect("sku-404".into()).await.unwrap(), None);
    assert_eq!(pages.revalidate("sku-404".into()).await.unwrap(), None);
}

#[tokio::test]
async fn test_known_paths_are_catalog_ids() {
    let context = PageContext::new(catalog(), Arc::new(MemoryContentSource::new()));
    let (pages, _client) = start(context, PageActorConfig::default());

    let paths = pages.known_paths().await.unwrap();
    assert_eq!(paths.len(), 2);
    assert_eq!(
        pages.sorted_paths().await.unwrap(),
        vec![ProductId::from("sku-1"), ProductId::from("sku-2")]
    );
    assert_eq!(pages.prebuild().await.unwrap(), 2);
    assert!(pages.page("sku-2".into()).await.unwrap().is_ready());
}

#[tokio::test]
async fn test_blocking_fallback_mode() {
    let content = MemoryContentSource::new()
        .with_document("sku-1.md", ContentDocument::new("sku-1", "Holds coffee."));
    let context = PageContext::new(catalog(), Arc::new(content));
    let config = PageActorConfig {
        fallback: FallbackMode::Blocking,
        ..PageActorConfig::default()
    };
    let (pages, _client) = start(context, config);

    let page = pages.page("sku-1".into()).await.unwrap().into_page().unwrap();
    assert_eq!(page.description().markdown, "Holds coffee.");
}

#[tokio::test]
async fn test_content_outage_degrades_to_product_only() {
    let context = PageContext::new(catalog(), Arc::new(Offline));
    let (pages, _client) = start(context, PageActorConfig::default());

    let page = pages
        .page_blocking("sku-1".into())
        .await
        .unwrap()
        .into_page()
        .unwrap();
    assert_eq!(page.product.name, "Mug");
    assert!(page.content.is_none());
}

#[tokio::test]
async fn test_content_outage_with_not_found_policy() {
    let context = PageContext::new(catalog(), Arc::new(Offline))
        .with_failure_policy(ContentFailurePolicy::NotFound);
    let (pages, _client) = start(context, PageActorConfig::default());

    assert!(pages
        .page_blocking("sku-1".into())
        .await
        .unwrap()
        .is_not_found());
}

#[tokio::test(start_paused = true)]
async fn test_content_edit_is_served_after_revalidation() {
    let content = Arc::new(
        MemoryContentSource::new()
            .with_document("sku-1.md", ContentDocument::new("sku-1", "first")),
    );
    let context = PageContext::new(catalog(), content.clone());
    let (pages, client) = start(context, PageActorConfig::default());
    pages.prebuild().await.unwrap();

    content
        .insert("sku-1.md", ContentDocument::new("sku-1", "second"))
        .unwrap();

    // Still fresh: the edit is not visible yet.
    let page = pages.page("sku-1".into()).await.unwrap().into_page().unwrap();
    assert_eq!(page.description().markdown, "first");

    tokio::time::advance(Duration::from_millis(1500)).await;

    // Stale: served immediately, refreshed in the background.
    let page = pages.page("sku-1".into()).await.unwrap().into_page().unwrap();
    assert_eq!(page.description().markdown, "first");

    settle(&client, "sku-1").await;
    let page = pages.page("sku-1".into()).await.unwrap().into_page().unwrap();
    assert_eq!(page.description().markdown, "second");
}

#[tokio::test]
async fn test_on_demand_revalidate() {
    let content = Arc::new(MemoryContentSource::new());
    let context = PageContext::new(catalog(), content.clone());
    let (pages, client) = start(context, PageActorConfig::default());
    pages.prebuild().await.unwrap();

    content
        .insert("sku-2.md", ContentDocument::new("sku-2", "Canvas tote."))
        .unwrap();
    let ticket = pages.revalidate("sku-2".into()).await.unwrap();
    assert!(ticket.is_some());

    settle(&client, "sku-2").await;
    let page = pages.page("sku-2".into()).await.unwrap().into_page().unwrap();
    assert_eq!(page.description().markdown, "Canvas tote.");
}

#[tokio::test(start_paused = true)]
async fn test_outage_during_refresh_keeps_described_page() {
    let content = Arc::new(Switchable {
        documents: MemoryContentSource::new()
            .with_document("sku-1.md", ContentDocument::new("sku-1", "Holds coffee.")),
        offline: AtomicBool::new(false),
    });
    let context = PageContext::new(catalog(), content.clone());
    let (pages, client) = start(context, PageActorConfig::default());
    pages.prebuild().await.unwrap();

    content.offline.store(true, Ordering::SeqCst);
    tokio::time::advance(Duration::from_millis(1500)).await;
    pages.page("sku-1".into()).await.unwrap();
    settle(&client, "sku-1").await;

    let page = pages.page("sku-1".into()).await.unwrap().into_page().unwrap();
    assert_eq!(page.description().markdown, "Holds coffee.");

    // Back online: the next refresh applies again.
    content.offline.store(false, Ordering::SeqCst);
    content
        .documents
        .insert("sku-1.md", ContentDocument::new("sku-1", "Holds tea."))
        .unwrap();
    assert!(pages.revalidate("sku-1".into()).await.unwrap().is_some());
    settle(&client, "sku-1").await;

    let page = pages.page("sku-1".into()).await.unwrap().into_page().unwrap();
    assert_eq!(page.description().markdown, "Holds tea.");
}
