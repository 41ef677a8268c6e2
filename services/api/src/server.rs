use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryCraftsmanStore, InMemoryDraftStore, InMemoryLikeStore, InMemoryListingStore,
    InMemoryMediaStore, InMemoryUserDirectory, InMemoryWishlistStore,
};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use homefinder::config::AppConfig;
use homefinder::error::AppError;
use homefinder::marketplace::craftsmen::CraftsmanService;
use homefinder::marketplace::engagement::EngagementService;
use homefinder::marketplace::listings::{ListingPolicy, ListingService};
use homefinder::marketplace::moderation::ModerationQueue;
use homefinder::marketplace::sweeper;
use homefinder::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let listing_store = Arc::new(InMemoryListingStore::default());
    let draft_store = Arc::new(InMemoryDraftStore::default());
    let directory = Arc::new(InMemoryUserDirectory::default());

    let listing_service = Arc::new(ListingService::new(
        listing_store.clone(),
        draft_store.clone(),
        Arc::new(InMemoryMediaStore::default()),
        ListingPolicy {
            expiration_days: config.listings.expiration_days,
        },
    ));
    let engagement_service = Arc::new(EngagementService::new(
        Arc::new(InMemoryWishlistStore::default()),
        Arc::new(InMemoryLikeStore::default()),
        listing_store.clone(),
    ));
    let craftsman_service = Arc::new(CraftsmanService::new(Arc::new(
        InMemoryCraftsmanStore::default(),
    )));
    let moderation_queue = Arc::new(ModerationQueue::new(directory, listing_store, draft_store));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(sweeper::run(
        listing_service.clone(),
        config.listings.sweep_interval,
        shutdown_rx,
    ));

    let app = with_marketplace_routes(
        listing_service,
        engagement_service,
        craftsman_service,
        moderation_queue,
    )
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "marketplace service ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await?;
    Ok(())
}

/// Resolves on ctrl-c and tells the sweep loop to stop alongside the server.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
    let _ = shutdown_tx.send(true);
}
