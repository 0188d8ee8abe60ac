mod render;
mod shipping;
mod site;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use vitrine_catalog::{DetailResolver, ListingPaginator, PageMode, ProductPages};
use vitrine_cms::CmsClient;
use vitrine_core::RenderStrategy;

use crate::site::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = vitrine_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = Arc::new(CmsClient::new(
        &config.cms_api_url,
        &config.cms_access_token,
        config.cms_timeout_secs,
    )?);
    let paginator = ListingPaginator::new(Arc::clone(&client), config.listing_page_size);
    let resolver = DetailResolver::new(client);

    let mode = match config.render_strategy {
        RenderStrategy::OnRequest => PageMode::OnRequest,
        RenderStrategy::BlockingFallback => PageMode::BlockingFallback,
        RenderStrategy::Revalidate => PageMode::Revalidate {
            interval: Duration::from_secs(config.revalidate_secs),
        },
    };
    let pages = ProductPages::new(resolver.clone(), mode);

    // Timed revalidation builds every known page up front, the way the
    // listing enumeration feeds a static prebuild. A failure here is a
    // startup failure.
    if matches!(config.render_strategy, RenderStrategy::Revalidate) {
        let slugs = resolver.enumerate_slugs(config.prebuild_page_size).await?;
        tracing::info!(count = slugs.len(), "prebuilding product pages");
        pages.prebuild(&slugs).await?;
    }

    let app = build_app(AppState { paginator, pages });

    tracing::info!(
        addr = %config.bind_addr,
        strategy = %config.render_strategy,
        "storefront listening"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
