use std::net::SocketAddr;

/// How product detail pages are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Resolve the document on every request. No caching, no staleness.
    OnRequest,
    /// Build a page on its first request, then serve the cached copy
    /// indefinitely.
    BlockingFallback,
    /// Pre-build enumerated slugs at startup and refresh cached pages in
    /// the background once they pass the configured age.
    Revalidate,
}

impl std::fmt::Display for RenderStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderStrategy::OnRequest => write!(f, "on-request"),
            RenderStrategy::BlockingFallback => write!(f, "blocking-fallback"),
            RenderStrategy::Revalidate => write!(f, "revalidate"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub cms_api_url: String,
    pub cms_access_token: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub render_strategy: RenderStrategy,
    pub listing_page_size: u32,
    pub prebuild_page_size: u32,
    pub revalidate_secs: u64,
    pub cms_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("cms_api_url", &self.cms_api_url)
            .field("cms_access_token", &"[redacted]")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("render_strategy", &self.render_strategy)
            .field("listing_page_size", &self.listing_page_size)
            .field("prebuild_page_size", &self.prebuild_page_size)
            .field("revalidate_secs", &self.revalidate_secs)
            .field("cms_timeout_secs", &self.cms_timeout_secs)
            .finish()
    }
}
