//! Detail-page generation strategies.
//!
//! [`ProductPages`] puts one of three modes in front of the resolver. A
//! cached page moves through `Unbuilt -> Building -> Served(fresh)` and,
//! under timed revalidation, loops `Served(stale, revalidating) ->
//! Served(fresh)`; a failed refresh drops back to `Served(stale)` and the
//! next stale hit claims the token again. A failed first build caches
//! nothing and discards its slot, so missed slugs never pin a map entry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use vitrine_core::Product;

use crate::detail::DetailResolver;
use crate::error::CatalogError;

/// How detail pages are produced from the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Resolve on every request. Always current, never cached.
    OnRequest,
    /// Build a page on its first request, behind a per-slug lock, then
    /// serve the cached copy indefinitely.
    BlockingFallback,
    /// Like `BlockingFallback`, but entries older than `interval` are
    /// served stale while a background task rebuilds them.
    Revalidate { interval: Duration },
}

/// Cache slot for one slug.
struct PageSlot {
    /// Serialises first builds so concurrent misses resolve once.
    build_lock: Mutex<()>,
    state: Mutex<SlotState>,
}

enum SlotState {
    Unbuilt,
    Served {
        product: Arc<Product>,
        built_at: Instant,
        /// A refresh task is in flight. At most one per slot; the flag is
        /// claimed by the request that notices staleness and released when
        /// the task finishes.
        revalidating: bool,
    },
}

/// Serves product detail pages according to the configured [`PageMode`].
///
/// Cheap to clone; clones share the page cache.
#[derive(Clone)]
pub struct ProductPages {
    resolver: DetailResolver,
    mode: PageMode,
    slots: Arc<Mutex<HashMap<String, Arc<PageSlot>>>>,
}

impl ProductPages {
    #[must_use]
    pub fn new(resolver: DetailResolver, mode: PageMode) -> Self {
        Self {
            resolver,
            mode,
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Produces the product for `slug` per the configured mode.
    ///
    /// Under the cached modes a stale entry is returned immediately; the
    /// refresh happens out of band and a failed refresh keeps the entry
    /// as served.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] when no document carries that uid.
    /// - [`CatalogError::FetchFailed`] when resolution fails. Neither
    ///   outcome is cached.
    pub async fn product_for(&self, slug: &str) -> Result<Arc<Product>, CatalogError> {
        match self.mode {
            PageMode::OnRequest => Ok(Arc::new(self.resolver.resolve(slug).await?)),
            PageMode::BlockingFallback => self.cached(slug, None).await,
            PageMode::Revalidate { interval } => self.cached(slug, Some(interval)).await,
        }
    }

    /// Resolves each slug and seeds its cache entry fresh.
    ///
    /// The build-time analogue of a first request, run at startup under the
    /// revalidate mode. The first failure aborts the whole pass.
    ///
    /// # Errors
    ///
    /// Propagates the first resolution failure, [`CatalogError::NotFound`]
    /// included.
    pub async fn prebuild(&self, slugs: &[String]) -> Result<(), CatalogError> {
        for slug in slugs {
            let product = Arc::new(self.resolver.resolve(slug).await?);
            let slot = self.slot(slug).await;
            let mut state = slot.state.lock().await;
            *state = SlotState::Served {
                product,
                built_at: Instant::now(),
                revalidating: false,
            };
            drop(state);
            tracing::info!(slug = %slug, "prebuilt product page");
        }
        Ok(())
    }

    async fn cached(
        &self,
        slug: &str,
        interval: Option<Duration>,
    ) -> Result<Arc<Product>, CatalogError> {
        let slot = self.slot(slug).await;

        if let Some(product) = self.serve_built(&slot, slug, interval).await {
            return Ok(product);
        }

        // Miss: serialise concurrent first builds for this slug. Requests
        // for other slugs proceed independently.
        let build = slot.build_lock.lock().await;

        // Another request may have finished the build while this one
        // waited on the lock.
        if let Some(product) = self.serve_built(&slot, slug, interval).await {
            return Ok(product);
        }

        let product = match self.resolver.resolve(slug).await {
            Ok(product) => Arc::new(product),
            Err(error) => {
                self.discard_unbuilt(slug, &slot).await;
                return Err(error);
            }
        };
        let mut state = slot.state.lock().await;
        *state = SlotState::Served {
            product: Arc::clone(&product),
            built_at: Instant::now(),
            revalidating: false,
        };
        drop(state);
        drop(build);

        Ok(product)
    }

    /// Returns the slot's product if it has been built, claiming the
    /// revalidation token and spawning a refresh when the entry has gone
    /// stale.
    async fn serve_built(
        &self,
        slot: &Arc<PageSlot>,
        slug: &str,
        interval: Option<Duration>,
    ) -> Option<Arc<Product>> {
        let mut state = slot.state.lock().await;
        let SlotState::Served {
            product,
            built_at,
            revalidating,
        } = &mut *state
        else {
            return None;
        };

        let product = Arc::clone(product);
        let stale = interval.is_some_and(|interval| built_at.elapsed() >= interval);

        if stale && !*revalidating {
            *revalidating = true;
            drop(state);
            self.spawn_revalidation(slot, slug);
        }

        Some(product)
    }

    /// Refreshes one slot out of band. The caller has already claimed the
    /// slot's revalidation token; the task replaces the entry on success
    /// and releases the token on failure, leaving the served entry alone.
    fn spawn_revalidation(&self, slot: &Arc<PageSlot>, slug: &str) {
        let resolver = self.resolver.clone();
        let slot = Arc::clone(slot);
        let slug = slug.to_owned();

        tokio::spawn(async move {
            match resolver.resolve(&slug).await {
                Ok(product) => {
                    let mut state = slot.state.lock().await;
                    *state = SlotState::Served {
                        product: Arc::new(product),
                        built_at: Instant::now(),
                        revalidating: false,
                    };
                    drop(state);
                    tracing::debug!(slug = %slug, "revalidation: refreshed product page");
                }
                Err(error) => {
                    let mut state = slot.state.lock().await;
                    if let SlotState::Served { revalidating, .. } = &mut *state {
                        *revalidating = false;
                    }
                    drop(state);
                    tracing::warn!(
                        slug = %slug,
                        %error,
                        "revalidation: refresh failed, keeping previous page"
                    );
                }
            }
        });
    }

    async fn slot(&self, slug: &str) -> Arc<PageSlot> {
        let mut slots = self.slots.lock().await;
        Arc::clone(slots.entry(slug.to_owned()).or_insert_with(|| {
            Arc::new(PageSlot {
                build_lock: Mutex::new(()),
                state: Mutex::new(SlotState::Unbuilt),
            })
        }))
    }

    /// Drops the map entry for `slug` after a failed first build, so missed
    /// slugs do not accumulate `Unbuilt` slots. Requests already waiting on
    /// the slot's build lock keep their clones and retry the build on them;
    /// the pointer check skips removal when a fresh slot has since replaced
    /// this one.
    async fn discard_unbuilt(&self, slug: &str, slot: &Arc<PageSlot>) {
        let mut slots = self.slots.lock().await;
        if slots
            .get(slug)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
        {
            slots.remove(slug);
        }
    }
}
