//! Home page data: locations, recent reviews and a random sample of gallery
//! images, cached for a few minutes per application instance.
//!
//! The cache is an explicit object rather than a global. The ui builds one
//! `HomeCache` when the app starts and hands it to the home page through
//! context, so every mount of the page shares the same slot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::try_join_all;
use jiff::{SignedDuration, Timestamp};
use payloads::{ClientError, ForumPost, Location};
use rand::{Rng, seq::SliceRandom};

use crate::{source::ContentSource, time::TimeSource};

/// Entries younger than this are served without touching the network.
pub const HOME_CACHE_TTL: SignedDuration = SignedDuration::from_mins(5);
/// Gallery images shown in the "aventuras" strip.
pub const HOME_GALLERY_SAMPLE: usize = 8;
/// Reviews shown on the home page.
pub const HOME_RECENT_POSTS: usize = 3;
pub const LOAD_ERROR_MESSAGE: &str = "No se pudo cargar la información";

/// Flattened view-model rendered by the home page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeData {
    pub locations: Vec<Location>,
    pub posts: Vec<ForumPost>,
    pub adventure_images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub data: HomeData,
    pub fetched_at: Timestamp,
}

impl CacheEntry {
    pub fn is_fresh(&self, now: Timestamp) -> bool {
        now.duration_since(self.fetched_at) < HOME_CACHE_TTL
    }
}

/// Loading / data / error tri-state handed to the page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeState {
    pub data: HomeData,
    pub loading: bool,
    pub error: Option<String>,
}

/// Single-slot cache of the last successful home load.
#[derive(Clone)]
pub struct HomeCache {
    entry: Arc<Mutex<Option<CacheEntry>>>,
    time_source: TimeSource,
}

/// Two handles are equal when they share the same slot.
impl PartialEq for HomeCache {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entry, &other.entry)
    }
}

impl HomeCache {
    pub fn new(time_source: TimeSource) -> Self {
        Self {
            entry: Arc::new(Mutex::new(None)),
            time_source,
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The cached entry regardless of age.
    pub fn entry(&self) -> Option<CacheEntry> {
        self.slot().clone()
    }

    /// Cached data if it is younger than the TTL.
    pub fn fresh(&self) -> Option<HomeData> {
        let now = self.time_source.now();
        self.slot()
            .as_ref()
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.data.clone())
    }

    /// Drop the entry so the next load goes to the network.
    pub fn invalidate(&self) {
        tracing::debug!("home cache invalidated");
        *self.slot() = None;
    }

    /// State to render before any load has run: fresh data when available,
    /// otherwise loading (showing stale data if there is any).
    pub fn initial_state(&self) -> HomeState {
        match self.fresh() {
            Some(data) => HomeState {
                data,
                loading: false,
                error: None,
            },
            None => HomeState {
                data: self.entry().map(|entry| entry.data).unwrap_or_default(),
                loading: true,
                error: None,
            },
        }
    }

    /// Serve fresh cached data, or fetch, store and return a new entry.
    ///
    /// On failure the previous entry (if any) stays in the slot and its data
    /// is returned alongside the error.
    pub async fn load<S, R>(&self, source: &S, rng: &mut R) -> HomeState
    where
        S: ContentSource,
        R: Rng + ?Sized,
    {
        if let Some(data) = self.fresh() {
            tracing::debug!("home cache hit");
            return HomeState {
                data,
                loading: false,
                error: None,
            };
        }

        tracing::debug!("home cache miss, fetching");
        match fetch_home_data(source, rng).await {
            Ok(data) => {
                *self.slot() = Some(CacheEntry {
                    data: data.clone(),
                    fetched_at: self.time_source.now(),
                });
                HomeState {
                    data,
                    loading: false,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!("failed to load home data: {e}");
                HomeState {
                    data: self
                        .entry()
                        .map(|entry| entry.data)
                        .unwrap_or_default(),
                    loading: false,
                    error: Some(LOAD_ERROR_MESSAGE.to_string()),
                }
            }
        }
    }
}

/// Fetch everything the home page shows. Locations and reviews are requested
/// together, then every location's gallery at once. Any failure fails the
/// whole batch.
pub async fn fetch_home_data<S, R>(
    source: &S,
    rng: &mut R,
) -> Result<HomeData, ClientError>
where
    S: ContentSource,
    R: Rng + ?Sized,
{
    let (locations, posts) =
        futures::try_join!(source.locations(), source.recent_posts())?;

    let galleries =
        try_join_all(locations.iter().map(|l| source.gallery(l.id))).await?;
    let images = galleries
        .into_iter()
        .flatten()
        .map(|image| image.url)
        .collect();

    Ok(HomeData {
        adventure_images: sample_images(images, rng),
        posts: posts.into_iter().take(HOME_RECENT_POSTS).collect(),
        locations,
    })
}

/// Shuffle and keep at most `HOME_GALLERY_SAMPLE` images.
pub fn sample_images<R: Rng + ?Sized>(
    mut images: Vec<String>,
    rng: &mut R,
) -> Vec<String> {
    images.shuffle(rng);
    images.truncate(HOME_GALLERY_SAMPLE);
    images
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use jiff::Span;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::testing::FakeSource;

    fn fixture() -> (HomeCache, TimeSource) {
        let time_source =
            TimeSource::new("2025-06-01T12:00:00Z".parse().unwrap());
        (HomeCache::new(time_source.clone()), time_source)
    }

    #[tokio::test]
    async fn second_load_within_ttl_is_served_from_cache() {
        let (cache, time) = fixture();
        let source = FakeSource::two_locations();
        let mut rng = StdRng::seed_from_u64(1);

        let first = cache.load(&source, &mut rng).await;
        assert!(first.error.is_none());
        assert!(!first.loading);
        let calls = source.calls();
        assert_eq!(calls.locations, 1);
        assert_eq!(calls.posts, 1);
        assert_eq!(calls.gallery, 2);

        time.advance(Span::new().minutes(4).seconds(59));
        let second = cache.load(&source, &mut rng).await;
        assert_eq!(second, first);
        assert_eq!(source.calls(), calls);
    }

    #[tokio::test]
    async fn load_after_ttl_refetches_exactly_once() {
        let (cache, time) = fixture();
        let source = FakeSource::two_locations();
        let mut rng = StdRng::seed_from_u64(2);

        cache.load(&source, &mut rng).await;
        time.advance(Span::new().minutes(5));
        assert!(cache.fresh().is_none());

        cache.load(&source, &mut rng).await;
        let calls = source.calls();
        assert_eq!(calls.locations, 2);
        assert_eq!(calls.posts, 2);
        assert_eq!(calls.gallery, 4);

        // the refetch reset the timestamp
        cache.load(&source, &mut rng).await;
        assert_eq!(source.calls(), calls);
    }

    #[tokio::test]
    async fn failure_without_prior_entry_yields_empty_data() {
        let (cache, _) = fixture();
        let source = FakeSource::two_locations();
        source.fail_posts(true);

        let state = cache.load(&source, &mut StdRng::seed_from_u64(3)).await;
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
        assert!(state.data.locations.is_empty());
        assert!(state.data.posts.is_empty());
        assert!(state.data.adventure_images.is_empty());
        assert!(cache.entry().is_none());
    }

    #[tokio::test]
    async fn failure_keeps_previous_entry_visible() {
        let (cache, time) = fixture();
        let source = FakeSource::two_locations();
        let mut rng = StdRng::seed_from_u64(4);

        let good = cache.load(&source, &mut rng).await;
        let stored = cache.entry().unwrap();

        time.advance(Span::new().minutes(10));
        source.fail_gallery(true);
        let state = cache.load(&source, &mut rng).await;

        assert!(state.error.is_some());
        assert!(!state.loading);
        assert_eq!(state.data, good.data);
        assert_eq!(cache.entry().unwrap(), stored);
    }

    #[tokio::test]
    async fn keeps_only_the_first_three_posts() {
        let (cache, _) = fixture();
        let source = FakeSource::two_locations();
        let all_posts = source.posts();
        assert!(all_posts.len() > HOME_RECENT_POSTS);

        let state = cache.load(&source, &mut StdRng::seed_from_u64(5)).await;
        assert_eq!(state.data.posts, all_posts[..HOME_RECENT_POSTS].to_vec());
    }

    #[tokio::test]
    async fn invalidate_forces_a_refetch() {
        let (cache, _) = fixture();
        let source = FakeSource::two_locations();
        let mut rng = StdRng::seed_from_u64(6);

        cache.load(&source, &mut rng).await;
        cache.invalidate();
        assert!(cache.initial_state().loading);
        cache.load(&source, &mut rng).await;
        assert_eq!(source.calls().locations, 2);
    }

    #[test]
    fn initial_state_reflects_freshness() {
        let (cache, time) = fixture();
        assert!(cache.initial_state().loading);

        *cache.slot() = Some(CacheEntry {
            data: HomeData {
                adventure_images: vec!["a.jpg".into()],
                ..Default::default()
            },
            fetched_at: time.now(),
        });
        let state = cache.initial_state();
        assert!(!state.loading);
        assert_eq!(state.data.adventure_images, vec!["a.jpg".to_string()]);

        time.advance(Span::new().minutes(6));
        let state = cache.initial_state();
        assert!(state.loading);
        assert_eq!(state.data.adventure_images, vec!["a.jpg".to_string()]);
    }

    #[test]
    fn sampling_is_bounded_and_drawn_from_the_input() {
        for size in 0..20 {
            for seed in 0..10 {
                let images: Vec<String> =
                    (0..size).map(|i| format!("img-{i}.jpg")).collect();
                let universe: HashSet<_> = images.iter().cloned().collect();

                let sample = sample_images(
                    images,
                    &mut StdRng::seed_from_u64(seed),
                );

                assert_eq!(sample.len(), size.min(HOME_GALLERY_SAMPLE));
                assert!(sample.iter().all(|url| universe.contains(url)));
                let unique: HashSet<_> = sample.iter().collect();
                assert_eq!(unique.len(), sample.len());
            }
        }
    }

    #[tokio::test]
    async fn sampled_images_come_from_this_cycles_galleries() {
        let (cache, _) = fixture();
        let source = FakeSource::two_locations();
        let universe: HashSet<String> =
            source.gallery_urls().into_iter().collect();
        assert!(universe.len() > HOME_GALLERY_SAMPLE);

        let state = cache.load(&source, &mut StdRng::seed_from_u64(7)).await;
        assert_eq!(state.data.adventure_images.len(), HOME_GALLERY_SAMPLE);
        assert!(
            state
                .data
                .adventure_images
                .iter()
                .all(|url| universe.contains(url))
        );
    }

    #[test]
    fn handles_share_one_slot() {
        let (cache, _) = fixture();
        let other = cache.clone();
        assert!(cache == other);

        let (unrelated, _) = fixture();
        assert!(cache != unrelated);
    }
}
