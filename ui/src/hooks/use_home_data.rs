use content::{HomeCache, HomeState, TimeSource};
use rand::{SeedableRng, rngs::StdRng};
use yew::prelude::*;

use crate::get_api_client;

/// Home page data through the app-wide cache.
///
/// Fresh cache entries render immediately without a request. Otherwise the
/// hook starts in the loading state (showing any stale entry) and loads
/// once on mount.
#[hook]
pub fn use_home_data() -> HomeState {
    let cache = use_context::<HomeCache>()
        .unwrap_or_else(|| HomeCache::new(TimeSource::default()));
    let state = {
        let cache = cache.clone();
        use_state(move || cache.initial_state())
    };

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            if state.loading {
                yew::platform::spawn_local(async move {
                    let client = get_api_client();
                    let mut rng = StdRng::from_entropy();
                    state.set(cache.load(&client, &mut rng).await);
                });
            }
        });
    }

    (*state).clone()
}
