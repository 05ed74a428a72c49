//! A browsing session: one navigation state, one loader, one current view.

use crate::api::PokeApi;
use crate::config::PokedexConfig;
use crate::errors::{LoadResult, PokedexResult};
use crate::loader::EntityLoader;
use crate::navigation::{NavigationState, NumPadKey};
use crate::view::ViewModel;
use schema::PokemonType;
use std::sync::Arc;
use tracing::info;

pub struct Pokedex<A: ?Sized> {
    loader: Arc<EntityLoader<A>>,
    navigation: NavigationState,
    current_view: Option<ViewModel>,
}

impl<A: PokeApi + ?Sized> Pokedex<A> {
    pub fn new(api: Arc<A>, config: PokedexConfig) -> Self {
        Self::with_start(api, config, 1)
    }

    /// A session whose navigation starts at `start_id`. Nothing is loaded
    /// until the first navigation call.
    pub fn with_start(api: Arc<A>, config: PokedexConfig, start_id: u16) -> Self {
        Self {
            loader: Arc::new(EntityLoader::new(api, config)),
            navigation: NavigationState::new(start_id),
            current_view: None,
        }
    }

    /// Shared handle to the loader, for issuing loads outside this session.
    /// Any ticket issued through it supersedes this session's in-flight load.
    pub fn loader(&self) -> Arc<EntityLoader<A>> {
        Arc::clone(&self.loader)
    }

    pub fn config(&self) -> &PokedexConfig {
        self.loader.config()
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn current_view(&self) -> Option<&ViewModel> {
        self.current_view.as_ref()
    }

    /// Loads `requested` (clamped into range) and makes it current.
    ///
    /// On failure the navigation state and the current view are unchanged.
    pub async fn load(&mut self, requested: i64) -> LoadResult<&ViewModel> {
        self.navigation.reset_input();
        let ticket = self.loader.begin(requested);
        let result = self.loader.load(&ticket).await;
        self.commit(result)
    }

    /// Applies the outcome of a load issued through [`Pokedex::loader`].
    pub fn commit(&mut self, result: LoadResult<ViewModel>) -> LoadResult<&ViewModel> {
        let view = result?;
        self.navigation.set_current(view.id);
        info!(id = view.id, name = %view.name, "loaded");
        let view: &ViewModel = self.current_view.insert(view);
        Ok(view)
    }

    /// Relative move: `±1`, `±10`, or any other delta.
    pub async fn step(&mut self, delta: i64) -> LoadResult<&ViewModel> {
        let target = self.navigation.step(delta);
        self.load(i64::from(target)).await
    }

    /// Absolute move. Does not check or clear the active filter.
    pub async fn jump_to(&mut self, requested: i64) -> LoadResult<&ViewModel> {
        let target = self.navigation.jump_to(requested);
        self.load(i64::from(target)).await
    }

    /// Feeds one number pad key. Only `Enter` with buffered digits loads.
    pub async fn press_key(&mut self, key: NumPadKey) -> Option<LoadResult<&ViewModel>> {
        match self.navigation.press_key(key) {
            Some(target) => Some(self.load(i64::from(target)).await),
            None => None,
        }
    }

    /// Restricts navigation to `kind` and loads the first match.
    pub async fn apply_filter(&mut self, kind: PokemonType) -> PokedexResult<&ViewModel> {
        let first = self
            .navigation
            .apply_filter(self.loader.api(), kind)
            .await?;
        Ok(self.load(i64::from(first)).await?)
    }

    /// Drops the filter and reloads the current id.
    pub async fn clear_filter(&mut self) -> LoadResult<&ViewModel> {
        let current = self.navigation.clear_filter();
        self.load(i64::from(current)).await
    }
}
