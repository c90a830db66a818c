mod ingredients;
mod menus;
mod prefs;
mod session;
mod shopping;
mod social;

pub use ingredients::run_ingredients;
pub use menus::{run_menus, run_recommend};
pub use prefs::run_prefs;
pub use session::{run_login, run_logout, run_status};
pub use shopping::run_shopping;
pub use social::{run_favorites, run_history, run_reviews};

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::api::ApiClient;
use crate::cancel::cancel_on_ctrl_c;
use crate::config::Config;
use crate::domain::Ingredient;
use crate::session::SessionStore;
use crate::storage::{FileBackend, KeyValueBackend, UserStorage};
use crate::stores::Stores;

/// Everything a command needs, resolved once per invocation.
pub struct AppContext {
    pub config: Config,
    pub session: SessionStore,
    backend: Arc<dyn KeyValueBackend>,
    cancel: CancellationToken,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let session = SessionStore::new(&config.data_dir)?;
        let backend = FileBackend::new(config.data_dir.join("store"), config.quota_bytes)
            .with_context(|| format!("Failed to open storage in {:?}", config.data_dir))?;

        Ok(Self {
            config,
            session,
            backend: Arc::new(backend),
            cancel: cancel_on_ctrl_c(),
        })
    }

    pub fn user_id(&self) -> Option<String> {
        self.session.current_user()
    }

    /// Stores for the current user. Without a user they read empty and
    /// write nothing.
    pub fn stores(&self) -> Stores {
        let storage = UserStorage::new(self.backend.clone(), self.user_id());
        if storage.is_anonymous() {
            warn!("Not signed in: changes will not be saved. Run 'pantry login <user>'.");
        }
        Stores::new(storage)
    }

    pub fn require_user(&self) -> Result<String> {
        self.user_id()
            .context("Not signed in. Run 'pantry login <user>' first.")
    }

    pub fn api(&self) -> Result<ApiClient> {
        ApiClient::new(self.config.api_url.clone(), self.config.timeout_secs)
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

pub(crate) fn print_ingredients(list: &[Ingredient]) {
    if list.is_empty() {
        println!("No ingredients.");
        return;
    }
    for (i, ing) in list.iter().enumerate() {
        println!("  {:>2}. {} ({}, {})", i + 1, ing.name, ing.kind, ing.source);
    }
}
