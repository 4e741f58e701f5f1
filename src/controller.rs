use tracing::{debug, error, info, warn};

use crate::models::User;
use crate::network::{ApiError, UserSource};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch users. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Vec<User>),
    Errored(String),
}

/// Owns the user collection and its load status.
///
/// The fetch is issued at most once per controller: `mount` hands out the
/// single permission to fetch, and there is no refetch.
#[derive(Debug, Default)]
pub struct UserListController {
    state: ViewState,
    mounted: bool,
}

impl UserListController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Users currently shown, `None` unless loaded.
    pub fn users(&self) -> Option<&[User]> {
        match &self.state {
            ViewState::Loaded(users) => Some(users),
            _ => None,
        }
    }

    /// Returns `true` exactly once; the caller must then issue one `fetch_all`
    /// and hand its result to [`resolve`](Self::resolve).
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.state = ViewState::Loading;
        debug!("view state: NotLoaded -> Loading");
        true
    }

    pub fn resolve(&mut self, result: Result<Vec<User>, ApiError>) {
        if self.state != ViewState::Loading {
            warn!("dropping fetch result outside of Loading state");
            return;
        }
        self.state = match result {
            Ok(users) => {
                debug!(count = users.len(), "view state: Loading -> Loaded");
                ViewState::Loaded(users)
            }
            Err(err) => {
                error!(error = %err, "view state: Loading -> Errored");
                ViewState::Errored(FETCH_FAILED_MESSAGE.to_string())
            }
        };
    }

    /// Mounts and resolves in one go, awaiting the fetch inline.
    pub async fn load(&mut self, source: &dyn UserSource) {
        if self.mount() {
            let result = source.fetch_all().await;
            self.resolve(result);
        }
    }

    /// Removes the user with `id` from the loaded collection. Local only.
    pub fn delete(&mut self, id: u64) -> bool {
        let ViewState::Loaded(users) = &mut self.state else {
            return false;
        };
        let before = users.len();
        users.retain(|u| u.id != id);
        let removed = users.len() != before;
        if removed {
            info!(id, remaining = users.len(), "deleted user from list");
        }
        removed
    }
}
