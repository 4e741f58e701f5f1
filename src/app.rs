use std::rc::Rc;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::controller::{UserListController, ViewState};
use crate::detail::{Backdrop, DetailPanel};
use crate::input::Action;
use crate::launcher::Launcher;
use crate::models::{DetailControl, RowControl, User};
use crate::network::{ApiError, UserSource};
use crate::table::{RowCursor, activation_label, delete_label};
use crate::ui::HitMap;

type FetchResult = Result<Vec<User>, ApiError>;

pub struct App {
    pub controller: UserListController,
    pub cursor: RowCursor,
    /// Selection state: the user bound to the open detail panel, if any.
    pub detail: Option<DetailPanel>,
    pub backdrop: Rc<Backdrop>,
    pub hits: HitMap,
    pub status: Option<String>,
    pub should_quit: bool,
    pending: Option<oneshot::Receiver<FetchResult>>,
    source: Arc<dyn UserSource>,
    launcher: Box<dyn Launcher>,
}

impl App {
    pub fn new(source: Arc<dyn UserSource>, launcher: Box<dyn Launcher>) -> Self {
        Self {
            controller: UserListController::new(),
            cursor: RowCursor::default(),
            detail: None,
            backdrop: Backdrop::new(),
            hits: HitMap::default(),
            status: None,
            should_quit: false,
            pending: None,
            source,
            launcher,
        }
    }

    /// Mounts the list and spawns its one fetch onto `runtime`.
    pub fn start(&mut self, runtime: &Handle) {
        if !self.controller.mount() {
            return;
        }
        let (tx, rx) = oneshot::channel();
        let source = Arc::clone(&self.source);
        runtime.spawn(async move {
            let result = source.fetch_all().await;
            // Receiver gone means the app was torn down first; nobody observes this.
            let _ = tx.send(result);
        });
        self.pending = Some(rx);
    }

    /// Picks up the fetch result once it has arrived.
    pub fn tick(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => Err(ApiError::Interrupted),
        };
        self.pending = None;
        self.controller.resolve(result);
    }

    pub fn users(&self) -> &[User] {
        self.controller.users().unwrap_or(&[])
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.controller.state(), ViewState::Loaded(_))
    }

    /// Accessible name of whatever currently has focus.
    pub fn focus_label(&self) -> Option<String> {
        if let Some(panel) = &self.detail {
            return Some(match panel.control() {
                DetailControl::Close => "Close modal".to_string(),
                DetailControl::Map => "View on map".to_string(),
                DetailControl::Website => format!("Open {}", panel.user().website_url()),
                DetailControl::Email => format!("Email {}", panel.user().email),
            });
        }
        let user = self.users().get(self.cursor.selected)?;
        Some(match self.cursor.control {
            RowControl::Row => activation_label(user),
            RowControl::Website => format!("Open {}", user.website_url()),
            RowControl::Delete => delete_label(user),
        })
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        match action {
            Action::Quit => self.should_quit = true,
            Action::CursorUp => {
                self.cursor.up();
                self.status = None;
            }
            Action::CursorDown => {
                self.cursor.down(self.users().len());
                self.status = None;
            }
            Action::NextControl => {
                self.cursor.next_control();
                self.status = None;
            }
            Action::PrevControl => {
                self.cursor.prev_control();
                self.status = None;
            }
            Action::ActivateFocused => {
                let index = self.cursor.selected;
                match self.cursor.control {
                    RowControl::Row => self.open_detail(index),
                    RowControl::Website => self.open_website(index),
                    RowControl::Delete => self.delete(index),
                }
            }
            Action::ActivateRow(index) => {
                self.cursor.select(index, self.users().len());
                self.cursor.control = RowControl::Row;
                self.open_detail(index);
            }
            Action::OpenWebsite(index) => {
                self.cursor.select(index, self.users().len());
                self.open_website(index);
            }
            Action::Delete(index) => self.delete(index),
            Action::DeleteFocused => self.delete(self.cursor.selected),
            Action::Scroll(delta) => {
                if self.backdrop.scroll_locked() {
                    debug!("scroll ignored while modal is open");
                } else {
                    self.cursor.scroll(delta, self.users().len());
                }
            }
            Action::Escape => {
                if self.backdrop.listens_for_escape() {
                    self.close_detail();
                }
            }
            Action::CloseDetail => self.close_detail(),
            Action::DetailNextControl => {
                if let Some(panel) = self.detail.as_mut() {
                    panel.focus_next();
                }
            }
            Action::DetailPrevControl => {
                if let Some(panel) = self.detail.as_mut() {
                    panel.focus_prev();
                }
            }
            Action::DetailActivateFocused => {
                if let Some(control) = self.detail.as_ref().map(DetailPanel::control) {
                    self.activate_detail_control(control);
                }
            }
            Action::DetailActivate(control) => self.activate_detail_control(control),
            Action::CopyEmail => {
                if let Some(email) = self.detail.as_ref().map(|p| p.user().email.clone()) {
                    self.status = Some(match self.launcher.copy(&email) {
                        Ok(()) => format!("Copied {email}"),
                        Err(e) => {
                            warn!(error = %e, "copy failed");
                            e.to_string()
                        }
                    });
                }
            }
        }
    }

    fn open_detail(&mut self, index: usize) {
        let Some(user) = self.users().get(index).cloned() else {
            return;
        };
        self.status = Some(activation_label(&user));
        self.detail = Some(DetailPanel::open(user, &self.backdrop));
    }

    fn close_detail(&mut self) {
        if self.detail.take().is_some() {
            self.status = None;
        }
    }

    fn open_website(&mut self, index: usize) {
        if let Some(url) = self.users().get(index).map(User::website_url) {
            self.open_url(&url);
        }
    }

    fn delete(&mut self, index: usize) {
        let Some(user) = self.users().get(index) else {
            return;
        };
        let (id, name) = (user.id, user.name.clone());
        if self.controller.delete(id) {
            self.cursor.clamp(self.users().len());
            self.status = Some(format!("Deleted {name}"));
        }
    }

    fn activate_detail_control(&mut self, control: DetailControl) {
        let Some(panel) = &self.detail else {
            return;
        };
        match panel.target_url(control) {
            Some(url) => self.open_url(&url),
            None => self.close_detail(),
        }
    }

    fn open_url(&mut self, url: &str) {
        self.status = Some(match self.launcher.open(url) {
            Ok(()) => format!("Opened {url}"),
            Err(e) => {
                warn!(error = %e, "external open failed");
                e.to_string()
            }
        });
        info!(%url, "external navigation requested");
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::controller::FETCH_FAILED_MESSAGE;
    use crate::models::fixtures;

    async fn settle(app: &mut App) {
        for _ in 0..100 {
            app.tick();
            if app.pending.is_none() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("fetch never resolved");
    }

    #[tokio::test]
    async fn start_loads_users_through_runtime() {
        let mut app = App::new(Arc::new(FixedSource(Some(fixtures::both()))), Box::new(SharedLauncher::default()));
        app.start(&Handle::current());
        assert_eq!(app.controller.state(), &ViewState::Loading);

        settle(&mut app).await;

        assert_eq!(app.users().len(), 2);
    }

    #[tokio::test]
    async fn start_twice_fetches_once() {
        let mut app = App::new(Arc::new(FixedSource(Some(fixtures::both()))), Box::new(SharedLauncher::default()));
        app.start(&Handle::current());
        settle(&mut app).await;
        app.controller.delete(1);

        app.start(&Handle::current());
        assert!(app.pending.is_none());
        assert_eq!(app.users().len(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_shows_generic_error() {
        let mut app = App::new(Arc::new(FixedSource(None)), Box::new(SharedLauncher::default()));
        app.start(&Handle::current());

        settle(&mut app).await;

        assert_eq!(app.controller.state(), &ViewState::Errored(FETCH_FAILED_MESSAGE.to_string()));
    }

    #[test]
    fn dropped_sender_counts_as_failure() {
        let (mut app, _) = loaded_app(Vec::new());
        let mut controller = UserListController::new();
        controller.mount();
        app.controller = controller;
        let (tx, rx) = oneshot::channel::<FetchResult>();
        drop(tx);
        app.pending = Some(rx);

        app.tick();

        assert_eq!(app.controller.state(), &ViewState::Errored(FETCH_FAILED_MESSAGE.to_string()));
    }

    #[test]
    fn delete_then_open_detail_scenario() {
        let (mut app, launcher) = loaded_app(fixtures::both());

        app.dispatch(Action::Delete(0));
        let names: Vec<_> = app.users().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Ervin Howell"]);

        app.dispatch(Action::ActivateRow(0));
        let panel = app.detail.as_ref().unwrap();
        assert_eq!(panel.user().company.name, "Deckow-Crist");

        app.dispatch(Action::DetailActivate(DetailControl::Map));
        assert_eq!(launcher.opened(), ["https://www.google.com/maps?q=-43.9509,-34.4618"]);
        assert!(app.detail.is_some());
    }

    #[test]
    fn website_and_delete_controls_do_not_open_detail() {
        let (mut app, launcher) = loaded_app(fixtures::both());

        app.dispatch(Action::OpenWebsite(1));
        assert!(app.detail.is_none());
        assert_eq!(launcher.opened(), ["https://anastasia.net"]);

        app.dispatch(Action::NextControl);
        app.dispatch(Action::ActivateFocused);
        assert!(app.detail.is_none());
        assert_eq!(launcher.opened().len(), 2);

        app.dispatch(Action::NextControl);
        app.dispatch(Action::ActivateFocused);
        assert!(app.detail.is_none());
        assert_eq!(app.users().len(), 1);
        assert_eq!(app.users()[0].name, "Leanne Graham");
    }

    #[test]
    fn keyboard_activation_on_row_opens_detail() {
        let (mut app, _) = loaded_app(fixtures::both());
        app.dispatch(Action::CursorDown);
        app.dispatch(Action::ActivateFocused);
        assert_eq!(app.detail.as_ref().map(|p| p.user().id), Some(2));
        assert_eq!(app.status.as_deref(), Some("View details for Ervin Howell"));
    }

    #[test]
    fn every_dismissal_path_restores_backdrop() {
        let dismissals = [
            Action::Escape,
            Action::CloseDetail,
            Action::DetailActivate(DetailControl::Close),
            Action::DetailActivateFocused,
        ];
        for dismiss in dismissals {
            let (mut app, _) = loaded_app(fixtures::both());
            app.dispatch(Action::ActivateRow(0));
            assert!(app.backdrop.scroll_locked());

            app.dispatch(dismiss);

            assert!(app.detail.is_none(), "{dismiss:?} left the panel open");
            assert!(!app.backdrop.scroll_locked());
            assert!(!app.backdrop.listens_for_escape());
        }
    }

    #[test]
    fn escape_without_panel_is_ignored() {
        let (mut app, _) = loaded_app(fixtures::both());
        app.dispatch(Action::Escape);
        assert!(app.detail.is_none());
        assert_eq!(app.users().len(), 2);
    }

    #[test]
    fn scroll_is_locked_while_panel_open() {
        let users: Vec<User> = (1..=20)
            .map(|id| User { id, ..fixtures::leanne() })
            .collect();
        let (mut app, _) = loaded_app(users);
        app.dispatch(Action::ActivateRow(0));

        app.dispatch(Action::Scroll(5));
        assert_eq!(app.cursor.offset, 0);

        app.dispatch(Action::Escape);
        app.dispatch(Action::Scroll(5));
        assert_eq!(app.cursor.offset, 5);
    }

    #[test]
    fn panel_keeps_captured_user_after_list_changes() {
        let (mut app, _) = loaded_app(fixtures::both());
        app.dispatch(Action::ActivateRow(1));

        app.controller.delete(1);
        app.controller.delete(2);

        assert!(app.users().is_empty());
        assert_eq!(app.detail.as_ref().map(|p| p.user().name.as_str()), Some("Ervin Howell"));
    }

    #[test]
    fn copy_email_uses_clipboard() {
        let (mut app, launcher) = loaded_app(fixtures::both());
        app.dispatch(Action::ActivateRow(0));
        app.dispatch(Action::CopyEmail);
        assert_eq!(launcher.copied(), ["Sincere@april.biz"]);
        assert_eq!(app.status.as_deref(), Some("Copied Sincere@april.biz"));
    }

    #[test]
    fn deleting_last_row_clamps_cursor() {
        let (mut app, _) = loaded_app(fixtures::both());
        app.dispatch(Action::CursorDown);
        app.dispatch(Action::DeleteFocused);
        assert_eq!(app.cursor.selected, 0);
        assert_eq!(app.focus_label().as_deref(), Some("View details for Leanne Graham"));
    }

    #[test]
    fn deleting_unknown_row_changes_nothing() {
        let (mut app, _) = loaded_app(fixtures::both());
        app.dispatch(Action::Delete(7));
        assert_eq!(app.users().len(), 2);
        assert_eq!(app.status, None);
    }
}
