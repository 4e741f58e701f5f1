use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::models::{DetailControl, User};

/// Surface behind the modal: background scroll and global key listeners.
#[derive(Debug, Default)]
pub struct Backdrop {
    scroll_locked: Cell<bool>,
    escape_listeners: Cell<usize>,
}

impl Backdrop {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked.get()
    }

    pub fn listens_for_escape(&self) -> bool {
        self.escape_listeners.get() > 0
    }
}

/// Held for as long as a modal is mounted. Dropping it restores the backdrop.
#[derive(Debug)]
pub struct ModalGuard {
    backdrop: Rc<Backdrop>,
}

impl ModalGuard {
    pub fn acquire(backdrop: &Rc<Backdrop>) -> Self {
        backdrop.escape_listeners.set(backdrop.escape_listeners.get() + 1);
        backdrop.scroll_locked.set(true);
        Self { backdrop: Rc::clone(backdrop) }
    }
}

impl Drop for ModalGuard {
    fn drop(&mut self) {
        let remaining = self.backdrop.escape_listeners.get().saturating_sub(1);
        self.backdrop.escape_listeners.set(remaining);
        if remaining == 0 {
            self.backdrop.scroll_locked.set(false);
        }
    }
}

/// Modal view of a single user. Holds its own copy of the user, so later
/// changes to the list never reach it.
#[derive(Debug)]
pub struct DetailPanel {
    user: User,
    control: DetailControl,
    _guard: ModalGuard,
}

impl DetailPanel {
    pub fn open(user: User, backdrop: &Rc<Backdrop>) -> Self {
        debug!(id = user.id, "detail panel opened");
        Self { user, control: DetailControl::default(), _guard: ModalGuard::acquire(backdrop) }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn control(&self) -> DetailControl {
        self.control
    }

    pub fn focus_next(&mut self) {
        self.control = self.control.next();
    }

    pub fn focus_prev(&mut self) {
        self.control = self.control.prev();
    }

    pub fn map_url(&self) -> String {
        self.user.address.geo.map_url()
    }

    /// Address as two lines: `suite, street` then `city, zipcode`.
    pub fn address_lines(&self) -> [String; 2] {
        let a = &self.user.address;
        [format!("{}, {}", a.suite, a.street), format!("{}, {}", a.city, a.zipcode)]
    }

    /// URL opened by a navigation control; `None` for `Close`.
    pub fn target_url(&self, control: DetailControl) -> Option<String> {
        match control {
            DetailControl::Close => None,
            DetailControl::Map => Some(self.map_url()),
            DetailControl::Website => Some(self.user.website_url()),
            DetailControl::Email => Some(self.user.mailto_url()),
        }
    }
}

impl Drop for DetailPanel {
    fn drop(&mut self) {
        debug!(id = self.user.id, "detail panel closed");
    }
}
