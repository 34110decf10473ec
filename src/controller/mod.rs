//! Page controllers.
//!
//! Each controller holds its [`Page`] behind a lock, resolves the elements it
//! needs when constructed, and turns page events (load, submit, select
//! change) into API calls followed by page updates. Controllers are cheap to
//! clone and clones share the page, so several requests can be in flight at
//! once; the lock is never held across a request.

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::page::Page;

pub mod dashboard;
pub mod login;
pub mod notify;
pub mod render;

pub use dashboard::{DashboardController, Features};
pub use login::LoginController;
pub use notify::Notifier;

/// Shown when a write fails below the HTTP level or the server gives no reason.
pub const GENERIC_ERROR: &str = "An error occurred";
pub const LOGIN_GENERIC_ERROR: &str = "An error occurred. Please try again.";

/// How a form submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx reply; fields cleared and views refreshed
    Accepted,
    /// Non-2xx reply; server message shown, fields kept
    Rejected,
    /// No usable reply; generic message shown
    Failed,
}

pub(crate) fn lock<T>(shared: &Mutex<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Locked access to a controller's page. Drop it before awaiting anything.
pub struct PageGuard<'a, T>(MutexGuard<'a, T>);

impl<'a, T> PageGuard<'a, T> {
    pub(crate) fn new(shared: &'a Mutex<T>) -> Self {
        Self(lock(shared))
    }
}

impl<T: AsRef<Page>> Deref for PageGuard<'_, T> {
    type Target = Page;

    fn deref(&self) -> &Page {
        (*self.0).as_ref()
    }
}

impl<T: AsRef<Page> + AsMut<Page>> DerefMut for PageGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Page {
        (*self.0).as_mut()
    }
}
