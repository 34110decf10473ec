//! Transient success / error notification.

use std::time::Duration;

use tokio::time::Instant;

use crate::error::Result;
use crate::page::bindings::Binder;
use crate::page::templates::ids;
use crate::page::{ElementId, Page};

pub const DISMISS_AFTER: Duration = Duration::from_millis(3000);

/// Shows one message at a time. A new message replaces the current one and
/// moves the dismissal deadline to 3 s after the new call.
#[derive(Debug)]
pub struct Notifier {
    container: ElementId,
    message: ElementId,
    dismiss_at: Option<Instant>,
}

impl Notifier {
    pub fn bind(page: &Page) -> Result<Self> {
        let binder = Binder::new(page);
        Ok(Self {
            container: binder.require(ids::NOTIFICATION)?,
            message: binder.require(ids::NOTIFICATION_MESSAGE)?,
            dismiss_at: None,
        })
    }

    pub fn show(&mut self, page: &mut Page, message: &str, is_error: bool) {
        self.show_at(page, message, is_error, Instant::now());
    }

    pub fn show_at(&mut self, page: &mut Page, message: &str, is_error: bool, now: Instant) {
        page.set_text(self.message, message);
        page.set_class(
            self.container,
            if is_error { "notification error" } else { "notification" },
        );
        page.set_visible(self.container, true);
        self.dismiss_at = Some(now + DISMISS_AFTER);
    }

    /// Hide the notification once its deadline has passed.
    pub fn tick(&mut self, page: &mut Page) {
        self.tick_at(page, Instant::now());
    }

    pub fn tick_at(&mut self, page: &mut Page, now: Instant) {
        if let Some(deadline) = self.dismiss_at {
            if now >= deadline {
                page.set_visible(self.container, false);
                self.dismiss_at = None;
            }
        }
    }

    pub fn is_visible(&self, page: &Page) -> bool {
        page.is_visible(self.container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use crate::page::templates;

    fn setup() -> (Page, Notifier) {
        let page = templates::dashboard(Layout::Simple);
        let notifier = Notifier::bind(&page).unwrap();
        (page, notifier)
    }

    #[test]
    fn error_flag_sets_error_class() {
        let (mut page, mut n) = setup();
        let container = page.find(ids::NOTIFICATION).unwrap();

        n.show(&mut page, "Insufficient funds", true);
        assert!(page.get(container).has_class("error"));
        assert!(n.is_visible(&page));

        n.show(&mut page, "Deposit successful", false);
        assert_eq!(page.get(container).class, "notification");
    }

    #[test]
    fn hides_three_seconds_after_show() {
        let (mut page, mut n) = setup();
        let start = Instant::now();

        n.show_at(&mut page, "Done", false, start);
        n.tick_at(&mut page, start + Duration::from_millis(2999));
        assert!(n.is_visible(&page));
        n.tick_at(&mut page, start + Duration::from_millis(3000));
        assert!(!n.is_visible(&page));
    }

    #[test]
    fn second_call_wins_and_restarts_the_window() {
        let (mut page, mut n) = setup();
        let message = page.find(ids::NOTIFICATION_MESSAGE).unwrap();
        let container = page.find(ids::NOTIFICATION).unwrap();
        let start = Instant::now();

        n.show_at(&mut page, "first", false, start);
        n.show_at(&mut page, "second", true, start + Duration::from_millis(1000));

        assert_eq!(page.text(message), "second");
        assert!(page.get(container).has_class("error"));

        n.tick_at(&mut page, start + Duration::from_millis(3500));
        assert!(n.is_visible(&page));
        n.tick_at(&mut page, start + Duration::from_millis(4000));
        assert!(!n.is_visible(&page));
    }

    #[tokio::test(start_paused = true)]
    async fn tick_follows_the_runtime_clock() {
        let (mut page, mut n) = setup();
        n.show(&mut page, "Saved", false);

        tokio::time::advance(Duration::from_millis(2500)).await;
        n.tick(&mut page);
        assert!(n.is_visible(&page));

        tokio::time::advance(Duration::from_millis(500)).await;
        n.tick(&mut page);
        assert!(!n.is_visible(&page));
    }
}
