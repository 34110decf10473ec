// src/cli/state.rs
use std::future::Future;
use std::pin::Pin;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::info;

use crate::api::Client;
use crate::cli::input::LineEdit;
use crate::config::Layout;
use crate::controller::{DashboardController, LoginController, Outcome};
use crate::page::templates::{self, ids, DASHBOARD_PATH, LOGIN_PATH};
use crate::page::{ElementId, Kind, Page};

pub const LOGIN_HINT: &str = "Tab: next field | Enter: sign in | Esc: quit";
pub const DASHBOARD_HINT: &str =
    "Tab: next field | ←/→: change option | Enter: submit | F2: interest | F5: refresh | F10: logout | Esc: quit";

pub enum Screen {
    Login(LoginController),
    Dashboard(DashboardController),
}

/// A background request has finished and its page changes are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Done {
    Submitted { action: &'static str, outcome: Outcome },
    Loaded,
    Refreshed,
    LoggedOut,
}

type Task = Pin<Box<dyn Future<Output = Done> + Send + 'static>>;

pub struct App {
    client: Client,
    layout: Layout,
    pub screen: Screen,
    pub focus: usize,
    pub editor: LineEdit,
    pub status: String,
    pub quit: bool,
    done_tx: UnboundedSender<Done>,
    done_rx: UnboundedReceiver<Done>,
    in_flight: usize,
}

impl App {
    pub fn new(client: Client, layout: Layout) -> crate::Result<Self> {
        let login = LoginController::new(client.clone(), templates::login())?;
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            client,
            layout,
            screen: Screen::Login(login),
            focus: 0,
            editor: LineEdit::default(),
            status: LOGIN_HINT.into(),
            quit: false,
            done_tx,
            done_rx,
            in_flight: 0,
        };
        app.set_focus(0);
        Ok(app)
    }

    /// Run `f` against the current page while holding its lock.
    pub fn with_page<R>(&self, f: impl FnOnce(&Page) -> R) -> R {
        match &self.screen {
            Screen::Login(c) => f(&c.page()),
            Screen::Dashboard(c) => f(&c.page()),
        }
    }

    fn with_page_mut<R>(&self, f: impl FnOnce(&mut Page) -> R) -> R {
        match &self.screen {
            Screen::Login(c) => f(&mut c.page()),
            Screen::Dashboard(c) => f(&mut c.page()),
        }
    }

    /// Requests started and not yet finished.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.with_page(|page| page.focusables().get(self.focus).copied())
    }

    fn set_focus(&mut self, index: usize) {
        self.focus = index;
        self.sync_editor();
    }

    /// Reload the editor from the focused element's current value.
    fn sync_editor(&mut self) {
        let focused = self.focused().map(|id| {
            self.with_page(|page| {
                let e = page.get(id);
                (e.value.clone(), e.kind == Kind::Password)
            })
        });
        match focused {
            Some((value, password)) => {
                self.editor.password = password;
                self.editor.set(value);
            }
            None => {
                self.editor.password = false;
                self.editor.clear();
            }
        }
    }

    fn focusable_count(&self) -> usize {
        self.with_page(|page| page.focusables().len())
    }

    fn move_focus(&mut self, delta: isize) {
        let n = self.focusable_count();
        if n == 0 {
            return;
        }
        let next = (self.focus as isize + delta).rem_euclid(n as isize) as usize;
        self.set_focus(next);
    }

    /// Keep focus in range after fields were shown or hidden.
    fn clamp_focus(&mut self) {
        let n = self.focusable_count();
        self.set_focus(if n == 0 { 0 } else { self.focus.min(n - 1) });
    }

    fn write_back(&mut self) {
        if let Some(id) = self.focused() {
            let value = self.editor.value.clone();
            self.with_page_mut(|page| page.set_value(id, value));
        }
    }

    pub fn tick(&mut self) {
        if let Screen::Dashboard(c) = &self.screen {
            c.tick();
        }
    }

    // ============= Background requests =============

    fn spawn(&mut self, task: Task) {
        let tx = self.done_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            // the receiver only goes away with the app
            let _ = tx.send(task.await);
        });
    }

    /// Apply every request that finished since the last call.
    pub fn drain(&mut self) -> crate::Result<()> {
        while let Ok(done) = self.done_rx.try_recv() {
            self.finish(done)?;
        }
        Ok(())
    }

    /// Wait until no request is in flight, including loads started by the
    /// screen changes the finished requests cause.
    pub async fn wait_idle(&mut self) -> crate::Result<()> {
        while self.in_flight > 0 {
            match self.done_rx.recv().await {
                Some(done) => self.finish(done)?,
                None => break,
            }
        }
        Ok(())
    }

    fn finish(&mut self, done: Done) -> crate::Result<()> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match done {
            Done::Submitted { action, outcome } => self.status = describe(action, outcome),
            Done::Refreshed => self.status = "Refreshed.".into(),
            Done::Loaded | Done::LoggedOut => {}
        }
        self.follow_navigation()?;
        self.clamp_focus();
        Ok(())
    }

    // ============= Keys =============

    /// Apply one key press. Requests are started in the background, so this
    /// never waits on the network.
    pub fn handle_key(&mut self, k: KeyEvent) {
        if k.kind != KeyEventKind::Press {
            return;
        }

        let focused_kind = self
            .focused()
            .map(|id| self.with_page(|page| page.get(id).kind));

        match k.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.move_focus(1),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(-1),
            KeyCode::Enter => self.submit_focused(),
            KeyCode::F(2) => {
                if let Screen::Dashboard(c) = &self.screen {
                    let c = c.clone();
                    self.status = "Interest: sending...".into();
                    self.spawn(Box::pin(async move {
                        let outcome = c.apply_interest().await;
                        Done::Submitted { action: "Interest", outcome }
                    }));
                }
            }
            KeyCode::F(5) => {
                if let Screen::Dashboard(c) = &self.screen {
                    let c = c.clone();
                    self.spawn(Box::pin(async move {
                        c.refresh().await;
                        Done::Refreshed
                    }));
                }
            }
            KeyCode::F(10) => {
                if let Screen::Dashboard(c) = &self.screen {
                    let c = c.clone();
                    self.status = "Signing out...".into();
                    self.spawn(Box::pin(async move {
                        c.logout().await;
                        Done::LoggedOut
                    }));
                }
            }
            KeyCode::Left | KeyCode::Right if focused_kind == Some(Kind::Select) => {
                let delta = if k.code == KeyCode::Left { -1 } else { 1 };
                self.change_option(delta);
            }
            KeyCode::Left => self.editor.left(),
            KeyCode::Right => self.editor.right(),
            KeyCode::Backspace if focused_kind != Some(Kind::Select) => {
                self.editor.backspace();
                self.write_back();
            }
            KeyCode::Delete if focused_kind != Some(Kind::Select) => {
                self.editor.delete();
                self.write_back();
            }
            KeyCode::Char(ch) if focused_kind.is_some_and(|kind| kind != Kind::Select) => {
                self.editor.push(ch);
                self.write_back();
            }
            _ => {}
        }
    }

    fn change_option(&mut self, delta: isize) {
        let Some(id) = self.focused() else {
            return;
        };
        let is_transfer_type = self.with_page_mut(|page| {
            page.cycle_option(id, delta);
            page.get(id).id == ids::TRANSFER_TYPE
        });
        if is_transfer_type {
            if let Screen::Dashboard(c) = &self.screen {
                c.on_transfer_type_change();
            }
        }
        self.clamp_focus();
    }

    /// Start the request for the form that owns the focused field.
    fn submit_focused(&mut self) {
        let Some(form) = self
            .focused()
            .and_then(|id| self.with_page(|page| page.get(id).form.clone()))
        else {
            return;
        };

        let task: Option<(&'static str, Task)> = match (&self.screen, form.as_str()) {
            (Screen::Login(c), ids::LOGIN_FORM) => {
                let c = c.clone();
                let task: Task = Box::pin(async move {
                    let outcome = c.submit().await;
                    Done::Submitted { action: "Login", outcome }
                });
                Some(("Login", task))
            }
            (Screen::Dashboard(c), ids::DEPOSIT_FORM) => {
                let c = c.clone();
                let task: Task = Box::pin(async move {
                    let outcome = c.submit_deposit().await;
                    Done::Submitted { action: "Deposit", outcome }
                });
                Some(("Deposit", task))
            }
            (Screen::Dashboard(c), ids::WITHDRAW_FORM) => {
                let c = c.clone();
                let task: Task = Box::pin(async move {
                    let outcome = c.submit_withdraw().await;
                    Done::Submitted { action: "Withdraw", outcome }
                });
                Some(("Withdraw", task))
            }
            (Screen::Dashboard(c), ids::TRANSFER_FORM) => {
                let c = c.clone();
                let task: Task = Box::pin(async move {
                    let outcome = c.submit_transfer().await;
                    Done::Submitted { action: "Transfer", outcome }
                });
                Some(("Transfer", task))
            }
            _ => None,
        };

        if let Some((action, task)) = task {
            self.status = format!("{action}: sending...");
            self.spawn(task);
        }
    }

    /// Swap screens when the current page asked to go somewhere else.
    fn follow_navigation(&mut self) -> crate::Result<()> {
        let location = self.with_page(|page| page.location().map(str::to_string));
        let on_login = matches!(self.screen, Screen::Login(_));
        match (location.as_deref(), on_login) {
            (Some(DASHBOARD_PATH), true) => {
                info!(layout = self.layout.as_str(), "opening dashboard");
                let page = templates::dashboard(self.layout);
                let dashboard = DashboardController::new(self.client.clone(), page)?;
                let loader = dashboard.clone();
                self.screen = Screen::Dashboard(dashboard);
                self.status = DASHBOARD_HINT.into();
                self.set_focus(0);
                self.spawn(Box::pin(async move {
                    loader.load().await;
                    Done::Loaded
                }));
            }
            (Some(LOGIN_PATH), false) => {
                info!("back to login");
                let login = LoginController::new(self.client.clone(), templates::login())?;
                self.screen = Screen::Login(login);
                self.status = LOGIN_HINT.into();
                self.set_focus(0);
            }
            _ => {}
        }
        Ok(())
    }
}

fn describe(action: &str, outcome: Outcome) -> String {
    match outcome {
        Outcome::Accepted => format!("{action}: done."),
        Outcome::Rejected => format!("{action}: rejected."),
        Outcome::Failed => format!("{action}: failed."),
    }
}
