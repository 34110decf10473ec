//! Dashboard controller.
//!
//! One controller serves both dashboard layouts. Which parts of the page it
//! drives is decided when it is built, from the elements the page offers:
//!
//! - `accountsContainer` → one card per account, balance shows the total
//! - `accountType` → type label of the first account
//! - `fromAccountType` + `toAccountType` → account-type transfers, populated
//!   from `/api/account-types`
//! - `transferType` + `externalAccount` → internal/external toggle
//! - `toAccountNumber` → direct transfers by account number

use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::api::{
    Account, AmountRequest, ApiError, Client, Destination, DirectTransfer, MessageReply,
    TransferRequest, TransferType, TypedTransfer,
};
use crate::controller::notify::Notifier;
use crate::controller::render;
use crate::controller::{lock, Outcome, PageGuard, GENERIC_ERROR};
use crate::error::{Error, Result};
use crate::page::bindings::Binder;
use crate::page::templates::{ids, FROM_PLACEHOLDER, LOGIN_PATH, TO_PLACEHOLDER};
use crate::page::{ElementId, Page};
use crate::util::parse_amount;

pub const NO_ACCOUNT_SELECTED: &str = "No account selected";

/// Optional parts of the dashboard that were found on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Features {
    pub multi_account: bool,
    pub account_type_label: bool,
    pub account_type_dropdowns: bool,
    pub transfer_toggle: bool,
}

#[derive(Debug, Clone, Copy)]
struct TransferToggle {
    transfer_type: ElementId,
    external_account: ElementId,
}

#[derive(Debug, Clone, Copy)]
enum TransferTarget {
    Direct {
        to_account_number: ElementId,
    },
    ByType {
        from_account_type: ElementId,
        to_account_type: ElementId,
        toggle: Option<TransferToggle>,
    },
}

#[derive(Debug, Clone, Copy)]
struct Bindings {
    balance: ElementId,
    account_type: Option<ElementId>,
    accounts_container: Option<ElementId>,
    transactions_list: ElementId,
    deposit_amount: ElementId,
    withdraw_amount: ElementId,
    transfer_amount: ElementId,
    transfer: TransferTarget,
}

impl Bindings {
    fn resolve(page: &Page) -> Result<Self> {
        let b = Binder::new(page);

        let transfer = match b.all([ids::FROM_ACCOUNT_TYPE, ids::TO_ACCOUNT_TYPE]) {
            Some([from_account_type, to_account_type]) => TransferTarget::ByType {
                from_account_type,
                to_account_type,
                toggle: b
                    .all([ids::TRANSFER_TYPE, ids::EXTERNAL_ACCOUNT])
                    .map(|[transfer_type, external_account]| TransferToggle {
                        transfer_type,
                        external_account,
                    }),
            },
            None => TransferTarget::Direct {
                to_account_number: b
                    .optional(ids::TO_ACCOUNT_NUMBER)
                    .ok_or_else(|| Error::NoTransferTarget(page.name().to_string()))?,
            },
        };

        Ok(Self {
            balance: b.require(ids::BALANCE)?,
            account_type: b.optional(ids::ACCOUNT_TYPE),
            accounts_container: b.optional(ids::ACCOUNTS_CONTAINER),
            transactions_list: b.require(ids::TRANSACTIONS_LIST)?,
            deposit_amount: b.require(ids::DEPOSIT_AMOUNT)?,
            withdraw_amount: b.require(ids::WITHDRAW_AMOUNT)?,
            transfer_amount: b.require(ids::TRANSFER_AMOUNT)?,
            transfer,
        })
    }

    fn features(&self) -> Features {
        let (dropdowns, toggle) = match self.transfer {
            TransferTarget::Direct { .. } => (false, false),
            TransferTarget::ByType { toggle, .. } => (true, toggle.is_some()),
        };
        Features {
            multi_account: self.accounts_container.is_some(),
            account_type_label: self.account_type.is_some(),
            account_type_dropdowns: dropdowns,
            transfer_toggle: toggle,
        }
    }
}

/// Per-session view state.
#[derive(Debug, Default)]
struct Session {
    /// First account of the latest successful account load
    current_account: Option<i64>,
}

/// Everything a dashboard handler updates in one step.
pub struct View {
    page: Page,
    notifier: Notifier,
    session: Session,
}

impl View {
    fn notify(&mut self, message: &str, is_error: bool) {
        self.notifier.show(&mut self.page, message, is_error);
    }
}

impl AsRef<Page> for View {
    fn as_ref(&self) -> &Page {
        &self.page
    }
}

impl AsMut<Page> for View {
    fn as_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}

#[derive(Clone)]
pub struct DashboardController {
    client: Client,
    bindings: Bindings,
    view: Arc<Mutex<View>>,
}

impl DashboardController {
    /// Bind to `page`, failing if a required element is absent.
    pub fn new(client: Client, page: Page) -> Result<Self> {
        let bindings = Bindings::resolve(&page)?;
        let notifier = Notifier::bind(&page)?;
        info!(page = page.name(), features = ?bindings.features(), "dashboard bound");
        Ok(Self {
            client,
            bindings,
            view: Arc::new(Mutex::new(View {
                page,
                notifier,
                session: Session::default(),
            })),
        })
    }

    pub fn page(&self) -> PageGuard<'_, View> {
        PageGuard::new(&self.view)
    }

    fn view(&self) -> MutexGuard<'_, View> {
        lock(&self.view)
    }

    fn value(&self, id: ElementId) -> String {
        self.view().page.value(id).to_string()
    }

    pub fn features(&self) -> Features {
        self.bindings.features()
    }

    pub fn current_account_id(&self) -> Option<i64> {
        self.view().session.current_account
    }

    /// Page-load sequence.
    pub async fn load(&self) {
        self.update_transfer_form();
        self.load_account_info().await;
        self.load_transactions().await;
        if self.features().account_type_dropdowns {
            self.load_account_types().await;
        }
    }

    /// Account info, then transactions.
    pub async fn refresh(&self) {
        self.load_account_info().await;
        self.load_transactions().await;
    }

    pub fn tick(&self) {
        let mut view = self.view();
        let View { page, notifier, .. } = &mut *view;
        notifier.tick(page);
    }

    pub fn notify(&self, message: &str, is_error: bool) {
        self.view().notify(message, is_error);
    }

    // ============= Loaders =============

    /// Failures are logged; the page keeps what it showed before.
    pub async fn load_account_info(&self) {
        match self.client.account_info().await {
            Ok(info) => self.show_accounts(&info.into_accounts()),
            Err(e) => error!(error = %e, "error loading account info"),
        }
    }

    fn show_accounts(&self, accounts: &[Account]) {
        let Some(first) = accounts.first() else {
            return;
        };

        let total: Decimal = accounts.iter().map(|a| a.balance.0).sum();
        let mut view = self.view();
        view.page.set_text(self.bindings.balance, render::dollars(&total));

        if let Some(label) = self.bindings.account_type {
            view.page.set_text(label, first.account_type.as_str());
        }
        if let Some(container) = self.bindings.accounts_container {
            view.page
                .replace_children(container, accounts.iter().map(render::account_card).collect());
        }

        view.session.current_account = Some(first.account_id);
    }

    /// Failures are logged; the list keeps what it showed before.
    pub async fn load_transactions(&self) {
        match self.client.transactions().await {
            Ok(transactions) => self.view().page.replace_children(
                self.bindings.transactions_list,
                render::transaction_rows(&transactions),
            ),
            Err(e) => error!(error = %e, "error loading transactions"),
        }
    }

    /// Refill both account-type selects, each reset to its placeholder.
    pub async fn load_account_types(&self) {
        let TransferTarget::ByType {
            from_account_type,
            to_account_type,
            ..
        } = self.bindings.transfer
        else {
            return;
        };

        match self.client.account_types().await {
            Ok(types) => {
                let mut view = self.view();
                let page = &mut view.page;
                page.replace_children(
                    from_account_type,
                    render::account_type_options(FROM_PLACEHOLDER, &types),
                );
                page.replace_children(
                    to_account_type,
                    render::account_type_options(TO_PLACEHOLDER, &types),
                );
                page.clear_value(from_account_type);
                page.clear_value(to_account_type);
            }
            Err(e) => error!(error = %e, "error loading account types"),
        }
    }

    // ============= Transfer type toggle =============

    /// Show and require exactly one destination field for the selected
    /// transfer type.
    pub fn update_transfer_form(&self) {
        let TransferTarget::ByType {
            to_account_type,
            toggle: Some(toggle),
            ..
        } = self.bindings.transfer
        else {
            return;
        };

        let mut view = self.view();
        let page = &mut view.page;
        let external =
            TransferType::from_value(page.value(toggle.transfer_type)) == TransferType::External;
        page.set_visible(to_account_type, !external);
        page.set_visible(toggle.external_account, external);
        page.set_required(to_account_type, !external);
        page.set_required(toggle.external_account, external);
    }

    pub fn on_transfer_type_change(&self) {
        self.update_transfer_form();
    }

    // ============= Forms =============

    pub async fn submit_deposit(&self) -> Outcome {
        let field = self.bindings.deposit_amount;
        let req = AmountRequest {
            amount: parse_amount(&self.value(field)),
        };
        let reply = self.client.deposit(&req).await;
        self.settle("deposit", reply, &[field]).await
    }

    pub async fn submit_withdraw(&self) -> Outcome {
        let field = self.bindings.withdraw_amount;
        let req = AmountRequest {
            amount: parse_amount(&self.value(field)),
        };
        let reply = self.client.withdraw(&req).await;
        self.settle("withdraw", reply, &[field]).await
    }

    pub async fn submit_transfer(&self) -> Outcome {
        let (req, clear) = self.transfer_request();
        let reply = self.client.transfer(&req).await;
        self.settle("transfer", reply, &clear).await
    }

    /// Read the transfer form into a request, plus the fields a successful
    /// transfer clears.
    fn transfer_request(&self) -> (TransferRequest, Vec<ElementId>) {
        let view = self.view();
        let page = &view.page;
        let amount_field = self.bindings.transfer_amount;
        let amount = parse_amount(page.value(amount_field));

        match self.bindings.transfer {
            TransferTarget::Direct { to_account_number } => (
                TransferRequest::Direct(DirectTransfer {
                    amount,
                    to_account_number: page.value(to_account_number).to_string(),
                }),
                vec![amount_field, to_account_number],
            ),
            TransferTarget::ByType {
                from_account_type,
                to_account_type,
                toggle,
            } => {
                let transfer_type = toggle
                    .map(|t| TransferType::from_value(page.value(t.transfer_type)))
                    .unwrap_or(TransferType::Internal);
                let (destination, target_field) = match (transfer_type, toggle) {
                    (TransferType::External, Some(t)) => (
                        Destination::AccountNumber(page.value(t.external_account).to_string()),
                        t.external_account,
                    ),
                    _ => (
                        Destination::AccountType(page.value(to_account_type).to_string()),
                        to_account_type,
                    ),
                };
                (
                    TransferRequest::ByType(TypedTransfer {
                        amount,
                        transfer_type,
                        from_account_type: page.value(from_account_type).to_string(),
                        destination,
                    }),
                    vec![amount_field, from_account_type, target_field],
                )
            }
        }
    }

    /// Apply interest to the current account.
    pub async fn apply_interest(&self) -> Outcome {
        let current = self.current_account_id();
        let Some(account_id) = current else {
            self.notify(NO_ACCOUNT_SELECTED, true);
            return Outcome::Rejected;
        };
        let reply = self.client.calculate_interest(account_id).await;
        self.settle("interest", reply, &[]).await
    }

    /// End the server session and head back to the login page.
    pub async fn logout(&self) {
        if let Err(e) = self.client.logout().await {
            warn!(error = %e, "logout request failed");
        }
        let mut view = self.view();
        view.session = Session::default();
        view.page.navigate(LOGIN_PATH);
    }

    /// Common tail of every write: notify, and on success clear `fields` and
    /// refresh account info then transactions.
    async fn settle(
        &self,
        action: &str,
        reply: std::result::Result<MessageReply, ApiError>,
        fields: &[ElementId],
    ) -> Outcome {
        match reply {
            Ok(reply) => {
                info!(action, "request accepted");
                {
                    let mut view = self.view();
                    view.notify(&reply.message, false);
                    for &field in fields {
                        view.page.clear_value(field);
                    }
                }
                self.refresh().await;
                Outcome::Accepted
            }
            Err(e @ ApiError::Rejected { .. }) => {
                warn!(action, error = %e, "request rejected");
                self.notify(e.server_message().unwrap_or(GENERIC_ERROR), true);
                Outcome::Rejected
            }
            Err(e) => {
                error!(action, error = %e, "request failed");
                self.notify(GENERIC_ERROR, true);
                Outcome::Failed
            }
        }
    }
}
