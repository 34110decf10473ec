//! Login controller.

use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

use crate::api::{Client, LoginRequest};
use crate::controller::{Outcome, PageGuard, LOGIN_GENERIC_ERROR};
use crate::error::Result;
use crate::page::bindings::Binder;
use crate::page::templates::{ids, DASHBOARD_PATH};
use crate::page::{ElementId, Page};

#[derive(Clone)]
pub struct LoginController {
    client: Client,
    page: Arc<Mutex<Page>>,
    account_number: ElementId,
    password: ElementId,
    error_message: ElementId,
}

impl LoginController {
    pub fn new(client: Client, page: Page) -> Result<Self> {
        let b = Binder::new(&page);
        let account_number = b.require(ids::ACCOUNT_NUMBER)?;
        let password = b.require(ids::PASSWORD)?;
        let error_message = b.require(ids::ERROR_MESSAGE)?;
        Ok(Self {
            client,
            page: Arc::new(Mutex::new(page)),
            account_number,
            password,
            error_message,
        })
    }

    pub fn page(&self) -> PageGuard<'_, Page> {
        PageGuard::new(&self.page)
    }

    /// Send the credentials as typed. On `success` the page navigates to the
    /// dashboard; otherwise the reason is shown under the form.
    pub async fn submit(&self) -> Outcome {
        let req = {
            let page = self.page();
            LoginRequest {
                account_number: page.value(self.account_number).to_string(),
                password: page.value(self.password).to_string(),
            }
        };

        match self.client.login(&req).await {
            Ok(reply) if reply.success => {
                info!(account_number = %req.account_number, "login accepted");
                self.page().navigate(DASHBOARD_PATH);
                Outcome::Accepted
            }
            Ok(reply) => {
                warn!(account_number = %req.account_number, "login rejected");
                self.show_error(reply.message.as_deref().unwrap_or_default());
                Outcome::Rejected
            }
            Err(e) => {
                error!(error = %e, "login request failed");
                self.show_error(LOGIN_GENERIC_ERROR);
                Outcome::Failed
            }
        }
    }

    fn show_error(&self, message: &str) {
        let mut page = self.page();
        page.set_text(self.error_message, message);
        page.set_visible(self.error_message, true);
    }
}
