//! Page layouts: the login page and the two dashboard variants.

use crate::config::Layout;
use crate::page::{Column, Element, Node, Page};

pub mod ids {
    pub const LOGIN_FORM: &str = "loginForm";
    pub const ACCOUNT_NUMBER: &str = "account_number";
    pub const PASSWORD: &str = "password";
    pub const ERROR_MESSAGE: &str = "error-message";

    pub const BALANCE: &str = "balance";
    pub const ACCOUNT_TYPE: &str = "accountType";
    pub const ACCOUNTS_CONTAINER: &str = "accountsContainer";
    pub const TRANSACTIONS_LIST: &str = "transactionsList";
    pub const NOTIFICATION: &str = "notification";
    pub const NOTIFICATION_MESSAGE: &str = "notificationMessage";

    pub const DEPOSIT_FORM: &str = "depositForm";
    pub const DEPOSIT_AMOUNT: &str = "depositAmount";
    pub const WITHDRAW_FORM: &str = "withdrawForm";
    pub const WITHDRAW_AMOUNT: &str = "withdrawAmount";
    pub const TRANSFER_FORM: &str = "transferForm";
    pub const TRANSFER_AMOUNT: &str = "transferAmount";
    pub const TO_ACCOUNT_NUMBER: &str = "toAccountNumber";
    pub const TRANSFER_TYPE: &str = "transferType";
    pub const FROM_ACCOUNT_TYPE: &str = "fromAccountType";
    pub const TO_ACCOUNT_TYPE: &str = "toAccountType";
    pub const EXTERNAL_ACCOUNT: &str = "externalAccount";
}

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

pub const FROM_PLACEHOLDER: &str = "Select Source Account";
pub const TO_PLACEHOLDER: &str = "Select Destination Account";

pub fn login() -> Page {
    let mut page = Page::new("login");
    page.add_panel(
        "SecureBank Login",
        Column::Left,
        vec![
            Element::input(ids::ACCOUNT_NUMBER, "Account Number")
                .in_form(ids::LOGIN_FORM)
                .required(),
            Element::password(ids::PASSWORD, "Password")
                .in_form(ids::LOGIN_FORM)
                .required(),
            Element::text(ids::ERROR_MESSAGE)
                .with_class("error-message")
                .hidden(),
        ],
    );
    page
}

pub fn dashboard(layout: Layout) -> Page {
    let mut page = Page::new("dashboard");

    let summary = match layout {
        Layout::Simple => vec![
            Element::text(ids::ACCOUNT_TYPE).with_label("Account Type"),
            Element::text(ids::BALANCE).with_label("Balance").with_text("$0.00"),
        ],
        Layout::Multi => vec![
            Element::text(ids::BALANCE).with_label("Total Balance").with_text("$0.00"),
            Element::container(ids::ACCOUNTS_CONTAINER),
        ],
    };
    page.add_panel("Account Summary", Column::Left, summary);

    let mut list = Element::container(ids::TRANSACTIONS_LIST);
    list.children = vec![Node::new("loading").with_text("Loading transactions...")];
    page.add_panel("Recent Transactions", Column::Left, vec![list]);

    page.add_panel(
        "Deposit",
        Column::Right,
        vec![Element::input(ids::DEPOSIT_AMOUNT, "Amount")
            .in_form(ids::DEPOSIT_FORM)
            .required()],
    );
    page.add_panel(
        "Withdraw",
        Column::Right,
        vec![Element::input(ids::WITHDRAW_AMOUNT, "Amount")
            .in_form(ids::WITHDRAW_FORM)
            .required()],
    );

    let transfer = match layout {
        Layout::Simple => vec![
            Element::input(ids::TRANSFER_AMOUNT, "Amount")
                .in_form(ids::TRANSFER_FORM)
                .required(),
            Element::input(ids::TO_ACCOUNT_NUMBER, "To Account Number")
                .in_form(ids::TRANSFER_FORM)
                .required(),
        ],
        Layout::Multi => vec![
            Element::input(ids::TRANSFER_AMOUNT, "Amount")
                .in_form(ids::TRANSFER_FORM)
                .required(),
            Element::select(
                ids::TRANSFER_TYPE,
                "Transfer Type",
                vec![
                    Node::option("internal", "Between my accounts"),
                    Node::option("external", "To another customer"),
                ],
            )
            .in_form(ids::TRANSFER_FORM),
            Element::select(
                ids::FROM_ACCOUNT_TYPE,
                "From",
                vec![Node::option("", FROM_PLACEHOLDER)],
            )
            .in_form(ids::TRANSFER_FORM)
            .required(),
            Element::select(
                ids::TO_ACCOUNT_TYPE,
                "To",
                vec![Node::option("", TO_PLACEHOLDER)],
            )
            .in_form(ids::TRANSFER_FORM)
            .required(),
            Element::input(ids::EXTERNAL_ACCOUNT, "Recipient Account Number")
                .in_form(ids::TRANSFER_FORM)
                .hidden(),
        ],
    };
    page.add_panel("Transfer", Column::Right, transfer);

    let panel = page.add_panel(
        "Notification",
        Column::Footer,
        vec![
            Element::container(ids::NOTIFICATION)
                .with_class("notification")
                .hidden(),
            Element::text(ids::NOTIFICATION_MESSAGE),
        ],
    );
    if let Some(notification) = page.find(ids::NOTIFICATION) {
        page.show_panel_with(panel, notification);
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_dashboard_starts_on_internal_transfers() {
        let page = dashboard(Layout::Multi);
        let transfer_type = page.find(ids::TRANSFER_TYPE).unwrap();
        assert_eq!(page.value(transfer_type), "internal");
        assert!(page.find(ids::TO_ACCOUNT_NUMBER).is_none());
        assert!(page.find(ids::ACCOUNTS_CONTAINER).is_some());
    }

    #[test]
    fn simple_dashboard_has_direct_transfer_only() {
        let page = dashboard(Layout::Simple);
        assert!(page.find(ids::TO_ACCOUNT_NUMBER).is_some());
        assert!(page.find(ids::TRANSFER_TYPE).is_none());
        assert!(page.find(ids::ACCOUNTS_CONTAINER).is_none());
    }

    #[test]
    fn notification_panel_follows_container() {
        let page = dashboard(Layout::Simple);
        let notification = page.find(ids::NOTIFICATION).unwrap();
        let panel = page.panels().iter().find(|p| p.title == "Notification").unwrap();
        assert_eq!(panel.shown_by, Some(notification));
        assert!(!page.is_visible(notification));
    }
}
