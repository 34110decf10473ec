//! Turns wire models into page nodes.

use rust_decimal::Decimal;

use crate::api::{Account, AccountTypeInfo, Transaction};
use crate::page::Node;
use crate::util::{fmt_money, fmt_timestamp};

pub const EMPTY_TRANSACTIONS: &str = "No transactions yet";

pub fn dollars(d: &Decimal) -> String {
    format!("${}", fmt_money(d))
}

/// `+$10.00` / `-$42.50` and the style class that goes with it.
pub fn signed_amount(t: &Transaction) -> (String, &'static str) {
    if t.kind.is_credit() {
        (format!("+{}", dollars(&t.amount.0)), "positive")
    } else {
        (format!("-{}", dollars(&t.amount.0)), "negative")
    }
}

pub fn transaction_row(t: &Transaction) -> Node {
    let (amount, style) = signed_amount(t);
    Node::new("transaction-item")
        .with_child(
            Node::new("transaction-info")
                .with_child(Node::new("transaction-type").with_text(t.kind.as_str()))
                .with_child(Node::new("transaction-date").with_text(fmt_timestamp(&t.created_at))),
        )
        .with_child(Node::new(format!("transaction-amount {style}")).with_text(amount))
}

/// Rows in server order, or the single placeholder paragraph.
pub fn transaction_rows(transactions: &[Transaction]) -> Vec<Node> {
    if transactions.is_empty() {
        return vec![Node::new("loading").with_text(EMPTY_TRANSACTIONS)];
    }
    transactions.iter().map(transaction_row).collect()
}

pub fn account_card(a: &Account) -> Node {
    let mut details = Node::new("account-details");
    if let Some(rate) = a.interest_rate {
        details = details.with_child(
            Node::new("account-detail").with_text(format!("Interest Rate: {}%", rate.0.normalize())),
        );
    }
    if let Some(min) = a.minimum_balance {
        details = details.with_child(
            Node::new("account-detail").with_text(format!("Minimum Balance: ${}", min.0.normalize())),
        );
    }
    if let Some(desc) = a.description.as_deref().filter(|d| !d.is_empty()) {
        details = details.with_child(Node::new("account-description").with_text(desc));
    }

    Node::new("account-item")
        .with_child(Node::new("account-type").with_text(format!("{} Account", a.account_type)))
        .with_child(Node::new("account-balance").with_text(dollars(&a.balance.0)))
        .with_child(details)
}

/// Placeholder first, then one option per account type.
pub fn account_type_options(placeholder: &str, types: &[AccountTypeInfo]) -> Vec<Node> {
    std::iter::once(Node::option("", placeholder))
        .chain(
            types
                .iter()
                .map(|t| Node::option(t.name.clone(), format!("{} Account", t.name))),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Money, TransactionKind};
    use std::str::FromStr;

    fn txn(kind: &str, amount: &str) -> Transaction {
        Transaction {
            id: None,
            kind: TransactionKind::from(kind.to_string()),
            amount: Money(Decimal::from_str(amount).unwrap()),
            description: None,
            created_at: "2024-03-09 08:30:00".into(),
        }
    }

    #[test]
    fn withdraw_renders_negative() {
        let row = transaction_row(&txn("WITHDRAW", "42.5"));
        let amount = row.find("transaction-amount").unwrap();
        assert_eq!(amount.text, "-$42.50");
        assert!(amount.has_class("negative"));
    }

    #[test]
    fn deposit_renders_positive() {
        let row = transaction_row(&txn("DEPOSIT", "10"));
        let amount = row.find("transaction-amount").unwrap();
        assert_eq!(amount.text, "+$10.00");
        assert!(amount.has_class("positive"));
        assert_eq!(row.find("transaction-type").unwrap().text, "DEPOSIT");
        assert_eq!(row.find("transaction-date").unwrap().text, "3/9/2024, 8:30:00 AM");
    }

    #[test]
    fn transfer_is_always_shown_as_credit() {
        let (text, style) = signed_amount(&txn("TRANSFER", "7"));
        assert_eq!(text, "+$7.00");
        assert_eq!(style, "positive");

        let (text, style) = signed_amount(&txn("INTEREST", "0.5"));
        assert_eq!(text, "-$0.50");
        assert_eq!(style, "negative");
    }

    #[test]
    fn empty_history_is_one_placeholder() {
        let rows = transaction_rows(&[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, EMPTY_TRANSACTIONS);
        assert!(rows[0].find("transaction-item").is_none());
    }

    #[test]
    fn rows_keep_server_order() {
        let rows = transaction_rows(&[txn("WITHDRAW", "1"), txn("DEPOSIT", "2")]);
        let types: Vec<_> = rows
            .iter()
            .map(|r| r.find("transaction-type").unwrap().text.clone())
            .collect();
        assert_eq!(types, vec!["WITHDRAW", "DEPOSIT"]);
    }

    #[test]
    fn card_shows_rate_and_minimum_as_given() {
        let account = Account {
            account_id: 2,
            account_type: "Savings".into(),
            balance: Money(Decimal::from_str("1500").unwrap()),
            interest_rate: Some(Money(Decimal::from_str("2.50").unwrap())),
            minimum_balance: Some(Money(Decimal::from_str("100.0").unwrap())),
            description: None,
            created_at: None,
        };
        let card = account_card(&account);
        assert_eq!(card.find("account-type").unwrap().text, "Savings Account");
        assert_eq!(card.find("account-balance").unwrap().text, "$1500.00");
        let details: Vec<_> = card
            .find("account-details")
            .unwrap()
            .children
            .iter()
            .map(|n| n.text.as_str())
            .collect();
        assert_eq!(details, vec!["Interest Rate: 2.5%", "Minimum Balance: $100"]);
    }

    #[test]
    fn options_start_with_placeholder() {
        let types = vec![
            AccountTypeInfo {
                name: "Checking".into(),
                interest_rate: None,
                minimum_balance: None,
                description: None,
            },
            AccountTypeInfo {
                name: "Savings".into(),
                interest_rate: None,
                minimum_balance: None,
                description: None,
            },
        ];
        let options = account_type_options("Select Source Account", &types);
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value.as_deref(), Some(""));
        assert_eq!(options[2].value.as_deref(), Some("Savings"));
        assert_eq!(options[2].text, "Savings Account");
    }
}
