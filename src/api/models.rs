//! Wire types exchanged with the bank server.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A JSON number held as a decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] pub Decimal);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    pub account_type: String,
    pub balance: Money,
    #[serde(default)]
    pub interest_rate: Option<Money>,
    #[serde(default)]
    pub minimum_balance: Option<Money>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `/api/account-info` answers either with a list or with a bare account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AccountInfo {
    Many { accounts: Vec<Account> },
    Single(Account),
}

impl AccountInfo {
    pub fn into_accounts(self) -> Vec<Account> {
        match self {
            Self::Many { accounts } => accounts,
            Self::Single(account) => vec![account],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Transfer,
    Other(String),
}

impl TransactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
            Self::Transfer => "TRANSFER",
            Self::Other(s) => s,
        }
    }

    /// Displayed as money in. TRANSFER counts as a credit whatever its
    /// direction; every unknown kind counts as a debit.
    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Deposit | Self::Transfer)
    }
}

impl From<String> for TransactionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "DEPOSIT" => Self::Deposit,
            "WITHDRAW" => Self::Withdraw,
            "TRANSFER" => Self::Transfer,
            _ => Self::Other(s),
        }
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Serialize for TransactionKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Money,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountTypeInfo {
    pub name: String,
    #[serde(default)]
    pub interest_rate: Option<Money>,
    #[serde(default)]
    pub minimum_balance: Option<Money>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountTypes {
    pub account_types: Vec<AccountTypeInfo>,
}

// ============= Requests =============

/// Deposit and withdraw body. An unparseable amount goes out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmountRequest {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    Internal,
    External,
}

impl TransferType {
    /// Anything but `external` is an internal transfer.
    pub fn from_value(value: &str) -> Self {
        if value == "external" {
            Self::External
        } else {
            Self::Internal
        }
    }
}

/// Where an account-type transfer goes: one of the holder's own account
/// types, or a raw account number outside the holder's set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Destination {
    #[serde(rename = "toAccountType")]
    AccountType(String),
    #[serde(rename = "to_account")]
    AccountNumber(String),
}

/// `{amount, to_account_number}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectTransfer {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub to_account_number: String,
}

/// `{amount, transferType, fromAccountType, toAccountType | to_account}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedTransfer {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    #[serde(rename = "transferType")]
    pub transfer_type: TransferType,
    #[serde(rename = "fromAccountType")]
    pub from_account_type: String,
    #[serde(flatten)]
    pub destination: Destination,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TransferRequest {
    Direct(DirectTransfer),
    ByType(TypedTransfer),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub account_number: String,
    pub password: String,
}

// ============= Replies =============

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a non-2xx reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}
