//! HTTP+JSON client for the bank server.
//!
//! Every call is relative to one base URL. The session is the cookie the
//! server sets on `/login`; clones of a [`Client`] share the cookie jar.

pub mod models;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub use models::{
    Account, AccountInfo, AccountTypeInfo, AccountTypes, AmountRequest, Destination,
    DirectTransfer, LoginReply, LoginRequest, MessageReply, Money, Transaction, TransactionKind,
    TransferRequest, TransferType, TypedTransfer,
};
use models::ErrorBody;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, reset, ...)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response arrived but its body was not the expected JSON
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered with a non-2xx status
    #[error("server rejected request with {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("invalid base url `{url}`: {message}")]
    InvalidBaseUrl { url: String, message: String },
}

impl ApiError {
    /// Message the server attached to a rejection, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.clone(),
            message: e.to_string(),
        })?;

        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ============= Reads =============

    pub async fn account_info(&self) -> Result<AccountInfo, ApiError> {
        self.get_json("/api/account-info").await
    }

    pub async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_json("/api/transactions").await
    }

    pub async fn account_types(&self) -> Result<Vec<AccountTypeInfo>, ApiError> {
        let types: AccountTypes = self.get_json("/api/account-types").await?;
        Ok(types.account_types)
    }

    // ============= Writes =============

    pub async fn deposit(&self, req: &AmountRequest) -> Result<MessageReply, ApiError> {
        self.post_json("/api/deposit", req).await
    }

    pub async fn withdraw(&self, req: &AmountRequest) -> Result<MessageReply, ApiError> {
        self.post_json("/api/withdraw", req).await
    }

    pub async fn transfer(&self, req: &TransferRequest) -> Result<MessageReply, ApiError> {
        self.post_json("/api/transfer", req).await
    }

    pub async fn calculate_interest(&self, account_id: i64) -> Result<MessageReply, ApiError> {
        let path = format!("/api/accounts/{account_id}/calculate-interest");
        self.post_json(&path, &serde_json::json!({})).await
    }

    // ============= Session =============

    /// The login reply carries `success` whatever the status code, so the
    /// body is decoded without checking the status first.
    pub async fn login(&self, req: &LoginRequest) -> Result<LoginReply, ApiError> {
        debug!(path = "/login", "POST");
        let resp = self.http.post(self.url("/login")).json(req).send().await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        debug!(path = "/logout", "GET");
        let resp = self.http.get(self.url("/logout")).send().await?;
        let status = resp.status();
        if status.is_success() || status.is_redirection() {
            Ok(())
        } else {
            Err(ApiError::Rejected { status, message: None })
        }
    }

    // ============= Helpers =============

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let resp = self.http.get(self.url(path)).send().await?;
        decode(resp).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "POST");
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(ErrorBody::into_message);
        return Err(ApiError::Rejected { status, message });
    }

    Ok(serde_json::from_slice(&bytes)?)
}
