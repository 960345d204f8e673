//! Typed HTTP client for the tracker API.
//!
//! Front-ends refresh lists and the dashboard whenever a filter changes, so
//! several requests for the same panel can be in flight at once. The
//! [`RequestGuard`] hands out monotonically increasing tokens; a response is
//! delivered only when its token is still the latest, and stale responses
//! are dropped instead of overwriting newer data.

use std::sync::atomic::{AtomicU64, Ordering};

use api_types::dashboard::{DashboardQuery, DashboardResponse};
use api_types::expense::{ExpenseList, ExpenseListResponse};
use api_types::income::{IncomeList, IncomeListResponse};
use api_types::payroll::{OperatorPayrollResponse, PayrollQuery};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
}

/// Monotonic token source for discarding stale responses.
#[derive(Debug, Default)]
pub struct RequestGuard {
    seq: AtomicU64,
}

/// A token issued by [`RequestGuard::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestToken(u64);

impl RequestGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request generation, invalidating all earlier tokens.
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns `true` when `token` belongs to the latest generation.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.seq.load(Ordering::SeqCst) == token.0
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    async fn get_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .basic_auth(&self.username, Some(&self.password))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json::<T>().await?)
    }

    pub async fn list_expenses(
        &self,
        query: &ExpenseList,
    ) -> Result<ExpenseListResponse, ClientError> {
        self.get_json("/expenses", query).await
    }

    pub async fn list_incomes(
        &self,
        query: &IncomeList,
    ) -> Result<IncomeListResponse, ClientError> {
        self.get_json("/incomes", query).await
    }

    pub async fn operator_payroll(
        &self,
        query: &PayrollQuery,
    ) -> Result<OperatorPayrollResponse, ClientError> {
        self.get_json("/payroll/operators", query).await
    }

    pub async fn dashboard(
        &self,
        query: &DashboardQuery,
    ) -> Result<DashboardResponse, ClientError> {
        self.get_json("/dashboard", query).await
    }

    /// Fetches the dashboard under `guard`; returns `Ok(None)` when another
    /// request superseded this one while it was in flight.
    pub async fn dashboard_latest(
        &self,
        guard: &RequestGuard,
        query: &DashboardQuery,
    ) -> Result<Option<DashboardResponse>, ClientError> {
        let token = guard.begin();
        let response = self.dashboard(query).await?;
        if guard.is_current(token) {
            Ok(Some(response))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_token_wins() {
        let guard = RequestGuard::new();
        let first = guard.begin();
        let second = guard.begin();

        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn tokens_stay_stale_after_further_requests() {
        let guard = RequestGuard::new();
        let old = guard.begin();
        for _ in 0..10 {
            guard.begin();
        }
        assert!(!guard.is_current(old));
    }
}
