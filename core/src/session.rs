//! Async calls over a [`Transport`], with cooperative cancellation.
//!
//! # Design
//! `Session` pairs a `MailerClient` with a transport and runs the
//! build / send / parse sequence for one call. It holds no mutable state, so
//! it can be shared across tasks behind an `Arc`. Each call races the
//! transport against the caller's `CancellationToken`; whichever finishes
//! first decides the result. Dropping the transport future is the only
//! cleanup cancellation performs.

use tokio_util::sync::CancellationToken;

use crate::client::MailerClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{SuppressionEntry, SuppressionKind, SuppressionQuery};

#[derive(Debug, Clone)]
pub struct Session<T> {
    client: MailerClient,
    transport: T,
}

impl Session<ReqwestTransport> {
    /// Client and `reqwest` transport built from one configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(
            MailerClient::from_config(config),
            ReqwestTransport::from_config(config)?,
        ))
    }
}

impl<T: Transport> Session<T> {
    pub fn new(client: MailerClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &MailerClient {
        &self.client
    }

    /// Send one request, or return `ApiError::Cancelled` if `cancel` fires first.
    pub async fn execute(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, ApiError> {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        tracing::debug!(path = %request.path, params = request.params.len(), "sending request");
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("request cancelled before the response arrived");
                Err(ApiError::Cancelled)
            }
            result = self.transport.send(request) => result,
        }
    }

    /// Execute a request built by any `build_*` method and decode it with the
    /// matching `parse_*` method.
    ///
    /// ```no_run
    /// # use mailer_core::{MailerClient, Session, ReqwestTransport};
    /// # use tokio_util::sync::CancellationToken;
    /// # async fn demo(session: Session<ReqwestTransport>) -> Result<(), mailer_core::ApiError> {
    /// let cancel = CancellationToken::new();
    /// let request = session.client().build_get_campaign("user-key", 42, None);
    /// let campaign = session
    ///     .call(request, &cancel, MailerClient::parse_get_campaign)
    ///     .await?;
    /// # Ok(()) }
    /// ```
    pub async fn call<R, F>(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
        parse: F,
    ) -> Result<R, ApiError>
    where
        F: FnOnce(&MailerClient, HttpResponse) -> Result<R, ApiError>,
    {
        let response = self.execute(request, cancel).await?;
        parse(&self.client, response)
    }

    // -----------------------------------------------------------------------
    // Suppression lists
    // -----------------------------------------------------------------------

    pub async fn import_suppressed<S: AsRef<str>>(
        &self,
        user_key: &str,
        kind: SuppressionKind,
        values: &[S],
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<Vec<SuppressionEntry>, ApiError> {
        let request = self
            .client
            .build_import_suppressed(user_key, kind, values, client_id);
        let response = self.execute(request, cancel).await?;
        self.client.parse_import_suppressed(kind, response)
    }

    pub async fn export_suppressed(
        &self,
        user_key: &str,
        kind: SuppressionKind,
        query: &SuppressionQuery,
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<Vec<SuppressionEntry>, ApiError> {
        let request = self
            .client
            .build_export_suppressed(user_key, kind, query, client_id);
        let response = self.execute(request, cancel).await?;
        self.client.parse_export_suppressed(kind, response)
    }

    pub async fn count_suppressed(
        &self,
        user_key: &str,
        kind: SuppressionKind,
        query: &SuppressionQuery,
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<u64, ApiError> {
        let request = self
            .client
            .build_count_suppressed(user_key, kind, query, client_id);
        self.call(request, cancel, MailerClient::parse_count_suppressed)
            .await
    }

    pub async fn delete_suppressed<S: AsRef<str>>(
        &self,
        user_key: &str,
        kind: SuppressionKind,
        values: &[S],
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<bool, ApiError> {
        let request = self
            .client
            .build_delete_suppressed(user_key, kind, values, client_id);
        self.call(request, cancel, MailerClient::parse_delete_suppressed)
            .await
    }

    pub async fn import_emails<S: AsRef<str>>(
        &self,
        user_key: &str,
        emails: &[S],
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<Vec<SuppressionEntry>, ApiError> {
        self.import_suppressed(user_key, SuppressionKind::Email, emails, client_id, cancel)
            .await
    }

    pub async fn export_emails(
        &self,
        user_key: &str,
        query: &SuppressionQuery,
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<Vec<SuppressionEntry>, ApiError> {
        self.export_suppressed(user_key, SuppressionKind::Email, query, client_id, cancel)
            .await
    }

    pub async fn delete_emails<S: AsRef<str>>(
        &self,
        user_key: &str,
        emails: &[S],
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<bool, ApiError> {
        self.delete_suppressed(user_key, SuppressionKind::Email, emails, client_id, cancel)
            .await
    }

    pub async fn import_domains<S: AsRef<str>>(
        &self,
        user_key: &str,
        domains: &[S],
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<Vec<SuppressionEntry>, ApiError> {
        self.import_suppressed(user_key, SuppressionKind::Domain, domains, client_id, cancel)
            .await
    }

    pub async fn export_domains(
        &self,
        user_key: &str,
        query: &SuppressionQuery,
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<Vec<SuppressionEntry>, ApiError> {
        self.export_suppressed(user_key, SuppressionKind::Domain, query, client_id, cancel)
            .await
    }

    pub async fn delete_domains<S: AsRef<str>>(
        &self,
        user_key: &str,
        domains: &[S],
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<bool, ApiError> {
        self.delete_suppressed(user_key, SuppressionKind::Domain, domains, client_id, cancel)
            .await
    }

    pub async fn import_localparts<S: AsRef<str>>(
        &self,
        user_key: &str,
        localparts: &[S],
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<Vec<SuppressionEntry>, ApiError> {
        self.import_suppressed(user_key, SuppressionKind::Localpart, localparts, client_id, cancel)
            .await
    }

    pub async fn export_localparts(
        &self,
        user_key: &str,
        query: &SuppressionQuery,
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<Vec<SuppressionEntry>, ApiError> {
        self.export_suppressed(user_key, SuppressionKind::Localpart, query, client_id, cancel)
            .await
    }

    pub async fn delete_localparts<S: AsRef<str>>(
        &self,
        user_key: &str,
        localparts: &[S],
        client_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<bool, ApiError> {
        self.delete_suppressed(user_key, SuppressionKind::Localpart, localparts, client_id, cancel)
            .await
    }
}
