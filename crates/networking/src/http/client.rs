//! Loyalty backend HTTP client with header-based authentication

use crate::identity::build_auth_headers;
use miniloot_core::{
    AccrueXpRequest, AccrueXpResponse, AdminUser, AdminUserWire, CallerIdentity, DevTokenResponse,
    Error, ErrorDetail, Lootbox, LootboxWire, MeResponse, OpenOutcome, OpenResultWire, Result,
    UserId, UserSnapshot, Xp,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, Response,
};
use tracing::{debug, error, instrument};

/// Default backend origin when the embedder does not configure one
pub const DEFAULT_API_BASE: &str = "https://grotesquely-pleasing-reedbuck.cloudpub.ru";

/// HTTP client for the loyalty backend
///
/// Attaches the caller's credential headers to every request. The backend is
/// the system of record for balances and the catalog; this client only
/// normalizes what it returns.
pub struct MiniAppClient {
    http: Client,
    api_base: String,
    identity: CallerIdentity,
}

impl MiniAppClient {
    /// Create a client against the given backend origin.
    ///
    /// Trailing slashes on `base_url` are tolerated.
    pub fn new(base_url: &str, identity: CallerIdentity) -> Self {
        let http = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: format!("{}/api", base_url.trim_end_matches('/')),
            identity,
        }
    }

    /// Create a client against the default backend origin
    pub fn with_default_base(identity: CallerIdentity) -> Self {
        Self::new(DEFAULT_API_BASE, identity)
    }

    /// The identity attached to outbound requests
    pub fn identity(&self) -> &CallerIdentity {
        &self.identity
    }

    /// Replace the attached identity (after the host environment
    /// re-initialized and the resolver produced a fresh one)
    pub fn set_identity(&mut self, identity: CallerIdentity) {
        self.identity = identity;
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        build_auth_headers(&self.identity)
    }

    /// Auth headers, with an explicit bearer token taking over when provided
    fn headers_with_bearer(&self, bearer: Option<&str>) -> Result<HeaderMap> {
        let mut headers = self.auth_headers()?;
        if let Some(token) = bearer {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::InvalidData(format!("bearer token not header-safe: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Check if response indicates an authorization failure
    fn check_auth_error(response: &Response) -> Option<Error> {
        match response.status().as_u16() {
            401 => Some(Error::Unauthorized("Authentication required".to_string())),
            403 => Some(Error::Unauthorized("Access forbidden".to_string())),
            _ => None,
        }
    }

    /// Get the caller's account and balance from `GET /api/me`
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<UserSnapshot> {
        let url = format!("{}/me", self.api_base);

        debug!("Fetching caller profile from: {}", url);

        let response = self
            .http
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        debug!("Response status: {}", response.status());

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let response = response.error_for_status().map_err(|e| {
            error!("Profile request failed: {}", e);
            Error::TransportFailure(e.to_string())
        })?;

        let me: MeResponse = response.json().await.map_err(|e| {
            error!("Failed to parse profile response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        let snapshot = me.into_snapshot();
        debug!(
            "Caller resolved: {} ({} XP)",
            snapshot.account.display_name, snapshot.balance.xp
        );
        Ok(snapshot)
    }

    /// Get the lootbox catalog from `GET /api/lootboxes`
    #[instrument(skip(self))]
    pub async fn get_lootboxes(&self) -> Result<Vec<Lootbox>> {
        let url = format!("{}/lootboxes", self.api_base);

        let response = self
            .http
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        let response = response.error_for_status().map_err(|e| {
            error!("Catalog request failed: {}", e);
            Error::TransportFailure(e.to_string())
        })?;

        let wires: Vec<LootboxWire> = response.json().await.map_err(|e| {
            error!("Failed to parse catalog response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        let catalog: Vec<Lootbox> = wires.into_iter().map(LootboxWire::into_lootbox).collect();
        debug!("Catalog fetched: {} lootboxes", catalog.len());
        Ok(catalog)
    }

    /// Open a lootbox via `POST /api/lootboxes/{id}/open`
    ///
    /// The backend is the arbiter of affordability here; a 400 response with
    /// a `detail` body is a well-formed rejection and is classified per its
    /// message, everything else non-2xx is a transport failure.
    #[instrument(skip(self))]
    pub async fn open_lootbox(&self, lootbox_id: &str) -> Result<OpenOutcome> {
        let url = format!("{}/lootboxes/{}/open", self.api_base, lootbox_id);

        debug!("Opening lootbox {}", lootbox_id);

        let response = self
            .http
            .post(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 400 {
            let detail = match response.json::<ErrorDetail>().await {
                Ok(body) => body.detail,
                Err(_) => String::new(),
            };
            let err = rejection_from_detail(detail);
            error!("Open rejected for {}: {}", lootbox_id, err);
            return Err(err);
        }
        if !status.is_success() {
            error!("Open request failed: HTTP {}", status);
            return Err(Error::TransportFailure(format!("HTTP {}", status)));
        }

        let wire: OpenResultWire = response.json().await.map_err(|e| {
            error!("Failed to parse open response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        let outcome = wire.into_outcome();
        debug!(
            "Lootbox {} opened: prize '{}', {} XP remaining",
            lootbox_id, outcome.prize, outcome.remaining_xp
        );
        Ok(outcome)
    }

    /// List all users via `GET /api/admin/users` (authorized)
    #[instrument(skip(self, bearer))]
    pub async fn get_admin_users(&self, bearer: Option<&str>) -> Result<Vec<AdminUser>> {
        let url = format!("{}/admin/users", self.api_base);

        let response = self
            .http
            .get(&url)
            .headers(self.headers_with_bearer(bearer)?)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let response = response.error_for_status().map_err(|e| {
            error!("Admin users request failed: {}", e);
            Error::TransportFailure(e.to_string())
        })?;

        let wires: Vec<AdminUserWire> = response.json().await.map_err(|e| {
            error!("Failed to parse admin users response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        let users: Vec<AdminUser> = wires
            .into_iter()
            .map(AdminUserWire::into_admin_user)
            .collect();
        debug!("Fetched {} admin user rows", users.len());
        Ok(users)
    }

    /// Grant XP via `POST /api/admin/users/{id}/accrue-xp` (authorized).
    /// Returns the user's new XP total.
    #[instrument(skip(self, bearer))]
    pub async fn accrue_xp(
        &self,
        user_id: &UserId,
        request: AccrueXpRequest,
        bearer: Option<&str>,
    ) -> Result<Xp> {
        let url = format!("{}/admin/users/{}/accrue-xp", self.api_base, user_id);

        debug!("Accruing {} XP to user {}", request.amount, user_id);

        let response = self
            .http
            .post(&url)
            .headers(self.headers_with_bearer(bearer)?)
            .json(&request)
            .send()
            .await?;

        if let Some(err) = Self::check_auth_error(&response) {
            return Err(err);
        }

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<ErrorDetail>().await {
                Ok(body) => body.detail,
                Err(_) => format!("HTTP {}", status),
            };
            error!("Accrue request failed: {}", detail);
            return Err(Error::TransactionRejected(detail));
        }

        let body: AccrueXpResponse = response.json().await.map_err(|e| {
            error!("Failed to parse accrue response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        debug!("User {} now has {} XP", user_id, body.xp);
        Ok(Xp::new(body.xp))
    }

    /// Fetch a dev-mode admin bearer token for a Telegram id.
    /// A development convenience the backend only exposes outside production.
    #[instrument(skip(self))]
    pub async fn get_dev_admin_token(&self, telegram_id: i64) -> Result<String> {
        let url = format!("{}/admin/dev/admin-token/{}", self.api_base, telegram_id);

        let response = self.http.get(&url).send().await?;

        let response = response.error_for_status().map_err(|e| {
            debug!("Dev token request failed: {}", e);
            Error::TransportFailure(e.to_string())
        })?;

        let body: DevTokenResponse = response.json().await.map_err(|e| {
            error!("Failed to parse dev token response: {}", e);
            Error::InvalidData(e.to_string())
        })?;

        Ok(body.token)
    }
}

/// Classify a well-formed 400 rejection by its `detail` message.
///
/// The backend phrases an affordability rejection as "Not enough XP"; any
/// other detail is a rejection for reasons the client cannot anticipate
/// (unknown lootbox id, disabled box, ...).
pub(crate) fn rejection_from_detail(detail: String) -> Error {
    let lower = detail.to_lowercase();
    if lower.contains("not enough") || lower.contains("insufficient") {
        Error::InsufficientFunds(detail)
    } else if detail.is_empty() {
        Error::TransactionRejected("Open failed".to_string())
    } else {
        Error::TransactionRejected(detail)
    }
}
