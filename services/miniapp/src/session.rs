//! Telegram session bootstrap and token management
//!
//! The access/refresh pair lives in origin-scoped persistent storage; any
//! component may read it, but only the login and re-authentication flows
//! write it. Re-authentication is single-flight: concurrent 401s trigger at
//! most one credential exchange, and every waiter observes the stored pair
//! before retrying its original request.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use common::error::{ApiError, ApiResult, AuthError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::api::{ApiRequest, Transport};
use crate::telegram::TelegramBridge;

/// An access/refresh token pair as issued by `POST /auth/telegram`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Persistent storage for the token pair (origin-scoped in the host shell)
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Option<TokenPair>;
    fn save(&self, pair: &TokenPair);
    fn clear(&self);
}

/// In-memory storage, used in tests and as a fallback
#[derive(Default)]
pub struct MemoryStorage {
    inner: StdMutex<Option<TokenPair>>,
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Option<TokenPair> {
        self.inner.lock().expect("token storage poisoned").clone()
    }

    fn save(&self, pair: &TokenPair) {
        *self.inner.lock().expect("token storage poisoned") = Some(pair.clone());
    }

    fn clear(&self) {
        *self.inner.lock().expect("token storage poisoned") = None;
    }
}

/// Shared read/write view over the token storage
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn TokenStorage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    pub fn pair(&self) -> Option<TokenPair> {
        self.storage.load()
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.load().map(|pair| pair.access_token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.load().map(|pair| pair.refresh_token)
    }

    pub fn replace(&self, pair: TokenPair) {
        self.storage.save(&pair);
    }

    pub fn clear(&self) {
        self.storage.clear();
    }
}

/// Session manager: exchanges Telegram init-data for tokens exactly once
/// under concurrency, and refreshes them on 401.
pub struct SessionManager<T: Transport, B: TelegramBridge> {
    transport: Arc<T>,
    bridge: Arc<B>,
    store: TokenStore,
    inflight: Arc<Mutex<()>>,
    bridge_timeout: Duration,
}

impl<T: Transport, B: TelegramBridge> Clone for SessionManager<T, B> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            bridge: Arc::clone(&self.bridge),
            store: self.store.clone(),
            inflight: Arc::clone(&self.inflight),
            bridge_timeout: self.bridge_timeout,
        }
    }
}

impl<T: Transport, B: TelegramBridge> SessionManager<T, B> {
    pub fn new(
        transport: Arc<T>,
        bridge: Arc<B>,
        store: TokenStore,
        bridge_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            bridge,
            store,
            inflight: Arc::new(Mutex::new(())),
            bridge_timeout,
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Make sure a token pair is available, logging in if necessary.
    ///
    /// Concurrent callers share one exchange.
    pub async fn ensure_session(&self) -> ApiResult<()> {
        if self.store.pair().is_some() {
            return Ok(());
        }
        self.reauthenticate(None).await
    }

    /// Replace the stored pair that produced `stale_access`.
    ///
    /// The critical section rechecks the store: if another caller already
    /// swapped the token while we waited for the lock, no second exchange is
    /// issued and the caller simply retries with the fresh token.
    pub async fn reauthenticate(&self, stale_access: Option<&str>) -> ApiResult<()> {
        let _guard = self.inflight.lock().await;

        if self.store.access_token().as_deref() != stale_access {
            return Ok(());
        }

        // Prefer the refresh endpoint while we still hold a refresh token.
        if let Some(refresh_token) = self.store.refresh_token() {
            match self.refresh(&refresh_token).await {
                Ok(pair) => {
                    self.store.replace(pair);
                    info!("token pair refreshed");
                    return Ok(());
                }
                Err(err) => {
                    warn!("token refresh failed, falling back to login: {err}");
                    self.store.clear();
                }
            }
        }

        let pair = self.telegram_login().await?;
        self.store.replace(pair);
        info!("logged in via Telegram init-data");
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> ApiResult<TokenPair> {
        let request = ApiRequest::post_json("/auth/refresh", json!({}))
            .with_header("X-Refresh-Token", refresh_token);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::from_response(response.status, &response.body));
        }
        response.json()
    }

    async fn telegram_login(&self) -> ApiResult<TokenPair> {
        let wait = timeout(self.bridge_timeout, self.bridge.init_data());
        let init_data = wait
            .await
            .map_err(|_| AuthError::BridgeTimeout(self.bridge_timeout.as_secs()))??;

        if init_data.is_empty() {
            return Err(AuthError::MissingInitData.into());
        }

        let request = ApiRequest::post_json("/auth/telegram", json!({ "init_data": init_data }));
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(AuthError::Exchange(format!(
                "auth endpoint returned {}",
                response.status
            ))
            .into());
        }
        response.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::api::ApiResponse;
    use crate::telegram::OutgoingEvent;

    struct FakeBridge;

    impl TelegramBridge for FakeBridge {
        fn post_event(&self, _event: OutgoingEvent) {}

        async fn init_data(&self) -> Result<String, AuthError> {
            Ok("query_id=AAE1&user=%7B%22id%22%3A1%7D&hash=abc".to_string())
        }
    }

    struct CountingTransport {
        logins: AtomicUsize,
    }

    impl CountingTransport {
        fn new() -> Self {
            Self {
                logins: AtomicUsize::new(0),
            }
        }
    }

    impl Transport for CountingTransport {
        async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
            assert_eq!(request.path, "/auth/telegram");
            let n = self.logins.fetch_add(1, Ordering::SeqCst);
            Ok(ApiResponse {
                status: 200,
                body: format!(
                    r#"{{"access_token": "access-{n}", "refresh_token": "refresh-{n}"}}"#
                ),
            })
        }
    }

    fn manager(transport: Arc<CountingTransport>) -> SessionManager<CountingTransport, FakeBridge> {
        SessionManager::new(
            transport,
            Arc::new(FakeBridge),
            TokenStore::in_memory(),
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn concurrent_logins_share_one_exchange() {
        let transport = Arc::new(CountingTransport::new());
        let session = manager(Arc::clone(&transport));

        let (a, b, c) = tokio::join!(
            session.ensure_session(),
            session.ensure_session(),
            session.ensure_session(),
        );
        a.unwrap();
        b.unwrap();
        c.unwrap();

        assert_eq!(transport.logins.load(Ordering::SeqCst), 1);
        assert_eq!(
            session.store().access_token().as_deref(),
            Some("access-0")
        );
    }

    #[tokio::test]
    async fn reauthenticate_skips_exchange_when_token_already_rotated() {
        let transport = Arc::new(CountingTransport::new());
        let session = manager(Arc::clone(&transport));

        session.store().replace(TokenPair {
            access_token: "fresh".to_string(),
            refresh_token: String::new(),
        });

        // The caller failed with an older token; the store already moved on.
        session.reauthenticate(Some("stale")).await.unwrap();
        assert_eq!(transport.logins.load(Ordering::SeqCst), 0);
        assert_eq!(session.store().access_token().as_deref(), Some("fresh"));
    }

    struct NeverReadyBridge;

    impl TelegramBridge for NeverReadyBridge {
        fn post_event(&self, _event: OutgoingEvent) {}

        async fn init_data(&self) -> Result<String, AuthError> {
            std::future::pending::<()>().await;
            unreachable!()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn login_times_out_when_bridge_never_becomes_ready() {
        let session = SessionManager::new(
            Arc::new(CountingTransport::new()),
            Arc::new(NeverReadyBridge),
            TokenStore::in_memory(),
            Duration::from_secs(5),
        );

        let err = session.ensure_session().await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Auth(AuthError::BridgeTimeout(5))
        ));
    }
}
