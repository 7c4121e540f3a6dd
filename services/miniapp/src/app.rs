//! Application wiring
//!
//! Builds the production object graph from configuration and exposes the
//! handful of app-level actions that are not tied to one screen.

use std::sync::Arc;
use std::time::Duration;

use common::config::AppConfig;
use common::error::ApiResult;
use tracing::info;

use crate::api::{ApiClient, HttpTransport, Transport};
use crate::nav::BackRouter;
use crate::session::{SessionManager, TokenStore};
use crate::telegram::{OutgoingEvent, TelegramBridge};

/// The assembled Mini App client
pub struct MiniApp<T: Transport, B: TelegramBridge> {
    config: AppConfig,
    bridge: Arc<B>,
    api: ApiClient<T, B>,
    router: BackRouter<B>,
}

impl<B: TelegramBridge> MiniApp<HttpTransport, B> {
    /// Wire the production graph against a real HTTP transport
    pub fn new(config: AppConfig, bridge: Arc<B>, store: TokenStore) -> ApiResult<Self> {
        let transport = Arc::new(HttpTransport::new(
            &config.api_base,
            Duration::from_secs(config.request_timeout_secs),
        )?);
        Ok(Self::with_transport(config, bridge, store, transport))
    }
}

impl<T: Transport, B: TelegramBridge> MiniApp<T, B> {
    /// Wire the graph against an arbitrary transport
    pub fn with_transport(
        config: AppConfig,
        bridge: Arc<B>,
        store: TokenStore,
        transport: Arc<T>,
    ) -> Self {
        let session = SessionManager::new(
            Arc::clone(&transport),
            Arc::clone(&bridge),
            store,
            Duration::from_secs(config.bridge_ready_timeout_secs),
        );
        let api = ApiClient::new(transport, session);
        let router = BackRouter::new(Arc::clone(&bridge));

        Self {
            config,
            bridge,
            api,
            router,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient<T, B> {
        &self.api
    }

    pub fn router(&self) -> &BackRouter<B> {
        &self.router
    }

    /// Start-of-session bootstrap: obtain a token pair and expand the
    /// web view to full height.
    pub async fn bootstrap(&self) -> ApiResult<()> {
        self.api.session().ensure_session().await?;
        self.bridge.post_event(OutgoingEvent::Expand);
        info!("session established, viewport expanded");
        Ok(())
    }

    /// Open the support contact in an external browser tab
    pub fn open_support(&self) {
        self.bridge.post_event(OutgoingEvent::OpenLink {
            url: self.config.support_url.clone(),
        });
    }

    /// Resolve an uploaded-file path against the media base
    pub fn media_url(&self, path: &str) -> String {
        self.config.media_url(path)
    }
}
