//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port with a `MockAiProvider`
//! injected through `AppState`, so no test talks to a real model.

// Not every test binary uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use legalsum_server::{
    auth::ACCESS_PASSWORD_HEADER,
    config::AppConfig,
    router,
    state::AppState,
};
use legalsum_test_utils::MockAiProvider;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, task::JoinHandle};

pub const TEST_PASSWORD: &str = "open-sesame";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub ai_provider: MockAiProvider,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

/// A configuration with no file or environment involved.
pub fn test_config(access_password: Option<&str>) -> AppConfig {
    AppConfig {
        port: 0,
        access_password: access_password.map(String::from),
        ai_provider: "openai".to_string(),
        ai_api_url: None,
        ai_api_key: None,
        ai_model: "mock-chat-model".to_string(),
    }
}

impl TestApp {
    /// Spawns the server with the test password and the given mock provider.
    pub async fn spawn(ai_provider: MockAiProvider) -> Result<Self> {
        Self::spawn_with_config(test_config(Some(TEST_PASSWORD)), ai_provider).await
    }

    pub async fn spawn_with_config(config: AppConfig, ai_provider: MockAiProvider) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let app_state = AppState {
            config: Arc::new(config),
            ai_provider: Arc::new(ai_provider.clone()),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        // Give the server a moment to start up.
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            ai_provider,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// A `POST /summarize` request uploading `pdf` as the `file` part.
    pub fn summarize_request(&self, pdf: Vec<u8>) -> Result<RequestBuilder> {
        let part = Part::bytes(pdf)
            .file_name("agreement.pdf")
            .mime_str("application/pdf")?;
        Ok(self
            .client
            .post(format!("{}/summarize", self.address))
            .multipart(Form::new().part("file", part)))
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // The receiver might already be gone if the server task panicked.
            let _ = tx.send(());
        }
    }
}

/// Adds the access password header to a request, encoded the way the upload
/// page encodes it.
pub fn with_password(request: RequestBuilder, password: &str) -> RequestBuilder {
    let encoded = utf8_percent_encode(password, NON_ALPHANUMERIC).to_string();
    request.header(ACCESS_PASSWORD_HEADER, encoded)
}
