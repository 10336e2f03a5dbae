//! Risk API server lifecycle: starts/stops the axum HTTP server.
//!
//! bind → spawn background task → return handle with shutdown channel.
//! `serve` is the foreground variant used by the binary.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::api::router::risk_api_router;
use crate::config::ServerConfig;

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

/// Session metadata for a running API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskApiSession {
    pub server_addr: String,
    pub port: u16,
}

/// Handle to a running API server.
pub struct RiskApiServer {
    pub session: RiskApiSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl RiskApiServer {
    /// Base URL for clients, e.g. `http://127.0.0.1:3000`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.session.server_addr)
    }

    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Risk API server shutdown signal sent");
        }
    }
}

impl Drop for RiskApiServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

async fn bind(addr: SocketAddr) -> Result<tokio::net::TcpListener, ServerError> {
    tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Start the API server in a background task.
///
/// Port `0` binds an ephemeral port; the chosen one is in the session.
pub async fn start_risk_api_server(config: &ServerConfig) -> Result<RiskApiServer, ServerError> {
    let listener = bind(config.socket_addr()).await?;
    let addr = listener.local_addr()?;

    let session = RiskApiSession {
        server_addr: addr.to_string(),
        port: addr.port(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let app = risk_api_router();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Risk API server received shutdown signal");
        };

        tracing::info!(%addr, "Risk API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Risk API server error: {e}");
        }

        tracing::info!("Risk API server stopped");
    });

    Ok(RiskApiServer {
        session,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Run the API server in the foreground until Ctrl-C.
pub async fn serve(config: &ServerConfig) -> Result<(), ServerError> {
    let listener = bind(config.socket_addr()).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, version = crate::config::APP_VERSION, "Risk API listening");

    axum::serve(listener, risk_api_router())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Ctrl-C received, shutting down");
        })
        .await?;

    Ok(())
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn ephemeral() -> ServerConfig {
        ServerConfig {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        }
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let mut server = start_risk_api_server(&ephemeral())
            .await
            .expect("server should start");

        assert!(server.session.port > 0);
        assert!(server.base_url().ends_with(&format!(":{}", server.session.port)));

        let url = format!("{}/api/health", server.base_url());
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn server_serves_risk_route() {
        let server = start_risk_api_server(&ephemeral())
            .await
            .expect("server should start");

        let resp = reqwest::Client::new()
            .post(format!("{}/api/risk", server.base_url()))
            .json(&serde_json::json!({
                "name": "A",
                "age": 29,
                "feet": 5,
                "inches": 10,
                "pounds": 154,
                "bloodPressure": "119/79",
                "family": "none"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["total"], 0);
        assert_eq!(json["category"], "Best");
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let server = start_risk_api_server(&ephemeral()).await.unwrap();
        let taken = ServerConfig {
            port: server.session.port,
            ..ephemeral()
        };
        let err = start_risk_api_server(&taken).await.err().unwrap();
        assert!(matches!(err, ServerError::Bind { .. }));
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_risk_api_server(&ephemeral())
            .await
            .expect("server should start");

        server.shutdown();
        server.shutdown(); // Second call should be safe
    }
}
