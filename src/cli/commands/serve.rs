//! Serve command implementation
//!
//! This module implements the `serve` command, which binds the HTTP server
//! and runs it until a shutdown signal arrives.

use crate::adapters::store::create_store;
use crate::api::registry_router;
use crate::config::{load_config_or_default, RegistryConfig};
use crate::core::registry::PatientRegistry;
use crate::log_error_with_context;
use clap::Args;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Interface to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };
        self.apply_overrides(&mut config);

        let store = create_store(&config.store);
        let registry = PatientRegistry::new(store);
        let app = registry_router(registry.clone());

        let address = config.server.bind_address();
        let listener = match TcpListener::bind(&address).await {
            Ok(l) => l,
            Err(e) => {
                log_error_with_context!(&e, "Failed to bind HTTP listener");
                println!("❌ Failed to bind {address}");
                println!("   Error: {e}");
                return Ok(4); // Startup error exit code
            }
        };

        tracing::info!(
            address = %address,
            backend = registry.backend_name(),
            store_path = %config.store.path,
            "Patient registry listening"
        );
        println!("🚀 Patient registry listening on http://{address}");

        let mut graceful_signal = shutdown_signal.clone();
        let server = axum::serve(listener, app)
            .with_graceful_shutdown(async move { wait_for_shutdown(&mut graceful_signal).await });
        let mut server_task = tokio::spawn(async move { server.await });

        let mut shutdown_signal = shutdown_signal;
        let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

        let outcome = tokio::select! {
            result = &mut server_task => result,
            _ = wait_for_shutdown(&mut shutdown_signal) => {
                tracing::info!(
                    timeout_secs = config.server.shutdown_timeout_secs,
                    "Waiting for in-flight requests to finish"
                );
                match tokio::time::timeout(shutdown_timeout, &mut server_task).await {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::warn!("Shutdown timeout elapsed, aborting open connections");
                        server_task.abort();
                        return Ok(0);
                    }
                }
            }
        };

        match outcome {
            Ok(Ok(())) => {
                tracing::info!("Patient registry stopped");
                Ok(0)
            }
            Ok(Err(e)) => {
                log_error_with_context!(&e, "HTTP server failed");
                Ok(5) // Fatal error exit code
            }
            Err(e) => {
                log_error_with_context!(&e, "HTTP server task panicked");
                Ok(5)
            }
        }
    }

    fn apply_overrides(&self, config: &mut RegistryConfig) {
        if let Some(ref host) = self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Resolves once the shutdown flag flips to `true`
async fn wait_for_shutdown(signal: &mut watch::Receiver<bool>) {
    loop {
        if *signal.borrow() {
            return;
        }
        if signal.changed().await.is_err() {
            // Sender gone; no signal can arrive any more
            std::future::pending::<()>().await;
        }
    }
}
