pub mod api;
pub mod error;

use crate::agent::ChatAgent;
use crate::config::{ Settings, TlsPaths };
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use log::info;

pub struct Server {
    addr: SocketAddr,
    agent: Arc<ChatAgent>,
    tls: Option<TlsPaths>,
}

impl Server {
    pub fn new(settings: &Settings, agent: Arc<ChatAgent>) -> Self {
        Self {
            addr: settings.bind_addr,
            agent,
            tls: settings.tls.clone(),
        }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let app = api::build_router(Arc::clone(&self.agent));

        match &self.tls {
            Some(tls) => {
                info!(
                    "TLS enabled. Loading certificate from '{}' and key from '{}'",
                    tls.cert_path,
                    tls.key_path
                );
                let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                    &tls.cert_path,
                    &tls.key_path
                ).await?;
                info!("HTTPS server listening on: https://{}", self.addr);
                axum_server::bind_rustls(self.addr, tls_config).serve(app.into_make_service()).await?;
            }
            None => {
                let listener = tokio::net::TcpListener::bind(self.addr).await?;
                info!("HTTP server listening on: http://{}", self.addr);
                axum::serve(listener, app.into_make_service()).await?;
            }
        }

        Ok(())
    }
}
