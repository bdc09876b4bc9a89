use obblog_cms::{
    client::{CmsClient, CmsConfig, CmsError},
    repository::{DEFAULT_ARCHIVE_SCAN_LIMIT, PostRepository},
};
use serde::Deserialize;
use server::ServerState;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use view::Site;

mod server;
mod view;

const DEFAULT_SITE_TITLE: &str = "OB Family Blog";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error setting up the content API client: {0}")]
    Cms(#[from] CmsError),
    #[error("Error binding tcp listener: {0}")]
    TcpBind(std::io::Error),
    #[error("Error serving server: {0}")]
    TcpServe(std::io::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    server_address: IpAddr,
    server_port: u16,
    #[serde(default = "default_site_title")]
    site_title: String,
    #[serde(default = "default_public_url")]
    public_url: String,
    #[serde(default = "default_archive_scan_limit")]
    archive_scan_limit: u64,
}

fn default_site_title() -> String {
    DEFAULT_SITE_TITLE.to_owned()
}

fn default_public_url() -> String {
    DEFAULT_PUBLIC_URL.to_owned()
}

fn default_archive_scan_limit() -> u64 {
    DEFAULT_ARCHIVE_SCAN_LIMIT
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "obblog_web=debug,obblog_cms=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<(Env, CmsConfig), InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    let env = envy::from_env()?;
    let cms_config = envy::prefixed("MICROCMS_").from_env()?;
    Ok((env, cms_config))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let (env, cms_config) = get_env()?;
    debug!(?cms_config, "Loaded content API settings");

    let client = CmsClient::new(&cms_config)?;
    let state = ServerState {
        posts: PostRepository::new(Arc::new(client))
            .with_archive_scan_limit(env.archive_scan_limit),
        site: Arc::new(Site {
            title: env.site_title,
            public_url: env.public_url,
        }),
    };

    let tracing_layer = TraceLayer::new_for_http();
    let app = server::routes().layer(tracing_layer).with_state(state);

    let server_address = SocketAddr::new(env.server_address, env.server_port);
    let listener = tokio::net::TcpListener::bind(server_address)
        .await
        .map_err(InitError::TcpBind)?;
    info!(%server_address, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(InitError::TcpServe)?;

    Ok(())
}
