#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod display;
mod error;
mod handlers;
mod health;
mod page;
mod session;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use lumen_config::Config;
use lumen_imagegen::ImageGenerator;
use lumen_session::{RenderController, SessionStore};
use tower_http::trace::TraceLayer;

pub use error::ServerError;

use handlers::AppState;
use page::PageSettings;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration, connecting to the configured provider
    ///
    /// # Errors
    ///
    /// Returns an error if the provider or the session store cannot be initialized
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let generator = lumen_imagegen::build_service(config)?;
        Self::with_generator(config, generator)
    }

    /// Build the server around an existing image generator
    pub fn with_generator(config: &Config, generator: Arc<dyn ImageGenerator>) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8501)));

        let sessions = SessionStore::from_config(&config.server.session)?;
        let state = AppState {
            controller: RenderController::new(generator),
            page: Arc::new(PageSettings::from(&config.server)),
        };

        // Page routes, each bound to a session
        let cookie_name = config.server.session.cookie_name.clone();
        let mut app = Router::new()
            .route("/", get(handlers::index).post(handlers::submit))
            .route("/reset", post(handlers::reset))
            .route("/images/{index}", get(handlers::download))
            .layer(axum::middleware::from_fn(move |req, next| {
                let sessions = sessions.clone();
                let cookie_name = cookie_name.clone();
                async move { session::session_middleware(&sessions, &cookie_name, req, next).await }
            }))
            .with_state(state);

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Override the listen address
    #[must_use]
    pub fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
