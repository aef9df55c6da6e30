mod cors;
mod error;
mod extract;
mod health;
mod routes;
mod state;

use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use posecast_config::Config;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
    shutdown: CancellationToken,
}

impl Server {
    /// Build the server from configuration
    ///
    /// Only endpoints whose collaborators are configured are mounted.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured collaborator fails to initialize or
    /// the default voice is unknown
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8000)));

        let synthesizer = tts::build_synthesizer(&config.tts)?;

        let imagegen = config
            .imagegen
            .as_ref()
            .map(posecast_imagegen::build_server)
            .transpose()?;
        let llm = config.llm.as_ref().map(posecast_llm::build_server).transpose()?;
        let video = config.video.as_ref().map(posecast_video::build_server).transpose()?;
        let storage = match config.storage {
            Some(ref storage) => Some(posecast_storage::build_store(storage).await?),
            None => None,
        };

        let shutdown = CancellationToken::new();

        let state = AppState {
            synthesizer,
            imagegen,
            llm,
            storage,
            video,
            body_limit_bytes: config.server.body_limit_bytes,
            shutdown: shutdown.clone(),
        };

        let mut app = Router::new().route("/", get(routes::root));

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        if state.imagegen.is_some() {
            app = app.route("/generate-character/", post(routes::character::generate_character));
        }

        if state.llm.is_some() {
            app = app.route("/generate-script/", post(routes::script::generate_script));
        }

        if state.storage.is_some() {
            app = app.route("/dia_to_wav", post(routes::dialogue::dia_to_wav));

            if state.imagegen.as_ref().is_some_and(|imagegen| imagegen.supports_transform()) {
                app = app.route(
                    "/generate_uploaded_character",
                    post(routes::uploaded::generate_uploaded_character),
                );
            }
        }

        if state.video.is_some() {
            app = app.route("/generate_video", post(routes::video::generate_video));
        }

        log_disabled_endpoints(&state);

        let mut app = app.with_state(state).layer(TraceLayer::new_for_http());

        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Ok(Self {
            router: app,
            listen_address,
            shutdown,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered. In-flight speech
    /// downloads are cancelled at that point rather than awaited.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        let in_flight = self.shutdown;

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                in_flight.cancel();
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

fn log_disabled_endpoints(state: &AppState) {
    let missing: Vec<&str> = [
        ("imagegen", state.imagegen.is_none()),
        ("llm", state.llm.is_none()),
        ("storage", state.storage.is_none()),
        ("video", state.video.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect();

    if !missing.is_empty() {
        tracing::info!(?missing, "collaborators not configured; their endpoints are disabled");
    }
}
