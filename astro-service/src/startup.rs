//! Application startup and lifecycle management.

use axum::middleware::from_fn;
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    init_metrics, metrics_middleware, request_id_middleware, REQUEST_ID_HEADER,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AstroConfig;
use crate::handlers;
use crate::models::ServiceType;
use crate::services::providers::{GeminiConfig, GeminiTextProvider, TextProvider};
use crate::services::{BotClient, ContentGenerator, InMemoryOrderRepository, OrderRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AstroConfig,
    pub orders: Arc<dyn OrderRepository>,
    pub generator: ContentGenerator,
    pub bot: BotClient,
}

impl AppState {
    pub fn new(config: AstroConfig, generator: ContentGenerator) -> Self {
        let bot = BotClient::new(config.bot.token.clone(), config.bot.username.clone());
        Self {
            config,
            orders: Arc::new(InMemoryOrderRepository::new()),
            generator,
            bot,
        }
    }

    /// State with the Gemini generator when an API key is configured.
    pub fn from_config(config: AstroConfig) -> Self {
        let generator = build_generator(&config);
        Self::new(config, generator)
    }
}

fn build_generator(config: &AstroConfig) -> ContentGenerator {
    let Some(api_key) = config.gemini.api_key.clone() else {
        tracing::warn!("GEMINI_API_KEY not configured - serving fallback content only");
        return ContentGenerator::fallback_only();
    };

    let gemini_config = GeminiConfig {
        api_key,
        model: config.gemini.model.clone(),
        base_url: config.gemini.base_url.clone(),
        timeout: config.gemini.timeout,
    };

    match GeminiTextProvider::new(gemini_config) {
        Ok(provider) => {
            tracing::info!(model = %config.gemini.model, "Initialized Gemini text provider");
            let provider: Arc<dyn TextProvider> = Arc::new(provider);
            ContentGenerator::new(Some(provider))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Gemini provider unavailable - serving fallback content only");
            ContentGenerator::fallback_only()
        }
    }
}

pub fn router(state: AppState) -> Router {
    init_metrics();

    Router::new()
        .route("/", get(handlers::root))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/api/health", get(handlers::health_check))
        .route("/api/create-invoice", post(handlers::orders::create_invoice))
        .route("/api/daily-horoscope", post(handlers::content::daily_horoscope))
        .route("/api/weekly-horoscope", post(handlers::content::weekly_horoscope))
        .route("/api/compatibility", post(handlers::content::compatibility))
        .route("/api/tarot-reading", post(handlers::content::tarot_reading))
        .route("/api/natal-chart", post(handlers::content::natal_chart))
        .route(
            "/api/service-result/:order_id",
            get(handlers::orders::service_result),
        )
        .route("/api/webhook/payment", post(handlers::webhook::payment_webhook))
        .route("/api/order/:order_id", get(handlers::orders::get_order))
        .route("/api/user-orders/:user_id", get(handlers::orders::user_orders))
        .route_layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: AstroConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(config);
        state.generator.probe().await;
        Self::build_with_state(state).await
    }

    /// Build around prepared state, e.g. with a mock generator.
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        if !state.bot.is_configured() {
            tracing::warn!("BOT_TOKEN not configured - bot platform calls disabled");
        }
        tracing::info!(
            port,
            services = ?ServiceType::priced(),
            generator = state.generator.backend_name(),
            "Astrology bot backend ready"
        );

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
