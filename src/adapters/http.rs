//! HTTP adapter: actix-web routes over the artifact store.
//!
//! Routes:
//! - `GET  /get_location_names`  → `{"locations": [...]}`
//! - `POST /predict_house_price` → `{"estimated_price": number | string}`
//! - `OPTIONS /predict_house_price` (CORS preflight)
//! - `GET  /health`, `GET /`     → plain-text liveness strings
//!
//! Both JSON routes load the artifacts on first use. One CORS policy
//! applies: the configured origin (wildcard by default) is sent on the JSON
//! routes and the preflight. Every failure is a plain 500; details go to the
//! log only.

use actix_web::http::header::{
    self, ContentType, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};
use actix_web::http::{Method, StatusCode};
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError};
use serde::Serialize;

use crate::application::ArtifactStore;
use crate::config::ServerConfig;
use crate::domain::{PriceEstimate, PriceQuery};
use crate::HomepriceError;

pub const HEALTH_TEXT: &str = "Flask server is running!";
pub const HOME_TEXT: &str = "Backend Running !";

/// Per-app HTTP settings shared with the handlers.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    cors_origin: String,
}

impl HttpSettings {
    #[must_use]
    pub fn new(cors_origin: impl Into<String>) -> Self {
        Self {
            cors_origin: cors_origin.into(),
        }
    }

    #[must_use]
    pub fn cors_origin(&self) -> &str {
        &self.cors_origin
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CORS_ORIGIN)
    }
}

#[derive(Debug, Serialize)]
struct LocationsResponse {
    locations: Vec<String>,
}

#[derive(Debug, Serialize)]
struct EstimateResponse {
    estimated_price: PriceEstimate,
}

impl ResponseError for HomepriceError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!("Request failed: {self}");
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body("Internal Server Error")
    }
}

/// Register all routes on an app or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(home)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/get_location_names").route(web::get().to(get_location_names)))
        .service(
            web::resource("/predict_house_price")
                .route(web::post().to(predict_house_price))
                .route(web::method(Method::OPTIONS).to(preflight)),
        );
}

/// Load artifacts on the blocking pool unless already cached.
async fn ensure_loaded(store: &web::Data<ArtifactStore>) -> Result<(), HomepriceError> {
    if store.is_loaded() {
        return Ok(());
    }
    let store = store.clone();
    web::block(move || store.ensure_loaded().map(|_| ()))
        .await
        .map_err(|e| HomepriceError::Blocking(e.to_string()))?
}

async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .body(HOME_TEXT)
}

async fn health() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .body(HEALTH_TEXT)
}

async fn get_location_names(
    store: web::Data<ArtifactStore>,
    settings: web::Data<HttpSettings>,
) -> Result<HttpResponse, HomepriceError> {
    tracing::info!("Getting locations");
    ensure_loaded(&store).await?;

    let locations = store.location_names().ok_or(HomepriceError::NotLoaded)?;

    Ok(HttpResponse::Ok()
        .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, settings.cors_origin()))
        .json(LocationsResponse { locations }))
}

async fn predict_house_price(
    store: web::Data<ArtifactStore>,
    settings: web::Data<HttpSettings>,
    body: web::Bytes,
) -> Result<HttpResponse, HomepriceError> {
    ensure_loaded(&store).await?;
    let query = PriceQuery::from_json(&body)?;

    let estimate = store.estimated_price(&query.location, query.sqft, query.bath, query.bhk)?;
    tracing::debug!(
        "Estimate for {:?} (sqft={}, bath={}, bhk={}): {estimate}",
        query.location,
        query.sqft,
        query.bath,
        query.bhk
    );

    Ok(HttpResponse::Ok()
        .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, settings.cors_origin()))
        .json(EstimateResponse {
            estimated_price: estimate,
        }))
}

async fn preflight(settings: web::Data<HttpSettings>) -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, settings.cors_origin()))
        .insert_header((ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .insert_header((ACCESS_CONTROL_ALLOW_HEADERS, header::CONTENT_TYPE.as_str()))
        .insert_header((ACCESS_CONTROL_MAX_AGE, "86400"))
        .finish()
}

/// Run the HTTP server until shutdown.
///
/// With `preload` set, artifacts are loaded before binding and a load
/// failure aborts startup.
///
/// # Errors
/// Returns error if preloading fails or the listener cannot be bound.
pub async fn serve(config: &ServerConfig, store: ArtifactStore) -> crate::Result<()> {
    let store = web::Data::new(store);
    if config.preload {
        ensure_loaded(&store).await?;
    }
    let settings = web::Data::new(HttpSettings::new(config.cors_origin.as_str()));

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(settings.clone())
            .configure(configure)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    tracing::info!(
        "Listening on {}:{} (CORS origin {})",
        config.host,
        config.port,
        config.cors_origin
    );
    server
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;
    Ok(())
}
