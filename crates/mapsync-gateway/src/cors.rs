use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use clap::ValueEnum;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Origins of the local frontend dev servers.
pub const LOCAL_ORIGINS: &[&str] = &["http://localhost:5173", "http://localhost:3000"];

/// Default production frontend origin.
pub const DEFAULT_PRODUCTION_ORIGIN: &str = "https://mapsync.app";

/// Where the gateway is deployed; selects the CORS allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Deployment {
    #[value(name = "local")]
    Local,
    #[value(name = "production")]
    Production,
}

impl Display for Deployment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Deployment::Local => write!(f, "local"),
            Deployment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid CORS origin '{origin}'")]
pub struct InvalidOrigin {
    pub origin: String,
}

/// Builds the CORS policy for `deployment`.
///
/// `production_origins` is only consulted for [`Deployment::Production`].
pub fn cors_layer(
    deployment: Deployment,
    production_origins: &[String],
) -> Result<CorsLayer, InvalidOrigin> {
    let origins: Vec<&str> = match deployment {
        Deployment::Local => LOCAL_ORIGINS.to_vec(),
        Deployment::Production => production_origins.iter().map(String::as_str).collect(),
    };

    let origins = origins
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| InvalidOrigin {
                origin: origin.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60)))
}
