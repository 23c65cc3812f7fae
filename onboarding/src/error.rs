pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error during HTTP request: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Error while operating on JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Error loading config from environment: {0}")]
    EnvyError(#[from] envy::Error),

    #[error("Discord returned {0}: {1}")]
    ResponseError(reqwest::StatusCode, String),

    #[error("Gateway error: {0}")]
    GatewayError(#[from] gateway::GatewayError),

    #[error("Error parsing address: {0}")]
    AddrParseError(#[from] std::net::AddrParseError),

    #[cfg(feature = "metrics")]
    #[error("Error while serving metrics: {0}")]
    HyperError(#[from] hyper::Error),
}

impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}
