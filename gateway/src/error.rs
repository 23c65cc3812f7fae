use thiserror::Error;

use crate::CloseEvent;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("error while operating on websocket: {0}")]
    WebsocketError(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("error while (de)serializing payload: {0}")]
    JsonError(#[from] serde_json::Error),

    #[cfg(feature = "compression")]
    #[error("error occurred while decompressing payload: {0}")]
    DecompressError(#[from] flate2::DecompressError),

    #[error("payload with opcode {0} was missing its data")]
    MissingEventData(u8),

    #[error("gateway closed the connection with fatal code {}: {}", .0.status_code, .0.error)]
    FatalClose(CloseEvent),
}

impl<T> From<GatewayError> for Result<T> {
    fn from(e: GatewayError) -> Self {
        Err(e)
    }
}
