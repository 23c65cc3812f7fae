mod config;
pub use config::Config;

mod error;
pub use error::{Error, Result};

pub mod messaging;
pub use messaging::{MessagingGateway, RestClient};

pub mod tracker;
pub use tracker::{ApplicationTracker, InteractionContext, Outcome};

pub mod validation;

pub mod render;

mod handler;
pub use handler::Handler;

#[cfg(feature = "metrics")]
pub mod metrics;
