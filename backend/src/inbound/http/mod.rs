//! HTTP inbound adapter exposing the relay endpoints and the demo page.

pub mod assets;
pub mod error;
pub mod health;
pub mod relay;
pub mod state;

pub use error::ApiResult;
