//! Post create/update endpoints and the request handler behind them.

pub mod error;
pub mod handler;
pub mod handlers;
pub mod models;
pub mod params;
pub mod routes;
pub mod sanitize;

pub use error::PostError;
pub use handler::PostRequestHandler;
