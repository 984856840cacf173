mod config;
pub mod contact;
mod error;
mod service;
mod transport;

pub use config::*;
pub use error::*;
pub use service::*;
pub use transport::*;
