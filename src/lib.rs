pub mod callback;
pub mod client;
pub mod config;
pub mod error;
pub mod proxy;
pub mod request;
pub mod types;

pub use client::MessengerClient;
pub use config::Config;
pub use error::{SendError, SendResult};
pub use request::{RequestOptions, Requester};
