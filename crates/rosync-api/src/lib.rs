// rosync-api: command model and transport for MikroTik RouterOS devices

pub mod auth;
pub mod command;
pub mod error;
pub mod gateway;
pub mod record;
pub mod rest;
pub mod transport;

pub use auth::Credentials;
pub use command::Command;
pub use error::Error;
pub use gateway::Gateway;
pub use record::Record;
pub use rest::client::RestGateway;
pub use transport::{TlsMode, TransportConfig};
