// Client library for the UONET+ school register.
// Resolves the account/school/semester/diary context, dispatches the right
// scraped or mobile-endpoint call per data domain, normalizes the raw
// shapes into one stable model and drives the device-pairing handshake.

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod models;
pub mod normalize;
pub mod pairing;
pub mod source;

pub use client::RegisterClient;
pub use error::{ClientError, ContextError, PairingError, SourceError};
