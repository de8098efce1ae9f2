//! Sirius API transport

mod client;
mod traits;

pub use client::SiriusClient;
pub use traits::{ApiRequest, RequestAdapter, RequestResult, TransportError};

#[cfg(test)]
pub use traits::MockRequestAdapter;
