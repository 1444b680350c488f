//! HTTP transport

mod client;

pub use client::{RawResponse, RequestBody, Transport, TransportBuilder};
