//! Remote backend API client

pub mod client;

pub use client::{ForwardRequest, ForwardResponse, FrappeClient, ProxyMethod};
