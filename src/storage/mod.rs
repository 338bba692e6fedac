//! Backend implementations for different transports

#[cfg(feature = "http")]
pub mod http;
pub mod in_memory;

#[cfg(feature = "http")]
pub use http::HttpBackend;
pub use in_memory::InMemoryBackend;
