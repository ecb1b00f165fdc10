//! Fetch Module
//!
//! Outbound page retrieval: the HTTP transport, the request limiter and the
//! cache-backed page fetcher that ties them together.

mod fetcher;
mod limiter;
mod transport;

pub use fetcher::PageFetcher;
pub use limiter::Limiter;
pub use transport::{HttpTransport, Transport};
