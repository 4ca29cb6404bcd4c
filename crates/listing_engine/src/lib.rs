//! Listing engine: remote collection access and request execution.
mod engine;
mod envelope;
mod fetch;
mod request;
mod types;

pub use engine::EngineHandle;
pub use envelope::parse_listing;
pub use fetch::{FetchSettings, ListingFetcher, ReqwestListingFetcher};
pub use request::{build_request_url, PageRequest, DEFAULT_API_BASE_URL};
pub use types::{ApiItem, EngineEvent, FailureKind, FetchError, ListingPage, RequestId};
