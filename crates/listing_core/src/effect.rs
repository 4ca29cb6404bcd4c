use crate::{QueryState, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the single outstanding listing request.
    FetchListing { request_id: RequestId, query: QueryState },
    /// Add a history entry for the location without reloading.
    PushLocation(String),
    /// Rewrite the current history entry.
    ReplaceLocation(String),
    ScrollToTop,
}
