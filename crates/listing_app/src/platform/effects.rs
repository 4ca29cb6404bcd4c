use listing_core::{Effect, ListingItem, ListingResult, Msg, QueryState};
use listing_engine::{EngineEvent, EngineHandle, FetchSettings, ListingPage, PageRequest};
use listing_logging::{listing_debug, listing_warn};

use super::history::History;

/// Executes controller effects against the engine and the session history.
pub struct EffectRunner {
    engine: EngineHandle,
    history: History,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings, history: History) -> Self {
        Self::with_engine(EngineHandle::new(settings), history)
    }

    pub fn with_engine(engine: EngineHandle, history: History) -> Self {
        Self { engine, history }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Runs `effects` and returns messages they produce immediately.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_up = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchListing { request_id, query } => {
                    self.engine.fetch(request_id, page_request(&query));
                }
                Effect::PushLocation(location) => {
                    listing_debug!("pushState {}", location);
                    self.history.push(location);
                }
                Effect::ReplaceLocation(location) => {
                    listing_debug!("replaceState {}", location);
                    self.history.replace(location);
                }
                Effect::ScrollToTop => follow_up.push(Msg::Scrolled { y: 0 }),
            }
        }
        follow_up
    }

    /// Completed engine work, as controller messages.
    pub fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(engine_event_to_msg(event));
        }
        inbox
    }
}

fn page_request(query: &QueryState) -> PageRequest {
    PageRequest {
        number: query.page(),
        size: query.page_size(),
        sort: query.sort().as_str().to_string(),
    }
}

fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ListingFetched { request_id, result } => Msg::ListingLoaded {
            request_id,
            result: result.map(listing_result).map_err(|err| {
                listing_warn!("Request {} failed ({}): {}", request_id, err.kind, err.message);
                err.message
            }),
        },
    }
}

fn listing_result(page: ListingPage) -> ListingResult {
    ListingResult {
        items: page
            .items
            .into_iter()
            .map(|item| ListingItem {
                image_url: item.image_url().map(str::to_string),
                id: item.id,
                title: item.title,
                published_at: item.published_at,
            })
            .collect(),
        total_items: page.total_items,
        total_pages: page.total_pages,
    }
}
