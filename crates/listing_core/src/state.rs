use crate::lazy::{ImageStatus, LazyImages};
use crate::pagination::{pagination_tokens, showing_info};
use crate::query::{location_path, QueryState, PAGE_SIZE_OPTIONS, SORT_OPTIONS};
use crate::scroll::ScrollEffects;
use crate::view_model::{
    BannerView, CardView, ControlsView, GridView, HeaderView, ListingViewModel, NavItemView,
    SortOptionView, PLACEHOLDER_IMAGE,
};

pub type ItemId = u64;
pub type RequestId = u64;

/// Entries of the header navigation menu.
pub const NAV_ITEMS: [&str; 6] = ["Work", "About", "Services", "Ideas", "Careers", "Contact"];
const DEFAULT_NAV_INDEX: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    pub id: ItemId,
    pub title: String,
    /// Timestamp as sent by the API.
    pub published_at: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingResult {
    pub items: Vec<ListingItem>,
    pub total_items: u64,
    pub total_pages: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading { request_id: RequestId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    path: String,
    query: QueryState,
    listing: Option<ListingResult>,
    error: Option<String>,
    load: LoadState,
    next_request_id: RequestId,
    images: LazyImages,
    scroll: ScrollEffects,
    nav_selected: usize,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            query: QueryState::default(),
            listing: None,
            error: None,
            load: LoadState::Idle,
            next_request_id: 1,
            images: LazyImages::default(),
            scroll: ScrollEffects::default(),
            nav_selected: DEFAULT_NAV_INDEX,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading { .. })
    }

    /// Total pages of the last successful listing, 0 before any.
    pub fn total_pages(&self) -> u32 {
        self.listing.as_ref().map_or(0, |listing| listing.total_pages)
    }

    pub fn listing(&self) -> Option<&ListingResult> {
        self.listing.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current location mirrored from the query state.
    pub fn location(&self) -> String {
        self.query.to_location(&self.path)
    }

    pub fn view(&self) -> ListingViewModel {
        let grid = match (&self.error, &self.listing) {
            (Some(message), _) => GridView::Error {
                message: message.clone(),
            },
            (None, Some(listing)) => GridView::Cards(
                listing
                    .items
                    .iter()
                    .map(|item| self.card_view(item))
                    .collect(),
            ),
            (None, None) => GridView::Empty,
        };

        let (pagination, showing_info) = match &self.listing {
            Some(listing) => (
                pagination_tokens(self.query.page(), listing.total_pages),
                Some(showing_info(
                    self.query.page(),
                    self.query.page_size(),
                    listing.total_items,
                )),
            ),
            None => (Vec::new(), None),
        };

        ListingViewModel {
            location: self.location(),
            controls: ControlsView {
                page_size: self.query.page_size(),
                page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
                sort: self.query.sort().as_str().to_string(),
                sort_options: self.sort_options(),
            },
            grid,
            pagination,
            showing_info,
            loading: self.is_loading(),
            grid_dimmed: self.is_loading(),
            header: HeaderView {
                hidden: self.scroll.header_hidden(),
                transparent: self.scroll.header_transparent(),
            },
            banner: BannerView {
                image_offset: self.scroll.banner_image_offset(),
                text_offset: self.scroll.banner_text_offset(),
            },
            nav: NAV_ITEMS
                .iter()
                .enumerate()
                .map(|(index, label)| NavItemView {
                    label: (*label).to_string(),
                    active: index == self.nav_selected,
                })
                .collect(),
            scroll_y: self.scroll.y(),
            dirty: self.dirty,
        }
    }

    /// Offered sort options, plus the active tag when a location asked for another field.
    fn sort_options(&self) -> Vec<SortOptionView> {
        let mut options: Vec<SortOptionView> = SORT_OPTIONS
            .iter()
            .map(|(value, label)| SortOptionView {
                value: (*value).to_string(),
                label: (*label).to_string(),
            })
            .collect();
        let active = self.query.sort().as_str();
        if !options.iter().any(|option| option.value == active) {
            options.push(SortOptionView {
                value: active.to_string(),
                label: active.to_string(),
            });
        }
        options
    }

    fn card_view(&self, item: &ListingItem) -> CardView {
        let status = self.images.status(item.id);
        let image_src = match (status, &item.image_url) {
            (Some(ImageStatus::Revealed), Some(url)) => url.clone(),
            _ => PLACEHOLDER_IMAGE.to_string(),
        };
        CardView {
            id: item.id,
            title: item.title.clone(),
            image_alt: item.title.clone(),
            image_src,
            image_status: status.unwrap_or(ImageStatus::Pending),
            published_at: item.published_at.clone(),
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn load_location(&mut self, location: &str) {
        self.path = location_path(location).to_string();
        self.query = QueryState::from_location(location);
    }

    pub(crate) fn query_mut(&mut self) -> &mut QueryState {
        &mut self.query
    }

    /// Marks a new request outstanding and returns its id.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.load = LoadState::Loading { request_id };
        request_id
    }

    /// Clears the outstanding request if `request_id` is the one in flight.
    pub(crate) fn finish_request(&mut self, request_id: RequestId) -> bool {
        if self.load == (LoadState::Loading { request_id }) {
            self.load = LoadState::Idle;
            true
        } else {
            false
        }
    }

    pub(crate) fn apply_listing(&mut self, listing: ListingResult) {
        self.images.register(listing.items.iter().map(|item| item.id));
        self.listing = Some(listing);
        self.error = None;
    }

    pub(crate) fn apply_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub(crate) fn images_mut(&mut self) -> &mut LazyImages {
        &mut self.images
    }

    pub(crate) fn scroll_mut(&mut self) -> &mut ScrollEffects {
        &mut self.scroll
    }

    pub(crate) fn select_nav(&mut self, index: usize) -> bool {
        if index >= NAV_ITEMS.len() || index == self.nav_selected {
            return false;
        }
        self.nav_selected = index;
        true
    }
}
