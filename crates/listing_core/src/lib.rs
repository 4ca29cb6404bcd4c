//! Listing core: pure controller state machine and view-model helpers.
mod effect;
mod lazy;
mod msg;
mod pagination;
mod query;
mod scroll;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use lazy::{ImageStatus, LazyImages};
pub use msg::Msg;
pub use pagination::{page_window, pagination_tokens, showing_info, PageToken, MAX_VISIBLE_PAGES};
pub use query::{
    is_allowed_page_size, location_path, QueryState, SortKey, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
    DEFAULT_SORT, PAGE_SIZE_OPTIONS, SORT_OPTIONS,
};
pub use scroll::ScrollEffects;
pub use state::{AppState, ItemId, ListingItem, ListingResult, LoadState, RequestId, NAV_ITEMS};
pub use update::update;
pub use view_model::{
    BannerView, CardView, ControlsView, GridView, HeaderView, ListingViewModel, NavItemView,
    SortOptionView, ERROR_HEADLINE, PLACEHOLDER_IMAGE,
};
