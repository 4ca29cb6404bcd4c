use crate::lazy::ImageStatus;
use crate::pagination::PageToken;
use crate::ItemId;

pub const PLACEHOLDER_IMAGE: &str = "assets/placeholder.jpg";
pub const ERROR_HEADLINE: &str = "Sorry, we couldn't load the ideas. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub struct ListingViewModel {
    pub location: String,
    pub controls: ControlsView,
    pub grid: GridView,
    pub pagination: Vec<PageToken>,
    /// `None` until the first listing arrives.
    pub showing_info: Option<String>,
    pub loading: bool,
    pub grid_dimmed: bool,
    pub header: HeaderView,
    pub banner: BannerView,
    pub nav: Vec<NavItemView>,
    pub scroll_y: u32,
    pub dirty: bool,
}

/// Selected values of the page-size and sort controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsView {
    pub page_size: u32,
    pub page_size_options: Vec<u32>,
    pub sort: String,
    pub sort_options: Vec<SortOptionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptionView {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridView {
    Empty,
    Cards(Vec<CardView>),
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: ItemId,
    pub title: String,
    pub image_alt: String,
    pub image_src: String,
    pub image_status: ImageStatus,
    pub published_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderView {
    pub hidden: bool,
    pub transparent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BannerView {
    pub image_offset: f32,
    pub text_offset: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItemView {
    pub label: String,
    pub active: bool,
}
