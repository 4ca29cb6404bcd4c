#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Controller construction with the location the page was opened at.
    Init { location: String },
    /// User picked a value in the page-size control.
    PageSizeSelected(u32),
    /// User picked a value in the sort control.
    SortSelected(String),
    /// User clicked a pagination token.
    PageClicked(u32),
    /// Browser back/forward landed on `location`.
    HistoryNavigated { location: String },
    /// Completion of a listing request.
    ListingLoaded {
        request_id: crate::RequestId,
        result: Result<crate::ListingResult, String>,
    },
    /// Viewport scrolled to `y`.
    Scrolled { y: u32 },
    /// Card images that are currently inside the viewport.
    ItemsVisible(Vec<crate::ItemId>),
    /// A revealed card image failed to load.
    ImageFailed(crate::ItemId),
    /// User selected an entry of the header navigation menu.
    NavSelected(usize),
    /// Render tick.
    Tick,
    NoOp,
}
