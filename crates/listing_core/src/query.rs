//! Query state owned by the listing controller and its location encoding.
//!
//! The location (path plus `page`, `size`, `sort` query parameters) is a
//! mirror of [`QueryState`]. Encoding a state and decoding the result always
//! yields the same state.

use std::fmt;

use url::form_urlencoded;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT: &str = "-published_at";

/// Page sizes offered by the page-size control.
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [10, 20, 50];

/// Sort tags offered by the sort control, with their labels.
pub const SORT_OPTIONS: [(&str, &str); 2] = [("-published_at", "Newest"), ("published_at", "Oldest")];

const PAGE_PARAM: &str = "page";
const SIZE_PARAM: &str = "size";
const SORT_PARAM: &str = "sort";

/// Field name with an optional leading `-` for descending order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortKey(String);

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        let field = raw.strip_prefix('-').unwrap_or(raw);
        let valid = !field.is_empty()
            && field
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn field(&self) -> &str {
        self.0.strip_prefix('-').unwrap_or(&self.0)
    }

    pub fn is_descending(&self) -> bool {
        self.0.starts_with('-')
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self(DEFAULT_SORT.to_string())
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryState {
    page: u32,
    page_size: u32,
    sort: SortKey,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortKey::default(),
        }
    }
}

impl QueryState {
    /// Returns `None` when `page` is zero or `page_size` is not an offered size.
    pub fn new(page: u32, page_size: u32, sort: SortKey) -> Option<Self> {
        if page == 0 || !is_allowed_page_size(page_size) {
            return None;
        }
        Some(Self {
            page,
            page_size,
            sort,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn sort(&self) -> &SortKey {
        &self.sort
    }

    pub(crate) fn set_page(&mut self, page: u32) {
        debug_assert!(page >= 1);
        self.page = page.max(1);
    }

    pub(crate) fn set_page_size(&mut self, page_size: u32) {
        debug_assert!(is_allowed_page_size(page_size));
        self.page_size = page_size;
    }

    pub(crate) fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Rebuilds a state from a location such as `/ideas?page=2&size=20`.
    ///
    /// Missing or invalid values fall back to the defaults independently.
    /// Unknown keys are ignored and the first occurrence of a key wins.
    pub fn from_location(location: &str) -> Self {
        let mut page = None;
        let mut page_size = None;
        let mut sort = None;

        for (key, value) in form_urlencoded::parse(location_query(location).as_bytes()) {
            match key.as_ref() {
                PAGE_PARAM if page.is_none() => page = Some(value.into_owned()),
                SIZE_PARAM if page_size.is_none() => page_size = Some(value.into_owned()),
                SORT_PARAM if sort.is_none() => sort = Some(value.into_owned()),
                _ => {}
            }
        }

        Self {
            page: page
                .as_deref()
                .and_then(parse_positive)
                .unwrap_or(DEFAULT_PAGE),
            page_size: page_size
                .as_deref()
                .and_then(parse_positive)
                .filter(|size| is_allowed_page_size(*size))
                .unwrap_or(DEFAULT_PAGE_SIZE),
            sort: sort
                .as_deref()
                .and_then(SortKey::parse)
                .unwrap_or_default(),
        }
    }

    /// Serializes the state as `page=..&size=..&sort=..`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(PAGE_PARAM, &self.page.to_string())
            .append_pair(SIZE_PARAM, &self.page_size.to_string())
            .append_pair(SORT_PARAM, self.sort.as_str())
            .finish()
    }

    /// Location for `path` carrying this state in its query string.
    pub fn to_location(&self, path: &str) -> String {
        format!("{}?{}", path, self.to_query_string())
    }
}

pub fn is_allowed_page_size(size: u32) -> bool {
    PAGE_SIZE_OPTIONS.contains(&size)
}

/// Path component of a location, `/` when empty.
pub fn location_path(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    match &location[..end] {
        "" => "/",
        path => path,
    }
}

fn location_query(location: &str) -> &str {
    let without_fragment = location.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None => "",
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u32>().ok().filter(|value| *value >= 1)
}
