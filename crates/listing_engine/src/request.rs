use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://suitmedia-backend.suitdev.com/api/ideas";

/// Extra image fields the collection endpoint is asked to include.
const APPENDED_FIELDS: [&str; 2] = ["small_image", "medium_image"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
    pub sort: String,
}

/// Maps a page request to the collection URL.
///
/// Pure and deterministic: the same base and request always give the same
/// URL, with keys in a fixed order.
pub fn build_request_url(base: &Url, request: &PageRequest) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("page[number]", &request.number.to_string())
            .append_pair("page[size]", &request.size.to_string());
        for field in APPENDED_FIELDS {
            pairs.append_pair("append[]", field);
        }
        pairs.append_pair("sort", &request.sort);
    }
    url
}
