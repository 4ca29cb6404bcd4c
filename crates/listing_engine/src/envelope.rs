//! Schema validation for the collection endpoint's JSON envelope.

use serde::{Deserialize, Deserializer};

use crate::{ApiItem, FailureKind, FetchError, ListingPage};

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Vec<RawItem>,
    meta: Meta,
}

#[derive(Debug, Deserialize)]
struct Meta {
    total: u64,
    last_page: u32,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: u64,
    title: String,
    published_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    small_image: Vec<RawImage>,
    #[serde(default, deserialize_with = "null_as_empty")]
    medium_image: Vec<RawImage>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    url: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Parses and validates a response body into a [`ListingPage`].
pub fn parse_listing(body: &[u8]) -> Result<ListingPage, FetchError> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(|err| {
        FetchError::new(FailureKind::Schema, format!("invalid response: {err}"))
    })?;

    let items = envelope
        .data
        .into_iter()
        .map(|raw| ApiItem {
            id: raw.id,
            title: raw.title,
            published_at: raw.published_at,
            small_image: raw.small_image.into_iter().map(|image| image.url).collect(),
            medium_image: raw.medium_image.into_iter().map(|image| image.url).collect(),
        })
        .collect();

    Ok(ListingPage {
        items,
        total_items: envelope.meta.total,
        total_pages: envelope.meta.last_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_and_meta() {
        let body = br#"{
            "data": [
                {
                    "id": 7,
                    "title": "Hello",
                    "published_at": "2024-03-05 10:00:00",
                    "small_image": [{"id": 1, "url": "https://cdn/s.jpg"}],
                    "medium_image": [{"id": 2, "url": "https://cdn/m.jpg"}],
                    "content": "<p>ignored</p>"
                },
                {"id": 8, "title": "Bare", "published_at": "2024-03-06 10:00:00", "small_image": null}
            ],
            "links": {},
            "meta": {"total": 12, "last_page": 2, "current_page": 1}
        }"#;

        let page = parse_listing(body).unwrap();
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].image_url(), Some("https://cdn/m.jpg"));
        assert_eq!(page.items[1].image_url(), None);
    }

    #[test]
    fn small_image_used_without_medium() {
        let body = br#"{"data":[{"id":1,"title":"t","published_at":"p","small_image":[{"url":"s"}]}],
                        "meta":{"total":1,"last_page":1}}"#;
        assert_eq!(parse_listing(body).unwrap().items[0].image_url(), Some("s"));
    }

    #[test]
    fn missing_fields_are_schema_errors() {
        let cases: [&[u8]; 5] = [
            br#"{"data": []}"#,
            br#"{"meta": {"total": 0, "last_page": 0}}"#,
            br#"{"data": [{"id": 1, "published_at": "x"}], "meta": {"total": 1, "last_page": 1}}"#,
            br#"{"data": [], "meta": {"total": -1, "last_page": 0}}"#,
            b"not json",
        ];
        for body in cases {
            let err = parse_listing(body).unwrap_err();
            assert_eq!(err.kind, FailureKind::Schema);
            assert!(err.message.starts_with("invalid response"));
        }
    }
}
