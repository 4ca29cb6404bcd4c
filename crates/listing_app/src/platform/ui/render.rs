use chrono::{DateTime, NaiveDateTime};
use listing_core::{
    CardView, GridView, ImageStatus, ListingViewModel, PageToken, ERROR_HEADLINE,
};

use super::layout::{BANNER_ROWS, CARD_ROWS, CONTROL_ROWS, HEADER_ROWS, STATUS_ROWS};

const LONG_DATE: &str = "%B %-d, %Y";

/// Renders the whole page as terminal lines.
pub fn render(view: &ListingViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    push_section(&mut lines, render_header(view), HEADER_ROWS);
    push_section(&mut lines, render_banner(view), BANNER_ROWS);
    push_section(&mut lines, render_controls(view), CONTROL_ROWS);
    push_section(&mut lines, render_status(view), STATUS_ROWS);
    lines.extend(render_grid(view));
    lines.push(String::new());
    lines.push(render_pagination(&view.pagination));
    lines
}

/// Keeps every fixed section at its layout height.
fn push_section(lines: &mut Vec<String>, mut section: Vec<String>, rows: u32) {
    section.resize(rows as usize, String::new());
    lines.extend(section);
}

fn render_header(view: &ListingViewModel) -> Vec<String> {
    let menu = view
        .nav
        .iter()
        .map(|item| {
            if item.active {
                format!("[{}]", item.label)
            } else {
                item.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    let mode = match (view.header.hidden, view.header.transparent) {
        (true, _) => " (header hidden)",
        (false, true) => " (header transparent)",
        (false, false) => "",
    };
    vec![format!("{menu}{mode}"), format!("@ {}", view.location)]
}

fn render_banner(view: &ListingViewModel) -> Vec<String> {
    vec![
        "=== Ideas ===".to_string(),
        "Where all our great things begin".to_string(),
        format!(
            "parallax image {:+.1}px, text {:+.1}px",
            view.banner.image_offset, view.banner.text_offset
        ),
    ]
}

fn render_controls(view: &ListingViewModel) -> Vec<String> {
    let sizes = view
        .controls
        .page_size_options
        .iter()
        .map(|size| {
            if *size == view.controls.page_size {
                format!("[{size}]")
            } else {
                size.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let sorts = view
        .controls
        .sort_options
        .iter()
        .map(|option| {
            if option.value == view.controls.sort {
                format!("[{}]", option.label)
            } else {
                option.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    vec![
        view.showing_info.clone().unwrap_or_default(),
        format!("Show per page: {sizes}   Sort by: {sorts}"),
    ]
}

fn render_status(view: &ListingViewModel) -> Vec<String> {
    if view.loading {
        vec!["Loading...".to_string()]
    } else {
        Vec::new()
    }
}

fn render_grid(view: &ListingViewModel) -> Vec<String> {
    match &view.grid {
        GridView::Empty => Vec::new(),
        GridView::Error { message } => {
            vec![ERROR_HEADLINE.to_string(), format!("Error: {message}")]
        }
        GridView::Cards(cards) if cards.is_empty() => vec!["No ideas to show.".to_string()],
        GridView::Cards(cards) => cards
            .iter()
            .flat_map(|card| render_card(card, view.grid_dimmed))
            .collect(),
    }
}

fn render_card(card: &CardView, dimmed: bool) -> Vec<String> {
    let marker = if dimmed { ":" } else { "|" };
    let image_state = match card.image_status {
        ImageStatus::Pending => "loading",
        ImageStatus::Revealed => "loaded",
        ImageStatus::Broken => "unavailable",
    };
    let mut lines = vec![
        format!("{marker} {}", card.title),
        format!("{marker} {}", format_published(&card.published_at)),
        format!(
            "{marker} [img \"{}\" {} ({image_state})]",
            card.image_alt, card.image_src
        ),
    ];
    lines.resize(CARD_ROWS as usize, String::new());
    lines
}

pub fn render_pagination(tokens: &[PageToken]) -> String {
    tokens
        .iter()
        .map(|token| match *token {
            PageToken::Previous { enabled, .. } => (if enabled { "<" } else { "." }).to_string(),
            PageToken::Next { enabled, .. } => (if enabled { ">" } else { "." }).to_string(),
            PageToken::Page {
                number,
                active: true,
            } => format!("[{number}]"),
            PageToken::Page { number, .. } => number.to_string(),
            PageToken::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Long-form en-US date (`March 5, 2024`); unparseable input is returned as-is.
pub fn format_published(raw: &str) -> String {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return date.format(LONG_DATE).to_string();
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return date.format(LONG_DATE).to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ui::layout::GRID_TOP;
    use listing_core::{pagination_tokens, update, AppState, Effect, ListingItem, ListingResult, Msg};

    fn loaded(result: Result<ListingResult, String>) -> ListingViewModel {
        let (state, effects) = update(
            AppState::new(),
            Msg::Init {
                location: "/ideas?page=2".to_string(),
            },
        );
        let Some(Effect::FetchListing { request_id, .. }) = effects.first().cloned() else {
            panic!("expected fetch");
        };
        let (state, _) = update(state, Msg::ListingLoaded { request_id, result });
        state.view()
    }

    fn listing() -> ListingResult {
        ListingResult {
            items: vec![ListingItem {
                id: 11,
                title: "Kenali Tingkatan Influencers".to_string(),
                published_at: "2022-09-29 10:15:49".to_string(),
                image_url: Some("https://cdn.example.com/11.jpg".to_string()),
            }],
            total_items: 25,
            total_pages: 3,
        }
    }

    #[test]
    fn formats_long_dates() {
        assert_eq!(format_published("2024-03-05T10:00:00+07:00"), "March 5, 2024");
        assert_eq!(format_published("2022-09-29 10:15:49"), "September 29, 2022");
        assert_eq!(format_published("yesterday"), "yesterday");
    }

    #[test]
    fn pagination_line_marks_active_and_disabled() {
        assert_eq!(
            render_pagination(&pagination_tokens(1, 20)),
            ". [1] 2 3 4 5 ... 20 >"
        );
        assert_eq!(
            render_pagination(&pagination_tokens(20, 20)),
            "< 1 ... 16 17 18 19 [20] ."
        );
    }

    #[test]
    fn cards_start_at_grid_top() {
        let lines = render(&loaded(Ok(listing())));
        assert_eq!(lines[GRID_TOP as usize], "| Kenali Tingkatan Influencers");
        assert_eq!(lines[GRID_TOP as usize + 1], "| September 29, 2022");
        assert!(lines[GRID_TOP as usize + 2].contains("assets/placeholder.jpg (loading)"));
        assert!(lines.contains(&"Showing 11 - 20 of 25".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("< 1 [2] 3 >"));
    }

    #[test]
    fn error_replaces_grid() {
        let lines = render(&loaded(Err("HTTP error! status: 500".to_string())));
        assert_eq!(lines[GRID_TOP as usize], ERROR_HEADLINE);
        assert_eq!(lines[GRID_TOP as usize + 1], "Error: HTTP error! status: 500");
    }

    #[test]
    fn controls_reflect_selection() {
        let lines = render(&loaded(Ok(listing())));
        assert!(lines
            .iter()
            .any(|line| line == "Show per page: [10] 20 50   Sort by: [Newest] Oldest"));
        assert!(lines[0].contains("[Ideas]"));
    }
}
