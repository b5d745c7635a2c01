//! Discovery of elements that look like one meter's card.
//!
//! Used when the page-global pass finds nothing. Five heuristics run in order
//! and the first that yields any container wins.

use scraper::ElementRef;

use super::helper::{is_inside_table, visible_text};
use super::page::Page;

const HISTORY_MARKERS: &[&str] = &["Product Type", "Download Invoice"];
const METER_KEYWORDS: &[&str] = &["meter", "balance", "credit", "account"];
const MIN_TEXT_LEN: usize = 50;
const MAX_TEXT_LEN: usize = 500;

/// An element believed to describe a single meter.
#[derive(Debug, Clone)]
pub struct Container<'a> {
    pub element: ElementRef<'a>,
    /// Visible text, nodes joined by single spaces
    pub text: String,
}

impl<'a> Container<'a> {
    pub fn new(element: ElementRef<'a>) -> Self {
        Self {
            element,
            text: visible_text(element),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element
            .value()
            .attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Looks like a transaction-history block rather than a meter.
    pub fn is_transaction_history(&self) -> bool {
        HISTORY_MARKERS.iter().any(|marker| self.text.contains(marker))
    }

    /// Elements strictly below this container, in document order.
    pub fn descendant_elements(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let root = self.element.id();
        self.element
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |e| e.id() != root)
    }
}

type Heuristic = for<'p> fn(&'p Page) -> Vec<Container<'p>>;

const HEURISTICS: &[(&str, Heuristic)] = &[
    ("panel/well", panels),
    ("card", cards),
    ("meter info class", meter_info_blocks),
    ("keyword div", keyword_divs),
    ("main content children", main_content_children),
];

/// Finds meter containers on the page, first successful heuristic wins.
///
/// # Returns
/// The containers found, or an empty vector when no heuristic matched
pub fn discover(page: &Page) -> Vec<Container<'_>> {
    for (name, heuristic) in HEURISTICS {
        let containers = heuristic(page);
        if !containers.is_empty() {
            tracing::info!("Found {} container(s) via {} heuristic", containers.len(), name);
            return containers;
        }
    }
    tracing::warn!("No meter containers found with any heuristic");
    Vec::new()
}

fn without_history<'p>(elements: Vec<ElementRef<'p>>) -> Vec<Container<'p>> {
    elements
        .into_iter()
        .map(Container::new)
        .filter(|c| !c.is_transaction_history())
        .collect()
}

fn panels(page: &Page) -> Vec<Container<'_>> {
    without_history(page.select("div.panel, div.well, div.panel-body"))
}

fn cards(page: &Page) -> Vec<Container<'_>> {
    without_history(page.select("div.card"))
}

fn meter_info_blocks(page: &Page) -> Vec<Container<'_>> {
    page.select("div.meter-info, div.meter-display, div.account-info")
        .into_iter()
        .map(Container::new)
        .collect()
}

fn keyword_divs(page: &Page) -> Vec<Container<'_>> {
    page.select("div")
        .into_iter()
        .filter(|div| !is_inside_table(*div))
        .map(Container::new)
        .filter(|c| {
            let lower = c.text.to_lowercase();
            METER_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .filter(|c| !c.is_transaction_history())
        .filter(|c| {
            let len = c.text.chars().count();
            MIN_TEXT_LEN < len && len < MAX_TEXT_LEN
        })
        .collect()
}

fn main_content_children(page: &Page) -> Vec<Container<'_>> {
    let Some(main) = page
        .select("div.container, div.content, div.main-content")
        .into_iter()
        .next()
    else {
        return Vec::new();
    };

    main.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "div")
        .map(Container::new)
        .collect()
}
