//! Page structure summary logged when no meter container can be found.
//!
//! This is a dead end for the cycle, not a retry trigger: the summary only
//! exists so a changed portal layout can be diagnosed from the add-on log.

use crate::midcity::helper::{is_inside_table, truncate, visible_text};
use crate::midcity::page::Page;

const MAX_HEADINGS: usize = 10;
const MAX_PANELS: usize = 5;
const MAX_CURRENCY: usize = 10;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageDiagnostics {
    pub title: Option<String>,
    pub heading_count: usize,
    /// (tag, text) of the first headings
    pub headings: Vec<(String, String)>,
    pub panel_count: usize,
    pub panels: Vec<String>,
    /// Action of every form, `N/A` when absent
    pub form_actions: Vec<String>,
    pub currency_count: usize,
    /// (text, parent class) of the first currency-looking fragments
    pub currency: Vec<(String, String)>,
}

impl PageDiagnostics {
    pub fn collect(page: &Page) -> Self {
        let headings = page.select("h1, h2, h3, h4");
        let panels = page.select("div.panel, div.well, div.section");
        let forms = page.select("form");
        let currency: Vec<_> = page
            .select("span, div, p")
            .into_iter()
            .filter(|e| !is_inside_table(*e))
            .filter_map(|e| {
                let text = visible_text(e);
                if !(text.starts_with("R ") || text.starts_with("R\u{a0}")) {
                    return None;
                }
                let parent_class = e
                    .parent()
                    .and_then(|p| p.value().as_element())
                    .and_then(|p| p.attr("class"))
                    .unwrap_or("no-class")
                    .to_string();
                Some((text, parent_class))
            })
            .collect();

        Self {
            title: page.title(),
            heading_count: headings.len(),
            headings: headings
                .iter()
                .take(MAX_HEADINGS)
                .map(|h| (h.value().name().to_string(), truncate(&visible_text(*h), 100)))
                .collect(),
            panel_count: panels.len(),
            panels: panels
                .iter()
                .take(MAX_PANELS)
                .map(|p| truncate(&visible_text(*p), 200))
                .collect(),
            form_actions: forms
                .iter()
                .map(|f| f.value().attr("action").unwrap_or("N/A").to_string())
                .collect(),
            currency_count: currency.len(),
            currency: currency.into_iter().take(MAX_CURRENCY).collect(),
        }
    }

    pub fn log(&self) {
        tracing::info!("=== Analyzing page structure for meter data ===");
        tracing::info!(
            "Page title: {}",
            self.title.as_deref().unwrap_or("No title")
        );
        if self.heading_count > 0 {
            tracing::info!("Found {} headings:", self.heading_count);
            for (tag, text) in &self.headings {
                tracing::info!("  - {}: {}", tag, text);
            }
        }
        if self.panel_count > 0 {
            tracing::info!("Found {} panels/sections", self.panel_count);
            for (i, text) in self.panels.iter().enumerate() {
                tracing::info!("  Panel {}: {}", i + 1, text);
            }
        }
        if !self.form_actions.is_empty() {
            tracing::info!("Found {} forms", self.form_actions.len());
            for (i, action) in self.form_actions.iter().enumerate() {
                tracing::info!("  Form {} action: {}", i + 1, action);
            }
        }
        if self.currency_count > 0 {
            tracing::info!(
                "Found {} currency elements outside tables:",
                self.currency_count
            );
            for (text, parent_class) in &self.currency {
                tracing::info!("  - {} (parent: {})", text, parent_class);
            }
        }
        tracing::info!("=== End page structure analysis ===");
    }
}
