//! Parsed meters page plus the text views the strategies search.

use scraper::{ElementRef, Html};

use super::helper::{select_all, visible_text};

pub struct Page {
    document: Html,
    text: String,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let text = visible_text(document.root_element());
        Self { document, text }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.document.root_element()
    }

    /// Visible text of the whole page, nodes joined by single spaces.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn select(&self, selector: &str) -> Vec<ElementRef<'_>> {
        select_all(self.root(), selector)
    }

    /// Bodies of inline `<script>` blocks, in document order.
    pub fn inline_scripts(&self) -> Vec<String> {
        self.select("script")
            .into_iter()
            .filter(|script| script.value().attr("src").is_none())
            .map(|script| script.text().collect::<String>())
            .filter(|body| !body.trim().is_empty())
            .collect()
    }

    pub fn title(&self) -> Option<String> {
        self.select("title")
            .first()
            .map(|title| title.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
    }
}
