//! HTML generation utilities for testing.
//!
//! This module provides builders and helper functions for creating meters
//! pages in the shapes the portal has served over time.

/// Builder for creating meters pages with a fluent API.
#[derive(Debug, Default)]
pub struct MetersPageBuilder {
    title: Option<String>,
    parts: Vec<String>,
}

impl MetersPageBuilder {
    /// Creates a new builder with the portal's page title.
    pub fn new() -> Self {
        Self {
            title: Some("Meters | MidCity Utilities".to_string()),
            parts: Vec::new(),
        }
    }

    /// Replaces the page title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Adds the "Select Meter" picker with a single meter.
    pub fn add_meter_selector(mut self, meter_number: &str) -> Self {
        self.parts.push(format!(
            r#"<div class="form-group"><label for="meter_id">Select Meter</label>
               <select name="meter_id" id="meter_id">
                 <option value="{0}">{0} - Home</option>
               </select></div>"#,
            meter_number
        ));
        self
    }

    /// Adds the balance chart configuration script.
    pub fn add_chart(mut self, balance: &str) -> Self {
        self.parts.push(chart_script(balance));
        self
    }

    /// Adds the predicted zero-balance line.
    pub fn add_predicted_zero_date(mut self, date: &str) -> Self {
        self.parts
            .push(format!("<p>Predicted 0 balance date: {}</p>", date));
        self
    }

    /// Adds a meter card.
    pub fn add_card(mut self, attributes: &str, content: &str) -> Self {
        self.parts
            .push(format!(r#"<div class="card" {}>{}</div>"#, attributes, content));
        self
    }

    /// Adds arbitrary markup.
    pub fn add_raw(mut self, html: &str) -> Self {
        self.parts.push(html.to_string());
        self
    }

    /// Builds the final HTML document.
    pub fn build(self) -> String {
        let head = self
            .title
            .map(|title| format!("<head><title>{}</title></head>", title))
            .unwrap_or_default();
        format!("<html>{}<body>{}</body></html>", head, self.parts.join("\n"))
    }
}

/// Creates a simple HTML page with the given body content.
pub fn create_html_page(body_content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Test Page</title></head>
<body>
{}
</body>
</html>"#,
        body_content
    )
}

/// Creates the chart configuration script the portal renders the balance into.
pub fn chart_script(balance: &str) -> String {
    format!(
        r#"<script>var chartObjects = [{{"chart":{{"type":"solidgauge"}},"series":[{{"name":"Current balance","0":[{}],"tooltip":{{"valueSuffix":" kWh"}}}}]}}];</script>"#,
        balance
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_script_shape() {
        let script = chart_script("145.65");
        assert!(script.contains(r#""name":"Current balance","0":[145.65]"#));
        assert!(script.contains(r#""valueSuffix":" kWh""#));
        assert!(script.contains("chartObjects"));
    }

    #[test]
    fn test_meters_page_builder() {
        let html = MetersPageBuilder::new()
            .add_meter_selector("0412345678")
            .add_chart("12.5")
            .build();
        assert!(html.contains("<title>Meters | MidCity Utilities</title>"));
        assert!(html.contains(r#"<option value="0412345678">"#));
        assert!(html.contains("[12.5]"));
    }
}
