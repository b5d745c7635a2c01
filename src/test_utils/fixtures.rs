//! Test fixtures and common test data.
//!
//! This module provides fixed timestamps and whole meters pages used across
//! the test suite.

use chrono::{DateTime, Local, TimeZone};

use super::html::MetersPageBuilder;

/// Creates a fixed timestamp for deterministic testing.
pub fn test_timestamp() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .expect("Failed to create test timestamp")
}

/// The current single-meter page: meter picker, balance chart and forecast.
pub fn meters_page(meter_number: &str, balance: &str) -> String {
    MetersPageBuilder::new()
        .add_meter_selector(meter_number)
        .add_chart(balance)
        .add_predicted_zero_date("2025-12-13")
        .build()
}

/// An older layout with one card per meter and no page-level balance.
pub fn multi_card_page() -> String {
    MetersPageBuilder::new()
        .add_card(
            r#"data-meter-id="11112222""#,
            "<h4>Electricity</h4><p>Balance: 12.5 kWh</p>",
        )
        .add_card(
            r#"data-meter-id="33334444""#,
            "<h4>Water</h4><p>Balance: 800 L</p>",
        )
        .add_card("", "<h4>Transactions</h4><p>Product Type</p><p>Download Invoice</p>")
        .build()
}

/// A page with no meter containers at all, e.g. after a redesign.
pub fn unrecognised_page() -> String {
    MetersPageBuilder::new()
        .with_title("Dashboard | MidCity Utilities")
        .add_raw("<h1>Welcome back</h1><h2>Your account</h2>")
        .add_raw(r#"<form action="/ajax/logout"><button>Logout</button></form>"#)
        .add_raw("<table><tr><td><span>R 150.00</span></td></tr></table>")
        .add_raw(r#"<section class="summary"><span>R 42.00</span></section>"#)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_fixed() {
        assert_eq!(test_timestamp(), test_timestamp());
    }

    #[test]
    fn test_meters_page_contains_inputs() {
        let html = meters_page("0412345678", "145.65");
        assert!(html.contains("0412345678"));
        assert!(html.contains("[145.65]"));
        assert!(html.contains("Predicted 0 balance date: 2025-12-13"));
    }
}
