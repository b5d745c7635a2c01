//! Balance resolution.
//!
//! The current portal renders the balance only inside the chart configuration
//! script, so the script strategies come first. Older layouts printed it as text.

use regex::Regex;
use std::sync::LazyLock;

use crate::midcity::cascade::{first_match, Strategy};
use crate::midcity::containers::Container;
use crate::midcity::helper::parse_decimal;
use crate::midcity::page::Page;
use crate::model::Unit;

/// Marker identifying the script that configures the balance chart.
pub const CHART_MARKER: &str = "chartObjects";

// "series":[{"name":"Current balance","0":[145.65],"tooltip":{"valueSuffix":" kWh"}}]
static CHART_BALANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""name":"Current balance"[^}]*?"0":\[([0-9.]+)\]"#).expect("Invalid regex")
});

static CHART_SERIES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""series":\[\{[^}]*?"0":\[([0-9.]+)\][^}]*?"valueSuffix":" kWh""#)
        .expect("Invalid regex")
});

static METER_BALANCE_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Current meter balance[:\s]+([\d,]+\.?\d*)\s*kWh").expect("Invalid regex")
});

static KWH_BALANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)balance[:\s]+([\d,]+\.?\d*)\s*kWh").expect("Invalid regex")
});

static WATER_BALANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)balance[:\s]+([\d,]+\.?\d*)\s*(m³|m3|l)").expect("Invalid regex")
});

static RAND_BALANCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\s*([\d,]+\.?\d*)").expect("Invalid regex"));

static DECIMAL_BALANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)balance[:\s]+([\d,]+\.\d+)").expect("Invalid regex")
});

/// Whole-number Rand amounts at or above this are taken to be meter ids.
const RAND_METER_ID_FLOOR: f64 = 100_000.0;

/// A balance and the unit it was printed in, when the text said.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceMatch {
    pub value: f64,
    pub unit: Option<Unit>,
}

impl BalanceMatch {
    fn new(value: f64, unit: Unit) -> Self {
        Self {
            value,
            unit: Some(unit),
        }
    }
}

fn captured_decimal(re: &Regex, text: &str) -> Option<f64> {
    let caps = re.captures(text)?;
    parse_decimal(caps.get(1)?.as_str())
}

/// Resolves the balance from the page as a whole.
pub fn resolve_on_page(page: &Page) -> Option<BalanceMatch> {
    first_match(
        "balance",
        page,
        &[
            Strategy::new("chart script", from_chart_script),
            Strategy::new("'Current meter balance' text", from_meter_balance_text),
        ],
    )
}

/// Resolves the balance inside one container.
pub fn resolve_in_container(container: &Container<'_>) -> Option<BalanceMatch> {
    first_match(
        "balance",
        container,
        &[
            Strategy::new("kWh balance", from_kwh_balance),
            Strategy::new("water balance", from_water_balance),
            Strategy::new("Rand amount", from_rand_amount),
            Strategy::new("decimal near 'balance'", from_decimal_balance),
        ],
    )
}

/// Only scripts carrying the chart marker are searched.
fn from_chart_script(page: &Page) -> Option<BalanceMatch> {
    page.inline_scripts()
        .iter()
        .filter(|script| script.contains(CHART_MARKER))
        .find_map(|script| {
            [&*CHART_BALANCE_RE, &*CHART_SERIES_RE]
                .into_iter()
                .find_map(|re| captured_decimal(re, script))
                .map(|value| BalanceMatch::new(value, Unit::Kwh))
        })
}

fn from_meter_balance_text(page: &Page) -> Option<BalanceMatch> {
    captured_decimal(&METER_BALANCE_TEXT_RE, page.text())
        .map(|value| BalanceMatch::new(value, Unit::Kwh))
}

fn from_kwh_balance(container: &Container<'_>) -> Option<BalanceMatch> {
    captured_decimal(&KWH_BALANCE_RE, &container.text)
        .map(|value| BalanceMatch::new(value, Unit::Kwh))
}

fn from_water_balance(container: &Container<'_>) -> Option<BalanceMatch> {
    let caps = WATER_BALANCE_RE.captures(&container.text)?;
    let value = parse_decimal(caps.get(1)?.as_str())?;
    let unit = if caps.get(2)?.as_str().to_lowercase().starts_with('m') {
        Unit::CubicMeter
    } else {
        Unit::Liter
    };
    Some(BalanceMatch::new(value, unit))
}

fn from_rand_amount(container: &Container<'_>) -> Option<BalanceMatch> {
    let caps = RAND_BALANCE_RE.captures(&container.text)?;
    let raw = caps.get(1)?.as_str();
    let value = parse_decimal(raw)?;
    if !raw.contains('.') && value >= RAND_METER_ID_FLOOR {
        tracing::debug!("Ignoring Rand amount {} that looks like a meter id", raw);
        return None;
    }
    Some(BalanceMatch::new(value, Unit::Zar))
}

fn from_decimal_balance(container: &Container<'_>) -> Option<BalanceMatch> {
    captured_decimal(&DECIMAL_BALANCE_RE, &container.text).map(|value| BalanceMatch {
        value,
        unit: None,
    })
}
