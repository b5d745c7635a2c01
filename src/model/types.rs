use std::fmt;

/// Kind of utility a meter measures.
///
/// Always derived from the page, never read from an authoritative field.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MeterType {
    Electricity,
    Water,
    Gas,
    /// Balance is a currency amount rather than a quantity
    Prepaid,
    Unknown,
}

impl MeterType {
    /// Maps a free-form label (attribute value, badge text) onto a meter type.
    ///
    /// Returns `None` when the label names nothing we recognise.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        if label.contains("electric") {
            Some(MeterType::Electricity)
        } else if label.contains("water") {
            Some(MeterType::Water)
        } else if label.contains("gas") {
            Some(MeterType::Gas)
        } else if label.contains("prepaid") {
            Some(MeterType::Prepaid)
        } else {
            None
        }
    }

    /// Title-cased name, used for friendly names.
    pub fn title(&self) -> &'static str {
        match self {
            MeterType::Electricity => "Electricity",
            MeterType::Water => "Water",
            MeterType::Gas => "Gas",
            MeterType::Prepaid => "Prepaid",
            MeterType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MeterType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MeterType::Electricity => write!(f, "electricity"),
            MeterType::Water => write!(f, "water"),
            MeterType::Gas => write!(f, "gas"),
            MeterType::Prepaid => write!(f, "prepaid"),
            MeterType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Units a balance can be expressed in.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum Unit {
    /// Kilowatt-hours (kWh) - prepaid electricity
    #[default]
    Kwh,
    /// Liters (L) - water volume
    Liter,
    /// Cubic meters (m³) - water volume
    CubicMeter,
    /// South African Rand - currency credit
    Zar,
}

impl Unit {
    /// Meter type implied by the unit a balance was printed in.
    pub fn implied_meter_type(&self) -> MeterType {
        match self {
            Unit::Kwh => MeterType::Electricity,
            Unit::Liter | Unit::CubicMeter => MeterType::Water,
            Unit::Zar => MeterType::Prepaid,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Unit::Kwh => write!(f, "kWh"),
            Unit::Liter => write!(f, "L"),
            Unit::CubicMeter => write!(f, "m³"),
            Unit::Zar => write!(f, "ZAR"),
        }
    }
}
