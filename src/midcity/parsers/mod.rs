//! Per-field extraction strategies, each an ordered cascade.

pub mod balance;
pub mod meter_number;
pub mod meter_type;
pub mod zero_date;
