//! Output conversion and display formatting
//!
//! Amounts stay `Decimal` through every calculation; they are rounded to
//! `f64` only here, on the way out to JSON or the terminal.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// KAS amount as a JSON/display number
pub fn kas_to_f64(kas: Decimal) -> f64 {
    kas.to_f64().unwrap_or_default()
}

/// Compact supply figure, e.g. `28.70B`
pub fn format_supply(kas: Decimal) -> String {
    let kas = kas_to_f64(kas);
    if kas >= 1_000_000_000.0 {
        format!("{:.2}B", kas / 1_000_000_000.0)
    } else if kas >= 1_000_000.0 {
        format!("{:.2}M", kas / 1_000_000.0)
    } else if kas >= 1_000.0 {
        format!("{:.2}K", kas / 1_000.0)
    } else {
        format!("{:.2}", kas)
    }
}

/// Hashrate given in TH/s, scaled to PH/s or EH/s
pub fn format_hashrate(ths: f64) -> String {
    if ths >= 1_000_000.0 {
        format!("{:.2} EH/s", ths / 1_000_000.0)
    } else if ths >= 1_000.0 {
        format!("{:.2} PH/s", ths / 1_000.0)
    } else {
        format!("{:.2} TH/s", ths)
    }
}
