//! Display formatting for the presentation layer
//!
//! The dashboard renders Arabic copy with Western digit grouping, so
//! amounts are grouped en-US style while the compact market-cap
//! suffixes stay Arabic.

/// Fixed USD to SAR peg used by the dashboard
pub const USD_TO_SAR: f64 = 3.75;

/// Direction of a price change, for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Up,
    Down,
    Flat,
}

/// Classifies a 24h change for coloring; zero and absent are flat.
pub fn change_direction(change: Option<f64>) -> ChangeDirection {
    match change {
        Some(c) if c > 0.0 => ChangeDirection::Up,
        Some(c) if c < 0.0 => ChangeDirection::Down,
        _ => ChangeDirection::Flat,
    }
}

/// Formats a USD price: two decimals, up to eight for sub-dollar
/// prices so small coins stay legible.
pub fn format_price(price: f64) -> String {
    if price == 0.0 || !price.is_finite() {
        return "0.00".to_string();
    }

    if price < 1.0 {
        let raw = format!("{price:.8}");
        let trimmed = raw.trim_end_matches('0');
        let decimals = trimmed.split('.').nth(1).map(str::len).unwrap_or(0);
        format!("{price:.prec$}", prec = decimals.max(2))
    } else {
        group_thousands(&format!("{price:.2}"))
    }
}

/// Formats a percentage change: absolute value, two decimals, `%`.
pub fn format_percentage(change: Option<f64>) -> String {
    match change {
        Some(c) if c != 0.0 && c.is_finite() => {
            format!("{}%", group_thousands(&format!("{:.2}", c.abs())))
        }
        _ => "0.00%".to_string(),
    }
}

/// Formats a market cap with the dashboard's Arabic compact suffixes:
/// trillions, billions, millions, otherwise the grouped raw number.
pub fn format_market_cap(market_cap: Option<f64>) -> String {
    let cap = market_cap.unwrap_or(0.0);
    if cap <= 0.0 || !cap.is_finite() {
        return "0".to_string();
    }

    if cap >= 1e12 {
        format!("{} ت$", group_thousands(&format!("{:.2}", cap / 1e12)))
    } else if cap >= 1e9 {
        format!("{} م$", group_thousands(&format!("{:.2}", cap / 1e9)))
    } else if cap >= 1e6 {
        format!("{} مليون$", group_thousands(&format!("{:.2}", cap / 1e6)))
    } else {
        let raw = format!("{cap:.3}");
        let raw = raw.trim_end_matches('0').trim_end_matches('.');
        group_thousands(raw)
    }
}

/// Formats a 24h volume compactly: `B`, `M`, `K`, or two decimals.
pub fn format_volume(volume: Option<f64>) -> String {
    let v = volume.unwrap_or(0.0);
    if v <= 0.0 || !v.is_finite() {
        return "0".to_string();
    }

    if v >= 1e9 {
        format!("{:.2}B", v / 1e9)
    } else if v >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else if v >= 1e3 {
        format!("{:.2}K", v / 1e3)
    } else {
        format!("{v:.2}")
    }
}

/// Converts a USD amount to SAR at the fixed peg.
pub fn convert_to_sar(usd: f64) -> f64 {
    usd * USD_TO_SAR
}

/// Inserts en-US thousands separators into the integer part of an
/// already-formatted number.
fn group_thousands(formatted: &str) -> String {
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(formatted.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0
            && c.is_ascii_digit()
            && digits[i - 1].is_ascii_digit()
            && (digits.len() - i) % 3 == 0
        {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(frac_part) => format!("{grouped}.{frac_part}"),
        None => grouped,
    }
}
