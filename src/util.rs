pub fn format_percent_change(percent_change: f64) -> String {
    if percent_change >= 0.0 {
        format!("+{:.2}%", percent_change.abs())
    } else {
        format!("{percent_change:.2}%")
    }
}

pub fn format_price(price: f64) -> String {
    let magnitude = price.abs();
    if magnitude >= 1000.0 {
        format!("{price:.0}")
    } else if magnitude >= 1.0 {
        format!("{price:.2}")
    } else {
        format!("{price:.4}")
    }
}
