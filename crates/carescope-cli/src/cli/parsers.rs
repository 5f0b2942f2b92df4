pub(super) fn parse_unit_interval_f64(raw: &str) -> std::result::Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid float value '{raw}'"))?;
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(format!("value must be within [0.0, 1.0], got {value}"));
    }
    Ok(value)
}

pub(super) fn parse_min_one_usize(raw: &str) -> std::result::Result<usize, String> {
    let value = raw
        .parse::<usize>()
        .map_err(|_| format!("invalid integer value '{raw}'"))?;
    if value == 0 {
        return Err("value must be >= 1".to_string());
    }
    Ok(value)
}

/// `LABEL=PROBABILITY`, e.g. `High=0.8`.
pub(super) fn parse_class_probability(raw: &str) -> std::result::Result<(String, f64), String> {
    let Some((label, probability)) = raw.split_once('=') else {
        return Err(format!("expected LABEL=PROBABILITY, got '{raw}'"));
    };
    let label = label.trim();
    if label.is_empty() {
        return Err(format!("missing class label in '{raw}'"));
    }
    Ok((label.to_string(), parse_unit_interval_f64(probability)?))
}
