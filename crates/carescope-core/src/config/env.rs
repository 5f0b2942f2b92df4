#[must_use]
pub(super) fn read_non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[must_use]
pub(super) fn read_raw_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[must_use]
pub(super) fn parse_f64(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}
