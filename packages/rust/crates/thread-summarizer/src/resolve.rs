pub(crate) fn resolve_string(
    cli_value: Option<String>,
    env_name: &str,
    settings_value: Option<&str>,
    default: &str,
) -> String {
    if let Some(value) = cli_value
        && !value.trim().is_empty()
    {
        return value;
    }
    if let Ok(value) = std::env::var(env_name)
        && !value.trim().is_empty()
    {
        return value;
    }
    if let Some(value) = settings_value
        && !value.trim().is_empty()
    {
        return value.to_string();
    }
    default.to_string()
}

pub(crate) fn resolve_positive_u64(
    cli_value: Option<u64>,
    env_name: &str,
    settings_value: Option<u64>,
    default: u64,
) -> u64 {
    if let Some(value) = cli_value
        && value > 0
    {
        return value;
    }
    if let Some(value) = parse_positive_u64_from_env(env_name) {
        return value;
    }
    if let Some(value) = settings_value
        && value > 0
    {
        return value;
    }
    default
}

pub(crate) fn resolve_positive_usize(
    cli_value: Option<usize>,
    env_name: &str,
    settings_value: Option<usize>,
    default: usize,
) -> usize {
    if let Some(value) = cli_value
        && value > 0
    {
        return value;
    }
    if let Some(value) = parse_from_env::<usize>(env_name).filter(|value| *value > 0) {
        return value;
    }
    if let Some(value) = settings_value
        && value > 0
    {
        return value;
    }
    default
}

/// Like [`resolve_positive_u64`] but `0` is a meaningful value (e.g. "no pause").
pub(crate) fn resolve_u64(
    cli_value: Option<u64>,
    env_name: &str,
    settings_value: Option<u64>,
    default: u64,
) -> u64 {
    cli_value
        .or_else(|| parse_from_env(env_name))
        .or(settings_value)
        .unwrap_or(default)
}

/// `0` resolves to `None` (no cap).
pub(crate) fn resolve_optional_cap(
    cli_value: Option<usize>,
    env_name: &str,
    settings_value: Option<usize>,
    default: usize,
) -> Option<usize> {
    let value = cli_value
        .or_else(|| parse_from_env(env_name))
        .or(settings_value)
        .unwrap_or(default);
    (value > 0).then_some(value)
}

pub(crate) fn resolve_port(
    cli_value: Option<u16>,
    env_name: &str,
    settings_value: Option<u16>,
    default: u16,
) -> u16 {
    cli_value
        .or_else(|| parse_from_env::<u16>(env_name))
        .or(settings_value)
        .filter(|port| *port > 0)
        .unwrap_or(default)
}

pub(crate) fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_from_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = non_empty_env(name)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(env_var = %name, value = %raw, "invalid integer env value");
            None
        }
    }
}

pub(crate) fn parse_positive_u64_from_env(name: &str) -> Option<u64> {
    let raw = non_empty_env(name)?;
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            tracing::warn!(env_var = %name, value = %raw, "invalid positive integer env value");
            None
        }
    }
}
