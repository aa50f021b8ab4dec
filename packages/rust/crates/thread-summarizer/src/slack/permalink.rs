//! Permalink parsing: `.../archives/<CHANNEL>/p<16 digits>` → channel + fixed-point ts.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::PermalinkError;

use super::types::ThreadCoordinates;

/// Digits before the decimal point in a Slack timestamp.
const TS_SECONDS_DIGITS: usize = 10;

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match Regex::new(r"$^") {
            Ok(fallback) => fallback,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

static PERMALINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"/archives/([A-Z0-9]+)/p(\d{16})(?:[^0-9]|$)"));

/// Parse a Slack message permalink into thread coordinates.
///
/// `https://x.slack.com/archives/C123/p1699999999123456` yields channel `C123`
/// and timestamp `1699999999.123456`.
pub fn parse_permalink(link: &str) -> Result<ThreadCoordinates, PermalinkError> {
    let Some(captures) = PERMALINK_REGEX.captures(link) else {
        tracing::warn!(
            event = "slack.permalink.invalid",
            permalink = %link,
            "Invalid Slack message URL format"
        );
        return Err(PermalinkError(link.to_string()));
    };
    let channel = captures[1].to_string();
    let digits = &captures[2];
    let (seconds, micros) = digits.split_at(TS_SECONDS_DIGITS);
    Ok(ThreadCoordinates {
        channel,
        root_ts: format!("{seconds}.{micros}"),
    })
}
