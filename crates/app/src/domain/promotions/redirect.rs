//! Redirect URL construction and open-redirect protection.
//!
//! Everything here is a pure function of its inputs; the service layer
//! composes these with the click tracking side effect.

use jiff::Timestamp;
use url::Url;

/// UTM keys owned by the attribution engine. Pre-existing values for these
/// keys are stripped before the fixed attribution set is appended.
const UTM_KEYS: [&str; 4] = ["utm_source", "utm_medium", "utm_campaign", "utm_content"];

const UTM_SOURCE: &str = "line";
const UTM_MEDIUM: &str = "pr_bubble";

/// Whether a stored link is a safe redirect target.
///
/// Only absolute `http`/`https` URLs with a non-empty host qualify;
/// scheme-relative, relative, `javascript:` and the like are open-redirect
/// risks and are refused.
#[must_use]
pub fn is_valid_redirect_target(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Rebuild `raw` with the fixed UTM attribution parameters appended.
///
/// Non-UTM query pairs are preserved in order, including repeated keys and
/// blank values, as is the fragment.
///
/// # Errors
///
/// Returns an error when `raw` is not a parsable absolute URL.
pub fn build_redirect_url(
    raw: &str,
    utm_campaign: &str,
    utm_content: &str,
) -> Result<String, url::ParseError> {
    let mut url = Url::parse(raw)?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !UTM_KEYS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();

        pairs.clear();

        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }

        pairs
            .append_pair("utm_source", UTM_SOURCE)
            .append_pair("utm_medium", UTM_MEDIUM)
            .append_pair("utm_campaign", utm_campaign)
            .append_pair("utm_content", utm_content);
    }

    Ok(url.into())
}

/// Format the attribution content stamp: UTC `YYYYMMDD_HHMMZ`.
#[must_use]
pub fn utm_content_stamp(now: Timestamp) -> String {
    now.strftime("%Y%m%d_%H%MZ").to_string()
}
