use crate::{UrlError, UrlResult};
use url::Url;

/// Canonicalizes a URL: splits into scheme/authority/path/query/fragment,
/// discards the query string and fragment entirely, and strips one
/// trailing `/` from the path when the path is deeper than the root.
///
/// Idempotent: `clean(clean(u)) == clean(u)` for every `u` that parses.
pub fn clean(input: &str) -> UrlResult<String> {
    let mut url = Url::parse(input).map_err(|e| UrlError::Parse(e.to_string()))?;

    url.set_query(None);
    url.set_fragment(None);

    let path = url.path().to_string();
    if path != "/" {
        if let Some(trimmed) = path.strip_suffix('/') {
            url.set_path(trimmed);
        }
    }

    Ok(url.to_string())
}
