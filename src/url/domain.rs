use url::Url;

/// Multi-label public suffixes that need two labels kept above them to
/// form a registered domain (e.g. `example.co.uk`, not `co.uk`).
///
/// The corpus this crate was built from does not carry a full Public
/// Suffix List data file, so this is a curated table of the common
/// cases rather than a complete implementation. It is isolated here
/// behind `registered_domain` so a real PSL-backed implementation can
/// replace it later without touching any caller.
const MULTI_LABEL_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "me.uk", "ltd.uk", "plc.uk", "com.au", "net.au",
    "org.au", "co.nz", "net.nz", "co.jp", "or.jp", "com.br", "com.cn", "com.mx", "co.za", "co.in",
    "co.kr", "github.io", "gitlab.io", "blogspot.com", "wordpress.com",
];

/// Returns the authority (host and optional port) of a URL.
pub fn host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    match parsed.port() {
        Some(port) => Some(format!("{host}:{port}")),
        None => Some(host.to_lowercase()),
    }
}

/// Returns the eTLD+1 ("registered domain") of a URL's host, e.g.
/// `a.b.example.co.uk` -> `example.co.uk`.
pub fn registered_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let hostname = parsed.host_str()?;
    registered_domain_of_host(hostname)
}

fn registered_domain_of_host(hostname: &str) -> Option<String> {
    let hostname = hostname.trim_end_matches('.').to_lowercase();
    if hostname.is_empty() {
        return None;
    }

    let labels: Vec<&str> = hostname.split('.').collect();
    if labels.len() < 2 {
        return Some(hostname.to_string());
    }

    for suffix in MULTI_LABEL_SUFFIXES {
        let suffix_labels: Vec<&str> = suffix.split('.').collect();
        if labels.len() > suffix_labels.len()
            && labels[labels.len() - suffix_labels.len()..] == suffix_labels[..]
        {
            let keep = suffix_labels.len() + 1;
            return Some(labels[labels.len() - keep..].join("."));
        }
    }

    Some(labels[labels.len() - 2..].join("."))
}
