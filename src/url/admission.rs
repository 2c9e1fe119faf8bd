use url::Url;

const BLOCKED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "svg", "pdf", "zip", "exe", "js", "css", "mp4", "mp3", "avi",
    "mov", "doc", "ppt", "xls", "rar", "tar", "dmg", "php", "jsp", "cgi", "aspx",
];

/// True iff the URL has an http(s) scheme and a non-empty host.
pub fn is_valid(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    matches!(parsed.host_str(), Some(host) if !host.is_empty())
}

/// True iff the lowercase path contains the substring "cgi".
pub fn is_cgi(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    parsed.path().to_lowercase().contains("cgi")
}

/// True iff the path's file extension (case-insensitive) is in the
/// fixed blocklist of non-HTML resource types.
pub fn is_blocked_extension(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    let path = parsed.path();
    let Some(last_segment) = path.rsplit('/').next() else {
        return false;
    };

    match last_segment.rsplit_once('.') {
        Some((_, ext)) => BLOCKED_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}
