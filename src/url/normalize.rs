use url::Url;

/// Canonicalizes a raw link found on a page
///
/// # Resolution Rules
///
/// 1. A link with an explicit scheme (`https:`, `mailto:`, ...) is used as-is
/// 2. A protocol-relative link (`//host/path`) is prefixed with `https:`
/// 3. Anything else is resolved against `base` using standard relative-URL rules
///
/// The result has a lower-cased scheme and host and no fragment; path, query
/// and parameters are kept. Re-applying `normalize` to its own output with the
/// same base returns the same string.
///
/// Malformed links never fail: they come back trimmed, minus any fragment.
///
/// # Examples
///
/// ```
/// use babel_ripple::url::normalize;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/a").unwrap();
/// assert_eq!(normalize("/x/y", &base), "https://example.com/x/y");
/// assert_eq!(normalize("HTTPS://Example.COM/P#top", &base), "https://example.com/P");
/// ```
pub fn normalize(raw: &str, base: &Url) -> String {
    let raw = raw.trim();

    let resolved = if has_scheme(raw) {
        Url::parse(raw)
    } else if raw.starts_with("//") {
        Url::parse(&format!("https:{}", raw))
    } else {
        base.join(raw)
    };

    match resolved {
        Ok(mut url) => {
            url.set_fragment(None);
            lowercase_host(&mut url);
            url.into()
        }
        Err(e) => {
            tracing::trace!("Keeping unparseable link {:?} verbatim: {}", raw, e);
            strip_fragment(raw).to_string()
        }
    }
}

/// Checks for an RFC 3986 scheme prefix (`ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"`)
fn has_scheme(link: &str) -> bool {
    let Some((scheme, _)) = link.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// The url crate only lower-cases hosts of special schemes
fn lowercase_host(url: &mut Url) {
    let Some(host) = url.host_str() else {
        return;
    };

    if host.chars().any(|c| c.is_ascii_uppercase()) {
        let lowered = host.to_ascii_lowercase();
        if let Err(e) = url.set_host(Some(&lowered)) {
            tracing::trace!("Could not lower-case host {}: {}", lowered, e);
        }
    }
}

fn strip_fragment(link: &str) -> &str {
    link.split_once('#').map_or(link, |(before, _)| before)
}
