use url::Url;

/// Determines the effective base URL of a fetched page
///
/// A declared `<base href>` wins when it is an absolute URL with both a scheme
/// and an authority. Anything else (missing, relative, opaque like `mailto:`)
/// falls back to `scheme://host[:port]/` of the page itself.
///
/// # Arguments
///
/// * `page_url` - The URL the page was fetched from
/// * `declared` - The `href` of the document's `<base>` element, if any
///
/// # Examples
///
/// ```
/// use babel_ripple::url::resolve_base;
/// use url::Url;
///
/// let page = Url::parse("https://example.com/dir/page.html?x=1").unwrap();
/// assert_eq!(resolve_base(&page, None).as_str(), "https://example.com/");
/// assert_eq!(
///     resolve_base(&page, Some("https://static.example.com/root/")).as_str(),
///     "https://static.example.com/root/"
/// );
/// ```
pub fn resolve_base(page_url: &Url, declared: Option<&str>) -> Url {
    if let Some(href) = declared {
        match Url::parse(href.trim()) {
            Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => return url,
            Ok(_) => tracing::debug!("Ignoring <base href={:?}> without authority", href),
            Err(e) => tracing::debug!("Ignoring malformed <base href={:?}>: {}", href, e),
        }
    }

    page_origin(page_url)
}

fn page_origin(page_url: &Url) -> Url {
    let mut origin = page_url.clone();
    origin.set_fragment(None);
    origin.set_query(None);
    origin.set_path("/");
    // Only fails for URLs that cannot carry credentials, which have none to strip
    let _ = origin.set_username("");
    let _ = origin.set_password(None);
    origin
}
