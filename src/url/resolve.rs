use url::Url;

/// Resolves a navigation href to an absolute URL
///
/// Returns None if the href should be ignored:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: links
/// - anything that does not resolve to HTTP(S)
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://webscraper.io/").unwrap();
/// let url = resolve_href("/test-sites/e-commerce/more/computers", &base).unwrap();
/// assert_eq!(url.as_str(), "https://webscraper.io/test-sites/e-commerce/more/computers");
/// ```
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => Some(absolute_url),
        _ => None,
    }
}
