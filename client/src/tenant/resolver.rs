use url::Url;

/// Deterministically maps a browsing URL to a tenant key.
///
/// Priority order: an explicit `tenant` query parameter wins, else the first
/// hostname label when a real subdomain exists. `None` is the "no tenant"
/// sentinel. Pure function of the URL, no I/O.
///
/// A hostname with no dots (bare `localhost`) never counts as a subdomain:
/// its first label equals the full hostname. Multi-label public suffixes are
/// not special-cased, so `hotel.co.uk` resolves to `hotel`; that matches the
/// deployed routing scheme, which only hands out single-label base domains.
#[must_use]
pub fn resolve_tenant_key(url: &Url) -> Option<String> {
    if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == "tenant") {
        // an empty value is treated as absent, not as an empty tenant key
        if !value.is_empty() {
            return Some(value.into_owned());
        }
    }

    let hostname = url.host_str()?;
    let label = hostname.split('.').next()?;
    if !label.is_empty() && label != "www" && label != hostname {
        return Some(label.to_string());
    }

    None
}
