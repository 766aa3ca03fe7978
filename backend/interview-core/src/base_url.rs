use url::Url;

/// Parses a service base URL so that relative endpoints join beneath it.
///
/// `Url::join` replaces the last path segment unless the base ends in `/`,
/// so `https://host/api/v2/piston` would otherwise resolve `execute` to
/// `https://host/api/v2/execute`.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
