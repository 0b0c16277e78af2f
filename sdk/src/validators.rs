use url::Url;

pub fn validate_url(url: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(url).map_err(|e| anyhow::anyhow!("invalid URL: {}", e))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("invalid URL: unsupported scheme {}", url.scheme());
    }
    // Relative joins drop the last segment unless the path ends with a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

pub fn validate_positive(raw: &str) -> anyhow::Result<u64> {
    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid number {raw:?}: {}", e))?;
    if value == 0 {
        anyhow::bail!("invalid number {raw:?}: must be greater than zero");
    }
    Ok(value)
}

pub fn validate_non_negative(raw: &str) -> anyhow::Result<u64> {
    raw.trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid number {raw:?}: {}", e))
}
