use url::Url;

/// Platform a submitted video URL points at. Drives the placeholder title and
/// the badge shown next to each card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    TikTok,
    Instagram,
    YouTube,
    Generic,
}

impl SourceKind {
    /// Name shown until the extraction service reports the real title.
    pub fn placeholder_name(self) -> &'static str {
        match self {
            SourceKind::TikTok => "TikTok Recipe",
            SourceKind::Instagram => "Instagram Recipe",
            SourceKind::YouTube => "YouTube Recipe",
            SourceKind::Generic => "Recipe Video",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::TikTok => "tiktok",
            SourceKind::Instagram => "instagram",
            SourceKind::YouTube => "youtube",
            SourceKind::Generic => "generic",
        }
    }

    fn from_hostname(hostname: &str) -> Self {
        let host = hostname.to_ascii_lowercase();
        if host.contains("tiktok.com") {
            SourceKind::TikTok
        } else if host.contains("instagram.com") {
            SourceKind::Instagram
        } else if host.contains("youtube.com") || host.contains("youtu.be") {
            SourceKind::YouTube
        } else {
            SourceKind::Generic
        }
    }
}

/// Classify a video URL by its hostname.
///
/// Returns `None` when the input does not parse as an absolute URL; callers
/// treat that as a validation failure. A parseable URL without a host (for
/// example `mailto:`) is classified as [`SourceKind::Generic`].
pub fn classify_source(raw: &str) -> Option<SourceKind> {
    let parsed = Url::parse(raw.trim()).ok()?;
    Some(
        parsed
            .host_str()
            .map(SourceKind::from_hostname)
            .unwrap_or(SourceKind::Generic),
    )
}
