//! # Embeddable Video Resolution
//!
//! Demo videos hosted on Vimeo render as an embedded player; anything else
//! renders as a plain link. Recognized path shapes:
//!
//! - `/123456789`
//! - `/video/123456789` (including `player.vimeo.com/video/...`)
//! - `/channels/<name>/123456789`
//! - `/album/42/video/123456789`
//!
//! A numeric segment following `video/` wins; otherwise the first all-digit
//! segment is the video ID. The `video/` rule keeps album IDs from being
//! mistaken for video IDs, and taking the first segment keeps the privacy
//! hash of an unlisted link (`/123456789/987654321`) from being taken as one.

use regex::Regex;
use url::Url;

const VIMEO_HOSTS: [&str; 3] = ["vimeo.com", "www.vimeo.com", "player.vimeo.com"];
const EMBED_BASE: &str = "https://player.vimeo.com/video/";

/// Compiled patterns for recognizing embeddable video URLs.
#[derive(Debug, Clone)]
pub struct VideoResolver {
    after_video: Regex,
    digits: Regex,
}

impl VideoResolver {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            after_video: Regex::new(r"(?:^|/)video/([0-9]+)(?:/|$)")?,
            digits: Regex::new(r"^[0-9]+$")?,
        })
    }

    /// The Vimeo video ID in `url`, if it is a recognized Vimeo URL.
    pub fn video_id(&self, url: &Url) -> Option<String> {
        let host = url.host_str()?;
        if !VIMEO_HOSTS.contains(&host) {
            return None;
        }
        let path = url.path();
        if let Some(caps) = self.after_video.captures(path) {
            return caps.get(1).map(|m| m.as_str().to_string());
        }
        path.split('/')
            .find(|seg| self.digits.is_match(seg))
            .map(str::to_string)
    }

    /// The canonical embed URL for `url`, if it is embeddable.
    pub fn embed_url(&self, url: &Url) -> Option<String> {
        self.video_id(url).map(|id| format!("{EMBED_BASE}{id}"))
    }
}
