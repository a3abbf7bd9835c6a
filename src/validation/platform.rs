//! Recognized professional platforms and the domain allow-list derived from them.

use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;

/// Professional platform a profile URL belongs to.
///
/// Every variant except `Other` owns one allow-list domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIterMacro)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    GitHub,
    LinkedIn,
    Portfolio,
    DevTo,
    Medium,
    /// Any other domain that passed validation
    Other,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::GitHub => "GitHub",
            Platform::LinkedIn => "LinkedIn",
            Platform::Portfolio => "Portfolio",
            Platform::DevTo => "DEV",
            Platform::Medium => "Medium",
            Platform::Other => "Other",
        }
    }

    /// Allow-list domain for this platform (`None` for `Other`).
    pub fn domain(&self) -> Option<&'static str> {
        match self {
            Platform::GitHub => Some("github.com"),
            Platform::LinkedIn => Some("linkedin.com"),
            Platform::Portfolio => Some("portfolio.com"),
            Platform::DevTo => Some("dev.to"),
            Platform::Medium => Some("medium.com"),
            Platform::Other => None,
        }
    }

    /// Platform whose allow-list domain is contained in `host`.
    ///
    /// `host` is expected in the lowercase form produced by the URL parser.
    pub fn from_host(host: &str) -> Platform {
        use strum::IntoEnumIterator;

        Platform::iter()
            .find(|p| p.domain().is_some_and(|d| host.contains(d)))
            .unwrap_or(Platform::Other)
    }

    /// Platform of an already-normalized URL. Unparseable input maps to `Other`.
    pub fn from_url(url: &str) -> Platform {
        url::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(Platform::from_host))
            .unwrap_or(Platform::Other)
    }
}

/// Domains treated as definitely valid for analysis input.
pub fn allowed_domains() -> Vec<&'static str> {
    use strum::IntoEnumIterator;

    Platform::iter().filter_map(|p| p.domain()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_domains_match_allow_list() {
        assert_eq!(
            allowed_domains(),
            vec![
                "github.com",
                "linkedin.com",
                "portfolio.com",
                "dev.to",
                "medium.com"
            ]
        );
    }

    #[test]
    fn test_from_host_substring_match() {
        assert_eq!(Platform::from_host("github.com"), Platform::GitHub);
        assert_eq!(Platform::from_host("gist.github.com"), Platform::GitHub);
        assert_eq!(Platform::from_host("www.linkedin.com"), Platform::LinkedIn);
        assert_eq!(Platform::from_host("dev.to"), Platform::DevTo);
        assert_eq!(Platform::from_host("example.org"), Platform::Other);
    }

    #[test]
    fn test_from_url_uses_parsed_host() {
        assert_eq!(
            Platform::from_url("https://GitHub.com/octocat"),
            Platform::GitHub
        );
        assert_eq!(
            Platform::from_url("https://medium.com/@someone"),
            Platform::Medium
        );
        assert_eq!(Platform::from_url("not a url"), Platform::Other);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Platform::LinkedIn.to_string(), "LinkedIn");
        assert_eq!(Platform::DevTo.to_string(), "DEV");
    }
}
