// src/reader_config.rs
use crate::error::ReaderError;

/// Site endpoints and reader constants.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderConfig {
    pub api_base: String,
    pub api_query: String,
    pub image_referer: String,
    pub placeholder: String,
    /// Distance in pixels below the viewport at which grid pages start loading.
    pub lazy_threshold: f64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            api_base: String::from("http://v2.api.dmzj.com"),
            api_query: String::from("?channel=Android&version=2.6.004"),
            image_referer: String::from("http://images.dmzj.com/"),
            placeholder: String::from(
                "https://static.dmzj.com/ocomic/images/mh-last/lazyload.gif",
            ),
            lazy_threshold: 2000.0,
        }
    }
}

/// Identifies the chapter being read. Derived once from the location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOption {
    pub comic_id: u64,
    pub chapter_id: u64,
    pub comic_url: String,
}

impl ReaderOption {
    pub fn new(comic_id: u64, chapter_id: u64, comic_url: impl Into<String>) -> Self {
        Self {
            comic_id,
            chapter_id,
            comic_url: comic_url.into(),
        }
    }

    /// Accepts `/<slug>/<chapter_id>.shtml` with a `cid=<comic_id>` query.
    pub fn from_location(pathname: &str, search: &str) -> Result<Self, ReaderError> {
        let unsupported = || ReaderError::UnsupportedLocation(pathname.to_string());

        let (comic_url, file) = pathname
            .strip_prefix('/')
            .and_then(|p| p.split_once('/'))
            .ok_or_else(unsupported)?;
        if comic_url.is_empty() || !comic_url.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(unsupported());
        }
        let chapter_id = file
            .strip_suffix(".shtml")
            .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(unsupported)?
            .parse::<u64>()
            .map_err(|_| unsupported())?;

        let comic_id = query_value(search, "cid")
            .and_then(leading_number)
            .ok_or(ReaderError::MissingParameter("cid"))?;

        Ok(Self::new(comic_id, chapter_id, comic_url))
    }

    pub fn series_endpoint(&self, config: &ReaderConfig) -> String {
        format!(
            "{}/comic/{}.json{}",
            config.api_base, self.comic_id, config.api_query
        )
    }

    pub fn chapter_endpoint(&self, config: &ReaderConfig) -> String {
        format!(
            "{}/chapter/{}/{}.json{}",
            config.api_base, self.comic_id, self.chapter_id, config.api_query
        )
    }

    /// Reader URL of another chapter of the same series.
    pub fn chapter_url(&self, chapter_id: u64) -> String {
        format!(
            "/{}/{}.shtml?cid={}",
            self.comic_url, chapter_id, self.comic_id
        )
    }

    /// Where the site sends readers who finished the last chapter.
    pub fn end_url(&self) -> String {
        format!(
            "/{}/jump.shtml?{}_{}",
            self.comic_url, self.comic_id, self.chapter_id
        )
    }
}

fn query_value<'a>(search: &'a str, key: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

fn leading_number(value: &str) -> Option<u64> {
    let end = value
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_location() {
        let option = ReaderOption::from_location("/yaoshenji/84210.shtml", "?cid=12345").unwrap();
        assert_eq!(option, ReaderOption::new(12345, 84210, "yaoshenji"));
    }

    #[test]
    fn test_from_location_extra_query() {
        let option =
            ReaderOption::from_location("/abc/7.shtml", "?from=home&cid=99#x").unwrap();
        assert_eq!(option.comic_id, 99);
        assert_eq!(option.chapter_id, 7);
    }

    #[test]
    fn test_missing_cid() {
        assert_eq!(
            ReaderOption::from_location("/abc/7.shtml", ""),
            Err(ReaderError::MissingParameter("cid"))
        );
        assert_eq!(
            ReaderOption::from_location("/abc/7.shtml", "?cid=x1"),
            Err(ReaderError::MissingParameter("cid"))
        );
    }

    #[test]
    fn test_rejects_other_pages() {
        for path in ["/", "/abc/", "/abc/jump.shtml", "/ABC/1.shtml", "/abc/1.html", "/abc/1/2.shtml"] {
            assert!(
                matches!(
                    ReaderOption::from_location(path, "?cid=1"),
                    Err(ReaderError::UnsupportedLocation(_))
                ),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_urls() {
        let config = ReaderConfig::default();
        let option = ReaderOption::new(12, 345, "abc");
        assert_eq!(
            option.series_endpoint(&config),
            "http://v2.api.dmzj.com/comic/12.json?channel=Android&version=2.6.004"
        );
        assert_eq!(
            option.chapter_endpoint(&config),
            "http://v2.api.dmzj.com/chapter/12/345.json?channel=Android&version=2.6.004"
        );
        assert_eq!(option.chapter_url(346), "/abc/346.shtml?cid=12");
        assert_eq!(option.end_url(), "/abc/jump.shtml?12_345");
    }
}
