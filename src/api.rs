// src/api.rs
use crate::error::ReaderError;
use crate::reader_config::{ReaderConfig, ReaderOption};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Series payload: chapter groups, each listed newest first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesMeta {
    pub title: String,
    pub chapters: Vec<ChapterGroup>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChapterGroup {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "data")]
    pub entries: Vec<ChapterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChapterEntry {
    pub chapter_id: u64,
    pub chapter_title: String,
}

/// Chapter payload: title plus the page list in reading order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChapterPages {
    pub title: String,
    #[serde(rename = "page_url")]
    pub pages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterNeighbors {
    pub prev: Option<ChapterEntry>,
    pub next: Option<ChapterEntry>,
}

impl SeriesMeta {
    /// Finds the chapters around `chapter_id`. Groups are searched in order and
    /// the first group containing the chapter wins.
    pub fn neighbors(&self, chapter_id: u64) -> ChapterNeighbors {
        for group in &self.chapters {
            let Some(pos) = group
                .entries
                .iter()
                .position(|entry| entry.chapter_id == chapter_id)
            else {
                continue;
            };
            log::debug!("Chapter {} found in group '{}'", chapter_id, group.title);
            return ChapterNeighbors {
                next: pos
                    .checked_sub(1)
                    .and_then(|i| group.entries.get(i))
                    .cloned(),
                prev: group.entries.get(pos + 1).cloned(),
            };
        }
        ChapterNeighbors::default()
    }
}

pub async fn fetch_series(
    option: &ReaderOption,
    config: &ReaderConfig,
) -> Result<SeriesMeta, ReaderError> {
    fetch_json(&option.series_endpoint(config)).await
}

pub async fn fetch_chapter(
    option: &ReaderOption,
    config: &ReaderConfig,
) -> Result<ChapterPages, ReaderError> {
    fetch_json(&option.chapter_endpoint(config)).await
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, ReaderError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| ReaderError::network(url, e))?;
    if !resp.ok() {
        return Err(ReaderError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let body = resp
        .text()
        .await
        .map_err(|e| ReaderError::network(url, e))?;
    let payload = decode(url, &body)?;
    log::info!("Loaded {}", url);
    Ok(payload)
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ReaderError> {
    serde_json::from_str(body).map_err(|e| ReaderError::decode(url, e))
}
