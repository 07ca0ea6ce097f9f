// src/fetch_join.rs
use crate::api::{ChapterPages, SeriesMeta};

/// Both payloads, handed out once the second one arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct Joined {
    pub series: SeriesMeta,
    pub chapter: ChapterPages,
}

/// Two-slot barrier for the series and chapter requests.
///
/// The requests complete in any order. Each completion fills its slot and the
/// join yields [`Joined`] exactly once, on whichever fill completes the pair.
/// A request that fails never fills its slot, so nothing is ever yielded.
#[derive(Debug, Default)]
pub struct FetchJoin {
    series: Option<SeriesMeta>,
    chapter: Option<ChapterPages>,
    fired: bool,
}

impl FetchJoin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill_series(&mut self, series: SeriesMeta) -> Option<Joined> {
        if !self.fired {
            self.series = Some(series);
        }
        self.ready()
    }

    pub fn fill_chapter(&mut self, chapter: ChapterPages) -> Option<Joined> {
        if !self.fired {
            self.chapter = Some(chapter);
        }
        self.ready()
    }

    pub fn completed(&self) -> usize {
        usize::from(self.series.is_some()) + usize::from(self.chapter.is_some())
    }

    fn ready(&mut self) -> Option<Joined> {
        if self.fired || self.completed() < 2 {
            return None;
        }
        let series = self.series.take()?;
        let chapter = self.chapter.take()?;
        self.fired = true;
        Some(Joined { series, chapter })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> SeriesMeta {
        SeriesMeta {
            title: "S".to_string(),
            chapters: Vec::new(),
        }
    }

    fn chapter() -> ChapterPages {
        ChapterPages {
            title: "C".to_string(),
            pages: vec!["p1".to_string()],
        }
    }

    #[test]
    fn test_series_then_chapter() {
        let mut join = FetchJoin::new();
        assert!(join.fill_series(series()).is_none());
        assert_eq!(join.completed(), 1);
        let joined = join.fill_chapter(chapter()).expect("fires on second fill");
        assert_eq!(joined.series.title, "S");
        assert_eq!(joined.chapter.pages, vec!["p1"]);
        assert!(join.fill_series(series()).is_none());
    }

    #[test]
    fn test_chapter_then_series() {
        let mut join = FetchJoin::new();
        assert!(join.fill_chapter(chapter()).is_none());
        let joined = join.fill_series(series()).expect("fires on second fill");
        assert_eq!(joined, Joined { series: series(), chapter: chapter() });
    }

    #[test]
    fn test_fires_exactly_once() {
        let mut join = FetchJoin::new();
        let mut renders = 0;
        for fired in [
            join.fill_series(series()),
            join.fill_chapter(chapter()),
            join.fill_chapter(chapter()),
            join.fill_series(series()),
        ] {
            renders += usize::from(fired.is_some());
        }
        assert_eq!(renders, 1);
    }

    #[test]
    fn test_duplicate_fill_does_not_fire() {
        let mut join = FetchJoin::new();
        assert!(join.fill_series(series()).is_none());
        assert!(join.fill_series(series()).is_none());
        assert_eq!(join.completed(), 1);
    }

    #[test]
    fn test_failed_request_never_fires() {
        // The chapter request failed: only the series slot is ever filled.
        let mut join = FetchJoin::new();
        assert!(join.fill_series(series()).is_none());
        assert_eq!(join.completed(), 1);
    }
}
