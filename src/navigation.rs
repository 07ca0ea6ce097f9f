// src/navigation.rs
use crate::api::ChapterNeighbors;
use crate::reader_config::ReaderOption;

const FRAGMENT_KEY: &str = "page=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingMode {
    /// One image at a time with prev/next controls.
    Continuous,
    /// Every page of the chapter in a lazily loaded grid.
    Paginated,
}

impl ReadingMode {
    pub fn toggled(self) -> Self {
        match self {
            ReadingMode::Continuous => ReadingMode::Paginated,
            ReadingMode::Paginated => ReadingMode::Continuous,
        }
    }
}

/// Where the reader may go past either end of the current chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterBoundary {
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub end_url: String,
}

impl ChapterBoundary {
    pub fn new(option: &ReaderOption, neighbors: &ChapterNeighbors) -> Self {
        Self {
            prev_url: neighbors
                .prev
                .as_ref()
                .map(|e| option.chapter_url(e.chapter_id)),
            next_url: neighbors
                .next
                .as_ref()
                .map(|e| option.chapter_url(e.chapter_id)),
            end_url: option.end_url(),
        }
    }
}

/// Outcome of a navigation request. The view carries it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    /// Display page `index` (continuous mode).
    ShowPage(usize),
    /// Scroll the grid to page `index` (paginated mode).
    ScrollToPage(usize),
    /// Ask the user before opening the previous chapter at `url`.
    ConfirmPrevChapter(String),
    /// Already at the first page of the first chapter.
    FirstChapterNotice,
    /// Last page reached: offer to stay or open the next chapter at `url`.
    EndOfChapterPrompt(String),
    /// Leave the reader for `url` without asking.
    Leave(String),
}

/// Tracks the current page of one chapter view and resolves prev/next
/// requests, including transitions across chapter boundaries.
///
/// The index is always within `[0, len - 1]`. First/last checks compare
/// indices, never page URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    mode: ReadingMode,
    index: usize,
    len: usize,
    boundary: ChapterBoundary,
}

impl Navigator {
    pub fn new(mode: ReadingMode, len: usize, boundary: ChapterBoundary, start: usize) -> Self {
        Self {
            mode,
            index: start.min(len.saturating_sub(1)),
            len,
            boundary,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn boundary(&self) -> &ChapterBoundary {
        &self.boundary
    }

    fn last(&self) -> usize {
        self.len.saturating_sub(1)
    }

    pub fn prev(&mut self) -> NavAction {
        match self.mode {
            ReadingMode::Continuous if self.index > 0 => {
                self.index -= 1;
                NavAction::ShowPage(self.index)
            }
            _ => self.leave_backward(),
        }
    }

    pub fn next(&mut self) -> NavAction {
        match self.mode {
            ReadingMode::Continuous if self.index < self.last() => {
                self.index += 1;
                NavAction::ShowPage(self.index)
            }
            _ => self.leave_forward(),
        }
    }

    /// Direct jump from the page selector. Out of range indices are clamped.
    pub fn jump(&mut self, index: usize) -> NavAction {
        self.index = index.min(self.last());
        NavAction::ShowPage(self.index)
    }

    /// Click on a page in the grid: scroll to the following page, or run the
    /// end-of-chapter logic when the last page was clicked.
    pub fn select(&mut self, index: usize) -> NavAction {
        let index = index.min(self.last());
        self.index = index;
        if index < self.last() {
            NavAction::ScrollToPage(index + 1)
        } else {
            self.leave_forward()
        }
    }

    pub fn fragment(&self) -> String {
        encode_fragment(self.index)
    }

    fn leave_backward(&self) -> NavAction {
        match &self.boundary.prev_url {
            Some(url) => NavAction::ConfirmPrevChapter(url.clone()),
            None => NavAction::FirstChapterNotice,
        }
    }

    fn leave_forward(&self) -> NavAction {
        match &self.boundary.next_url {
            Some(url) => NavAction::EndOfChapterPrompt(url.clone()),
            None => NavAction::Leave(self.boundary.end_url.clone()),
        }
    }
}

/// Fragment for the page at `index` (zero based), e.g. `@page=5` for index 4.
pub fn encode_fragment(index: usize) -> String {
    format!("@{}{}", FRAGMENT_KEY, index + 1)
}

/// Anchor id of page `index` in the grid, e.g. `page=5` for index 4.
pub fn page_anchor(index: usize) -> String {
    format!("{}{}", FRAGMENT_KEY, index + 1)
}

/// Reads a zero based page index from `#@page=N` or `#page=N`.
pub fn decode_fragment(hash: &str) -> Option<usize> {
    let hash = hash.trim_start_matches('#');
    let hash = hash.strip_prefix('@').unwrap_or(hash);
    hash.strip_prefix(FRAGMENT_KEY)?
        .parse::<usize>()
        .ok()?
        .checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary(prev: bool, next: bool) -> ChapterBoundary {
        ChapterBoundary {
            prev_url: prev.then(|| "/abc/1.shtml?cid=9".to_string()),
            next_url: next.then(|| "/abc/3.shtml?cid=9".to_string()),
            end_url: "/abc/jump.shtml?9_2".to_string(),
        }
    }

    fn continuous(len: usize, prev: bool, next: bool) -> Navigator {
        Navigator::new(ReadingMode::Continuous, len, boundary(prev, next), 0)
    }

    #[test]
    fn test_walk_through_chapter() {
        let mut nav = continuous(3, true, true);
        assert_eq!(nav.next(), NavAction::ShowPage(1));
        assert_eq!(nav.next(), NavAction::ShowPage(2));
        assert_eq!(
            nav.next(),
            NavAction::EndOfChapterPrompt("/abc/3.shtml?cid=9".to_string())
        );
        assert_eq!(nav.index(), 2);
        assert_eq!(nav.prev(), NavAction::ShowPage(1));
        assert_eq!(nav.prev(), NavAction::ShowPage(0));
        assert_eq!(
            nav.prev(),
            NavAction::ConfirmPrevChapter("/abc/1.shtml?cid=9".to_string())
        );
        assert_eq!(nav.index(), 0);
    }

    #[test]
    fn test_last_page_without_next_chapter_leaves() {
        let mut nav = Navigator::new(ReadingMode::Continuous, 2, boundary(true, false), 1);
        assert_eq!(nav.next(), NavAction::Leave("/abc/jump.shtml?9_2".to_string()));
        assert_eq!(nav.index(), 1);
    }

    #[test]
    fn test_last_page_with_next_chapter_asks() {
        let mut nav = Navigator::new(ReadingMode::Continuous, 2, boundary(false, true), 1);
        assert!(matches!(nav.next(), NavAction::EndOfChapterPrompt(_)));
        assert_eq!(nav.index(), 1);
    }

    #[test]
    fn test_first_page_without_prev_chapter() {
        let mut nav = continuous(3, false, true);
        let before = nav.clone();
        assert_eq!(nav.prev(), NavAction::FirstChapterNotice);
        assert_eq!(nav, before);
    }

    #[test]
    fn test_index_compare_not_urls() {
        // Identical page URLs must not confuse first/last detection.
        let mut nav = continuous(3, false, false);
        nav.jump(1);
        assert_eq!(nav.next(), NavAction::ShowPage(2));
        assert_eq!(nav.next(), NavAction::Leave("/abc/jump.shtml?9_2".to_string()));
    }

    #[test]
    fn test_start_and_jump_are_clamped() {
        let nav = Navigator::new(ReadingMode::Continuous, 3, boundary(false, false), 10);
        assert_eq!(nav.index(), 2);

        let mut nav = continuous(3, false, false);
        assert_eq!(nav.jump(7), NavAction::ShowPage(2));
    }

    #[test]
    fn test_empty_chapter() {
        let mut nav = continuous(0, false, true);
        assert_eq!(nav.index(), 0);
        assert!(nav.is_empty());
        assert!(matches!(nav.next(), NavAction::EndOfChapterPrompt(_)));
        assert_eq!(nav.prev(), NavAction::FirstChapterNotice);
    }

    #[test]
    fn test_paginated_keys_act_on_chapters() {
        let mut nav = Navigator::new(ReadingMode::Paginated, 5, boundary(true, true), 2);
        assert!(matches!(nav.prev(), NavAction::ConfirmPrevChapter(_)));
        assert!(matches!(nav.next(), NavAction::EndOfChapterPrompt(_)));
        assert_eq!(nav.index(), 2);
    }

    #[test]
    fn test_paginated_select() {
        let mut nav = Navigator::new(ReadingMode::Paginated, 3, boundary(false, false), 0);
        assert_eq!(nav.select(0), NavAction::ScrollToPage(1));
        assert_eq!(nav.select(1), NavAction::ScrollToPage(2));
        assert_eq!(nav.select(2), NavAction::Leave("/abc/jump.shtml?9_2".to_string()));
    }

    #[test]
    fn test_fragment_round_trip() {
        assert_eq!(encode_fragment(4), "@page=5");
        assert_eq!(decode_fragment("#@page=5"), Some(4));
        assert_eq!(decode_fragment(&encode_fragment(4)), Some(4));
    }

    #[test]
    fn test_decode_fragment_variants() {
        assert_eq!(decode_fragment("#page=3"), Some(2));
        assert_eq!(decode_fragment(""), None);
        assert_eq!(decode_fragment("#@page=0"), None);
        assert_eq!(decode_fragment("#@page=x"), None);
        assert_eq!(decode_fragment("#other=2"), None);
    }

    #[test]
    fn test_navigator_fragment() {
        let mut nav = continuous(6, false, false);
        nav.jump(4);
        assert_eq!(nav.fragment(), "@page=5");
        assert_eq!(page_anchor(4), "page=5");
    }

    #[test]
    fn test_fragment_follows_requested_page() {
        let mut nav = continuous(3, true, true);
        assert_eq!(nav.next(), NavAction::ShowPage(1));
        assert_eq!(nav.fragment(), "@page=2");
        assert_eq!(nav.next(), NavAction::ShowPage(2));
        assert_eq!(nav.fragment(), "@page=3");
        // Leaving the chapter does not move the recorded page.
        assert!(matches!(nav.next(), NavAction::EndOfChapterPrompt(_)));
        assert_eq!(decode_fragment(&nav.fragment()), Some(2));
    }

    #[test]
    fn test_boundary_from_neighbors() {
        use crate::api::ChapterEntry;
        let option = ReaderOption::new(9, 2, "abc");
        let neighbors = ChapterNeighbors {
            prev: None,
            next: Some(ChapterEntry {
                chapter_id: 3,
                chapter_title: "3".to_string(),
            }),
        };
        assert_eq!(ChapterBoundary::new(&option, &neighbors), boundary(false, true));
    }
}
