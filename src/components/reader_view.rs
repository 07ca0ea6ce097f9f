// src/components/reader_view.rs
use crate::components::continuous_view::ContinuousView;
use crate::components::grid_view::GridView;
use crate::image_cache::ImageCache;
use crate::navigation::{ChapterBoundary, NavAction, ReadingMode};
use crate::utils;
use std::rc::Rc;
use yew::prelude::*;

const FIRST_CHAPTER_NOTICE: &str = "已经是第一个章节了！";

/// Everything both reading modes need to draw a chapter.
#[derive(Properties, PartialEq, Clone)]
pub struct PageViewProps {
    pub pages: Rc<Vec<String>>,
    pub boundary: ChapterBoundary,
    pub cache: ImageCache,
    pub placeholder: AttrValue,
    pub lazy_threshold: f64,
    pub fit_width: bool,
    pub grayscale: bool,
}

#[derive(Properties, PartialEq)]
pub struct ReaderViewProps {
    pub mode: ReadingMode,
    pub view: PageViewProps,
}

#[function_component(ReaderView)]
pub fn reader_view(props: &ReaderViewProps) -> Html {
    match props.mode {
        ReadingMode::Continuous => html! { <ContinuousView ..props.view.clone() /> },
        ReadingMode::Paginated => html! { <GridView ..props.view.clone() /> },
    }
}

pub(crate) fn image_class(props: &PageViewProps) -> Classes {
    classes!(
        props.fit_width.then_some("fitwidth"),
        props.grayscale.then_some("filterimg")
    )
}

/// Runs the actions that leave the current chapter. Returns the next
/// chapter URL when the end-of-chapter prompt has to be shown.
pub(crate) fn follow_boundary(action: NavAction, confirm_message: &str) -> Option<AttrValue> {
    match action {
        NavAction::ConfirmPrevChapter(url) => {
            if gloo::dialogs::confirm(confirm_message) {
                utils::navigate(&url);
            }
            None
        }
        NavAction::FirstChapterNotice => {
            gloo::dialogs::alert(FIRST_CHAPTER_NOTICE);
            None
        }
        NavAction::EndOfChapterPrompt(url) => Some(AttrValue::from(url)),
        NavAction::Leave(url) => {
            utils::navigate(&url);
            None
        }
        NavAction::ShowPage(_) | NavAction::ScrollToPage(_) => None,
    }
}

pub(crate) fn chapter_button(url: Option<&String>, label: &str, side: &'static str) -> Html {
    match url {
        Some(url) => html! {
            <a class={classes!("btm_chapter_btn", side)} href={url.clone()}>{label}</a>
        },
        None => html! {},
    }
}
