// src/components/continuous_view.rs
use crate::components::chapter_end_modal::ChapterEndModal;
use crate::components::reader_view::{chapter_button, follow_boundary, image_class, PageViewProps};
use crate::image_cache::ImageHandle;
use crate::navigation::{decode_fragment, encode_fragment, NavAction, Navigator, ReadingMode};
use crate::utils;
use gloo_events::EventListener;
use gloo_utils::document;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlSelectElement, KeyboardEvent};
use yew::prelude::*;

const PREV_CHAPTER_CONFIRM: &str = "已经是此章节第1页了，要打开上一个章节吗？";

pub enum ContinuousMsg {
    Prev,
    Next,
    Jump(usize),
    Loaded(usize, ImageHandle),
    LoadFailed,
    Stay,
}

/// `n/N` for the page on screen. Nothing while no page has been shown.
pub fn page_counter(shown: Option<usize>, len: usize) -> Option<String> {
    shown
        .filter(|index| *index < len)
        .map(|index| format!("{}/{}", index + 1, len))
}

/// One page at a time, restored from and mirrored to `#@page=N`.
pub struct ContinuousView {
    nav: Navigator,
    shown: Option<(usize, ImageHandle)>,
    prompt: Option<AttrValue>,
    scroll_pending: bool,
    center_ref: NodeRef,
    _keydown: EventListener,
}

impl Component for ContinuousView {
    type Message = ContinuousMsg;
    type Properties = PageViewProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();

        let start = decode_fragment(&utils::current_hash());
        if start.is_none() {
            utils::set_fragment(&encode_fragment(0));
        }
        let nav = Navigator::new(
            ReadingMode::Continuous,
            props.pages.len(),
            props.boundary.clone(),
            start.unwrap_or(0),
        );

        let link = ctx.link().clone();
        let keydown = EventListener::new(&document(), "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            match event.key().as_str() {
                "ArrowLeft" => {
                    link.send_message(ContinuousMsg::Prev);
                    event.prevent_default();
                }
                "ArrowRight" => {
                    link.send_message(ContinuousMsg::Next);
                    event.prevent_default();
                }
                _ => {}
            }
        });

        let view = Self {
            nav,
            shown: None,
            prompt: None,
            scroll_pending: false,
            center_ref: NodeRef::default(),
            _keydown: keydown,
        };
        view.request(ctx, view.nav.index());
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContinuousMsg::Prev | ContinuousMsg::Next if self.prompt.is_some() => false,
            ContinuousMsg::Prev => {
                let action = self.nav.prev();
                self.apply(ctx, action)
            }
            ContinuousMsg::Next => {
                let action = self.nav.next();
                self.apply(ctx, action)
            }
            ContinuousMsg::Jump(index) => {
                let action = self.nav.jump(index);
                self.apply(ctx, action)
            }
            ContinuousMsg::Loaded(index, handle) => {
                // A slower load for a page the reader already left.
                if index != self.nav.index() {
                    return false;
                }
                self.scroll_pending = self.shown.is_some();
                self.shown = Some((index, handle));
                true
            }
            ContinuousMsg::LoadFailed => false,
            ContinuousMsg::Stay => {
                self.prompt = None;
                true
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if self.scroll_pending {
            self.scroll_pending = false;
            if let Some(center) = self.center_ref.cast::<Element>() {
                center.scroll_into_view();
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let boundary = self.nav.boundary();
        let current = self.nav.index();

        let onprev = ctx.link().callback(|_: MouseEvent| ContinuousMsg::Prev);
        let onnext = ctx.link().callback(|_: MouseEvent| ContinuousMsg::Next);
        let onselect = ctx.link().batch_callback(|e: Event| {
            e.target_dyn_into::<HtmlSelectElement>()
                .and_then(|select| select.value().parse::<usize>().ok())
                .map(ContinuousMsg::Jump)
        });

        let image = match &self.shown {
            Some((index, handle)) => html! {
                <img name={format!("page_{}", index + 1)} src={handle.src()} class={image_class(props)} />
            },
            None if self.nav.is_empty() => html! {},
            None => html! { <div class="loading">{"加载中..."}</div> },
        };

        let prompt = match &self.prompt {
            Some(url) => html! {
                <ChapterEndModal
                    next_url={url.clone()}
                    on_stay={ctx.link().callback(|_: ()| ContinuousMsg::Stay)}
                />
            },
            None => html! {},
        };

        html! {
            <>
                <div id="center_box" ref={self.center_ref.clone()} style="text-align:center; position:relative">
                    { image }
                    <a class="img_land_prev" onclick={onprev} title="上一页 (←)"></a>
                    <a class="img_land_next" onclick={onnext} title="下一页 (→)"></a>
                </div>
                <div class="btmBtnBox">
                    { chapter_button(boundary.prev_url.as_ref(), "上一章节", "fl") }
                    <select name="select" id="page_select" onchange={onselect}>
                        { for (0..self.nav.len()).map(|i| html! {
                            <option value={i.to_string()} selected={i == current}>
                                { format!("第{}页", i + 1) }
                            </option>
                        }) }
                    </select>
                    { chapter_button(boundary.next_url.as_ref(), "下一章节", "fr") }
                </div>
                if let Some(counter) = page_counter(self.shown.as_ref().map(|(i, _)| *i), self.nav.len()) {
                    <p class="turnPage">{ counter }</p>
                }
                { prompt }
            </>
        }
    }
}

impl ContinuousView {
    fn request(&self, ctx: &Context<Self>, index: usize) {
        let Some(src) = ctx.props().pages.get(index) else {
            return;
        };
        let load = ctx.props().cache.load(index, src);
        ctx.link().send_future(async move {
            match load.await {
                Ok(handle) => ContinuousMsg::Loaded(index, handle),
                Err(_) => ContinuousMsg::LoadFailed,
            }
        });
    }

    fn apply(&mut self, ctx: &Context<Self>, action: NavAction) -> bool {
        match action {
            NavAction::ShowPage(index) => {
                // Written before the image arrives so a failed load still
                // reloads at the page the reader asked for.
                utils::set_fragment(&self.nav.fragment());
                self.request(ctx, index);
                true
            }
            other => match follow_boundary(other, PREV_CHAPTER_CONFIRM) {
                Some(url) => {
                    self.prompt = Some(url);
                    true
                }
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_counter() {
        assert_eq!(page_counter(Some(0), 3), Some("1/3".to_string()));
        assert_eq!(page_counter(Some(2), 3), Some("3/3".to_string()));
        assert_eq!(page_counter(None, 3), None);
        assert_eq!(page_counter(None, 0), None);
        assert_eq!(page_counter(Some(0), 0), None);
    }
}
