// src/components/grid_view.rs
use crate::components::chapter_end_modal::ChapterEndModal;
use crate::components::reader_view::{chapter_button, follow_boundary, image_class, PageViewProps};
use crate::navigation::{page_anchor, NavAction, Navigator, ReadingMode};
use crate::utils;
use gloo_events::EventListener;
use gloo_utils::{document, window};
use std::collections::HashSet;
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent};
use yew::prelude::*;

const PREV_CHAPTER_CONFIRM: &str = "要打开上一个章节吗？";

pub enum GridMsg {
    CheckVisible,
    Loaded(usize),
    LoadFailed,
    Select(usize),
    Prev,
    Next,
    Stay,
}

/// A page is worth loading once it comes within `threshold` pixels of the
/// viewport, above or below.
pub fn within_reach(top: f64, bottom: f64, viewport_height: f64, threshold: f64) -> bool {
    top < viewport_height + threshold && bottom > -threshold
}

/// All pages of the chapter at once; images load as they approach the
/// viewport. Arrow keys move between chapters.
pub struct GridView {
    nav: Navigator,
    requested: HashSet<usize>,
    nodes: Vec<NodeRef>,
    prompt: Option<AttrValue>,
    _listeners: Vec<EventListener>,
}

impl Component for GridView {
    type Message = GridMsg;
    type Properties = PageViewProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let nav = Navigator::new(
            ReadingMode::Paginated,
            props.pages.len(),
            props.boundary.clone(),
            0,
        );

        let mut listeners = Vec::new();
        for event in ["scroll", "resize"] {
            let link = ctx.link().clone();
            listeners.push(EventListener::new(&window(), event, move |_| {
                link.send_message(GridMsg::CheckVisible)
            }));
        }
        let link = ctx.link().clone();
        listeners.push(EventListener::new(&document(), "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            match event.key().as_str() {
                "ArrowLeft" => link.send_message(GridMsg::Prev),
                "ArrowRight" => link.send_message(GridMsg::Next),
                _ => {}
            }
        }));

        Self {
            nav,
            requested: HashSet::new(),
            nodes: (0..props.pages.len()).map(|_| NodeRef::default()).collect(),
            prompt: None,
            _listeners: listeners,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            GridMsg::CheckVisible => {
                self.load_visible(ctx);
                false
            }
            GridMsg::Loaded(_) => true,
            GridMsg::LoadFailed => false,
            GridMsg::Prev | GridMsg::Next if self.prompt.is_some() => false,
            GridMsg::Select(index) => {
                let action = self.nav.select(index);
                self.apply(action)
            }
            GridMsg::Prev => {
                let action = self.nav.prev();
                self.apply(action)
            }
            GridMsg::Next => {
                let action = self.nav.next();
                self.apply(action)
            }
            GridMsg::Stay => {
                self.prompt = None;
                true
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        // Loaded images change the layout, which can pull more pages in.
        self.load_visible(ctx);
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let boundary = self.nav.boundary();
        let total = props.pages.len();

        let pages = props.pages.iter().enumerate().map(|(i, _)| {
            let src = props
                .cache
                .get(i)
                .map(|handle| handle.src())
                .unwrap_or_else(|| props.placeholder.clone());
            let onclick = ctx.link().callback(move |_: MouseEvent| GridMsg::Select(i));
            html! {
                <div class="inner_img" style="margin-top:40px">
                    <a id={page_anchor(i)} style="cursor:pointer" {onclick}>
                        <img
                            ref={self.nodes[i].clone()}
                            src={src}
                            data-idx={i.to_string()}
                            class={image_class(props)}
                            style="border:1px solid #ccc; padding:1px"
                        />
                    </a>
                    <p class="curr_page">{ format!("{}/{}", i + 1, total) }</p>
                </div>
            }
        });

        let prompt = match &self.prompt {
            Some(url) => html! {
                <ChapterEndModal
                    next_url={url.clone()}
                    on_stay={ctx.link().callback(|_: ()| GridMsg::Stay)}
                />
            },
            None => html! {},
        };

        html! {
            <>
                <div id="center_box" style="text-align:center">
                    { for pages }
                </div>
                <div class="btmBtnBox">
                    { chapter_button(boundary.prev_url.as_ref(), "上一章节", "fl") }
                    { chapter_button(boundary.next_url.as_ref(), "下一章节", "fr") }
                </div>
                { prompt }
            </>
        }
    }
}

impl GridView {
    fn load_visible(&mut self, ctx: &Context<Self>) {
        let props = ctx.props();
        let viewport = utils::viewport_height();

        for (index, node) in self.nodes.iter().enumerate() {
            if self.requested.contains(&index) {
                continue;
            }
            let Some(element) = node.cast::<Element>() else {
                continue;
            };
            let rect = element.get_bounding_client_rect();
            if !within_reach(rect.top(), rect.bottom(), viewport, props.lazy_threshold) {
                continue;
            }
            let Some(src) = props.pages.get(index) else {
                continue;
            };
            self.requested.insert(index);
            let load = props.cache.load(index, src);
            ctx.link().send_future(async move {
                match load.await {
                    Ok(_) => GridMsg::Loaded(index),
                    Err(_) => GridMsg::LoadFailed,
                }
            });
        }
    }

    fn apply(&mut self, action: NavAction) -> bool {
        match action {
            NavAction::ScrollToPage(index) => {
                utils::set_fragment(&page_anchor(index));
                false
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
    fn test_within_reach() {
        // Viewport 800px tall, 2000px lookahead.
        assert!(within_reach(0.0, 400.0, 800.0, 2000.0));
        assert!(within_reach(2700.0, 3100.0, 800.0, 2000.0));
        assert!(!within_reach(2800.0, 3200.0, 800.0, 2000.0));
        assert!(within_reach(-2500.0, -1900.0, 800.0, 2000.0));
        assert!(!within_reach(-3000.0, -2100.0, 800.0, 2000.0));
    }
}
