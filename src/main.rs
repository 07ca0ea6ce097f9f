// src/main.rs
mod api;
mod components;
mod error;
mod fetch_join;
mod image_cache;
mod navigation;
mod preferences;
mod reader_config;
mod template;
mod utils;

use api::{ChapterPages, SeriesMeta};
use components::reader_view::{PageViewProps, ReaderView};
use components::toolbar::Toolbar;
use error::ReaderError;
use fetch_join::{FetchJoin, Joined};
use image_cache::{GlooImageFetcher, ImageCache};
use navigation::{ChapterBoundary, ReadingMode};
use reader_config::{ReaderConfig, ReaderOption};
use std::rc::Rc;
use yew::prelude::*;

pub enum AppMsg {
    SeriesLoaded(Result<SeriesMeta, ReaderError>),
    ChapterLoaded(Result<ChapterPages, ReaderError>),
    SwitchMode,
    ToggleFitWidth,
    ToggleGrayscale,
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub option: ReaderOption,
    pub config: Rc<ReaderConfig>,
}

/// Rendered chapter, available once both payloads arrived.
struct ReaderDocument {
    body: AttrValue,
    pages: Rc<Vec<String>>,
    boundary: ChapterBoundary,
}

pub struct App {
    join: FetchJoin,
    document: Option<ReaderDocument>,
    cache: ImageCache,
    mode: ReadingMode,
    fit_width: bool,
    grayscale: bool,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        launch(ctx);

        let fetcher = GlooImageFetcher::new(ctx.props().config.image_referer.clone());
        Self {
            join: FetchJoin::new(),
            document: None,
            cache: ImageCache::new(Rc::new(fetcher)),
            mode: preferences::reading_mode(),
            fit_width: true,
            grayscale: preferences::grayscale(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::SeriesLoaded(Ok(series)) => match self.join.fill_series(series) {
                Some(joined) => self.mount(ctx, joined),
                None => false,
            },
            AppMsg::ChapterLoaded(Ok(chapter)) => match self.join.fill_chapter(chapter) {
                Some(joined) => self.mount(ctx, joined),
                None => false,
            },
            AppMsg::SeriesLoaded(Err(e)) | AppMsg::ChapterLoaded(Err(e)) => {
                log::warn!("Reader not mounted: {}", e);
                false
            }
            AppMsg::SwitchMode => {
                match preferences::set_reading_mode(self.mode.toggled()) {
                    Ok(()) => utils::reload(),
                    Err(e) => log::warn!("Failed to switch reading mode: {}", e),
                }
                false
            }
            AppMsg::ToggleFitWidth => {
                self.fit_width = !self.fit_width;
                true
            }
            AppMsg::ToggleGrayscale => {
                self.grayscale = !self.grayscale;
                if let Err(e) = preferences::set_grayscale(self.grayscale) {
                    log::warn!("Failed to persist image filter: {}", e);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(document) = &self.document else {
            return html! {};
        };
        let config = &ctx.props().config;

        let view = PageViewProps {
            pages: document.pages.clone(),
            boundary: document.boundary.clone(),
            cache: self.cache.clone(),
            placeholder: AttrValue::from(config.placeholder.clone()),
            lazy_threshold: config.lazy_threshold,
            fit_width: self.fit_width,
            grayscale: self.grayscale,
        };

        html! {
            <div class="reader">
                <Toolbar
                    mode={self.mode}
                    fit_width={self.fit_width}
                    grayscale={self.grayscale}
                    on_switch_mode={ctx.link().callback(|_: ()| AppMsg::SwitchMode)}
                    on_toggle_fit={ctx.link().callback(|_: ()| AppMsg::ToggleFitWidth)}
                    on_toggle_filter={ctx.link().callback(|_: ()| AppMsg::ToggleGrayscale)}
                />
                <div class="clearfix"></div>
                { Html::from_html_unchecked(document.body.clone()) }
                <ReaderView mode={self.mode} {view} />
            </div>
        }
    }
}

impl App {
    fn mount(&mut self, ctx: &Context<Self>, joined: Joined) -> bool {
        let option = &ctx.props().option;
        let Joined { series, chapter } = joined;

        let neighbors = series.neighbors(option.chapter_id);
        let series_subs = template::series_substitutions(&series, &neighbors, option);
        let chapter_subs = template::chapter_substitutions(&chapter, option);

        let head = template::render(&template::render(template::HEAD, &series_subs), &chapter_subs);
        let body = template::render(&template::render(template::BODY, &series_subs), &chapter_subs);
        utils::set_head_html(&head);

        log::info!(
            "Mounting {} / {} ({} pages, {:?})",
            series.title,
            chapter.title,
            chapter.pages.len(),
            self.mode
        );
        self.document = Some(ReaderDocument {
            body: AttrValue::from(body),
            pages: Rc::new(chapter.pages),
            boundary: ChapterBoundary::new(option, &neighbors),
        });
        true
    }
}

/// Fires the series and chapter requests side by side.
fn launch(ctx: &Context<App>) {
    let props = ctx.props();

    let (option, config) = (props.option.clone(), props.config.clone());
    ctx.link().send_future(async move {
        AppMsg::SeriesLoaded(api::fetch_series(&option, &config).await)
    });

    let (option, config) = (props.option.clone(), props.config.clone());
    ctx.link().send_future(async move {
        AppMsg::ChapterLoaded(api::fetch_chapter(&option, &config).await)
    });
}

fn intercept() -> Result<Option<AppProps>, ReaderError> {
    let (pathname, search, _) = utils::current_location()?;
    let option = ReaderOption::from_location(&pathname, &search)?;

    if !utils::native_page_blocked() {
        utils::patch_native_chapter_links(option.comic_id);
        return Ok(None);
    }

    utils::blank_page()?;
    log::info!(
        "Intercepting chapter {} of comic {}",
        option.chapter_id,
        option.comic_id
    );
    Ok(Some(AppProps {
        option,
        config: Rc::new(ReaderConfig::default()),
    }))
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());

    match intercept() {
        Ok(Some(props)) => match gloo_utils::document().body() {
            Some(body) => {
                yew::Renderer::<App>::with_root_and_props(body.into(), props).render();
            }
            None => log::warn!("Document has no body"),
        },
        Ok(None) => {}
        Err(e) => log::debug!("Leaving page untouched: {}", e),
    }
}
