// src/image_cache.rs
use crate::error::ReaderError;
use futures::future::{self, Either, FutureExt, LocalBoxFuture, Shared};
use gloo::file::{Blob, ObjectUrl};
use gloo_net::http::Request;
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use yew::AttrValue;

/// Displayable reference to a downloaded page image.
///
/// Holds the object URL alive for as long as any clone exists.
#[derive(Clone)]
pub struct ImageHandle {
    src: AttrValue,
    _object_url: Option<Rc<ObjectUrl>>,
}

impl ImageHandle {
    pub fn from_object_url(url: ObjectUrl) -> Self {
        Self {
            src: AttrValue::from(url.to_string()),
            _object_url: Some(Rc::new(url)),
        }
    }

    pub fn from_src(src: impl Into<AttrValue>) -> Self {
        Self {
            src: src.into(),
            _object_url: None,
        }
    }

    pub fn src(&self) -> AttrValue {
        self.src.clone()
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.src == other.src
    }
}

impl std::fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ImageHandle").field(&self.src).finish()
    }
}

pub type ImageResult = Result<ImageHandle, ReaderError>;

/// Downloads one page image.
pub trait ImageFetcher {
    fn fetch(&self, src: &str) -> LocalBoxFuture<'static, ImageResult>;
}

/// Fetches through `gloo-net` with the site's hotlink referer and wraps the
/// bytes in an object URL.
pub struct GlooImageFetcher {
    referer: String,
}

impl GlooImageFetcher {
    pub fn new(referer: impl Into<String>) -> Self {
        Self {
            referer: referer.into(),
        }
    }
}

impl ImageFetcher for GlooImageFetcher {
    fn fetch(&self, src: &str) -> LocalBoxFuture<'static, ImageResult> {
        let src = src.to_string();
        let referer = self.referer.clone();
        async move {
            let resp = Request::get(&src)
                .header("Referer", &referer)
                .send()
                .await
                .map_err(|e| ReaderError::network(&src, e))?;
            if !resp.ok() {
                return Err(ReaderError::Status {
                    url: src,
                    status: resp.status(),
                });
            }
            let mime = resp.headers().get("content-type");
            let bytes = resp
                .binary()
                .await
                .map_err(|e| ReaderError::network(&src, e))?;
            let blob = Blob::new_with_options(bytes.as_slice(), mime.as_deref());
            Ok(ImageHandle::from_object_url(ObjectUrl::from(blob)))
        }
        .boxed_local()
    }
}

type PendingLoad = Shared<LocalBoxFuture<'static, ImageResult>>;

#[derive(Default)]
struct CacheState {
    loaded: HashMap<usize, ImageHandle>,
    pending: HashMap<usize, PendingLoad>,
}

/// Page images of the current chapter keyed by page index.
///
/// Entries are never evicted. At most one fetch per index is in flight:
/// callers arriving while a fetch runs wait on the same future. A failed
/// fetch leaves no entry behind, so a later call fetches again.
#[derive(Clone)]
pub struct ImageCache {
    state: Rc<RefCell<CacheState>>,
    fetcher: Rc<dyn ImageFetcher>,
}

impl ImageCache {
    pub fn new(fetcher: Rc<dyn ImageFetcher>) -> Self {
        Self {
            state: Rc::new(RefCell::new(CacheState::default())),
            fetcher,
        }
    }

    pub fn get(&self, index: usize) -> Option<ImageHandle> {
        self.state.borrow().loaded.get(&index).cloned()
    }

    pub fn load(&self, index: usize, src: &str) -> impl Future<Output = ImageResult> + 'static {
        let pending = {
            let mut state = self.state.borrow_mut();
            if let Some(handle) = state.loaded.get(&index) {
                log::debug!("Image cache hit for page {}", index + 1);
                let hit: ImageResult = Ok(handle.clone());
                return Either::Left(future::ready(hit));
            }
            match state.pending.get(&index) {
                Some(pending) => {
                    log::debug!("Joining in-flight load for page {}", index + 1);
                    pending.clone()
                }
                None => {
                    let pending = self.fetcher.fetch(src).shared();
                    state.pending.insert(index, pending.clone());
                    pending
                }
            }
        };

        let state = Rc::clone(&self.state);
        Either::Right(async move {
            let result = pending.clone().await;
            let mut state = state.borrow_mut();
            // A retry may already have registered a newer load for this index.
            if state
                .pending
                .get(&index)
                .is_some_and(|current| current.ptr_eq(&pending))
            {
                state.pending.remove(&index);
            }
            match &result {
                Ok(handle) => {
                    state
                        .loaded
                        .entry(index)
                        .or_insert_with(|| handle.clone());
                }
                Err(e) => log::warn!("Failed to load page {}: {}", index + 1, e),
            }
            result
        })
    }
}

impl PartialEq for ImageCache {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}
