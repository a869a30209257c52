//! Remote image component.
//!
//! Images are fetched through an [`ImageLoader`]. An [`ImageView`] remembers
//! which URL it is showing; a completion for any other URL arrives too late and
//! is dropped.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use glam::DVec2;
use tracing::{debug, trace};

use quilt_core::{Color, ImageLoadError, Rect, Size, View, ViewBase};
use quilt_layout::ViewComponent;

/// A decoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub url: String,
    pub pixel_size: Size,
}

impl Image {
    pub fn new(url: impl Into<String>, pixel_size: Size) -> Self {
        Self {
            url: url.into(),
            pixel_size,
        }
    }

    /// Width over height, if both are positive.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.pixel_size.width > 0.0 && self.pixel_size.height > 0.0)
            .then(|| self.pixel_size.width / self.pixel_size.height)
    }
}

/// Called once with the outcome of a load.
pub type ImageCompletion = Box<dyn FnOnce(Result<Image, ImageLoadError>)>;

/// Fetches images by URL. The completion may run before `load_image`
/// returns or at any later point on the same thread.
pub trait ImageLoader {
    fn load_image(&self, url: &str, completion: ImageCompletion);
}

/// Shared handle to a loader. Two handles are equal when they point at the
/// same loader.
#[derive(Clone)]
pub struct SharedImageLoader(Rc<dyn ImageLoader>);

impl SharedImageLoader {
    pub fn new(loader: impl ImageLoader + 'static) -> Self {
        Self(Rc::new(loader))
    }

    pub fn from_rc(loader: Rc<dyn ImageLoader>) -> Self {
        Self(loader)
    }

    pub fn load_image(&self, url: &str, completion: ImageCompletion) {
        self.0.load_image(url, completion);
    }
}

impl PartialEq for SharedImageLoader {
    fn eq(&self, other: &Self) -> bool {
        Rc::as_ptr(&self.0) as *const () == Rc::as_ptr(&other.0) as *const ()
    }
}

impl fmt::Debug for SharedImageLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedImageLoader(..)")
    }
}

/// How the image is drawn within the view's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentMode {
    /// Scale to cover the bounds, cropping the overflow
    #[default]
    AspectFill,
    /// Scale to fit entirely within the bounds
    AspectFit,
    /// Stretch to the bounds exactly
    ScaleToFill,
    /// Natural size, centered
    Center,
}

impl ContentMode {
    /// Where an image of `image_size` is drawn inside `bounds`.
    pub fn image_rect(self, image_size: Size, bounds: Rect) -> Rect {
        if image_size.is_empty() {
            return bounds;
        }
        let image = image_size.to_vec();
        let scale = bounds.size().to_vec() / image;
        let drawn: DVec2 = match self {
            ContentMode::ScaleToFill => return bounds,
            ContentMode::AspectFill => image * scale.max_element(),
            ContentMode::AspectFit => image * scale.min_element(),
            ContentMode::Center => image,
        };
        Rect::from_vecs(bounds.center() - drawn / 2.0, drawn)
    }
}

/// How an image view picks its size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageSizing {
    /// Always this size, narrowed to the available width
    Fixed(Size),
    /// Full available width, height from a width/height ratio
    AspectRatio(f64),
    /// The loaded image's size, scaled down to the available width
    #[default]
    Intrinsic,
}

impl ImageSizing {
    /// Size within `available` given the loaded image size, if any.
    pub fn fit(self, available: Size, image: Option<Size>) -> Size {
        let width_limit = if available.width.is_finite() {
            available.width.max(0.0)
        } else {
            f64::MAX
        };
        match self {
            ImageSizing::Fixed(size) => Size::new(size.width.min(width_limit), size.height),
            ImageSizing::AspectRatio(ratio) => {
                if ratio <= 0.0 || !available.width.is_finite() {
                    return Size::ZERO;
                }
                Size::new(width_limit, width_limit / ratio)
            }
            ImageSizing::Intrinsic => match image {
                Some(image) if !image.is_empty() => {
                    let scale = (width_limit / image.width).min(1.0);
                    Size::from(image.to_vec() * scale)
                }
                _ => Size::ZERO,
            },
        }
    }
}

/// An image fetched from `url`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageComponent {
    pub url: Option<String>,
    pub sizing: ImageSizing,
    pub content_mode: ContentMode,
    /// Shown until the image arrives
    pub placeholder: Color,
    pub background_color: Option<Color>,
    pub loader: Option<SharedImageLoader>,
}

impl ImageComponent {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            placeholder: Color::LIGHT_GRAY,
            ..Default::default()
        }
    }

    pub fn with_sizing(mut self, sizing: ImageSizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_size(self, width: f64, height: f64) -> Self {
        self.with_sizing(ImageSizing::Fixed(Size::new(width, height)))
    }

    pub fn with_aspect_ratio(self, ratio: f64) -> Self {
        self.with_sizing(ImageSizing::AspectRatio(ratio))
    }

    pub fn with_content_mode(mut self, content_mode: ContentMode) -> Self {
        self.content_mode = content_mode;
        self
    }

    pub fn with_placeholder(mut self, placeholder: Color) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_loader(mut self, loader: SharedImageLoader) -> Self {
        self.loader = Some(loader);
        self
    }
}

impl ViewComponent for ImageComponent {
    type View = ImageView;

    fn create_view(&self) -> ImageView {
        ImageView::default()
    }

    fn update_view(&self, view: &mut ImageView) {
        view.sizing = self.sizing;
        view.content_mode = self.content_mode;
        view.placeholder = self.placeholder;
        view.base.background = self.background_color;
        view.set_url(self.url.clone(), self.loader.as_ref());
    }

    fn preferred_size(&self, available: Size) -> Option<Size> {
        match self.sizing {
            ImageSizing::Intrinsic => None,
            sizing => Some(sizing.fit(available, None)),
        }
    }
}

#[derive(Debug, Default)]
struct ImageState {
    url: Option<String>,
    image: Option<Image>,
    error: Option<ImageLoadError>,
}

/// Shows one image, or its placeholder color while loading.
#[derive(Debug, Default)]
pub struct ImageView {
    base: ViewBase,
    sizing: ImageSizing,
    content_mode: ContentMode,
    placeholder: Color,
    state: Rc<RefCell<ImageState>>,
}

impl ImageView {
    pub fn url(&self) -> Option<String> {
        self.state.borrow().url.clone()
    }

    pub fn image(&self) -> Option<Image> {
        self.state.borrow().image.clone()
    }

    pub fn error(&self) -> Option<ImageLoadError> {
        self.state.borrow().error.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.borrow().image.is_some()
    }

    pub fn content_mode(&self) -> ContentMode {
        self.content_mode
    }

    pub fn placeholder(&self) -> Color {
        self.placeholder
    }

    /// Drawn image rect in the view's own coordinates. `None` while the
    /// placeholder is showing.
    pub fn image_rect(&self) -> Option<Rect> {
        let state = self.state.borrow();
        let image = state.image.as_ref()?;
        let bounds = Rect::from_size(self.base.frame.size());
        Some(self.content_mode.image_rect(image.pixel_size, bounds))
    }

    /// Show `url`. A changed URL clears the current image and starts a load.
    pub fn set_url(&mut self, url: Option<String>, loader: Option<&SharedImageLoader>) {
        {
            let mut state = self.state.borrow_mut();
            if state.url == url {
                return;
            }
            state.url.clone_from(&url);
            state.image = None;
            state.error = None;
        }

        let (Some(url), Some(loader)) = (url, loader) else {
            return;
        };
        debug!(%url, "loading image");
        let state = Rc::downgrade(&self.state);
        let requested = url.clone();
        loader.load_image(&url, Box::new(move |result| complete_load(&state, &requested, result)));
    }
}

fn complete_load(state: &Weak<RefCell<ImageState>>, requested: &str, result: Result<Image, ImageLoadError>) {
    let Some(state) = state.upgrade() else {
        trace!(url = requested, "image view gone before load finished");
        return;
    };
    let mut state = state.borrow_mut();
    if state.url.as_deref() != Some(requested) {
        trace!(url = requested, "ignoring stale image");
        return;
    }
    match result {
        Ok(image) => {
            debug!(url = requested, width = image.pixel_size.width, height = image.pixel_size.height, "image loaded");
            state.image = Some(image);
        }
        Err(err) => {
            debug!(url = requested, %err, "image failed to load");
            state.error = Some(err);
        }
    }
}

impl View for ImageView {
    fn frame(&self) -> Rect {
        self.base.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.base.frame = frame;
    }

    fn is_hidden(&self) -> bool {
        self.base.hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.base.hidden = hidden;
    }

    fn background_color(&self) -> Option<Color> {
        self.base.background
    }

    fn set_background_color(&mut self, color: Option<Color>) {
        self.base.background = color;
    }

    fn size_that_fits(&mut self, size: Size) -> Size {
        let image = self.state.borrow().image.as_ref().map(|image| image.pixel_size);
        self.sizing.fit(size, image)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
