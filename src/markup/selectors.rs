//! Compiled CSS selectors shared by the markup readers.

use std::sync::LazyLock;

use scraper::Selector;

#[allow(clippy::expect_used)]
fn compile(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector is valid") // Static pattern, safe to panic
}

pub(super) static RECOGNITIONS_ROWS: LazyLock<Selector> =
    LazyLock::new(|| compile(".recognitions > div"));
pub(super) static DASHBOARDS_ROWS: LazyLock<Selector> =
    LazyLock::new(|| compile(".dashboards > div"));
pub(super) static DIV: LazyLock<Selector> = LazyLock::new(|| compile("div"));
pub(super) static ANCHOR: LazyLock<Selector> = LazyLock::new(|| compile("a[href]"));
pub(super) static DIV_ANCHOR: LazyLock<Selector> = LazyLock::new(|| compile("div > a[href]"));
pub(super) static PICTURE: LazyLock<Selector> = LazyLock::new(|| compile("picture"));
pub(super) static IMG: LazyLock<Selector> = LazyLock::new(|| compile("img[src]"));
pub(super) static SOURCE: LazyLock<Selector> = LazyLock::new(|| compile("source[srcset]"));
pub(super) static FRAGMENT_LINKS: LazyLock<Selector> =
    LazyLock::new(|| compile("main .fragment a[href]"));
pub(super) static TEMPLATE_META: LazyLock<Selector> =
    LazyLock::new(|| compile(r#"meta[name="template"]"#));
pub(super) static DASHBOARDS_CAROUSEL: LazyLock<Selector> =
    LazyLock::new(|| compile("div.carousel.dashboards"));
pub(super) static CAROUSEL_BLOCKS: LazyLock<Selector> =
    LazyLock::new(|| compile(".carousel.recognitions, .carousel.dashboards"));
pub(super) static RECOGNITIONS_CAROUSEL: LazyLock<Selector> =
    LazyLock::new(|| compile(".carousel.recognitions"));
pub(super) static IFRAME: LazyLock<Selector> = LazyLock::new(|| compile("iframe[src]"));
