//! Fixed asset paths and crawl limits.

/// Scripts and styles of the carousel block.
pub const CAROUSEL_ASSETS: [&str; 3] = [
    "/blocks/carousel/carousel.js",
    "/blocks/carousel/utils.js",
    "/blocks/carousel/carousel.css",
];

/// Scripts and styles of the fragment block.
pub const FRAGMENT_ASSETS: [&str; 2] = ["/blocks/fragment/fragment.js", "/blocks/fragment/fragment.css"];

/// Fonts used by recognitions items.
pub const FONT_ASSETS: [&str; 3] = [
    "/fonts/AdobeClean/AdobeClean-Regular.otf",
    "/fonts/AdobeClean/AdobeClean-Bold.otf",
    "/fonts/AdobeClean/AdobeClean-ExtraBold.otf",
];

/// Shown in place of a missing profile photo.
pub const NOT_FOUND_ICON: &str = "/icons/not-found.png";

/// Host probed for LDAP-derived profile photos.
pub const DEFAULT_IMAGE_HOST: &str = "https://s7d2.scene7.com";

/// `Referer` the image host expects on profile photo requests.
pub const PROFILE_IMAGE_REFERER: &str = "https://inside.corp.adobe.com/";

/// Default limit on fragment nesting.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Suffix of the full page snapshot.
pub const HTML_SUFFIX: &str = ".html";

/// Suffix of the plain (undecorated) page snapshot.
pub const PLAIN_HTML_SUFFIX: &str = ".plain.html";
