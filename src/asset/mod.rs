//! Asset path canonicalisation and date-window checks.
//!
//! Both halves are pure: no I/O, no clocks read implicitly. The active
//! window takes `now` as an argument so the playback engine and the
//! statistics report can share one definition of "active".
//!
//! - [`extract_media_from_path`] - strip host/query/hash around a `/media_` path
//! - [`profile_image_paths`] - LDAP ids to image-host paths
//! - [`validate_date_format`] - `D/M/YYYY` validation
//! - [`DateWindow`] - the single `start <= now <= end` check

mod date;
mod error;
mod path;

pub use date::{DateWindow, END_DATE_DEFAULT_YEARS, parse_date, validate_date_format};
pub use error::DateError;
pub use path::{
    MEDIA_MARKER, PROFILE_IMAGE_PREFIX, extract_media_from_path, profile_image_path,
    profile_image_paths, split_list,
};
