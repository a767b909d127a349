//! Constants for the fetch module (timeouts, well-known headers).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (2 minutes; pages and sheets are small).
pub const READ_TIMEOUT_SECS: u64 = 120;

/// Header the delivery tier uses to recognise sheet requests from blocks.
pub(crate) const CLIENT_TYPE_HEADER: &str = "X-Client-Type";

/// Value sent in [`CLIENT_TYPE_HEADER`].
pub(crate) const CLIENT_TYPE_FRANKLIN: &str = "franklin";
