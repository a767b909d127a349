//! User-Agent string shared by every request the tool sends.

/// Project identifier carried in the User-Agent.
const PROJECT_UA_NAME: &str = "recognitions";

/// Default User-Agent (identifies the tool and its version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{PROJECT_UA_NAME}/{version} (screens-offline-generator)")
}
