//! Media path normalisation and profile image path derivation.

/// Marker that identifies a delivery-tier media asset inside a path or URL.
pub const MEDIA_MARKER: &str = "/media_";

/// Path prefix of profile photos on the image host.
pub const PROFILE_IMAGE_PREFIX: &str = "/is/image/IMGDIR/";

/// Reduces a path or URL to its `/media_…` part.
///
/// The result starts at the media marker and stops at the first `#` or `?`
/// after it (whichever comes first), or runs to the end of the string.
/// Input without the marker is returned trimmed but otherwise unchanged.
///
/// # Examples
///
/// ```
/// use recognitions_core::asset::extract_media_from_path;
///
/// assert_eq!(
///     extract_media_from_path("https://host/x/media_1a2b.png?width=750#frag"),
///     "/media_1a2b.png"
/// );
/// assert_eq!(extract_media_from_path(" /icons/not-found.png "), "/icons/not-found.png");
/// ```
#[must_use]
pub fn extract_media_from_path(path: &str) -> String {
    let trimmed = path.trim();
    let Some(start) = trimmed.find(MEDIA_MARKER) else {
        return trimmed.to_string();
    };

    let tail = &trimmed[start..];
    let end = tail.find(['#', '?']).unwrap_or(tail.len());
    tail[..end].to_string()
}

/// Derives the image-host path for a single LDAP identifier.
///
/// ```
/// use recognitions_core::asset::profile_image_path;
///
/// assert_eq!(profile_image_path(" AB12 "), "/is/image/IMGDIR/ab12");
/// ```
#[must_use]
pub fn profile_image_path(ldap: &str) -> String {
    format!("{PROFILE_IMAGE_PREFIX}{}", ldap.trim().to_lowercase())
}

/// Derives one image-host path per comma separated LDAP identifier.
///
/// Blank identifiers are dropped; input order is preserved.
#[must_use]
pub fn profile_image_paths(ldap_field: &str) -> Vec<String> {
    split_list(ldap_field)
        .iter()
        .map(|ldap| profile_image_path(ldap))
        .collect()
}

/// Splits a comma separated sheet cell into trimmed, non-empty values.
#[must_use]
pub fn split_list(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_media_stops_at_query() {
        assert_eq!(
            extract_media_from_path("./media_abc.jpeg?width=2000&format=webply"),
            "/media_abc.jpeg"
        );
    }

    #[test]
    fn test_extract_media_stops_at_earlier_hash() {
        assert_eq!(
            extract_media_from_path("/content/media_abc.png#x?y"),
            "/media_abc.png"
        );
    }

    #[test]
    fn test_extract_media_without_delimiters_keeps_tail() {
        assert_eq!(
            extract_media_from_path("https://host/a/b/media_abc.mp4"),
            "/media_abc.mp4"
        );
    }

    #[test]
    fn test_extract_media_without_marker_returns_trimmed_input() {
        assert_eq!(
            extract_media_from_path("  https://s7d2.scene7.com/is/image/IMGDIR/ab12 "),
            "https://s7d2.scene7.com/is/image/IMGDIR/ab12"
        );
        assert_eq!(extract_media_from_path(""), "");
    }

    #[test]
    fn test_extract_media_is_idempotent() {
        let inputs = [
            "https://host/media_1.png?w=1",
            "/media_2.png#top",
            "prefix/media_3?x#y",
            "/media_4",
            "media_5 without marker slash",
        ];
        for input in inputs {
            let once = extract_media_from_path(input);
            assert_eq!(extract_media_from_path(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_extract_media_handles_non_ascii_input() {
        assert_eq!(
            extract_media_from_path("https://hôst/é/media_ü.png?q"),
            "/media_ü.png"
        );
    }

    #[test]
    fn test_profile_image_paths_lowercase_trim_and_order() {
        assert_eq!(
            profile_image_paths("ab12, cd34"),
            vec!["/is/image/IMGDIR/ab12", "/is/image/IMGDIR/cd34"]
        );
        assert_eq!(
            profile_image_paths("ZZ9 ,, Aa1"),
            vec!["/is/image/IMGDIR/zz9", "/is/image/IMGDIR/aa1"]
        );
        assert!(profile_image_paths(" , ").is_empty());
    }

    #[test]
    fn test_split_list_trims_values() {
        assert_eq!(split_list("Jane Doe,  John Roe "), vec!["Jane Doe", "John Roe"]);
    }
}
