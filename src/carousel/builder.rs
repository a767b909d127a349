//! Turning sheet rows into carousel items.

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::error::ItemError;
use super::item::AssetDescriptor;
use crate::asset::{extract_media_from_path, profile_image_paths, split_list, validate_date_format};
use crate::fetch::HttpClient;
use crate::markup::SheetRowDescriptor;
use crate::sheet::{SheetDocument, SheetEntry, SheetError, columns};

/// Heading shown when a row does not set one.
pub const DEFAULT_HEADING: &str = "Congratulations";

/// Heading value (any case) that suppresses the heading.
pub const NO_HEADING_SENTINEL: &str = "no heading";

/// Host serving LDAP-derived profile photos.
pub const DEFAULT_PROFILE_IMAGE_HOST: &str = "https://s7d2.scene7.com";

/// Knobs for item derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Prefix joined in front of `/is/image/IMGDIR/<ldap>`.
    pub profile_image_host: String,
    /// Heading used when a row has none.
    pub default_heading: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            profile_image_host: DEFAULT_PROFILE_IMAGE_HOST.to_string(),
            default_heading: DEFAULT_HEADING.to_string(),
        }
    }
}

/// Derives one carousel item from a sheet entry.
///
/// # Errors
///
/// Returns [`ItemError`] when the entry has no image source, no description,
/// or a date cell that is not `D/M/YYYY`.
pub fn build_item(
    entry: &SheetEntry,
    row: &SheetRowDescriptor,
    options: &BuildOptions,
) -> Result<AssetDescriptor, ItemError> {
    let images = match entry.field(columns::IMAGE_URL) {
        Some(image) => vec![extract_media_from_path(&image)],
        None => {
            let ldap = entry.field(columns::LDAP).ok_or(ItemError::MissingImage)?;
            let host = options.profile_image_host.trim_end_matches('/');
            profile_image_paths(&ldap)
                .into_iter()
                .map(|path| format!("{host}{path}"))
                .collect()
        }
    };
    if images.is_empty() {
        return Err(ItemError::MissingImage);
    }

    let start_date = entry.field(columns::START_DATE);
    let end_date = entry.field(columns::END_DATE);
    validate_date_format(start_date.as_deref().unwrap_or_default())?;
    validate_date_format(end_date.as_deref().unwrap_or_default())?;

    let description = entry.required(columns::DESCRIPTION)?;

    let heading = match entry.field(columns::HEADING) {
        None => Some(options.default_heading.clone()),
        Some(heading) if heading.eq_ignore_ascii_case(NO_HEADING_SENTINEL) => None,
        Some(heading) => Some(heading),
    };

    Ok(AssetDescriptor {
        images,
        start_date,
        end_date,
        description,
        names: split_list(&entry.field(columns::NAME).unwrap_or_default()),
        heading,
        title: entry
            .field(columns::TITLE)
            .or_else(|| row.team_name.clone()),
        background: row.background.clone(),
        team_name: row.team_name.clone(),
    })
}

/// Builds items for every entry of one sheet, skipping entries that fail.
///
/// A failing entry is logged and never affects its siblings.
#[must_use]
pub fn build_items(
    entries: &[SheetEntry],
    row: &SheetRowDescriptor,
    options: &BuildOptions,
) -> Vec<AssetDescriptor> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match build_item(entry, row, options) {
            Ok(item) => Some(item),
            Err(error) => {
                warn!(sheet = %row.link, entry = index, error = %error, "Error while processing asset");
                None
            }
        })
        .collect()
}

/// Where sheet entries come from.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetches a sheet and returns its data rows.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError`] when the sheet cannot be fetched, is not JSON,
    /// or is not of type `sheet`.
    async fn fetch_sheet(&self, url: &Url) -> Result<Vec<SheetEntry>, SheetError>;
}

#[async_trait]
impl SheetSource for HttpClient {
    async fn fetch_sheet(&self, url: &Url) -> Result<Vec<SheetEntry>, SheetError> {
        let body = self.get_sheet_text(url).await?;
        SheetDocument::parse(url.as_str(), &body)?.into_rows()
    }
}

/// Result of a carousel build pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// At least one item was built.
    Items(Vec<AssetDescriptor>),
    /// Nothing is configured, or every sheet loaded but no entry was valid.
    Empty,
    /// No item was built and at least one sheet failed to load. Existing
    /// content must be kept.
    Failed {
        /// Number of sheets that could not be loaded.
        failed_sheets: usize,
    },
}

impl BuildOutcome {
    /// Number of items built.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Items(items) => items.len(),
            Self::Empty | Self::Failed { .. } => 0,
        }
    }

    /// Returns true when no item was built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The built items, empty for `Empty` and `Failed`.
    #[must_use]
    pub fn into_items(self) -> Vec<AssetDescriptor> {
        match self {
            Self::Items(items) => items,
            Self::Empty | Self::Failed { .. } => Vec::new(),
        }
    }
}

/// Loads each row's sheet, in row order, and builds its items.
pub struct CarouselBuilder<'a> {
    source: &'a dyn SheetSource,
    options: BuildOptions,
}

impl<'a> CarouselBuilder<'a> {
    /// Creates a builder reading sheets from `source`.
    #[must_use]
    pub fn new(source: &'a dyn SheetSource, options: BuildOptions) -> Self {
        Self { source, options }
    }

    /// Fetches every row's sheet sequentially and merges the items.
    ///
    /// Sheet failures are counted and logged; they never stop the pass.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn build(&self, rows: &[SheetRowDescriptor]) -> BuildOutcome {
        if rows.is_empty() {
            warn!("No sheet data available during carousel build");
            return BuildOutcome::Empty;
        }

        let mut items = Vec::new();
        let mut failed_sheets = 0;
        for row in rows {
            match self.source.fetch_sheet(&row.link).await {
                Ok(entries) => {
                    let built = build_items(&entries, row, &self.options);
                    debug!(sheet = %row.link, entries = entries.len(), items = built.len(), "sheet processed");
                    items.extend(built);
                }
                Err(error) => {
                    failed_sheets += 1;
                    warn!(sheet = %row.link, error = %error, "Error while processing sheet");
                }
            }
        }

        if !items.is_empty() {
            info!(items = items.len(), failed_sheets, "carousel items built");
            BuildOutcome::Items(items)
        } else if failed_sheets > 0 {
            warn!(failed_sheets, "No carousel items built and sheets failed; keeping existing content");
            BuildOutcome::Failed { failed_sheets }
        } else {
            info!("No carousel items configured");
            BuildOutcome::Empty
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row() -> SheetRowDescriptor {
        SheetRowDescriptor {
            link: Url::parse("https://host/content/org-a/recognitions.json").unwrap(),
            background: "<picture></picture>".to_string(),
            team_name: Some("Team Alpha".to_string()),
        }
    }

    #[test]
    fn test_ldap_derives_lowercased_profile_images_in_order() {
        let entry = SheetEntry::from_pairs([("LDAP", "AB12, cd34 "), ("Description", "Thanks")]);
        let item = build_item(&entry, &row(), &BuildOptions::default()).unwrap();
        assert_eq!(
            item.images,
            vec![
                "https://s7d2.scene7.com/is/image/IMGDIR/ab12",
                "https://s7d2.scene7.com/is/image/IMGDIR/cd34",
            ]
        );
    }

    #[test]
    fn test_explicit_image_wins_over_ldap() {
        let entry = SheetEntry::from_pairs([
            ("Image URL", "https://host/content/media_abc.png?width=750"),
            ("LDAP", "ab12"),
            ("Description", "Thanks"),
        ]);
        let item = build_item(&entry, &row(), &BuildOptions::default()).unwrap();
        assert_eq!(item.images, vec!["/media_abc.png"]);
    }

    #[test]
    fn test_heading_default_and_sentinel() {
        let options = BuildOptions::default();
        let base = [("LDAP", "ab12"), ("Description", "Thanks")];

        let item = build_item(&SheetEntry::from_pairs(base), &row(), &options).unwrap();
        assert_eq!(item.heading.as_deref(), Some("Congratulations"));

        let custom = SheetEntry::from_pairs(base.into_iter().chain([("Heading", "Welcome")]));
        assert_eq!(
            build_item(&custom, &row(), &options).unwrap().heading.as_deref(),
            Some("Welcome")
        );

        let suppressed = SheetEntry::from_pairs(base.into_iter().chain([("Heading", "No Heading")]));
        assert_eq!(build_item(&suppressed, &row(), &options).unwrap().heading, None);
    }

    #[test]
    fn test_title_falls_back_to_team_name() {
        let options = BuildOptions::default();
        let entry = SheetEntry::from_pairs([("LDAP", "ab12"), ("Description", "d")]);
        assert_eq!(
            build_item(&entry, &row(), &options).unwrap().title.as_deref(),
            Some("Team Alpha")
        );

        let titled = SheetEntry::from_pairs([("LDAP", "ab12"), ("Description", "d"), ("Title", "Launch")]);
        assert_eq!(
            build_item(&titled, &row(), &options).unwrap().title.as_deref(),
            Some("Launch")
        );

        let mut anonymous = row();
        anonymous.team_name = None;
        assert_eq!(build_item(&entry, &anonymous, &options).unwrap().title, None);
    }

    #[test]
    fn test_names_are_split_and_trimmed() {
        let entry = SheetEntry::from_pairs([
            ("LDAP", "ab12,cd34"),
            ("Description", "d"),
            ("Name", " Jane Doe ,John Roe"),
        ]);
        let item = build_item(&entry, &row(), &BuildOptions::default()).unwrap();
        assert_eq!(item.names, vec!["Jane Doe", "John Roe"]);
    }

    #[test]
    fn test_invalid_rows_are_skipped_not_fatal() {
        let entries = vec![
            SheetEntry::from_pairs([("Description", "no image")]),
            SheetEntry::from_pairs([("LDAP", "ab12"), ("Description", "d"), ("Start Date", "2024/1/1")]),
            SheetEntry::from_pairs([("LDAP", "ab12")]),
            SheetEntry::from_pairs([("LDAP", "ok99"), ("Description", "kept"), ("End Date", "1/1/2099")]),
        ];
        let items = build_items(&entries, &row(), &BuildOptions::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "kept");
        assert_eq!(items[0].end_date.as_deref(), Some("1/1/2099"));
    }

    #[test]
    fn test_missing_image_error_message() {
        let entry = SheetEntry::from_pairs([("Description", "d")]);
        let error = build_item(&entry, &row(), &BuildOptions::default()).unwrap_err();
        assert!(matches!(error, ItemError::MissingImage));
    }
}
