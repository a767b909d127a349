//! The carousel item record.

use crate::asset::DateWindow;

/// One recognitions item: a sheet row merged with its block row's background.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetDescriptor {
    /// Image sources, in display order.
    pub images: Vec<String>,
    /// Raw `D/M/YYYY` start date (validated).
    pub start_date: Option<String>,
    /// Raw `D/M/YYYY` end date (validated).
    pub end_date: Option<String>,
    /// Body text.
    pub description: String,
    /// Caption per image; may be shorter or longer than `images`.
    pub names: Vec<String>,
    /// Heading above the figures, `None` when suppressed.
    pub heading: Option<String>,
    /// Title, falling back to the row's team name.
    pub title: Option<String>,
    /// Outer HTML of the block row's background picture.
    pub background: String,
    /// Team name of the block row.
    pub team_name: Option<String>,
}

impl AssetDescriptor {
    /// The item's active window.
    #[must_use]
    pub fn window(&self) -> DateWindow {
        DateWindow::from_attributes(self.start_date.as_deref(), self.end_date.as_deref())
    }

    /// Pairs each image with the caption at the same position, if any.
    ///
    /// Extra names without an image are dropped.
    pub fn figures(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.images
            .iter()
            .enumerate()
            .map(|(index, image)| (image.as_str(), self.names.get(index).map(String::as_str)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figures_degrade_to_missing_captions() {
        let asset = AssetDescriptor {
            images: vec!["/a.png".to_string(), "/b.png".to_string()],
            names: vec!["Jane".to_string()],
            ..AssetDescriptor::default()
        };
        let figures: Vec<_> = asset.figures().collect();
        assert_eq!(figures, vec![("/a.png", Some("Jane")), ("/b.png", None)]);
    }

    #[test]
    fn test_figures_ignore_extra_names() {
        let asset = AssetDescriptor {
            images: vec!["/a.png".to_string()],
            names: vec!["Jane".to_string(), "John".to_string()],
            ..AssetDescriptor::default()
        };
        assert_eq!(asset.figures().count(), 1);
    }
}
