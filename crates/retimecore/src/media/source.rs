//! Where the selected chunks come from.
//!
//! Built-in sources:
//! - `ManifestSource`: JSON manifest listing `{id, filename, duration}` entries
//! - `LibraryPageSource`: saved copy of the GoPro media library page with chunks selected

use select::document::Document;
use select::node::Node;
use select::predicate::{Attr, Class, Predicate};
use serde::Deserialize;
use std::path::Path;

use crate::core::error::{AppResult, ParseError};
use crate::media::chunk::MediaEntry;

/// Supplies the media items selected for re-timestamping.
pub trait MediaSource {
    /// Short name for logging (e.g. "manifest")
    fn name(&self) -> &str;

    /// The selected items, in whatever order the source lists them.
    fn selected_media(&self) -> AppResult<Vec<MediaEntry>>;

    /// Start time text of the first chunk, when the source carries one.
    fn start_time_hint(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManifestFile {
    Full {
        #[serde(default)]
        start: Option<String>,
        media: Vec<MediaEntry>,
    },
    Bare(Vec<MediaEntry>),
}

/// JSON manifest, either
/// `{"start": "2024-01-01T00:00:00Z", "media": [...]}` or a bare `[...]` of entries.
#[derive(Debug, Clone)]
pub struct ManifestSource {
    start: Option<String>,
    media: Vec<MediaEntry>,
}

impl ManifestSource {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let parsed: ManifestFile = serde_json::from_str(json)?;
        Ok(match parsed {
            ManifestFile::Full { start, media } => Self { start, media },
            ManifestFile::Bare(media) => Self { start: None, media },
        })
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_entries(media: Vec<MediaEntry>) -> Self {
        Self { start: None, media }
    }
}

impl MediaSource for ManifestSource {
    fn name(&self) -> &str {
        "manifest"
    }

    fn selected_media(&self) -> AppResult<Vec<MediaEntry>> {
        Ok(self.media.clone())
    }

    fn start_time_hint(&self) -> Option<&str> {
        self.start.as_deref()
    }
}

/// Selected grid items of a saved media library page.
#[derive(Debug, Clone)]
pub struct LibraryPageSource {
    html: String,
}

impl LibraryPageSource {
    pub fn from_html(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        Ok(Self::from_html(std::fs::read_to_string(path)?))
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Reads one selected grid item. `position` names the item in errors when it has no id.
    fn entry_from_grid_item(item: &Node<'_>, position: usize) -> Result<MediaEntry, ParseError> {
        let id = item
            .find(Class("grid-item-wrapper").and(Attr("id", ())))
            .next()
            .and_then(|n| n.attr("id"))
            .ok_or_else(|| ParseError::MissingField {
                item: format!("#{}", position + 1),
                field: "id",
            })?;
        let missing = |field: &'static str| ParseError::MissingField {
            item: id.to_string(),
            field,
        };

        let filename = item
            .find(Class("filename-overlay"))
            .next()
            .map(|n| n.text())
            .ok_or_else(|| missing("filename"))?;
        let duration = item
            .find(Class("media-details").descendant(Class("duration")))
            .next()
            .map(|n| n.text())
            .ok_or_else(|| missing("duration"))?;

        Ok(MediaEntry::new(id, filename.trim(), duration.trim()))
    }
}

impl MediaSource for LibraryPageSource {
    fn name(&self) -> &str {
        "library-page"
    }

    fn selected_media(&self) -> AppResult<Vec<MediaEntry>> {
        let document = Document::from(self.html.as_str());
        let entries = document
            .find(Class("grid-item"))
            .filter(|item| {
                item.find(Class("show-overlay").and(Class("selected")))
                    .next()
                    .is_some()
            })
            .enumerate()
            .map(|(position, item)| Self::entry_from_grid_item(&item, position))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
        <html><body>
          <div class="grid-item">
            <div class="grid-item-wrapper" id="media-b">
              <div class="show-overlay selected"></div>
              <span class="filename-overlay">GX020005.MP4</span>
              <div class="media-details"><span class="duration">00:45</span></div>
            </div>
          </div>
          <div class="grid-item">
            <div class="grid-item-wrapper" id="media-x">
              <div class="show-overlay"></div>
              <span class="filename-overlay">GX010006.MP4</span>
              <div class="media-details"><span class="duration">03:00</span></div>
            </div>
          </div>
          <div class="grid-item">
            <div class="grid-item-wrapper" id="media-a">
              <div class="show-overlay selected"></div>
              <span class="filename-overlay"> GX010005.MP4 </span>
              <div class="media-details"><span class="duration">01:30</span></div>
            </div>
          </div>
        </body></html>"#;

    #[test]
    fn test_library_page_picks_selected_items() {
        let source = LibraryPageSource::from_html(PAGE);
        let media = source.selected_media().unwrap();

        assert_eq!(
            media,
            vec![
                MediaEntry::new("media-b", "GX020005.MP4", "00:45"),
                MediaEntry::new("media-a", "GX010005.MP4", "01:30"),
            ]
        );
        assert_eq!(source.start_time_hint(), None);
    }

    #[test]
    fn test_library_page_without_selection() {
        let source = LibraryPageSource::from_html("<html><body><div class=\"grid-item\"></div></body></html>");
        assert!(source.selected_media().unwrap().is_empty());
    }

    fn grid_item(id: &str, filename: &str, duration: Option<&str>) -> String {
        let details = duration
            .map(|d| format!(r#"<div class="media-details"><span class="duration">{}</span></div>"#, d))
            .unwrap_or_else(|| r#"<div class="media-details"></div>"#.to_string());
        format!(
            r#"<div class="grid-item"><div class="grid-item-wrapper" id="{}">
                 <div class="show-overlay selected"></div>
                 <span class="filename-overlay">{}</span>{}
               </div></div>"#,
            id, filename, details
        )
    }

    #[test]
    fn test_selected_item_without_duration_fails() {
        let html = format!(
            "<html><body>{}{}{}</body></html>",
            grid_item("m1", "GX010005.MP4", Some("01:30")),
            grid_item("m2", "GX020005.MP4", None),
            grid_item("m3", "GX030005.MP4", Some("00:45")),
        );

        let result = LibraryPageSource::from_html(html).selected_media();
        assert!(matches!(
            result,
            Err(AppError::Parse(ParseError::MissingField { ref item, field: "duration" })) if item == "m2"
        ));
    }

    #[test]
    fn test_selected_item_without_id_fails() {
        let html = r#"<html><body>
            <div class="grid-item">
              <div class="show-overlay selected"></div>
              <span class="filename-overlay">GX010005.MP4</span>
              <div class="media-details"><span class="duration">01:30</span></div>
            </div></body></html>"#;

        let result = LibraryPageSource::from_html(html).selected_media();
        assert!(matches!(
            result,
            Err(AppError::Parse(ParseError::MissingField { ref item, field: "id" })) if item == "#1"
        ));
    }

    #[test]
    fn test_unselected_incomplete_item_is_ignored() {
        let html = format!(
            r#"<html><body>{}<div class="grid-item"><div class="show-overlay"></div></div></body></html>"#,
            grid_item("m1", "GX010005.MP4", Some("01:30")),
        );

        let media = LibraryPageSource::from_html(html).selected_media().unwrap();
        assert_eq!(media, vec![MediaEntry::new("m1", "GX010005.MP4", "01:30")]);
    }

    #[test]
    fn test_manifest_with_start() {
        let source = ManifestSource::from_json(
            r#"{
                "start": "2024-01-01T00:00:00Z",
                "media": [{"id": "1", "filename": "GX010005.MP4", "duration": "01:30"}]
            }"#,
        )
        .unwrap();

        assert_eq!(source.start_time_hint(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(source.selected_media().unwrap().len(), 1);
    }

    #[test]
    fn test_bare_manifest() {
        let source =
            ManifestSource::from_json(r#"[{"id": "1", "filename": "GX010005.MP4", "duration": "01:30"}]"#).unwrap();
        assert_eq!(source.start_time_hint(), None);
        assert_eq!(source.name(), "manifest");
    }

    #[test]
    fn test_manifest_rejects_garbage() {
        assert!(ManifestSource::from_json("{\"media\": 3}").is_err());
    }
}
