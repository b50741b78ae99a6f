use crate::config::Markers;
use crate::errors::{AppError, Result};
use regex::{NoExpand, Regex};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Builds the block that sits between the markers, markers included.
pub fn card_block(markers: &Markers, card_path: &Path) -> String {
    let src = card_path.to_string_lossy().replace('\\', "/");
    format!(
        "{start}\n<p align=\"center\">\n  <img src=\"{src}\" alt=\"Contribution streak\" />\n</p>\n{end}",
        start = markers.start,
        end = markers.end,
    )
}

/// Replaces the first marker-delimited region of `document` with `block`.
///
/// Returns `None` when either marker is missing or the end marker only appears
/// before the start marker.
pub fn splice_block(document: &str, markers: &Markers, block: &str) -> Option<String> {
    let pattern = format!(
        "(?s){}.*?{}",
        regex::escape(&markers.start),
        regex::escape(&markers.end)
    );
    let region = Regex::new(&pattern).ok()?;
    if !region.is_match(document) {
        return None;
    }
    Some(region.replace(document, NoExpand(block)).into_owned())
}

pub async fn load_document(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path).await?)
}

/// Computes the patched document without touching disk.
pub fn patch_document(
    path: &Path,
    document: &str,
    markers: &Markers,
    card_path: &Path,
) -> Result<String> {
    let block = card_block(markers, card_path);
    splice_block(document, markers, &block).ok_or_else(|| AppError::missing_markers(path))
}

pub async fn persist_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, contents).await?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn markers() -> Markers {
        Markers::default()
    }

    #[test]
    fn block_keeps_both_markers() {
        let block = card_block(&markers(), Path::new("assets/streak.svg"));
        assert!(block.starts_with(&markers().start));
        assert!(block.ends_with(&markers().end));
        assert!(block.contains("src=\"assets/streak.svg\""));
    }

    #[test]
    fn splice_replaces_region_and_keeps_surroundings() {
        let doc = format!(
            "# Hello\n\n{}\nold stuff\nmore\n{}\n\nfooter\n",
            markers().start,
            markers().end
        );
        let patched = splice_block(&doc, &markers(), "NEW").unwrap();
        assert_eq!(patched, "# Hello\n\nNEW\n\nfooter\n");
    }

    #[test]
    fn missing_or_reversed_markers_are_rejected() {
        let only_start = format!("intro\n{}\n", markers().start);
        assert!(splice_block(&only_start, &markers(), "x").is_none());

        let only_end = format!("intro\n{}\n", markers().end);
        assert!(splice_block(&only_end, &markers(), "x").is_none());

        let reversed = format!("{}\n{}\n", markers().end, markers().start);
        assert!(splice_block(&reversed, &markers(), "x").is_none());

        let err = patch_document(
            Path::new("README.md"),
            "no markers here",
            &markers(),
            Path::new("streak.svg"),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::MissingMarkers { ref path } if path == "README.md"));
    }

    #[test]
    fn replacement_is_inserted_literally() {
        let doc = format!("{}{}", markers().start, markers().end);
        let patched = splice_block(&doc, &markers(), "cost: $1 ${name}").unwrap();
        assert_eq!(patched, "cost: $1 ${name}");
    }

    #[test]
    fn patching_twice_leaves_one_marker_pair() {
        let doc = format!("top\n{}\n{}\nbottom\n", markers().start, markers().end);
        let first = patch_document(
            Path::new("README.md"),
            &doc,
            &markers(),
            Path::new("first.svg"),
        )
        .unwrap();
        let second = patch_document(
            Path::new("README.md"),
            &first,
            &markers(),
            Path::new("second.svg"),
        )
        .unwrap();

        assert_eq!(second.matches(&markers().start).count(), 1);
        assert_eq!(second.matches(&markers().end).count(), 1);
        assert!(second.contains("second.svg"));
        assert!(!second.contains("first.svg"));
        assert!(second.starts_with("top\n"));
        assert!(second.ends_with("\nbottom\n"));
    }

    #[tokio::test]
    async fn persist_text_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("nested/out/streak.svg");
        persist_text(&path, "<svg/>").await.unwrap();
        assert_eq!(load_document(&path).await.unwrap(), "<svg/>");
    }
}
