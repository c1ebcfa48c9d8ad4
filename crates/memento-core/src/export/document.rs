//! Markdown document generated for each exported entry.

use std::fmt::Write;

use crate::entry::DiaryEntry;

use super::image::short_reference;
use super::sanitize::UNTITLED;
use super::unit::ImageOutcome;

/// Render the document for one entry.
///
/// Layout: title heading, date, mood, content (when present), then an image
/// section linking resolved images by relative path and noting skipped ones.
pub fn render_document(entry: &DiaryEntry, images: &[ImageOutcome]) -> String {
    let mut doc = String::new();
    let title = entry.title_text().unwrap_or(UNTITLED);

    // Writing into a String cannot fail.
    let _ = writeln!(doc, "# {}", title);
    let _ = writeln!(doc);
    let _ = writeln!(doc, "- **Date:** {}", entry.date.format("%Y-%m-%d"));
    let _ = writeln!(doc, "- **Mood:** {}", entry.mood);

    if let Some(content) = entry.content_text() {
        let _ = writeln!(doc);
        let _ = writeln!(doc, "{}", content.trim_end());
    }

    if !images.is_empty() {
        let _ = writeln!(doc);
        let _ = writeln!(doc, "## Images");
        let _ = writeln!(doc);
        for (index, outcome) in images.iter().enumerate() {
            let number = index + 1;
            match outcome {
                ImageOutcome::Resolved(image) => {
                    let _ = writeln!(doc, "![Image {}](<{}>)", number, image.archive_path());
                }
                ImageOutcome::Skipped { reference, reason } => {
                    let _ = writeln!(
                        doc,
                        "- Image {} skipped (`{}`): {}",
                        number,
                        short_reference(reference),
                        reason
                    );
                }
            }
            let _ = writeln!(doc);
        }
    }

    doc
}
