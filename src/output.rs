//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every record is shown by what a visitor sees (an image's alt text, a
//! package's name and price) with its identifier and other stored fields as
//! indented context lines. Identifiers are what the `edit` and `remove`
//! subcommands take, so they are always shown.
//!
//! # Output Format
//!
//! ## Gallery
//!
//! ```text
//! Gallery (6 images)
//! 001 Wedding photography [Wedding]
//!     Id: 1
//!     Source: https://images.unsplash.com/photo-1519741497674-611481863552?...
//! ```
//!
//! ## Pricing
//!
//! ```text
//! Pricing (3 packages)
//! 002 Premium $499 (Most Popular, amber)
//!     Id: 2
//!     Description: Ideal for weddings and special celebrations
//!     Includes: 6-hour photo session, 200 edited digital photos, ...
//!     Excludes: Express delivery
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → dist/index.html
//!     6 gallery images, 3 pricing packages
//! ```
//!
//! # Architecture
//!
//! Each listing has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use std::path::Path;

use crate::auth::SessionState;
use crate::context::{ContentEvent, ContentSnapshot};
use crate::enquiry::DialogState;
use crate::model::{GalleryImage, PricingPlan};

/// Longest source URL or description shown before truncation.
const MAX_DETAIL: usize = 72;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

// ============================================================================
// Content listings
// ============================================================================

pub fn format_gallery(images: &[GalleryImage]) -> Vec<String> {
    let mut lines = vec![format!("Gallery ({})", plural(images.len(), "image", "images"))];
    for (idx, image) in images.iter().enumerate() {
        lines.push(format!(
            "{} {} [{}]",
            format_index(idx + 1),
            image.alt,
            image.category
        ));
        lines.push(format!("{}Id: {}", indent(1), image.id));
        lines.push(format!("{}Source: {}", indent(1), truncate(&image.src, MAX_DETAIL)));
    }
    lines
}

pub fn print_gallery(images: &[GalleryImage]) {
    for line in format_gallery(images) {
        println!("{}", line);
    }
}

pub fn format_pricing(plans: &[PricingPlan]) -> Vec<String> {
    let mut lines = vec![format!("Pricing ({})", plural(plans.len(), "package", "packages"))];
    for (idx, plan) in plans.iter().enumerate() {
        let mut tags = Vec::new();
        if plan.popular {
            tags.push("Most Popular".to_string());
        }
        tags.push(plan.color.to_string());
        lines.push(format!(
            "{} {} ${} ({})",
            format_index(idx + 1),
            plan.name,
            plan.price,
            tags.join(", ")
        ));
        lines.push(format!("{}Id: {}", indent(1), plan.id));
        if !plan.description.is_empty() {
            lines.push(format!(
                "{}Description: {}",
                indent(1),
                truncate(&plan.description, MAX_DETAIL)
            ));
        }
        if !plan.features.is_empty() {
            lines.push(format!("{}Includes: {}", indent(1), plan.features.join(", ")));
        }
        if !plan.not_included.is_empty() {
            lines.push(format!("{}Excludes: {}", indent(1), plan.not_included.join(", ")));
        }
    }
    lines
}

pub fn print_pricing(plans: &[PricingPlan]) {
    for line in format_pricing(plans) {
        println!("{}", line);
    }
}

/// One line per change notification.
pub fn format_content_event(event: &ContentEvent) -> String {
    match event {
        ContentEvent::GalleryChanged { count } => {
            format!("Gallery saved ({})", plural(*count, "image", "images"))
        }
        ContentEvent::PricingChanged { count } => {
            format!("Pricing saved ({})", plural(*count, "package", "packages"))
        }
    }
}

// ============================================================================
// Session and build
// ============================================================================

pub fn format_status(
    session: SessionState,
    store_path: &Path,
    content: &ContentSnapshot,
) -> Vec<String> {
    let session = match session {
        SessionState::LoggedIn => "logged in",
        SessionState::LoggedOut => "logged out",
    };
    vec![
        format!("Session: {}", session),
        format!("Store: {}", store_path.display()),
        format!("Gallery: {}", plural(content.gallery.len(), "image", "images")),
        format!("Pricing: {}", plural(content.pricing.len(), "package", "packages")),
    ]
}

pub fn print_status(session: SessionState, store_path: &Path, content: &ContentSnapshot) {
    for line in format_status(session, store_path, content) {
        println!("{}", line);
    }
}

pub fn format_build_output(index: &Path, content: &ContentSnapshot) -> Vec<String> {
    vec![
        format!("Home \u{2192} {}", index.display()),
        format!(
            "{}{} gallery {}, {}",
            indent(1),
            content.gallery.len(),
            if content.gallery.len() == 1 { "image" } else { "images" },
            plural(content.pricing.len(), "pricing package", "pricing packages")
        ),
    ]
}

pub fn print_build_output(index: &Path, content: &ContentSnapshot) {
    for line in format_build_output(index, content) {
        println!("{}", line);
    }
}

// ============================================================================
// Enquiry
// ============================================================================

pub fn format_dialog_state(state: &DialogState) -> String {
    match state {
        DialogState::Editing => "Editing".to_string(),
        DialogState::Submitting => "Submitting...".to_string(),
        DialogState::Submitted => {
            "Thank You! Your enquiry has been submitted successfully. We'll contact you shortly."
                .to_string()
        }
        DialogState::Failed(message) => format!("Failed: {}", message),
        DialogState::Closed => "Closed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    fn snapshot() -> ContentSnapshot {
        ContentSnapshot {
            gallery: defaults::gallery(),
            pricing: defaults::pricing(),
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }

    #[test]
    fn gallery_listing() {
        let lines = format_gallery(&defaults::gallery());
        assert_eq!(lines[0], "Gallery (6 images)");
        assert_eq!(lines[1], "001 Wedding photography [Wedding]");
        assert_eq!(lines[2], "    Id: 1");
        assert!(lines[3].starts_with("    Source: https://images.unsplash.com/"));
        assert!(lines[3].ends_with("..."));
        assert_eq!(lines.len(), 1 + 6 * 3);
    }

    #[test]
    fn empty_gallery_listing() {
        assert_eq!(format_gallery(&[]), vec!["Gallery (0 images)"]);
    }

    #[test]
    fn pricing_listing() {
        let lines = format_pricing(&defaults::pricing());
        assert_eq!(lines[0], "Pricing (3 packages)");
        assert_eq!(lines[1], "001 Basic $199 (neutral)");
        assert!(lines.contains(&"002 Premium $499 (Most Popular, amber)".to_string()));
        assert!(lines.contains(&"    Excludes: Express delivery".to_string()));
        // Professional excludes nothing: no Excludes line after its header.
        let pro = lines.iter().position(|l| l.starts_with("003 ")).unwrap();
        assert!(lines[pro..].iter().all(|l| !l.contains("Excludes")));
    }

    #[test]
    fn single_package_is_singular() {
        let lines = format_pricing(&defaults::pricing()[..1]);
        assert_eq!(lines[0], "Pricing (1 package)");
    }

    #[test]
    fn content_events() {
        assert_eq!(
            format_content_event(&ContentEvent::GalleryChanged { count: 7 }),
            "Gallery saved (7 images)"
        );
        assert_eq!(
            format_content_event(&ContentEvent::PricingChanged { count: 1 }),
            "Pricing saved (1 package)"
        );
    }

    #[test]
    fn status_lines() {
        let lines = format_status(
            SessionState::LoggedOut,
            Path::new("store.json"),
            &snapshot(),
        );
        assert_eq!(
            lines,
            vec![
                "Session: logged out",
                "Store: store.json",
                "Gallery: 6 images",
                "Pricing: 3 packages",
            ]
        );
    }

    #[test]
    fn build_output() {
        let lines = format_build_output(Path::new("dist/index.html"), &snapshot());
        assert_eq!(lines[0], "Home \u{2192} dist/index.html");
        assert_eq!(lines[1], "    6 gallery images, 3 pricing packages");
    }

    #[test]
    fn dialog_states() {
        assert_eq!(format_dialog_state(&DialogState::Submitting), "Submitting...");
        assert!(format_dialog_state(&DialogState::Submitted).starts_with("Thank You!"));
        assert_eq!(
            format_dialog_state(&DialogState::Failed("offline".to_string())),
            "Failed: offline"
        );
    }
}
