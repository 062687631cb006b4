//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is a content inventory, not a file listing: every entry shows its
//! positional index and display text, with secondary details on indented lines
//! underneath.
//!
//! # Output Format
//!
//! ```text
//! Content: remote (http://localhost:4000/api/content)
//! Hero
//!     Comunidad de San José
//!     Chip: Misas · Sacramentos · Comunidad
//! Schedules (3)
//!     001 Lunes a viernes · 07:00 · 19:00
//!         Note: Templo principal
//! Costs (4)
//!     001 Bautizo · $800 MXN
//! Prayers (3)
//!     001 Santo Rosario
//!         Schedule: Ejemplo: Lunes y jueves · 18:30 h
//! Community: Vida parroquial (3 photos)
//!     001 Fachada del templo
//! Contact
//!     Address: Calle San José s/n, Col. Centro, Tu ciudad, Tu estado.
//!     Phone: (000) 000 00 00
//!     Office: Lunes a viernes · 10:00 a 14:00 h
//!     Email: parroquia.sanjose@ejemplo.com
//! ```
//!
//! When the source failed the first line reads
//! `Content: default (fallback: endpoint returned HTTP 500)`.
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::content::ContentDocument;
use crate::generate::GeneratedSite;
use crate::loader::ContentState;

/// Longest description shown inline before truncation.
const DESCRIPTION_MAX: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    }
}

/// One line describing where the content came from.
pub fn format_origin(state: &ContentState) -> String {
    if state.is_loading() {
        return "Content: loading".to_string();
    }
    match state.fallback() {
        Some(err) => format!("Content: {} (fallback: {})", state.origin(), err),
        None => format!("Content: {}", state.origin()),
    }
}

/// Inventory of a content document.
pub fn format_document(doc: &ContentDocument) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Hero".to_string());
    lines.push(format!(
        "{}{} {}",
        indent(1),
        doc.hero.title_prefix,
        doc.hero.title_highlight
    ));
    lines.push(format!("{}Chip: {}", indent(1), doc.hero.chip));

    lines.push(format!("Schedules ({})", doc.schedules.len()));
    for (i, schedule) in doc.schedules.iter().enumerate() {
        lines.push(format!(
            "{}{} {} · {}",
            indent(1),
            format_index(i + 1),
            schedule.label,
            schedule.hours
        ));
        if let Some(note) = &schedule.note {
            lines.push(format!("{}Note: {}", indent(2), note));
        }
    }

    lines.push(format!("Costs ({})", doc.costs.len()));
    for (i, cost) in doc.costs.iter().enumerate() {
        lines.push(format!(
            "{}{} {} · {}",
            indent(1),
            format_index(i + 1),
            cost.label,
            cost.price
        ));
    }

    lines.push(format!("Prayers ({})", doc.prayers.len()));
    for (i, prayer) in doc.prayers.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), prayer.title));
        lines.push(format!("{}Schedule: {}", indent(2), prayer.schedule));
    }

    lines.push(format!(
        "Community: {} ({} photos)",
        doc.community.section_title,
        doc.community.photos.len()
    ));
    for (i, photo) in doc.community.photos.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), photo.title));
        lines.push(format!(
            "{}{}",
            indent(2),
            truncate_desc(&photo.text, DESCRIPTION_MAX)
        ));
    }

    lines.push("Contact".to_string());
    lines.push(format!("{}Address: {}", indent(1), doc.contact.address));
    lines.push(format!("{}Phone: {}", indent(1), doc.contact.phone));
    lines.push(format!("{}Office: {}", indent(1), doc.contact.office_hours));
    lines.push(format!("{}Email: {}", indent(1), doc.contact.email));

    lines
}

pub fn format_content_output(state: &ContentState) -> Vec<String> {
    let mut lines = vec![format_origin(state)];
    lines.extend(format_document(&state.document()));
    lines
}

pub fn print_content_output(state: &ContentState) {
    for line in format_content_output(state) {
        println!("{}", line);
    }
}

pub fn format_generate_output(site: &GeneratedSite) -> Vec<String> {
    vec![
        format!("Page → {}", site.index.display()),
        format!("Content → {}", site.content_json.display()),
    ]
}

pub fn print_generate_output(site: &GeneratedSite) {
    for line in format_generate_output(site) {
        println!("{}", line);
    }
}
