//! Export readiness rules.
//!
//! Violations are grouped into classes checked in a fixed order; only the
//! first failing class is reported, mirroring what the user is asked to fix
//! first.

use std::fmt;

use super::banner::effective_page_id;
use super::probe::is_valid_url;
use super::{GroupingContext, ImageEntry};

/// Parse the leading integer of `value`, ignoring any trailing text.
///
/// `" 12px"` parses as 12, `"px12"` does not parse.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let re = regex::Regex::new(r"^\s*([+-]?\d+)").ok()?;
    let captures = re.captures(value)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Position as exported, or `None` when it is missing, non-numeric or negative.
pub fn position_number(position: &str) -> Option<u64> {
    if position.trim().is_empty() {
        return None;
    }
    parse_leading_int(position).and_then(|value| u64::try_from(value).ok())
}

/// Insert position typed into the add form; blank, negative or garbage appends.
pub fn parse_index_input(value: &str) -> Option<usize> {
    parse_leading_int(value).and_then(|value| usize::try_from(value).ok())
}

/// One reason the carousel cannot be exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingPosition,
    InvalidPosition,
    MissingPageId,
    MissingBannerId { index: usize },
    DuplicateBannerId { banner_id: String, first: usize, second: usize },
    MissingLink { index: usize },
    InvalidLink { index: usize },
    InvalidImageUrl { index: usize },
}

impl Violation {
    /// Precedence class, 1 is checked first.
    pub fn class(&self) -> u8 {
        match self {
            Self::MissingPosition | Self::InvalidPosition => 1,
            Self::MissingPageId => 2,
            Self::MissingBannerId { .. } => 3,
            Self::DuplicateBannerId { .. } => 4,
            Self::MissingLink { .. } => 5,
            Self::InvalidLink { .. } => 6,
            Self::InvalidImageUrl { .. } => 7,
        }
    }

    /// User-facing message for the whole class.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingPosition => "Please enter a position number",
            Self::InvalidPosition => "Position must be a valid non-negative number",
            Self::MissingPageId => "Please enter a page ID",
            Self::MissingBannerId { .. } => "Please add Banner IDs to all images before exporting",
            Self::DuplicateBannerId { .. } => "Each image must have a unique Banner ID",
            Self::MissingLink { .. } => {
                "Please add redirection links to all images before exporting"
            }
            Self::InvalidLink { .. } => "Please ensure all redirection links are valid URLs",
            Self::InvalidImageUrl { .. } => "Please ensure all image URLs are valid",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// All violations of the first failing class, in list order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    fn new(violations: Vec<Violation>) -> Option<Self> {
        (!violations.is_empty()).then_some(Self { violations })
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn class(&self) -> u8 {
        self.violations.first().map_or(0, Violation::class)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violations.first() {
            Some(first) => write!(f, "{first}"),
            None => f.write_str("no violations"),
        }
    }
}

impl std::error::Error for ValidationReport {}

/// Trimmed, non-empty banner ids equal to each other.
pub fn banner_ids_collide(a: &str, b: &str) -> bool {
    let a = a.trim();
    !a.is_empty() && a == b.trim()
}

/// Index of another entry (not `index`) already using `banner_id`.
pub fn find_banner_id_collision(
    entries: &[ImageEntry],
    index: usize,
    banner_id: &str,
) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .find(|(other, entry)| *other != index && banner_ids_collide(&entry.banner_id, banner_id))
        .map(|(other, _)| other)
}

type ClassCheck = fn(&GroupingContext, &[ImageEntry]) -> Vec<Violation>;

/// Checks in precedence order; the first non-empty result is reported.
const CLASS_CHECKS: [ClassCheck; 7] = [
    check_position,
    check_page_id,
    check_missing_banner_ids,
    check_duplicate_banner_ids,
    check_missing_links,
    check_invalid_links,
    check_image_urls,
];

pub fn validate_for_export(
    ctx: &GroupingContext,
    entries: &[ImageEntry],
) -> Result<(), ValidationReport> {
    for check in CLASS_CHECKS {
        if let Some(report) = ValidationReport::new(check(ctx, entries)) {
            return Err(report);
        }
    }
    Ok(())
}

fn check_position(ctx: &GroupingContext, _: &[ImageEntry]) -> Vec<Violation> {
    if ctx.position.trim().is_empty() {
        vec![Violation::MissingPosition]
    } else if position_number(&ctx.position).is_none() {
        vec![Violation::InvalidPosition]
    } else {
        Vec::new()
    }
}

fn check_page_id(ctx: &GroupingContext, _: &[ImageEntry]) -> Vec<Violation> {
    if effective_page_id(ctx).is_empty() {
        vec![Violation::MissingPageId]
    } else {
        Vec::new()
    }
}

fn check_missing_banner_ids(_: &GroupingContext, entries: &[ImageEntry]) -> Vec<Violation> {
    indices_where(entries, |entry| entry.banner_id.trim().is_empty())
        .map(|index| Violation::MissingBannerId { index })
        .collect()
}

fn check_duplicate_banner_ids(_: &GroupingContext, entries: &[ImageEntry]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (first, a) in entries.iter().enumerate() {
        for (second, b) in entries.iter().enumerate().skip(first + 1) {
            if banner_ids_collide(&a.banner_id, &b.banner_id) {
                violations.push(Violation::DuplicateBannerId {
                    banner_id: a.banner_id.trim().to_string(),
                    first,
                    second,
                });
            }
        }
    }
    violations
}

fn check_missing_links(_: &GroupingContext, entries: &[ImageEntry]) -> Vec<Violation> {
    indices_where(entries, |entry| entry.link.trim().is_empty())
        .map(|index| Violation::MissingLink { index })
        .collect()
}

fn check_invalid_links(_: &GroupingContext, entries: &[ImageEntry]) -> Vec<Violation> {
    indices_where(entries, |entry| !is_valid_url(entry.link.trim()))
        .map(|index| Violation::InvalidLink { index })
        .collect()
}

fn check_image_urls(_: &GroupingContext, entries: &[ImageEntry]) -> Vec<Violation> {
    indices_where(entries, |entry| !is_valid_url(&entry.url))
        .map(|index| Violation::InvalidImageUrl { index })
        .collect()
}

fn indices_where<'a>(
    entries: &'a [ImageEntry],
    predicate: impl Fn(&ImageEntry) -> bool + 'a,
) -> impl Iterator<Item = usize> + 'a {
    entries
        .iter()
        .enumerate()
        .filter(move |(_, entry)| predicate(entry))
        .map(|(index, _)| index)
}

/// Inline form errors shown while the user is typing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub position: Option<&'static str>,
    pub page_id: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.page_id.is_none()
    }
}

pub fn field_errors(ctx: &GroupingContext) -> FieldErrors {
    let position = if ctx.position.trim().is_empty() {
        Some("Position is required")
    } else {
        match parse_leading_int(&ctx.position) {
            None => Some("Position must be a number"),
            Some(value) if value < 0 => Some("Position cannot be negative"),
            Some(_) => None,
        }
    };
    let page_id = effective_page_id(ctx)
        .is_empty()
        .then_some("Page ID is required");

    FieldErrors { position, page_id }
}
