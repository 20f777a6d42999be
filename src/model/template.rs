//! Template types and grid placement expressions.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// Named grid archetype a document is laid out with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateType {
    Single,
    TwoCol,
    TwoRow,
    Triple,
    Quad,
    SidebarLeft,
    SidebarRight,
    HeaderContent,
    FocusLeft,
    FocusRight,
    /// Grid shape supplied by the caller
    Custom,
}

impl TemplateType {
    /// Every template with a fixed geometry (all but `Custom`).
    pub const BUILT_IN: [TemplateType; 10] = [
        TemplateType::Single,
        TemplateType::TwoCol,
        TemplateType::TwoRow,
        TemplateType::Triple,
        TemplateType::Quad,
        TemplateType::SidebarLeft,
        TemplateType::SidebarRight,
        TemplateType::HeaderContent,
        TemplateType::FocusLeft,
        TemplateType::FocusRight,
    ];

    /// Wire name of this template.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Single => "single",
            TemplateType::TwoCol => "two-col",
            TemplateType::TwoRow => "two-row",
            TemplateType::Triple => "triple",
            TemplateType::Quad => "quad",
            TemplateType::SidebarLeft => "sidebar-left",
            TemplateType::SidebarRight => "sidebar-right",
            TemplateType::HeaderContent => "header-content",
            TemplateType::FocusLeft => "focus-left",
            TemplateType::FocusRight => "focus-right",
            TemplateType::Custom => "custom",
        }
    }

    /// Check if the grid shape comes from the caller.
    pub fn is_custom(&self) -> bool {
        matches!(self, TemplateType::Custom)
    }
}

impl FromStr for TemplateType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "custom" {
            return Ok(TemplateType::Custom);
        }
        TemplateType::BUILT_IN
            .into_iter()
            .find(|template| template.as_str() == s)
            .ok_or_else(|| Error::UnsupportedTemplate(s.to_string()))
    }
}

impl std::fmt::Display for TemplateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// End of a grid placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementEnd {
    /// Occupies a single track
    Auto,
    /// Explicit end line; negative values count back from the last line
    Line(i32),
    /// Number of tracks spanned
    Span(u32),
}

/// A parsed grid placement expression such as `"2"`, `"1 / 3"`,
/// `"1 / span 2"`, or `"1 / -1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlacement {
    /// Start line (1-based)
    pub start: u32,
    /// End of the placement
    pub end: PlacementEnd,
}

fn placement_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(\d+)\s*(?:/\s*(?:(span)\s+(\d+)|(-?\d+))\s*)?$")
            .expect("placement pattern compiles")
    })
}

impl GridPlacement {
    /// Parse a placement expression. Returns `None` for anything else.
    pub fn parse(expr: &str) -> Option<Self> {
        let caps = placement_regex().captures(expr)?;
        let start: u32 = caps.get(1)?.as_str().parse().ok()?;
        if start == 0 {
            return None;
        }

        let end = if caps.get(2).is_some() {
            let span: u32 = caps.get(3)?.as_str().parse().ok()?;
            if span == 0 {
                return None;
            }
            PlacementEnd::Span(span)
        } else if let Some(line) = caps.get(4) {
            let line: i32 = line.as_str().parse().ok()?;
            if line == 0 {
                return None;
            }
            PlacementEnd::Line(line)
        } else {
            PlacementEnd::Auto
        };

        Some(Self { start, end })
    }

    /// Resolve to a `[start, end)` pair of grid lines for a grid with
    /// `tracks` tracks on this axis.
    pub fn lines(&self, tracks: u32) -> (i64, i64) {
        let start = i64::from(self.start);
        let end = match self.end {
            PlacementEnd::Auto => start + 1,
            PlacementEnd::Span(span) => start + i64::from(span),
            PlacementEnd::Line(line) if line > 0 => i64::from(line),
            PlacementEnd::Line(line) => i64::from(tracks) + 2 + i64::from(line),
        };
        (start, end)
    }

    /// Check if the placement lies within a grid of `tracks` tracks.
    pub fn fits(&self, tracks: u32) -> bool {
        let (start, end) = self.lines(tracks);
        start >= 1 && end > start && end <= i64::from(tracks) + 1
    }
}
