//! Checkbox-to-label association.
//!
//! The analysis service detects selection marks (checkboxes, radio buttons)
//! and text lines independently, each with a bounding polygon and a page
//! number. This module pairs every mark with the text line whose polygon
//! centroid is nearest on the same page, producing a [`Checkbox`] record per
//! mark.
//!
//! The search is a naive linear scan per mark. Per-page detection counts are
//! small (tens of elements), so no spatial index is needed.

use crate::geometry::Polygon;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fill state of a detected selection mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    /// The mark is filled in
    Selected,
    /// The mark is empty
    #[default]
    Unselected,
    /// A state reported by the service that this crate does not model
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for SelectionState {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Selected => "selected",
            Self::Unselected => "unselected",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for SelectionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "selected" | "checked" => Ok(Self::Selected),
            "unselected" | "unchecked" => Ok(Self::Unselected),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("unknown selection state: '{s}'")),
        }
    }
}

/// A detected checkbox/radio-button-like element on a document page.
///
/// Produced once per detection; immutable after creation and consumed only
/// by [`associate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionMark {
    /// One-based page number the mark was detected on
    pub page: u32,
    /// Fill state
    pub state: SelectionState,
    /// Bounding outline
    pub polygon: Polygon,
}

/// A detected line of text on a document page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// One-based page number the line was detected on
    pub page: u32,
    /// Recognized text content
    pub text: String,
    /// Bounding outline
    pub polygon: Polygon,
}

/// A selection mark resolved against its nearest same-page text line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkbox {
    /// Page the mark was detected on
    pub page: u32,
    /// Fill state
    pub state: SelectionState,
    /// Text of the nearest same-page line, or `None` when the page has no
    /// usable text line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
}

/// Which kind of detected element a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A selection mark
    SelectionMark,
    /// A text line
    TextLine,
    /// A table
    Table,
}

impl std::fmt::Display for ElementKind {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SelectionMark => "selection mark",
            Self::TextLine => "text line",
            Self::Table => "table",
        };
        write!(f, "{s}")
    }
}

/// Data-quality problem found while associating marks or assembling tables.
///
/// Warnings accompany the result instead of aborting it: the offending
/// record is skipped and the rest of the batch is processed normally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutWarning {
    /// A polygon with zero points was supplied; its centroid is undefined
    /// and the record was skipped
    MalformedPolygon {
        /// Kind of element that carried the polygon
        element: ElementKind,
        /// Page the element was detected on
        page: u32,
    },
    /// A table cell carried an out-of-range index and was skipped
    InvalidIndex {
        /// Row index the cell claimed
        row_index: usize,
        /// Column index the cell claimed
        column_index: usize,
    },
    /// A table declared more columns than the sanity bound allows; the
    /// whole table was replaced by an empty grid
    OversizedGrid {
        /// Declared column count
        column_count: usize,
    },
}

impl std::fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedPolygon { element, page } => {
                write!(f, "skipped {element} with empty polygon on page {page}")
            }
            Self::InvalidIndex {
                row_index,
                column_index,
            } => write!(
                f,
                "skipped table cell with out-of-range index ({row_index}, {column_index})"
            ),
            Self::OversizedGrid { column_count } => {
                write!(f, "dropped table declaring {column_count} columns")
            }
        }
    }
}

/// Options for [`associate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssociatorOptions {
    /// Suppress a checkbox whose resolved label text was already used by an
    /// earlier checkbox in the same call (first occurrence wins). Off by
    /// default: every mark produces a checkbox.
    pub dedupe_labels: bool,
}

impl AssociatorOptions {
    /// Set label deduplication
    #[inline]
    #[must_use = "returns options with deduplication configured"]
    pub const fn with_dedupe_labels(mut self, enable: bool) -> Self {
        self.dedupe_labels = enable;
        self
    }
}

/// Result of [`associate`]: resolved checkboxes plus any data-quality
/// warnings raised along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssociationOutcome {
    /// Resolved checkboxes, in input mark order
    pub checkboxes: Vec<Checkbox>,
    /// Records skipped for data-quality reasons
    pub warnings: Vec<LayoutWarning>,
}

/// Associate every selection mark with its nearest same-page text line.
///
/// For each mark the candidate set is the text lines sharing the mark's
/// page; the winner minimizes the Euclidean distance between polygon
/// centroids. The scan uses a strict `<` comparison, so of two equidistant
/// lines the one appearing first in `lines` wins. A mark on a page with no
/// usable line is still emitted, with `option = None`.
///
/// Records with empty polygons are skipped and reported as warnings; inputs
/// are never mutated.
#[must_use = "association outcome is computed but not used"]
pub fn associate(
    marks: &[SelectionMark],
    lines: &[TextLine],
    options: AssociatorOptions,
) -> AssociationOutcome {
    let mut warnings = Vec::new();

    // Centroids are computed once per line. Lines without a centroid drop
    // out of candidacy for every mark but are only reported once.
    let line_centroids: Vec<_> = lines
        .iter()
        .map(|line| {
            let centroid = line.polygon.centroid();
            if centroid.is_none() {
                log::warn!(
                    "skipping text line with empty polygon on page {}",
                    line.page
                );
                warnings.push(LayoutWarning::MalformedPolygon {
                    element: ElementKind::TextLine,
                    page: line.page,
                });
            }
            centroid
        })
        .collect();

    let mut checkboxes = Vec::with_capacity(marks.len());
    let mut seen_labels: HashSet<String> = HashSet::new();

    for mark in marks {
        let Some(mark_center) = mark.polygon.centroid() else {
            log::warn!(
                "skipping selection mark with empty polygon on page {}",
                mark.page
            );
            warnings.push(LayoutWarning::MalformedPolygon {
                element: ElementKind::SelectionMark,
                page: mark.page,
            });
            continue;
        };

        let mut nearest: Option<&str> = None;
        let mut min_distance = f64::INFINITY;

        for (line, centroid) in lines.iter().zip(&line_centroids) {
            if line.page != mark.page {
                continue;
            }
            let Some(centroid) = centroid else { continue };

            let distance = mark_center.distance_to(centroid);
            if distance < min_distance {
                min_distance = distance;
                nearest = Some(line.text.as_str());
            }
        }

        let option = nearest.map(str::to_owned);

        if options.dedupe_labels {
            if let Some(label) = &option {
                if !seen_labels.insert(label.clone()) {
                    log::debug!("dropping checkbox with duplicate label {label:?}");
                    continue;
                }
            }
        }

        checkboxes.push(Checkbox {
            page: mark.page,
            state: mark.state,
            option,
        });
    }

    AssociationOutcome {
        checkboxes,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn square(x: f64, y: f64) -> Polygon {
        Polygon::new(vec![
            Point::new(x, y),
            Point::new(x + 1.0, y),
            Point::new(x + 1.0, y + 1.0),
            Point::new(x, y + 1.0),
        ])
    }

    fn mark(page: u32, x: f64, y: f64) -> SelectionMark {
        SelectionMark {
            page,
            state: SelectionState::Selected,
            polygon: square(x, y),
        }
    }

    fn line(page: u32, text: &str, x: f64, y: f64) -> TextLine {
        TextLine {
            page,
            text: text.to_string(),
            polygon: square(x, y),
        }
    }

    #[test]
    fn test_picks_nearest_line() {
        let marks = vec![mark(1, 0.0, 0.0)];
        let lines = vec![line(1, "far", 10.0, 10.0), line(1, "near", 2.0, 0.0)];

        let outcome = associate(&marks, &lines, AssociatorOptions::default());
        assert_eq!(outcome.checkboxes.len(), 1);
        assert_eq!(outcome.checkboxes[0].option.as_deref(), Some("near"));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_tie_breaks_to_first_line_in_input_order() {
        // Two lines exactly equidistant from the mark, left and right.
        let marks = vec![mark(1, 5.0, 5.0)];
        let lines = vec![line(1, "left", 2.0, 5.0), line(1, "right", 8.0, 5.0)];

        let outcome = associate(&marks, &lines, AssociatorOptions::default());
        assert_eq!(outcome.checkboxes[0].option.as_deref(), Some("left"));

        // Swapping the input order flips the winner.
        let lines = vec![line(1, "right", 8.0, 5.0), line(1, "left", 2.0, 5.0)];
        let outcome = associate(&marks, &lines, AssociatorOptions::default());
        assert_eq!(outcome.checkboxes[0].option.as_deref(), Some("right"));
    }

    #[test]
    fn test_never_associates_across_pages() {
        let marks = vec![mark(1, 0.0, 0.0)];
        // The page-2 line is much closer geometrically but must not win.
        let lines = vec![line(2, "wrong page", 0.5, 0.0), line(1, "same page", 50.0, 50.0)];

        let outcome = associate(&marks, &lines, AssociatorOptions::default());
        assert_eq!(outcome.checkboxes[0].option.as_deref(), Some("same page"));
    }

    #[test]
    fn test_mark_without_same_page_lines_keeps_none_option() {
        let marks = vec![mark(3, 0.0, 0.0)];
        let lines = vec![line(1, "elsewhere", 0.0, 0.0)];

        let outcome = associate(&marks, &lines, AssociatorOptions::default());
        assert_eq!(outcome.checkboxes.len(), 1);
        assert_eq!(outcome.checkboxes[0].page, 3);
        assert!(outcome.checkboxes[0].option.is_none());
    }

    #[test]
    fn test_empty_marks_is_a_no_op() {
        let lines = vec![line(1, "anything", 0.0, 0.0)];
        let outcome = associate(&[], &lines, AssociatorOptions::default());
        assert!(outcome.checkboxes.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_empty_lines_yields_all_none_options() {
        let marks = vec![mark(1, 0.0, 0.0), mark(2, 1.0, 1.0)];
        let outcome = associate(&marks, &[], AssociatorOptions::default());
        assert_eq!(outcome.checkboxes.len(), 2);
        assert!(outcome.checkboxes.iter().all(|c| c.option.is_none()));
    }

    #[test]
    fn test_output_follows_mark_input_order() {
        let marks = vec![mark(1, 0.0, 0.0), mark(1, 20.0, 0.0), mark(1, 40.0, 0.0)];
        let lines = vec![
            line(1, "a", 0.0, 2.0),
            line(1, "b", 20.0, 2.0),
            line(1, "c", 40.0, 2.0),
        ];

        let outcome = associate(&marks, &lines, AssociatorOptions::default());
        let labels: Vec<_> = outcome
            .checkboxes
            .iter()
            .map(|c| c.option.as_deref().unwrap())
            .collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_malformed_mark_polygon_is_skipped_with_warning() {
        let mut bad = mark(1, 0.0, 0.0);
        bad.polygon = Polygon::default();
        let marks = vec![bad, mark(1, 0.0, 0.0)];
        let lines = vec![line(1, "label", 0.0, 2.0)];

        let outcome = associate(&marks, &lines, AssociatorOptions::default());
        assert_eq!(outcome.checkboxes.len(), 1);
        assert_eq!(
            outcome.warnings,
            vec![LayoutWarning::MalformedPolygon {
                element: ElementKind::SelectionMark,
                page: 1,
            }]
        );
    }

    #[test]
    fn test_malformed_line_polygon_drops_out_of_candidacy() {
        let marks = vec![mark(1, 0.0, 0.0)];
        let mut bad = line(1, "broken", 0.0, 0.0);
        bad.polygon = Polygon::default();
        let lines = vec![bad, line(1, "good", 30.0, 30.0)];

        let outcome = associate(&marks, &lines, AssociatorOptions::default());
        assert_eq!(outcome.checkboxes[0].option.as_deref(), Some("good"));
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_dedupe_mode_keeps_first_occurrence_of_label() {
        // Both marks resolve to the same line.
        let marks = vec![mark(1, 0.0, 0.0), mark(1, 0.2, 0.2)];
        let lines = vec![line(1, "Yes", 1.0, 1.0)];

        let deduped = associate(
            &marks,
            &lines,
            AssociatorOptions::default().with_dedupe_labels(true),
        );
        assert_eq!(deduped.checkboxes.len(), 1);

        // Default mode keeps both.
        let kept = associate(&marks, &lines, AssociatorOptions::default());
        assert_eq!(kept.checkboxes.len(), 2);
    }

    #[test]
    fn test_dedupe_mode_never_drops_none_options() {
        let marks = vec![mark(4, 0.0, 0.0), mark(4, 1.0, 1.0)];

        let outcome = associate(
            &marks,
            &[],
            AssociatorOptions::default().with_dedupe_labels(true),
        );
        assert_eq!(outcome.checkboxes.len(), 2);
    }

    #[test]
    fn test_checkbox_serde_round_trip() {
        let boxes = vec![
            Checkbox {
                page: 1,
                state: SelectionState::Selected,
                option: Some("Approve".to_string()),
            },
            Checkbox {
                page: 2,
                state: SelectionState::Unselected,
                option: None,
            },
        ];

        let json = serde_json::to_string(&boxes).unwrap();
        let back: Vec<Checkbox> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, boxes);
    }

    #[test]
    fn test_selection_state_from_wire_unknown_value() {
        let state: SelectionState = serde_json::from_str("\"signed\"").unwrap();
        assert_eq!(state, SelectionState::Unknown);
    }

    #[test]
    fn test_selection_state_display_round_trip() {
        use std::str::FromStr;

        for state in [
            SelectionState::Selected,
            SelectionState::Unselected,
            SelectionState::Unknown,
        ] {
            let parsed = SelectionState::from_str(&state.to_string()).unwrap();
            assert_eq!(parsed, state);
        }
    }
}
