//! Cross-object checks between dependent components.
//!
//! Every check runs to completion and appends one message per violation;
//! nothing here short-circuits or fails. Coordinates are local and
//! unrotated: columns and pile rows spread along X, pile columns along Y.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::centered_offset;
use crate::params::{
    BufferParameters, CapParameters, CircularElevationParameters, ElevationType,
    FoundationParameters, LamelarElevationParameters, PileParameters,
};


/// Ordered list of violations. Valid iff empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Numbered report, one violation per line.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {}", i + 1, e))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Run every check and merge the results in a fixed order.
pub fn validate_all(
    elevation_type: ElevationType,
    lamelar: &LamelarElevationParameters,
    circular: &CircularElevationParameters,
    cap: &CapParameters,
    piles: &PileParameters,
    foundation: &FoundationParameters,
    buffer: &BufferParameters,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.merge(validate_columns_vs_cap(elevation_type, lamelar, circular, cap));
    result.merge(validate_piles_vs_foundation(piles, foundation));
    result.merge(validate_buffers_vs_cap(buffer, cap));
    debug!(violations = result.errors.len(), "Validation finished");
    result
}

/// Columns against the cap beam:
/// (a) the section fits the cap width,
/// (b) adjacent columns do not overlap (touching is allowed),
/// (c) every column lies within the cap's bottom edge `[P − bottom/2, P + bottom/2]`.
pub fn validate_columns_vs_cap(
    elevation_type: ElevationType,
    lamelar: &LamelarElevationParameters,
    circular: &CircularElevationParameters,
    cap: &CapParameters,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    let (count, spacing, size, offset_x, size_name) = match elevation_type {
        ElevationType::Lamelar => (
            lamelar.number_of_columns,
            lamelar.distance_between_columns,
            lamelar.width,
            lamelar.offset_x,
            "width",
        ),
        ElevationType::Circular => (
            circular.number_of_columns,
            circular.distance_between_columns,
            circular.diameter,
            circular.offset_x,
            "diameter",
        ),
    };

    match elevation_type {
        ElevationType::Lamelar => {
            if lamelar.width.max(lamelar.thickness) > cap.width {
                result.add_error(format!(
                    "Lamelar column cross-section ({:.0} × {:.0} mm) exceeds cap beam width ({:.0} mm). \
                     Reduce column width/thickness or increase cap beam width.",
                    lamelar.width, lamelar.thickness, cap.width
                ));
            }
        }
        ElevationType::Circular => {
            if circular.diameter > cap.width {
                result.add_error(format!(
                    "Circular column diameter ({:.0} mm) exceeds cap beam width ({:.0} mm). \
                     Reduce column diameter or increase cap beam width.",
                    circular.diameter, cap.width
                ));
            }
        }
    }

    if count > 1 && spacing < size {
        result.add_error(format!(
            "Column overlap: spacing ({:.0} mm) is less than column {} ({:.0} mm). \
             Minimum spacing must be ≥ {:.0} mm.",
            spacing, size_name, size, size
        ));
    }

    let cap_left = cap.p - cap.bottom_length / 2.0;
    let cap_right = cap.p + cap.bottom_length / 2.0;
    let n = count as usize;

    for i in 0..n {
        let center = offset_x + centered_offset(i, n, spacing);
        let left = center - size / 2.0;
        let right = center + size / 2.0;

        if left < cap_left {
            result.add_error(format!(
                "Column {} left edge ({:.0} mm) is outside cap beam bottom left edge ({:.0} mm). \
                 Reduce column count/spacing, adjust offset, or increase cap bottom length.",
                i + 1,
                left,
                cap_left
            ));
        }
        if right > cap_right {
            result.add_error(format!(
                "Column {} right edge ({:.0} mm) is outside cap beam bottom right edge ({:.0} mm). \
                 Reduce column count/spacing, adjust offset, or increase cap bottom length.",
                i + 1,
                right,
                cap_right
            ));
        }
    }

    result
}

/// Pile grid against the foundation footprint and thickness.
pub fn validate_piles_vs_foundation(piles: &PileParameters, foundation: &FoundationParameters) -> ValidationResult {
    let mut result = ValidationResult::new();

    let extent_x = piles.row_extent();
    if extent_x > foundation.length {
        result.add_error(format!(
            "Pile grid row extent ({:.0} mm) exceeds foundation length ({:.0} mm). \
             Reduce rows ({}), row distance ({:.0} mm), pile diameter ({:.0} mm), or increase foundation length.",
            extent_x, foundation.length, piles.rows, piles.row_distance, piles.diameter
        ));
    }

    let extent_y = piles.column_extent();
    if extent_y > foundation.width {
        result.add_error(format!(
            "Pile grid column extent ({:.0} mm) exceeds foundation width ({:.0} mm). \
             Reduce columns ({}), column distance ({:.0} mm), pile diameter ({:.0} mm), or increase foundation width.",
            extent_y, foundation.width, piles.columns, piles.column_distance, piles.diameter
        ));
    }

    if piles.embedded_length > foundation.height {
        result.add_error(format!(
            "Pile embedded length ({:.0} mm) exceeds foundation thickness ({:.0} mm). \
             Reduce embedded length or increase foundation height.",
            piles.embedded_length, foundation.height
        ));
    }

    result
}

/// Buffers against the cap top length, with and without spacing.
pub fn validate_buffers_vs_cap(buffer: &BufferParameters, cap: &CapParameters) -> ValidationResult {
    let mut result = ValidationResult::new();
    if buffer.number == 0 {
        return result;
    }

    let required = buffer.required_span();
    if required > cap.top_length {
        result.add_error(format!(
            "Buffers exceed cap beam: {} buffers with width {:.0} mm, spacing {:.0} mm, \
             left offset {:.0} mm, and right offset {:.0} mm require {:.0} mm \
             but cap top length is only {:.0} mm. \
             Reduce number of buffers, spacing, offsets, or buffer width.",
            buffer.number,
            buffer.width,
            buffer.spacing,
            buffer.left_offset,
            buffer.right_offset,
            required,
            cap.top_length
        ));
    }

    let packed = buffer.packed_span();
    if packed > cap.top_length {
        result.add_error(format!(
            "Too many buffers: Even with zero spacing, {} buffers of width {:.0} mm \
             with left offset {:.0} mm and right offset {:.0} mm require {:.0} mm \
             but cap top length is only {:.0} mm. \
             Reduce number of buffers or buffer width.",
            buffer.number, buffer.width, buffer.left_offset, buffer.right_offset, packed, cap.top_length
        ));
    }

    result
}
