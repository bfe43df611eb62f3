//! Point to terminal cell conversion.
//!
//! Alert geometry is specified in points. A terminal cell is treated as
//! 8 points wide and 16 points tall.

pub const CELL_WIDTH_PT: f32 = 8.0;
pub const CELL_HEIGHT_PT: f32 = 16.0;

/// Number of columns covering `points` horizontally.
#[must_use]
pub fn cols(points: f32) -> u16 {
    to_cells(points, CELL_WIDTH_PT)
}

/// Number of rows covering `points` vertically.
#[must_use]
pub fn rows(points: f32) -> u16 {
    to_cells(points, CELL_HEIGHT_PT)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_cells(points: f32, cell: f32) -> u16 {
    // NaN and negative sizes render as nothing
    if !(points > 0.0) {
        return 0;
    }
    let cells = (points / cell).round();
    if cells >= f32::from(u16::MAX) {
        u16::MAX
    } else {
        cells as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics() {
        assert_eq!(cols(50.0), 6);
        assert_eq!(rows(50.0), 3);
        assert_eq!(cols(25.0), 3);
        assert_eq!(rows(35.0), 2);
        assert_eq!(rows(10.0), 1);
    }

    #[test]
    fn test_degenerate_sizes() {
        assert_eq!(cols(-20.0), 0);
        assert_eq!(rows(0.0), 0);
        assert_eq!(rows(f32::NAN), 0);
        assert_eq!(cols(f32::INFINITY), u16::MAX);
    }
}
