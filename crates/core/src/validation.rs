//! Input validation for layout payloads.
//!
//! Geometry validity of placements (overlaps, out-of-grid bins) is a client
//! concern; the server only rejects structurally impossible values.

use crate::error::CoreError;

/// Valid spacer modes per axis.
pub const SPACER_NONE: &str = "none";
pub const SPACER_ONE_SIDED: &str = "one-sided";
pub const SPACER_SYMMETRICAL: &str = "symmetrical";

/// All valid spacer mode values.
pub const VALID_SPACER_MODES: &[&str] = &[SPACER_NONE, SPACER_ONE_SIDED, SPACER_SYMMETRICAL];

/// Valid rotation values in degrees.
pub const VALID_ROTATIONS: &[i32] = &[0, 90, 180, 270];

/// Maximum length of a layout name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Validate a name and return the trimmed form that should be stored.
///
/// Length is counted in characters, not bytes, so multi-byte names are not
/// penalized.
pub fn normalized_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Layout name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Layout name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate grid dimensions (positive integers).
pub fn validate_grid(grid_x: i32, grid_y: i32) -> Result<(), CoreError> {
    if grid_x <= 0 || grid_y <= 0 {
        return Err(CoreError::Validation(format!(
            "Grid dimensions must be positive (got {grid_x}x{grid_y})"
        )));
    }
    Ok(())
}

/// Validate physical dimensions in millimetres (positive reals).
pub fn validate_physical_size(width_mm: f64, depth_mm: f64) -> Result<(), CoreError> {
    if !(width_mm > 0.0 && depth_mm > 0.0) {
        return Err(CoreError::Validation(format!(
            "Physical size must be positive (got {width_mm}mm x {depth_mm}mm)"
        )));
    }
    Ok(())
}

/// Validate that a spacer mode string is one of the accepted values.
pub fn validate_spacer_mode(mode: &str) -> Result<(), CoreError> {
    if VALID_SPACER_MODES.contains(&mode) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid spacer mode '{mode}'. Must be one of: {}",
            VALID_SPACER_MODES.join(", ")
        )))
    }
}

/// Validate a rotation value in degrees.
pub fn validate_rotation(rotation: i32) -> Result<(), CoreError> {
    if VALID_ROTATIONS.contains(&rotation) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid rotation {rotation}. Must be one of: 0, 90, 180, 270"
        )))
    }
}

/// Validate a reference-image placement opacity value.
pub fn validate_opacity(opacity: f64) -> Result<(), CoreError> {
    if (0.0..=1.0).contains(&opacity) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Opacity must be within [0, 1] (got {opacity})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_valid_name_passes() {
        assert_eq!(normalized_name("Workshop drawer").unwrap(), "Workshop drawer");
    }

    #[test]
    fn test_name_padding_is_trimmed() {
        assert_eq!(normalized_name("  Workshop drawer  ").unwrap(), "Workshop drawer");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_matches!(normalized_name("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_overlong_name_rejected() {
        let name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert_matches!(normalized_name(&name), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_name_length_is_counted_in_chars() {
        // 200 multi-byte characters is within the limit even though the
        // UTF-8 encoding exceeds it in bytes.
        let name = "é".repeat(MAX_NAME_LENGTH);
        assert_eq!(normalized_name(&name).unwrap(), name);
    }

    #[test]
    fn test_grid_dimensions() {
        assert!(validate_grid(4, 4).is_ok());
        assert_matches!(validate_grid(0, 4), Err(CoreError::Validation(_)));
        assert_matches!(validate_grid(4, -1), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_physical_size() {
        assert!(validate_physical_size(168.0, 168.0).is_ok());
        assert_matches!(validate_physical_size(0.0, 168.0), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_physical_size(168.0, f64::NAN),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_spacer_modes() {
        for mode in VALID_SPACER_MODES {
            assert!(validate_spacer_mode(mode).is_ok());
        }
        assert_matches!(validate_spacer_mode("both"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_rotations() {
        for rotation in VALID_ROTATIONS {
            assert!(validate_rotation(*rotation).is_ok());
        }
        assert_matches!(validate_rotation(45), Err(CoreError::Validation(_)));
        assert_matches!(validate_rotation(360), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_opacity_bounds() {
        assert!(validate_opacity(0.0).is_ok());
        assert!(validate_opacity(1.0).is_ok());
        assert!(validate_opacity(0.5).is_ok());
        assert_matches!(validate_opacity(1.01), Err(CoreError::Validation(_)));
        assert_matches!(validate_opacity(-0.1), Err(CoreError::Validation(_)));
    }
}
