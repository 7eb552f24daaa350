//! Internship tracks offered in the track picker.
//!
//! A track only changes the wording of the opening question. Any non-empty
//! string is accepted; these are the ones the picker suggests.

use crate::errors::AppError;

pub const KNOWN_TRACKS: &[&str] = &[
    "Desarrollo de Software",
    "Marketing Digital",
    "Análisis de Datos",
    "Finanzas",
    "Recursos Humanos",
];

pub fn default_track() -> &'static str {
    KNOWN_TRACKS[0]
}

/// Resolves an optional client-supplied track. Missing means the default,
/// blank is rejected, anything else is trimmed and kept verbatim.
pub fn resolve_track(requested: Option<&str>) -> Result<String, AppError> {
    match requested {
        None => Ok(default_track().to_string()),
        Some(t) if t.trim().is_empty() => {
            Err(AppError::Validation("track cannot be empty".to_string()))
        }
        Some(t) => Ok(t.trim().to_string()),
    }
}
