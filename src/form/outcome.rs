use std::path::PathBuf;

use crate::models::RegistrationId;

/// Result of a completed form action
///
/// Misses (zero rows matched) are ordinary outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Registered(RegistrationId),
    Found(RegistrationId),
    NotFound(RegistrationId),
    Updated(RegistrationId),
    UpdateMissed(RegistrationId),
    Deleted(RegistrationId),
    DeleteMissed(RegistrationId),
    ImageLoaded { path: PathBuf, bytes: usize },
    Cleared,
}

impl Outcome {
    /// Short heading for the notice dialog
    pub fn title(&self) -> &'static str {
        match self {
            Outcome::Registered(_)
            | Outcome::Updated(_)
            | Outcome::Deleted(_)
            | Outcome::Cleared => "Success",
            Outcome::Found(_) | Outcome::NotFound(_) => "Search Result",
            Outcome::UpdateMissed(_) => "Update Failed",
            Outcome::DeleteMissed(_) => "Deletion Failed",
            Outcome::ImageLoaded { .. } => "Image Upload",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::Registered(id) => {
                format!("Participant registered successfully with ID: {}", id)
            }
            Outcome::Found(id) => format!("Loaded participant {}", id),
            Outcome::NotFound(id) => format!("No participant found with ID: {}", id),
            Outcome::Updated(id) => format!("Participant record {} updated successfully!", id),
            Outcome::UpdateMissed(id) => {
                format!("Update failed. No participant found with ID: {}", id)
            }
            Outcome::Deleted(id) => format!("Record {} deleted successfully.", id),
            Outcome::DeleteMissed(id) => {
                format!("Deletion failed. No record found with ID: {}", id)
            }
            Outcome::ImageLoaded { path, bytes } => format!(
                "Loaded {} ({} bytes). Register or Update to save.",
                path.display(),
                bytes
            ),
            Outcome::Cleared => "Form cleared".to_string(),
        }
    }
}
