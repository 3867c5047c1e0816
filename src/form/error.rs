use crate::image::FileError;
use crate::storage::StoreError;

/// Input rejected before any store call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{} required.", describe_missing(.0))]
    MissingRequired(Vec<&'static str>),

    #[error("Please enter a Registration ID.")]
    MissingId,

    #[error("Invalid Registration ID '{0}'. Please enter a number.")]
    MalformedId(String),
}

fn describe_missing(labels: &[&str]) -> String {
    match labels {
        [single] => format!("{} is", single),
        _ => format!("{} are", labels.join(" and ")),
    }
}

/// Failure of a single form action
///
/// None of these end the session; the action is abandoned and reported.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    File(#[from] FileError),
}

impl FormError {
    /// Short heading for the notice dialog
    pub fn title(&self) -> &'static str {
        match self {
            FormError::Validation(_) => "Input Error",
            FormError::Store(_) => "Database Error",
            FormError::File(_) => "File Error",
        }
    }

    /// Level for the log record of a reported error
    ///
    /// Below the default flash level; the notice dialog already shows the error.
    pub fn log_level(&self) -> log::Level {
        match self {
            FormError::Validation(_) => log::Level::Debug,
            FormError::Store(_) | FormError::File(_) => log::Level::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_message() {
        let both = ValidationError::MissingRequired(vec!["Student Name", "Project Title"]);
        assert_eq!(both.to_string(), "Student Name and Project Title are required.");

        let one = ValidationError::MissingRequired(vec!["Project Title"]);
        assert_eq!(one.to_string(), "Project Title is required.");
    }

    #[test]
    fn test_error_titles() {
        let err = FormError::from(ValidationError::MissingId);
        assert_eq!(err.title(), "Input Error");
        assert_eq!(err.to_string(), "Please enter a Registration ID.");

        let err = FormError::from(StoreError::Unavailable("offline".to_string()));
        assert_eq!(err.title(), "Database Error");
    }

    #[test]
    fn test_reported_errors_stay_out_of_status_bar() {
        let config = crate::storage::GeneralConfig::default();
        let flash_level = crate::logging::parse_level(&config.flash_level);

        let errors = [
            FormError::from(ValidationError::MissingId),
            FormError::from(StoreError::Unavailable("offline".to_string())),
            FormError::from(FileError::UnsupportedExtension {
                path: "notes.txt".into(),
            }),
        ];
        for err in errors {
            assert!(err.log_level() > flash_level, "{} would flash", err);
        }
    }
}
