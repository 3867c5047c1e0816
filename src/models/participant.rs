/// Store-assigned registration number (SQLite rowid)
pub type RegistrationId = i64;

/// Editable columns of a participant row
///
/// Text is kept exactly as typed. Only the required-field check trims.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantFields {
    pub student_name: String,
    pub faculty: String,
    pub project_title: String,
    pub contact_number: String,
    pub email_address: String,
    /// Raw encoded image bytes, stored without size or type checks
    pub project_image: Option<Vec<u8>>,
}

impl ParticipantFields {
    /// Create fields with the two required columns set
    pub fn new(student_name: impl Into<String>, project_title: impl Into<String>) -> Self {
        ParticipantFields {
            student_name: student_name.into(),
            project_title: project_title.into(),
            ..Default::default()
        }
    }

    /// Names of required columns that are blank, in form order
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.student_name.trim().is_empty() {
            missing.push("Student Name");
        }
        if self.project_title.trim().is_empty() {
            missing.push("Project Title");
        }
        missing
    }

    /// True when an image with at least one byte is attached
    pub fn has_image(&self) -> bool {
        self.project_image.as_ref().is_some_and(|data| !data.is_empty())
    }

    /// Size of the attached image in bytes (0 when absent)
    pub fn image_len(&self) -> usize {
        self.project_image.as_ref().map_or(0, Vec::len)
    }
}

/// One exhibition registrant as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: RegistrationId,
    pub fields: ParticipantFields,
}

impl Participant {
    /// Label/value pairs for plain-text display, image reduced to its size
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let image = if self.fields.has_image() {
            format!("{} bytes", self.fields.image_len())
        } else {
            "(none)".to_string()
        };

        vec![
            ("Registration ID", self.id.to_string()),
            ("Student Name", self.fields.student_name.clone()),
            ("Faculty", self.fields.faculty.clone()),
            ("Project Title", self.fields.project_title.clone()),
            ("Contact Number", self.fields.contact_number.clone()),
            ("Email Address", self.fields.email_address.clone()),
            ("Project Image", image),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_trims_whitespace() {
        let fields = ParticipantFields::new("   ", "Smart Bin");
        assert_eq!(fields.missing_required(), vec!["Student Name"]);

        let fields = ParticipantFields::new("", "\t");
        assert_eq!(fields.missing_required(), vec!["Student Name", "Project Title"]);

        let fields = ParticipantFields::new("Ana", "Smart Bin");
        assert!(fields.missing_required().is_empty());
    }

    #[test]
    fn test_empty_image_counts_as_absent() {
        let mut fields = ParticipantFields::new("Ana", "Smart Bin");
        assert!(!fields.has_image());

        fields.project_image = Some(Vec::new());
        assert!(!fields.has_image());
        assert_eq!(fields.image_len(), 0);

        fields.project_image = Some(vec![1, 2, 3]);
        assert!(fields.has_image());
        assert_eq!(fields.image_len(), 3);
    }

    #[test]
    fn test_summary_hides_image_bytes() {
        let participant = Participant {
            id: 7,
            fields: ParticipantFields {
                project_image: Some(vec![0; 42]),
                ..ParticipantFields::new("Ana", "Smart Bin")
            },
        };

        let summary = participant.summary();
        assert_eq!(summary[0], ("Registration ID", "7".to_string()));
        assert_eq!(summary[6], ("Project Image", "42 bytes".to_string()));
    }
}
