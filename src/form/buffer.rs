use crate::image::Preview;
use crate::models::{Participant, ParticipantFields, RegistrationId};

use super::error::ValidationError;

/// Text inputs on the form, in tab order
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    #[default]
    RegistrationId,
    StudentName,
    Faculty,
    ProjectTitle,
    ContactNumber,
    EmailAddress,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::RegistrationId,
        Field::StudentName,
        Field::Faculty,
        Field::ProjectTitle,
        Field::ContactNumber,
        Field::EmailAddress,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::RegistrationId => "Registration ID",
            Field::StudentName => "Student Name",
            Field::Faculty => "Faculty",
            Field::ProjectTitle => "Project Title",
            Field::ContactNumber => "Contact Number",
            Field::EmailAddress => "Email Address",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Field::StudentName | Field::ProjectTitle)
    }

    fn index(self) -> usize {
        Field::ALL.iter().position(|&f| f == self).unwrap_or(0)
    }

    /// Next field, wrapping to the top
    pub fn next(self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    /// Previous field, wrapping to the bottom
    pub fn prev(self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

/// Transient edit buffer mirroring at most one participant
#[derive(Debug, Clone, Default)]
pub struct FormBuffer {
    registration_id: String,
    values: ParticipantFields,
    preview: Preview,
}

impl FormBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::RegistrationId => &self.registration_id,
            Field::StudentName => &self.values.student_name,
            Field::Faculty => &self.values.faculty,
            Field::ProjectTitle => &self.values.project_title,
            Field::ContactNumber => &self.values.contact_number,
            Field::EmailAddress => &self.values.email_address,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::RegistrationId => self.registration_id = value,
            Field::StudentName => self.values.student_name = value,
            Field::Faculty => self.values.faculty = value,
            Field::ProjectTitle => self.values.project_title = value,
            Field::ContactNumber => self.values.contact_number = value,
            Field::EmailAddress => self.values.email_address = value,
        }
    }

    /// Column values as they would be written, pending image included
    pub fn values(&self) -> &ParticipantFields {
        &self.values
    }

    pub fn pending_image(&self) -> Option<&[u8]> {
        self.values.project_image.as_deref()
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Replace the pending image and rebuild the preview from it
    pub fn set_pending_image(&mut self, data: Option<Vec<u8>>) {
        self.preview = match &data {
            Some(bytes) => Preview::from_bytes(bytes),
            None => Preview::Empty,
        };
        self.values.project_image = data;
    }

    /// Parse the Registration ID field
    pub fn parsed_id(&self) -> Result<RegistrationId, ValidationError> {
        let text = self.registration_id.trim();
        if text.is_empty() {
            return Err(ValidationError::MissingId);
        }
        text.parse::<RegistrationId>()
            .map_err(|_| ValidationError::MalformedId(text.to_string()))
    }

    /// Fail when a required column is blank
    pub fn check_required(&self) -> Result<(), ValidationError> {
        let missing = self.values.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingRequired(missing))
        }
    }

    /// Mirror a stored row, image and preview included
    pub fn load(&mut self, participant: Participant) {
        self.registration_id = participant.id.to_string();
        self.preview = match participant.fields.project_image.as_deref() {
            Some(bytes) => Preview::from_bytes(bytes),
            None => Preview::Absent,
        };
        self.values = participant.fields;
    }

    /// Clear every field and the pending image
    /// With `preserve_id` the Registration ID field is left as typed
    pub fn reset(&mut self, preserve_id: bool) {
        if !preserve_id {
            self.registration_id.clear();
        }
        self.values = ParticipantFields::default();
        self.preview = Preview::Empty;
    }

    /// True when no field has text and no image is pending
    #[cfg(test)]
    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|&f| self.get(f).is_empty()) && self.pending_image().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormBuffer {
        let mut buffer = FormBuffer::new();
        for field in Field::ALL {
            buffer.set(field, format!("{} value", field.label()));
        }
        buffer.set_pending_image(Some(vec![1, 2, 3]));
        buffer
    }

    #[test]
    fn test_field_navigation_wraps() {
        assert_eq!(Field::RegistrationId.next(), Field::StudentName);
        assert_eq!(Field::EmailAddress.next(), Field::RegistrationId);
        assert_eq!(Field::RegistrationId.prev(), Field::EmailAddress);
        assert_eq!(Field::ProjectTitle.prev(), Field::Faculty);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut buffer = filled();
        buffer.reset(false);

        assert!(buffer.is_blank());
        assert_eq!(buffer.preview(), &Preview::Empty);
    }

    #[test]
    fn test_reset_preserving_id() {
        let mut buffer = filled();
        buffer.set(Field::RegistrationId, "42");
        buffer.reset(true);

        assert_eq!(buffer.get(Field::RegistrationId), "42");
        for field in Field::ALL.into_iter().skip(1) {
            assert_eq!(buffer.get(field), "", "{:?} should be empty", field);
        }
        assert!(buffer.pending_image().is_none());
    }

    #[test]
    fn test_parsed_id() {
        let mut buffer = FormBuffer::new();
        assert_eq!(buffer.parsed_id(), Err(ValidationError::MissingId));

        buffer.set(Field::RegistrationId, "  12 ");
        assert_eq!(buffer.parsed_id(), Ok(12));

        buffer.set(Field::RegistrationId, "12a");
        assert_eq!(
            buffer.parsed_id(),
            Err(ValidationError::MalformedId("12a".to_string()))
        );
    }

    #[test]
    fn test_load_without_image_shows_absent() {
        let mut buffer = filled();
        buffer.load(Participant {
            id: 3,
            fields: ParticipantFields::new("Ana", "Smart Bin"),
        });

        assert_eq!(buffer.get(Field::RegistrationId), "3");
        assert_eq!(buffer.get(Field::Faculty), "");
        assert!(buffer.pending_image().is_none());
        assert_eq!(buffer.preview(), &Preview::Absent);
    }

    #[test]
    fn test_undecodable_upload_keeps_bytes() {
        let mut buffer = FormBuffer::new();
        buffer.set_pending_image(Some(b"not an image".to_vec()));

        assert_eq!(buffer.pending_image(), Some(&b"not an image"[..]));
        assert_eq!(buffer.preview(), &Preview::Unreadable);
    }
}
