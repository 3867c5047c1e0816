use std::path::{Path, PathBuf};

use super::buffer::FormBuffer;
use super::error::FormError;
use super::outcome::Outcome;
use crate::image::read_image_file;
use crate::models::RegistrationId;
use crate::storage::ParticipantStore;

/// Delete that passed validation and awaits confirmation
///
/// Only the controller can create one, so a delete cannot skip validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRequest {
    id: RegistrationId,
}

impl DeleteRequest {
    pub fn id(&self) -> RegistrationId {
        self.id
    }
}

/// Application context for the form: the store plus the edit buffer
///
/// Each action validates the buffer, makes at most one store call, and
/// reflects the result back into the buffer.
pub struct FormController<S: ParticipantStore> {
    store: S,
    buffer: FormBuffer,
}

impl<S: ParticipantStore> FormController<S> {
    pub fn new(store: S) -> Self {
        log::debug!("Form controller using {} store", store.name());
        FormController {
            store,
            buffer: FormBuffer::new(),
        }
    }

    pub fn buffer(&self) -> &FormBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut FormBuffer {
        &mut self.buffer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back (used to close it on shutdown)
    pub fn into_store(self) -> S {
        self.store
    }

    /// Insert the buffer as a new participant, then clear the form
    pub fn register(&mut self) -> Result<Outcome, FormError> {
        self.buffer.check_required()?;

        let id = self.store.create(self.buffer.values())?;
        log::info!("Registered participant {}", id);

        self.buffer.reset(false);
        Ok(Outcome::Registered(id))
    }

    /// Load the participant named by the ID field
    /// A miss clears everything but the ID so it can be corrected
    pub fn search(&mut self) -> Result<Outcome, FormError> {
        let id = self.buffer.parsed_id()?;

        match self.store.find_by_id(id)? {
            Some(participant) => {
                log::info!("Loaded participant {}", id);
                self.buffer.load(participant);
                Ok(Outcome::Found(id))
            }
            None => {
                log::info!("No participant with id {}", id);
                self.buffer.reset(true);
                Ok(Outcome::NotFound(id))
            }
        }
    }

    /// Overwrite the stored row with the whole buffer
    pub fn update(&mut self) -> Result<Outcome, FormError> {
        let id = self.buffer.parsed_id()?;
        self.buffer.check_required()?;

        let affected = self.store.update(id, self.buffer.values())?;
        if affected == 0 {
            log::info!("Update matched no participant with id {}", id);
            return Ok(Outcome::UpdateMissed(id));
        }

        log::info!("Updated participant {}", id);
        Ok(Outcome::Updated(id))
    }

    /// Validate the ID field for deletion; nothing is removed yet
    pub fn request_delete(&self) -> Result<DeleteRequest, FormError> {
        let id = self.buffer.parsed_id()?;
        Ok(DeleteRequest { id })
    }

    /// Perform a delete the user has confirmed
    pub fn confirm_delete(&mut self, request: DeleteRequest) -> Result<Outcome, FormError> {
        let affected = self.store.delete(request.id)?;
        if affected == 0 {
            log::info!("Delete matched no participant with id {}", request.id);
            return Ok(Outcome::DeleteMissed(request.id));
        }

        log::info!("Deleted participant {}", request.id);
        self.buffer.reset(false);
        Ok(Outcome::Deleted(request.id))
    }

    /// Read an image file into the buffer as the pending image
    /// On failure the pending image is cleared
    pub fn upload(&mut self, path: &Path) -> Result<Outcome, FormError> {
        match read_image_file(path) {
            Ok(data) => {
                let bytes = data.len();
                self.buffer.set_pending_image(Some(data));
                log::info!("Attached image {:?} ({} bytes)", path, bytes);
                Ok(Outcome::ImageLoaded {
                    path: path.to_path_buf(),
                    bytes,
                })
            }
            Err(e) => {
                self.buffer.set_pending_image(None);
                Err(e.into())
            }
        }
    }

    /// Reset every field and the pending image
    pub fn reset(&mut self, preserve_id: bool) {
        self.buffer.reset(preserve_id);
    }

    /// User-facing clear, always including the ID field
    pub fn clear(&mut self) -> Outcome {
        self.reset(false);
        Outcome::Cleared
    }
}

/// Turn typed upload input into a path, expanding a leading `~/`
pub fn expand_upload_path(input: &str, home: Option<&Path>) -> PathBuf {
    let input = input.trim();
    match (input.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::buffer::Field;
    use crate::form::error::ValidationError;
    use crate::image::Preview;
    use crate::image::loader::sample_image_bytes;
    use crate::storage::{MemoryParticipantStore, SqliteParticipantStore};
    use image::ImageFormat;

    fn sqlite_form() -> FormController<SqliteParticipantStore> {
        FormController::new(SqliteParticipantStore::open_in_memory().unwrap())
    }

    fn fill<S: ParticipantStore>(form: &mut FormController<S>, name: &str, title: &str) {
        form.buffer_mut().set(Field::StudentName, name);
        form.buffer_mut().set(Field::ProjectTitle, title);
    }

    #[test]
    fn test_lifecycle_example() {
        let mut form = sqlite_form();

        fill(&mut form, "Ana", "Smart Bin");
        assert_eq!(form.register().unwrap(), Outcome::Registered(1));
        assert!(form.buffer().is_blank());

        form.buffer_mut().set(Field::RegistrationId, "1");
        assert_eq!(form.search().unwrap(), Outcome::Found(1));
        assert_eq!(form.buffer().get(Field::StudentName), "Ana");
        assert_eq!(form.buffer().get(Field::ProjectTitle), "Smart Bin");
        assert_eq!(form.buffer().get(Field::Faculty), "");
        assert!(form.buffer().pending_image().is_none());
        assert_eq!(form.buffer().preview(), &Preview::Absent);

        form.buffer_mut().set(Field::StudentName, "Ana K.");
        assert_eq!(form.update().unwrap(), Outcome::Updated(1));

        form.reset(true);
        assert_eq!(form.search().unwrap(), Outcome::Found(1));
        assert_eq!(form.buffer().get(Field::StudentName), "Ana K.");

        let request = form.request_delete().unwrap();
        assert_eq!(request.id(), 1);
        assert_eq!(form.confirm_delete(request).unwrap(), Outcome::Deleted(1));
        assert!(form.buffer().is_blank());

        form.buffer_mut().set(Field::RegistrationId, "1");
        assert_eq!(form.search().unwrap(), Outcome::NotFound(1));
    }

    #[test]
    fn test_register_requires_name_and_title() {
        let mut form = FormController::new(MemoryParticipantStore::new());
        form.buffer_mut().set(Field::StudentName, "Ana");
        form.buffer_mut().set(Field::ProjectTitle, "   ");

        let err = form.register().unwrap_err();
        assert!(matches!(
            err,
            FormError::Validation(ValidationError::MissingRequired(ref missing))
                if missing == &vec!["Project Title"]
        ));
        assert!(form.store().is_empty());
        // Buffer is left for the user to fix
        assert_eq!(form.buffer().get(Field::StudentName), "Ana");
    }

    #[test]
    fn test_register_ids_strictly_increase() {
        let mut form = sqlite_form();
        let mut last = 0;

        for i in 0..5 {
            fill(&mut form, &format!("Student {}", i), "Project");
            match form.register().unwrap() {
                Outcome::Registered(id) => {
                    assert!(id > last);
                    last = id;
                }
                other => panic!("unexpected outcome {:?}", other),
            }

            if i == 2 {
                form.buffer_mut().set(Field::RegistrationId, last.to_string());
                let request = form.request_delete().unwrap();
                form.confirm_delete(request).unwrap();
            }
        }
    }

    #[test]
    fn test_round_trip_with_image() {
        let mut form = sqlite_form();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prototype.png");
        let bytes = sample_image_bytes(6, 4, ImageFormat::Png);
        std::fs::write(&path, &bytes).unwrap();

        fill(&mut form, "Ana", "Smart Bin");
        form.buffer_mut().set(Field::Faculty, "Engineering");
        form.buffer_mut().set(Field::ContactNumber, "0400 000 000");
        form.buffer_mut().set(Field::EmailAddress, "ana@example.edu");
        let upload = form.upload(&path).unwrap();
        assert_eq!(
            upload,
            Outcome::ImageLoaded {
                path: path.clone(),
                bytes: bytes.len()
            }
        );
        assert!(form.buffer().preview().bitmap().is_some());
        let submitted = form.buffer().values().clone();

        let id = match form.register().unwrap() {
            Outcome::Registered(id) => id,
            other => panic!("unexpected outcome {:?}", other),
        };

        form.buffer_mut().set(Field::RegistrationId, id.to_string());
        form.search().unwrap();
        assert_eq!(form.buffer().values(), &submitted);
        assert_eq!(form.buffer().pending_image(), Some(bytes.as_slice()));
        assert!(form.buffer().preview().bitmap().is_some());
    }

    #[test]
    fn test_undecodable_stored_image_survives_update() {
        let mut store = SqliteParticipantStore::open_in_memory().unwrap();
        let mut fields = crate::models::ParticipantFields::new("Ana", "Smart Bin");
        fields.project_image = Some(b"garbage".to_vec());
        let id = store.create(&fields).unwrap();
        let mut form = FormController::new(store);

        form.buffer_mut().set(Field::RegistrationId, id.to_string());
        assert_eq!(form.search().unwrap(), Outcome::Found(id));
        assert_eq!(form.buffer().preview(), &Preview::Unreadable);
        assert_eq!(
            form.buffer().preview().placeholder(),
            Some("Image display error")
        );
        assert_eq!(form.buffer().pending_image(), Some(&b"garbage"[..]));

        form.buffer_mut().set(Field::Faculty, "Engineering");
        assert_eq!(form.update().unwrap(), Outcome::Updated(id));

        let stored = form.store().find_by_id(id).unwrap().unwrap();
        assert_eq!(stored.fields.project_image, Some(b"garbage".to_vec()));
        assert_eq!(stored.fields.faculty, "Engineering");
    }

    #[test]
    fn test_search_validation() {
        let mut form = FormController::new(MemoryParticipantStore::new());

        assert!(matches!(
            form.search(),
            Err(FormError::Validation(ValidationError::MissingId))
        ));

        form.buffer_mut().set(Field::RegistrationId, "abc");
        assert!(matches!(
            form.search(),
            Err(FormError::Validation(ValidationError::MalformedId(_)))
        ));
    }

    #[test]
    fn test_search_miss_keeps_only_id() {
        let mut form = FormController::new(MemoryParticipantStore::new());
        fill(&mut form, "Ana", "Smart Bin");
        form.buffer_mut().set_pending_image(Some(vec![9, 9]));
        form.buffer_mut().set(Field::RegistrationId, "77");

        assert_eq!(form.search().unwrap(), Outcome::NotFound(77));
        assert_eq!(form.buffer().get(Field::RegistrationId), "77");
        assert_eq!(form.buffer().get(Field::StudentName), "");
        assert!(form.buffer().pending_image().is_none());
    }

    #[test]
    fn test_update_unknown_id_leaves_store_unchanged() {
        let mut form = sqlite_form();
        fill(&mut form, "Ana", "Smart Bin");
        form.register().unwrap();

        fill(&mut form, "Ghost", "Nothing");
        form.buffer_mut().set(Field::RegistrationId, "99");
        assert_eq!(form.update().unwrap(), Outcome::UpdateMissed(99));

        form.buffer_mut().set(Field::RegistrationId, "1");
        form.search().unwrap();
        assert_eq!(form.buffer().get(Field::StudentName), "Ana");
    }

    #[test]
    fn test_update_requires_id_and_fields() {
        let mut form = FormController::new(MemoryParticipantStore::new());
        fill(&mut form, "Ana", "Smart Bin");
        assert!(matches!(
            form.update(),
            Err(FormError::Validation(ValidationError::MissingId))
        ));

        form.buffer_mut().set(Field::RegistrationId, "1");
        form.buffer_mut().set(Field::StudentName, "");
        assert!(matches!(
            form.update(),
            Err(FormError::Validation(ValidationError::MissingRequired(_)))
        ));
    }

    #[test]
    fn test_delete_missing_id_reports_miss_and_keeps_buffer() {
        let mut form = FormController::new(MemoryParticipantStore::new());
        fill(&mut form, "Ana", "Smart Bin");
        form.buffer_mut().set(Field::RegistrationId, "5");

        let request = form.request_delete().unwrap();
        assert_eq!(form.confirm_delete(request).unwrap(), Outcome::DeleteMissed(5));
        assert_eq!(form.buffer().get(Field::StudentName), "Ana");
    }

    #[test]
    fn test_delete_request_validates_id() {
        let mut form = FormController::new(MemoryParticipantStore::new());
        form.buffer_mut().set(Field::RegistrationId, "1.5");
        assert!(matches!(
            form.request_delete(),
            Err(FormError::Validation(ValidationError::MalformedId(_)))
        ));
    }

    #[test]
    fn test_store_failure_leaves_buffer_unchanged() {
        let mut store = MemoryParticipantStore::new();
        store.set_offline(true);
        let mut form = FormController::new(store);
        fill(&mut form, "Ana", "Smart Bin");
        form.buffer_mut().set(Field::RegistrationId, "3");
        form.buffer_mut().set_pending_image(Some(vec![1]));

        assert!(matches!(form.register(), Err(FormError::Store(_))));
        assert!(matches!(form.search(), Err(FormError::Store(_))));
        assert!(matches!(form.update(), Err(FormError::Store(_))));

        assert_eq!(form.buffer().get(Field::StudentName), "Ana");
        assert_eq!(form.buffer().get(Field::RegistrationId), "3");
        assert_eq!(form.buffer().pending_image(), Some(&[1u8][..]));
    }

    #[test]
    fn test_upload_failure_clears_pending_image() {
        let mut form = FormController::new(MemoryParticipantStore::new());
        form.buffer_mut().set_pending_image(Some(vec![1, 2, 3]));

        let dir = tempfile::tempdir().unwrap();
        let err = form.upload(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, FormError::File(_)));
        assert_eq!(err.title(), "File Error");
        assert!(form.buffer().pending_image().is_none());
        assert_eq!(form.buffer().preview(), &Preview::Empty);
    }

    #[test]
    fn test_upload_persists_nothing() {
        let mut form = FormController::new(MemoryParticipantStore::new());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.bmp");
        std::fs::write(&path, sample_image_bytes(2, 2, ImageFormat::Bmp)).unwrap();

        form.upload(&path).unwrap();
        assert!(form.store().is_empty());
    }

    #[test]
    fn test_clear_always_empties_form() {
        let mut form = FormController::new(MemoryParticipantStore::new());
        fill(&mut form, "Ana", "Smart Bin");
        form.buffer_mut().set(Field::RegistrationId, "4");
        form.buffer_mut().set_pending_image(Some(vec![1]));

        assert_eq!(form.clear(), Outcome::Cleared);
        assert!(form.buffer().is_blank());

        // Clearing an empty form is fine too
        form.clear();
        assert!(form.buffer().is_blank());
    }

    #[test]
    fn test_expand_upload_path() {
        let home = Path::new("/home/staff");
        assert_eq!(
            expand_upload_path(" ~/Pictures/bin.png ", Some(home)),
            PathBuf::from("/home/staff/Pictures/bin.png")
        );
        assert_eq!(
            expand_upload_path("~/bin.png", None),
            PathBuf::from("~/bin.png")
        );
        assert_eq!(
            expand_upload_path("/tmp/bin.png", Some(home)),
            PathBuf::from("/tmp/bin.png")
        );
    }
}
