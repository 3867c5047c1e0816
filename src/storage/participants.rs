use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};

use crate::models::{Participant, ParticipantFields, RegistrationId};

/// Errors raised by the persistence boundary
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open database {path:?}: {source}")]
    Connect {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Trait for participant persistence
///
/// Write operations report the number of rows they touched; zero means the
/// id does not exist and is not treated as an error.
pub trait ParticipantStore {
    /// Insert a new row and return its assigned id
    fn create(&mut self, fields: &ParticipantFields) -> Result<RegistrationId, StoreError>;

    /// Exact-match lookup by id
    fn find_by_id(&self, id: RegistrationId) -> Result<Option<Participant>, StoreError>;

    /// Overwrite every column of the row with this id
    fn update(&mut self, id: RegistrationId, fields: &ParticipantFields)
    -> Result<usize, StoreError>;

    /// Remove the row with this id
    fn delete(&mut self, id: RegistrationId) -> Result<usize, StoreError>;

    /// Backend name (for logging/debugging)
    fn name(&self) -> &'static str;
}

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS Participants (
        RegistrationID INTEGER PRIMARY KEY AUTOINCREMENT,
        StudentName    TEXT NOT NULL,
        Faculty        TEXT,
        ProjectTitle   TEXT NOT NULL,
        ContactNumber  TEXT,
        EmailAddress   TEXT,
        ProjectImage   BLOB
    )";

const INSERT: &str = "INSERT INTO Participants \
    (StudentName, Faculty, ProjectTitle, ContactNumber, EmailAddress, ProjectImage) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_BY_ID: &str = "SELECT RegistrationID, StudentName, Faculty, ProjectTitle, \
    ContactNumber, EmailAddress, ProjectImage FROM Participants WHERE RegistrationID = ?1";

const UPDATE_BY_ID: &str = "UPDATE Participants SET StudentName = ?1, Faculty = ?2, \
    ProjectTitle = ?3, ContactNumber = ?4, EmailAddress = ?5, ProjectImage = ?6 \
    WHERE RegistrationID = ?7";

const DELETE_BY_ID: &str = "DELETE FROM Participants WHERE RegistrationID = ?1";

/// SQLite-backed implementation of ParticipantStore
/// Holds the single connection opened at startup
pub struct SqliteParticipantStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteParticipantStore {
    /// Open (or create) the database file and make sure the table exists
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            return Err(StoreError::Unavailable(format!(
                "database directory {:?} does not exist",
                parent
            )));
        }

        let conn = Connection::open(path).map_err(|source| StoreError::Connect {
            path: path.to_path_buf(),
            source,
        })?;

        conn.execute_batch(CREATE_TABLE)
            .map_err(|source| StoreError::Connect {
                path: path.to_path_buf(),
                source,
            })?;

        log::info!("Opened participant database at {:?}", path);

        Ok(SqliteParticipantStore {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database (used by tests)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CREATE_TABLE)?;
        Ok(SqliteParticipantStore { conn, path: None })
    }

    /// Close the connection, logging rather than propagating a failure
    pub fn close(self) {
        let path = self.path;
        match self.conn.close() {
            Ok(()) => log::info!("Closed participant database {:?}", path),
            Err((_conn, e)) => log::error!("Error closing database connection: {}", e),
        }
    }

    fn row_to_participant(row: &Row<'_>) -> rusqlite::Result<Participant> {
        // Columns written by other tools may be NULL
        let text = |idx: usize| -> rusqlite::Result<String> {
            Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
        };

        Ok(Participant {
            id: row.get(0)?,
            fields: ParticipantFields {
                student_name: text(1)?,
                faculty: text(2)?,
                project_title: text(3)?,
                contact_number: text(4)?,
                email_address: text(5)?,
                project_image: row.get(6)?,
            },
        })
    }
}

impl ParticipantStore for SqliteParticipantStore {
    fn create(&mut self, fields: &ParticipantFields) -> Result<RegistrationId, StoreError> {
        self.conn.execute(
            INSERT,
            params![
                fields.student_name,
                fields.faculty,
                fields.project_title,
                fields.contact_number,
                fields.email_address,
                fields.project_image,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        log::debug!("Inserted participant {} ({} image bytes)", id, fields.image_len());
        Ok(id)
    }

    fn find_by_id(&self, id: RegistrationId) -> Result<Option<Participant>, StoreError> {
        let participant = self
            .conn
            .query_row(SELECT_BY_ID, params![id], Self::row_to_participant)
            .optional()?;

        log::debug!("Lookup participant {}: found={}", id, participant.is_some());
        Ok(participant)
    }

    fn update(
        &mut self,
        id: RegistrationId,
        fields: &ParticipantFields,
    ) -> Result<usize, StoreError> {
        let affected = self.conn.execute(
            UPDATE_BY_ID,
            params![
                fields.student_name,
                fields.faculty,
                fields.project_title,
                fields.contact_number,
                fields.email_address,
                fields.project_image,
                id,
            ],
        )?;

        log::debug!("Updated participant {}: {} row(s)", id, affected);
        Ok(affected)
    }

    fn delete(&mut self, id: RegistrationId) -> Result<usize, StoreError> {
        let affected = self.conn.execute(DELETE_BY_ID, params![id])?;
        log::debug!("Deleted participant {}: {} row(s)", id, affected);
        Ok(affected)
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}
