pub mod participant;

pub use participant::{Participant, ParticipantFields, RegistrationId};
