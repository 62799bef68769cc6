//! Project Records

use jiff::Timestamp;

use crate::{
    domain::{
        clients::records::ClientId, lifecycle::RecordState, projects::data::ProjectDetails,
    },
    ids::TypedId,
};

/// Project Id
pub type ProjectId = TypedId<ProjectRecord>;

/// Project Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub client: ClientId,
    pub details: ProjectDetails,
    pub state: RecordState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
