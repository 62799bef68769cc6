//! Client Records

use jiff::Timestamp;

use crate::{
    domain::{clients::data::ClientDetails, lifecycle::RecordState},
    ids::TypedId,
};

/// Client Id
pub type ClientId = TypedId<ClientRecord>;

/// Client Record
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRecord {
    pub id: ClientId,
    pub details: ClientDetails,
    pub state: RecordState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
