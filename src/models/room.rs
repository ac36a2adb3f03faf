use serde::Deserialize;

use super::{MongoDate, Resource, ResourceId, default_true, null_as_true};
use crate::auth::session::SessionContext;

/// A chat room as listed by `GET /api/rooms`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Room {
    #[serde(rename = "_id", default)]
    pub id: Option<ResourceId>,
    /// `None` only between decoding and [`Resource::apply_defaults`], when the
    /// server sent no name or `null`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_visible: bool,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub is_open: bool,
    #[serde(default)]
    pub created: Option<MongoDate>,
}

impl Room {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn default_name(session: &SessionContext) -> String {
        format!("{} room", session.username)
    }
}

impl Resource for Room {
    const NAME: &'static str = "rooms";
    const ENDPOINT: &'static str = "/api/rooms";

    fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }

    fn placeholder(session: &SessionContext) -> Self {
        Room {
            id: None,
            name: Some(Room::default_name(session)),
            is_visible: true,
            is_open: true,
            created: None,
        }
    }

    fn apply_defaults(&mut self, session: &SessionContext) {
        if self.name.is_none() {
            self.name = Some(Room::default_name(session));
        }
    }
}
