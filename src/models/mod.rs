pub mod mongo;
pub mod room;
pub mod user;

use std::fmt::Debug;

use serde::de::{Deserialize, DeserializeOwned, Deserializer};

use crate::auth::session::SessionContext;

pub use mongo::{MongoDate, ResourceId};
pub use room::Room;
pub use user::User;

/// A makechat document that can be listed through a remote collection.
pub trait Resource: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Collection name as shown in logs and status responses.
    const NAME: &'static str;
    /// API path the collection is fetched from.
    const ENDPOINT: &'static str;

    fn id(&self) -> Option<&ResourceId>;

    /// A local model standing in before server data arrives.
    fn placeholder(session: &SessionContext) -> Self;

    /// Fill attributes the server left out whose defaults depend on the session.
    fn apply_defaults(&mut self, _session: &SessionContext) {}

    /// Id as template text; empty for placeholders.
    fn id_label(&self) -> &str {
        self.id().map_or("", ResourceId::as_str)
    }
}

pub(crate) fn default_true() -> bool {
    true
}

/// Read an explicit `null` flag as if the attribute were missing.
pub(crate) fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

pub(crate) fn null_as_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_true))
}
