use serde::{Deserialize, Deserializer};

use super::{MongoDate, Resource, ResourceId, null_as_false};
use crate::auth::session::SessionContext;

pub const DEFAULT_USERNAME: &str = "username";
pub const DEFAULT_EMAIL: &str = "username@example.com";

/// A makechat account as listed by `GET /api/users`. Never carries the
/// password hash; the API does not send it and we would not keep it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: Option<ResourceId>,
    #[serde(default = "default_username", deserialize_with = "username_or_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_disabled: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_superuser: bool,
    #[serde(default = "default_email", deserialize_with = "email_or_default")]
    pub email: String,
    #[serde(default)]
    pub created: Option<MongoDate>,
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_email() -> String {
    DEFAULT_EMAIL.to_string()
}

fn username_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_username))
}

fn email_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_email))
}

impl Resource for User {
    const NAME: &'static str = "users";
    const ENDPOINT: &'static str = "/api/users";

    fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }

    fn placeholder(_session: &SessionContext) -> Self {
        User {
            id: None,
            username: default_username(),
            is_disabled: false,
            is_superuser: false,
            email: default_email(),
            created: None,
        }
    }
}
