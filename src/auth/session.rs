/// Who the dashboard is rendering for.
///
/// Passed explicitly to [`crate::dashboard::Dashboard::bootstrap`]. Hiding a
/// tab based on `is_superuser` is a convenience for the user only; the
/// makechat API decides what a session may actually read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub username: String,
    pub is_superuser: bool,
}

impl SessionContext {
    pub fn new(username: impl Into<String>, is_superuser: bool) -> Self {
        Self { username: username.into(), is_superuser }
    }

    /// Whether the privileged (users) tab should be shown.
    pub fn can_see_users_tab(&self) -> bool {
        self.is_superuser
    }

    pub fn avatar_initial(&self) -> String {
        self.username.chars().next().unwrap_or('?').to_uppercase().to_string()
    }
}
