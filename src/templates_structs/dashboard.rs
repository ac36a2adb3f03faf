use askama::Template;

/// The full page: tab menu, page label and both regions.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub avatar_initial: String,
    pub users_tab_visible: bool,
    /// Pre-rendered, already-escaped region markup.
    pub rooms_html: String,
    pub users_html: String,
}
