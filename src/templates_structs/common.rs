use askama::Template;

use crate::collection::CollectionState;
use crate::models::MongoDate;

/// Shown in place of a region whose template failed; also the last resort
/// if the panel itself cannot render.
const FALLBACK_PANEL: &str =
    r#"<div class="ui negative message" data-state="error">This view is unavailable.</div>"#;

/// Loading/failure banner rendered above every collection region.
pub struct RegionStatus {
    pub collection: &'static str,
    pub loading: bool,
    pub failed: bool,
    pub stale: bool,
    pub fetched_at: Option<MongoDate>,
}

impl RegionStatus {
    pub fn of<T>(collection: &'static str, state: &CollectionState<T>) -> Self {
        Self {
            collection,
            loading: state.is_loading(),
            failed: state.is_failed(),
            stale: state.is_stale(),
            fetched_at: state.snapshot().map(|s| MongoDate::from(s.fetched_at())),
        }
    }
}

#[derive(Template)]
#[template(path = "error_panel.html")]
pub struct ErrorPanelTemplate {
    pub region: &'static str,
}

/// Generic error panel for a region. Never includes error details.
pub fn error_panel(region: &'static str) -> String {
    ErrorPanelTemplate { region }
        .render()
        .unwrap_or_else(|_| FALLBACK_PANEL.to_string())
}
