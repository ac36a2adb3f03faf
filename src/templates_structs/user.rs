use askama::Template;

use super::RegionStatus;
use super::filters;
use crate::collection::CollectionState;
use crate::models::{Resource, User};

#[derive(Template)]
#[template(path = "users.html")]
pub struct UsersTemplate<'a> {
    pub users: &'a [User],
    pub status: RegionStatus,
}

/// Render function bound to the users view.
pub fn render_users(state: &CollectionState<User>) -> askama::Result<String> {
    UsersTemplate {
        users: state.items(),
        status: RegionStatus::of(User::NAME, state),
    }
    .render()
}
