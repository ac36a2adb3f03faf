use askama::Template;

use super::RegionStatus;
use super::filters;
use crate::collection::CollectionState;
use crate::models::{Resource, Room};

#[derive(Template)]
#[template(path = "rooms.html")]
pub struct RoomsTemplate<'a> {
    pub rooms: &'a [Room],
    pub status: RegionStatus,
}

/// Render function bound to the rooms view.
pub fn render_rooms(state: &CollectionState<Room>) -> askama::Result<String> {
    RoomsTemplate {
        rooms: state.items(),
        status: RegionStatus::of(Room::NAME, state),
    }
    .render()
}
