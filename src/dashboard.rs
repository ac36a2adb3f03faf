//! Bootstrap: wires the session, both collections and both views together.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::api_client::ApiClient;
use crate::auth::session::SessionContext;
use crate::collection::{CollectionStatus, RemoteCollection};
use crate::models::{Resource, Room, User};
use crate::templates_structs::{DashboardTemplate, render_rooms, render_users};
use crate::views::{BoundView, UiEvent, ViewBinding, ViewUpdate};

pub const ROOMS_VIEW: ViewBinding = ViewBinding {
    page_label: "rooms",
    tab: "rooms-tab",
    region: "rooms",
};

pub const USERS_VIEW: ViewBinding = ViewBinding {
    page_label: "users",
    tab: "users-tab",
    region: "users",
};

/// Pending pushed updates per websocket before it starts lagging.
const UPDATE_BUFFER: usize = 64;

/// Page chrome decided once at bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub users_tab_visible: bool,
}

impl Layout {
    /// Hiding the users tab is cosmetic; `/api/users` must reject
    /// non-superusers on its own.
    pub fn for_session(session: &SessionContext) -> Self {
        Self { users_tab_visible: session.can_see_users_tab() }
    }
}

pub struct Dashboard {
    session: SessionContext,
    layout: Layout,
    rooms: Arc<BoundView<Room>>,
    users: Arc<BoundView<User>>,
    updates: broadcast::Sender<ViewUpdate>,
}

impl Dashboard {
    /// Build the dashboard once per process. Both views start fetching
    /// immediately; this returns before either fetch completes.
    ///
    /// Must be called from within the actix runtime.
    pub fn bootstrap(session: SessionContext, client: ApiClient) -> Self {
        let layout = Layout::for_session(&session);
        if !layout.users_tab_visible {
            log::info!("Hiding users tab for non-superuser '{}'", session.username);
        }

        let (updates, _) = broadcast::channel(UPDATE_BUFFER);

        let rooms = BoundView::new(
            ROOMS_VIEW,
            Arc::new(RemoteCollection::new(client.clone(), session.clone())),
            render_rooms,
            updates.clone(),
        );
        let users = BoundView::new(
            USERS_VIEW,
            Arc::new(RemoteCollection::new(client, session.clone())),
            render_users,
            updates.clone(),
        );

        log::info!("Dashboard bootstrapped for '{}'", session.username);
        Self { session, layout, rooms, users, updates }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn rooms(&self) -> &Arc<BoundView<Room>> {
        &self.rooms
    }

    pub fn users(&self) -> &Arc<BoundView<User>> {
        &self.users
    }

    /// Route a page event to every view that listens for it.
    pub fn dispatch(&self, event: &UiEvent) -> Vec<ViewUpdate> {
        [self.rooms.handle(event), self.users.handle(event)]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Background re-renders, for pushing to connected browsers.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewUpdate> {
        self.updates.subscribe()
    }

    /// Websocket connections currently receiving pushed updates.
    pub fn connected_clients(&self) -> usize {
        self.updates.receiver_count()
    }

    /// Start a refetch of the named collection. `false` if no such collection.
    pub fn refresh(&self, name: &str) -> bool {
        if name == Room::NAME {
            self.rooms.collection().spawn_fetch();
        } else if name == User::NAME {
            self.users.collection().spawn_fetch();
        } else {
            return false;
        }
        true
    }

    pub fn status(&self, name: &str) -> Option<CollectionStatus> {
        if name == Room::NAME {
            Some(self.rooms.collection().status())
        } else if name == User::NAME {
            Some(self.users.collection().status())
        } else {
            None
        }
    }

    /// The full page with whatever each region last rendered.
    pub fn page(&self) -> DashboardTemplate {
        DashboardTemplate {
            username: self.session.username.clone(),
            avatar_initial: self.session.avatar_initial(),
            users_tab_visible: self.layout.users_tab_visible,
            rooms_html: self.rooms.last_render().unwrap_or_default(),
            users_html: self.users.last_render().unwrap_or_default(),
        }
    }
}
