//! View rendering tests: templates, escaping, failure banners and the
//! automatic re-render when a collection changes.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::broadcast;

use makechat_admin::collection::{CollectionState, RemoteCollection, Snapshot};
use makechat_admin::dashboard::{ROOMS_VIEW, USERS_VIEW};
use makechat_admin::errors::FetchError;
use makechat_admin::models::{MongoDate, ResourceId, Room, User};
use makechat_admin::templates_structs::{render_rooms, render_users};
use makechat_admin::views::{BoundView, UiEvent, ViewUpdate};
use common::*;

fn room(id: &str, name: &str) -> Room {
    Room {
        id: Some(ResourceId::new(id)),
        name: Some(name.to_string()),
        is_visible: true,
        is_open: false,
        created: None,
    }
}

fn ready<T>(items: Vec<T>) -> CollectionState<T> {
    CollectionState::Ready(Snapshot::new(items))
}

fn broken(_: &CollectionState<Room>) -> askama::Result<String> {
    Err(askama::Error::Custom("template exploded: /srv/secret/path".into()))
}

async fn next_update(rx: &mut broadcast::Receiver<ViewUpdate>) -> ViewUpdate {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("no view update in time")
        .expect("update channel closed")
}

#[test]
fn test_render_is_idempotent() {
    let state = ready(vec![room("1", "lobby"), room("2", "offtopic")]);
    let first = render_rooms(&state).expect("render failed");
    let second = render_rooms(&state).expect("render failed");
    assert_eq!(first, second);
    assert!(first.contains("lobby"));
    assert!(first.find("lobby") < first.find("offtopic"));
}

#[test]
fn test_room_name_is_escaped() {
    let state = ready(vec![room("1", "<script>alert(1)</script>")]);
    let html = render_rooms(&state).expect("render failed");
    assert!(!html.contains("<script>"));
    assert!(html.contains("alert(1)"));
    assert!(html.contains("&lt;script") || html.contains("&#60;script"));
}

#[test]
fn test_empty_users_render_an_empty_list() {
    let html = render_users(&ready(Vec::<User>::new())).expect("render failed");
    assert!(html.contains(r#"data-collection="users""#));
    assert!(html.contains("No users."));
    assert!(!html.contains(r#"data-state="error""#));
    assert!(!html.contains(r#"data-state="failed""#));
}

#[test]
fn test_created_date_is_formatted() {
    let mut lobby = room("1", "lobby");
    lobby.created = MongoDate::from_millis(1_500_000_000_000);
    let html = render_rooms(&ready(vec![lobby])).expect("render failed");
    assert!(html.contains("2017-07-14 02:40"));
}

#[test]
fn test_loading_state_shows_loader_and_previous_items() {
    let state = CollectionState::Loading { previous: Some(Snapshot::new(vec![room("1", "lobby")])) };
    let html = render_rooms(&state).expect("render failed");
    assert!(html.contains(r#"data-state="loading""#));
    assert!(html.contains("lobby"));
}

#[test]
fn test_stale_state_shows_banner_retry_and_data() {
    let state = CollectionState::Failed {
        error: FetchError::Network("connection refused".to_string()),
        last_good: Some(Snapshot::new(vec![room("1", "lobby")])),
    };
    let html = render_rooms(&state).expect("render failed");
    assert!(html.contains(r#"data-state="failed""#));
    assert!(html.contains(r#"data-refresh="rooms""#));
    assert!(html.contains("Showing data from"));
    assert!(html.contains("lobby"));
    assert!(!html.contains("connection refused"));
}

#[actix_web::test]
async fn test_template_failure_renders_generic_panel() {
    let (tx, _rx) = broadcast::channel(8);
    let collection = Arc::new(RemoteCollection::<Room>::new(dead_client(), admin_session()));
    let view = BoundView::new(ROOMS_VIEW, collection, broken, tx);

    let update = view.render();
    assert!(update.html.contains(r#"data-state="error""#));
    assert!(!update.html.contains("/srv/secret/path"));
}

#[actix_web::test]
async fn test_view_ignores_other_tabs() {
    let (tx, _rx) = broadcast::channel(8);
    let collection = Arc::new(RemoteCollection::<Room>::new(dead_client(), admin_session()));
    let view = BoundView::new(ROOMS_VIEW, collection, render_rooms, tx);

    assert!(view.handle(&UiEvent::TabClick(USERS_VIEW.tab.to_string())).is_none());
    assert!(!view.is_rendered());

    let update = view
        .handle(&UiEvent::TabClick("rooms-tab".to_string()))
        .expect("rooms tab click ignored");
    assert_eq!(update.region, "rooms");
    assert_eq!(update.page_label, Some("rooms"));
    assert!(view.is_rendered());
    assert_eq!(view.last_render().as_deref(), Some(update.html.as_str()));
}

#[actix_web::test]
async fn test_click_before_fetch_then_auto_rerender() {
    let api = StubApi::start();
    api.route("/api/rooms", envelope(json!([{"_id": "1", "name": "Alice room"}])));

    let (tx, mut rx) = broadcast::channel(8);
    let collection = Arc::new(RemoteCollection::<Room>::new(api.client(), admin_session()));
    let view = BoundView::new(ROOMS_VIEW, Arc::clone(&collection), render_rooms, tx);

    // The initial fetch has not run yet: the click renders an empty region
    let early = view.handle(&UiEvent::TabClick("rooms-tab".to_string())).expect("click ignored");
    assert!(!early.html.contains("Alice room"));

    // Data arriving later is pushed without another click
    let pushed = loop {
        let update = next_update(&mut rx).await;
        if update.html.contains("Alice room") {
            break update;
        }
    };
    assert_eq!(pushed.region, "rooms");
    assert_eq!(pushed.page_label, None);
    assert_eq!(view.last_render().as_deref(), Some(pushed.html.as_str()));
    assert_eq!(collection.len(), 1);
}
