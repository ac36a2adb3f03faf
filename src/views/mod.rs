//! Bound views: a page region rendered from one remote collection.
//!
//! A view renders when its tab is clicked and again whenever its collection
//! changes state, so data that arrives after the click still reaches the
//! page.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use tokio::sync::broadcast;

use crate::collection::{CollectionState, RemoteCollection};
use crate::models::Resource;
use crate::templates_structs::error_panel;

/// Renders a collection state into region markup.
pub type RenderFn<T> = fn(&CollectionState<T>) -> askama::Result<String>;

/// Where a view lives on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewBinding {
    /// Text written into the `current-page` label on tab click.
    pub page_label: &'static str,
    /// Id of the tab designator whose click renders the view.
    pub tab: &'static str,
    /// Id of the element whose content the view owns.
    pub region: &'static str,
}

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    TabClick(String),
}

/// Replacement markup for one region, as sent to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewUpdate {
    pub region: &'static str,
    /// Set on tab clicks only; background re-renders leave the label alone.
    pub page_label: Option<&'static str>,
    pub html: String,
}

pub struct BoundView<T: Resource> {
    binding: ViewBinding,
    collection: Arc<RemoteCollection<T>>,
    render_fn: RenderFn<T>,
    rendered: RwLock<Option<String>>,
    updates: broadcast::Sender<ViewUpdate>,
}

impl<T: Resource> BoundView<T> {
    /// Bind a view, subscribe it to its collection and kick off the first
    /// fetch. Does not wait for the fetch.
    pub fn new(
        binding: ViewBinding,
        collection: Arc<RemoteCollection<T>>,
        render_fn: RenderFn<T>,
        updates: broadcast::Sender<ViewUpdate>,
    ) -> Arc<Self> {
        let view = Arc::new(Self {
            binding,
            collection,
            render_fn,
            rendered: RwLock::new(None),
            updates,
        });
        view.spawn_auto_render();
        view.collection.spawn_fetch();
        view
    }

    pub fn binding(&self) -> ViewBinding {
        self.binding
    }

    pub fn collection(&self) -> &Arc<RemoteCollection<T>> {
        &self.collection
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered.read().map(|r| r.is_some()).unwrap_or(false)
    }

    /// Markup of the most recent render, if the view has rendered at all.
    pub fn last_render(&self) -> Option<String> {
        self.rendered.read().ok().and_then(|r| r.clone())
    }

    /// Render if the event is a click on this view's tab.
    pub fn handle(&self, event: &UiEvent) -> Option<ViewUpdate> {
        match event {
            UiEvent::TabClick(designator) if designator == self.binding.tab => Some(self.render()),
            UiEvent::TabClick(_) => None,
        }
    }

    /// Tab-click render: set the page label and replace the region with the
    /// current collection state.
    pub fn render(&self) -> ViewUpdate {
        ViewUpdate {
            region: self.binding.region,
            page_label: Some(self.binding.page_label),
            html: self.render_region(),
        }
    }

    fn render_region(&self) -> String {
        let state = self.collection.state();
        let html = match (self.render_fn)(&state) {
            Ok(html) => html,
            Err(e) => {
                log::error!("Rendering {} failed: {e}", self.binding.region);
                error_panel(self.binding.region)
            }
        };
        if let Ok(mut rendered) = self.rendered.write() {
            *rendered = Some(html.clone());
        }
        html
    }

    /// Re-render on each collection state transition and publish the result.
    fn spawn_auto_render(self: &Arc<Self>) {
        let mut changes = self.collection.subscribe();
        let view = Arc::downgrade(self);
        actix_web::rt::spawn(async move {
            while changes.changed().await.is_ok() {
                let Some(view) = view.upgrade() else { break };
                let update = ViewUpdate {
                    region: view.binding.region,
                    page_label: None,
                    html: view.render_region(),
                };
                log::debug!("Re-rendered {} after collection change", update.region);
                // No receivers just means no browser is connected.
                let _ = view.updates.send(update);
            }
        });
    }
}
