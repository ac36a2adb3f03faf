pub mod collection_handlers;
pub mod dashboard;
pub mod ws;

use actix_web::web;

/// Dashboard routes. Expects `web::Data<Dashboard>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(dashboard::index))
        .route("/tabs/{designator}/click", web::post().to(dashboard::tab_click))
        .route("/collections/{name}", web::get().to(collection_handlers::status))
        .route("/collections/{name}/refresh", web::post().to(collection_handlers::refresh))
        .route("/ws", web::get().to(ws::ws_connect));
}
