use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::Message;
use tokio::sync::broadcast::error::RecvError;

use crate::dashboard::Dashboard;

/// WebSocket upgrade handler. Pushes every background re-render as a JSON
/// `ViewUpdate`.
pub async fn ws_connect(
    req: HttpRequest,
    body: web::Payload,
    dashboard: web::Data<Dashboard>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, mut ws_session, mut msg_stream) = actix_ws::handle(&req, body)?;
    let mut updates = dashboard.subscribe();

    actix_web::rt::spawn(async move {
        loop {
            tokio::select! {
                update = updates.recv() => {
                    let update = match update {
                        Ok(update) => update,
                        Err(RecvError::Lagged(skipped)) => {
                            log::warn!("WebSocket client lagged, skipped {skipped} view updates");
                            continue;
                        }
                        Err(RecvError::Closed) => break,
                    };
                    let payload = match serde_json::to_string(&update) {
                        Ok(payload) => payload,
                        Err(e) => {
                            log::error!("Failed to encode view update: {e}");
                            continue;
                        }
                    };
                    if ws_session.text(payload).await.is_err() {
                        break;
                    }
                }
                msg = msg_stream.recv() => {
                    match msg {
                        Some(Ok(Message::Ping(bytes))) => {
                            if ws_session.pong(&bytes).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => break,
                        Some(Ok(Message::Text(_))) => {
                            // Clicks go through POST /tabs/{designator}/click
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            log::warn!("WebSocket protocol error: {e}");
                            break;
                        }
                    }
                }
            }
        }
        let _ = ws_session.close(None).await;
    });

    Ok(response)
}
