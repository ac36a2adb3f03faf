use actix_web::{web, HttpResponse};

use crate::dashboard::Dashboard;
use crate::errors::AppError;

/// GET /collections/{name} - load state of one collection.
pub async fn status(
    dashboard: web::Data<Dashboard>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let status = dashboard.status(&path).ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(status))
}

/// POST /collections/{name}/refresh - refetch in the background. The new
/// state reaches the page through the websocket.
pub async fn refresh(
    dashboard: web::Data<Dashboard>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    if !dashboard.refresh(&path) {
        return Err(AppError::NotFound);
    }
    log::info!("Refresh of {} requested", path.as_str());
    Ok(HttpResponse::Accepted().finish())
}
