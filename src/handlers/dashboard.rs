use actix_web::{web, HttpResponse};

use crate::dashboard::Dashboard;
use crate::errors::{AppError, render};
use crate::views::UiEvent;

/// GET / - the page, with each region as last rendered.
pub async fn index(dashboard: web::Data<Dashboard>) -> Result<HttpResponse, AppError> {
    render(dashboard.page())
}

/// POST /tabs/{designator}/click - render every view bound to that tab.
pub async fn tab_click(
    dashboard: web::Data<Dashboard>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let event = UiEvent::TabClick(path.into_inner());
    let updates = dashboard.dispatch(&event);
    if updates.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(HttpResponse::Ok().json(updates))
}
