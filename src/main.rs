use actix_web::{App, HttpServer, middleware, web};

use makechat_admin::api_client::ApiClient;
use makechat_admin::config::AppConfig;
use makechat_admin::dashboard::Dashboard;
use makechat_admin::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let client = ApiClient::new(&config.api_url, config.timeout).map_err(std::io::Error::other)?;

    // Upstream session: an explicit cookie wins, otherwise log in with the password if given
    let client = match (&config.session_cookie, &config.password) {
        (Some(cookie), _) => client.with_session(Some(cookie.clone())),
        (None, Some(password)) => {
            let cookie = client
                .login(&config.username, password)
                .await
                .map_err(std::io::Error::other)?;
            log::info!("Logged in to {} as '{}'", config.api_url, config.username);
            client.with_session(Some(cookie))
        }
        (None, None) => {
            log::warn!("No MAKECHAT_SESSION or MAKECHAT_PASSWORD set, API requests are anonymous");
            client
        }
    };

    if client.has_session() {
        match client.check_session().await {
            Ok(true) => log::info!("makechat session accepted"),
            Ok(false) => log::warn!("makechat API rejected the session, lists will fail with 401"),
            Err(e) => log::warn!("Could not verify makechat session: {e}"),
        }
    }

    let dashboard = web::Data::new(Dashboard::bootstrap(config.session_context(), client));
    let static_dir = config.static_dir.clone();

    log::info!("Starting dashboard at http://{}", config.bind);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(dashboard.clone())
            .service(actix_files::Files::new("/static", &static_dir))
            .configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(&config.bind)?
    .run()
    .await
}
