use actix_web::{web, App, HttpServer};
use clap::Parser;
use log::info;

use red_light_server::config::Config;
use red_light_server::game::SystemClock;
use red_light_server::routes;
use red_light_server::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::parse();
    let rules = config.rules()?;

    info!(
        "Starting red light server at http://{}:{} (goal {}, grace {} ms)",
        config.host, config.port, rules.goal, config.grace_period_ms
    );

    // Create shared application state
    let app_state: web::Data<AppState> = web::Data::new(AppState::new(rules, SystemClock));
    let static_dir = config.static_dir.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(|cfg| routes::configure_routes(cfg, &static_dir))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
