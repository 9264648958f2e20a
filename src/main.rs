mod config;
mod emotion;
mod model;
mod random;
mod web;

use actix_web::{App, HttpServer, web::Data};
use dotenv::dotenv;
use log::{info, error};
use std::sync::{Arc, Mutex};
use std::collections::HashMap;

use config::Config;
use model::ResponseGenerator;
use random::ThreadRandom;
use web::routes;
use web::session::Sessions;

// App state structure
pub struct AppState {
    generator: ResponseGenerator,
    sessions: Sessions,
    max_sessions: usize,
}

impl AppState {
    fn new(generator: ResponseGenerator, max_sessions: usize) -> Self {
        Self {
            generator,
            sessions: Mutex::new(HashMap::new()),
            max_sessions,
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Freuda chat service");

    let config = Config::from_env();

    let generator = match ResponseGenerator::new(config.generator, Arc::new(ThreadRandom)) {
        Ok(generator) => generator,
        Err(e) => {
            error!("Failed to initialize response generator: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = Data::new(AppState::new(generator, config.max_sessions));

    info!("Listening on {}:{}", config.host, config.port);

    // Start web server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
