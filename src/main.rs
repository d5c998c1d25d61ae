use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use mentor_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let client_url = config.client_url.clone();

    let state = AppState::new(config)
        .await
        .expect("failed to initialise application state");

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&client_url)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(handlers::create_chat)
            .service(handlers::append_to_chat)
            .service(handlers::get_chat)
            .service(handlers::get_user_chats)
            .service(handlers::generate_quiz)
            .service(handlers::evaluate_answer)
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::health_check_live)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
