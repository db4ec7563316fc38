use actix_web::middleware::Logger;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use env_logger::Env;
use msgboard::config::Config;
use msgboard::cors;
use msgboard::db::Db;
use msgboard::routes::messages;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Init logger to show info by default, but can be overridden by RUST_LOG
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cfg = Config::from_env().context("bad configuration")?;

    // Startup is all-or-nothing: an unreachable store or a failed
    // migration exits with a diagnostic instead of serving degraded.
    let db = Db::connect_and_migrate(&cfg)
        .await
        .context("database init failed")?;

    log::info!("starting server at {}", cfg.listen);

    let listen_addr = cfg.listen.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors::Cors)
            .app_data(Data::new(db.clone()))
            .route("/messages", web::post().to(messages::post_message))
            .route("/messages", web::get().to(messages::list_messages))
            .route("/messages/count", web::get().to(messages::count_messages))
    })
    .bind(listen_addr)?
    .run()
    .await?;

    Ok(())
}
