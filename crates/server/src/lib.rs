//! HTTP surface for the teller session service.
//!
//! Wires the postgres-backed [`Gateway`] into an actix-web app: sign-up
//! and sign-in under `/auth`, a database-backed liveness probe, and
//! schema creation at startup. Policy lives in teller-auth; this crate
//! only routes.

mod config;

pub use config::Config;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;
use teller_auth::Account;
use teller_auth::Argon2id;
use teller_auth::Gateway;
use teller_auth::Session;
use teller_auth::SessionManager;
use tokio_postgres::Client;

async fn index() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "message": "teller session service" }))
}

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

#[rustfmt::skip]
pub async fn run(config: Config) -> anyhow::Result<()> {
    let client = teller_pg::db(&config.database_url).await?;
    teller_pg::ensure::<Account>(&client).await?;
    teller_pg::ensure::<Session>(&client).await?;
    let teller = web::Data::new(Gateway::new(
        client.clone(),
        SessionManager::new(client.clone(), config.session_ttl),
        Argon2id,
    ));
    let client = web::Data::new(client);
    log::info!("listening on {}", config.bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(teller.clone())
            .app_data(client.clone())
            .route("/", web::get().to(index))
            .route("/health", web::get().to(health))
            .service(
                web::scope("/auth")
                    .route("/signup", web::post().to(teller_auth::signup))
                    .route("/signin", web::post().to(teller_auth::signin)),
            )
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await?;
    Ok(())
}
