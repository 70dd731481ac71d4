//! Wardrobe: a clothing inventory with an Actix-web JSON API and a client-side
//! list store that keeps a local copy of the collection in sync with it.

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, dev::Server, middleware, web};

#[cfg(feature = "server")]
use crate::db::{establish_connection_pool, run_migrations};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "server")]
pub mod db;
pub mod domain;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

/// Opens the database, applies pending migrations and returns the repository
/// shared by every worker.
#[cfg(feature = "server")]
pub fn prepare_repository(database_url: &str) -> std::io::Result<DieselRepository> {
    let pool = establish_connection_pool(database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let applied = run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;
    if applied > 0 {
        log::info!("Applied {applied} database migrations");
    }

    Ok(DieselRepository::new(pool))
}

/// Builds the HTTP server around an already bound listener.
#[cfg(feature = "server")]
pub fn build_server(
    listener: std::net::TcpListener,
    repo: DieselRepository,
    static_dir: Option<String>,
) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let mut app = App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .configure(routes::configure);

        if let Some(dir) = &static_dir {
            app = app.service(Files::new("/static", dir));
        }

        app
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = prepare_repository(&server_config.database_url)?;

    let listener =
        std::net::TcpListener::bind((server_config.address.as_str(), server_config.port))?;
    log::info!("Listening on {}", listener.local_addr()?);

    build_server(listener, repo, server_config.static_dir)?.await
}
