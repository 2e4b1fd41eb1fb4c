//! Client registry for the firm's back office.
//!
//! The heart of the crate is [`engine::FilterEngine`], which decides whether a
//! company is an active or inactive client of a service category on a given
//! day and composes that into the dashboards' multi-category filters. The
//! `server` feature wraps it in a small JSON API over a CSV export of the
//! companies table.

#[cfg(feature = "data")]
pub mod dates;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod engine;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod services;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use std::sync::Arc;

    use actix_cors::Cors;
    use actix_web::{App, HttpServer, middleware, web};

    use crate::models::config::ServerConfig;
    use crate::repository::CsvCompanyRepository;
    use crate::routes::api::SharedRepository;
    use crate::routes::configure;

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let engine = web::Data::new(server_config.filter.build_engine());
        log::info!(
            "Filtering {} categories, missing end date policy {:?}",
            engine.categories().len(),
            engine.missing_end()
        );

        let repo: Arc<SharedRepository> = Arc::new(
            CsvCompanyRepository::new(&server_config.companies_csv)
                .with_name_column(&server_config.name_column),
        );
        let repo = web::Data::from(repo);

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!("Serving companies from {}", server_config.companies_csv);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .app_data(engine.clone())
                .app_data(repo.clone())
                .configure(configure)
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
