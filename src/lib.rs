pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;
pub mod state;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::Config;
pub use db::{create_pool, DbPool, PoolOptions};

use handlers::{catalog, customers, orders, promo_codes, staff, stocks, stores};
use openapi::ApiDoc;
use state::AppState;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    for version in applied {
        log::info!("applied migration {}", version);
    }
    Ok(())
}

/// Registers every API route. Literal segments are registered before the
/// `{id}` patterns they would otherwise collide with.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/brand")
            .route("", web::post().to(catalog::create_brand))
            .route("", web::get().to(catalog::list_brands))
            .route("/{id}", web::get().to(catalog::get_brand))
            .route("/{id}", web::put().to(catalog::update_brand))
            .route("/{id}", web::delete().to(catalog::delete_brand)),
    )
    .service(
        web::scope("/category")
            .route("", web::post().to(catalog::create_category))
            .route("", web::get().to(catalog::list_categories))
            .route("/{id}", web::get().to(catalog::get_category))
            .route("/{id}", web::put().to(catalog::update_category))
            .route("/{id}", web::delete().to(catalog::delete_category)),
    )
    .service(
        web::scope("/product")
            .route("", web::post().to(catalog::create_product))
            .route("", web::get().to(catalog::list_products))
            .route("/{id}", web::get().to(catalog::get_product))
            .route("/{id}", web::put().to(catalog::update_product))
            .route("/{id}", web::delete().to(catalog::delete_product)),
    )
    .service(
        web::scope("/store")
            .route("", web::post().to(stores::create_store))
            .route("", web::get().to(stores::list_stores))
            .route("/{id}", web::get().to(stores::get_store))
            .route("/{id}", web::put().to(stores::update_store))
            .route("/{id}", web::patch().to(stores::patch_store))
            .route("/{id}", web::delete().to(stores::delete_store)),
    )
    .service(
        web::scope("/customer")
            .route("", web::post().to(customers::create_customer))
            .route("", web::get().to(customers::list_customers))
            .route("/{id}", web::get().to(customers::get_customer))
            .route("/{id}", web::put().to(customers::update_customer))
            .route("/{id}", web::patch().to(customers::patch_customer))
            .route("/{id}", web::delete().to(customers::delete_customer)),
    )
    .service(
        web::scope("/staff")
            .route("", web::post().to(staff::create_staff))
            .route("", web::get().to(staff::list_staff))
            .route("/{id}", web::get().to(staff::get_staff))
            .route("/{id}", web::put().to(staff::update_staff))
            .route("/{id}", web::patch().to(staff::patch_staff))
            .route("/{id}", web::delete().to(staff::delete_staff)),
    )
    .route("/staffreport", web::get().to(staff::staff_report))
    .service(
        web::scope("/code")
            .route("", web::post().to(promo_codes::create_code))
            .route("", web::get().to(promo_codes::list_codes))
            .route("/{id}", web::get().to(promo_codes::get_code))
            .route("/{id}", web::put().to(promo_codes::update_code))
            .route("/{id}", web::delete().to(promo_codes::delete_code)),
    )
    .service(
        web::scope("/stock")
            .route("", web::post().to(stocks::create_stock))
            .route("", web::get().to(stocks::list_stock))
            .route("", web::put().to(stocks::update_stock))
            .route("/send_product", web::post().to(stocks::send_product))
            .route("/{store_id}", web::get().to(stocks::get_store_stock))
            .route(
                "/{store_id}/{product_id}",
                web::delete().to(stocks::delete_stock),
            ),
    )
    .service(
        web::scope("/order")
            .route("", web::post().to(orders::create_order))
            .route("", web::get().to(orders::list_orders))
            .route("/total_sum", web::get().to(orders::total_sum))
            .route("/{id}", web::get().to(orders::get_order))
            .route("/{id}", web::put().to(orders::update_order))
            .route("/{id}", web::patch().to(orders::patch_order))
            .route("/{id}", web::delete().to(orders::delete_order))
            .route("/{id}/items", web::post().to(orders::add_item))
            .route(
                "/{id}/items/{item_id}",
                web::delete().to(orders::remove_item),
            ),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(AppState::new(pool));
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(handlers::json_config())
            .app_data(handlers::path_config())
            .app_data(handlers::query_config())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(configure)
    })
    .bind((host.to_string(), port))?
    .run())
}
