use std::net::SocketAddr;
use books_catalog::catalog::controller::router;
use books_catalog::catalog::factory;
use books_catalog::core::controller::AppState;
use books_catalog::core::domain::Configuration;
use books_catalog::utils::db::setup_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Configuration::from_env()?;
    let catalog_service = factory::create_catalog_service(&config).await?;
    let addr: SocketAddr = config.bind_address().parse()?;
    info!(profile = %config.profile, address = %addr, "starting catalog service");

    let app = router(AppState::new(catalog_service));
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
