use actix_web::{web, App, HttpServer};
use banana_beast_backend::config::cors::configure_cors;
use banana_beast_backend::config::database::{
    connect_to_mongodb, create_indexes, get_server_address,
};
use banana_beast_backend::config::routes::configure_routes;
use banana_beast_backend::errors::json_error_handler;
use banana_beast_backend::services::auth_service::TokenSigner;
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let address = get_server_address();
    let mongodb_client = connect_to_mongodb().await;
    if let Err(e) = create_indexes(&mongodb_client).await {
        warn!("Failed to create indexes: {:?}", e);
    }
    let token_signer = TokenSigner::from_env();

    info!("Server is running on {}", address);

    HttpServer::new(move || {
        App::new()
            .wrap(configure_cors())
            .app_data(web::Data::new(mongodb_client.clone()))
            .app_data(web::Data::new(token_signer.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(configure_routes)
    })
    .bind(address)?
    .run()
    .await
}
