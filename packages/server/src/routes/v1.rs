use utoipa_axum::{router::OpenApiRouter, routes};

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    let api = OpenApiRouter::new()
        .routes(routes!(handlers::customer::list_regions))
        .routes(routes!(
            handlers::customer::list_customers_by_region,
            handlers::customer::create_customer
        ))
        .routes(routes!(handlers::customer::search_customers))
        .routes(routes!(
            handlers::customer::get_customer,
            handlers::customer::update_customer
        ))
        .routes(routes!(
            handlers::communication::list_communications,
            handlers::communication::add_communication
        ))
        .routes(routes!(
            handlers::file::download_file,
            handlers::file::delete_file
        ))
        .routes(routes!(handlers::statistics::get_statistics));

    // The upload route gets its own body-size layer keyed to the configured
    // maximum; everything else keeps axum's default.
    let uploads = OpenApiRouter::new()
        .routes(routes!(
            handlers::file::list_files,
            handlers::file::upload_file
        ))
        .layer(handlers::file::upload_body_limit(
            config.storage.max_file_size,
        ));

    api.merge(uploads)
}
