use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Entry point
        .route("/api/", get(handlers::get_entry_point))
        // Synset collection
        .route("/api/synsets/", get(handlers::get_synset_collection::<S>))
        .route("/api/synsets/", post(handlers::post_synset_collection::<S>))
        // Synset item
        .route("/api/synsets/:wnid/", get(handlers::get_synset_item::<S>))
        .route("/api/synsets/:wnid/", put(handlers::put_synset_item::<S>))
        .route(
            "/api/synsets/:wnid/",
            delete(handlers::delete_synset_item::<S>),
        )
        // Hyponym collection
        .route(
            "/api/synsets/:wnid/hyponyms/",
            get(handlers::get_hyponym_collection::<S>),
        )
        .route(
            "/api/synsets/:wnid/hyponyms/",
            post(handlers::post_hyponym_collection::<S>),
        )
        // Hyponym item
        .route(
            "/api/synsets/:wnid/hyponyms/:hyponym_wnid/",
            get(handlers::get_hyponym_item::<S>),
        )
        .route(
            "/api/synsets/:wnid/hyponyms/:hyponym_wnid/",
            delete(handlers::delete_hyponym_item::<S>),
        )
        // Image collection
        .route(
            "/api/synsets/:wnid/images/",
            get(handlers::get_image_collection::<S>),
        )
        .route(
            "/api/synsets/:wnid/images/",
            post(handlers::post_image_collection::<S>),
        )
        // Image item
        .route(
            "/api/synsets/:wnid/images/:imid/",
            get(handlers::get_image_item::<S>),
        )
        .route(
            "/api/synsets/:wnid/images/:imid/",
            put(handlers::put_image_item::<S>),
        )
        .route(
            "/api/synsets/:wnid/images/:imid/",
            delete(handlers::delete_image_item::<S>),
        )
}
