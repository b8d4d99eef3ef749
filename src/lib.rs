pub mod api;
pub mod config;
pub mod hypermedia;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;
pub use api::ApiError;

// Export hypermedia types
pub use hypermedia::{Control, MasonDocument};

// Export model types
pub use model::{Image, Synset};

// Export store types
pub use store::{MemoryStore, PostgresStore, Store, StoreError};
