pub mod builder;
pub mod controls;

pub use builder::{Control, MasonDocument};

/// Media type served on every success and error body.
pub const MASON: &str = "application/vnd.mason+json";

/// Namespace URI for the `imagenet_browser` link relations.
pub const LINK_RELATIONS_URL: &str = "/imagenet_browser/link-relations/";

pub const SYNSET_PROFILE: &str = "/profiles/synset/";
pub const IMAGE_PROFILE: &str = "/profiles/image/";
pub const ERROR_PROFILE: &str = "/profiles/error/";
