pub mod post;
pub mod snapshot;

pub use post::{NewPost, Post};
pub use snapshot::Snapshot;
