use chrono::{DateTime, Utc};

use crate::domain::Post;

/// The full post collection as last retrieved from the remote source.
///
/// Held in memory only; used to suppress no-op overwrites when the remote
/// data has not changed since the previous fetch.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub posts: Vec<Post>,
    pub taken_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            taken_at: Utc::now(),
        }
    }

    pub fn matches(&self, posts: &[Post]) -> bool {
        self.posts == posts
    }
}
