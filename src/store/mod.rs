pub mod sqlite;

use crate::app::Result;
use crate::domain::{NewPost, Post};

pub use sqlite::SqliteStore;

pub trait Store {
    /// Every cached post, ordered by id.
    fn all_posts(&self) -> Result<Vec<Post>>;

    /// Full-overwrite: delete every row, then insert the given collection,
    /// as one transaction. Returns the number of rows inserted.
    fn replace_all(&self, posts: &[Post]) -> Result<usize>;

    /// Insert a locally authored post; the store assigns the id.
    fn insert_post(&self, post: &NewPost) -> Result<i64>;

    /// Delete by id. Returns whether a row existed.
    fn delete_post(&self, id: i64) -> Result<bool>;

    fn count_posts(&self) -> Result<i64>;
}
