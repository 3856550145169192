pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Post;

/// Source of the full remote post collection.
///
/// One implementation talks HTTP; tests substitute their own.
#[async_trait]
pub trait Fetcher {
    async fn fetch_posts(&self) -> Result<Vec<Post>>;
}

/// Decode the remote payload: a JSON array of posts.
pub(crate) fn decode_posts(body: &[u8]) -> Result<Vec<Post>> {
    let posts = serde_json::from_slice(body)?;
    Ok(posts)
}
