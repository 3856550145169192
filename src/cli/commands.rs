use crate::app::{AppContext, CorkboardError, Result};
use crate::domain::NewPost;
use crate::store::Store;
use crate::sync::SyncOutcome;

pub async fn sync(ctx: &AppContext) -> Result<()> {
    match ctx.sync.run().await? {
        SyncOutcome::Updated { rows } => println!("Synced {} posts", rows),
        SyncOutcome::Unchanged => println!("Already up to date"),
        SyncOutcome::AlreadyRunning => println!("Another sync is already running"),
    }
    Ok(())
}

pub fn list(ctx: &AppContext) -> Result<()> {
    let posts = ctx.store.all_posts()?;

    if posts.is_empty() {
        println!("No cached posts (run `corkboard sync` first)");
        return Ok(());
    }

    for post in &posts {
        println!("{:>5}  user {:<4} {}", post.id, post.user_id, post.title);
    }
    println!("{} posts", posts.len());

    Ok(())
}

pub fn add(ctx: &AppContext, user_id: i64, title: String, body: String) -> Result<()> {
    let post = NewPost {
        user_id,
        title,
        body,
    };
    let id = ctx.store.insert_post(&post)?;
    println!("Added post {}", id);
    Ok(())
}

pub fn remove(ctx: &AppContext, id: i64) -> Result<()> {
    if !ctx.store.delete_post(id)? {
        return Err(CorkboardError::PostNotFound(id));
    }
    println!("Removed post {}", id);
    Ok(())
}
