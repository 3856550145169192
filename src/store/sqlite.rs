use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection};
use rusqlite_migration::{Migrations, M};

use crate::app::{CorkboardError, Result};
use crate::domain::{NewPost, Post};
use crate::store::Store;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| CorkboardError::Database(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            CorkboardError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }
}

impl Store for SqliteStore {
    fn all_posts(&self) -> Result<Vec<Post>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT post_id, user_id, post_title, post_body FROM posts ORDER BY post_id",
        )?;

        let posts = stmt
            .query_map([], |row| {
                Ok(Post {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    title: row.get(2)?,
                    body: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    fn replace_all(&self, posts: &[Post]) -> Result<usize> {
        let mut conn = self.lock()?;

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM posts", [])?;

        let mut count = 0;
        for post in posts {
            count += tx.execute(
                "INSERT INTO posts (post_id, user_id, post_title, post_body)
                 VALUES (?1, ?2, ?3, ?4)",
                params![post.id, post.user_id, post.title, post.body],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }

    fn insert_post(&self, post: &NewPost) -> Result<i64> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO posts (user_id, post_title, post_body) VALUES (?1, ?2, ?3)",
            params![post.user_id, post.title, post.body],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn delete_post(&self, id: i64) -> Result<bool> {
        let conn = self.lock()?;

        let affected = conn.execute("DELETE FROM posts WHERE post_id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn count_posts(&self) -> Result<i64> {
        let conn = self.lock()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str) -> Post {
        Post {
            id,
            user_id: 1,
            title: title.into(),
            body: "body".into(),
        }
    }

    #[test]
    fn test_replace_all_mirrors_collection() {
        let store = SqliteStore::in_memory().unwrap();
        let posts = vec![post(1, "a"), post(2, "b")];

        let inserted = store.replace_all(&posts).unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(store.all_posts().unwrap(), posts);
    }

    #[test]
    fn test_replace_all_discards_previous_rows() {
        let store = SqliteStore::in_memory().unwrap();
        store.replace_all(&[post(1, "old"), post(2, "old")]).unwrap();

        store.replace_all(&[post(9, "new")]).unwrap();

        let posts = store.all_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 9);
        assert_eq!(posts[0].title, "new");
    }

    #[test]
    fn test_replace_all_with_empty_collection_clears_store() {
        let store = SqliteStore::in_memory().unwrap();
        store.replace_all(&[post(1, "a")]).unwrap();

        store.replace_all(&[]).unwrap();
        assert_eq!(store.count_posts().unwrap(), 0);
    }

    #[test]
    fn test_insert_assigns_fresh_identity() {
        let store = SqliteStore::in_memory().unwrap();
        store.replace_all(&[post(1, "a"), post(2, "b")]).unwrap();

        let new = NewPost {
            user_id: 5,
            title: "t".into(),
            body: "b".into(),
        };
        let id = store.insert_post(&new).unwrap();

        assert!(id != 1 && id != 2);
        let posts = store.all_posts().unwrap();
        assert_eq!(posts.len(), 3);
        let added = posts.iter().find(|p| p.id == id).unwrap();
        assert_eq!(added.user_id, 5);
        assert_eq!(added.title, "t");
    }

    #[test]
    fn test_delete_removes_exactly_one_row() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .replace_all(&[post(1, "a"), post(2, "b"), post(3, "c")])
            .unwrap();

        assert!(store.delete_post(2).unwrap());

        let ids: Vec<i64> = store.all_posts().unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_delete_missing_row_reports_false() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(!store.delete_post(99).unwrap());
    }

    #[test]
    fn test_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("corkboard.db");

        {
            let store = SqliteStore::new(&db_path).unwrap();
            store.replace_all(&[post(1, "kept")]).unwrap();
        }

        let store = SqliteStore::new(&db_path).unwrap();
        let posts = store.all_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "kept");
    }
}
