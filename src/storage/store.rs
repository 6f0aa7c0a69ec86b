//! Post Store - SQLite-backed snapshot table
//!
//! One row per `(username, post_id)`. Writes are upserts so that a fresh
//! snapshot of a post replaces the counters of the previous one while the
//! row id stays stable.
//!
//! The connection sits behind a `std::sync::Mutex` because
//! `rusqlite::Connection` is not `Sync`. Every public method holds the lock
//! for exactly one statement or transaction.

use crate::storage::{Post, SortField, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

const POST_COLUMNS: &str =
    "id, username, post_id, likes, views, comments, shares, created_at_ms, date, url";

/// SQLite-backed store of post snapshots
pub struct PostStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl PostStore {
    /// Create or open a store at the given database file
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            ",
        )?;

        Self::init_schema(&conn)?;
        tracing::info!(path = ?path, "Opened post store");

        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path),
        })
    }

    /// Create a throwaway in-memory store
    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                post_id TEXT NOT NULL,
                likes INTEGER NOT NULL DEFAULT 0,
                views INTEGER NOT NULL DEFAULT 0,
                comments INTEGER NOT NULL DEFAULT 0,
                shares INTEGER NOT NULL DEFAULT 0,
                created_at_ms INTEGER,
                date TEXT,
                url TEXT,
                UNIQUE (username, post_id)
            );
            CREATE INDEX IF NOT EXISTS idx_posts_username ON posts(username);
            CREATE INDEX IF NOT EXISTS idx_posts_username_created
                ON posts(username, created_at_ms);
            ",
        )?;
        Ok(())
    }

    /// Path of the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))
    }

    /// Insert or replace snapshots in a single transaction
    ///
    /// Returns the number of posts written. Nothing is written if any post
    /// fails validation.
    pub fn upsert_posts(&self, posts: &[Post]) -> StorageResult<usize> {
        if posts.is_empty() {
            return Ok(0);
        }

        for post in posts {
            validate_post(post)?;
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO posts
                    (username, post_id, likes, views, comments, shares, created_at_ms, date, url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(username, post_id) DO UPDATE SET
                    likes = excluded.likes,
                    views = excluded.views,
                    comments = excluded.comments,
                    shares = excluded.shares,
                    created_at_ms = COALESCE(excluded.created_at_ms, posts.created_at_ms),
                    date = COALESCE(excluded.date, posts.date),
                    url = COALESCE(excluded.url, posts.url)",
            )?;

            for post in posts {
                stmt.execute(params![
                    post.username,
                    post.post_id,
                    to_sql_count(post.likes)?,
                    to_sql_count(post.views)?,
                    to_sql_count(post.comments)?,
                    to_sql_count(post.shares)?,
                    post.created_at.map(|dt| dt.timestamp_millis()),
                    post.date,
                    post.url,
                ])?;
            }
        }

        tx.commit()?;

        tracing::debug!(count = posts.len(), "Upserted post snapshots");
        Ok(posts.len())
    }

    /// All distinct account handles, sorted
    pub fn accounts(&self) -> StorageResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare_cached("SELECT DISTINCT username FROM posts ORDER BY username")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut accounts = Vec::new();
        for row in rows {
            accounts.push(row?);
        }
        Ok(accounts)
    }

    /// Every snapshot belonging to an account
    pub fn posts_for_account(&self, account: &str) -> StorageResult<Vec<Post>> {
        self.query_posts(
            &format!(
                "SELECT {} FROM posts WHERE username = ?1 ORDER BY id",
                POST_COLUMNS
            ),
            params![account],
        )
    }

    /// Newest posts first; posts without a publish time come last
    pub fn recent_posts(&self, account: &str, limit: usize) -> StorageResult<Vec<Post>> {
        self.query_posts(
            &format!(
                "SELECT {} FROM posts WHERE username = ?1
                 ORDER BY created_at_ms IS NULL, created_at_ms DESC, id DESC
                 LIMIT ?2",
                POST_COLUMNS
            ),
            params![account, limit as i64],
        )
    }

    /// Posts ranked by a counter, highest first
    ///
    /// Ties are broken by publish time (newest first) and then row id.
    pub fn top_posts(
        &self,
        account: &str,
        sort: SortField,
        limit: usize,
    ) -> StorageResult<Vec<Post>> {
        self.query_posts(
            &format!(
                "SELECT {} FROM posts WHERE username = ?1
                 ORDER BY {} DESC, created_at_ms IS NULL, created_at_ms DESC, id ASC
                 LIMIT ?2",
                POST_COLUMNS,
                sort.column()
            ),
            params![account, limit as i64],
        )
    }

    /// Posts published within `[start, end]`, oldest first
    pub fn posts_between(
        &self,
        account: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StorageResult<Vec<Post>> {
        self.query_posts(
            &format!(
                "SELECT {} FROM posts
                 WHERE username = ?1 AND created_at_ms >= ?2 AND created_at_ms <= ?3
                 ORDER BY created_at_ms, id",
                POST_COLUMNS
            ),
            params![account, start.timestamp_millis(), end.timestamp_millis()],
        )
    }

    /// Total number of stored snapshots
    pub fn post_count(&self) -> StorageResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn query_posts(&self, sql: &str, params: impl rusqlite::Params) -> StorageResult<Vec<Post>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(sql)?;
        let mut rows = stmt.query(params)?;

        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(row_to_post(row)?);
        }
        Ok(posts)
    }
}

fn validate_post(post: &Post) -> StorageResult<()> {
    if post.username.trim().is_empty() {
        return Err(StorageError::InvalidPost("username cannot be empty".to_string()));
    }
    if post.post_id.trim().is_empty() {
        return Err(StorageError::InvalidPost(format!(
            "post_id cannot be empty (account '{}')",
            post.username
        )));
    }
    Ok(())
}

fn to_sql_count(value: u64) -> StorageResult<i64> {
    i64::try_from(value)
        .map_err(|_| StorageError::InvalidPost(format!("counter {} out of range", value)))
}

fn from_sql_count(value: i64, column: &str) -> StorageResult<u64> {
    u64::try_from(value)
        .map_err(|_| StorageError::Corruption(format!("negative {} count: {}", column, value)))
}

fn row_to_post(row: &Row<'_>) -> StorageResult<Post> {
    let created_at_ms: Option<i64> = row.get(7)?;
    let created_at = match created_at_ms {
        Some(ms) => Some(DateTime::from_timestamp_millis(ms).ok_or_else(|| {
            StorageError::Corruption(format!("created_at out of range: {}", ms))
        })?),
        None => None,
    };

    Ok(Post {
        id: row.get(0)?,
        username: row.get(1)?,
        post_id: row.get(2)?,
        likes: from_sql_count(row.get(3)?, "likes")?,
        views: from_sql_count(row.get(4)?, "views")?,
        comments: from_sql_count(row.get(5)?, "comments")?,
        shares: from_sql_count(row.get(6)?, "shares")?,
        created_at,
        date: row.get(8)?,
        url: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::tempdir;

    fn ts(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn seeded_store() -> PostStore {
        let store = PostStore::in_memory().unwrap();
        store
            .upsert_posts(&[
                Post::new("acme", "a1").counts(500, 50, 5, 1).created_at(ts(1, 10)),
                Post::new("acme", "a2").counts(1500, 20, 9, 7).created_at(ts(3, 10)),
                Post::new("acme", "a3").counts(900, 90, 1, 2),
                Post::new("zeta", "z1").counts(10, 1, 0, 0).created_at(ts(2, 8)),
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_accounts_sorted_and_distinct() {
        let store = seeded_store();
        assert_eq!(store.accounts().unwrap(), vec!["acme", "zeta"]);
    }

    #[test]
    fn test_upsert_replaces_snapshot() {
        let store = seeded_store();
        let before = store.posts_for_account("acme").unwrap();
        let a1_id = before.iter().find(|p| p.post_id == "a1").unwrap().id;

        store
            .upsert_posts(&[Post::new("acme", "a1").counts(800, 60, 6, 2)])
            .unwrap();

        let after = store.posts_for_account("acme").unwrap();
        assert_eq!(after.len(), 3);
        let a1 = after.iter().find(|p| p.post_id == "a1").unwrap();
        assert_eq!(a1.views, 800);
        assert_eq!(a1.id, a1_id);
        // Missing publish time keeps the stored one
        assert_eq!(a1.created_at, Some(ts(1, 10)));
    }

    #[test]
    fn test_upsert_rejects_empty_identifiers() {
        let store = PostStore::in_memory().unwrap();
        let result = store.upsert_posts(&[
            Post::new("acme", "ok"),
            Post::new("", "x"),
        ]);
        assert!(matches!(result, Err(StorageError::InvalidPost(_))));
        assert_eq!(store.post_count().unwrap(), 0);

        let result = store.upsert_posts(&[Post::new("acme", "  ")]);
        assert!(matches!(result, Err(StorageError::InvalidPost(_))));
    }

    #[test]
    fn test_top_posts_by_field() {
        let store = seeded_store();

        let by_views = store.top_posts("acme", SortField::Views, 10).unwrap();
        let ids: Vec<_> = by_views.iter().map(|p| p.post_id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a3", "a1"]);

        let by_likes = store.top_posts("acme", SortField::Likes, 2).unwrap();
        let ids: Vec<_> = by_likes.iter().map(|p| p.post_id.as_str()).collect();
        assert_eq!(ids, vec!["a3", "a1"]);
    }

    #[test]
    fn test_recent_posts_nulls_last() {
        let store = seeded_store();
        let recent = store.recent_posts("acme", 50).unwrap();
        let ids: Vec<_> = recent.iter().map(|p| p.post_id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "a1", "a3"]);
    }

    #[test]
    fn test_posts_between_inclusive() {
        let store = seeded_store();
        let posts = store
            .posts_between("acme", ts(1, 10), ts(3, 10))
            .unwrap();
        assert_eq!(posts.len(), 2);

        let posts = store
            .posts_between("acme", ts(1, 10) + Duration::seconds(1), ts(3, 10))
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].post_id, "a2");
    }

    #[test]
    fn test_unknown_account_is_empty() {
        let store = seeded_store();
        assert!(store.posts_for_account("nobody").unwrap().is_empty());
        assert!(store.top_posts("nobody", SortField::Views, 10).unwrap().is_empty());
    }

    #[test]
    fn test_persistence_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("posts.db");

        {
            let store = PostStore::open(&path).unwrap();
            store
                .upsert_posts(&[Post::new("acme", "a1").counts(1, 1, 1, 1).url("https://x/1")])
                .unwrap();
        }

        let store = PostStore::open(&path).unwrap();
        assert_eq!(store.post_count().unwrap(), 1);
        let posts = store.posts_for_account("acme").unwrap();
        assert_eq!(posts[0].url.as_deref(), Some("https://x/1"));
        assert_eq!(store.path(), Some(path.as_path()));
    }
}
