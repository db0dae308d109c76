//! User repository
//!
//! Every operation is a single SQL statement against one pooled
//! connection, checked out for the duration of the statement and returned
//! on every exit path. Statement-level atomicity means a failed mutation
//! leaves the table in its pre-operation state.

use sqlx::{FromRow, PgPool};

use crate::models::{FilterField, Pagination};

/// User record from the database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub age: i32,
}

/// Fields for an insert; presence is validated before this type exists.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub age: i32,
}

/// Partial update; absent fields leave the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: i32 },
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List users ordered by ascending id, filtered and paginated.
    ///
    /// The filter is always applied: an empty search matches every row
    /// (all three columns are NOT NULL), so the unfiltered listing is the
    /// empty-search case of the same query. `%` and `_` in the search act
    /// as LIKE wildcards.
    pub async fn list(
        &self,
        filter: FilterField,
        search: &str,
        page: Pagination,
    ) -> Result<Vec<User>, DbError> {
        // match_expr comes from a closed enum, never from the client
        let sql = format!(
            "SELECT id, email, name, age FROM usuarios \
             WHERE {} ILIKE $1 ORDER BY id ASC LIMIT $2 OFFSET $3",
            filter.match_expr()
        );

        let users = sqlx::query_as::<_, User>(&sql)
            .bind(format!("%{}%", search))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool)
            .await?;

        Ok(users)
    }

    /// Point lookup by primary key.
    pub async fn get(&self, id: i32) -> Result<User, DbError> {
        sqlx::query_as::<_, User>("SELECT id, email, name, age FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(DbError::NotFound {
                resource: "user",
                id,
            })
    }

    /// Insert a user and return the row including its generated id.
    pub async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO usuarios (email, name, age) VALUES ($1, $2, $3) \
             RETURNING id, email, name, age",
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.age)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// Apply the fields present in the patch; absent fields bind as NULL
    /// and COALESCE keeps the stored value.
    pub async fn update(&self, id: i32, patch: UserPatch) -> Result<(), DbError> {
        let result = sqlx::query(
            "UPDATE usuarios SET \
                 email = COALESCE($2, email), \
                 name = COALESCE($3, name), \
                 age = COALESCE($4, age) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(patch.email)
        .bind(patch.name)
        .bind(patch.age)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "user",
                id,
            });
        }
        Ok(())
    }

    /// Remove a row permanently.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "user",
                id,
            });
        }
        Ok(())
    }

    /// Total row count, unfiltered.
    pub async fn count(&self) -> Result<i64, DbError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(self.pool)
            .await?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::db::pool::{create_pool, PoolConfig};

    // Integration tests - run with DATABASE_URL set:
    // cargo test -p usuarios-server -- --ignored --test-threads=1
    // (single-threaded: the count test compares against the live table)

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url, &PoolConfig::default())
            .await
            .expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    fn draft(email: &str, name: &str, age: i32) -> NewUser {
        NewUser {
            email: email.to_owned(),
            name: name.to_owned(),
            age,
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_get_roundtrip() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        let created = repo
            .create(draft("ann@example.com", "Ann", 34))
            .await
            .expect("create failed");
        assert!(created.id > 0);

        let fetched = repo.get(created.id).await.expect("get failed");
        assert_eq!(fetched, created);

        repo.delete(created.id).await.expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn get_missing_is_not_found() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        let err = repo.get(999_999_999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_changes_only_present_fields() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        let created = repo
            .create(draft("bob@example.com", "Bob", 40))
            .await
            .expect("create failed");

        repo.update(
            created.id,
            UserPatch {
                name: Some("Robert".to_owned()),
                ..UserPatch::default()
            },
        )
        .await
        .expect("update failed");

        let fetched = repo.get(created.id).await.expect("get failed");
        assert_eq!(fetched.name, "Robert");
        assert_eq!(fetched.email, created.email);
        assert_eq!(fetched.age, created.age);

        repo.delete(created.id).await.expect("cleanup failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_and_delete_missing_are_not_found() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        let err = repo
            .update(999_999_999, UserPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = repo.delete(999_999_999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_then_get_is_not_found() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        let created = repo
            .create(draft("gone@example.com", "Gone", 20))
            .await
            .expect("create failed");
        repo.delete(created.id).await.expect("delete failed");

        let err = repo.get(created.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pages_are_disjoint_ascending_slices() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        // Unique marker keeps this test independent of whatever else is
        // in the table.
        let marker = format!("slice-{}", std::process::id());
        let mut ids = vec![];
        for i in 0..4 {
            let user = repo
                .create(draft(
                    &format!("{}+{}@example.com", marker, i),
                    &marker,
                    30 + i,
                ))
                .await
                .expect("create failed");
            ids.push(user.id);
        }

        let first = repo
            .list(FilterField::Name, &marker, Pagination::new(1, 2))
            .await
            .expect("list failed");
        let second = repo
            .list(FilterField::Name, &marker, Pagination::new(2, 2))
            .await
            .expect("list failed");
        let all = repo
            .list(FilterField::Name, &marker, Pagination::new(1, 4))
            .await
            .expect("list failed");

        let concatenated: Vec<i32> = first.iter().chain(second.iter()).map(|u| u.id).collect();
        let expected: Vec<i32> = all.iter().map(|u| u.id).collect();
        assert_eq!(concatenated, expected);

        let mut sorted = expected.clone();
        sorted.sort_unstable();
        assert_eq!(expected, sorted);

        for id in ids {
            repo.delete(id).await.expect("cleanup failed");
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn filter_matches_substring_case_insensitively() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        let marker = format!("flt{}", std::process::id());
        let anna = repo
            .create(draft("anna@example.com", &format!("Anna-{}", marker), 28))
            .await
            .expect("create failed");
        let joanna = repo
            .create(draft("joanna@example.com", &format!("joANNa-{}", marker), 31))
            .await
            .expect("create failed");
        let bob = repo
            .create(draft("bob@example.com", &format!("Bob-{}", marker), 45))
            .await
            .expect("create failed");

        let matches = repo
            .list(FilterField::Name, "ann", Pagination::new(1, 1_000))
            .await
            .expect("list failed");
        let hit_ids: Vec<i32> = matches
            .iter()
            .filter(|u| u.name.contains(&marker))
            .map(|u| u.id)
            .collect();
        assert!(hit_ids.contains(&anna.id));
        assert!(hit_ids.contains(&joanna.id));
        assert!(!hit_ids.contains(&bob.id));

        for id in [anna.id, joanna.id, bob.id] {
            repo.delete(id).await.expect("cleanup failed");
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn count_matches_unbounded_listing() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        let total = repo.count().await.expect("count failed");
        let all = repo
            .list(FilterField::Name, "", Pagination::new(1, u32::MAX))
            .await
            .expect("list failed");

        assert_eq!(total as usize, all.len());
    }
}
