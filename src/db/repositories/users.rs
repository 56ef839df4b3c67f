use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::{
    helpers::{self, format_timestamp, parse_datetime},
    models::User,
    Database,
};

fn row_to_user(row: &Row) -> Result<User> {
    let created_at: String = row.get("created_at")?;
    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Database {
    /// Look up the account for `email`, creating it on first sign-in.
    pub async fn find_or_create_user(&self, email: &str) -> Result<User> {
        let email = normalize_email(email);
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let existing = tx
                .query_row(
                    "SELECT id, email, created_at FROM users WHERE email = ?1",
                    params![email],
                    |row| Ok(row_to_user(row)),
                )
                .optional()?
                .transpose()?;

            let user = match existing {
                Some(user) => user,
                None => {
                    let user = User {
                        id: Uuid::new_v4().to_string(),
                        email,
                        created_at: helpers::now(),
                    };
                    tx.execute(
                        "INSERT INTO users (id, email, created_at) VALUES (?1, ?2, ?3)",
                        params![user.id, user.email, format_timestamp(user.created_at)],
                    )
                    .context("failed to insert user")?;
                    user
                }
            };

            tx.commit()?;
            Ok(user)
        })
        .await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let user = conn
                .query_row(
                    "SELECT id, email, created_at FROM users WHERE id = ?1",
                    params![user_id],
                    |row| Ok(row_to_user(row)),
                )
                .optional()?
                .transpose()?;
            Ok(user)
        })
        .await
    }
}
