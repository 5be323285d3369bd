//! User management

use crate::db::models::User;
use crate::error::{AppError, Result};
use crate::security::HashingManager;
use rusqlite::{Connection, Row};

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        is_superuser: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Create a new user
pub fn create_user(
    conn: &Connection,
    email: &str,
    name: &str,
    password: &str,
    is_superuser: bool,
    hashing: &HashingManager,
) -> Result<User> {
    let password_hash = hashing.hash_password(password)?;

    let result = conn.execute(
        "INSERT INTO users (email, name, password_hash, is_superuser) VALUES (?, ?, ?, ?)",
        rusqlite::params![email, name, password_hash, is_superuser],
    );

    match result {
        Ok(_) => {}
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            return Err(AppError::Validation(
                "A user with this email already exists.".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    }

    let id = conn.last_insert_rowid();
    Ok(User {
        id,
        email: email.to_string(),
        name: name.to_string(),
        is_superuser,
        created_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Verify user credentials
pub fn verify_user(
    conn: &Connection,
    email: &str,
    password: &str,
    hashing: &HashingManager,
) -> Result<Option<User>> {
    let result = conn.query_row(
        "SELECT id, email, name, is_superuser, created_at, password_hash
         FROM users WHERE email = ?",
        [email],
        |row| Ok((user_from_row(row)?, row.get::<_, String>(5)?)),
    );

    match result {
        Ok((user, password_hash)) => {
            if hashing.verify_password(password, &password_hash)? {
                Ok(Some(user))
            } else {
                Ok(None)
            }
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Look up a user by id
pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    let result = conn.query_row(
        "SELECT id, email, name, is_superuser, created_at FROM users WHERE id = ?",
        [id],
        user_from_row,
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Update any subset of a user's email, name, and password hash
pub fn update_user(
    conn: &Connection,
    id: i64,
    email: Option<&str>,
    name: Option<&str>,
    password_hash: Option<&str>,
) -> Result<User> {
    let result = conn.execute(
        "UPDATE users SET
            email = COALESCE(?, email),
            name = COALESCE(?, name),
            password_hash = COALESCE(?, password_hash)
         WHERE id = ?",
        rusqlite::params![email, name, password_hash, id],
    );

    match result {
        Ok(_) => {}
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            return Err(AppError::Validation(
                "A user with this email already exists.".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    }

    get_user(conn, id)?.ok_or_else(|| AppError::NotFound("User not found.".to_string()))
}

/// Delete a user; lookup_history rows cascade
pub fn delete_user(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM users WHERE id = ?", [id])?;
    Ok(())
}
