//! SQLite persistence for users, lookup history, and symbol request counts

pub mod models;
mod history;
mod migrations;
mod stats;
mod user;

use crate::error::Result;
use crate::security::HashingManager;
use models::{LookupRecord, NewLookup, SymbolCount, User};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;

/// SQLite database wrapper
pub struct Db {
    conn: Mutex<Connection>,
}

impl Db {
    /// Open the database at `path` and bring the schema up to date
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL for concurrent readers; foreign keys must be switched on per
        // connection for the user cascade to fire
        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )?;

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.run_migrations()?;

        Ok(db)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock();
        migrations::run_migrations(&conn)
    }

    // ========== User Methods ==========

    /// Create a new user with a hashed password
    pub fn create_user(
        &self,
        email: &str,
        name: &str,
        password: &str,
        is_superuser: bool,
        hashing: &HashingManager,
    ) -> Result<User> {
        let conn = self.conn.lock();
        user::create_user(&conn, email, name, password, is_superuser, hashing)
    }

    /// Verify credentials, returning the user when they match
    pub fn verify_user(
        &self,
        email: &str,
        password: &str,
        hashing: &HashingManager,
    ) -> Result<Option<User>> {
        let conn = self.conn.lock();
        user::verify_user(&conn, email, password, hashing)
    }

    /// Look up a user by id
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock();
        user::get_user(&conn, id)
    }

    /// Update any subset of email, name, and password hash
    pub fn update_user(
        &self,
        id: i64,
        email: Option<&str>,
        name: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<User> {
        let conn = self.conn.lock();
        user::update_user(&conn, id, email, name, password_hash)
    }

    /// Delete a user; their lookup history goes with them
    pub fn delete_user(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock();
        user::delete_user(&conn, id)
    }

    // ========== Lookup History Methods ==========

    /// Record one successful lookup for a user
    pub fn insert_lookup(&self, user_id: i64, lookup: &NewLookup) -> Result<i64> {
        let conn = self.conn.lock();
        history::insert_lookup(&conn, user_id, lookup)
    }

    /// All lookups made by a user, most recent quote date first
    pub fn history_for_user(&self, user_id: i64) -> Result<Vec<LookupRecord>> {
        let conn = self.conn.lock();
        history::history_for_user(&conn, user_id)
    }

    // ========== Symbol Request Count Methods ==========

    /// Bump the aggregate counter for a symbol (insert at 1 if new)
    pub fn record_symbol_request(&self, symbol: &str) -> Result<()> {
        let conn = self.conn.lock();
        stats::record_symbol_request(&conn, symbol)
    }

    /// The `limit` most requested symbols, highest count first
    pub fn top_requested(&self, limit: u32) -> Result<Vec<SymbolCount>> {
        let conn = self.conn.lock();
        stats::top_requested(&conn, limit)
    }
}
