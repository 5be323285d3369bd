//! Per-user lookup history

use crate::db::models::{LookupRecord, NewLookup};
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;

/// Record one successful lookup for a user
pub fn insert_lookup(conn: &Connection, user_id: i64, lookup: &NewLookup) -> Result<i64> {
    // Fixed-width timestamps so the textual column orders chronologically
    let date = lookup.date.to_rfc3339_opts(SecondsFormat::Micros, true);

    conn.execute(
        "INSERT INTO lookup_history (user_id, symbol, name, date, open, high, low, close)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            user_id,
            lookup.symbol,
            lookup.name,
            date,
            lookup.open,
            lookup.high,
            lookup.low,
            lookup.close,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// All lookups made by a user, ordered by the quote's date descending.
/// Insertion order does not matter; a backdated quote sorts accordingly.
pub fn history_for_user(conn: &Connection, user_id: i64) -> Result<Vec<LookupRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, symbol, name, date, open, high, low, close
         FROM lookup_history WHERE user_id = ? ORDER BY date DESC",
    )?;

    let rows = stmt.query_map([user_id], |row| {
        Ok(LookupRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            symbol: row.get(2)?,
            name: row.get(3)?,
            date: row
                .get::<_, Option<String>>(4)?
                .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
                .map(|dt| dt.with_timezone(&Utc)),
            open: row.get(5)?,
            high: row.get(6)?,
            low: row.get(7)?,
            close: row.get(8)?,
        })
    })?;

    let mut records = Vec::new();
    for record in rows {
        records.push(record?);
    }
    Ok(records)
}
