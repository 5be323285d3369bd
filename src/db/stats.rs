//! Aggregate symbol request counters

use crate::db::models::SymbolCount;
use crate::error::Result;
use rusqlite::Connection;

/// Bump the counter for a symbol, creating it at 1 on first sight.
/// A single upsert statement so concurrent increments serialize inside
/// the storage engine instead of racing through read-modify-write.
pub fn record_symbol_request(conn: &Connection, symbol: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO symbol_requests (symbol, times_requested) VALUES (?, 1)
         ON CONFLICT(symbol) DO UPDATE SET times_requested = times_requested + 1",
        [symbol],
    )?;
    Ok(())
}

/// The `limit` most requested symbols, highest count first.
/// Ties fall back to whatever order SQLite returns.
pub fn top_requested(conn: &Connection, limit: u32) -> Result<Vec<SymbolCount>> {
    let mut stmt = conn.prepare(
        "SELECT symbol, times_requested FROM symbol_requests
         ORDER BY times_requested DESC LIMIT ?",
    )?;

    let rows = stmt.query_map([limit], |row| {
        Ok(SymbolCount {
            symbol: row.get(0)?,
            times_requested: row.get(1)?,
        })
    })?;

    let mut counts = Vec::new();
    for count in rows {
        counts.push(count?);
    }
    Ok(counts)
}
