//! Per-category printed-label totals.

use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Add `amount` to the category total and return the new total.
pub fn increment(conn: &Connection, category: &str, amount: i64) -> Result<i64> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO counters (category, total, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(category) DO UPDATE SET total = total + excluded.total, updated_at = excluded.updated_at",
        params![category, amount, now],
    )?;
    total(conn, category)
}

/// Current total (0 for an unknown category).
pub fn total(conn: &Connection, category: &str) -> Result<i64> {
    let value: Option<i64> = conn
        .query_row(
            "SELECT total FROM counters WHERE category = ?1",
            params![category],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value.unwrap_or(0))
}

/// All categories with their totals, alphabetically.
pub fn list(conn: &Connection) -> Result<Vec<(String, i64, String)>> {
    let mut stmt =
        conn.prepare("SELECT category, total, updated_at FROM counters ORDER BY category ASC")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;
    rows.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    #[test]
    fn increments_accumulate_per_category() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();

        assert_eq!(total(&conn, "mercadoria").unwrap(), 0);
        assert_eq!(increment(&conn, "mercadoria", 2).unwrap(), 2);
        assert_eq!(increment(&conn, "mercadoria", 3).unwrap(), 5);
        assert_eq!(increment(&conn, "outro", 1).unwrap(), 1);

        let all = list(&conn).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, "mercadoria");
        assert_eq!(all[0].1, 5);
    }
}
