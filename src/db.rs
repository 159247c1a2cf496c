//! Database operations for the travel-buddy chat history

use rusqlite::{params, Connection};

use crate::models::BuddyMessage;
use crate::paths::get_buddy_db_path;

/// Initializes the SQLite database, creating tables if needed
pub fn init_database() -> Result<Connection, String> {
    let db_path = get_buddy_db_path()?;

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create database directory: {}", e))?;
    }

    let conn = Connection::open(&db_path).map_err(|e| format!("Failed to open database: {}", e))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS buddy_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            role TEXT NOT NULL,
            content TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| format!("Failed to create table: {}", e))?;

    Ok(conn)
}

/// Stores a buddy message
pub fn store_buddy_message(timestamp: &str, role: &str, content: &str) -> Result<(), String> {
    let conn = init_database()?;
    conn.execute(
        "INSERT INTO buddy_history (timestamp, role, content) VALUES (?1, ?2, ?3)",
        params![timestamp, role, content],
    )
    .map_err(|e| format!("Failed to store message: {}", e))?;
    Ok(())
}

/// Retrieves the most recent buddy messages, oldest first
pub fn get_buddy_history(limit: i64) -> Result<Vec<BuddyMessage>, String> {
    let conn = init_database()?;
    let mut stmt = conn
        .prepare("SELECT id, timestamp, role, content FROM buddy_history ORDER BY id DESC LIMIT ?1")
        .map_err(|e| format!("Failed to prepare query: {}", e))?;

    let messages = stmt
        .query_map(params![limit], |row| {
            Ok(BuddyMessage {
                id: Some(row.get(0)?),
                timestamp: row.get(1)?,
                role: row.get(2)?,
                content: row.get(3)?,
            })
        })
        .map_err(|e| format!("Failed to query: {}", e))?;

    let mut result: Vec<BuddyMessage> = messages.filter_map(|m| m.ok()).collect();

    // Reverse to get chronological order
    result.reverse();
    Ok(result)
}

/// Clears the buddy chat history
pub fn clear_buddy_history() -> Result<(), String> {
    let conn = init_database()?;
    conn.execute("DELETE FROM buddy_history", [])
        .map_err(|e| format!("Failed to clear history: {}", e))?;
    Ok(())
}
