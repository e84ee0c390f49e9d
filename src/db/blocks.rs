use rusqlite::{named_params, Connection, Row};

use crate::db::record::Record;
use crate::error::StoreResult;
use crate::models::{Block, Key, RecordKind};

/// Retrieve every block, lifted ones included.
pub fn fetch_blocks(conn: &Connection) -> StoreResult<Vec<Block>> {
    let mut stmt = conn.prepare(
        "SELECT block_id, user_id, is_blocked, block_reason, paid_amount
         FROM blocks",
    )?;

    let blocks = stmt
        .query_map([], block_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(blocks)
}

/// Insert a block against an existing reader and return its `block_id`.
pub fn create_block(conn: &Connection, block: &Block) -> StoreResult<Key> {
    let id = conn.query_row(
        "INSERT INTO blocks (user_id, is_blocked, block_reason, paid_amount)
         VALUES (:user_id, :is_blocked, :block_reason, :paid_amount)
         RETURNING block_id",
        named_params! {
            ":user_id": block.user_id,
            ":is_blocked": block.is_blocked,
            ":block_reason": block.block_reason,
            ":paid_amount": block.paid_amount,
        },
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Overwrite the block's flag, reason, and paid amount.
pub fn update_block(conn: &Connection, block: &Block) -> StoreResult<()> {
    conn.execute(
        "UPDATE blocks
         SET user_id = :user_id, is_blocked = :is_blocked, block_reason = :block_reason,
             paid_amount = :paid_amount
         WHERE block_id = :block_id",
        named_params! {
            ":user_id": block.user_id,
            ":is_blocked": block.is_blocked,
            ":block_reason": block.block_reason,
            ":paid_amount": block.paid_amount,
            ":block_id": block.block_id,
        },
    )?;
    Ok(())
}

/// Remove a block. An unknown `block_id` changes nothing.
pub fn delete_block(conn: &Connection, id: Key) -> StoreResult<()> {
    conn.execute("DELETE FROM blocks WHERE block_id = ?1", [id])?;
    Ok(())
}

fn block_from_row(row: &Row<'_>) -> rusqlite::Result<Block> {
    Ok(Block {
        block_id: row.get("block_id")?,
        user_id: row.get("user_id")?,
        is_blocked: row.get("is_blocked")?,
        block_reason: row.get("block_reason")?,
        paid_amount: row.get("paid_amount")?,
    })
}

impl Record for Block {
    const KIND: RecordKind = RecordKind::Block;

    fn key(&self) -> Key {
        self.block_id
    }

    fn list_all(conn: &Connection) -> StoreResult<Vec<Self>> {
        fetch_blocks(conn)
    }

    fn create(conn: &Connection, record: &Self) -> StoreResult<Key> {
        create_block(conn, record)
    }

    fn update(conn: &Connection, record: &Self) -> StoreResult<()> {
        update_block(conn, record)
    }

    fn delete(conn: &Connection, key: Key) -> StoreResult<()> {
        delete_block(conn, key)
    }
}
