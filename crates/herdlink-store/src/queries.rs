// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document CRUD operations over the generic `documents` table.

use herdlink_core::types::Document;
use herdlink_core::HerdlinkError;
use rusqlite::params;

use crate::database::Database;

/// Get a document by id, or `None` when it does not exist.
pub async fn get_document(
    db: &Database,
    collection: &str,
    id: &str,
) -> Result<Option<Document>, HerdlinkError> {
    let collection = collection.to_string();
    let id = id.to_string();
    let row = db
        .connection()
        .call(move |conn| -> Result<Option<(String, String)>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, body FROM documents WHERE collection = ?1 AND id = ?2",
            )?;
            let result = stmt.query_row(params![collection, id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            });
            match result {
                Ok(pair) => Ok(Some(pair)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    row.map(|(id, body)| parse_body(id, &body)).transpose()
}

/// Get all documents whose top-level `field` equals `value`, in insertion
/// (rowid) order.
pub async fn query_documents_eq(
    db: &Database,
    collection: &str,
    field: &str,
    value: &str,
) -> Result<Vec<Document>, HerdlinkError> {
    let collection = collection.to_string();
    // json_extract takes a JSON path; field names come from trusted call
    // sites, not request input.
    let path = format!("$.{field}");
    let value = value.to_string();
    let rows = db
        .connection()
        .call(move |conn| -> Result<Vec<(String, String)>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, body FROM documents
                 WHERE collection = ?1 AND json_extract(body, ?2) = ?3
                 ORDER BY rowid",
            )?;
            let mapped = stmt.query_map(params![collection, path, value], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
            let mut rows = Vec::new();
            for row in mapped {
                rows.push(row?);
            }
            Ok(rows)
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    rows.into_iter()
        .map(|(id, body)| parse_body(id, &body))
        .collect()
}

/// Merge `fields` into the document body, creating the document when absent.
///
/// The read-merge-write runs inside a single connection call, so it is
/// atomic with respect to other writes on the shared background thread.
pub async fn upsert_merge_document(
    db: &Database,
    collection: &str,
    id: &str,
    fields: serde_json::Value,
) -> Result<(), HerdlinkError> {
    let obj = match fields {
        serde_json::Value::Object(obj) => obj,
        other => {
            return Err(HerdlinkError::InvalidArgument(format!(
                "merge fields must be a JSON object, got {other}"
            )))
        }
    };

    let collection = collection.to_string();
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            let existing: Option<String> = {
                let mut stmt = conn.prepare(
                    "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                )?;
                match stmt.query_row(params![collection, id], |row| row.get(0)) {
                    Ok(body) => Some(body),
                    Err(rusqlite::Error::QueryReturnedNoRows) => None,
                    Err(e) => return Err(e),
                }
            };

            let mut body: serde_json::Map<String, serde_json::Value> = match existing {
                Some(raw) => {
                    let parsed: serde_json::Value =
                        serde_json::from_str(&raw).map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(
                                0,
                                rusqlite::types::Type::Text,
                                Box::new(e),
                            )
                        })?;
                    match parsed {
                        serde_json::Value::Object(map) => map,
                        _ => serde_json::Map::new(),
                    }
                }
                None => serde_json::Map::new(),
            };
            for (key, value) in obj {
                body.insert(key, value);
            }
            let raw = serde_json::Value::Object(body).to_string();

            conn.execute(
                "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)
                 ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body",
                params![collection, id, raw],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn parse_body(id: String, raw: &str) -> Result<Document, HerdlinkError> {
    let body = serde_json::from_str(raw).map_err(|e| HerdlinkError::Store {
        source: Box::new(e),
    })?;
    Ok(Document { id, body })
}
