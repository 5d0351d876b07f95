// Catalog CRUD operations
use rusqlite::{params, OptionalExtension, Row};

use super::db::{CatalogStore, DbError, DbResult};
use super::models::{CoffeeFields, CoffeeItem};

const SELECT_COLUMNS: &str = "SELECT id, sort_name, degree, type, description, price, size FROM coffee";

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<CoffeeItem> {
    Ok(CoffeeItem {
        id: row.get(0)?,
        fields: CoffeeFields {
            sort_name: row.get(1)?,
            degree: row.get(2)?,
            coffee_type: row.get(3)?,
            description: row.get(4)?,
            price: row.get(5)?,
            size: row.get(6)?,
        },
    })
}

impl CatalogStore {
    /// List every record in storage order.
    ///
    /// No ordering is imposed, so rows come back in insertion order; that order
    /// is not guaranteed to survive deletes made by other tools.
    pub fn list_all(&self) -> DbResult<Vec<CoffeeItem>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(SELECT_COLUMNS)?;

        let items = stmt
            .query_map([], row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Loaded {} coffee records", items.len());
        Ok(items)
    }

    /// Get a record by id, `None` if there is no such row
    pub fn get_by_id(&self, id: i64) -> DbResult<Option<CoffeeItem>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;

        Ok(stmt.query_row([id], row_to_item).optional()?)
    }

    /// Insert a new record and return the id assigned to it
    pub fn insert(&self, fields: &CoffeeFields) -> DbResult<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO coffee (sort_name, degree, type, description, price, size)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                fields.sort_name,
                fields.degree,
                fields.coffee_type,
                fields.description,
                fields.price,
                fields.size,
            ],
        )?;

        let id = conn.last_insert_rowid();
        log::info!("Inserted coffee record {} ({})", id, fields.sort_name);
        Ok(id)
    }

    /// Overwrite every editable field of the record with the given id.
    ///
    /// Returns [`DbError::NotFound`] when no row has that id.
    pub fn update(&self, id: i64, fields: &CoffeeFields) -> DbResult<()> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE coffee SET
                sort_name = ?1, degree = ?2, type = ?3, description = ?4, price = ?5, size = ?6
             WHERE id = ?7",
            params![
                fields.sort_name,
                fields.degree,
                fields.coffee_type,
                fields.description,
                fields.price,
                fields.size,
                id,
            ],
        )?;

        if changed == 0 {
            log::warn!("Update requested for missing coffee record {}", id);
            return Err(DbError::NotFound(id));
        }

        log::info!("Updated coffee record {}", id);
        Ok(())
    }
}
