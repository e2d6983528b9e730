//! Data access for categories.

use rusqlite::{Connection, OptionalExtension, Row};

use crate::category::{CategoryEntity, CategoryId};

/// Reads and writes categories in the store.
///
/// Implementations report store failures unmodified; deciding what a failure means is left to the
/// caller.
pub trait CategoryRepository {
    /// Get every category, ordered by ID. Returns an empty vector if there are none.
    fn find_all(&self) -> Result<Vec<CategoryEntity>, rusqlite::Error>;

    /// Get the category with `id`, if it exists.
    fn find_by_id(&self, id: CategoryId) -> Result<Option<CategoryEntity>, rusqlite::Error>;

    /// Get the category called `name`, if it exists.
    ///
    /// Names are not unique. When several categories share a name, the one with the lowest ID is
    /// returned.
    fn find_by_name(&self, name: &str) -> Result<Option<CategoryEntity>, rusqlite::Error>;

    /// Insert `category` if it has no ID, otherwise insert or replace the category with its ID.
    ///
    /// Returns the saved category, including the newly assigned ID for inserts.
    fn save(&self, category: CategoryEntity) -> Result<CategoryEntity, rusqlite::Error>;

    /// Delete the category with `id`. Deleting a category that does not exist is not an error.
    fn delete_by_id(&self, id: CategoryId) -> Result<(), rusqlite::Error>;
}

/// A [CategoryRepository] backed by a SQLite connection or transaction.
#[derive(Debug, Clone, Copy)]
pub struct SQLiteCategoryRepository<'a> {
    connection: &'a Connection,
}

impl<'a> SQLiteCategoryRepository<'a> {
    /// Create a repository that runs its queries on `connection`.
    ///
    /// Pass a [rusqlite::Transaction] (via deref) to group several calls atomically.
    pub fn new(connection: &'a Connection) -> Self {
        Self { connection }
    }
}

impl CategoryRepository for SQLiteCategoryRepository<'_> {
    fn find_all(&self) -> Result<Vec<CategoryEntity>, rusqlite::Error> {
        self.connection
            .prepare("SELECT id, name FROM category ORDER BY id ASC;")?
            .query_map([], map_row)?
            .collect()
    }

    fn find_by_id(&self, id: CategoryId) -> Result<Option<CategoryEntity>, rusqlite::Error> {
        self.connection
            .prepare("SELECT id, name FROM category WHERE id = :id;")?
            .query_row(&[(":id", &id)], map_row)
            .optional()
    }

    fn find_by_name(&self, name: &str) -> Result<Option<CategoryEntity>, rusqlite::Error> {
        self.connection
            .prepare("SELECT id, name FROM category WHERE name = :name ORDER BY id ASC LIMIT 1;")?
            .query_row(&[(":name", &name)], map_row)
            .optional()
    }

    fn save(&self, category: CategoryEntity) -> Result<CategoryEntity, rusqlite::Error> {
        match category.id {
            None => {
                self.connection.execute(
                    "INSERT INTO category (name) VALUES (?1);",
                    (category.name.as_str(),),
                )?;

                Ok(CategoryEntity {
                    id: Some(self.connection.last_insert_rowid()),
                    name: category.name,
                })
            }
            Some(id) => {
                self.connection.execute(
                    "INSERT INTO category (id, name) VALUES (?1, ?2)
                    ON CONFLICT(id) DO UPDATE SET name = excluded.name;",
                    (id, category.name.as_str()),
                )?;

                Ok(category)
            }
        }
    }

    fn delete_by_id(&self, id: CategoryId) -> Result<(), rusqlite::Error> {
        self.connection
            .execute("DELETE FROM category WHERE id = ?1;", [id])?;

        Ok(())
    }
}

/// Initialize the category table.
///
/// `AUTOINCREMENT` stops SQLite from reusing the ID of a deleted category.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<CategoryEntity, rusqlite::Error> {
    Ok(CategoryEntity {
        id: Some(row.get(0)?),
        name: row.get(1)?,
    })
}
