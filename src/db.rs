//! Database setup.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::category::create_category_table;

/// Create the tables for the domain models if they do not exist yet.
///
/// All tables are created in a single transaction, so a failure leaves the database untouched.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;

    transaction.commit()
}
