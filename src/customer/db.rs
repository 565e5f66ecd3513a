//! Database operations for customers.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    customer::{Customer, CustomerId, Email, NewCustomer, PasswordHash},
};

const CUSTOMER_COLUMNS: &str =
    "id, first_name, last_name, email, phone, address, city, state, pincode, created_at";

/// Create and insert a new customer into the database.
///
/// # Errors
///
/// Returns an [Error::DuplicateEmail] if the email address is already registered,
/// or an [Error::SqlError] if some other SQL related error occurred.
pub fn create_customer(
    customer: NewCustomer,
    password_hash: &PasswordHash,
    connection: &Connection,
) -> Result<Customer, Error> {
    // Whole seconds so the stored value reads back identically.
    let now = OffsetDateTime::now_utc();
    let created_at = now.replace_nanosecond(0).unwrap_or(now);

    connection.execute(
        "INSERT INTO customer
            (first_name, last_name, email, phone, address, city, state, pincode, password, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
        (
            &customer.first_name,
            &customer.last_name,
            customer.email.as_ref(),
            &customer.phone,
            &customer.address,
            &customer.city,
            &customer.state,
            &customer.pincode,
            password_hash.as_ref(),
            created_at,
        ),
    )?;

    let id = CustomerId::new(connection.last_insert_rowid());

    Ok(Customer {
        id,
        first_name: customer.first_name,
        last_name: customer.last_name,
        email: customer.email,
        phone: customer.phone,
        address: customer.address,
        city: customer.city,
        state: customer.state,
        pincode: customer.pincode,
        created_at,
    })
}

/// Get the customer with an ID equal to `customer_id`.
///
/// # Errors
///
/// This function will return an [Error::NotFound] if `customer_id` does not belong to a
/// registered customer.
pub fn get_customer(customer_id: CustomerId, connection: &Connection) -> Result<Customer, Error> {
    connection
        .prepare(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE id = :id;"
        ))?
        .query_row(&[(":id", &customer_id.as_i64())], map_row)
        .map_err(|error| error.into())
}

/// Get the customer registered with `email` together with their password hash.
///
/// Email addresses are compared case-insensitively.
///
/// # Errors
///
/// This function will return an [Error::NotFound] if no customer has registered with `email`.
pub fn get_customer_with_password_by_email(
    email: &str,
    connection: &Connection,
) -> Result<(Customer, PasswordHash), Error> {
    connection
        .prepare(&format!(
            "SELECT {CUSTOMER_COLUMNS}, password FROM customer WHERE email = :email;"
        ))?
        .query_row(&[(":email", &email.trim())], |row| {
            let customer = map_row(row)?;
            let raw_password_hash: String = row.get(10)?;

            Ok((customer, PasswordHash::new_unchecked(&raw_password_hash)))
        })
        .map_err(|error| error.into())
}

/// Overwrite the profile fields of an existing customer.
///
/// The password and creation time are never changed.
///
/// # Errors
///
/// Returns an [Error::UpdateMissingCustomer] if the customer does not exist, or an
/// [Error::DuplicateEmail] if the new email address belongs to another customer.
pub fn update_customer(customer: &Customer, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE customer
        SET first_name = ?1, last_name = ?2, email = ?3, phone = ?4, address = ?5,
            city = ?6, state = ?7, pincode = ?8
        WHERE id = ?9",
        (
            &customer.first_name,
            &customer.last_name,
            customer.email.as_ref(),
            &customer.phone,
            &customer.address,
            &customer.city,
            &customer.state,
            &customer.pincode,
            customer.id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCustomer);
    }

    Ok(())
}

/// Create the customer table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_customer_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS customer (
            id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL UNIQUE COLLATE NOCASE,
            phone TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            city TEXT NOT NULL DEFAULT '',
            state TEXT NOT NULL DEFAULT '',
            pincode TEXT NOT NULL DEFAULT '',
            password TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Customer, rusqlite::Error> {
    let raw_email: String = row.get(3)?;

    Ok(Customer {
        id: CustomerId::new(row.get(0)?),
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: Email::new_unchecked(&raw_email),
        phone: row.get(4)?,
        address: row.get(5)?,
        city: row.get(6)?,
        state: row.get(7)?,
        pincode: row.get(8)?,
        created_at: row.get(9)?,
    })
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use crate::customer::{Email, NewCustomer};

    pub(crate) fn new_customer(email: &str) -> NewCustomer {
        NewCustomer {
            first_name: "Asha".to_owned(),
            last_name: "Verma".to_owned(),
            email: Email::new_unchecked(email),
            phone: "9876543210".to_owned(),
            address: "12 MG Road".to_owned(),
            city: "Pune".to_owned(),
            state: "Maharashtra".to_owned(),
            pincode: "411001".to_owned(),
        }
    }
}
