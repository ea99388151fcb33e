//! SQLite storage for the reference catalog

use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

use crate::catalog::ReferenceCatalog;
use crate::models::{JobRole, Location};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Job roles with their salary baseline
        CREATE TABLE IF NOT EXISTS job_roles (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            cost_multiplier REAL NOT NULL,
            base_salary REAL NOT NULL,
            position INTEGER NOT NULL
        );

        -- Locations; position fixes the catalog order used for tie-breaking
        CREATE TABLE IF NOT EXISTS locations (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            cost_index REAL NOT NULL,
            social_charge_rate REAL NOT NULL,
            benefits_rate REAL NOT NULL,
            contractor_premium REAL NOT NULL,
            position INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_job_roles_position ON job_roles(position);
        CREATE INDEX IF NOT EXISTS idx_locations_position ON locations(position);
        "#,
    )?;
    Ok(())
}

/// Remove every role and location
pub fn clear_catalog(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM job_roles;
        DELETE FROM locations;
        "#,
    )?;
    Ok(())
}

/// Insert or replace a job role
pub fn upsert_role(conn: &Connection, role: &JobRole, base_salary: f64, position: usize) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO job_roles (id, name, cost_multiplier, base_salary, position)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        (&role.id, &role.name, role.cost_multiplier, base_salary, position as i64),
    )?;
    Ok(())
}

/// Insert or replace a location
pub fn upsert_location(conn: &Connection, location: &Location, position: usize) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO locations
            (id, name, cost_index, social_charge_rate, benefits_rate, contractor_premium, position)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        (
            &location.id,
            &location.name,
            location.cost_index,
            location.social_charge_rate,
            location.benefits_rate,
            location.contractor_premium,
            position as i64,
        ),
    )?;
    Ok(())
}

/// Replace the stored catalog with `catalog`, in one transaction
pub fn store_catalog(conn: &mut Connection, catalog: &ReferenceCatalog) -> Result<()> {
    let tx = conn.transaction()?;
    clear_catalog(&tx)?;

    for (position, role) in catalog.roles().iter().enumerate() {
        let salary = catalog.base_salary(&role.id)?;
        upsert_role(&tx, role, salary, position)?;
    }
    for (position, location) in catalog.locations().iter().enumerate() {
        upsert_location(&tx, location, position)?;
    }

    tx.commit()?;
    info!(
        roles = catalog.roles().len(),
        locations = catalog.locations().len(),
        "stored reference catalog"
    );
    Ok(())
}

/// List all roles with their base salaries, in catalog order
pub fn list_roles(conn: &Connection) -> Result<Vec<(JobRole, f64)>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, cost_multiplier, base_salary FROM job_roles ORDER BY position, id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            JobRole {
                id: row.get(0)?,
                name: row.get(1)?,
                cost_multiplier: row.get(2)?,
            },
            row.get::<_, f64>(3)?,
        ))
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// List all locations, in catalog order
pub fn list_locations(conn: &Connection) -> Result<Vec<Location>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, cost_index, social_charge_rate, benefits_rate, contractor_premium
         FROM locations ORDER BY position, id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Location {
            id: row.get(0)?,
            name: row.get(1)?,
            cost_index: row.get(2)?,
            social_charge_rate: row.get(3)?,
            benefits_rate: row.get(4)?,
            contractor_premium: row.get(5)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Read the stored tables into a validated catalog
pub fn load_catalog(conn: &Connection) -> Result<ReferenceCatalog> {
    let mut roles = Vec::new();
    let mut salaries = HashMap::new();
    for (role, salary) in list_roles(conn)? {
        salaries.insert(role.id.clone(), salary);
        roles.push(role);
    }
    let locations = list_locations(conn)?;

    let (role_count, location_count) = (roles.len(), locations.len());
    let catalog = ReferenceCatalog::new(roles, locations, salaries)
        .context("stored catalog is not usable; run 'load-sample' to reset it")?;

    info!(roles = role_count, locations = location_count, "loaded reference catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn catalog_survives_storage_in_order() {
        let mut conn = memory_db();
        let builtin = ReferenceCatalog::builtin();
        store_catalog(&mut conn, &builtin).unwrap();

        let loaded = load_catalog(&conn).unwrap();
        assert_eq!(loaded.roles(), builtin.roles());
        assert_eq!(loaded.locations(), builtin.locations());
        assert_eq!(loaded.base_salary("product-manager").unwrap(), 105000.0);
    }

    #[test]
    fn storing_twice_replaces_rows() {
        let mut conn = memory_db();
        let builtin = ReferenceCatalog::builtin();
        store_catalog(&mut conn, &builtin).unwrap();
        store_catalog(&mut conn, &builtin).unwrap();
        assert_eq!(list_locations(&conn).unwrap().len(), 8);
        assert_eq!(list_roles(&conn).unwrap().len(), 8);
    }

    #[test]
    fn empty_database_is_not_a_catalog() {
        let conn = memory_db();
        assert!(load_catalog(&conn).is_err());
    }

    #[test]
    fn upserted_location_joins_catalog() {
        let mut conn = memory_db();
        store_catalog(&mut conn, &ReferenceCatalog::builtin()).unwrap();

        let brazil = Location {
            id: "brazil".to_string(),
            name: "Brazil".to_string(),
            cost_index: 0.32,
            social_charge_rate: 0.3,
            benefits_rate: 0.12,
            contractor_premium: 1.3,
        };
        upsert_location(&conn, &brazil, 8).unwrap();

        let loaded = load_catalog(&conn).unwrap();
        assert_eq!(loaded.locations().last(), Some(&brazil));
    }
}
