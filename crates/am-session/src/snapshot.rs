//! DuckDB-backed management group snapshot
//!
//! A snapshot is a DuckDB file holding an export of a management group's
//! classes, objects, relationships, properties, enumerations, monitor states
//! and performance samples. Property writes are committed straight to the
//! file, one statement per write.

use crate::error::{SessionError, SessionResult};
use crate::traits::ManagementSession;
use crate::traversal;
use am_core::{
    ClassDescriptor, ClassName, CounterPath, EnumerationValue, HealthState,
    InfrastructureObject, MonitorState, ObjectId, PerfSample, PropertyValue, TimeWindow,
    Traversal,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use duckdb::{params, Connection, ToSql};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// DDL for an empty snapshot
const SNAPSHOT_DDL: &str = include_str!("snapshot.sql");

const OBJECT_COLUMNS: &str = "o.id, o.class_name, o.display_name, o.full_name";

/// Session over a DuckDB snapshot
pub struct DuckDbSession {
    server_name: String,
    conn: Mutex<Connection>,
}

impl DuckDbSession {
    /// Open an existing snapshot file.
    ///
    /// Fails with a connection error when the file does not exist or does
    /// not contain a snapshot, so a typo never silently creates a new file.
    pub fn open(server_name: &str, path: &Path) -> SessionResult<Self> {
        if !path.exists() {
            return Err(SessionError::ConnectionError(format!(
                "snapshot for '{}' not found at {}",
                server_name,
                path.display()
            )));
        }
        let conn = Connection::open(path)
            .map_err(|e| SessionError::ConnectionError(format!("{}: {}", e, path.display())))?;
        let session = Self {
            server_name: server_name.to_string(),
            conn: Mutex::new(conn),
        };
        if !session.has_snapshot_tables()? {
            return Err(SessionError::ConnectionError(format!(
                "{} is not a management group snapshot",
                path.display()
            )));
        }
        Ok(session)
    }

    /// Create a new snapshot file with an empty schema.
    pub fn create(server_name: &str, path: &Path) -> SessionResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| SessionError::ConnectionError(format!("{}: {}", e, path.display())))?;
        let session = Self {
            server_name: server_name.to_string(),
            conn: Mutex::new(conn),
        };
        session.create_schema()?;
        Ok(session)
    }

    /// Create an empty in-memory snapshot
    pub fn in_memory(server_name: &str) -> SessionResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| SessionError::ConnectionError(e.to_string()))?;
        let session = Self {
            server_name: server_name.to_string(),
            conn: Mutex::new(conn),
        };
        session.create_schema()?;
        Ok(session)
    }

    /// Open from a path string (handles the :memory: special case)
    pub fn new(server_name: &str, path: &str) -> SessionResult<Self> {
        if path == ":memory:" {
            Self::in_memory(server_name)
        } else {
            Self::open(server_name, Path::new(path))
        }
    }

    /// Create the snapshot tables if they do not exist
    pub fn create_schema(&self) -> SessionResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(SNAPSHOT_DDL)?;
        Ok(())
    }

    fn lock(&self) -> SessionResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| SessionError::MutexPoisoned(e.to_string()))
    }

    fn has_snapshot_tables(&self) -> SessionResult<bool> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_name IN ('objects', 'relationships', 'properties')",
            [],
            |row| row.get(0),
        )?;
        Ok(count == 3)
    }

    fn query_objects_sync(
        &self,
        sql: &str,
        args: &[&dyn ToSql],
    ) -> SessionResult<Vec<InfrastructureObject>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(args, |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, class_name, display_name, full_name)| {
                Ok(InfrastructureObject {
                    id: parse_object_id(&id)?,
                    class_name: ClassName::try_new(class_name).ok_or_else(|| {
                        SessionError::InvalidData(format!("object {} has an empty class", id))
                    })?,
                    display_name,
                    full_name,
                })
            })
            .collect()
    }

    fn children_sync(&self, id: ObjectId) -> SessionResult<Vec<InfrastructureObject>> {
        let sql = format!(
            "SELECT {OBJECT_COLUMNS} FROM relationships r \
             JOIN objects o ON o.id = r.target_id \
             WHERE r.source_id = ? ORDER BY r.rowid"
        );
        self.query_objects_sync(&sql, params![id.to_string()])
    }

    fn lookup_enumeration_by_path(
        conn: &Connection,
        path: &str,
    ) -> SessionResult<Option<EnumerationValue>> {
        let mut stmt = conn.prepare(
            "SELECT management_pack, path, display_name FROM enumerations WHERE path = ? LIMIT 1",
        )?;
        let mut rows = stmt.query_map(params![path], enumeration_from_row)?;
        Ok(rows.next().transpose()?)
    }

    /// Add a class to the snapshot
    pub fn insert_class(&self, name: &str, display_name: &str) -> SessionResult<ClassDescriptor> {
        let class = ClassDescriptor {
            id: Uuid::new_v4(),
            name: ClassName::try_new(name)
                .ok_or_else(|| SessionError::InvalidData("empty class name".to_string()))?,
            display_name: display_name.to_string(),
        };
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO classes (id, name, display_name) VALUES (?, ?, ?)",
            params![class.id.to_string(), name, display_name],
        )?;
        Ok(class)
    }

    /// Add an object to the snapshot
    pub fn insert_object(
        &self,
        class: &ClassName,
        display_name: &str,
        full_name: &str,
    ) -> SessionResult<InfrastructureObject> {
        let object = InfrastructureObject {
            id: ObjectId::random(),
            class_name: class.clone(),
            display_name: display_name.to_string(),
            full_name: full_name.to_string(),
        };
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO objects (id, class_name, display_name, full_name) VALUES (?, ?, ?, ?)",
            params![
                object.id.to_string(),
                class.as_str(),
                display_name,
                full_name
            ],
        )?;
        Ok(object)
    }

    /// Record that `source` hosts or contains `target`
    pub fn relate(
        &self,
        source: &InfrastructureObject,
        target: &InfrastructureObject,
    ) -> SessionResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO relationships (source_id, target_id) VALUES (?, ?)",
            params![source.id.to_string(), target.id.to_string()],
        )?;
        Ok(())
    }

    /// Declare a property on an object with an initial value
    pub fn declare_property(
        &self,
        object: &InfrastructureObject,
        key: &str,
        value: &PropertyValue,
    ) -> SessionResult<()> {
        let (stored, is_enum) = stored_value(value);
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO properties (object_id, key, value, is_enum) VALUES (?, ?, ?, ?)",
            params![object.id.to_string(), key, stored, is_enum],
        )?;
        Ok(())
    }

    /// Add an enumeration value
    pub fn insert_enumeration(&self, value: &EnumerationValue) -> SessionResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO enumerations (management_pack, path, display_name) VALUES (?, ?, ?)",
            params![value.management_pack, value.path, value.display_name],
        )?;
        Ok(())
    }

    /// Add a monitor state row
    pub fn insert_monitor_state(
        &self,
        object: &InfrastructureObject,
        state: &MonitorState,
    ) -> SessionResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO monitor_states (object_id, monitor, health, last_modified_ms) VALUES (?, ?, ?, ?)",
            params![
                object.id.to_string(),
                state.monitor,
                state.health.as_str(),
                state.last_modified.timestamp_millis()
            ],
        )?;
        Ok(())
    }

    /// Add a performance sample
    pub fn insert_perf_sample(
        &self,
        object: &InfrastructureObject,
        counter: &CounterPath,
        sample: &PerfSample,
    ) -> SessionResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO perf_samples (object_id, object_name, counter_name, instance_name, sampled_at_ms, value) \
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                object.id.to_string(),
                counter.object,
                counter.counter,
                counter.instance,
                sample.timestamp.timestamp_millis(),
                sample.value
            ],
        )?;
        Ok(())
    }
}

fn parse_object_id(id: &str) -> SessionResult<ObjectId> {
    ObjectId::parse(id).ok_or_else(|| SessionError::InvalidData(format!("bad object id '{}'", id)))
}

fn enumeration_from_row(row: &duckdb::Row<'_>) -> duckdb::Result<EnumerationValue> {
    Ok(EnumerationValue {
        management_pack: row.get(0)?,
        path: row.get(1)?,
        display_name: row.get(2)?,
    })
}

fn stored_value(value: &PropertyValue) -> (Option<String>, bool) {
    match value {
        PropertyValue::Unset => (None, false),
        PropertyValue::Text(s) => (Some(s.clone()), false),
        PropertyValue::Enumeration(e) => (Some(e.path.clone()), true),
    }
}

fn timestamp_from_millis(ms: i64) -> SessionResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| SessionError::InvalidData(format!("timestamp out of range: {}", ms)))
}

#[async_trait]
impl ManagementSession for DuckDbSession {
    fn server_name(&self) -> &str {
        &self.server_name
    }

    async fn classes_by_name(&self, names: &[ClassName]) -> SessionResult<Vec<ClassDescriptor>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, display_name FROM classes WHERE lower(name) = lower(?) LIMIT 1",
        )?;
        let mut classes = Vec::with_capacity(names.len());
        for name in names {
            let mut rows = stmt.query_map(params![name.as_str()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?;
            if let Some((id, class_name, display_name)) = rows.next().transpose()? {
                classes.push(ClassDescriptor {
                    id: Uuid::parse_str(&id).map_err(|e| {
                        SessionError::InvalidData(format!("bad class id '{}': {}", id, e))
                    })?,
                    name: ClassName::try_new(class_name).ok_or_else(|| {
                        SessionError::InvalidData(format!("class {} has an empty name", id))
                    })?,
                    display_name,
                });
            }
        }
        Ok(classes)
    }

    async fn instances_of_class(
        &self,
        class: &ClassDescriptor,
    ) -> SessionResult<Vec<InfrastructureObject>> {
        let sql = format!(
            "SELECT {OBJECT_COLUMNS} FROM objects o \
             WHERE lower(o.class_name) = lower(?) ORDER BY o.rowid"
        );
        self.query_objects_sync(&sql, params![class.name.as_str()])
    }

    async fn instances_by_display_name(
        &self,
        names: &[&str],
    ) -> SessionResult<Vec<InfrastructureObject>> {
        let sql = format!(
            "SELECT {OBJECT_COLUMNS} FROM objects o WHERE o.display_name = ? ORDER BY o.rowid"
        );
        let mut found = Vec::new();
        for name in names {
            found.extend(self.query_objects_sync(&sql, params![name])?);
        }
        Ok(found)
    }

    async fn related_objects(
        &self,
        object: &InfrastructureObject,
        class: Option<&ClassDescriptor>,
        traversal: Traversal,
    ) -> SessionResult<Vec<InfrastructureObject>> {
        traversal::walk(object, class, traversal, |id| self.children_sync(id))
    }

    async fn parent_objects(
        &self,
        object: &InfrastructureObject,
    ) -> SessionResult<Vec<InfrastructureObject>> {
        let sql = format!(
            "SELECT {OBJECT_COLUMNS} FROM relationships r \
             JOIN objects o ON o.id = r.source_id \
             WHERE r.target_id = ? ORDER BY r.rowid"
        );
        self.query_objects_sync(&sql, params![object.id.to_string()])
    }

    async fn read_property(
        &self,
        object: &InfrastructureObject,
        key: &str,
    ) -> SessionResult<Option<PropertyValue>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT value, is_enum FROM properties WHERE object_id = ? AND lower(key) = lower(?)",
        )?;
        let mut rows = stmt.query_map(params![object.id.to_string(), key], |row| {
            Ok((row.get::<_, Option<String>>(0)?, row.get::<_, bool>(1)?))
        })?;
        let Some((value, is_enum)) = rows.next().transpose()? else {
            return Ok(None);
        };

        let value = match (value, is_enum) {
            (None, _) => PropertyValue::Unset,
            (Some(path), true) => match Self::lookup_enumeration_by_path(&conn, &path)? {
                Some(e) => PropertyValue::Enumeration(e),
                None => {
                    log::debug!("Enumeration '{}' not in snapshot, returning raw path", path);
                    PropertyValue::Text(path)
                }
            },
            (Some(text), false) => PropertyValue::Text(text),
        };
        Ok(Some(value))
    }

    async fn write_property(
        &self,
        object: &InfrastructureObject,
        key: &str,
        value: PropertyValue,
    ) -> SessionResult<()> {
        let (stored, is_enum) = stored_value(&value);
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE properties SET value = ?, is_enum = ? WHERE object_id = ? AND lower(key) = lower(?)",
            params![stored, is_enum, object.id.to_string(), key],
        )?;
        if updated == 0 {
            return Err(SessionError::PropertyNotDeclared {
                object: object.display_name.clone(),
                key: key.to_string(),
            });
        }
        Ok(())
    }

    async fn lookup_enumeration(
        &self,
        management_pack: &str,
        path: &str,
    ) -> SessionResult<Option<EnumerationValue>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT management_pack, path, display_name FROM enumerations \
             WHERE management_pack = ? AND path = ?",
        )?;
        let mut rows = stmt.query_map(params![management_pack, path], enumeration_from_row)?;
        Ok(rows.next().transpose()?)
    }

    async fn monitor_states(
        &self,
        object: &InfrastructureObject,
    ) -> SessionResult<Vec<MonitorState>> {
        let rows = {
            let conn = self.lock()?;
            let mut stmt = conn.prepare(
                "SELECT monitor, health, last_modified_ms FROM monitor_states \
                 WHERE object_id = ? ORDER BY monitor",
            )?;
            let rows = stmt
                .query_map(params![object.id.to_string()], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        rows.into_iter()
            .map(|(monitor, health, ms)| {
                Ok(MonitorState {
                    health: health.parse::<HealthState>().map_err(SessionError::InvalidData)?,
                    last_modified: timestamp_from_millis(ms)?,
                    monitor,
                })
            })
            .collect()
    }

    async fn performance_samples(
        &self,
        object: &InfrastructureObject,
        counter: &CounterPath,
        window: &TimeWindow,
    ) -> SessionResult<Vec<PerfSample>> {
        let object_id = object.id.to_string();
        let start = window.start.timestamp_millis();
        let end = window.end.timestamp_millis();

        let rows = {
            let conn = self.lock()?;
            let base = "SELECT sampled_at_ms, value FROM perf_samples \
                        WHERE object_id = ? AND object_name = ? AND counter_name = ? \
                        AND sampled_at_ms >= ? AND sampled_at_ms < ?";
            let map_row = |row: &duckdb::Row<'_>| -> duckdb::Result<(i64, f64)> {
                Ok((row.get(0)?, row.get(1)?))
            };
            match &counter.instance {
                Some(instance) => {
                    let mut stmt =
                        conn.prepare(&format!("{base} AND instance_name = ? ORDER BY sampled_at_ms"))?;
                    let rows = stmt
                        .query_map(
                            params![object_id, counter.object, counter.counter, start, end, instance],
                            map_row,
                        )?
                        .collect::<Result<Vec<_>, _>>()?;
                    rows
                }
                None => {
                    let mut stmt = conn.prepare(&format!("{base} ORDER BY sampled_at_ms"))?;
                    let rows = stmt
                        .query_map(
                            params![object_id, counter.object, counter.counter, start, end],
                            map_row,
                        )?
                        .collect::<Result<Vec<_>, _>>()?;
                    rows
                }
            }
        };

        rows.into_iter()
            .map(|(ms, value)| {
                Ok(PerfSample {
                    timestamp: timestamp_from_millis(ms)?,
                    value,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
