//! SQLite storage backend

use crate::error::{StorageError, StorageResult};
use crate::traits::TreeStore;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::path::Path;
use stemma_core::{ParentChildLink, Person, PersonId, Sex, UnionKind, UnionRecord};

/// Schema version recorded in `PRAGMA user_version`
const SCHEMA_VERSION: u32 = 1;

/// SQLite storage backend
///
/// Holds one connection; the system is single-threaded, so no locking
/// wraps it. Referential integrity mirrors the in-memory rules: link
/// endpoints must exist and differ, union partners may be null.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory SQLite database (for testing)
    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StorageResult<()> {
        let found: u32 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if found > SCHEMA_VERSION {
            return Err(StorageError::SchemaVersion {
                found,
                supported: SCHEMA_VERSION,
            });
        }

        self.conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS person (
                id           TEXT PRIMARY KEY,
                given_name   TEXT NOT NULL,
                family_name  TEXT NOT NULL,
                middle_names TEXT,
                sex          TEXT NOT NULL DEFAULT 'unknown'
                             CHECK (sex IN ('male', 'female', 'unknown', 'other')),
                birth_date   TEXT,
                death_date   TEXT,
                birth_place  TEXT,
                notes        TEXT
            );

            CREATE TABLE IF NOT EXISTS union_record (
                id         TEXT PRIMARY KEY,
                kind       TEXT NOT NULL DEFAULT 'marriage',
                partner_a  TEXT REFERENCES person(id) ON DELETE SET NULL ON UPDATE CASCADE,
                partner_b  TEXT REFERENCES person(id) ON DELETE SET NULL ON UPDATE CASCADE,
                start_date TEXT,
                end_date   TEXT,
                location   TEXT,
                notes      TEXT
            );

            CREATE TABLE IF NOT EXISTS parent_child_link (
                id       TEXT PRIMARY KEY,
                parent   TEXT NOT NULL REFERENCES person(id) ON DELETE CASCADE ON UPDATE CASCADE,
                child    TEXT NOT NULL REFERENCES person(id) ON DELETE CASCADE ON UPDATE CASCADE,
                adoptive INTEGER NOT NULL DEFAULT 0 CHECK (adoptive IN (0, 1)),
                notes    TEXT,
                CHECK (parent <> child)
            );

            CREATE INDEX IF NOT EXISTS idx_person_family ON person(family_name);
            CREATE INDEX IF NOT EXISTS idx_link_parent ON parent_child_link(parent);
            CREATE INDEX IF NOT EXISTS idx_link_child ON parent_child_link(child);
            CREATE INDEX IF NOT EXISTS idx_union_partner_a ON union_record(partner_a);
            CREATE INDEX IF NOT EXISTS idx_union_partner_b ON union_record(partner_b);
            "#,
        )?;

        self.conn
            .pragma_update(None, "user_version", SCHEMA_VERSION)?;
        tracing::debug!("schema ready at version {}", SCHEMA_VERSION);
        Ok(())
    }
}

impl TreeStore for SqliteStore {
    fn save_person(&self, person: &Person) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO person (id, given_name, family_name, middle_names, sex,
                                 birth_date, death_date, birth_place, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                 given_name = excluded.given_name,
                 family_name = excluded.family_name,
                 middle_names = excluded.middle_names,
                 sex = excluded.sex,
                 birth_date = excluded.birth_date,
                 death_date = excluded.death_date,
                 birth_place = excluded.birth_place,
                 notes = excluded.notes",
            params![
                person.id.to_string(),
                person.given_name,
                person.family_name,
                person.middle_names,
                person.sex.as_str(),
                person.birth_date.map(|d| d.to_string()),
                person.death_date.map(|d| d.to_string()),
                person.birth_place,
                person.notes,
            ],
        )?;
        Ok(())
    }

    fn load_people(&self) -> StorageResult<Vec<Person>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, given_name, family_name, middle_names, sex,
                    birth_date, death_date, birth_place, notes
             FROM person",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, Option<String>>(6)?,
                row.get::<_, Option<String>>(7)?,
                row.get::<_, Option<String>>(8)?,
            ))
        })?;

        let mut people = Vec::new();
        for row in rows {
            let (id, given_name, family_name, middle_names, sex, birth, death, place, notes) =
                row?;
            people.push(Person {
                id: id.parse()?,
                given_name,
                family_name,
                middle_names,
                sex: Sex::parse_lossy(&sex),
                birth_date: parse_date(birth)?,
                death_date: parse_date(death)?,
                birth_place: place,
                notes,
            });
        }
        Ok(people)
    }

    fn append_link(&self, link: &ParentChildLink) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO parent_child_link (id, parent, child, adoptive, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                link.id.to_string(),
                link.parent.to_string(),
                link.child.to_string(),
                link.adoptive,
                link.notes,
            ],
        )?;
        Ok(())
    }

    fn load_links(&self) -> StorageResult<Vec<ParentChildLink>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, parent, child, adoptive, notes FROM parent_child_link")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, bool>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?;

        let mut links = Vec::new();
        for row in rows {
            let (id, parent, child, adoptive, notes) = row?;
            links.push(ParentChildLink {
                id: id.parse()?,
                parent: parent.parse()?,
                child: child.parse()?,
                adoptive,
                notes,
            });
        }
        Ok(links)
    }

    fn save_union(&self, record: &UnionRecord) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO union_record (id, kind, partner_a, partner_b,
                                       start_date, end_date, location, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                 kind = excluded.kind,
                 partner_a = excluded.partner_a,
                 partner_b = excluded.partner_b,
                 start_date = excluded.start_date,
                 end_date = excluded.end_date,
                 location = excluded.location,
                 notes = excluded.notes",
            params![
                record.id.to_string(),
                record.kind.as_str(),
                record.partner_a.as_ref().map(|id| id.to_string()),
                record.partner_b.as_ref().map(|id| id.to_string()),
                record.start_date.map(|d| d.to_string()),
                record.end_date.map(|d| d.to_string()),
                record.location,
                record.notes,
            ],
        )?;
        Ok(())
    }

    fn load_unions(&self) -> StorageResult<Vec<UnionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, partner_a, partner_b, start_date, end_date, location, notes
             FROM union_record",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, Option<String>>(6)?,
                row.get::<_, Option<String>>(7)?,
            ))
        })?;

        let mut unions = Vec::new();
        for row in rows {
            let (id, kind, partner_a, partner_b, start, end, location, notes) = row?;
            unions.push(UnionRecord {
                id: id.parse()?,
                kind: UnionKind::parse_lossy(&kind),
                partner_a: parse_partner(partner_a)?,
                partner_b: parse_partner(partner_b)?,
                start_date: parse_date(start)?,
                end_date: parse_date(end)?,
                location,
                notes,
            });
        }
        Ok(unions)
    }
}

/// Parse an optional ISO date column; null or blank means absent
fn parse_date(text: Option<String>) -> StorageResult<Option<NaiveDate>> {
    match text.as_deref() {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Ok(Some(s.parse::<NaiveDate>()?)),
    }
}

/// Parse an optional partner id column
fn parse_partner(text: Option<String>) -> StorageResult<Option<PersonId>> {
    match text {
        None => Ok(None),
        Some(s) => Ok(Some(s.parse()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stemma_core::{LinkId, Sex};

    fn sample_person(given: &str) -> Person {
        Person::new(given, "Byron", Sex::Unknown)
    }

    #[test]
    fn test_person_round_trip() {
        let store = SqliteStore::in_memory().unwrap();
        let person = Person::new("Ada", "Lovelace", Sex::Female)
            .with_middle_names("Augusta")
            .with_birth_date(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap())
            .with_death_date(NaiveDate::from_ymd_opt(1852, 11, 27).unwrap())
            .with_birth_place("London")
            .with_notes("analyst");

        store.save_person(&person).unwrap();

        let loaded = store.load_people().unwrap();
        assert_eq!(loaded.len(), 1);
        let got = &loaded[0];
        assert_eq!(got.id, person.id);
        assert_eq!(got.given_name, "Ada");
        assert_eq!(got.middle_names.as_deref(), Some("Augusta"));
        assert_eq!(got.sex, Sex::Female);
        assert_eq!(got.birth_date, person.birth_date);
        assert_eq!(got.death_date, person.death_date);
        assert_eq!(got.birth_place.as_deref(), Some("London"));
        assert_eq!(got.notes.as_deref(), Some("analyst"));
    }

    #[test]
    fn test_save_person_replaces_by_id() {
        let store = SqliteStore::in_memory().unwrap();
        let mut person = sample_person("Ada");
        store.save_person(&person).unwrap();

        person.given_name = "Augusta".to_string();
        store.save_person(&person).unwrap();

        let loaded = store.load_people().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].given_name, "Augusta");
    }

    #[test]
    fn test_resaving_person_keeps_links() {
        // Cascading deletes must not fire on a replace-style save
        let store = SqliteStore::in_memory().unwrap();
        let mut parent = sample_person("Anne");
        let child = sample_person("Ada");
        store.save_person(&parent).unwrap();
        store.save_person(&child).unwrap();

        let link = ParentChildLink::new(parent.id.clone(), child.id.clone(), false);
        store.append_link(&link).unwrap();

        parent.notes = Some("updated".to_string());
        store.save_person(&parent).unwrap();

        assert_eq!(store.load_links().unwrap().len(), 1);
    }

    #[test]
    fn test_link_round_trip() {
        let store = SqliteStore::in_memory().unwrap();
        let parent = sample_person("Anne");
        let child = sample_person("Ada");
        store.save_person(&parent).unwrap();
        store.save_person(&child).unwrap();

        let link = ParentChildLink::new(parent.id.clone(), child.id.clone(), true)
            .with_notes("ward");
        store.append_link(&link).unwrap();

        let loaded = store.load_links().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, link.id);
        assert_eq!(loaded[0].parent, parent.id);
        assert_eq!(loaded[0].child, child.id);
        assert!(loaded[0].adoptive);
        assert_eq!(loaded[0].notes.as_deref(), Some("ward"));
    }

    #[test]
    fn test_link_to_missing_person_rejected_by_schema() {
        let store = SqliteStore::in_memory().unwrap();
        let parent = sample_person("Anne");
        store.save_person(&parent).unwrap();

        let link = ParentChildLink::new(parent.id.clone(), stemma_core::PersonId::new(), false);
        let err = store.append_link(&link).unwrap_err();
        assert!(matches!(err, StorageError::Sqlite(_)));
    }

    #[test]
    fn test_union_round_trip() {
        let store = SqliteStore::in_memory().unwrap();
        let a = sample_person("Anne");
        let b = sample_person("George");
        store.save_person(&a).unwrap();
        store.save_person(&b).unwrap();

        let record = UnionRecord::new(UnionKind::CivilUnion)
            .with_partners(a.id.clone(), b.id.clone())
            .with_start_date(NaiveDate::from_ymd_opt(1815, 1, 2).unwrap())
            .with_end_date(NaiveDate::from_ymd_opt(1816, 4, 21).unwrap())
            .with_location("Seaham")
            .with_notes("separated");
        store.save_union(&record).unwrap();

        let loaded = store.load_unions().unwrap();
        assert_eq!(loaded.len(), 1);
        let got = &loaded[0];
        assert_eq!(got.id, record.id);
        assert_eq!(got.kind, UnionKind::CivilUnion);
        assert_eq!(got.partner_a, Some(a.id));
        assert_eq!(got.partner_b, Some(b.id));
        assert_eq!(got.start_date, record.start_date);
        assert_eq!(got.end_date, record.end_date);
        assert_eq!(got.location.as_deref(), Some("Seaham"));
    }

    #[test]
    fn test_union_with_empty_slots_round_trips() {
        let store = SqliteStore::in_memory().unwrap();
        let record = UnionRecord::new(UnionKind::Marriage);
        store.save_union(&record).unwrap();

        let loaded = store.load_unions().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].partner_a.is_none());
        assert!(loaded[0].partner_b.is_none());
    }

    #[test]
    fn test_load_tree_rebuilds_graph() {
        let store = SqliteStore::in_memory().unwrap();
        let parent = sample_person("Anne");
        let child = sample_person("Ada");
        store.save_person(&parent).unwrap();
        store.save_person(&child).unwrap();
        store
            .append_link(&ParentChildLink::new(parent.id.clone(), child.id.clone(), false))
            .unwrap();
        store
            .save_union(&UnionRecord::new(UnionKind::Marriage).with_partner_a(parent.id.clone()))
            .unwrap();

        let tree = store.load_tree().unwrap();
        assert_eq!(tree.list_people().count(), 2);
        assert_eq!(tree.links().len(), 1);
        assert_eq!(tree.list_unions().count(), 1);

        let parents = tree.parents_of(&child.id);
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].id, parent.id);
    }

    #[test]
    fn test_load_tree_rejects_dangling_link() {
        // Fabricate a link row whose child vanished, bypassing the
        // foreign keys the schema normally enforces
        let store = SqliteStore::in_memory().unwrap();
        let parent = sample_person("Anne");
        let child = sample_person("Ada");
        store.save_person(&parent).unwrap();
        store.save_person(&child).unwrap();

        store.conn.execute_batch("PRAGMA foreign_keys = OFF").unwrap();
        store
            .conn
            .execute(
                "INSERT INTO parent_child_link (id, parent, child, adoptive) VALUES (?1, ?2, ?3, 0)",
                params![
                    LinkId::new().to_string(),
                    parent.id.to_string(),
                    stemma_core::PersonId::new().to_string(),
                ],
            )
            .unwrap();

        let err = store.load_tree().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Core(stemma_core::Error::UnknownPerson(_))
        ));
    }

    #[test]
    fn test_load_tree_tolerates_dangling_union_partner() {
        let store = SqliteStore::in_memory().unwrap();
        let a = sample_person("Anne");
        store.save_person(&a).unwrap();

        store.conn.execute_batch("PRAGMA foreign_keys = OFF").unwrap();
        store
            .conn
            .execute(
                "INSERT INTO union_record (id, kind, partner_a, partner_b)
                 VALUES (?1, 'marriage', ?2, ?3)",
                params![
                    stemma_core::UnionId::new().to_string(),
                    a.id.to_string(),
                    stemma_core::PersonId::new().to_string(),
                ],
            )
            .unwrap();

        let tree = store.load_tree().unwrap();
        let record = tree.list_unions().next().unwrap();
        let partners = tree.partners_of(&record.id);
        assert_eq!(partners.len(), 1);
        assert_eq!(partners[0].id, a.id);
    }

    #[test]
    fn test_newer_schema_version_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.conn.pragma_update(None, "user_version", 99).unwrap();
        }

        let err = SqliteStore::open(&path).unwrap_err();
        assert!(matches!(
            err,
            StorageError::SchemaVersion { found: 99, supported: SCHEMA_VERSION }
        ));
    }

    #[test]
    fn test_blank_date_read_as_absent() {
        let store = SqliteStore::in_memory().unwrap();
        let person = sample_person("Ada");
        store.save_person(&person).unwrap();
        store
            .conn
            .execute(
                "UPDATE person SET birth_date = '  ' WHERE id = ?1",
                params![person.id.to_string()],
            )
            .unwrap();

        let loaded = store.load_people().unwrap();
        assert!(loaded[0].birth_date.is_none());
    }
}
