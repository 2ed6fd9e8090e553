// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use rusqlite::{Connection, OptionalExtension, Row, params};
use shelflog_app::{
    Item, ItemDetail, ItemId, ItemRecord, ItemStatus, ListOrder, SettingKey, insert_custom_category,
};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::macros::{date, format_description};
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info, warn};

pub const APP_NAME: &str = "shelflog";

/// SQLite's own clock, millisecond precision, RFC 3339 shaped.
const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

const ITEM_COLUMNS: &str = "
  id, category, name, creator, tags, rating, comments,
  date_experienced, status, current_units, total_units,
  created_at, completed_at
";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (
        "items",
        &[
            "id",
            "category",
            "name",
            "creator",
            "tags",
            "rating",
            "comments",
            "date_experienced",
            "status",
            "current_units",
            "total_units",
            "created_at",
            "completed_at",
        ],
    ),
    ("settings", &["key", "value", "updated_at"]),
];

/// Columns added when progress tracking arrived. Older flat databases get
/// them on open; their rows keep a NULL status and read as completed.
const PROGRESS_COLUMNS: &[(&str, &str)] = &[
    ("status", "TEXT"),
    ("current_units", "INTEGER"),
    ("total_units", "INTEGER"),
    ("completed_at", "TEXT"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequiredIndex {
    name: &'static str,
    create_sql: &'static str,
}

const REQUIRED_INDEXES: &[RequiredIndex] = &[
    RequiredIndex {
        name: "idx_items_created_at",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_items_created_at ON items (created_at);",
    },
    RequiredIndex {
        name: "idx_items_name",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_items_name ON items (name COLLATE NOCASE);",
    },
];

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        info!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        debug!("opened in-memory database");
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        if has_user_tables(&self.conn)? {
            upgrade_progress_columns(&self.conn)?;
            validate_schema(&self.conn)?;
        } else {
            self.conn
                .execute_batch(include_str!("sql/schema.sql"))
                .context("create schema")?;
            info!("created schema");
        }

        ensure_required_indexes(&self.conn)?;
        Ok(())
    }

    pub fn list_items(&self, order: ListOrder) -> Result<Vec<Item>> {
        let order_by = match order {
            ListOrder::CreatedDesc => "ORDER BY created_at DESC, id DESC",
            ListOrder::NameAsc => "ORDER BY name COLLATE NOCASE ASC, id ASC",
        };
        let sql = format!("SELECT {ITEM_COLUMNS} FROM items {order_by}");
        let mut stmt = self.conn.prepare(&sql).context("prepare items query")?;
        let rows = stmt.query_map([], item_from_row).context("query items")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect items")
    }

    pub fn get_item(&self, item_id: ItemId) -> Result<Item> {
        self.conn
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?"),
                params![item_id.get()],
                item_from_row,
            )
            .with_context(|| format!("load item {item_id}"))
    }

    pub fn create_item(&self, record: &ItemRecord) -> Result<ItemId> {
        let tags = encode_tags(&record.tags)?;
        let (rating, comments, current_units, total_units) = match &record.detail {
            ItemDetail::InProgress {
                current_units,
                total_units,
            } => (None, "", Some(*current_units), Some(*total_units)),
            ItemDetail::Completed { rating, comments } => {
                (*rating, comments.as_str(), None, None)
            }
        };
        self.conn
            .execute(
                &format!(
                    "
                    INSERT INTO items (
                      category, name, creator, tags, rating, comments,
                      date_experienced, status, current_units, total_units,
                      created_at, completed_at
                    ) VALUES (
                      ?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
                      {NOW_SQL},
                      CASE WHEN ? THEN {NOW_SQL} ELSE NULL END
                    )
                    "
                ),
                params![
                    record.category,
                    record.name,
                    record.creator,
                    tags,
                    rating,
                    comments,
                    record.date_experienced.map(format_date),
                    record.status().as_str(),
                    current_units,
                    total_units,
                    record.completed_at.is_some(),
                ],
            )
            .context("insert item")?;

        let item_id = ItemId::new(self.conn.last_insert_rowid());
        debug!(%item_id, status = record.status().as_str(), "created item");
        Ok(item_id)
    }

    /// Writes the shared fields plus the fields of the record's status shape.
    /// Fields of the other shape keep whatever is stored.
    pub fn update_item(&self, item_id: ItemId, record: &ItemRecord) -> Result<()> {
        let tags = encode_tags(&record.tags)?;
        let date_experienced = record.date_experienced.map(format_date);
        let rows_affected = match &record.detail {
            ItemDetail::InProgress {
                current_units,
                total_units,
            } => self.conn.execute(
                "
                UPDATE items
                SET
                  category = ?,
                  name = ?,
                  creator = ?,
                  tags = ?,
                  date_experienced = ?,
                  status = 'in_progress',
                  current_units = ?,
                  total_units = ?
                WHERE id = ?
                ",
                params![
                    record.category,
                    record.name,
                    record.creator,
                    tags,
                    date_experienced,
                    current_units,
                    total_units,
                    item_id.get(),
                ],
            ),
            ItemDetail::Completed { rating, comments } => self.conn.execute(
                &format!(
                    "
                    UPDATE items
                    SET
                      category = ?,
                      name = ?,
                      creator = ?,
                      tags = ?,
                      date_experienced = ?,
                      status = 'completed',
                      rating = ?,
                      comments = ?,
                      completed_at = CASE WHEN ? THEN {NOW_SQL} ELSE completed_at END
                    WHERE id = ?
                    "
                ),
                params![
                    record.category,
                    record.name,
                    record.creator,
                    tags,
                    date_experienced,
                    rating,
                    comments,
                    record.completed_at.is_some(),
                    item_id.get(),
                ],
            ),
        }
        .context("update item")?;
        if rows_affected == 0 {
            bail!("item {item_id} not found -- reload the list and choose an existing item");
        }
        debug!(%item_id, status = record.status().as_str(), "updated item");
        Ok(())
    }

    pub fn complete_item(&self, item_id: ItemId, rating: f64, comments: &str) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                &format!(
                    "
                    UPDATE items
                    SET status = 'completed', rating = ?, comments = ?, completed_at = {NOW_SQL}
                    WHERE id = ?
                    "
                ),
                params![rating, comments, item_id.get()],
            )
            .context("complete item")?;
        if rows_affected == 0 {
            bail!("item {item_id} not found -- reload the list and choose an existing item");
        }
        debug!(%item_id, rating, "completed item");
        Ok(())
    }

    pub fn delete_item(&self, item_id: ItemId) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM items WHERE id = ?", params![item_id.get()])
            .context("delete item")?;
        if rows_affected == 0 {
            bail!("item {item_id} not found -- it may already be deleted");
        }
        debug!(%item_id, "deleted item");
        Ok(())
    }

    fn get_setting_raw(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("read setting {key}"))
    }

    fn put_setting_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                &format!(
                    "
                    INSERT INTO settings (key, value, updated_at)
                    VALUES (?, ?, {NOW_SQL})
                    ON CONFLICT(key) DO UPDATE SET
                      value = excluded.value,
                      updated_at = excluded.updated_at
                    "
                ),
                params![key, value],
            )
            .with_context(|| format!("upsert setting {key}"))?;
        Ok(())
    }

    pub fn get_setting(&self, key: SettingKey) -> Result<Option<String>> {
        self.get_setting_raw(key.as_str())
    }

    pub fn put_setting(&self, key: SettingKey, value: &str) -> Result<()> {
        self.put_setting_raw(key.as_str(), value)
    }

    /// Custom categories, sorted and deduplicated. A missing record means none.
    pub fn custom_categories(&self) -> Result<Vec<String>> {
        let Some(raw) = self.get_setting(SettingKey::CustomCategories)? else {
            return Ok(Vec::new());
        };
        let values = serde_json::from_str::<Vec<String>>(&raw).map_err(|err| {
            anyhow!(
                "setting `{}` is not a JSON list of strings ({err}); delete the settings row to reset it",
                SettingKey::CustomCategories.as_str()
            )
        })?;
        Ok(normalize_categories(values))
    }

    pub fn put_custom_categories(&self, categories: &[String]) -> Result<()> {
        let normalized = normalize_categories(categories.to_vec());
        let raw = serde_json::to_string(&normalized).context("encode custom categories")?;
        self.put_setting(SettingKey::CustomCategories, &raw)?;
        debug!(count = normalized.len(), "saved custom categories");
        Ok(())
    }

    /// Returns false when the category was already present.
    pub fn add_custom_category(&self, category: &str) -> Result<bool> {
        let trimmed = category.trim();
        if trimmed.is_empty() {
            bail!("custom category must not be empty -- enter a name and retry");
        }
        let mut categories = self.custom_categories()?;
        if !insert_custom_category(&mut categories, trimmed) {
            return Ok(false);
        }
        self.put_custom_categories(&categories)?;
        Ok(true)
    }

    pub fn seed_demo_data(&self) -> Result<()> {
        self.put_custom_categories(&["Board Game".to_owned()])?;
        for record in demo_records() {
            self.create_item(&record)
                .with_context(|| format!("seed demo item {}", record.name))?;
        }
        info!("seeded demo data");
        Ok(())
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("SHELFLOG_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set SHELFLOG_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("shelflog.db"))
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    let tags_raw: String = row.get(4)?;
    let date_raw: Option<String> = row.get(7)?;
    let status_raw: Option<String> = row.get(8)?;
    let created_at_raw: Option<String> = row.get(11)?;
    let completed_at_raw: Option<String> = row.get(12)?;

    let status = status_raw
        .map(|raw| {
            ItemStatus::parse(&raw).ok_or_else(|| to_sql_error(anyhow!("unknown item status {raw}")))
        })
        .transpose()?;

    Ok(Item {
        id: ItemId::new(row.get(0)?),
        category: row.get(1)?,
        name: row.get(2)?,
        creator: row.get(3)?,
        tags: decode_tags(&tags_raw).map_err(to_sql_error)?,
        rating: row.get(5)?,
        comments: row.get(6)?,
        date_experienced: parse_opt_date(date_raw).map_err(to_sql_error)?,
        created_at: parse_opt_datetime(created_at_raw).map_err(to_sql_error)?,
        completed_at: parse_opt_datetime(completed_at_raw).map_err(to_sql_error)?,
        status,
        current_units: row.get(9)?,
        total_units: row.get(10)?,
    })
}

fn encode_tags(tags: &[String]) -> Result<String> {
    serde_json::to_string(tags).context("encode tags")
}

/// Tags are a JSON array; legacy rows may hold plain comma-separated text.
fn decode_tags(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).with_context(|| format!("decode tags {trimmed:?}"));
    }
    Ok(shelflog_app::parse_tags(trimmed))
}

fn normalize_categories(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn demo_records() -> Vec<ItemRecord> {
    fn completed(
        category: &str,
        name: &str,
        creator: &str,
        tags: &[&str],
        date_experienced: Option<Date>,
        rating: f64,
        comments: &str,
    ) -> ItemRecord {
        ItemRecord {
            category: category.to_owned(),
            name: name.to_owned(),
            creator: creator.to_owned(),
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            date_experienced,
            detail: ItemDetail::Completed {
                rating: Some(rating),
                comments: comments.to_owned(),
            },
            completed_at: Some(shelflog_app::ServerTimestamp),
        }
    }

    fn in_progress(
        category: &str,
        name: &str,
        creator: &str,
        tags: &[&str],
        current_units: u32,
        total_units: u32,
    ) -> ItemRecord {
        ItemRecord {
            category: category.to_owned(),
            name: name.to_owned(),
            creator: creator.to_owned(),
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            date_experienced: None,
            detail: ItemDetail::InProgress {
                current_units,
                total_units,
            },
            completed_at: None,
        }
    }

    vec![
        completed(
            "Book",
            "Dune",
            "Frank Herbert",
            &["sci-fi", "classic"],
            Some(date!(2025 - 01 - 12)),
            9.5,
            "Worldbuilding still holds up.",
        ),
        completed(
            "Movie",
            "Arrival",
            "Denis Villeneuve",
            &["sci-fi"],
            Some(date!(2025 - 02 - 03)),
            8.0,
            "",
        ),
        completed(
            "Music",
            "Blue",
            "Joni Mitchell",
            &["classic"],
            None,
            10.0,
            "",
        ),
        completed(
            "Podcast",
            "Hardcore History: Blueprint for Armageddon",
            "Dan Carlin",
            &[],
            Some(date!(2025 - 03 - 21)),
            7.5,
            "Long but worth it.",
        ),
        completed(
            "Board Game",
            "Wingspan",
            "Elizabeth Hargrave",
            &["co-op", "comfort"],
            Some(date!(2025 - 04 - 05)),
            8.5,
            "",
        ),
        in_progress("Game", "Hades", "Supergiant Games", &["indie"], 31, 50),
        in_progress("TV Show", "Severance", "Dan Erickson", &["slow-burn"], 7, 19),
        in_progress("Book", "Piranesi", "Susanna Clarke", &[], 120, 272),
    ]
}

fn has_user_tables(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "
            SELECT COUNT(*)
            FROM sqlite_master
            WHERE type = 'table'
              AND name NOT LIKE 'sqlite_%'
            ",
            [],
            |row| row.get(0),
        )
        .context("count user tables")?;
    Ok(count > 0)
}

fn upgrade_progress_columns(conn: &Connection) -> Result<()> {
    if !table_exists(conn, "items")? {
        return Ok(());
    }
    let columns = table_columns(conn, "items")?;
    for (column, sql_type) in PROGRESS_COLUMNS {
        if columns.contains(*column) {
            continue;
        }
        conn.execute_batch(&format!("ALTER TABLE items ADD COLUMN {column} {sql_type};"))
            .with_context(|| format!("add column `{column}` to items"))?;
        warn!(column, "added missing items column");
    }
    Ok(())
}

fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, required_columns) in REQUIRED_SCHEMA {
        if !table_exists(conn, table)? {
            bail!(
                "database is missing required table `{table}`; point [storage].db_path at a shelflog database"
            );
        }

        let columns = table_columns(conn, table)?;
        let missing: Vec<&str> = required_columns
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect();

        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}; the database was not created by shelflog",
                missing.join(", ")
            );
        }
    }

    Ok(())
}

fn ensure_required_indexes(conn: &Connection) -> Result<()> {
    for index in REQUIRED_INDEXES {
        conn.execute_batch(index.create_sql)
            .with_context(|| format!("ensure required index `{}`", index.name))?;
    }

    let existing_indexes = index_names(conn)?;
    let missing = REQUIRED_INDEXES
        .iter()
        .filter(|index| !existing_indexes.contains(index.name))
        .map(|index| index.name)
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        bail!(
            "database is missing required indexes: {}; check that the file is writable",
            missing.join(", ")
        );
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "
            SELECT EXISTS(
              SELECT 1
              FROM sqlite_master
              WHERE type = 'table' AND name = ?
            )
            ",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .with_context(|| format!("check table existence for {table}"))?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("inspect columns for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query column info for {table}"))?;

    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))
}

fn index_names(conn: &Connection) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(
            "
            SELECT name
            FROM sqlite_master
            WHERE type = 'index'
              AND name NOT LIKE 'sqlite_%'
            ",
        )
        .context("prepare index names query")?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("query index names")?;
    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .context("collect index names")
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

fn parse_datetime(raw: &str) -> Result<OffsetDateTime> {
    if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(value);
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Ok(value.assume_utc());
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    ) {
        return Ok(value.assume_utc());
    }

    bail!("unsupported datetime format {raw:?}")
}

fn parse_date(raw: &str) -> Result<Date> {
    if let Ok(value) = Date::parse(raw, &format_description!("[year]-[month]-[day]")) {
        return Ok(value);
    }
    Ok(parse_datetime(raw)?.date())
}

fn parse_opt_datetime(raw: Option<String>) -> Result<Option<OffsetDateTime>> {
    raw.as_deref().map(parse_datetime).transpose()
}

fn parse_opt_date(raw: Option<String>) -> Result<Option<Date>> {
    raw.as_deref()
        .filter(|value| !value.is_empty())
        .map(parse_date)
        .transpose()
}

fn to_sql_error(error: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            error.to_string(),
        )),
    )
}

fn format_date(value: Date) -> String {
    shelflog_app::format_date(Some(value))
}

#[cfg(test)]
mod tests {
    use super::{Store, decode_tags, parse_datetime};
    use anyhow::Result;
    use shelflog_app::SettingKey;
    use shelflog_testkit::fixture_datetime;

    #[test]
    fn custom_categories_default_to_empty() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;
        assert!(store.custom_categories()?.is_empty());
        Ok(())
    }

    #[test]
    fn custom_categories_are_stored_sorted_and_unique() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;

        store.put_custom_categories(&[
            "Comics".to_owned(),
            " Anime ".to_owned(),
            "Comics".to_owned(),
            String::new(),
        ])?;
        assert_eq!(store.custom_categories()?, vec!["Anime", "Comics"]);

        assert!(store.add_custom_category("Board Game")?);
        assert!(!store.add_custom_category("Anime")?);
        assert_eq!(
            store.custom_categories()?,
            vec!["Anime", "Board Game", "Comics"]
        );
        assert_eq!(
            store.get_setting(SettingKey::CustomCategories)?.as_deref(),
            Some(r#"["Anime","Board Game","Comics"]"#)
        );
        Ok(())
    }

    #[test]
    fn malformed_custom_categories_are_actionable() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;

        store.put_setting_raw(SettingKey::CustomCategories.as_str(), "Anime,Comics")?;
        let error = store
            .custom_categories()
            .expect_err("non-JSON value should be rejected");
        assert!(error.to_string().contains("delete the settings row"));
        Ok(())
    }

    #[test]
    fn tags_decode_json_and_legacy_text() -> Result<()> {
        assert_eq!(decode_tags(r#"["a","b"]"#)?, vec!["a", "b"]);
        assert_eq!(decode_tags("a, ,b")?, vec!["a", "b"]);
        assert!(decode_tags("")?.is_empty());
        assert!(decode_tags("[oops").is_err());
        Ok(())
    }

    #[test]
    fn sqlite_timestamps_parse() -> Result<()> {
        let fixture = parse_datetime(fixture_datetime())?;
        assert_eq!(fixture.unix_timestamp(), 1_771_504_496);
        let stamp = parse_datetime("2026-02-19T12:34:56.789Z")?;
        assert_eq!(stamp, fixture + time::Duration::milliseconds(789));
        let plain = parse_datetime("2026-02-19 12:34:56")?;
        assert_eq!(plain.unix_timestamp(), 1_771_504_496);
        Ok(())
    }
}
