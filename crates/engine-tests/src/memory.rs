//! An in-memory stand-in for MySQL that understands exactly the statements
//! the import pipeline renders. Unknown statements are recorded and
//! accepted so post-load SQL can be asserted on.

use async_trait::async_trait;
use connectors::sql::base::{adapter::SqlAdapter, error::DbError};
use planner::query::dialect::{Dialect, MySql};
use std::{collections::HashMap, sync::Mutex};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemColumn {
    pub name: String,
    /// Maximum length for VARCHAR columns; `None` for integers.
    pub width: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct MemTable {
    pub columns: Vec<MemColumn>,
    pub rows: Vec<Vec<String>>,
    /// Index of the column carrying a primary/unique key.
    pub key: Option<usize>,
}

#[derive(Default)]
struct State {
    tables: HashMap<String, MemTable>,
    statements: Vec<String>,
    reject_containing: Option<String>,
    cancel_after: Option<(u64, CancellationToken)>,
    inserted: u64,
}

#[derive(Default)]
pub struct MemoryDb {
    state: Mutex<State>,
    dialect: MySql,
}

fn rejected(msg: impl Into<String>) -> DbError {
    DbError::Rejected(msg.into())
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-creates a table, optionally with a key column, holding `rows`.
    pub fn seed_table(&self, name: &str, columns: &[&str], key: Option<&str>, rows: &[&[&str]]) {
        let table = MemTable {
            columns: columns
                .iter()
                .map(|c| MemColumn {
                    name: c.to_string(),
                    width: Some(255),
                })
                .collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
            key: key.and_then(|k| columns.iter().position(|c| *c == k)),
        };
        self.state
            .lock()
            .unwrap()
            .tables
            .insert(name.to_string(), table);
    }

    /// Any later statement containing `pattern` fails.
    pub fn reject_containing(&self, pattern: &str) {
        self.state.lock().unwrap().reject_containing = Some(pattern.to_string());
    }

    /// Cancels `token` once `inserts` INSERT statements have succeeded.
    pub fn cancel_after_inserts(&self, inserts: u64, token: CancellationToken) {
        self.state.lock().unwrap().cancel_after = Some((inserts, token));
    }

    pub fn table(&self, name: &str) -> Option<MemTable> {
        self.state.lock().unwrap().tables.get(name).cloned()
    }

    pub fn column_list(&self, name: &str) -> Vec<String> {
        self.table(name)
            .map(|t| t.columns.into_iter().map(|c| c.name).collect())
            .unwrap_or_default()
    }

    pub fn rows(&self, name: &str) -> Vec<Vec<String>> {
        self.table(name).map(|t| t.rows).unwrap_or_default()
    }

    pub fn statements(&self) -> Vec<String> {
        self.state.lock().unwrap().statements.clone()
    }

    fn apply(state: &mut State, sql: &str) -> Result<u64, DbError> {
        if let Some(rest) = sql.strip_prefix("DROP TABLE ") {
            let (if_exists, rest) = match rest.strip_prefix("IF EXISTS ") {
                Some(rest) => (true, rest),
                None => (false, rest),
            };
            let (name, _) = parse_ident(rest)?;
            if state.tables.remove(&name).is_none() && !if_exists {
                return Err(rejected(format!("Unknown table '{name}'")));
            }
            return Ok(0);
        }

        if let Some(rest) = sql.strip_prefix("CREATE TABLE IF NOT EXISTS ") {
            let (name, rest) = parse_ident(rest)?;
            if state.tables.contains_key(&name) {
                return Ok(0);
            }
            let columns = parse_column_defs(rest)?;
            for (i, col) in columns.iter().enumerate() {
                if columns[..i].iter().any(|c| c.name == col.name) {
                    return Err(rejected(format!("Duplicate column name '{}'", col.name)));
                }
            }
            state.tables.insert(
                name,
                MemTable {
                    columns,
                    ..Default::default()
                },
            );
            return Ok(0);
        }

        if let Some(rest) = sql.strip_prefix("TRUNCATE TABLE ") {
            let (name, _) = parse_ident(rest)?;
            let table = table_mut(state, &name)?;
            table.rows.clear();
            return Ok(0);
        }

        if let Some(rest) = sql.strip_prefix("INSERT ") {
            let (ignore, rest) = match rest.strip_prefix("IGNORE ") {
                Some(rest) => (true, rest),
                None => (false, rest),
            };
            let rest = rest
                .strip_prefix("INTO ")
                .ok_or_else(|| rejected("expected INTO"))?;
            let (name, rest) = parse_ident(rest)?;
            let values = parse_values(rest)?;
            return insert(table_mut(state, &name)?, values, ignore);
        }

        if let Some(rest) = sql.strip_prefix("ALTER TABLE ") {
            let (name, rest) = parse_ident(rest)?;
            let rest = rest
                .strip_prefix(" ADD ")
                .ok_or_else(|| rejected("expected ADD"))?;
            let (column, rest) = parse_ident(rest)?;
            if rest != " INT NOT NULL PRIMARY KEY AUTO_INCREMENT FIRST" {
                return Err(rejected(format!("unsupported ALTER: {rest}")));
            }
            let table = table_mut(state, &name)?;
            if table.key.is_some() {
                return Err(rejected("Multiple primary key defined"));
            }
            if table.columns.iter().any(|c| c.name == column) {
                return Err(rejected(format!("Duplicate column name '{column}'")));
            }
            table.columns.insert(
                0,
                MemColumn {
                    name: column,
                    width: None,
                },
            );
            for (i, row) in table.rows.iter_mut().enumerate() {
                row.insert(0, (i + 1).to_string());
            }
            table.key = Some(0);
            return Ok(table.rows.len() as u64);
        }

        // Anything else is treated as opaque post-load SQL.
        Ok(0)
    }
}

fn table_mut<'a>(state: &'a mut State, name: &str) -> Result<&'a mut MemTable, DbError> {
    state
        .tables
        .get_mut(name)
        .ok_or_else(|| rejected(format!("Table '{name}' doesn't exist")))
}

fn insert(table: &mut MemTable, values: Vec<String>, ignore: bool) -> Result<u64, DbError> {
    if values.len() != table.columns.len() {
        return Err(rejected("Column count doesn't match value count at row 1"));
    }
    for (col, value) in table.columns.iter().zip(&values) {
        if let Some(width) = col.width
            && value.chars().count() > width
        {
            return Err(rejected(format!(
                "Data too long for column '{}' at row 1",
                col.name
            )));
        }
    }
    if let Some(key) = table.key
        && table.rows.iter().any(|r| r[key] == values[key])
    {
        if ignore {
            return Ok(0);
        }
        return Err(rejected(format!(
            "Duplicate entry '{}' for key 'PRIMARY'",
            values[key]
        )));
    }
    table.rows.push(values);
    Ok(1)
}

/// Parses a backtick-quoted identifier at the start of `input`.
fn parse_ident(input: &str) -> Result<(String, &str), DbError> {
    let body = input
        .strip_prefix('`')
        .ok_or_else(|| rejected(format!("expected identifier at: {input}")))?;
    let mut name = String::new();
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '`' {
            if let Some((_, '`')) = chars.peek() {
                chars.next();
                name.push('`');
                continue;
            }
            return Ok((name, &body[i + 1..]));
        }
        name.push(c);
    }
    Err(rejected("unterminated identifier"))
}

/// ` (`a` VARCHAR(10), `b` VARCHAR(10))`
fn parse_column_defs(input: &str) -> Result<Vec<MemColumn>, DbError> {
    let mut rest = input
        .strip_prefix(" (")
        .ok_or_else(|| rejected("expected column list"))?;
    let mut columns = Vec::new();
    loop {
        let (name, after) = parse_ident(rest)?;
        let after = after
            .strip_prefix(" VARCHAR(")
            .ok_or_else(|| rejected("expected VARCHAR"))?;
        let close = after.find(')').ok_or_else(|| rejected("expected )"))?;
        let width = after[..close]
            .parse()
            .map_err(|_| rejected("bad VARCHAR width"))?;
        columns.push(MemColumn {
            name,
            width: Some(width),
        });
        rest = &after[close + 1..];
        if let Some(next) = rest.strip_prefix(", ") {
            rest = next;
        } else if rest == ")" {
            return Ok(columns);
        } else {
            return Err(rejected(format!("unexpected column list tail: {rest}")));
        }
    }
}

/// ` VALUES ('a', 'b\'c')`, unescaping MySQL string literals.
fn parse_values(input: &str) -> Result<Vec<String>, DbError> {
    let body = input
        .strip_prefix(" VALUES (")
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| rejected("expected VALUES (...)"))?;

    let mut values = Vec::new();
    let mut chars = body.chars();
    loop {
        match chars.next() {
            None => return Ok(values),
            Some('\'') => {}
            Some(c) => return Err(rejected(format!("expected quote, got {c:?}"))),
        }
        let mut value = String::new();
        loop {
            match chars.next() {
                Some('\\') => value.push(match chars.next() {
                    Some('0') => '\0',
                    Some('n') => '\n',
                    Some('r') => '\r',
                    Some('Z') => '\x1a',
                    Some(other) => other,
                    None => return Err(rejected("dangling escape")),
                }),
                Some('\'') => break,
                Some(c) => value.push(c),
                None => return Err(rejected("unterminated literal")),
            }
        }
        values.push(value);
        match (chars.next(), chars.clone().next()) {
            (None, _) => return Ok(values),
            (Some(','), Some(' ')) => {
                chars.next();
            }
            (other, _) => return Err(rejected(format!("unexpected {other:?} after literal"))),
        }
    }
}

#[async_trait]
impl SqlAdapter for MemoryDb {
    async fn exec(&self, query: &str) -> Result<u64, DbError> {
        let mut state = self.state.lock().unwrap();
        state.statements.push(query.to_string());
        if let Some(pattern) = &state.reject_containing
            && query.contains(pattern.as_str())
        {
            return Err(rejected(format!("rejected by test: {query}")));
        }
        let affected = Self::apply(&mut state, query)?;
        if query.starts_with("INSERT ") {
            state.inserted += 1;
            if let Some((after, token)) = &state.cancel_after
                && state.inserted == *after
            {
                token.cancel();
            }
        }
        Ok(affected)
    }

    async fn table_exists(&self, table: &str) -> Result<bool, DbError> {
        Ok(self.state.lock().unwrap().tables.contains_key(table))
    }

    async fn column_names(&self, table: &str) -> Result<Vec<String>, DbError> {
        Ok(self.column_list(table))
    }

    async fn row_count(&self, table: &str) -> Result<u64, DbError> {
        let state = self.state.lock().unwrap();
        let table = state
            .tables
            .get(table)
            .ok_or_else(|| rejected(format!("Table '{table}' doesn't exist")))?;
        Ok(table.rows.len() as u64)
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }
}
