use clap::{Args, Subcommand};
use engine_config::settings::ImportSettings;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Create (or reuse) a table from a CSV file and load every row into it
    Import {
        #[command(flatten)]
        args: ImportArgs,

        #[arg(
            long,
            help = "If specified, writes the JSON report to this file instead of stdout"
        )]
        report: Option<PathBuf>,
    },
    /// Print the CREATE TABLE statement inferred from the CSV header without connecting
    Schema {
        #[command(flatten)]
        args: ImportArgs,
    },
    /// Test the configured MySQL connection
    TestConn {
        #[command(flatten)]
        conn: ConnectionArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    #[arg(long, help = "Database server host [default: localhost]")]
    pub host: Option<String>,

    #[arg(long, help = "Database server port [default: 3306]")]
    pub port: Option<u16>,

    #[arg(short, long, help = "Database user [default: root]")]
    pub user: Option<String>,

    #[arg(short, long, help = "Database password")]
    pub password: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ImportArgs {
    #[arg(help = "CSV file to import")]
    pub csv: Option<PathBuf>,

    #[command(flatten)]
    pub conn: ConnectionArgs,

    #[arg(long, help = "Target database, created if missing [default: table name]")]
    pub database: Option<String>,

    #[arg(long, help = "Target table [default: CSV file name]")]
    pub table: Option<String>,

    #[arg(long, help = "Keep the existing table instead of rebuilding it from the header")]
    pub no_create: bool,

    #[arg(long, help = "With --no-create, append instead of emptying the table first")]
    pub no_truncate: bool,

    #[arg(long, help = "Silently skip rows that violate a unique key (INSERT IGNORE)")]
    pub insert_ignore: bool,

    #[arg(long, help = "Do not add the <table>_id auto-increment primary key")]
    pub no_key: bool,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Comma-separated column names overriding the header row"
    )]
    pub columns: Option<Vec<String>>,

    #[arg(long, help = "Width of every VARCHAR column [default: 255]")]
    pub varchar_size: Option<u32>,

    #[arg(long, help = "SQL to run after the load, or the path of a SQL script")]
    pub custom_sql: Option<String>,

    #[arg(long, help = "Field delimiter, a single character or `tab` [default: ,]")]
    pub delimiter: Option<String>,

    #[arg(long, help = "Fail when header names collide after sanitizing")]
    pub strict_columns: bool,

    #[arg(long, help = "Fail on rows whose field count differs from the table")]
    pub strict_row_shape: bool,
}

/// Flags only set values the user actually passed, so lower layers survive.
fn flag(set: bool, value: bool) -> Option<bool> {
    set.then_some(value)
}

impl ConnectionArgs {
    pub fn to_settings(&self) -> ImportSettings {
        ImportSettings {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            ..Default::default()
        }
    }
}

impl ImportArgs {
    pub fn to_settings(&self) -> ImportSettings {
        ImportSettings {
            csv: self.csv.clone(),
            database: self.database.clone(),
            table: self.table.clone(),
            create: flag(self.no_create, false),
            truncate: flag(self.no_truncate, false),
            insert_ignore: flag(self.insert_ignore, true),
            first_column_key: flag(self.no_key, false),
            columns: self.columns.clone(),
            custom_sql: self.custom_sql.clone(),
            varchar_size: self.varchar_size,
            delimiter: self.delimiter.clone(),
            strict_columns: flag(self.strict_columns, true),
            strict_row_shape: flag(self.strict_row_shape, true),
            ..self.conn.to_settings()
        }
    }
}
