use crate::{
    error::AdapterError,
    sql::{
        base::{
            adapter::SqlAdapter,
            error::{ConnectorError, DbError},
        },
        mysql::params::ConnectionInfo,
    },
};
use async_trait::async_trait;
use mysql_async::{Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts, prelude::Queryable};
use planner::query::{
    ast::create_database::CreateDatabase,
    dialect::{self, Dialect},
    render,
};
use tracing::{debug, info};

const QUERY_TABLE_EXISTS_SQL: &str = include_str!("sql/table_exists.sql");
const QUERY_COLUMN_NAMES_SQL: &str = include_str!("sql/column_names.sql");

/// MySQL adapter over a pool constrained to a single connection, so every
/// statement of an import runs on the same session.
#[derive(Clone)]
pub struct MySqlAdapter {
    pool: Pool,
    dialect: dialect::MySql,
}

impl MySqlAdapter {
    pub async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let opts = Opts::from_url(url)?;
        let constraints = PoolConstraints::new(1, 1).unwrap_or_default();
        let pool = Pool::new(
            OptsBuilder::from_opts(opts).pool_opts(PoolOpts::default().with_constraints(constraints)),
        );
        // Fail fast on bad credentials instead of on the first statement.
        drop(pool.get_conn().await?);
        Ok(MySqlAdapter {
            pool,
            dialect: dialect::MySql,
        })
    }

    /// Connects to the server, creates `database` if it is missing and
    /// returns an adapter bound to it.
    pub async fn bootstrap(info: &ConnectionInfo, database: &str) -> Result<Self, AdapterError> {
        if database.is_empty() {
            return Err(AdapterError::MissingProperty("database".into()));
        }

        info!("Connecting to {}", info.display_url(None));
        let server = Pool::new(info.opts(None));
        let create = render(
            &CreateDatabase {
                name: database.to_string(),
                if_not_exists: true,
            },
            &dialect::MySql,
        );
        {
            let mut conn = server.get_conn().await.map_err(ConnectorError::from)?;
            debug!("{}", create);
            conn.query_drop(create.as_str()).await.map_err(DbError::from)?;
        }
        server.disconnect().await.map_err(DbError::from)?;

        let pool = Pool::new(info.opts(Some(database)));
        drop(pool.get_conn().await.map_err(ConnectorError::from)?);
        info!("Connected to {}", info.display_url(Some(database)));

        Ok(MySqlAdapter {
            pool,
            dialect: dialect::MySql,
        })
    }

    pub async fn disconnect(self) -> Result<(), DbError> {
        self.pool.disconnect().await?;
        Ok(())
    }
}

#[async_trait]
impl SqlAdapter for MySqlAdapter {
    async fn exec(&self, query: &str) -> Result<u64, DbError> {
        let mut conn = self.pool.get_conn().await?;
        conn.query_drop(query).await?;
        Ok(conn.affected_rows())
    }

    async fn table_exists(&self, table: &str) -> Result<bool, DbError> {
        let mut conn = self.pool.get_conn().await?;
        let count: Option<i64> = conn.exec_first(QUERY_TABLE_EXISTS_SQL, (table,)).await?;
        Ok(count.unwrap_or_default() > 0)
    }

    async fn column_names(&self, table: &str) -> Result<Vec<String>, DbError> {
        let mut conn = self.pool.get_conn().await?;
        let names: Vec<String> = conn.exec(QUERY_COLUMN_NAMES_SQL, (table,)).await?;
        Ok(names)
    }

    async fn row_count(&self, table: &str) -> Result<u64, DbError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {}",
            self.dialect.quote_identifier(table)
        );
        let mut conn = self.pool.get_conn().await?;
        let count: Option<u64> = conn.query_first(sql).await?;
        Ok(count.unwrap_or_default())
    }

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }
}
