use crate::sql::base::error::DbError;
use async_trait::async_trait;
use planner::query::dialect::Dialect;

/// The narrow database surface the import pipeline talks to.
///
/// Every call is a separate autocommitted statement; implementations must
/// not wrap calls in a transaction.
#[async_trait]
pub trait SqlAdapter: Send + Sync {
    /// Executes a statement and returns the number of affected rows.
    async fn exec(&self, query: &str) -> Result<u64, DbError>;

    // Introspection
    async fn table_exists(&self, table: &str) -> Result<bool, DbError>;
    async fn column_names(&self, table: &str) -> Result<Vec<String>, DbError>;
    async fn row_count(&self, table: &str) -> Result<u64, DbError>;

    fn dialect(&self) -> &dyn Dialect;
}
