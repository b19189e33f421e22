use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any MySQL driver error, including server-side statement failures.
    #[error("SQL error: {0}")]
    Sql(#[from] mysql_async::Error),

    /// A statement was rejected by a backend other than the MySQL driver.
    #[error("Statement rejected: {0}")]
    Rejected(String),
}

/// Errors happening during adapter or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The driver failed to establish the connection.
    #[error("MySQL connection failed: {0}")]
    MySql(#[from] mysql_async::Error),

    /// The connection URL could not be parsed.
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(#[from] mysql_async::UrlError),
}
