use crate::error::CliError;
use connectors::sql::mysql::params::ConnectionInfo;
use mysql_async::prelude::*;
use tracing::{error, info};

/// Checks that the server accepts the configured credentials.
pub struct MySqlConnectionPinger {
    pub info: ConnectionInfo,
}

impl MySqlConnectionPinger {
    pub async fn ping(&self) -> Result<(), CliError> {
        let endpoint = self.info.display_url(None);
        info!("Pinging MySQL at '{}'", endpoint);

        let pool = mysql_async::Pool::new(self.info.opts(None));
        let mut conn = pool.get_conn().await.map_err(|e| {
            error!("MySQL connection to '{}' failed: {}", endpoint, e);
            CliError::MySql(e)
        })?;

        let val: i32 = conn
            .query_first("SELECT 1")
            .await
            .map_err(|e| {
                error!("MySQL ping query on '{}' failed: {}", endpoint, e);
                CliError::MySql(e)
            })?
            .ok_or_else(|| {
                let msg = format!("MySQL ping to '{endpoint}' returned no result");
                error!("{}", msg);
                CliError::Unexpected(msg)
            })?;

        if val != 1 {
            let msg = format!("MySQL ping to '{endpoint}' returned unexpected result: {val}");
            error!("{}", msg);
            return Err(CliError::Unexpected(msg));
        }

        info!("MySQL ping to '{}' succeeded", endpoint);
        drop(conn);
        pool.disconnect().await.ok();
        Ok(())
    }
}
