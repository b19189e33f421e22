use mysql_async::{OptsBuilder, PoolConstraints, PoolOpts};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_USER: &str = "root";

/// Where and as whom to connect. The database is chosen separately so the
/// same parameters can first reach the server and then the target schema.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: String::new(),
        }
    }
}

impl fmt::Debug for ConnectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionInfo")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

impl ConnectionInfo {
    /// Driver options for a pool holding exactly one connection.
    pub fn opts(&self, database: Option<&str>) -> OptsBuilder {
        let constraints = PoolConstraints::new(1, 1).unwrap_or_default();
        OptsBuilder::default()
            .ip_or_hostname(self.host.clone())
            .tcp_port(self.port)
            .user(Some(self.user.clone()))
            .pass((!self.password.is_empty()).then(|| self.password.clone()))
            .db_name(database.map(str::to_string))
            .pool_opts(PoolOpts::default().with_constraints(constraints))
    }

    /// A log-safe rendering of the endpoint, never including the password.
    pub fn display_url(&self, database: Option<&str>) -> String {
        format!(
            "mysql://{}@{}:{}/{}",
            self.user,
            self.host,
            self.port,
            database.unwrap_or_default()
        )
    }
}
