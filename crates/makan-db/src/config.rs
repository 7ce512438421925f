/// Connection settings for the makan database.
///
/// Carries the selected PostgreSQL URL. Selecting that URL (CLI flag,
/// `MAKAN_DATABASE_URL`, config file, default) is the CLI's job; this type
/// only derives things from it.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full PostgreSQL connection URL.
    pub database_url: String,
}

impl DbConfig {
    /// Connection URL used when nothing else is configured.
    pub const DEFAULT_URL: &str = "postgresql://localhost:5432/makan";

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// The database name, i.e. the URL's final path segment.
    ///
    /// `None` when the URL has no non-empty path component.
    pub fn database_name(&self) -> Option<&str> {
        self.database_url
            .rsplit_once('/')
            .map(|(_, name)| name)
            .filter(|name| !name.is_empty())
    }

    /// URL for the `postgres` maintenance database on the same server.
    ///
    /// `CREATE DATABASE` has to be issued from a database that already
    /// exists, so bootstrap paths connect here first.
    pub fn maintenance_url(&self) -> String {
        match self.database_url.rsplit_once('/') {
            Some((server, _)) => format!("{server}/postgres"),
            None => self.database_url.clone(),
        }
    }
}
