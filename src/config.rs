use std::{collections::HashMap, fs, path::Path};

use crate::{errors::Error, template::KvTemplate};

/// Default file holding the database credentials.
pub const DEFAULT_CONNECT_CONFIG: &str = "mysql-connect.json";

/// Default template used to build the connection url from the credentials.
pub const DEFAULT_DSN_TEMPLATE: &str =
    "mysql://${username}:${password}@${host}:${port}/${database}";

/// Load the connection config at `path`.
///
/// The file must hold a flat JSON object with string values, usually with the
/// keys `username`, `password`, `host`, `port` and `database`.
pub fn load_connect_config(path: &Path) -> Result<HashMap<String, String>, Error> {
    let data = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&data).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Config keys percent-encoded before they are rendered into the url.
const URL_ENCODED_KEYS: [&str; 2] = ["username", "password"];

/// Render the connection url from `template` and the loaded credentials.
///
/// User name and password are percent-encoded, so characters such as `#`,
/// `/`, `?` or `@` do not break the url.
pub fn render_dsn(template: &str, credentials: &HashMap<String, String>) -> String {
    let values: HashMap<String, String> = credentials
        .iter()
        .map(|(key, value)| {
            let value = if URL_ENCODED_KEYS.contains(&key.as_str()) {
                urlencoding::encode(value).into_owned()
            } else {
                value.clone()
            };
            (key.clone(), value)
        })
        .collect();

    KvTemplate::new(template).render(&values)
}
