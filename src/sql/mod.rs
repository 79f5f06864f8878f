use std::{fs, path::Path};

use crate::errors::Error;

/// Default file with the statements to analyze.
pub const DEFAULT_SQL_FILE: &str = "check.sql";

/// Split the content of a SQL file into single statements.
///
/// Statements are separated at every `;`, without looking into string
/// literals or comments. Each statement is trimmed and empty ones are dropped.
pub fn split_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(String::from)
        .collect()
}

/// Read the SQL file at `path` and split it into statements.
pub fn read_statements(path: &Path) -> Result<Vec<String>, Error> {
    let sql = fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(split_statements(&sql))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_terminated_statements() {
        assert_eq!(
            split_statements("SELECT 1; SELECT 2;"),
            vec!["SELECT 1", "SELECT 2"]
        );
    }

    #[test]
    fn test_split_unterminated_last_statement() {
        assert_eq!(
            split_statements("SELECT 1;SELECT 2"),
            vec!["SELECT 1", "SELECT 2"]
        );
    }

    #[test]
    fn test_split_drops_empty_statements() {
        assert!(split_statements(";;  ;").is_empty());
        assert!(split_statements("").is_empty());
        assert!(split_statements("  \n\t ").is_empty());
    }

    #[test]
    fn test_split_multiline_file() {
        let sql = "SELECT *\n  FROM users\n WHERE id = 1;\n\nSELECT name FROM orders;\n";
        assert_eq!(
            split_statements(sql),
            vec![
                "SELECT *\n  FROM users\n WHERE id = 1",
                "SELECT name FROM orders"
            ]
        );
    }

    #[test]
    fn test_split_ignores_quotes() {
        // Semicolons inside literals still split the statement.
        assert_eq!(
            split_statements("SELECT 'a;b'"),
            vec!["SELECT 'a", "b'"]
        );
    }

    #[test]
    fn test_read_statements() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("check.sql");
        fs::write(&path, "SELECT 1;\nSELECT 2;\n")?;

        assert_eq!(read_statements(&path)?, vec!["SELECT 1", "SELECT 2"]);

        let err = read_statements(&dir.path().join("missing.sql")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }), "got {:?}", err);
        Ok(())
    }
}
