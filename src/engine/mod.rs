use std::{
    io::{self, Write},
    path::PathBuf,
};

use crate::{
    backend::{MysqlBackend, PlanSource},
    config::{load_connect_config, render_dsn},
    errors::Error,
    explain::{
        parse_explain_json,
        report::{write_report, OutputTarget},
        ExplainResult,
    },
    sql::read_statements,
};

/// Runs statements through a plan source and reports each plan.
pub struct Engine<S> {
    source: S,
}

impl<S: PlanSource> Engine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Explain a single statement and write its report to `output`.
    pub async fn analyze(
        &mut self,
        output: &mut dyn io::Write,
        statement: &str,
    ) -> Result<ExplainResult, Error> {
        let explain_json = self.source.explain(statement).await?;
        let plan = parse_explain_json(&explain_json)?;
        write_report(output, statement, &plan).map_err(Error::OutputWrite)?;
        Ok(plan)
    }

    /// Analyze all statements in order and return how many were reported.
    ///
    /// The first failing statement stops the run; statements after it are
    /// not explained.
    pub async fn run(
        &mut self,
        output: &mut dyn io::Write,
        statements: &[String],
    ) -> Result<usize, Error> {
        for (i, statement) in statements.iter().enumerate() {
            log::debug!("analyzing statement {} of {}", i + 1, statements.len());
            self.analyze(output, statement).await?;
        }
        Ok(statements.len())
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

/// Everything needed for a full analysis run.
pub struct Config {
    /// JSON file with the connection credentials.
    pub connect_config: PathBuf,

    /// Template rendered with the credentials to build the connection url.
    pub dsn_template: String,

    /// File with the statements to analyze.
    pub sql_file: PathBuf,

    pub output: OutputTarget,
}

/// Run the whole analysis described by `config`.
///
/// The connection is closed before returning, also when the run failed. A
/// failed run keeps whatever was reported before the failing statement.
pub async fn start(config: &Config) -> Result<usize, Error> {
    let credentials = load_connect_config(&config.connect_config)?;
    let dsn = render_dsn(&config.dsn_template, &credentials);

    let backend = MysqlBackend::connect(&dsn).await?;
    let mut engine = Engine::new(backend);

    let result = run_statements(&mut engine, config).await;

    if let Err(err) = engine.into_source().disconnect().await {
        match result {
            Ok(_) => return Err(err),
            Err(_) => log::warn!("{}", err),
        }
    }

    result
}

async fn run_statements<S: PlanSource>(
    engine: &mut Engine<S>,
    config: &Config,
) -> Result<usize, Error> {
    let statements = read_statements(&config.sql_file)?;
    log::info!(
        "{} statements read from {}",
        statements.len(),
        config.sql_file.display()
    );

    let mut output = config.output.open()?;
    let result = engine.run(&mut output, &statements).await;
    // Flush what was written so far even if a statement failed.
    let flushed = output.flush().map_err(Error::OutputWrite);
    let analyzed = result?;
    flushed?;

    log::info!("{} statements analyzed", analyzed);
    Ok(analyzed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explain::tests::{CONST_PLAN, FULL_SCAN_PLAN};
    use std::collections::HashMap;

    /// Plan source answering from a fixed statement to plan mapping.
    struct StaticPlans {
        plans: HashMap<String, String>,
        explained: Vec<String>,
    }

    impl StaticPlans {
        fn new(plans: &[(&str, &str)]) -> Self {
            Self {
                plans: plans
                    .iter()
                    .map(|(stmt, plan)| (stmt.to_string(), plan.to_string()))
                    .collect(),
                explained: Vec::new(),
            }
        }
    }

    impl PlanSource for StaticPlans {
        async fn explain(&mut self, statement: &str) -> Result<String, Error> {
            self.explained.push(statement.to_string());
            self.plans
                .get(statement)
                .cloned()
                .ok_or_else(|| Error::RowScan {
                    statement: statement.to_string(),
                    reason: "no rows returned".to_string(),
                })
        }
    }

    fn statements(stmts: &[&str]) -> Vec<String> {
        stmts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_analyze_returns_plan() -> anyhow::Result<()> {
        let mut engine = Engine::new(StaticPlans::new(&[("SELECT a", CONST_PLAN)]));
        let mut output = Vec::new();

        let plan = engine.analyze(&mut output, "SELECT a").await?;

        assert_eq!(plan.table().access_type, "const");
        assert!(std::str::from_utf8(&output)?.starts_with("SQL: SELECT a\n"));
        Ok(())
    }

    #[tokio::test]
    async fn test_run_reports_in_order() -> anyhow::Result<()> {
        let mut engine = Engine::new(StaticPlans::new(&[
            ("SELECT a", CONST_PLAN),
            ("SELECT b", FULL_SCAN_PLAN),
        ]));
        let mut output = Vec::new();

        let analyzed = engine
            .run(&mut output, &statements(&["SELECT b", "SELECT a"]))
            .await?;

        assert_eq!(analyzed, 2);
        let output = String::from_utf8(output)?;
        let first = output.find("SQL: SELECT b").expect("missing first report");
        let second = output.find("SQL: SELECT a").expect("missing second report");
        assert!(first < second);
        assert_eq!(output.matches("============================\n").count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_run_stops_at_first_error() {
        let mut engine = Engine::new(StaticPlans::new(&[
            ("SELECT a", CONST_PLAN),
            ("SELECT bad", "{\"query_block\": "),
        ]));
        let mut output = Vec::new();

        let err = engine
            .run(
                &mut output,
                &statements(&["SELECT a", "SELECT bad", "SELECT a"]),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::PlanParse(_)), "got {:?}", err);
        assert_eq!(
            engine.into_source().explained,
            statements(&["SELECT a", "SELECT bad"])
        );

        let output = String::from_utf8(output).expect("report is utf8");
        assert_eq!(output.matches("SQL: ").count(), 1);
    }

    #[tokio::test]
    async fn test_run_without_statements() -> anyhow::Result<()> {
        let mut engine = Engine::new(StaticPlans::new(&[]));
        let mut output = Vec::new();

        assert_eq!(engine.run(&mut output, &[]).await?, 0);
        assert!(output.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_start_fails_on_missing_config() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let output = dir.path().join("report.txt");
        let config = Config {
            connect_config: dir.path().join("mysql-connect.json"),
            dsn_template: crate::config::DEFAULT_DSN_TEMPLATE.to_string(),
            sql_file: dir.path().join("check.sql"),
            output: OutputTarget::File(output.clone()),
        };

        let err = start(&config).await.unwrap_err();

        assert!(matches!(err, Error::ConfigRead { .. }), "got {:?}", err);
        assert!(!output.exists(), "no report is created before connecting");
    }

    /// Config reading `check.sql` and writing `report.txt` inside `dir`.
    fn file_config(dir: &std::path::Path) -> Config {
        Config {
            connect_config: dir.join("mysql-connect.json"),
            dsn_template: crate::config::DEFAULT_DSN_TEMPLATE.to_string(),
            sql_file: dir.join("check.sql"),
            output: OutputTarget::File(dir.join("report.txt")),
        }
    }

    #[tokio::test]
    async fn test_start_fails_on_invalid_config() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = file_config(dir.path());
        std::fs::write(&config.connect_config, r#"{"username": "root", "port": 3306}"#)?;
        std::fs::write(&config.sql_file, "SELECT a;")?;

        let err = start(&config).await.unwrap_err();

        assert!(matches!(err, Error::ConfigParse { .. }), "got {:?}", err);
        assert!(!dir.path().join("report.txt").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_run_statements_missing_sql_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = file_config(dir.path());
        let mut engine = Engine::new(StaticPlans::new(&[("SELECT a", CONST_PLAN)]));

        let err = run_statements(&mut engine, &config).await.unwrap_err();

        assert!(matches!(err, Error::FileRead { .. }), "got {:?}", err);
        assert!(!dir.path().join("report.txt").exists());
        assert!(engine.into_source().explained.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_run_statements_keeps_reports_before_failure() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = file_config(dir.path());
        std::fs::write(&config.sql_file, "SELECT a;\nSELECT bad;\nSELECT a;\n")?;

        let mut engine = Engine::new(StaticPlans::new(&[
            ("SELECT a", CONST_PLAN),
            ("SELECT bad", "{\"query_block\": "),
        ]));

        let err = run_statements(&mut engine, &config).await.unwrap_err();
        assert!(matches!(err, Error::PlanParse(_)), "got {:?}", err);

        let mut expected = Vec::new();
        write_report(&mut expected, "SELECT a", &parse_explain_json(CONST_PLAN)?)?;
        assert_eq!(std::fs::read(dir.path().join("report.txt"))?, expected);
        Ok(())
    }
}
