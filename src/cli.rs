use std::path::PathBuf;

use structopt::StructOpt;

use crate::{
    config::{DEFAULT_CONNECT_CONFIG, DEFAULT_DSN_TEMPLATE},
    engine::Config,
    explain::report::{OutputTarget, DEFAULT_OUTPUT_FILE},
    sql::DEFAULT_SQL_FILE,
};

/// Explain SQL statements on a MySQL server and report optimization hints.
#[derive(StructOpt, Debug)]
#[structopt(name = "explain-advisor")]
pub struct Flags {
    /// Silence all log output
    #[structopt(short = "q", long = "quiet")]
    pub quiet: bool,

    /// Verbose mode (-v, -vv, -vvv, etc)
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    pub verbose: usize,

    /// JSON file with username, password, host, port and database.
    #[structopt(short = "c", long = "config", default_value = DEFAULT_CONNECT_CONFIG, parse(from_os_str))]
    pub config: PathBuf,

    /// File with the semicolon separated statements to explain.
    #[structopt(short = "i", long = "input", default_value = DEFAULT_SQL_FILE, parse(from_os_str))]
    pub input: PathBuf,

    /// File the report is written to.
    #[structopt(short = "o", long = "output", default_value = DEFAULT_OUTPUT_FILE, parse(from_os_str))]
    pub output: PathBuf,

    /// Write the report to standard output instead of the output file.
    #[structopt(long = "stdout")]
    pub stdout: bool,

    /// Connection url template, filled with the values of the config file.
    #[structopt(long = "dsn-template", default_value = DEFAULT_DSN_TEMPLATE)]
    pub dsn_template: String,
}

impl Flags {
    /// Build the analysis config described by the flags.
    pub fn engine_config(&self) -> Config {
        let output = if self.stdout {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(self.output.clone())
        };

        Config {
            connect_config: self.config.clone(),
            dsn_template: self.dsn_template.clone(),
            sql_file: self.input.clone(),
            output,
        }
    }
}
