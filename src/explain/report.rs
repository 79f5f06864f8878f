use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
};

use super::{advisor::advise, ExplainResult};
use crate::errors::Error;

/// Default report file.
pub const DEFAULT_OUTPUT_FILE: &str = "mysql-analysis-output.txt";

const SECTION_SEPARATOR: &str = "----------------------------";
const REPORT_SEPARATOR: &str = "============================";

/// Where reports are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Open the target for writing. A file target is created or truncated.
    pub fn open(&self) -> Result<Box<dyn io::Write>, Error> {
        match self {
            OutputTarget::Stdout => Ok(Box::new(io::stdout())),
            OutputTarget::File(path) => {
                let file = File::create(path).map_err(|source| Error::OutputCreate {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

/// Write the report of one statement and its plan.
pub fn write_report(
    output: &mut dyn io::Write,
    statement: &str,
    plan: &ExplainResult,
) -> io::Result<()> {
    let block = &plan.query_block;
    let table = &block.table;

    writeln!(output, "SQL: {}", statement)?;

    writeln!(output, "{}", SECTION_SEPARATOR)?;
    writeln!(output, "Execution Plan:")?;
    writeln!(output, "Select ID: {}", block.select_id)?;
    writeln!(output, "Query Cost: {}", block.cost_info.query_cost)?;

    writeln!(output, "{}", SECTION_SEPARATOR)?;
    writeln!(output, "Table Scan:")?;
    writeln!(output, "Table Name: {}", table.table_name)?;
    writeln!(output, "Access Type: {}", table.access_type)?;
    writeln!(output, "Rows Examined Per Scan: {}", table.rows_examined_per_scan)?;
    writeln!(output, "Rows Produced Per Join: {}", table.rows_produced_per_join)?;
    writeln!(output, "Filtered (%): {}", table.filtered)?;

    writeln!(output, "{}", SECTION_SEPARATOR)?;
    writeln!(output, "Cost Info:")?;
    writeln!(output, "Read Cost: {}", table.cost_info.read_cost)?;
    writeln!(output, "Eval Cost: {}", table.cost_info.eval_cost)?;
    writeln!(output, "Prefix Cost: {}", table.cost_info.prefix_cost)?;
    writeln!(output, "Data Read Per Join: {}", table.cost_info.data_read_per_join)?;

    writeln!(output, "{}", SECTION_SEPARATOR)?;
    writeln!(output, "Advice:")?;
    for advice in advise(plan) {
        writeln!(output, " - {}", advice)?;
    }

    writeln!(output, "{}", SECTION_SEPARATOR)?;
    writeln!(output, "Used Columns:")?;
    for column in &table.used_columns {
        writeln!(output, " - {}", column)?;
    }

    writeln!(output, "{}", REPORT_SEPARATOR)?;
    writeln!(output)?;
    Ok(())
}
