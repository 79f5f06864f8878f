use std::process;

use explain_advisor::{cli::Flags, engine};
use structopt::StructOpt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let flags = Flags::from_args();

    stderrlog::new()
        .module(module_path!())
        .quiet(flags.quiet)
        .timestamp(stderrlog::Timestamp::Second)
        .verbosity(flags.verbose)
        .init()?;

    let config = flags.engine_config();

    match engine::start(&config).await {
        Ok(analyzed) => {
            log::info!("analysis finished, {} statements reported", analyzed);
            Ok(())
        }
        Err(err) => {
            log::error!("{}", err);
            process::exit(1);
        }
    }
}
