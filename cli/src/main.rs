use clap::Parser;

use albumtracker_lib::CliArgs;

fn main() -> anyhow::Result<()> {
  let args = CliArgs::parse();
  albumtracker_lib::init_logging();
  albumtracker_lib::run(args)
}
