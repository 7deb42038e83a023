use clap::Parser;

use corpus_guard::cli::{Cli, Commands};
use corpus_guard::commands::{run_categories, run_check, run_init, run_thresholds};
use corpus_guard::logging;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, cli.quiet),
        Commands::Thresholds(args) => run_thresholds(args),
        Commands::Categories(args) => run_categories(args),
        Commands::Init(args) => run_init(args, cli.quiet),
    };

    std::process::exit(exit_code);
}
