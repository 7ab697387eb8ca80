use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct KuttaArgs {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    /// Where to write the result table.
    #[clap(long, short, default_value = "res.dat")]
    pub output: PathBuf,

    /// Log every bisection iteration.
    #[clap(long, short)]
    pub verbose: bool,
}
