use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Flatten a source tree into a single Markdown document.",
    long_about = "codereader reads project.yaml, renders the source directory as a tree listing \nfollowed by one fenced code block per file, and writes <target>/<project>.md.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  codereader\n  codereader --config ./configs/api.yaml -v"
)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "CONFIG_FILE",
        help = "Path of the YAML config file [default: ./project.yaml]."
    )]
    pub config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase message verbosity (-v, -vv, -vvv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        conflicts_with = "verbose",
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}
