use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "seqstats",
    version,
    about = "Descriptive statistics for FASTA and BAM/SAM files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Analyze(AnalyzeArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[arg(long)]
    pub out: Option<PathBuf>,

    #[arg(long, default_value_t = num_cpus::get())]
    pub threads: usize,

    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,

    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    #[value(name = "auto")]
    Auto,
    #[value(name = "fasta")]
    Fasta,
    #[value(name = "bam")]
    Bam,
    #[value(name = "sam")]
    Sam,
}
