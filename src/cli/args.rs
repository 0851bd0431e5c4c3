use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tdv-processor")]
#[command(about = "Streaming summarizer for NOAA TDV climate observation files")]
#[command(version)]
pub struct Cli {
    #[arg(
        required = true,
        value_name = "FILE",
        help = "TDV observation files to summarize"
    )]
    pub files: Vec<PathBuf>,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, help = "Suppress progress output")]
    pub quiet: bool,

    #[arg(long, help = "Use memory-mapped reads for large files")]
    pub mmap: bool,
}
