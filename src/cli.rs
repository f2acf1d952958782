use clap::Parser;

#[derive(Parser)]
#[command(
    name = "ytscript",
    about = "Fetch YouTube transcripts as JSON",
    version
)]
pub struct Cli {
    /// YouTube video ID, used as-is
    pub video_id: Option<String>,

    /// Run the HTTP API instead of fetching a single transcript
    #[arg(long)]
    pub serve: bool,

    /// Listen address for --serve (overrides config and PORT)
    #[arg(long)]
    pub bind: Option<String>,

    /// Preferred caption language, in order (repeatable; default: vi, en)
    #[arg(short, long = "lang")]
    pub langs: Vec<String>,

    /// Show config and diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
