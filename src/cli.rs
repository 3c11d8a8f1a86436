use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(author, version, about = "Time-based blind SQL injection detector", long_about = None)]
pub struct Cli {
    /// Text file with the URLs to which the GET request will be made
    #[arg(short = 'u', long = "urls", value_name = "FILE")]
    pub urls: String,

    /// Text file with the data that will be appended to the URLs
    #[arg(short = 'd', long = "data", value_name = "FILE")]
    pub data: String,

    /// Cookie for the GET request (only sent together with --send-cookie)
    #[arg(short = 'C', long)]
    pub cookie: Option<String>,

    /// Attach the --cookie value as a Cookie header
    #[arg(long, default_value_t = false)]
    pub send_cookie: bool,

    /// Maximum response time considered vulnerable, in seconds (exclusive)
    #[arg(short = 'r', long = "max-response-time")]
    pub max_response_time: Option<f64>,

    /// Minimum response time considered vulnerable, in seconds (inclusive)
    #[arg(short = 'm', long = "min-response-time")]
    pub min_response_time: Option<f64>,

    /// Show detailed information during execution
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Maximum simultaneous probes (default: unbounded)
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds (default: 60)
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Stop launching payloads for a URL after the first vulnerable hit (best effort)
    #[arg(long, default_value_t = false)]
    pub early_exit: bool,

    /// Append every verdict as JSON lines to this file
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<String>,

    /// Disable ANSI colors
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// JSON file with base settings; command line flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
