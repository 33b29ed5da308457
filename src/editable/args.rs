use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, with git hash and commit date on dev builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" otherwise
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "editable", bin_name = "editable", version = get_version())]
#[command(about = "Render in-place editable HTML for model attributes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding editable.json (defaults to the user config dir)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the editable markup for an attribute
    #[command(alias = "r")]
    Render {
        /// Record file: {"model": "User", "id": 7, "attributes": {...}}
        record: PathBuf,

        /// Attribute to render
        attribute: String,

        /// Per-call options as a JSON object
        #[arg(short, long, value_name = "JSON")]
        options: Option<String>,

        /// Render as a viewer without edit rights
        #[arg(long)]
        readonly: bool,

        /// Submit URL (defaults to /<models>/<id>)
        #[arg(long)]
        url: Option<String>,
    },

    /// Print how an attribute value resolves, as JSON
    Resolve {
        /// Record file: {"model": "User", "id": 7, "attributes": {...}}
        record: PathBuf,

        /// Attribute to resolve
        attribute: String,

        /// Per-call options as a JSON object
        #[arg(short, long, value_name = "JSON")]
        options: Option<String>,
    },
}
