//! apicompat CLI
//!
//! Compares a contract API surface against an implementation and reports
//! every incompatibility.

mod commands;
mod output;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use colored::Colorize;
use commands::{CheckArgs, CheckOutcome};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

/// Exit status when the two sides are compatible
const EXIT_COMPATIBLE: i32 = 0;
/// Exit status when differences remain after suppression
const EXIT_INCOMPATIBLE: i32 = 1;
/// Exit status for configuration and loading errors
const EXIT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "apicompat")]
#[command(about = "Check that an implementation still provides the API of its contract")]
#[command(version = apicompat_core::VERSION)]
#[command(
    long_about = "apicompat compares a contract API surface (left) against an implementation (right)\n\
and reports every type, member or assembly the implementation is missing.\n\
\n\
Examples:\n  \
apicompat --left contract/ --right bin/               # Compare two surface directories\n  \
apicompat --left Contoso.json --right-dir bin/ --strict\n  \
apicompat --left ref/ --right lib/ --no-warn CP0003   # Suppress a diagnostic globally\n  \
apicompat --list-rules                                # Show the rule catalogue"
)]
struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        help = "Path to configuration file (.apicompatrc.json/.apicompatrc.toml/apicompat.yaml)"
    )]
    config: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Contract surfaces
    #[arg(long, num_args = 1.., help = "Contract surface files or directories")]
    left: Vec<PathBuf>,

    /// Implementation surfaces
    #[arg(long, num_args = 1.., help = "Implementation surface files or directories")]
    right: Vec<PathBuf>,

    /// Directories searched for implementations matching the contract assemblies
    #[arg(
        long = "right-dir",
        num_args = 1..,
        help = "Directories searched for <assembly>.json implementations"
    )]
    right_dirs: Vec<PathBuf>,

    /// Directories searched for referenced assemblies
    #[arg(
        long = "reference-dir",
        num_args = 1..,
        help = "Directories searched for referenced assemblies"
    )]
    reference_dirs: Vec<PathBuf>,

    /// Compare internal API as well
    #[arg(long, help = "Include internal types and members")]
    include_internals: bool,

    /// Also report API only the implementation has
    #[arg(long, help = "Report additions as well as removals")]
    strict: bool,

    /// Compare assembly identities
    #[arg(long, help = "Report assemblies whose version, culture or key differ")]
    validate_identity: bool,

    /// Globally suppressed diagnostic ids
    #[arg(long, help = "Diagnostic ids to suppress, separated by ';' or ','")]
    no_warn: Option<String>,

    /// Individually suppressed differences
    #[arg(
        long,
        value_name = "ID=MEMBER",
        value_parser = parse_ignored_difference,
        help = "Suppress one difference, e.g. CP0002=M:Contoso.Client.Legacy"
    )]
    ignore: Vec<(String, String)>,

    /// Name of the left side in the summary
    #[arg(long, help = "Name of the left side (default: contract)")]
    left_name: Option<String>,

    /// Name of the right side in the summary
    #[arg(long, help = "Name of the right side (default: implementation)")]
    right_name: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "human", help = "Output format for differences")]
    format: OutputFormat,

    /// List the built-in rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Print the JSON schema of the configuration file and exit
    #[arg(long)]
    print_config_schema: bool,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `<Id> : <Message>` line per difference, then a summary
    #[default]
    Human,
    /// JSON array of differences
    Json,
}

fn parse_ignored_difference(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((id, member)) if !id.trim().is_empty() && !member.trim().is_empty() => {
            Ok((id.trim().to_string(), member.trim().to_string()))
        }
        _ => Err(format!(
            "Invalid ignored difference '{}'. Expected 'ID=MEMBER'",
            s
        )),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    // Piped output stays plain
    colored::control::set_override(
        !cli.no_color && std::env::var("NO_COLOR").is_err() && io::stdout().is_terminal(),
    );

    // Warnings (skipped candidates, unresolved forwards) are shown by default
    match cli.verbose {
        0 if std::env::var("RUST_LOG").is_ok() => apicompat_core::init_tracing(),
        0 => apicompat_core::init_tracing_with("apicompat=warn"),
        1 => apicompat_core::init_tracing_with("apicompat=info"),
        2 => apicompat_core::init_tracing_with("apicompat=debug"),
        _ => apicompat_core::init_tracing_with("apicompat=trace"),
    }

    if cli.list_rules {
        commands::list_rules();
        return;
    }
    if cli.print_config_schema {
        commands::print_config_schema();
        return;
    }

    let args = CheckArgs {
        config: cli.config,
        left: cli.left,
        right: cli.right,
        right_dirs: cli.right_dirs,
        reference_dirs: cli.reference_dirs,
        include_internals: cli.include_internals,
        strict: cli.strict,
        validate_identity: cli.validate_identity,
        no_warn: cli.no_warn,
        ignore: cli.ignore,
        left_name: cli.left_name,
        right_name: cli.right_name,
        format: cli.format,
    };

    let code = match commands::run_check(&args) {
        Ok(CheckOutcome::Compatible) => EXIT_COMPATIBLE,
        Ok(CheckOutcome::Incompatible) => EXIT_INCOMPATIBLE,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            EXIT_ERROR
        }
    };
    process::exit(code);
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
