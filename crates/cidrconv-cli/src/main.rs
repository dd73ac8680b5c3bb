use anyhow::{Context, Result};
use cidrconv_cidr::{check_membership, convert_address, convert_cidr, HostBits};
use cidrconv_core::Base;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod output;

use output::{print_address, print_conversion, print_membership, AddressResult};

/// Environment variable holding a tracing filter, e.g. `cidrconv_cidr=debug`
const LOG_ENV: &str = "CIDRCONV_LOG";

/// Convert IPv4 addresses between decimal and binary and compute CIDR ranges
#[derive(Parser)]
#[command(name = "cidrconv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the first and last address of a CIDR block
    Convert(ConvertArgs),
    /// Convert a single address between decimal and binary notation
    Address(AddressArgs),
    /// Check whether an address belongs to a CIDR block
    Member(MemberArgs),
}

#[derive(Parser)]
struct ConvertArgs {
    /// IPv4 CIDR block (<address>/<network prefix>)
    #[arg(short, long, value_name = "CIDR")]
    cidr: String,

    /// Also display the binary form of each address
    #[arg(short, long)]
    binary: bool,

    /// Reject blocks whose address has host bits set
    #[arg(long)]
    strict: bool,
}

#[derive(Parser)]
struct AddressArgs {
    /// Dotted decimal or binary address
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// Target notation
    #[arg(short, long, value_enum, default_value = "binary")]
    to: TargetBase,
}

#[derive(Parser)]
struct MemberArgs {
    /// IPv4 address to look for
    #[arg(short, long, value_name = "ADDRESS")]
    address: String,

    /// IPv4 CIDR block to look in
    #[arg(short, long, value_name = "CIDR")]
    cidr: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable table output
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetBase {
    /// Dotted decimal
    Decimal,
    /// Dotted 8-bit groups
    Binary,
}

impl From<TargetBase> for Base {
    fn from(target: TargetBase) -> Self {
        match target {
            TargetBase::Decimal => Base::Decimal,
            TargetBase::Binary => Base::Binary,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Convert(args) => handle_convert(args, cli.output)?,
        Commands::Address(args) => handle_address(args, cli.output)?,
        Commands::Member(args) => handle_member(args, cli.output)?,
    }

    Ok(())
}

/// Install a stderr subscriber; `CIDRCONV_LOG` overrides the flag-derived level
fn init_logging(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose, quiet)));

    // Only fails when a global subscriber is already installed; keep that one
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn default_log_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

fn handle_convert(args: ConvertArgs, format: OutputFormat) -> Result<()> {
    debug!(cidr = %args.cidr, binary = args.binary, strict = args.strict, "converting");

    let policy = if args.strict {
        HostBits::Reject
    } else {
        HostBits::Discard
    };

    let report = convert_cidr(&args.cidr, args.binary, policy)
        .with_context(|| format!("failed to convert {:?}", args.cidr))?;

    print_conversion(&report, format)
}

fn handle_address(args: AddressArgs, format: OutputFormat) -> Result<()> {
    let target = Base::from(args.to);
    debug!(address = %args.address, %target, "converting address");

    let converted = convert_address(&args.address, target)
        .with_context(|| format!("failed to convert {:?} to {}", args.address, target))?;

    let result = AddressResult {
        input: args.address.trim().to_string(),
        base: target,
        output: converted,
    };
    print_address(&result, format)
}

fn handle_member(args: MemberArgs, format: OutputFormat) -> Result<()> {
    debug!(address = %args.address, cidr = %args.cidr, "checking membership");

    let membership = check_membership(&args.address, &args.cidr)
        .with_context(|| format!("failed to check {:?} in {:?}", args.address, args.cidr))?;

    print_membership(&membership, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["cidrconv", "convert", "-c", "10.0.0.0/8"]);
        assert!(matches!(cli.output, OutputFormat::Human));
        if let Commands::Convert(args) = cli.command {
            assert_eq!(args.cidr, "10.0.0.0/8");
            assert!(!args.binary);
            assert!(!args.strict);
        } else {
            panic!("Expected Convert command");
        }
    }

    #[test]
    fn test_convert_binary_flag() {
        let cli = Cli::parse_from([
            "cidrconv",
            "convert",
            "-c",
            "192.168.1.10/24",
            "-b",
            "--strict",
        ]);
        if let Commands::Convert(args) = cli.command {
            assert!(args.binary);
            assert!(args.strict);
        } else {
            panic!("Expected Convert command");
        }
    }

    #[test]
    fn test_convert_requires_cidr() {
        assert!(Cli::try_parse_from(["cidrconv", "convert"]).is_err());
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Cli::try_parse_from(["cidrconv", "subnet", "-c", "10.0.0.0/8"]).is_err());
        assert!(Cli::try_parse_from(["cidrconv"]).is_err());
    }

    #[test]
    fn test_output_format_json() {
        let cli = Cli::parse_from([
            "cidrconv", "--output", "json", "convert", "-c", "10.0.0.0/8",
        ]);
        assert!(matches!(cli.output, OutputFormat::Json));
    }

    #[test]
    fn test_address_command() {
        let cli = Cli::parse_from(["cidrconv", "address", "10.0.0.1"]);
        if let Commands::Address(args) = cli.command {
            assert_eq!(args.address, "10.0.0.1");
            assert_eq!(Base::from(args.to), Base::Binary);
        } else {
            panic!("Expected Address command");
        }

        let cli = Cli::parse_from([
            "cidrconv",
            "address",
            "00001010.00000000.00000000.00000001",
            "--to",
            "decimal",
        ]);
        if let Commands::Address(args) = cli.command {
            assert_eq!(Base::from(args.to), Base::Decimal);
        } else {
            panic!("Expected Address command");
        }
    }

    #[test]
    fn test_address_rejects_unknown_base() {
        assert!(Cli::try_parse_from(["cidrconv", "address", "10.0.0.1", "--to", "hex"]).is_err());
    }

    #[test]
    fn test_member_command() {
        let cli = Cli::parse_from(["cidrconv", "member", "-a", "10.1.2.3", "-c", "10.0.0.0/8"]);
        if let Commands::Member(args) = cli.command {
            assert_eq!(args.address, "10.1.2.3");
            assert_eq!(args.cidr, "10.0.0.0/8");
        } else {
            panic!("Expected Member command");
        }
    }

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(false, false), "warn");
        assert_eq!(default_log_level(true, false), "debug");
        assert_eq!(default_log_level(false, true), "error");
    }

    #[test]
    fn test_init_logging_twice_keeps_first_subscriber() {
        init_logging(true, false);
        init_logging(false, true);
        tracing::debug!("still routed to the first subscriber");
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let cli = Cli::parse_from(["cidrconv", "-v", "convert", "-c", "1.1.1.1/32"]);
        assert!(cli.verbose);
        let both = Cli::try_parse_from(["cidrconv", "-v", "-q", "convert", "-c", "1.1.1.1/32"]);
        assert!(both.is_err());
    }
}
