//! machdesc CLI — inspect and check native target machine descriptions.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "machdesc", version, about = "Native target machine descriptions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List preset machine descriptions
    List,
    /// Show the sizes and alignments of a machine
    Describe {
        /// Preset name, "host", or a .machine.toml file
        name: String,
        /// Output format (text, toml, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Pick the preset for a CPU/OS pairing
    Select {
        /// Pointer width in bits (32 or 64)
        #[arg(long)]
        bits: u32,
        /// CPU family (x86, arm, other)
        #[arg(long)]
        cpu: String,
        /// Operating system (linux, windows, macos, other)
        #[arg(long)]
        os: String,
    },
    /// Page count and page-aligned size of a byte count
    Pages {
        /// Size in bytes
        #[arg(allow_negative_numbers = true)]
        size: i64,
        /// Preset name, "host", or a .machine.toml file
        #[arg(long, default_value = "host")]
        machine: String,
    },
    /// Validate a .machine.toml file, or every file under <dir>/machines
    Validate {
        /// File or project directory
        path: PathBuf,
    },
    /// Print a .machine.toml template
    Template {
        /// Preset to seed from (default: the host's preset)
        #[arg(long)]
        preset: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List => commands::describe::list(),
        Commands::Describe { name, format } => commands::describe::describe(&name, format.as_deref()),
        Commands::Select { bits, cpu, os } => commands::describe::select(bits, &cpu, &os),
        Commands::Pages { size, machine } => commands::pages::run(size, &machine),
        Commands::Validate { path } => commands::validate::run(&path),
        Commands::Template { preset } => commands::describe::template(preset.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_negative_pages() {
        let cli = Cli::try_parse_from(["machdesc", "pages", "-4096", "--machine", "arm-eabi"]).unwrap();
        match cli.command {
            Commands::Pages { size, machine } => {
                assert_eq!(size, -4096);
                assert_eq!(machine, "arm-eabi");
            }
            _ => panic!("expected pages command"),
        }
    }

    #[test]
    fn run_select() {
        let cli = Cli::try_parse_from(["machdesc", "select", "--bits", "64", "--cpu", "x86", "--os", "linux"]).unwrap();
        assert!(run(cli).is_ok());
    }
}
