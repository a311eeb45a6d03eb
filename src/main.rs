//! Workspace Layout CLI
//!
//! Usage:
//!   workspace-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --catalog <FILE>  Layout configuration overrides (TOML format)
//!   -s, --strict          Exit with status 2 when violations are found
//!   -d, --debug           Print the zone and item tree to stderr
//!   --compact             Single-line JSON output
//!   --print-catalog       Print the effective configuration as TOML
//!   -v, --verbose         Increase log verbosity (repeatable)
//!   -h, --help            Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use workspace_layout::{generate_layout_with_config, LayoutConfig, SceneGraph, WorkspaceSpec};

#[derive(Parser)]
#[command(name = "workspace-layout")]
#[command(about = "Generate validated furniture layouts for workspaces")]
struct Cli {
    /// Workspace spec, JSON or TOML (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Layout configuration overrides (TOML format)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Exit with status 2 when the layout has clearance violations
    #[arg(short, long)]
    strict: bool,

    /// Debug mode: print zone bounds and item positions to stderr
    #[arg(short, long)]
    debug: bool,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_catalog: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load configuration
    let config = match &cli.catalog {
        Some(path) => match LayoutConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading catalog '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => LayoutConfig::default(),
    };

    if cli.print_catalog {
        match config.to_toml() {
            Ok(text) => print!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Read input
    let spec = match &cli.input {
        Some(path) => WorkspaceSpec::from_file(path).map_err(|e| {
            format!("Error reading spec '{}': {}", path.display(), e)
        }),
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => WorkspaceSpec::parse(&buffer)
                    .map_err(|e| format!("Error reading spec from stdin: {}", e)),
                Err(e) => Err(format!("Error reading from stdin: {}", e)),
            }
        }
    };
    let spec = match spec {
        Ok(spec) => spec,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };

    let result = match generate_layout_with_config(&spec, &config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.debug {
        print_tree(&result.scene_graph);
    }

    for violation in &result.violations {
        eprintln!("warning: {}", violation);
    }

    let json = if cli.compact {
        result.to_json_compact()
    } else {
        result.to_json()
    };
    match json {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if cli.strict && !result.is_clean() {
        std::process::exit(2);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("workspace_layout={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_tree(graph: &SceneGraph) {
    let room = &graph.root.room_dimensions;
    eprintln!("=== Layout Debug ===");
    eprintln!(
        "[room] w={:.2} l={:.2} h={:.2}",
        room.width, room.length, room.height
    );
    for zone in &graph.root.zones {
        eprintln!(
            "  [{}] {} x={:.2} z={:.2} w={:.2} l={:.2} spacing={:.2}",
            zone.zone_id,
            zone.kind,
            zone.bounds.x,
            zone.bounds.z,
            zone.bounds.width,
            zone.bounds.length,
            zone.min_spacing
        );
        for item in &zone.items {
            eprintln!(
                "    [{}] x={:.3} y={:.3} z={:.3} rot={:.3}",
                item.id, item.position.x, item.position.y, item.position.z, item.rotation
            );
        }
    }
    eprintln!("====================");
}

fn print_intro() {
    println!(
        r#"Workspace Layout - Validated furniture layouts from a workspace description

USAGE:
    workspace-layout [OPTIONS] [FILE]
    echo '<spec>' | workspace-layout

OPTIONS:
    -c, --catalog      Layout configuration overrides (TOML file)
    -s, --strict       Exit with status 2 on clearance violations
    -d, --debug        Print zone bounds and item positions
    --compact          Single-line JSON output
    --print-catalog    Print the effective configuration
    -v, --verbose      More logging (-vv for trace)
    -h, --help         Print help

QUICK START:
    echo '{{"workspaceType":"collaborative","areaCategory":"medium"}}' | workspace-layout

This prints the scene graph, violations and resolved template as JSON."#
    );
}
