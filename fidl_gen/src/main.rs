use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cmds;

#[derive(Parser)]
#[command(name = "fidl-gen")]
#[command(about = "Rust code generation backend for resolved FIDL graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /* Enable verbose output */
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /* Translate schema files into declaration IR for the source emitter */
    Codegen {
        /* Resolved file graph (JSON or YAML) */
        #[arg(short = 'g', long = "graph", value_name = "FILE")]
        graph: PathBuf,

        /* Crate map assigning schema files to Rust modules */
        #[arg(short = 'm', long = "crate-map", value_name = "FILE")]
        crate_map: PathBuf,

        /* Root directory schema file paths are relative to */
        #[arg(short = 'r', long = "src-root", value_name = "DIR")]
        src_root: PathBuf,

        /* Output directory for the generated IR */
        #[arg(
            short = 'o',
            long = "output",
            value_name = "DIR",
            default_value = "generated"
        )]
        output_dir: PathBuf,

        /* Schema files to translate (default: every file in the graph) */
        #[arg(short = 'f', long = "files", value_name = "FILE")]
        files: Vec<String>,
    },

    /* Print the wire layout of one struct */
    Layout {
        /* Resolved file graph (JSON or YAML) */
        #[arg(short = 'g', long = "graph", value_name = "FILE")]
        graph: PathBuf,

        /* Crate map assigning schema files to Rust modules */
        #[arg(short = 'm', long = "crate-map", value_name = "FILE")]
        crate_map: PathBuf,

        /* Root directory schema file paths are relative to */
        #[arg(short = 'r', long = "src-root", value_name = "DIR")]
        src_root: PathBuf,

        /* Graph key of the struct */
        #[arg(short = 't', long = "type", value_name = "KEY")]
        type_key: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Codegen {
            graph,
            crate_map,
            src_root,
            output_dir,
            files,
        } => {
            cmds::codegen::run(graph, crate_map, src_root, output_dir, files, cli.verbose)?;
        }

        Commands::Layout {
            graph,
            crate_map,
            src_root,
            type_key,
        } => {
            cmds::layout::run(graph, crate_map, src_root, type_key, cli.verbose)?;
        }
    }

    Ok(())
}
