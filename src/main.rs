//! Peergraph CLI entrypoint.

use clap::Parser;
use peergraph::cli::commands::{
    node_view, nodes_view, subgraph_view, summary_view, Cli, Commands,
};
use peergraph::cli::output::{output, output_error, OutputFormat};
use peergraph::core::error::{ExitCode, PeergraphError, Result};
use peergraph::core::events::{SceneCommand, SceneEvent};
use peergraph::core::scene::SceneState;
use peergraph::source::{JsonFileSource, SnapshotSource};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    let code = match run(cli, format) {
        Ok(()) => ExitCode::Success,
        Err(err) => output_error(&err, format),
    };
    process::exit(i32::from(code));
}

fn run(cli: Cli, format: OutputFormat) -> Result<()> {
    let graph_path = cli.graph.ok_or_else(|| {
        PeergraphError::user(
            "graph_path_missing",
            "No snapshot file was provided",
            "cli:root",
        )
        .with_hint("Pass --graph <file> pointing at a snapshot JSON file")
    })?;

    let snapshot = JsonFileSource::new(graph_path).fetch()?;
    let (state, _) = SceneState::new().apply(&SceneEvent::snapshot_loaded(snapshot));

    match cli.command {
        Commands::Summary => {
            let view = summary_view(&state)?;
            match format {
                OutputFormat::Table => println!("{}", view.render_table()),
                _ => output(view, format).map_err(print_failed)?,
            }
        }
        Commands::Nodes(args) => {
            let state = apply_filter(state, &SceneEvent::filter_changed(args.criteria()))?;
            let view = nodes_view(&state);
            match format {
                OutputFormat::Table => println!("{}", view.render_table()),
                _ => output(view, format).map_err(print_failed)?,
            }
        }
        Commands::Node(args) => {
            let (state, _) = state.apply(&SceneEvent::node_selected(args.id.as_str()));
            let view = node_view(&state);
            match format {
                OutputFormat::Table => {
                    match &view.node {
                        Some(node) => println!(
                            "{} ({}) reachable={} channels={}",
                            node.id,
                            node.alias.as_deref().unwrap_or("-"),
                            node.reachable,
                            view.channel_count
                        ),
                        None => println!("{}: not found", args.id),
                    }
                    println!("{}", view.render_table());
                }
                _ => output(view, format).map_err(print_failed)?,
            }
        }
        Commands::Subgraph(args) => {
            let state = apply_filter(state, &SceneEvent::filter_changed(args.criteria()))?;
            let view = subgraph_view(&state);
            match format {
                OutputFormat::Table => {
                    println!(
                        "{} nodes, {} edges visible",
                        view.node_count, view.edge_count
                    );
                    println!("{}", view.render_table());
                }
                _ => output(view, format).map_err(print_failed)?,
            }
        }
    }

    Ok(())
}

/// Applies a filter event and surfaces any reported error as a CLI failure.
///
/// The scene recovers from filter errors by keeping its previous derived
/// state; the CLI instead fails fast so the exit code reflects the bad query.
fn apply_filter(state: SceneState, event: &SceneEvent) -> Result<SceneState> {
    let (state, commands) = state.apply(event);
    for command in commands {
        if let SceneCommand::ReportError { error } = command {
            return Err(error);
        }
    }
    Ok(state)
}

fn print_failed(err: std::io::Error) -> PeergraphError {
    PeergraphError::system("output_failed", format!("Failed to write output: {err}"), "cli:output")
}
