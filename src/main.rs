mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Stats {
            graph,
            format,
            centrality,
        } => commands::stats::run(&graph, format, centrality)?,
        cli::Commands::Path {
            graph,
            from,
            to,
            undirected,
            max_depth,
            all,
        } => commands::path::run(&graph, &from, &to, !undirected, max_depth, all)?,
        cli::Commands::Hubs {
            graph,
            top,
            direction,
            node_type,
        } => commands::hubs::run(&graph, top, &direction, node_type.as_deref())?,
        cli::Commands::Neighborhood {
            graph,
            node,
            hops,
            directed,
        } => commands::neighborhood::run(&graph, &node, hops, directed)?,
        cli::Commands::Merge {
            output,
            inputs,
            name,
            description,
        } => commands::merge::run(&output, &inputs, &name, description.as_deref())?,
        cli::Commands::Export {
            graph,
            format,
            output,
            base_uri,
        } => commands::export::run(&graph, format, output.as_deref(), base_uri.as_deref())?,
    }

    Ok(())
}
