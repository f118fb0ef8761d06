//! Handler functions for network and graph CLI commands.
//!
//! `network *` handlers build a network through a [`NetworkService`] and
//! save it as node-link JSON; `graph stats` and `graph validate` read a
//! saved network back.

use crate::cli::{InputArgs, OutputArgs};
use litnet_core::traits::ConfigProvider;
use litnet_core::{Error, Result};
use litnet_graph::{
    DegreeDirection, EntityRef, GraphData, GraphMetadata, NetworkService, NodeKind,
    compute_stats, entity_network, load_graph, load_metadata, save_graph, top_nodes_by_degree,
    validate_graph,
};
use litnet_store::{EntityId, EntityStore};
use std::path::{Path, PathBuf};

// ============================================================================
// Option types
// ============================================================================

/// Which schools go into a schools network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchoolSelection {
    /// Every school in the store.
    All,
    /// Schools classified by a categorizer slug.
    Categorizer(String),
    /// Schools by id; unknown ids are an error.
    Ids(Vec<EntityId>),
}

impl SchoolSelection {
    /// Selection from the `network schools` flags.
    pub fn from_flags(categorizer: Option<String>, ids: Vec<EntityId>) -> Self {
        match categorizer {
            Some(slug) => Self::Categorizer(slug),
            None if ids.is_empty() => Self::All,
            None => Self::Ids(ids),
        }
    }
}

// ============================================================================
// Helper: resolve graph paths
// ============================================================================

fn output_path<C: ConfigProvider>(config: &C, network: &str, output: &OutputArgs) -> Result<PathBuf> {
    match output.output {
        Some(ref p) => Ok(PathBuf::from(p)),
        None => config.graph_output_path(network),
    }
}

fn input_path<C: ConfigProvider>(config: &C, input: &InputArgs) -> Result<PathBuf> {
    match input.input {
        Some(ref p) => Ok(PathBuf::from(p)),
        None => config.graph_output_path(&input.network),
    }
}

// ============================================================================
// Network handlers
// ============================================================================

/// Build and export the author/editor/translator network.
pub fn handle_contributors<C: ConfigProvider>(
    config: &C,
    service: &NetworkService,
    output: OutputArgs,
) -> Result<()> {
    let graph = service.contributor_network()?;
    export_network(config, "contributors", &graph, &output)
}

/// Build and export a schools network.
pub fn handle_schools<C: ConfigProvider>(
    config: &C,
    service: &NetworkService,
    selection: SchoolSelection,
    output: OutputArgs,
) -> Result<()> {
    let graph = match selection {
        SchoolSelection::All => {
            let ids: Vec<EntityId> = service.store().schools().iter().map(|s| s.id).collect();
            service.schools_network(&ids)?
        }
        SchoolSelection::Categorizer(slug) => service.schools_by_categorizer(&slug)?,
        SchoolSelection::Ids(ids) => service.schools_network(&ids)?,
    };
    export_network(config, "schools", &graph, &output)
}

/// Build and export the network over every entity of one kind.
pub fn handle_entities<C: ConfigProvider>(
    config: &C,
    service: &NetworkService,
    kind: NodeKind,
    with_edges_only: bool,
    output: OutputArgs,
) -> Result<()> {
    let store = service.store();
    let roots = EntityRef::all_of_kind(store, kind);
    log::debug!("Building {kind} network over {} entities", roots.len());
    let graph = entity_network(store, &roots, with_edges_only)?;
    export_network(config, kind.prefix(), &graph, &output)
}

/// Print a summary and, unless this is a dry run, save the graph.
fn export_network<C: ConfigProvider>(
    config: &C,
    network: &str,
    graph: &GraphData,
    output: &OutputArgs,
) -> Result<()> {
    let stats = compute_stats(graph);

    println!("Network '{network}' built:");
    println!("  Nodes: {}", stats.node_count);
    println!("  Edges: {}", stats.edge_count);
    for (label, count) in &stats.label_distribution {
        println!("    {label}: {count}");
    }

    if output.dry_run {
        println!("\nDry run: network not saved.");
        return Ok(());
    }

    let path = output_path(config, network, output)?;
    save_graph(graph, &path, Some(GraphMetadata::for_graph(network, graph)))?;
    println!("\nNetwork saved to: {}", path.display());
    Ok(())
}

// ============================================================================
// Graph handlers
// ============================================================================

/// Show statistics for a saved network.
pub fn handle_stats<C: ConfigProvider>(config: &C, input: &InputArgs, top: usize) -> Result<()> {
    let path = input_path(config, input)?;
    let graph = load_graph_or_error(&path)?;
    let stats = compute_stats(&graph);

    println!("Graph Statistics");
    println!("================");
    if let Some(metadata) = load_metadata(&path)? {
        if let Some(ref network) = metadata.network {
            println!("Network:        {network}");
        }
        if let Some(built_at) = metadata.built_at_time() {
            println!("Built at:       {}", built_at.to_rfc3339());
        }
    }
    println!("Nodes:          {}", stats.node_count);
    println!("  Orphans:      {}", stats.orphan_count);
    println!("Edges:          {}", stats.edge_count);
    println!("Avg degree:     {:.2}", stats.avg_degree);
    println!("Max in-degree:  {}", stats.max_in_degree);
    println!("Max out-degree: {}", stats.max_out_degree);

    if let Some(ref node_id) = stats.most_incoming {
        println!("Most incoming:  {node_id} (in-degree: {})", stats.max_in_degree);
    }
    if let Some(ref node_id) = stats.most_outgoing {
        println!("Most outgoing:  {node_id} (out-degree: {})", stats.max_out_degree);
    }

    if !stats.kind_distribution.is_empty() {
        println!("\nNode kinds:");
        for (kind, count) in sorted_by_count(&stats.kind_distribution) {
            println!("  {kind}: {count}");
        }
    }

    if !stats.label_distribution.is_empty() {
        println!("\nEdge labels:");
        for (label, count) in sorted_by_count(&stats.label_distribution) {
            println!("  {label}: {count}");
        }
    }

    if top > 0 && !graph.is_empty() {
        println!("\nMost connected:");
        for (id, degree) in top_nodes_by_degree(&graph, top, DegreeDirection::Both) {
            let label = graph.get_node(&id).map(|n| n.label.as_str()).unwrap_or("");
            println!("  {id} ({label}): {degree}");
        }
    }

    Ok(())
}

/// Validate a saved network.
pub fn handle_validate<C: ConfigProvider>(config: &C, input: &InputArgs) -> Result<()> {
    let path = input_path(config, input)?;
    let graph = load_graph_or_error(&path)?;

    let result = validate_graph(&graph);

    if result.valid {
        println!("Graph is valid.");
    } else {
        println!("Graph has validation issues:");
    }

    for error in &result.errors {
        println!("  ERROR [{}]: {}", error.code, error.message);
        for edge in &error.edges {
            println!("    - {edge}");
        }
    }

    for warning in &result.warnings {
        println!("  WARN  [{}]: {}", warning.code, warning.message);
        for node in &warning.nodes {
            println!("    - {node}");
        }
    }

    for info in &result.info {
        println!("  INFO  [{}]: {}", info.code, info.message);
    }

    println!(
        "\nSummary: {} error(s), {} warning(s), {} note(s)",
        result.errors.len(),
        result.warnings.len(),
        result.info.len()
    );

    if result.valid {
        Ok(())
    } else {
        Err(Error::operation(format!(
            "Graph validation failed with {} error(s)",
            result.errors.len()
        )))
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Load a graph, reporting a missing file as such.
fn load_graph_or_error(path: &Path) -> Result<GraphData> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }
    load_graph(path)
}

fn sorted_by_count(
    distribution: &std::collections::BTreeMap<String, usize>,
) -> Vec<(&String, &usize)> {
    let mut entries: Vec<_> = distribution.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));
    entries
}

// ============================================================================
// Tests
// ============================================================================
