use clap::{Parser, Subcommand, ValueEnum};

/// biokg: query, analyze and export biological knowledge graphs
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Query, analyze and export biological knowledge graphs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print summary statistics of a graph
    Stats {
        /// Graph file in round-trip JSON format
        graph: String,

        /// Output format (text, json)
        #[arg(long, short, default_value = "text")]
        format: OutputFormat,

        /// Include betweenness centrality (graphs up to 1000 nodes)
        #[arg(long)]
        centrality: bool,
    },

    /// Find the shortest path, or every simple path, between two nodes
    Path {
        /// Graph file in round-trip JSON format
        graph: String,

        /// Start node id
        from: String,

        /// End node id
        to: String,

        /// Traverse edges in both directions
        #[arg(long, short)]
        undirected: bool,

        /// Maximum number of edges in a path
        #[arg(long, short)]
        max_depth: Option<usize>,

        /// List all simple paths instead of one shortest path
        #[arg(long, short)]
        all: bool,
    },

    /// List the highest-degree nodes
    Hubs {
        /// Graph file in round-trip JSON format
        graph: String,

        /// Number of hubs to report
        #[arg(long, short, default_value = "10")]
        top: usize,

        /// Degree to rank by (out, in, both)
        #[arg(long, short, default_value = "both")]
        direction: String,

        /// Only consider nodes of this type (e.g. gene, disease, go_term)
        #[arg(long, short)]
        node_type: Option<String>,
    },

    /// Print the nodes and edges within N hops of a node
    Neighborhood {
        /// Graph file in round-trip JSON format
        graph: String,

        /// Center node id
        node: String,

        /// Number of hops
        #[arg(long, default_value = "1")]
        hops: usize,

        /// Follow edge direction instead of treating edges as undirected
        #[arg(long, short)]
        directed: bool,
    },

    /// Merge several graphs into one
    Merge {
        /// Output file for the merged graph
        output: String,

        /// Graph files to merge, earliest wins on conflicting nodes
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Name of the merged graph
        #[arg(long, short, default_value = "MergedGraph")]
        name: String,

        /// Description of the merged graph, derived from the inputs if omitted
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Export a graph to another format
    Export {
        /// Graph file in round-trip JSON format
        graph: String,

        /// Target format
        #[arg(long, short)]
        format: ExportFormat,

        /// Output file (a directory for neo4j-csv); stdout when omitted
        #[arg(long, short)]
        output: Option<String>,

        /// Base URI for RDF and JSON-LD node identifiers
        #[arg(long)]
        base_uri: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Node-link JSON of the directed-graph projection
    Networkx,
    #[value(name = "json-ld")]
    JsonLd,
    Turtle,
    Xml,
    N3,
    Nt,
    Cypher,
    #[value(name = "neo4j-csv")]
    Neo4jCsv,
    /// Node and edge tables as CSV
    Csv,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Networkx => write!(f, "networkx"),
            ExportFormat::JsonLd => write!(f, "json-ld"),
            ExportFormat::Turtle => write!(f, "turtle"),
            ExportFormat::Xml => write!(f, "xml"),
            ExportFormat::N3 => write!(f, "n3"),
            ExportFormat::Nt => write!(f, "nt"),
            ExportFormat::Cypher => write!(f, "cypher"),
            ExportFormat::Neo4jCsv => write!(f, "neo4j-csv"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}
