use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Credence: a misinformation-analysis backend built on an incremental
/// knowledge-graph credibility engine
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Scores text credibility from accumulated entity evidence"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Label {
    Real,
    Fake,
}

impl Label {
    pub fn is_real(self) -> bool {
        self == Label::Real
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP analysis server
    Serve {
        /// Host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Path to the knowledge graph snapshot
        #[arg(long, default_value = "knowledge_graph.json")]
        graph: PathBuf,

        /// Seconds between periodic snapshots (0 disables the background task)
        #[arg(long, default_value = "300")]
        snapshot_interval: u64,

        /// NER service endpoint (defaults to CREDENCE_NER_URL, else the
        /// offline heuristic extractor)
        #[arg(long)]
        ner_url: Option<String>,

        /// Classifier endpoint (defaults to CREDENCE_CLASSIFIER_URL; without
        /// one, /analyze returns graph-only reports)
        #[arg(long)]
        classifier_url: Option<String>,
    },

    /// Record one labeled text into the knowledge graph
    Update {
        /// Text to record (or a file path with --file)
        text: String,

        /// Ground-truth label for the text
        #[arg(long, value_enum)]
        label: Label,

        /// Treat TEXT as a path and read the file instead
        #[arg(long)]
        file: bool,

        /// Path to the knowledge graph snapshot
        #[arg(long, default_value = "knowledge_graph.json")]
        graph: PathBuf,

        /// NER service endpoint (defaults to CREDENCE_NER_URL)
        #[arg(long)]
        ner_url: Option<String>,
    },

    /// Score a text against accumulated evidence
    Score {
        /// Text to score
        text: String,

        /// Path to the knowledge graph snapshot
        #[arg(long, default_value = "knowledge_graph.json")]
        graph: PathBuf,

        /// Output format (text, json)
        #[arg(long, short, default_value = "text")]
        format: String,

        /// NER service endpoint (defaults to CREDENCE_NER_URL)
        #[arg(long)]
        ner_url: Option<String>,
    },

    /// Show the entities extracted from a text
    Entities {
        /// Text to run through the extractor
        text: String,

        /// Output format (text, json)
        #[arg(long, short, default_value = "text")]
        format: String,

        /// NER service endpoint (defaults to CREDENCE_NER_URL)
        #[arg(long)]
        ner_url: Option<String>,
    },

    /// Summarize the knowledge graph snapshot
    Stats {
        /// Path to the knowledge graph snapshot
        #[arg(long, default_value = "knowledge_graph.json")]
        graph: PathBuf,
    },
}
