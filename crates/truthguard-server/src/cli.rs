use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "truthguard-server")]
#[command(author, version, about = "TruthGuard misinformation classifier API", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TRUTHGUARD_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "TRUTHGUARD_PORT")]
    pub port: Option<u16>,

    /// Load the ONNX graph from this file instead of Hugging Face Hub
    #[arg(long, env = "TRUTHGUARD_MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Load tokenizer.json from this file instead of Hugging Face Hub
    #[arg(long, env = "TRUTHGUARD_TOKENIZER_PATH")]
    pub tokenizer_path: Option<PathBuf>,

    /// Artifact cache directory
    #[arg(long, env = "TRUTHGUARD_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Only use artifacts already in the local cache
    #[arg(long)]
    pub offline: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}
