use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "disclose",
    version,
    about = "Selective disclosure over canonicalized JSON documents"
)]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Maximum container nesting depth accepted in documents.
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Map repeated statements to successive duplicate positions.
    #[arg(long, global = true)]
    pub consume_once: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a reference-engine Ed25519 key pair (hex).
    Keygen,

    /// Print the canonical statements of a document.
    Canonicalize {
        /// Document path, or `-` for stdin.
        doc: String,
    },

    /// Project a document onto path expressions.
    Project {
        doc: String,

        /// Path expression; repeat for several.
        #[arg(long = "path")]
        paths: Vec<String>,
    },

    /// Project a document and print the revealed indices.
    Indices {
        doc: String,

        #[arg(long = "path")]
        paths: Vec<String>,
    },

    /// Sign a document with the reference engine.
    Sign {
        doc: String,

        /// Signing key (32-byte hex).
        #[arg(long)]
        key: String,
    },

    /// Verify a document signature.
    Verify {
        doc: String,

        #[arg(long)]
        public_key: String,

        #[arg(long)]
        signature: String,
    },

    /// Create a selective-disclosure proof.
    Prove {
        doc: String,

        #[arg(long)]
        public_key: String,

        #[arg(long)]
        signature: String,

        /// Nonce text, or hex bytes with --hex-nonce.
        #[arg(long)]
        nonce: String,

        #[arg(long)]
        hex_nonce: bool,

        #[arg(long = "path")]
        paths: Vec<String>,

        /// Also write the proof bundle to this file.
        #[arg(long)]
        out: Option<String>,
    },

    /// Verify a proof against a projected document.
    VerifyProof {
        /// Projected document path, or `-` for stdin.
        projected: String,

        #[arg(long)]
        public_key: String,

        #[arg(long)]
        nonce: String,

        #[arg(long)]
        hex_nonce: bool,

        /// Proof bytes (hex).
        #[arg(long)]
        proof: String,
    },
}
