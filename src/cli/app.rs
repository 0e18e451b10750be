use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "dbc2sql")]
#[command(about = "Convert World of Warcraft DBC client tables to SQL")]
#[command(version)]
pub struct Cli {
    /// Control colored output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a DBC file to SQL using an XML schema
    Convert {
        /// Path to the DBC file
        #[arg(short, long)]
        input: String,

        /// Path to the XML schema describing the record layout
        #[arg(short = 'x', long)]
        schema: String,

        /// Write SQL to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Convert every <name>.xml schema that has a matching <name>.dbc file
    Batch {
        /// Directory containing XML schemas
        #[arg(short = 'x', long = "schema-dir")]
        schema_dir: String,

        /// Directory containing DBC files
        #[arg(short, long = "input-dir")]
        input_dir: String,

        /// Directory receiving <name>.sql files
        #[arg(short, long = "output-dir")]
        output_dir: String,
    },

    /// Show the header of a DBC file
    Header {
        /// Path to the DBC file
        #[arg(short, long)]
        input: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Describe the XML schema syntax
    Syntax,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
