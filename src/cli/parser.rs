use crate::core::history::SearchField;
use crate::models::destination::Destination;
use clap::{Parser, Subcommand};

/// Command-line interface definition for etiqueta
/// Scan a product barcode, resolve its warehouse address and print labels
#[derive(Parser)]
#[command(
    name = "etiqueta",
    version = env!("CARGO_PKG_VERSION"),
    about = "Point-of-use label printing: resolve a product's warehouse address and print shelf labels",
    long_about = None
)]
pub struct Cli {
    /// Override database path (internal log and label counter)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the product table (BASE_CADASTRO.json)
    #[arg(global = true, long = "products")]
    pub products: Option<String>,

    /// Override the address table (BASE_END.json)
    #[arg(global = true, long = "addresses")]
    pub addresses: Option<String>,

    /// Override the history file
    #[arg(global = true, long = "history")]
    pub history: Option<String>,

    /// Override the directory where label pages are written
    #[arg(global = true, long = "out-dir")]
    pub out_dir: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database, configuration and history file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Resolve a barcode and print its labels
    Print {
        /// Scanned product barcode (BARRAS)
        barcode: String,

        /// Employee id (matricula)
        #[arg(long = "mat", short = 'm', default_value = "")]
        matricula: String,

        /// Destination: pulmao (buffer stock) or separacao (picking)
        #[arg(long = "dest", short = 'd', value_enum)]
        dest: Option<Destination>,

        /// Number of identical labels
        #[arg(long = "copies", short = 'c', default_value = "1")]
        copies: String,

        /// Expiry month/year (MMAA); adds one validity label
        #[arg(long = "validity", short = 'v')]
        validity: Option<String>,
    },

    /// Interactive scanning loop for the workstation
    Scan {
        /// Employee id (matricula)
        #[arg(long = "mat", short = 'm', default_value = "")]
        matricula: String,

        /// Destination: pulmao (buffer stock) or separacao (picking)
        #[arg(long = "dest", short = 'd', value_enum)]
        dest: Option<Destination>,

        /// Ask for a validity date after the copy count
        #[arg(long = "validity-prompt")]
        validity_prompt: bool,
    },

    /// Show the resolved address for a barcode without printing
    Lookup {
        barcode: String,

        #[arg(long = "dest", short = 'd', value_enum)]
        dest: Option<Destination>,
    },

    /// List the print history (last 60 days, newest first)
    History {
        #[arg(long = "search", short = 's', default_value = "")]
        search: String,

        #[arg(long = "field", short = 'f', value_enum, default_value = "all")]
        field: SearchField,
    },

    /// Show printed-label totals
    Counter {
        #[arg(long = "category")]
        category: Option<String>,
    },
}
