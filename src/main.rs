use clap::Parser;
use indicator_loader::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
        };

        // Run the main command with cancellation support
        tokio::select! {
            result = commands::run(args) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(indicator_loader::Error::processing_interrupted(
                    "Import interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(()) => {
            // Success - results have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Indicator Loader - Data Catalog Import Tool");
    println!("===========================================");
    println!();
    println!("Load pre-generated CSV observation data into an indicator catalog,");
    println!("manage indicator metadata, and inspect batch runner output.");
    println!();
    println!("USAGE:");
    println!("    indicator-loader <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import           Import pregen observation data for indicators (main command)");
    println!("    load-metadata    Load indicator and part metadata from a JSON manifest");
    println!("    batches          Report status of batch runner output folders");
    println!("    help             Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Import every indicator with registered pregen parts:");
    println!("    indicator-loader import");
    println!();
    println!("    # Import specific indicators with more workers:");
    println!("    indicator-loader import --indicators rate,density --workers 8");
    println!();
    println!("    # Load a metadata manifest:");
    println!("    indicator-loader load-metadata --manifest catalog.json");
    println!();
    println!("    # Inspect batch runner output:");
    println!("    indicator-loader batches --output-format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    indicator-loader <COMMAND> --help");
}
