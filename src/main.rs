use anyhow::Result;
use solana_abi_extractor::{analyze_json, extract_abi, generator};
use std::path::{Path, PathBuf};
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

// Simple CLI without clap
fn main() -> Result<()> {
    // Initialize logger
    Builder::new()
        .format(|buf, record| {
            let secs = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default();
            writeln!(buf, "{} [{}] - {}", secs, record.level(), record.args())
        })
        .filter(None, LevelFilter::Info)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Check for --version command
    if args.len() > 1 && (args[1] == "--version" || args[1] == "-v") {
        println!("Solana ABI Extractor v{}", solana_abi_extractor::VERSION);
        return Ok(());
    }

    // No tree given, show usage
    if args.len() < 2 {
        println!("Solana ABI Extractor v{}", solana_abi_extractor::VERSION);
        println!("\nUsage:");
        println!("  {} <TREE_JSON> [--output PATH] [--name NAME] [--raw]", args[0]);
        println!("  {} --version", args[0]);
        println!("\nOptions:");
        println!("  --output, -o PATH    Merge the ABI into the document at PATH");
        println!("  --name, -n NAME      Program name (default: tree file stem)");
        println!("  --raw                Print the full analysis instead of the ABI");
        println!("  --version, -v        Show version information");
        return Ok(());
    }

    let tree_path = PathBuf::from(&args[1]);

    // Parse optional arguments
    let mut output_path = None;
    let mut name = None;
    let mut raw = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--output" | "-o" => {
                if i + 1 < args.len() {
                    output_path = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    println!("Error: Missing value for --output");
                    return Ok(());
                }
            },
            "--name" | "-n" => {
                if i + 1 < args.len() {
                    name = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    println!("Error: Missing value for --name");
                    return Ok(());
                }
            },
            "--raw" => {
                raw = true;
                i += 1;
            },
            _ => {
                println!("Unknown argument: {}", args[i]);
                i += 1;
            }
        }
    }

    // Dump the full analysis, skipping the ABI document
    if raw {
        let json = std::fs::read_to_string(&tree_path)?;
        let analysis = analyze_json(&json)?;
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    // Extract ABI
    let name = name.unwrap_or_else(|| program_name(&tree_path));
    let document = extract_abi(&tree_path, &name, output_path.as_deref())?;

    // Print ABI if no output path specified
    match output_path {
        Some(path) => {
            println!("Recovered {} instructions for {}", document.instructions.len(), document.name);
            println!("Saved to: {}", path.display());
        }
        None => println!("{}", generator::to_json(&document)?),
    }

    Ok(())
}

/// `inst.rs_parsed.json` -> `inst`
fn program_name(tree_path: &Path) -> String {
    let stem = tree_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("program");
    stem.split('.').next().unwrap_or(stem).to_string()
}
