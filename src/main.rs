//! Command-line interface for nmap2json

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use std::fs::File;
#[cfg(feature = "cli")]
use std::io::{self, BufWriter, IsTerminal, Write};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use nmap2json::{ArrayWriter, Converter, ElementStream, Limits, DEFAULT_TAG};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "nmap2json")]
#[command(author, version, about = "Convert nmap, or any XML output, to a JSON array", long_about = None)]
struct Cli {
    /// Output file name ('-' for standard output)
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Tag name of the repeating element to stream
    #[arg(short, long, default_value = DEFAULT_TAG)]
    tag: String,

    /// Apply strict resource limits while parsing
    #[arg(long)]
    strict_limits: bool,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    if io::stdin().is_terminal() {
        print_usage();
        std::process::exit(1);
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> nmap2json::Result<()> {
    let stdin = io::stdin();

    let to_stdout = cli.output.as_os_str() == "-";
    let destination: Box<dyn Write> = if to_stdout {
        Box::new(io::stdout().lock())
    } else {
        Box::new(BufWriter::new(File::create(&cli.output)?))
    };

    let limits = if cli.strict_limits {
        Limits::strict()
    } else {
        Limits::default()
    };

    let converter = Converter::new();
    let mut writer = ArrayWriter::new(destination)?;

    for subtree in ElementStream::new(stdin.lock(), cli.tag.as_str()).with_limits(limits) {
        let value = converter.convert(&subtree?)?;
        writer.write_value(&value)?;
    }

    writer.finish()?;

    if !to_stdout {
        println!("JSON output saved to {}", cli.output.display());
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  nmap [OPTIONS] [TARGET] -oX - | nmap2json -o output.json");
    eprintln!("  cat <filename>.xml | nmap2json -o <outputfile>.json");
    eprintln!("  cat <filename>.xml | nmap2json -o -");
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
