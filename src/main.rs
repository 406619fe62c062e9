//! sheath - Dagger injector generator for Kotlin sources

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use sheath::codegen::scan;
use sheath::{DirectorySink, Generator, GeneratorOptions, KtFile, SymbolIndex, load_sources};

/// sheath - generates injector subcomponents for @ContributesAndroidInjector
#[derive(Parser)]
#[command(name = "sheath")]
#[command(about = "Generates Dagger injector subcomponents for @ContributesAndroidInjector functions")]
#[command(version)]
struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate injector units for every contribution function
    Generate {
        /// Directory generated sources are written under
        #[arg(long, default_value = "build/sheath/src-gen")]
        src_gen_dir: PathBuf,

        /// Process contribution functions one at a time
        #[arg(long)]
        sequential: bool,

        /// Kotlin files or directories to scan
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// List contribution functions and problems without writing anything
    Check {
        /// Kotlin files or directories to scan
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let app = App::parse();

    let filter = if app.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match app.command {
        Command::Generate {
            src_gen_dir,
            sequential,
            inputs,
        } => run_generate(src_gen_dir, sequential, &inputs),
        Command::Check { inputs } => run_check(&inputs),
    }
}

fn load(inputs: &[PathBuf]) -> anyhow::Result<(Vec<KtFile>, SymbolIndex)> {
    let files = load_sources(inputs).context("failed to load sources")?;
    let index = SymbolIndex::from_files(&files);
    tracing::debug!("indexed {} files, {} classifiers", files.len(), index.len());
    Ok((files, index))
}

fn run_generate(src_gen_dir: PathBuf, sequential: bool, inputs: &[PathBuf]) -> anyhow::Result<ExitCode> {
    let (files, index) = load(inputs)?;

    let mut options = GeneratorOptions::new(&src_gen_dir);
    if sequential {
        options = options.sequential();
    }
    let sink = DirectorySink::new(&src_gen_dir);

    match Generator::new(&index, options).generate(&files, &sink) {
        Ok(generated) => {
            tracing::info!(
                "generated {} file(s) into {}",
                generated.len(),
                src_gen_dir.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("{error}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_check(inputs: &[PathBuf]) -> anyhow::Result<ExitCode> {
    let (files, index) = load(inputs)?;
    let mut problems = 0usize;

    for file in &files {
        for error in &file.errors {
            let at = file.line_col(error.range);
            eprintln!("{}:{}:{}: {}", file.path, at.line + 1, at.col + 1, error.message);
            problems += 1;
        }
    }

    let generator = Generator::new(&index, GeneratorOptions::default());
    for site in scan(&files, &index) {
        match generator.generate_unit(&site) {
            Ok(text) => println!("{} -> {}", site.display_name(), text.relative_path.display()),
            Err(error) => {
                eprintln!("{error}");
                problems += 1;
            }
        }
    }

    Ok(if problems == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
