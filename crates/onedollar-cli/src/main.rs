//! onedollar - command-line front end for the $1 gesture recognizer
//!
//! Covers the template workflow of a drawing surface without the drawing:
//! gestures come from JSON documents, results go to stdout.

mod cli;

use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use onedollar::{
    Gesture, Recognition, RecognitionService, RecognizerConfig, Stage, load_gesture,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => RecognizerConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RecognizerConfig::default(),
    };

    let mut out = io::stdout().lock();
    run(cli.command, config, &mut out)
}

fn run(command: Commands, config: RecognizerConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let service = RecognitionService::new(config)?;
    match command {
        Commands::Recognize {
            templates,
            gesture,
            top,
        } => run_recognize(&service, &templates, &gesture, top, out),
        Commands::Add {
            templates,
            label,
            gesture,
        } => run_add(&service, &templates, label, &gesture, out),
        Commands::List { templates } => run_list(&service, &templates, out),
        Commands::Stage { stage, gesture } => run_stage(&service, stage, &gesture, out),
        Commands::Config => {
            write!(out, "{}", service.config().to_toml()?)?;
            Ok(())
        }
    }
}

fn read_gesture(path: &Path) -> anyhow::Result<Gesture> {
    load_gesture(path).with_context(|| format!("reading gesture {}", path.display()))
}

fn read_templates(service: &RecognitionService, path: &Path) -> anyhow::Result<usize> {
    let count = service
        .load_templates(path)
        .with_context(|| format!("loading templates from {}", path.display()))?;
    info!("Loaded {} templates from {}", count, path.display());
    Ok(count)
}

fn run_recognize(
    service: &RecognitionService,
    templates: &Path,
    gesture: &Path,
    top: Option<usize>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    read_templates(service, templates)?;
    let gesture = read_gesture(gesture)?;

    match service.recognize(&gesture)? {
        Recognition::Recognized { label, score } => writeln!(out, "{label}\t{score:.4}")?,
        Recognition::Unrecognized => writeln!(out, "unrecognized")?,
    }

    if let Some(k) = top {
        let square_size = service.config().square_size;
        for (rank, m) in service.rank(&gesture, k)?.iter().enumerate() {
            writeln!(
                out,
                "{:>3}. {}\t{:.4}\t{:.3}",
                rank + 1,
                m.label,
                m.score,
                m.similarity(square_size)
            )?;
        }
    }
    Ok(())
}

fn run_add(
    service: &RecognitionService,
    templates: &Path,
    label: String,
    gesture: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if templates.exists() {
        read_templates(service, templates)?;
    }
    let gesture = read_gesture(gesture)?;
    let template = service
        .append_template(templates, label, &gesture)
        .with_context(|| format!("writing templates to {}", templates.display()))?;
    info!("Added template '{}'", template.label());
    writeln!(out, "{}\t{}", service.template_count(), template.label())?;
    Ok(())
}

fn run_list(
    service: &RecognitionService,
    templates: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    read_templates(service, templates)?;
    for (index, template) in service.templates().iter().enumerate() {
        writeln!(out, "{index}\t{}", template.label())?;
    }
    Ok(())
}

fn run_stage(
    service: &RecognitionService,
    stage: Stage,
    gesture: &Path,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let gesture = read_gesture(gesture)?;
    let path = service.stage(&gesture, stage)?;
    info!("{} stage produced {} points", stage, path.len());
    writeln!(out, "{}", Gesture::from(path).to_json()?)?;
    Ok(())
}
