use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use polymer_lint::LintEngine;
use polymer_lint::cli::{Args, Command, LintArgs, OutputFormat};
use polymer_lint::config;
use polymer_lint::diagnostics::Warning;
use polymer_lint::document::Document;
use polymer_lint::level::Severity;
use polymer_lint::lint::LintRegistry;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

const SCRIPT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];
const MARKUP_EXTENSIONS: &[&str] = &["html", "htm"];

fn main() -> ExitCode {
    polymer_lint::telemetry::init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    match args.command {
        Some(Command::ListRules) => {
            list_rules()?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Explain { rule }) => {
            explain_rule(&rule)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Lint(lint)) => lint_command(lint),
        None => lint_command(args.lint),
    }
}

fn list_rules() -> anyhow::Result<()> {
    let registry = LintRegistry::default_rules()?;
    for d in registry.descriptors().sorted_by_key(|d| d.name) {
        let summary = d.description.lines().next().unwrap_or_default();
        println!("{}\t{}", d.name, summary);
    }
    Ok(())
}

fn explain_rule(rule: &str) -> anyhow::Result<()> {
    let registry = LintRegistry::default_rules()?;
    let Some(d) = registry.find_descriptor(rule) else {
        anyhow::bail!("unknown lint: {rule}");
    };

    println!("name: {}", d.name);
    println!("severity: {}", Severity::Error.as_str());
    println!();
    println!("{}", d.description);
    Ok(())
}

fn lint_command(args: LintArgs) -> anyhow::Result<ExitCode> {
    let start_dir = infer_start_dir(&args)?;
    let loaded_cfg = config::load_config(args.config.as_deref(), &start_dir)?;

    let mut skip = args.skip.clone();
    if let Some((path, cfg)) = loaded_cfg {
        tracing::debug!(config = %path.display(), "loaded config");
        skip.extend(cfg.lints.disabled);
    }

    let registry = LintRegistry::default_rules_filtered(&args.only, &skip)?;
    let engine = LintEngine::new(registry);

    let documents = load_documents(&args.paths)?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let warnings: Vec<Warning> = runtime
        .block_on(engine.check_documents(&documents))
        .into_iter()
        .flatten()
        .collect();

    match args.format {
        OutputFormat::Pretty => print_pretty(&warnings),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&warnings)?),
        OutputFormat::Github => print_github(&warnings),
    }

    if args.deny_warnings && !warnings.is_empty() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn infer_start_dir(args: &LintArgs) -> anyhow::Result<PathBuf> {
    let Some(first) = args.paths.first() else {
        return std::env::current_dir().context("failed to read current directory");
    };
    if first.is_dir() {
        return Ok(first.clone());
    }
    Ok(first
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf))
}

fn load_documents(paths: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
    if paths.is_empty() {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(vec![Document::from_js("<stdin>", &source)?]);
    }

    let mut documents = Vec::new();
    for file in collect_files(paths)? {
        let source = std::fs::read_to_string(&file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let url = file.display().to_string();
        let document = if has_extension(&file, MARKUP_EXTENSIONS) {
            Document::from_html(url, &source)
        } else {
            Document::from_js(url, &source)
        }
        .with_context(|| format!("failed to parse {}", file.display()))?;
        documents.push(document);
    }
    Ok(documents)
}

fn collect_files(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
            let file = entry.path();
            if entry.file_type().is_file()
                && (has_extension(file, SCRIPT_EXTENSIONS) || has_extension(file, MARKUP_EXTENSIONS))
            {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

fn print_pretty(warnings: &[Warning]) {
    for w in warnings {
        println!(
            "{}:{}:{}: {}[{}]: {}",
            w.file,
            w.range.start.line + 1,
            w.range.start.column + 1,
            w.severity.as_str(),
            w.code,
            w.message
        );
        if let Some(suggestion) = &w.suggestion {
            println!("    help: {}", suggestion.message);
        }
    }
    if !warnings.is_empty() {
        eprintln!("{} warning(s) found", warnings.len());
    }
}

fn print_github(warnings: &[Warning]) {
    for w in warnings {
        println!(
            "::{} file={},line={},col={},title={}::{}",
            w.severity.as_str(),
            w.file,
            w.range.start.line + 1,
            w.range.start.column + 1,
            w.code,
            w.message
        );
    }
}
