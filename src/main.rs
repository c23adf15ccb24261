use anyhow::{Context, Result};
use gradle_import::cli::{Args, ConfigDiscovery, ExecutionMode, ImportOptions, ImportToolConfig};
use gradle_import::gradle::GradleCliTrigger;
use gradle_import::import::{AutoImportRegistry, ImportProject, ImportReport, ProjectConfigurator};
use gradle_import::settings::ProjectSettings;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mode = match args.mode() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let verbose = matches!(&mode, ExecutionMode::Import(options) if options.verbose);
    init_logging(verbose);

    match mode {
        ExecutionMode::Import(options) => run_import(options).await,
        ExecutionMode::ShowConfig => {
            ConfigDiscovery::show_discovery_info();
            Ok(())
        }
        ExecutionMode::InitConfig => {
            let path = ConfigDiscovery::create_default_user_config()?;
            println!("Configuration file: {}", path.display());
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "gradle_import=debug"
    } else {
        "gradle_import=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_import(options: ImportOptions) -> Result<()> {
    let config = match &options.config_override {
        Some(path) => {
            info!("Loading configuration override from: {:?}", path);
            ImportToolConfig::from_toml_file(path)?
        }
        None => ConfigDiscovery::discover_config()?,
    };

    let base_dir = options
        .project_dir
        .canonicalize()
        .with_context(|| format!("Project directory {:?} is not accessible", options.project_dir))?;

    let mut settings = ProjectSettings::load(&base_dir)?;
    if !options.hinted_projects.is_empty() {
        settings.override_projects_to_import(options.hinted_projects.clone());
    }
    if options.skip {
        settings.set_skip(true);
    }

    let registry = Arc::new(AutoImportRegistry::new(config.auto_import_disabled));
    let trigger = Arc::new(GradleCliTrigger::new(config.gradle.clone(), registry.clone()));
    let configurator = ProjectConfigurator::new(trigger, registry, config.configurator_config());

    let project = ImportProject {
        base_dir: &base_dir,
        hints: &settings,
        linked: &settings,
    };

    let report = match configurator.configure_project(&project).await {
        Ok(report) => report,
        Err(e) => {
            error!("Import of {:?} failed", base_dir);
            return Err(e.into());
        }
    };

    print_report(&report, options.json)
}

fn print_report(report: &ImportReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if report.skipped {
        println!("Import skipped");
        return Ok(());
    }

    match &report.strategy {
        Some(strategy) => println!("Imported via {} ({} tasks)", strategy, report.task_count()),
        None => println!("Nothing to import"),
    }
    for task in &report.tasks {
        println!("  {} {} {}", task.state, task.project_id, task.task_id);
    }
    Ok(())
}
