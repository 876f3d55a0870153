//! printbench - lay out STL models on a printer bed from the command line

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use printbench::{
    arrange_models, default_config_path, init_logging, local_mesh_source, open_session, AppEvent,
    Config, EventBus, EventFilter, ModelOrigin, NotificationLevel, BUILD_DATE, VERSION,
};
use printbench_core::EventCategory;
use printbench_workbench::object_out_of_bounds;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "printbench")]
#[command(about = "Arrange STL models on a 3D printer bed", long_about = None)]
struct Cli {
    /// Configuration file (.toml or .json); defaults to the platform config directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load models onto the bed, lay them out, and save or download the scene
    Arrange {
        /// Model file names to load, in order
        models: Vec<String>,
        /// Load the models from the uploads directory instead of the builtin models
        #[arg(long)]
        uploaded: bool,
        /// Scale each model to the largest size that fits the bed
        #[arg(long)]
        scale_to_max: bool,
        /// Upload the arranged scene to the configured file store
        #[arg(long)]
        save: bool,
        /// File name to save the scene under (default: derived from the last model)
        #[arg(short, long, requires = "save")]
        name: Option<String>,
        /// Write the arranged scene to the downloads directory
        #[arg(long)]
        download: bool,
    },
    /// List available models
    Models {
        /// List uploaded models instead of the builtin ones
        #[arg(long)]
        uploaded: bool,
    },
    /// Write the effective configuration to the config file
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("reading {}", config_path.display()))?;

    match cli.command {
        Commands::Arrange {
            models,
            uploaded,
            scale_to_max,
            save,
            name,
            download,
        } => {
            arrange(
                &config,
                &models,
                uploaded,
                scale_to_max,
                save.then_some(name),
                download,
            )
            .await
        }
        Commands::Models { uploaded } => list_models(&config, uploaded).await,
        Commands::InitConfig => {
            config.save_to_file(&config_path)?;
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

async fn arrange(
    config: &Config,
    models: &[String],
    uploaded: bool,
    scale_to_max: bool,
    save: Option<Option<String>>,
    download: bool,
) -> Result<()> {
    if models.is_empty() && config.workbench.default_model.is_none() {
        bail!("no models given and no default model configured");
    }
    info!("printbench {} (built {})", VERSION, BUILD_DATE);

    let events = Arc::new(EventBus::new());
    events.subscribe(
        EventFilter::Categories(vec![EventCategory::Notification]),
        |event| {
            if let AppEvent::Notification(note) = event {
                match note.level {
                    NotificationLevel::Error => error!("{}: {}", note.title, note.message),
                    _ => info!("{}: {}", note.title, note.message),
                }
            }
        },
    );

    let mut workbench = open_session(config, events).await;
    arrange_models(&mut workbench, models, !uploaded, scale_to_max).await?;
    workbench.remove_all_selections();

    let bed = *workbench.bed();
    for object in workbench.registry().objects() {
        let name = object.file_name().unwrap_or("unnamed");
        if object_out_of_bounds(object, &bed) {
            warn!("{} {} does not fit the {} bed", object.id(), name, bed);
        }
        let size = object.world_bounds().size();
        println!(
            "{}\t{}\t{:.2} x {:.2} x {:.2} mm",
            object.id(),
            name,
            size.x,
            size.y,
            size.z
        );
    }

    if let Some(name) = save {
        let saved = workbench.save_scene(name.as_deref()).await?;
        println!("saved {}", saved);
    }
    if download {
        let path = workbench.download_scene().await?;
        println!("downloaded {}", path.display());
    }

    workbench.dispose();
    Ok(())
}

async fn list_models(config: &Config, uploaded: bool) -> Result<()> {
    let source = local_mesh_source(config);
    let origin = if uploaded {
        ModelOrigin::Uploaded
    } else {
        ModelOrigin::Builtin
    };
    let names = source
        .list_models(origin)
        .await
        .with_context(|| format!("listing {}", source.directory(origin).display()))?;
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
