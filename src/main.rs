// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use doctag::pipeline::RunOptions;
use doctag::utils::logging::{format_error, format_success, format_warning};
use doctag::{
    Config, DocAiClient, OperationTimer, PipelineError, ProcessorManager, TaggingPipeline,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "doctag")]
#[command(version = "0.1.0")]
#[command(about = "Keyword tagging for scanned PDFs via a remote Document AI OCR service", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tagging pipeline: OCR each document, match keywords, write JSON
    Tag {
        #[arg(short, long, value_name = "FILE")]
        keywords: Option<PathBuf>,

        #[arg(short, long, value_name = "DIR")]
        documents: Option<PathBuf>,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,

        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,

        #[arg(long)]
        recursive: bool,
    },

    /// List processor types that can be created in this project/location
    Types,

    /// List configured processor instances
    List,

    /// Show one processor
    Get {
        #[arg(long, value_name = "ID")]
        processor: Option<String>,
    },

    /// Create a new processor
    Create {
        #[arg(long, value_name = "NAME")]
        display_name: String,

        #[arg(long, value_name = "TYPE")]
        processor_type: String,
    },

    /// Enable a processor (a no-op warning if it is already enabled)
    Enable {
        #[arg(long, value_name = "ID")]
        processor: Option<String>,
    },

    /// Disable a processor (a no-op warning if it is already disabled)
    Disable {
        #[arg(long, value_name = "ID")]
        processor: Option<String>,
    },

    /// Delete a processor
    Delete {
        #[arg(long, value_name = "ID")]
        processor: Option<String>,

        #[arg(long)]
        confirm: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    doctag::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Doctag keyword tagging");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Tag {
            keywords,
            documents,
            output,
            pretty,
            limit,
            recursive,
        } => {
            cmd_tag(config, keywords, documents, output, pretty, limit, recursive).await?;
        }
        Commands::Types => {
            cmd_types(&config).await?;
        }
        Commands::List => {
            cmd_list(&config).await?;
        }
        Commands::Get { processor } => {
            cmd_get(&config, processor).await?;
        }
        Commands::Create {
            display_name,
            processor_type,
        } => {
            cmd_create(&config, &display_name, &processor_type).await?;
        }
        Commands::Enable { processor } => {
            cmd_enable(&config, processor).await?;
        }
        Commands::Disable { processor } => {
            cmd_disable(&config, processor).await?;
        }
        Commands::Delete { processor, confirm } => {
            cmd_delete(&config, processor, confirm).await?;
        }
    }

    Ok(())
}

async fn cmd_tag(
    mut config: Config,
    keywords: Option<PathBuf>,
    documents: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
    limit: Option<usize>,
    recursive: bool,
) -> Result<()> {
    if let Some(path) = keywords {
        config.tagging.keywords_path = path;
    }
    if let Some(dir) = documents {
        config.tagging.documents_dir = dir;
    }
    if let Some(path) = output {
        config.tagging.output_path = path;
    }

    let timer = OperationTimer::new("tagging run");

    let pipeline = TaggingPipeline::new(config).context("Failed to create tagging pipeline")?;
    let stats = pipeline
        .run(RunOptions {
            pretty,
            limit,
            recursive,
        })
        .await
        .context("Tagging run failed")?;

    timer.finish_with_count(stats.documents_processed);

    println!(
        "{}",
        format_success(&format!(
            "Tagged {} of {} documents",
            stats.documents_tagged, stats.documents_processed
        ))
    );

    Ok(())
}

fn client_for(config: &Config) -> Result<DocAiClient> {
    DocAiClient::new(config.service.clone(), config.pipeline.clone())
        .context("Failed to create service client")
}

fn processor_or_default(config: &Config, processor: Option<String>) -> String {
    processor.unwrap_or_else(|| config.service.processor_id.clone())
}

async fn cmd_types(config: &Config) -> Result<()> {
    let client = client_for(config)?;
    let manager = ProcessorManager::new(&client);

    let types = manager
        .fetch_processor_types()
        .await
        .context("Failed to fetch processor types")?;

    println!("Processor types:");
    for processor_type in &types {
        match &processor_type.category {
            Some(category) => println!("  {} ({})", processor_type.type_name, category),
            None => println!("  {}", processor_type.type_name),
        }
    }
    println!("\n{} creatable types", types.len());

    Ok(())
}

async fn cmd_list(config: &Config) -> Result<()> {
    let client = client_for(config)?;
    let manager = ProcessorManager::new(&client);

    let processors = manager
        .list_processors()
        .await
        .context("Failed to list processors")?;

    if processors.is_empty() {
        println!("No processors configured");
        return Ok(());
    }

    for processor in &processors {
        println!("Processor Name: {}", processor.name);
        println!("Processor Display Name: {}", processor.display_name);
        println!("Processor Type: {}", processor.processor_type);
        if let Some(state) = &processor.state {
            println!("Processor State: {}", state);
        }
        println!();
    }

    Ok(())
}

async fn cmd_get(config: &Config, processor: Option<String>) -> Result<()> {
    let client = client_for(config)?;
    let manager = ProcessorManager::new(&client);
    let processor_id = processor_or_default(config, processor);

    let processor = manager
        .get_processor(&processor_id)
        .await
        .context("Failed to get processor")?;

    println!("Processor Name: {}", processor.name);
    println!("Processor Display Name: {}", processor.display_name);
    println!("Processor Type: {}", processor.processor_type);
    if let Some(state) = &processor.state {
        println!("Processor State: {}", state);
    }

    Ok(())
}

async fn cmd_create(config: &Config, display_name: &str, processor_type: &str) -> Result<()> {
    let client = client_for(config)?;
    let manager = ProcessorManager::new(&client);

    let processor = manager
        .create_processor(display_name, processor_type)
        .await
        .context("Failed to create processor")?;

    println!(
        "{}",
        format_success(&format!("Created processor {}", processor.id()))
    );
    println!("Processor Name: {}", processor.name);

    Ok(())
}

async fn cmd_enable(config: &Config, processor: Option<String>) -> Result<()> {
    let client = client_for(config)?;
    let manager = ProcessorManager::new(&client);
    let processor_id = processor_or_default(config, processor);

    match manager.enable_processor(&processor_id).await {
        Ok(()) => {
            println!(
                "{}",
                format_success(&format!("Processor {} enabled", processor_id))
            );
        }
        // Cannot enable a processor that is already enabled
        Err(PipelineError::PreconditionFailed(message)) => {
            println!("{}", format_warning(&message));
        }
        Err(e) => return Err(e).context("Failed to enable processor"),
    }

    Ok(())
}

async fn cmd_disable(config: &Config, processor: Option<String>) -> Result<()> {
    let client = client_for(config)?;
    let manager = ProcessorManager::new(&client);
    let processor_id = processor_or_default(config, processor);

    match manager.disable_processor(&processor_id).await {
        Ok(()) => {
            println!(
                "{}",
                format_success(&format!("Processor {} disabled", processor_id))
            );
        }
        // Cannot disable a processor that is already disabled
        Err(PipelineError::PreconditionFailed(message)) => {
            println!("{}", format_warning(&message));
        }
        Err(e) => return Err(e).context("Failed to disable processor"),
    }

    Ok(())
}

async fn cmd_delete(config: &Config, processor: Option<String>, confirm: bool) -> Result<()> {
    let processor_id = processor_or_default(config, processor);

    if !confirm {
        println!(
            "{}",
            format_error(&format!(
                "This will delete processor {}. Use --confirm to proceed",
                processor_id
            ))
        );
        return Ok(());
    }

    let client = client_for(config)?;
    let manager = ProcessorManager::new(&client);

    manager
        .delete_processor(&processor_id)
        .await
        .context("Failed to delete processor")?;

    println!(
        "{}",
        format_success(&format!("Processor {} deleted", processor_id))
    );

    Ok(())
}
