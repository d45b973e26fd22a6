use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
#[cfg(feature = "api")]
use std::sync::Arc;
use tracing::{error, info, warn};

use mediai_assistant::first_aid::FIRST_AID_KIT;
use mediai_assistant::logging;
use mediai_assistant::{build_controller, Config, ConfigError, NoticeLevel, Page, PageAction, PageView, SessionState};

#[derive(Parser)]
#[command(name = "mediai")]
#[command(version, about = "AI medical assistant: emergency guidance, medicine analysis and natural remedies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    #[cfg(feature = "api")]
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// First aid steps and videos for an emergency
    Emergency {
        #[arg(required = true)]
        description: Vec<String>,
    },
    /// Analysis of a medicine
    Medicine {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Natural remedies for symptoms, with preparation videos
    Remedies {
        #[arg(required = true)]
        symptoms: Vec<String>,
    },
    /// Print the first aid kit contents
    FirstAidKit,
    /// Check that the generative-text service is reachable
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let log_handle = logging::init(cli.verbose);

    if let Commands::FirstAidKit = cli.command {
        println!("First Aid Kit");
        for item in FIRST_AID_KIT {
            println!("  - {}", item);
        }
        return Ok(());
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e @ ConfigError::MissingSecret(_)) => {
            eprintln!("Required API keys not found. Please check your .env file.");
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(handle) = &log_handle {
        logging::apply_level(handle, &config.logging.level);
    }
    info!("🧬 MediAI Assistant starting...");
    tracing::debug!("{}", config.summary());

    let controller = build_controller(&config)?;

    let (page, text) = match cli.command {
        #[cfg(feature = "api")]
        Commands::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            let server = mediai_assistant::api::ApiServer::new(controller, Arc::new(config));
            return server.start().await;
        }
        Commands::Check => {
            if controller.generator().is_available().await {
                info!("✅ {:?} is reachable", config.llm.provider);
                return Ok(());
            }
            error!("❌ {:?} is not reachable", config.llm.provider);
            std::process::exit(1);
        }
        Commands::FirstAidKit => return Ok(()),
        Commands::Emergency { description } => (Page::Emergency, description.join(" ")),
        Commands::Medicine { name } => (Page::Medicine, name.join(" ")),
        Commands::Remedies { symptoms } => (Page::Remedies, symptoms.join(" ")),
    };

    let state = SessionState::new().navigate(page);
    let (_, view) = controller.handle(state, PageAction::Submit(text)).await;
    print_view(&view);

    if view.content.is_none() {
        warn!("No content generated");
        std::process::exit(1);
    }

    Ok(())
}

fn print_view(view: &PageView) {
    if let Some(banner) = view.banner {
        println!("⚠️  {}\n", banner);
    }

    for notice in &view.notices {
        match notice.level {
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
            NoticeLevel::Warning => eprintln!("warning: {}", notice.message),
        }
    }

    if let Some(content) = &view.content {
        println!("{}\n", content.text);
    }

    for section in &view.video_sections {
        if section.videos.is_empty() {
            continue;
        }
        println!("📹 {}", section.subject);
        for video in &section.videos {
            println!("  {}  {}", video.display_title(), video.watch_url());
        }
        println!();
    }

    println!("{}", view.disclaimer);
}
