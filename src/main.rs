use clap::{Parser, Subcommand};
use std::io::Write;

use tally_bot::bot::Bot;
use tally_bot::domain::entities::{Author, BotMember, CapabilitySet, GuildContext, Inbound, Member};
use tally_bot::infrastructure::adapters::console::ConsoleAdapter;
use tally_bot::infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "tally-bot")]
#[command(about = "A virtual-currency chat bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_bot(cli.config, cli.token),
        Commands::Version => println!("tally-bot v{}", env!("CARGO_PKG_VERSION")),
        Commands::InitConfig => init_config(),
    }
}

fn run_bot(config_path: String, token_override: Option<String>) {
    let mut config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };
    if let Some(token) = token_override {
        config.gateway.token = Some(token);
    }

    tracing::info!("Starting tally-bot: {}", config.bot.name);

    // Dispatches interleave at await points only; handler code never runs on
    // parallel threads.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    rt.block_on(async {
        let bot = match Bot::bootstrap(config.clone()).await {
            Ok(bot) => bot,
            Err(e) => {
                tracing::error!("Failed to start: {}", e);
                return;
            }
        };
        if config.gateway.token.is_some() {
            tracing::warn!("Gateway connection is handled by an external client; running console mode");
        }
        run_console(bot, &config).await;
    });
}

async fn run_console(bot: Bot, config: &Config) {
    let gateway = ConsoleAdapter::new(&config.bot.name);
    tracing::info!(
        "Console mode; type {}help to get started, quit to exit",
        config.bot.prefix
    );

    // Console input impersonates the first configured owner inside a
    // synthetic guild with every capability granted.
    let operator = config
        .owners
        .first()
        .cloned()
        .unwrap_or_else(|| "console".to_string());

    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "quit" || text == "exit" {
            break;
        }

        let author = Author::new(operator.clone(), format!("{}#0000", operator));
        let msg = Inbound::new("console", author, text).with_guild(GuildContext {
            id: "console".to_string(),
            owner_id: operator.clone(),
            member: Some(Member {
                can_kick_members: true,
                is_administrator: true,
            }),
            bot_member: Some(BotMember {
                capabilities: CapabilitySet::all(),
            }),
        });
        bot.handle(&gateway, &msg).await;
    }
}

fn init_config() {
    let config = Config::default();
    match serde_yaml::to_string(&config) {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => tracing::error!("Failed to render config: {}", e),
    }
}
