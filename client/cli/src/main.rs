mod board;
mod config;
mod dashboard;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use simdash_api::ApiClient;
use simdash_core::DashBus;
use tui::{draw_ui, map_key, UiContext};

use board::ExperimentsBoard;
use config::Config;
use dashboard::Dashboard;

#[derive(Parser)]
#[command(name = "simdash")]
#[command(about = "simdash — terminal dashboard for social-experiment simulations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive experiment wizard and live dashboard
    Dashboard,
    /// List all backend experiments with status counts
    Experiments {
        /// Keep refreshing the listing every 30 seconds
        #[arg(long)]
        watch: bool,
    },
    /// List backend templates, or show one in full
    Templates {
        /// Template id to show in full
        template_id: Option<String>,
    },
    /// Delete an experiment from the backend
    Delete {
        /// The experiment id to delete
        experiment_id: String,
    },
    /// Probe backend health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init_logger(&config.log_dir, &config.log_level);

    let cli = Cli::parse();
    let api = Arc::new(ApiClient::new(&config.backend_url));

    match cli.command {
        Commands::Dashboard => run_dashboard(api, config).await?,
        Commands::Experiments { watch } => {
            let mut experiments_board = ExperimentsBoard::new();
            let mut ticker = tokio::time::interval(std::time::Duration::from_secs(30));
            loop {
                ticker.tick().await;
                experiments_board.apply_listing(api.experiments().await?);
                for line in experiments_board.table_lines() {
                    println!("{}", line);
                }
                if !watch {
                    break;
                }
                println!();
            }
        }
        Commands::Templates { template_id } => match template_id {
            Some(id) => {
                let template = api.template(&id).await?;
                println!("{}", serde_json::to_string_pretty(&template)?);
            }
            None => {
                let templates = api.templates().await?;
                if templates.is_empty() {
                    println!("No templates found.");
                }
                for t in templates {
                    println!(
                        "{}  {} rounds, {} conversations/round, {} factions",
                        t.template_id,
                        t.rounds,
                        t.conversations_per_round,
                        t.factions.len()
                    );
                    if !t.description.is_empty() {
                        println!("    {}", t.description);
                    }
                }
            }
        },
        Commands::Delete { experiment_id } => {
            let record = api.experiment(&experiment_id).await?;
            api.delete_experiment(&experiment_id).await?;
            println!("Experiment {} deleted ({})", experiment_id, record.template_id);
        }
        Commands::Health => match api.check_health().await {
            Ok(health) => println!("{}", serde_json::to_string_pretty(&health)?),
            Err(_) => println!("Backend is not reachable at {}", config.backend_url),
        },
    }

    Ok(())
}

async fn run_dashboard(api: Arc<ApiClient>, config: Config) -> Result<()> {
    info!(backend = %config.backend_url, "Starting simdash dashboard");

    let mut bus = DashBus::new();
    let mut feed_rx = bus.take_feed_rx().expect("feed rx already taken");
    let mut dashboard = Dashboard::new(api, bus.feed_tx.clone(), config);
    dashboard.probe_backend().await;

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let run = drive(&mut terminal, &mut dashboard, &mut feed_rx).await;

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    run
}

async fn drive(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    dashboard: &mut Dashboard,
    feed_rx: &mut tokio::sync::mpsc::Receiver<simdash_core::event::FeedFrame>,
) -> Result<()> {
    let mut input = EventStream::new();

    loop {
        let template_lines = dashboard.template_lines();
        let review_lines = dashboard.review_lines();
        terminal.draw(|f| {
            draw_ui(
                f,
                &UiContext {
                    session: &dashboard.session,
                    view: &dashboard.view,
                    picker_index: dashboard.picker_index,
                    template_lines: &template_lines,
                    review_lines: &review_lines,
                },
            )
        })?;

        tokio::select! {
            event = input.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = map_key(key) {
                        dashboard.handle_action(action).await;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "Terminal event error");
                }
                None => break,
            },
            frame = feed_rx.recv() => match frame {
                Some(frame) => dashboard.apply_frame(frame),
                None => break,
            },
        }

        if dashboard.should_quit {
            break;
        }
    }

    Ok(())
}
