use crate::app::App;
use clap::Parser;
use color_eyre::eyre::WrapErr;
use pickleball_core::Config;

pub mod app;
pub mod audio;
pub mod event;
pub mod ui;

/// Play Pickleball against the CPU in the terminal
#[derive(Parser, Debug)]
#[command(name = "terminal-client", version, about)]
struct Cli {
    /// Seed for serves and CPU noise (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    fps: u16,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config {
        seed: cli.seed,
        tick_hz: cli.fps,
        ..Config::default()
    };
    config.validate().wrap_err("invalid configuration")?;

    let terminal = ratatui::init();
    let result = App::new(config).and_then(|app| app.run(terminal));
    ratatui::restore();
    result
}
