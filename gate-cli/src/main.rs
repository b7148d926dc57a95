use clap::Parser;
use gate_cli::session::Session;
use gate_cli::{config, interrupt, logging, repl};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(name = "gate", version, about = "Topocentric azimuth/elevation for stars, bodies, satellites and custom objects")]
struct Cli {
    /// Configuration file, `gate.toml` when omitted
    #[clap(long, short = 'c', env = "GATE_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Command files run before the prompt
    #[clap(value_name = "COMMAND_FILE")]
    scripts: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::read_config(cli.config.as_deref())?;
    let _logging_guard = logging::init_logging(&config.log_dir, "gate", &config.log_level)?;

    tracing::info!("Gate started.");

    let mut session = Session::from_config(config)?;
    interrupt::spawn_listener(session.interrupt.clone());

    let scripts: Vec<PathBuf> = config.startup_scripts.iter().cloned().chain(cli.scripts).collect();

    // The REPL blocks on stdin and sleeps inside tracking loops
    tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut out = std::io::stdout();
        repl::run(&mut session, &scripts, &mut input, &mut out)
    })
    .await??;

    tracing::info!("Gate exited.");
    Ok(())
}
