// Algoscope: stepwise algorithm animations in the terminal

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

use algoscope::config::VizConfig;
use algoscope::drivers::{AlgorithmInfo, SortAlgorithm};
use algoscope::engine::Visualizer;
use algoscope::snapshot::StructureKind;
use algoscope::ui::App;

struct Args {
    target: String,
    speed: Option<u8>,
    config: Option<PathBuf>,
    descriptor: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

fn print_usage(program_name: &str) {
    eprintln!(
        "Usage: {} <family|sort> [--speed N] [--config FILE] [--descriptor FILE] [--log-file FILE]",
        program_name
    );
    eprintln!();
    let families: Vec<&str> = StructureKind::ALL.iter().map(|k| k.name()).collect();
    eprintln!("Families: {}", families.join(", "));
    let sorts: Vec<&str> = SortAlgorithm::ALL.iter().map(|a| a.key()).collect();
    eprintln!("Sorts:    {}", sorts.join(", "));
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} merge --speed 80      # Animate merge sort", program_name);
    eprintln!("  {} tree                  # BST operations and traversals", program_name);
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut target = None;
    let mut speed = None;
    let mut config = None;
    let mut descriptor = None;
    let mut log_file = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match arg.as_str() {
            "--speed" => {
                let text = value("--speed")?;
                let parsed = text
                    .parse::<u8>()
                    .map_err(|_| format!("Invalid speed '{}'", text))?;
                speed = Some(parsed);
            }
            "--config" => config = Some(PathBuf::from(value("--config")?)),
            "--descriptor" => descriptor = Some(PathBuf::from(value("--descriptor")?)),
            "--log-file" => log_file = Some(PathBuf::from(value("--log-file")?)),
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            positional => target = Some(positional.to_string()),
        }
    }

    let target = match (target, &descriptor) {
        (Some(target), _) => target,
        (None, Some(_)) => String::new(),
        (None, None) => return Err("No family or algorithm given".to_string()),
    };
    Ok(Args {
        target,
        speed,
        config,
        descriptor,
        log_file,
    })
}

/// Descriptor for a positional argument: a family name or a sort keyword
fn resolve_target(target: &str) -> Option<AlgorithmInfo> {
    if let Some(kind) = StructureKind::from_name(target) {
        return Some(AlgorithmInfo::default_for(kind));
    }
    let lowered = target.to_ascii_lowercase();
    SortAlgorithm::ALL
        .into_iter()
        .find(|algo| algo.key() == lowered)
        .map(SortAlgorithm::info)
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let targets = Targets::new().with_target("algoscope", tracing::Level::DEBUG);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(targets)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("algoscope");

    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    };

    let info = match &args.descriptor {
        Some(path) => algoscope::protocol::decode::<AlgorithmInfo>(&std::fs::read_to_string(path)?)?,
        None => match resolve_target(&args.target) {
            Some(info) => info,
            None => {
                eprintln!("Error: Unknown family or algorithm '{}'", args.target);
                eprintln!();
                print_usage(program_name);
                std::process::exit(1);
            }
        },
    };

    let mut config = match &args.config {
        Some(path) => VizConfig::load(path)?,
        None => VizConfig::default(),
    };
    if let Some(speed) = args.speed {
        config.speed = speed.min(algoscope::config::MAX_SPEED);
    }

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    tracing::info!(algorithm = %info.name, "starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = tokio::task::LocalSet::new();

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let res = local.block_on(&runtime, async {
        let mut app = App::new(Visualizer::for_algorithm(info, config));
        app.run(&mut terminal).await
    });

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
