use crossterm::event::{KeyboardEnhancementFlags, PushKeyboardEnhancementFlags};
use crossterm::terminal::{enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen};
use crossterm::ExecutableCommand;
use dino_link::app::{restore_terminal, App};
use dino_link::assets::Assets;
use dino_link::core::Config;
use dino_link::input::ReleaseMode;
use dino_link::utils::{init_logging, LOG_ENV};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::error::Error;
use std::io;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Flags parsed from the command line.
#[derive(Debug, Default)]
struct Args {
    seed: Option<u64>,
    hitboxes: bool,
    init_config: bool,
}

fn print_help() {
    println!("Dino Link - two-player endless runner\n");
    println!("Usage: dino-link [options]\n");
    println!("Options:");
    println!("  --seed <n>     Use a fixed random seed");
    println!("  --hitboxes     Start with hitboxes shown");
    println!("  --init-config  Write the default config to ~/.dino-link/config.json");
    println!("  --version      Show version information");
    println!("  --help         Show this help message\n");
    println!("Set {}=debug to log to ~/.dino-link/dino-link.log", LOG_ENV);
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("dino-link {}", VERSION);
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--hitboxes" => args.hitboxes = true,
            "--init-config" => args.init_config = true,
            "--seed" => match iter.next().and_then(|s| s.parse().ok()) {
                Some(seed) => args.seed = Some(seed),
                None => {
                    eprintln!("--seed needs a non-negative integer");
                    std::process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'dino-link --help' for usage.");
                std::process::exit(1);
            }
        }
    }
    args
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args();

    if args.init_config {
        let path = Config::default().save()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    if let Err(e) = init_logging() {
        eprintln!("Logging disabled: {}", e);
    }

    let mut config = Config::load();
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.hitboxes {
        config.show_hitboxes = true;
    }

    let (assets, problems) = Assets::builtin();
    for problem in &problems {
        warn!("Sprite sheet: {}", problem);
    }

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;

    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let release_mode = if enhanced {
        ReleaseMode::Reported
    } else {
        ReleaseMode::Decay {
            initial_ms: config.key_hold_ms.initial,
            repeat_ms: config.key_hold_ms.repeat,
        }
    };
    info!("Key release mode: {:?}", release_mode);

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(&config, assets, rng, release_mode);
    let result = app.run(&mut terminal);

    // Restore terminal even when the loop failed
    restore_terminal(terminal.backend_mut(), enhanced)?;

    result?;
    Ok(())
}
