use clap::{Parser, Subcommand};
use knob::config::{self, KnobConfig};
use knob::events::AppEvent;
use knob::knob::{Knob, render};
use knob::sys::runtime;

#[derive(Parser, Debug)]
#[command(name = "knob", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Do not reload the configuration when its file changes
    #[arg(long)]
    no_watch: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Drive a knob from pointer events read on stdin (the default)
    Run,
    /// Show the RGB and HSL forms of a color
    Color { color: String },
    /// List the tick marks for the configured knob
    Ticks,
    /// Write the default configuration file if none exists
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(!cli.no_watch),
        Commands::Color { color } => show_color(&color),
        Commands::Ticks => show_ticks(),
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn print_value(value: f64) {
    println!("{value}");
}

fn run(watch_config: bool) -> anyhow::Result<()> {
    let mut knob = Knob::new(config::load_or_default(), print_value)?;

    let (tx, rx) = async_channel::bounded(32);

    // the background thread owns the only sender
    runtime::start_background_services(tx, watch_config);

    while let Ok(event) = rx.recv_blocking() {
        match event {
            AppEvent::Pointer(pointer) => {
                knob.update(pointer);
            }
            AppEvent::SetDefault(value) => {
                knob.set_default_value(value);
            }
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    apply_config(&mut knob, new_config);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppEvent::Quit => break,
        }

        log::debug!(
            "angle {} value {} active {}",
            knob.current_angle(),
            knob.value(),
            knob.is_active()
        );
    }

    Ok(())
}

fn apply_config(knob: &mut Knob<'static>, new_config: KnobConfig) {
    if knob.config().same_except_default(&new_config) {
        knob.set_default_value(new_config.default_value);
        return;
    }

    match Knob::new(new_config, print_value) {
        Ok(rebuilt) => *knob = rebuilt,
        Err(e) => log::error!("Keeping previous knob, new configuration is invalid: {}", e),
    }
}

fn show_color(color: &str) -> anyhow::Result<()> {
    let Some(hsl) = knob_color::get_knob_color(color) else {
        anyhow::bail!("'{}' is not a hex or 'R, G, B' color", color);
    };

    println!("rgb {}", knob_color::hex_to_rgb(color));
    println!("{hsl}");
    Ok(())
}

fn show_ticks() -> anyhow::Result<()> {
    let knob = Knob::new(config::load_config()?, |_| {})?;
    let view = render(&knob);

    println!(
        "track {} to {} degrees, {} ticks",
        knob.track().start,
        knob.track().end,
        view.ticks.len()
    );
    for (tick, tick_view) in knob.ticks().zip(&view.ticks) {
        println!(
            "{:>4} {:>8.2} {:>5.2} {}",
            tick.index, tick.angle, tick.width, tick_view.class_name
        );
    }
    Ok(())
}
