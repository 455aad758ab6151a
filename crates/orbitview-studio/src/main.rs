mod viewers;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use orbitview_engine::device::GpuInit;
use orbitview_engine::logging::{init_logging, LoggingConfig};
use orbitview_engine::window::{Runtime, RuntimeConfig};

use crate::viewers::{BoardViewer, PlaygroundViewer};

#[derive(ValueEnum, Debug, Copy, Clone, Eq, PartialEq)]
enum Variant {
    /// Top-down orthographic board with a large grid.
    Board,
    /// Perspective view with a spinning box, a sphere and a floor plane.
    Playground,
}

#[derive(Parser, Debug)]
#[command(name = "orbitview-studio", version, about = "Interactive 3D scene viewer")]
struct Args {
    #[arg(short, long, value_enum, default_value_t = Variant::Playground)]
    variant: Variant,

    #[arg(long, default_value_t = 1280.0, help = "Initial window width in logical pixels")]
    width: f64,

    #[arg(long, default_value_t = 720.0, help = "Initial window height in logical pixels")]
    height: f64,

    #[arg(short, long, help = "Window title; defaults to the variant name")]
    title: Option<String>,

    #[arg(long, help = "Log filter in env_logger syntax, e.g. \"orbitview_engine=debug\"")]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = args.log.clone() {
        logging = logging.with_filter(filter);
    }
    init_logging(logging);

    let title = args.title.clone().unwrap_or_else(|| match args.variant {
        Variant::Board => "orbitview board".to_string(),
        Variant::Playground => "orbitview playground".to_string(),
    });
    let config = RuntimeConfig::new(title, args.width, args.height);

    log::info!("starting {:?} viewer at {}x{}", args.variant, args.width, args.height);

    match args.variant {
        Variant::Board => Runtime::run(config, GpuInit::default(), BoardViewer),
        Variant::Playground => Runtime::run(config, GpuInit::default(), PlaygroundViewer::default()),
    }
}
