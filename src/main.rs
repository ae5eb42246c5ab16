use boxpack::{BoxpackError, InMemoryMeasurer, LayoutDocument, LayoutEngine, Viewport};
use boxpack_types::viewport::BASELINE_DPI;
use std::env;
use std::fs::File;
use std::io::BufReader;

fn parse_arg(args: &[String], index: usize, name: &str, default: f32) -> Result<f32, BoxpackError> {
    match args.get(index) {
        Some(value) => value.parse().map_err(|_| {
            BoxpackError::InvalidArgument(format!("{} must be a number, got '{}'", name, value))
        }),
        None => Ok(default),
    }
}

/// Lays out a JSON layout document and prints every box as JSON.
fn main() -> Result<(), BoxpackError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 5 {
        eprintln!("Lays out a JSON layout document and prints the resulting boxes.");
        eprintln!();
        eprintln!("Usage: {} <path/to/layout.json> [width] [height] [dpi]", args[0]);
        std::process::exit(1);
    }

    let width = parse_arg(&args, 2, "width", 0.0)?;
    let height = parse_arg(&args, 3, "height", 0.0)?;
    let dpi = parse_arg(&args, 4, "dpi", BASELINE_DPI)?;

    log::info!("Loading layout document from {}", args[1]);
    let document = LayoutDocument::from_reader(BufReader::new(File::open(&args[1])?))?;
    let mut built = document.build()?;

    let engine = LayoutEngine::default();
    let measured = engine.measure_content(&mut built.tree, built.root, &InMemoryMeasurer::new())?;
    log::debug!("measured content of {} nodes", measured);

    let viewport = Viewport::with_dpi(width, height, dpi, BASELINE_DPI);
    engine.layout(&mut built.tree, built.root, &viewport)?;

    println!("{}", serde_json::to_string_pretty(&built.report()?)?);
    Ok(())
}
