use crate::config::load_config;
use crate::ir::parse_items;
use crate::layout::compute_layout;
use crate::layout_dump::LayoutDump;
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "bblr", version, about = "Bubble chart renderer in Rust (circle packing)")]
pub struct Args {
    /// Input items JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG/JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme variables and layout settings)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width (overrides the config file)
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height (overrides the config file)
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Seed for the layout RNG; omit for a different layout each run
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.layout.width = width;
    }
    if let Some(height) = args.height {
        config.layout.height = height;
    }
    config.render.width = config.layout.width;
    config.render.height = config.layout.height;

    let input = read_input(args.input.as_deref())?;
    let items = parse_items(&input)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let layout = compute_layout(&items, &config.layout, &mut rng)?;
    if layout.unplaced > 0 {
        eprintln!(
            "warning: {} circle(s) could not be placed and remain at the canvas center",
            layout.unplaced
        );
    }

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            #[cfg(feature = "png")]
            {
                let svg = render_svg(&layout, &config.theme, &config.layout);
                let output = ensure_output(&args.output, "png")?;
                crate::render::write_output_png(&svg, &output, &config.render, &config.theme)?;
            }
            #[cfg(not(feature = "png"))]
            return Err(anyhow::anyhow!(
                "PNG output requires building with the 'png' feature"
            ));
        }
        OutputFormat::Json => {
            let dump = LayoutDump::from_layout(&layout);
            dump.write_json(args.output.as_deref())?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
