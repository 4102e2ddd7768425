// Copyright 2025. Pattern rendering CLI for pattern-gen.
//
// Usage:
//   pattern-render render <pattern> <width> <height> [options] -o <output.png>
//   pattern-render compare <file_a> <file_b> [-d <diff.png>] [-s <sidebyside.png>]
//   pattern-render list

use std::io::Write;
use std::path::Path;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use log::{debug, info};
use pattern_gen::compositor;
use pattern_gen::{PatternKind, Raster};
use pattern_render::{
    generate_diff_image, generate_sidebyside, load_image, parse_render_args, save_image,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                buf.timestamp_micros(),
                record.level(),
                record.args()
            )
        })
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "render" => cmd_render(&args[2..]),
        "compare" => cmd_compare(&args[2..]),
        "list" => {
            cmd_list();
            Ok(true)
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            process::exit(1);
        }
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("pattern-render - Mathematical pattern renderer");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  render <pattern> <width> <height> [options] -o <output.png|raw>");
    eprintln!("      Render a pattern to an image file.");
    eprintln!("      Options: --intensity <0..2> --randomness <0..1> --distortion <0..1>");
    eprintln!("               --colors <#hex,#hex,..> --config <params.json>");
    eprintln!("               --seed <n> --sequential");
    eprintln!();
    eprintln!("  compare <file_a> <file_b> [-d <diff.png>] [-s <sidebyside.png>]");
    eprintln!("      Compare two image files pixel-by-pixel.");
    eprintln!();
    eprintln!("  list");
    eprintln!("      List available pattern names.");
}

fn cmd_list() {
    println!("Available patterns:");
    for kind in PatternKind::ALL {
        println!("  {:<14} {}", kind.id(), kind.label());
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn cmd_render(args: &[String]) -> Result<bool> {
    let parsed = parse_render_args(args)?;
    let params = parsed.params.clamped();
    let seed = parsed.seed.unwrap_or_else(time_seed);

    info!(
        "Rendering '{}' at {}x{} (intensity {}, randomness {}, distortion {}, seed {})",
        params.pattern,
        parsed.width,
        parsed.height,
        params.intensity,
        params.randomness,
        params.distortion,
        seed
    );

    let raster = if parsed.sequential {
        let mut raster = Raster::new(parsed.width, parsed.height);
        compositor::render_seeded(&mut raster, &params, seed)?;
        raster
    } else {
        compositor::render(parsed.width, parsed.height, &params, seed)?
    };

    save_image(&parsed.output, &raster)
        .with_context(|| format!("Failed to save {}", parsed.output.display()))?;
    info!("Saved: {}", parsed.output.display());
    Ok(true)
}

fn cmd_compare(args: &[String]) -> Result<bool> {
    if args.len() < 2 {
        bail!("Usage: pattern-render compare <file_a> <file_b> [-d <diff>] [-s <sidebyside>]");
    }

    let path_a = Path::new(&args[0]);
    let path_b = Path::new(&args[1]);
    let mut diff_path = None;
    let mut sbs_path = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-d" if i + 1 < args.len() => {
                diff_path = Some(Path::new(&args[i + 1]));
                i += 2;
            }
            "-s" if i + 1 < args.len() => {
                sbs_path = Some(Path::new(&args[i + 1]));
                i += 2;
            }
            other => bail!("Unknown option: {}", other),
        }
    }

    let a = load_image(path_a).context("Failed to load file A")?;
    let b = load_image(path_b).context("Failed to load file B")?;
    debug!("Loaded {:?} and {:?}", a, b);

    let result = a.compare(&b)?;
    println!("{}", result);

    if let Some(dp) = diff_path {
        save_image(dp, &generate_diff_image(&a, &b)?).context("Failed to save diff image")?;
        info!("Diff saved: {}", dp.display());
    }

    if let Some(sp) = sbs_path {
        save_image(sp, &generate_sidebyside(&a, &b)?)
            .context("Failed to save side-by-side image")?;
        info!("Side-by-side saved: {}", sp.display());
    }

    Ok(result.identical)
}
