use log::debug;
use std::env;

use recipe_import::parsers::{detect_times, scale_ingredient};
use recipe_import::{load_config, ImportPipeline};

const USAGE: &str = "Usage: recipe-import <url> [--scale <factor>] [--times] [--no-image]";

struct Args {
    url: String,
    scale: Option<f64>,
    times: bool,
    download_image: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut url = None;
    let mut scale = None;
    let mut times = false;
    let mut download_image = true;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--scale" => {
                let value = iter.next().ok_or("--scale needs a factor")?;
                let factor: f64 = value
                    .parse()
                    .map_err(|_| format!("Invalid scale factor: {value}"))?;
                if !factor.is_finite() || factor <= 0.0 {
                    return Err(format!("Scale factor must be positive: {value}"));
                }
                scale = Some(factor);
            }
            "--times" => times = true,
            "--no-image" => download_image = false,
            flag if flag.starts_with("--") => return Err(format!("Unknown option: {flag}")),
            _ if url.is_none() => url = Some(arg.clone()),
            extra => return Err(format!("Unexpected argument: {extra}")),
        }
    }

    Ok(Args {
        url: url.ok_or("Please provide a URL as an argument")?,
        scale,
        times,
        download_image,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&args).map_err(|e| format!("{e}\n{USAGE}"))?;

    let mut config = load_config()?;
    if !args.download_image {
        config.download_image = false;
    }

    let pipeline = ImportPipeline::from_config(config)?;
    let outcome = pipeline
        .import_with_progress(&args.url, |state| debug!("Import state: {state}"))
        .await?;
    let recipe = &outcome.recipe;

    println!("{}", serde_json::to_string_pretty(recipe)?);

    if let Some(image) = &outcome.image {
        println!("\nImage: {} ({} bytes)", image.url, image.bytes.len());
    }

    if let Some(factor) = args.scale {
        println!("\nIngredients x{factor}:");
        for line in &recipe.ingredients {
            println!("  {}", scale_ingredient(line, factor));
        }
    }

    if args.times {
        println!("\nTimes:");
        for (index, step) in recipe.instructions.iter().enumerate() {
            for time in detect_times(step) {
                println!(
                    "  step {}: \"{}\" = {}h {}m {}s",
                    index + 1,
                    &step[time.span.clone()],
                    time.hours,
                    time.minutes,
                    time.seconds
                );
            }
        }
    }

    Ok(())
}
