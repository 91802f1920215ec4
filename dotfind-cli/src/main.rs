use clap::Parser;
use dotfind::image::io::detect_dots_in_file;
use dotfind::{pseudo_accuracy, DetectParams, Point};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Detect circular dots and optionally score against ground truth")]
struct Cli {
    /// Input image (converted to grayscale, alpha discarded).
    #[arg(short, long, value_name = "FILE")]
    image: PathBuf,
    /// Expected dot radius in pixels.
    #[arg(short, long)]
    radius: u32,
    /// Minimum center-to-center distance in pixels [default: radius / 2].
    #[arg(long)]
    min_padding: Option<f32>,
    /// Allowed radius variance in pixels.
    #[arg(long, default_value_t = 1)]
    radius_flex: u32,
    /// Box-blur the image before detection.
    #[arg(long)]
    blur: bool,
    /// Accumulator vote threshold (lower finds more circles).
    #[arg(long, default_value_t = 5)]
    sensitivity: u32,
    /// Lower exclusive intensity bound for the post-filter.
    #[arg(long, default_value_t = 20)]
    color_low: u8,
    /// Upper exclusive intensity bound for the post-filter.
    #[arg(long, default_value_t = 200)]
    color_high: u8,
    /// Ground-truth centers as a JSON array of [x, y] pairs; enables
    /// pseudo-accuracy output.
    #[arg(long, value_name = "FILE")]
    truth: Option<PathBuf>,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Serialize)]
struct Output {
    detections: Vec<[i32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pseudo_accuracy: Option<f32>,
}

fn load_truth(path: &PathBuf) -> Result<Vec<Point>, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let pairs: Vec<[i32; 2]> = serde_json::from_str(&text)?;
    Ok(pairs.iter().map(|&[x, y]| Point::new(x, y)).collect())
}

fn run(cli: &Cli) -> Result<Output, Box<dyn std::error::Error>> {
    let params = DetectParams {
        min_padding: cli.min_padding,
        radius_flex: cli.radius_flex,
        blur: cli.blur,
        sensitivity: cli.sensitivity,
        color_boundary: (cli.color_low, cli.color_high),
        ..DetectParams::new(cli.radius)
    };

    let detections = detect_dots_in_file(&cli.image, &params)?;
    let score = match &cli.truth {
        Some(path) => {
            let truth = load_truth(path)?;
            Some(pseudo_accuracy(&truth, &detections, cli.radius)?)
        }
        None => None,
    };

    Ok(Output {
        detections: detections.iter().map(|p| [p.x, p.y]).collect(),
        pseudo_accuracy: score,
    })
}

#[cfg(test)]
mod tests {
    use super::Output;

    #[test]
    fn output_omits_score_when_no_truth_given() {
        let out = Output {
            detections: vec![[3, 4]],
            pseudo_accuracy: None,
        };
        let json = serde_json::to_string(&out).unwrap();
        assert_eq!(json, r#"{"detections":[[3,4]]}"#);
    }

    #[test]
    fn output_includes_score_when_present() {
        let out = Output {
            detections: vec![],
            pseudo_accuracy: Some(0.5),
        };
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("\"pseudo_accuracy\":0.5"));
    }

    #[test]
    fn truth_file_format_is_pair_array() {
        let pairs: Vec<[i32; 2]> = serde_json::from_str("[[1,2],[3,4]]").unwrap();
        assert_eq!(pairs, vec![[1, 2], [3, 4]]);
    }
}

fn main() {
    let cli = Cli::parse();
    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    match run(&cli) {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
