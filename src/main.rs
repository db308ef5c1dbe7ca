// Command-line front end: prints a diagnosis for every image given.
//
//   cargo run --bin leaf-health -- leaf.jpg
//   cargo run --bin leaf-health -- --json --config extractor.json a.png b.png
//
// Set RUST_LOG=debug to see extracted features and raw scores.
use leaf_health::{diagnose_with, load_image, Diagnosis, ExtractorConfig};

const USAGE: &str = "usage: leaf-health [--config FILE] [--json] IMAGE...";

struct Args {
    config_path: Option<String>,
    json: bool,
    images: Vec<String>,
}

fn parse_args(raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args { config_path: None, json: false, images: Vec::new() };
    let mut raw = raw;
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--config" => {
                let path = raw.next().ok_or("--config needs a file argument")?;
                args.config_path = Some(path);
            }
            "-h" | "--help" => return Err(USAGE.to_owned()),
            s if s.starts_with("--") => return Err(format!("unknown option '{}'", s)),
            _ => args.images.push(arg),
        }
    }
    if args.images.is_empty() {
        return Err("no images given".to_owned());
    }
    Ok(args)
}

fn print_report(path: &str, d: &Diagnosis) {
    println!("{}", path);
    println!("  Prediction: {}", d.prediction.label);
    println!("  Confidence: {:.1}%", d.prediction.confidence_pct());
    println!("  Class probabilities:");
    for (label, p) in d.probabilities.iter() {
        println!("    - {:<17} {:>5.1}%", label.as_str(), p * 100.0);
    }
    println!("  Care tip: {}", d.care_tip);
}

fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(a)  => a,
        Err(e) => {
            eprintln!("{}", e);
            if e != USAGE {
                eprintln!("{}", USAGE);
            }
            std::process::exit(2);
        }
    };

    let config = match &args.config_path {
        Some(path) => match ExtractorConfig::load_json(path) {
            Ok(c)  => c,
            Err(e) => {
                eprintln!("could not load config '{}': {}", path, e);
                std::process::exit(2);
            }
        },
        None => ExtractorConfig::default(),
    };
    log::debug!("using extractor config {:?}", config);

    let mut failed = false;
    for path in &args.images {
        let result = load_image(path).and_then(|img| diagnose_with(&img, &config));
        match result {
            Ok(d) if args.json => match serde_json::to_string_pretty(&d) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("{}: {}", path, e);
                    failed = true;
                }
            },
            Ok(d) => print_report(path, &d),
            Err(e) => {
                log::warn!("skipping {}", path);
                eprintln!("{}: {}", path, e);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Result<Args, String> {
        parse_args(v.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_flags_and_images() {
        let a = args(&["--json", "a.png", "--config", "c.json", "b.jpg"]).unwrap();
        assert!(a.json);
        assert_eq!(a.config_path.as_deref(), Some("c.json"));
        assert_eq!(a.images, vec!["a.png", "b.jpg"]);
    }

    #[test]
    fn rejects_missing_images_and_unknown_flags() {
        assert!(args(&["--json"]).is_err());
        assert!(args(&["--fast", "a.png"]).is_err());
        assert!(args(&["a.png", "--config"]).is_err());
    }
}
