use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use objscope::core::config::{self, ResolvedConfig};
use objscope::object::json::JsonNode;
use objscope::object::render_repr;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Toml,
}

#[derive(Parser)]
#[command(name = "objscope", version, about = "Explore a JSON or TOML document interactively")]
struct Args {
    /// Document to explore, or `-` for stdin
    file: String,

    /// Name shown for the root object (defaults to the file stem)
    #[arg(short, long)]
    name: Option<String>,

    /// Input format (defaults to the file extension, then JSON)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Log level: error, warn, info, debug, trace or off
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Error)]
enum LoadError {
    #[error("could not read input: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("objscope: ignoring config file: {e}");
        config::ObjscopeConfig::default()
    });
    let config = config::resolve(&file_config, args.log_level.as_deref());
    init_logging(&config);

    log::info!("objscope starting up on {}", args.file);

    let value = match load_document(&args.file, args.format) {
        Ok(value) => value,
        Err(e) => {
            log::error!("failed to load {}: {e}", args.file);
            eprintln!("objscope: {}: {e}", args.file);
            return ExitCode::FAILURE;
        }
    };
    let name = args.name.unwrap_or_else(|| root_name(&args.file));

    match objscope::try_explore(JsonNode::new(value).into_ref(), &name, &config) {
        Ok(Some(selected)) => {
            println!("{}", render_repr(selected.as_ref(), config.limits.pager).text);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("exploring {name} failed: {e}");
            eprintln!("{}", objscope::diagnostic(&e));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &ResolvedConfig) {
    let level = config.log_level.parse().unwrap_or(LevelFilter::Info);
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

fn load_document(file: &str, format: Option<Format>) -> Result<serde_json::Value, LoadError> {
    let (text, format) = if file == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        (text, format.unwrap_or(Format::Json))
    } else {
        let format = format.unwrap_or_else(|| guess_format(Path::new(file)));
        (fs::read_to_string(file)?, format)
    };
    Ok(match format {
        Format::Json => serde_json::from_str(&text)?,
        Format::Toml => toml::from_str(&text)?,
    })
}

fn guess_format(path: &Path) -> Format {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
        _ => Format::Json,
    }
}

fn root_name(file: &str) -> String {
    if file == "-" {
        return "stdin".to_string();
    }
    Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("root")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_format_from_extension() {
        assert_eq!(guess_format(Path::new("Cargo.toml")), Format::Toml);
        assert_eq!(guess_format(Path::new("data.JSON")), Format::Json);
        assert_eq!(guess_format(Path::new("noext")), Format::Json);
    }

    #[test]
    fn test_root_name() {
        assert_eq!(root_name("-"), "stdin");
        assert_eq!(root_name("/tmp/report.json"), "report");
    }

    #[test]
    fn test_load_toml_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[server]\nport = 8080\n").unwrap();
        let value = load_document(path.to_str().unwrap(), None).unwrap();
        assert_eq!(value["server"]["port"], 8080);
    }

    #[test]
    fn test_bad_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_document(path.to_str().unwrap(), None).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }
}
