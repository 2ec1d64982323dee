//! Gynai: PCOS risk prediction from questionnaire answers.
//!
//! Main entry point for the command-line tool.

use std::io::Read;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gynai::adapters::sanitize::SanitizingMakeWriter;
use gynai::config::{Config, LogMode};
use gynai::{InferenceService, PipelineContext, PredictionResult, RawRecord};

const USAGE: &str = "\
Usage: gynai <COMMAND>

Commands:
  predict [FILE]  Predict from a JSON record or array of records (stdin if FILE is omitted)
  describe        Print the feature schema of the loaded model
  model-info      Print model type and expected features
  health          Print service health";

fn main() -> Result<()> {
    let config = Config::from_env()?;

    let (writer, _guard) = match &config.log_mode {
        LogMode::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {parent:?}"))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {path:?}"))?;
            tracing_appender::non_blocking(file)
        }
        // stdout carries command output; logs stay on stderr.
        LogMode::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{USAGE}");
        bail!("missing command");
    };
    if matches!(command.as_str(), "-h" | "--help" | "help") {
        println!("{USAGE}");
        return Ok(());
    }

    let service = InferenceService::new(Arc::new(PipelineContext::from_config(&config)));

    let output = match (command.as_str(), &args[1..]) {
        ("predict", [file]) => predict(&service, &read_input(Some(file))?)?,
        ("predict", []) => predict(&service, &read_input(None)?)?,
        ("describe", []) => serde_json::to_value(service.describe_schema()?)?,
        ("model-info", []) => serde_json::to_value(service.model_info()?)?,
        ("health", []) => serde_json::to_value(service.health())?,
        _ => {
            eprintln!("{USAGE}");
            bail!("unrecognized arguments: {}", args.join(" "));
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_input(file: Option<&String>) -> Result<String> {
    match file {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("reading {path}"))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn prediction_json(result: &PredictionResult) -> Value {
    json!({
        "prediction": result.label,
        "confidence": result.confidence,
        "verdict": result.verdict(),
        "message": "Prediction successful",
    })
}

fn predict(service: &InferenceService, input: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(input).context("input is not valid JSON")?;

    if value.is_array() {
        let records: Vec<RawRecord> =
            serde_json::from_value(value).context("batch entries must be JSON objects")?;
        let results = service
            .predict_batch(&records)
            .into_iter()
            .map(|r| match r {
                Ok(result) => prediction_json(&result),
                Err(e) => json!({ "error": e.to_string() }),
            })
            .collect();
        return Ok(Value::Array(results));
    }

    let record: RawRecord =
        serde_json::from_value(value).context("input must be a JSON object")?;
    let result = service.predict(&record)?;
    Ok(prediction_json(&result))
}
