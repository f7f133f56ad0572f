//! Chat behavior CLI
//!
//! Reads an agent reply (argument or stdin) and prints its playback
//! timeline as JSON on stdout. Logs go to stderr.

use std::io::{self, Read, Write};

use anyhow::{bail, Context};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use chat_behavior_config::constants::env::ENV_SELECTOR;
use chat_behavior_config::{load_settings, Settings};
use chat_behavior_core::{EmotionSignal, EmotionState, PlaybackAction};
use chat_behavior_engine::{total_duration, BehaviorCoordinator};

#[derive(Parser, Debug)]
#[command(name = "chat-behavior", version, about = "Turn a reply into a timed chat playback timeline")]
struct Args {
    /// Reply text; read from stdin when omitted
    text: Option<String>,

    /// Fine emotion entry, repeatable (e.g. --emotion happy=high)
    #[arg(long = "emotion", value_name = "LABEL=LEVEL", value_parser = parse_emotion)]
    emotions: Vec<(String, String)>,

    /// Configuration environment (config/{env}.yaml); defaults to $CHAT_BEHAVIOR_ENV
    #[arg(long)]
    env: Option<String>,

    /// Seed the random source for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    emotion: EmotionState,
    total_duration: f64,
    actions: &'a [PlaybackAction],
}

fn parse_emotion(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((label, level)) if !label.trim().is_empty() && !level.trim().is_empty() => {
            Ok((label.trim().to_string(), level.trim().to_string()))
        }
        _ => Err(format!("expected LABEL=LEVEL, got '{}'", raw)),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = args.env.clone().or_else(|| std::env::var(ENV_SELECTOR).ok());
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    init_tracing(&settings);
    tracing::debug!(
        environment = ?settings.environment,
        env = env.as_deref().unwrap_or("default"),
        "Configuration ready"
    );

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read reply text from stdin")?;
            buffer
        }
    };
    if text.trim().is_empty() {
        bail!("no reply text given");
    }

    let signal: EmotionSignal = args.emotions.into_iter().collect();
    let signal = (!signal.is_empty()).then_some(signal);

    let coordinator = BehaviorCoordinator::new(settings.behavior);
    let actions = match args.seed {
        Some(seed) => coordinator.process_message_with_rng(
            &text,
            signal.as_ref(),
            &mut StdRng::seed_from_u64(seed),
        )?,
        None => coordinator.process_message(&text, signal.as_ref())?,
    };

    let output = Output {
        emotion: coordinator.resolve_emotion(signal.as_ref()),
        total_duration: total_duration(&actions),
        actions: &actions,
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;

    tracing::info!(
        actions = actions.len(),
        total_duration = output.total_duration,
        "Timeline written"
    );

    Ok(())
}

fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("chat_behavior={}", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(io::stderr).boxed()
    };
    subscriber.with(fmt_layer).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_emotion() {
        assert_eq!(
            parse_emotion(" happy = high "),
            Ok(("happy".to_string(), "high".to_string()))
        );
        assert!(parse_emotion("happy").is_err());
        assert!(parse_emotion("=high").is_err());
        assert!(parse_emotion("happy=").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "chat-behavior",
            "Hi there!",
            "--emotion",
            "happy=high",
            "--emotion",
            "excited=low",
            "--seed",
            "42",
            "--pretty",
        ])
        .unwrap();

        assert_eq!(args.text.as_deref(), Some("Hi there!"));
        assert_eq!(args.emotions.len(), 2);
        assert_eq!(args.seed, Some(42));
        assert!(args.pretty);
        assert!(args.env.is_none());
    }

    #[test]
    fn test_output_shape() {
        let coordinator = BehaviorCoordinator::default();
        let actions = coordinator
            .process_message_with_rng("One. Two.", None, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let output = Output {
            emotion: EmotionState::Neutral,
            total_duration: total_duration(&actions),
            actions: &actions,
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["emotion"], "neutral");
        assert!(value["actions"].is_array());
        assert!(value["total_duration"].as_f64().unwrap() >= 0.0);
    }
}
