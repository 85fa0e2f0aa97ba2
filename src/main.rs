//! Replays one onboarding session and prints its outcome as JSON.
//!
//! Answers are taken from the command line in order. Once they run out, the
//! first option of each remaining question is chosen until the session
//! completes.
//!
//! ```text
//! onboarding-flow spouse-children finances
//! ```

use std::error::Error;
use std::sync::Arc;

use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*};

use onboarding_flow::adapters::InMemoryAnalyticsRecorder;
use onboarding_flow::application::FlowAnalyticsService;
use onboarding_flow::config::{AppConfig, LogFormat, LoggingConfig};
use onboarding_flow::domain::analytics::{ArchetypeCatalog, FlowOptimizer};
use onboarding_flow::domain::flow::{FlowEngine, TurnOutcome};
use onboarding_flow::domain::questionnaire::FlowDefinition;

fn main() -> Result<(), Box<dyn Error>> {
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    init_logging(&config.logging);

    let definition = match &config.flow.definition_path {
        Some(path) => match FlowDefinition::from_yaml_file(path) {
            Ok(definition) => {
                info!(path = %path.display(), "Loaded flow definition");
                Arc::new(definition)
            }
            Err(e) => {
                error!(error = %e, "Failed to load flow definition");
                return Err(e.into());
            }
        },
        None => FlowDefinition::standard(),
    };

    let recorder = Arc::new(InMemoryAnalyticsRecorder::new());
    let mut engine = FlowEngine::new(definition.clone(), config.flow.engine_settings());
    if config.analytics.enabled {
        engine = engine
            .with_recorder(recorder.clone())
            .with_optimizer(FlowOptimizer::new(
                ArchetypeCatalog::standard(),
                config.analytics.policy(),
            ));
    }
    info!(
        session_id = %engine.session_id(),
        strategies = ?engine.strategy_names(),
        "Flow engine ready"
    );

    engine.start()?;

    let mut scripted = std::env::args().skip(1);
    let mut turns = Vec::new();
    loop {
        let answer = match scripted.next() {
            Some(answer) => answer,
            None => match engine
                .current_question()
                .and_then(|q| q.options.first())
            {
                Some(option) => option.value.clone(),
                None => break,
            },
        };

        let outcome = match engine.submit_answer(&answer) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, answer = %answer, "Answer rejected");
                return Err(e.into());
            }
        };
        let done = matches!(outcome, TurnOutcome::Completed { .. });
        turns.push(json!({ "answer": answer, "result": outcome }));
        if done {
            break;
        }
    }

    let service =
        FlowAnalyticsService::for_definition(recorder, &definition, &config.analytics);
    let report = json!({
        "session_id": engine.session_id(),
        "status": engine.status(),
        "history": engine.history(),
        "answers": engine.answers(),
        "context": engine.context(),
        "turns": turns,
        "metrics": service.get_metrics(),
        "suggestions": service.get_optimization_suggestions(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!("Session replay complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let env_filter = config.env_filter();

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
