//! Guided Assessment
//!
//! This example runs the assessment as an interactive terminal dialogue.
//!
//! Key concepts:
//! - The engine is pure; this loop is the imperative shell around it
//! - Invalid answers re-prompt the same question
//! - After a result the operator may start another assessment
//!
//! Set `HF_TRIAGE_CONFIG` to a JSON file to override EF thresholds and
//! `RUST_LOG=hf_triage=debug` to watch transitions.
//!
//! Run with: cargo run --example guided_assessment

use hf_triage::{AssessmentSession, EngineBuilder, EngineConfig, SessionReply};
use std::error::Error;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    print!("Doctor: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn load_config() -> Result<EngineConfig, Box<dyn Error>> {
    match std::env::var("HF_TRIAGE_CONFIG") {
        Ok(path) => Ok(EngineConfig::from_json(&std::fs::read_to_string(path)?)?),
        Err(_) => Ok(EngineConfig::default()),
    }
}

fn begin(session: &AssessmentSession) {
    println!("\nLet's begin the assessment.");
    if let Some(prompt) = session.current_prompt() {
        println!("Assistant: {prompt}");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let engine = EngineBuilder::new().config(load_config()?).build()?;
    let mut session = AssessmentSession::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Welcome to the Emergency Heart Failure Management Assistant!");
    println!("I'll guide you through a rapid assessment of your patient.");
    println!("Type 'quit' at any time to exit.");
    begin(&session);

    while let Some(response) = read_line(&mut input)? {
        if response.eq_ignore_ascii_case("quit") {
            break;
        }

        match session.submit(&engine, &response) {
            Ok(SessionReply::Prompt { prompt, .. }) => println!("Assistant: {prompt}"),
            Ok(SessionReply::Complete {
                confirmation,
                result,
            }) => {
                println!("Assistant: {confirmation}\n");
                println!("{result}");
                println!(
                    "\nAssessment complete. Would you like to start another assessment? \
                     (Type 'yes' to restart or 'quit' to exit)"
                );

                match read_line(&mut input)? {
                    Some(answer) if answer.eq_ignore_ascii_case("yes") => {
                        session.restart();
                        begin(&session);
                    }
                    _ => break,
                }
            }
            Err(err) if err.is_recoverable() => {
                println!("Assistant: {err}");
                if let Some(prompt) = session.current_prompt() {
                    println!("Assistant: {prompt}");
                }
            }
            Err(err) => return Err(err.into()),
        }
    }

    println!("Thank you for using the Emergency Heart Failure Management Assistant. Goodbye!");
    Ok(())
}
