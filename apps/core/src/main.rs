// OracleChat REPL
// Chat with a deity persona from the terminal.

use std::io::Write;

use anyhow::{Context, Result};
use oraclechat_core::telemetry::{init_tracing, LogFormat};
use oraclechat_core::{AppError, EngineConfig, EngineHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use uuid::Uuid;

const DEFAULT_PERSONA: &str = "guanyin";

const HELP: &str = "\
Commands:
  /persona <id>   switch persona (starts the conversation over)
  /personas       list personas
  /insights       relationship metrics of this conversation
  /suggest        quick reply suggestions
  /reset          start the conversation over
  /quit           leave";

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush().context("Failed to flush stdout")
}

#[tokio::main]
async fn main() -> Result<()> {
    // Config first: it loads .env, which may carry RUST_LOG
    let config = EngineConfig::from_env().context("Failed to load engine configuration")?;
    init_tracing("oraclechat", LogFormat::from_env())?;
    info!(?config, "Starting OracleChat");

    let engine = EngineHandle::new(config)?;
    let session_id = Uuid::new_v4().to_string();
    let mut persona_id = DEFAULT_PERSONA.to_string();

    println!("{}", HELP);
    if let Some(persona) = engine.persona(&persona_id) {
        println!("{} ({}) is listening.", persona.name, persona.title);
    }
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "/quit" => break,
            "/personas" => {
                for persona in engine.personas() {
                    println!("  {:<10} {} - {}", persona.id, persona.name, persona.title);
                }
            }
            "/persona" => match engine.persona(argument) {
                Some(persona) => {
                    persona_id = persona.id.clone();
                    println!("{} ({}) is listening.", persona.name, persona.title);
                }
                None => println!("Unknown persona '{}'. Try /personas.", argument),
            },
            "/insights" => match engine.insights(&session_id).await {
                Ok(insights) => println!("{}", serde_json::to_string_pretty(&insights)?),
                Err(AppError::UnknownSession(_)) => println!("Say something first."),
                Err(e) => return Err(e.into()),
            },
            "/suggest" => {
                for suggestion in engine
                    .quick_suggestions(&persona_id, Some(&session_id))
                    .await?
                {
                    println!("  - {}", suggestion);
                }
            }
            "/reset" => match engine.reset_session(&session_id).await {
                Ok(()) | Err(AppError::UnknownSession(_)) => println!("Conversation reset."),
                Err(e) => return Err(e.into()),
            },
            _ if command.starts_with('/') => println!("{}", HELP),
            _ => {
                let reply = engine.respond(&session_id, &persona_id, line).await?;
                let name = engine
                    .persona(&persona_id)
                    .map(|p| p.name)
                    .unwrap_or_else(|| persona_id.clone());
                println!("{}: {}", name, reply);
            }
        }
        prompt()?;
    }

    engine.shutdown().await?;
    info!("Goodbye");
    Ok(())
}
