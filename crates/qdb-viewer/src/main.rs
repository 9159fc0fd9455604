mod browse;
mod cli;
mod render;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use qdb_db::Container;
use qdb_decode::{DecoderConfig, PayloadDecoder};
use qdb_history::{History, Session};

use crate::cli::{Args, Command};

fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging. Transcripts go to stdout, logs to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qdb=info,qdb_history=info,qdb_db=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // Config
    let decoder_config = match args.strip_bytes.as_deref() {
        Some(list) => list
            .parse::<DecoderConfig>()
            .context("QDB_STRIP_BYTES is not a valid byte list")?,
        None => DecoderConfig::default(),
    };

    let container = Container::open_with_schema(&args.db, args.schema_names())
        .with_context(|| format!("cannot read {}", args.db.display()))?;

    let history = History::new(container)
        .with_decoder(PayloadDecoder::new(&decoder_config))
        .with_me_label(args.me_label.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Tables => {
            writeln!(out, "Tables found in the database:")?;
            for table in history.container().list_tables()? {
                writeln!(out, "{}", table)?;
            }
        }
        Command::Columns { table } => {
            writeln!(out, "Column names in the '{}' table:", table)?;
            for column in history.container().columns_of(&table)? {
                writeln!(out, "{}", column)?;
            }
        }
        Command::Probe { limit } => {
            let tables = history.container().list_tables()?;
            info!("Probing {} tables", tables.len());
            for table in tables {
                let sample = history.container().sample_rows(&table, limit)?;
                render::write_sample(&mut out, &sample)?;
            }
        }
        Command::Users => {
            let participants = history.list_participants()?;
            render::write_participants(&mut out, &participants, false)?;
        }
        Command::Show { id, name, json } => {
            let name = match name {
                Some(name) => name,
                None => history
                    .find_participant(id)?
                    .map(|p| p.display_name)
                    .unwrap_or_else(|| id.to_string()),
            };

            let conversation = history.load_conversation(id, &name)?;
            if !conversation.resolved {
                eprintln!("No participant found for ICQ number {}", id);
            }

            if json {
                serde_json::to_writer_pretty(&mut out, &conversation)?;
                writeln!(out)?;
            } else {
                render::write_transcript(&mut out, &conversation)?;
            }
        }
        Command::Browse => {
            let mut session = Session::new(history);
            let stdin = io::stdin();
            browse::run(&mut session, stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}
