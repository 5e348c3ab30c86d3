//! liftlink — terminal manifest client for drop-zone operations.

use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use liftlink_client::{
    LiftDraft, ManifestClient, OverrideField, QuickVariant, SessionState,
};
use liftlink_models::{LiftRow, MessageDirection, ModelError, ALTITUDE_PRESETS};
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "liftlink")]
#[command(about = "Drop-zone manifest client: pilot chat and lift submission")]
#[command(author, version, long_about = None)]
struct Cli {
    /// Manifest server base URL (falls back to $LIFTLINK_SERVER, then
    /// http://localhost:8000).
    #[arg(long)]
    server_url: Option<String>,

    /// Use the server-backed quick-message list instead of the local file.
    #[arg(long)]
    remote_quick: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Follow the live state: chat, lifts and quick messages.
    Watch,
    /// Print the current state snapshot once.
    State,
    /// Send a chat message to the pilot.
    Send {
        /// Message text.
        text: String,
    },
    /// Mark all inbound messages as read.
    MarkRead,
    /// Submit a lift record.
    Lift(LiftArgs),
    /// Manage quick-message templates.
    Quick {
        #[command(subcommand)]
        action: QuickAction,
    },
}

#[derive(Args, Debug)]
struct LiftArgs {
    /// Explicit lift id; omit to use the next-id suggestion.
    #[arg(long)]
    id: Option<u32>,

    /// Row as alt:jumpers[:overflights], repeatable (e.g. --row 4000:10).
    #[arg(long = "row", value_parser = parse_row)]
    rows: Vec<LiftRow>,

    /// Override the derived jumper total.
    #[arg(long)]
    jumpers: Option<u32>,

    /// Override the derived canopy total (defaults to one per jumper).
    #[arg(long)]
    canopies: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum QuickAction {
    /// List the known templates.
    List,
    /// Append a template.
    Add {
        /// Template text.
        text: String,
    },
    /// Remove the first template matching the text.
    Remove {
        /// Template text.
        text: String,
    },
}

/// Parse `alt:jumpers[:overflights]` into a row on a preset altitude.
fn parse_row(s: &str) -> Result<LiftRow, String> {
    let mut parts = s.split(':');
    let alt: u32 = parts
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(|_| format!("invalid altitude in row \"{s}\""))?;
    if !ALTITUDE_PRESETS.contains(&alt) {
        return Err(format!(
            "altitude {alt} is not one of the presets {ALTITUDE_PRESETS:?}"
        ));
    }
    let jumpers: u32 = parts
        .next()
        .ok_or_else(|| format!("row \"{s}\" is missing a jumper count"))?
        .parse()
        .map_err(|_| format!("invalid jumper count in row \"{s}\""))?;
    let overflights: u32 = match parts.next() {
        Some(part) => part
            .parse()
            .map_err(|_| format!("invalid overflight count in row \"{s}\""))?,
        None => 0, // defaulted to 1 at submission time
    };
    if parts.next().is_some() {
        return Err(format!("row \"{s}\" has too many fields"));
    }
    Ok(LiftRow::new(alt, jumpers, overflights))
}

fn print_session(session: &SessionState) {
    if let Some(club) = &session.club {
        println!("== {club} ==");
    }
    if let Some(ts) = session.last_sync {
        println!("synced {}", ts.format("%H:%M:%S"));
    }

    println!("-- chat --");
    for message in &session.messages {
        let arrow = match message.direction {
            MessageDirection::In => "<-",
            MessageDirection::Out => "->",
        };
        let status = message.status.as_deref().unwrap_or("-");
        println!("{arrow} {} [{status}]", message.text);
    }

    println!("-- lifts --");
    for lift in &session.lifts {
        println!(
            "{} ({}): {} jumpers / {} canopies",
            lift.display_name(),
            lift.status,
            lift.totals.jumpers,
            lift.totals.canopies
        );
    }
    println!("next lift id: {}", session.next_lift_id);

    println!("-- quick --");
    for entry in &session.quick {
        println!("* {entry}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging, controlled via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let server_url = cli.server_url.unwrap_or_else(|| {
        std::env::var("LIFTLINK_SERVER")
            .unwrap_or_else(|_| "http://localhost:8000".to_string())
    });
    let quick_variant = if cli.remote_quick {
        QuickVariant::ServerBacked
    } else {
        QuickVariant::Local
    };

    let client = ManifestClient::new(&server_url, quick_variant)?;

    match cli.command {
        Commands::Watch => {
            if let Err(e) = client.refresh_now().await {
                warn!(error = %e, "initial poll failed, waiting for the next tick");
            }
            print_session(&client.session());
            client.start_polling();

            let mut updates = client.subscribe();
            loop {
                tokio::select! {
                    changed = updates.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        print_session(&updates.borrow().clone());
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
            client.stop_polling();
        }
        Commands::State => {
            client.refresh_now().await?;
            print_session(&client.session());
        }
        Commands::Send { text } => {
            client.send_message(&text).await?;
            println!("sent: {text}");
        }
        Commands::MarkRead => {
            client.mark_messages_read().await?;
            println!("inbound messages marked read");
        }
        Commands::Lift(args) => {
            if args.id == Some(0) {
                bail!(ModelError::InvalidLiftId {
                    value: "0".to_string(),
                    reason: "must be a positive integer".to_string(),
                });
            }
            // Typing a total on the command line is a manual override.
            if args.jumpers.is_some() {
                client.mark_override(OverrideField::JumperTotal);
            }
            if args.canopies.is_some() {
                client.mark_override(OverrideField::CanopyTotal);
            }

            // Pick up the authoritative id suggestion when available.
            if let Err(e) = client.refresh_now().await {
                warn!(error = %e, "could not fetch current state, using cached id suggestion");
            }

            let draft = LiftDraft {
                id: args.id,
                rows: args.rows,
                jumper_total: args.jumpers,
                canopy_total: args.canopies,
            };
            let lift = client.submit_lift(&draft).await?;
            println!(
                "{} submitted: {} jumpers / {} canopies over {} row(s)",
                lift.display_name(),
                lift.totals.jumpers,
                lift.totals.canopies,
                lift.rows.len()
            );
        }
        Commands::Quick { action } => {
            // The server-backed list is only known after a poll.
            if cli.remote_quick {
                if let Err(e) = client.refresh_now().await {
                    warn!(error = %e, "could not fetch quick messages from the server");
                }
            }
            match action {
                QuickAction::List => {}
                QuickAction::Add { text } => client.add_quick(&text).await,
                QuickAction::Remove { text } => client.remove_quick(&text).await,
            }
            for entry in client.quick_messages() {
                println!("* {entry}");
            }
        }
    }

    Ok(())
}
