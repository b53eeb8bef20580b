use clap::Subcommand;
use megagen_crm::{AppError, Config};
use megagen_quote::{
    Direction, NewQuote, Quote, QuoteBoard, Stage, TransitionOutcome, quote_code,
};
use megagen_session::{QUOTES_KEY, READY_COUNT_KEY, View};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use super::Store;

#[derive(Subcommand)]
pub enum QuoteCommands {
    /// Replace the local quote cache with the quotes from the API
    Sync,
    /// List cached quotes, newest first
    List {
        /// Only quotes in this stage
        #[arg(long)]
        stage: Option<Stage>,
    },
    /// Create a quote
    Create {
        #[arg(long)]
        client: String,
        #[arg(long, default_value = "")]
        total: String,
        #[arg(long, default_value = "")]
        summary: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        comments: String,
    },
    /// Move a quote to the next stage
    Advance {
        id: u64,
        /// Commit the stage change instead of only requesting it
        #[arg(long)]
        confirm: bool,
    },
    /// Move a quote back one stage
    Retreat {
        id: u64,
        /// Commit the stage change instead of only requesting it
        #[arg(long)]
        confirm: bool,
    },
    /// Set (RFC 3339) or clear the scheduled delivery
    ScheduleDelivery {
        id: u64,
        #[arg(long)]
        at: Option<String>,
    },
    /// Attach a file reference to a quote
    Attach { id: u64, file: String },
    /// Show the stage history of a quote
    History { id: u64 },
}

pub async fn run(config: &Config, command: QuoteCommands) -> anyhow::Result<()> {
    let mut store = super::open_store(config)?;
    let session = super::require_view(&store, View::Quotes)?;

    match command {
        QuoteCommands::Sync => {
            let api = super::api(config)?;
            let board = QuoteBoard::new(api.quotes(&session).await?);
            save(&mut store, &board)?;
            println!("{} quotes synced", board.quotes().len());
        }
        QuoteCommands::List { stage } => {
            let board = load(&mut store)?;
            for quote in board
                .quotes()
                .iter()
                .filter(|quote| stage.is_none_or(|stage| quote.stage == stage))
            {
                print_quote(quote);
            }
        }
        QuoteCommands::Create {
            client,
            total,
            summary,
            address,
            comments,
        } => {
            let mut board = load(&mut store)?;
            let quote = board
                .create(NewQuote {
                    client,
                    total,
                    summary,
                    address,
                    comments,
                    ..Default::default()
                })
                .map_err(AppError::from)?
                .clone();
            save(&mut store, &board)?;
            println!("Created {} for {}", quote.code, quote.client);
        }
        QuoteCommands::Advance { id, confirm } => {
            transition(&mut store, id, Direction::Advance, confirm)?
        }
        QuoteCommands::Retreat { id, confirm } => {
            transition(&mut store, id, Direction::Retreat, confirm)?
        }
        QuoteCommands::ScheduleDelivery { id, at } => {
            let when = at
                .map(|at| OffsetDateTime::parse(&at, &Rfc3339))
                .transpose()
                .map_err(|e| AppError::Validation(format!("invalid delivery date: {e}")))?;
            let mut board = load(&mut store)?;
            if board.set_scheduled_delivery(id, when) {
                save(&mut store, &board)?;
                println!("{} delivery updated", quote_code(id));
            } else {
                println!("{} not found", quote_code(id));
            }
        }
        QuoteCommands::Attach { id, file } => {
            let mut board = load(&mut store)?;
            if board.attach_file(id, file) {
                save(&mut store, &board)?;
                println!("{} files updated", quote_code(id));
            } else {
                println!("{} not found", quote_code(id));
            }
        }
        QuoteCommands::History { id } => {
            let board = load(&mut store)?;
            let Some(quote) = board.get(id) else {
                println!("{} not found", quote_code(id));
                return Ok(());
            };
            for entry in &quote.history {
                println!("{}  {}", entry.display_date(), entry.note);
            }
        }
    }

    Ok(())
}

fn transition(
    store: &mut Store,
    id: u64,
    direction: Direction,
    confirm: bool,
) -> anyhow::Result<()> {
    let mut board = load(store)?;

    let outcome = match board.request_transition(id, direction) {
        TransitionOutcome::PendingConfirmation(_) if confirm => board.confirm(),
        outcome => outcome,
    };

    match outcome {
        TransitionOutcome::Applied { id, stage } => {
            save(store, &board)?;
            println!("{} moved to {stage}", quote_code(id));
        }
        TransitionOutcome::PendingConfirmation(pending) => println!(
            "{}: {} -> {} needs confirmation, re-run with --confirm",
            quote_code(pending.id),
            pending.from,
            pending.to
        ),
        TransitionOutcome::Rejected(reason) => println!("{}: {reason}", quote_code(id)),
        TransitionOutcome::Unchanged => println!("{} unchanged", quote_code(id)),
    }

    Ok(())
}

fn load(store: &mut Store) -> anyhow::Result<QuoteBoard> {
    let quotes: Vec<Quote> = store.read_cache(QUOTES_KEY)?.unwrap_or_default();

    Ok(QuoteBoard::new(quotes))
}

fn save(store: &mut Store, board: &QuoteBoard) -> anyhow::Result<()> {
    store.write_cache(QUOTES_KEY, board.quotes())?;
    store.write_cache(READY_COUNT_KEY, &board.count_in(Stage::Despacho))?;

    Ok(())
}

fn print_quote(quote: &Quote) {
    let delivery = quote
        .scheduled_delivery
        .and_then(|when| when.format(&Rfc3339).ok())
        .unwrap_or_else(|| "-".to_owned());

    println!(
        "{:<9} {:<22} {:<32} {:>14}  {}",
        quote.code,
        quote.stage.to_string(),
        quote.client,
        quote.total,
        delivery
    );
}
