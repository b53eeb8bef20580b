use clap::Subcommand;
use megagen_crm::{
    AppError, Config,
    sync::{self, Meeting, Visit},
};
use megagen_session::{DashboardKind, View};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

#[derive(Subcommand)]
pub enum VisitCommands {
    /// List terrain visits from the API
    List,
    /// Record a terrain visit
    Record {
        #[arg(long)]
        client: String,
        #[arg(long)]
        address: String,
        /// RFC 3339 timestamp, defaults to now
        #[arg(long)]
        at: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
}

fn parse_date(value: Option<String>) -> Result<OffsetDateTime, AppError> {
    match value {
        Some(value) => OffsetDateTime::parse(&value, &Rfc3339)
            .map_err(|e| AppError::Validation(format!("invalid date {value:?}: {e}"))),
        None => Ok(OffsetDateTime::now_utc()),
    }
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

pub async fn dashboard(config: &Config) -> anyhow::Result<()> {
    let store = super::open_store(config)?;
    let session = super::require_view(&store, View::Dashboard)?;

    let Some(kind) = DashboardKind::for_roles(&session.roles) else {
        println!("No dashboard for {}", super::roles_label(&session));
        return Ok(());
    };

    let api = super::api(config)?;
    print_json(&api.dashboard(&session, kind).await?)
}

pub async fn clients(config: &Config) -> anyhow::Result<()> {
    let store = super::open_store(config)?;
    let session = super::require_view(&store, View::Clients)?;

    let api = super::api(config)?;
    for client in api.clients(&session).await? {
        print_json(&client)?;
    }

    Ok(())
}

pub async fn visits(config: &Config, command: VisitCommands) -> anyhow::Result<()> {
    let mut store = super::open_store(config)?;
    let session = super::require_view(&store, View::Terrain)?;
    let api = super::api(config)?;

    match command {
        VisitCommands::List => {
            for visit in api.visits(&session).await? {
                print_json(&visit)?;
            }
        }
        VisitCommands::Record {
            client,
            address,
            at,
            notes,
        } => {
            let visit = Visit {
                client,
                address,
                visited_at: parse_date(at)?,
                notes,
            };
            if sync::record_visit(&mut store, &api, visit).await? {
                println!("Visit recorded");
            } else {
                println!("Visit saved locally, the API will catch up later");
            }
        }
    }

    Ok(())
}

pub async fn meeting(
    config: &Config,
    title: String,
    client: String,
    at: String,
    notes: String,
) -> anyhow::Result<()> {
    let mut store = super::open_store(config)?;
    super::require_view(&store, View::Calendar)?;
    let api = super::api(config)?;

    let meeting = Meeting {
        title,
        client,
        starts_at: parse_date(Some(at))?,
        notes,
    };

    if sync::schedule_meeting(&mut store, &api, meeting).await? {
        println!("Meeting scheduled");
    } else {
        println!("Meeting saved to the calendar, the API will catch up later");
    }

    Ok(())
}

pub fn calendar(config: &Config) -> anyhow::Result<()> {
    let mut store = super::open_store(config)?;
    super::require_view(&store, View::Calendar)?;

    for meeting in sync::calendar(&mut store)? {
        let starts_at = meeting.starts_at.format(&Rfc3339)?;
        println!("{starts_at}  {}  {}", meeting.client, meeting.title);
    }

    let unread = sync::notifications(&mut store)?
        .into_iter()
        .filter(|notification| !notification.read)
        .collect::<Vec<_>>();

    if !unread.is_empty() {
        println!();
        for notification in unread {
            println!("* {}", notification.message);
        }
    }

    Ok(())
}
