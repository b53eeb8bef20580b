pub mod field;
pub mod quote;
pub mod server;
pub mod session;

use megagen_crm::{AppError, Config, api::ApiClient};
use megagen_session::{FileStorage, Session, SessionStore, View};

pub type Store = SessionStore<FileStorage>;

pub fn open_store(config: &Config) -> anyhow::Result<Store> {
    let storage = FileStorage::open(&config.storage.path)?;

    Ok(SessionStore::open(storage)?)
}

pub fn api(config: &Config) -> megagen_crm::Result<ApiClient> {
    ApiClient::new(&config.api.base_url)
}

/// Route guard: the signed-in session, if it may open `view`.
pub fn require_view(store: &Store, view: View) -> megagen_crm::Result<Session> {
    let Some(session) = store.current() else {
        return Err(AppError::Forbidden(
            "not signed in, run `megagen-crm login` first".to_owned(),
        ));
    };

    if !store.can_view(view) {
        return Err(AppError::Forbidden(format!(
            "{} cannot open {view}",
            session.email
        )));
    }

    Ok(session.clone())
}

pub fn roles_label(session: &Session) -> String {
    session
        .roles
        .iter()
        .map(|role| role.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}
