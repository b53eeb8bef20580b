use serde::{Serialize, de::DeserializeOwned};
use strum::VariantArray;
use tokio::sync::broadcast;
use validator::Validate;

use crate::{
    Authenticator, IMPERSONATOR_KEY, LoginInput, Result, Role, Roles, Session, SessionSnapshot,
    Storage, StorageExt, USER_KEY, View,
};

pub const IMPERSONATION_PLACEHOLDER_TOKEN: &str = "impersonated";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageEventKind {
    Set,
    Removed,
}

/// Emitted after every write the store performs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub kind: StorageEventKind,
}

#[derive(Clone, Debug)]
pub struct ImpersonateInput {
    pub email: String,
    pub roles: Roles,
    pub token: Option<String>,
}

impl ImpersonateInput {
    pub fn new(email: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            email: email.into(),
            roles: roles.into_iter().collect(),
            token: None,
        }
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Current principal backed by persisted local storage.
///
/// Built once on start-up with [`SessionStore::open`] and handed to whoever
/// needs it; storage is the source of truth across restarts.
pub struct SessionStore<S: Storage> {
    storage: S,
    current: Option<Session>,
    events: broadcast::Sender<StorageEvent>,
}

impl<S: Storage> SessionStore<S> {
    pub fn open(mut storage: S) -> Result<Self> {
        let current = storage.read_json::<Session>(USER_KEY)?;
        let snapshot = storage.read_json::<SessionSnapshot>(IMPERSONATOR_KEY)?;
        let (events, _) = broadcast::channel(32);

        match (&current, snapshot) {
            (Some(session), Some(snapshot)) => {
                tracing::debug!(
                    email = %session.email,
                    real_email = %snapshot.email,
                    "restored impersonated session"
                );
            }
            (Some(session), None) => {
                tracing::debug!(email = %session.email, "restored session");
            }
            (None, Some(_)) => {
                tracing::warn!("dropping impersonation record without a session");
                storage.remove(IMPERSONATOR_KEY)?;
            }
            (None, None) => {}
        }

        Ok(Self {
            storage,
            current,
            events,
        })
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_impersonating(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(Session::is_impersonating)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }

    pub fn has_role(&self, required: impl IntoIterator<Item = Role>) -> bool {
        self.current
            .as_ref()
            .is_some_and(|session| session.has_role(required))
    }

    pub fn can_view(&self, view: View) -> bool {
        view.is_allowed(self.current.as_ref())
    }

    pub fn allowed_views(&self) -> Vec<View> {
        View::VARIANTS
            .iter()
            .copied()
            .filter(|view| *view != View::Login && self.can_view(*view))
            .collect()
    }

    pub async fn login<A: Authenticator + ?Sized>(
        &mut self,
        authenticator: &A,
        input: LoginInput,
    ) -> Result<Session> {
        input.validate()?;

        let session = match authenticator.authenticate(&input).await {
            Ok(response) => response.into_session()?,
            Err(e) => {
                tracing::warn!(email = %input.email, error = %e, "login rejected");
                return Err(e);
            }
        };

        self.forget(IMPERSONATOR_KEY)?;
        self.persist(USER_KEY, &session)?;
        self.current = Some(session.clone());

        tracing::info!(email = %session.email, roles = ?session.roles, "signed in");

        Ok(session)
    }

    pub fn set_session(&mut self, session: Session) -> Result<()> {
        self.persist(USER_KEY, &session)?;

        match &session.impersonator {
            Some(snapshot) => self.persist(IMPERSONATOR_KEY, snapshot)?,
            None => self.forget(IMPERSONATOR_KEY)?,
        }

        self.current = Some(session);

        Ok(())
    }

    /// Clears every trace of the session and returns where to navigate.
    pub fn logout(&mut self) -> Result<View> {
        self.forget(USER_KEY)?;
        self.forget(IMPERSONATOR_KEY)?;

        if let Some(session) = self.current.take() {
            tracing::info!(email = %session.email, "signed out");
        }

        Ok(View::Login)
    }

    /// Views the system as another identity. The snapshot is always the
    /// current session; impersonating again overwrites it instead of stacking.
    pub fn impersonate(&mut self, input: ImpersonateInput) -> Result<()> {
        let Some(current) = self.current.as_ref() else {
            tracing::debug!(target_email = %input.email, "impersonate ignored without a session");
            return Ok(());
        };

        let snapshot = current.snapshot();

        let token = input
            .token
            .filter(|token| !token.is_empty())
            .or_else(|| Some(current.token.to_owned()).filter(|token| !token.is_empty()))
            .unwrap_or_else(|| IMPERSONATION_PLACEHOLDER_TOKEN.to_owned());

        let session = Session {
            email: input.email,
            roles: input.roles,
            token,
            impersonator: Some(snapshot.clone()),
        };

        self.persist(IMPERSONATOR_KEY, &snapshot)?;
        self.persist(USER_KEY, &session)?;

        tracing::info!(
            real_email = %snapshot.email,
            target_email = %session.email,
            "impersonation started"
        );

        self.current = Some(session);

        Ok(())
    }

    pub fn exit_impersonation(&mut self) -> Result<()> {
        let stored = self.storage.read_json::<SessionSnapshot>(IMPERSONATOR_KEY)?;
        let Some(snapshot) = stored.or_else(|| {
            self.current
                .as_ref()
                .and_then(|session| session.impersonator.clone())
        }) else {
            return Ok(());
        };

        let session = Session::from(snapshot);

        self.persist(USER_KEY, &session)?;
        self.forget(IMPERSONATOR_KEY)?;

        tracing::info!(email = %session.email, "impersonation ended");

        self.current = Some(session);

        Ok(())
    }

    /// Reads a convenience cache record; corrupt records read as absent.
    pub fn read_cache<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        Ok(self.storage.read_json(key)?)
    }

    pub fn write_cache<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        self.persist(key, value)
    }

    fn persist<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        self.storage.write_json(key, value)?;
        self.notify(key, StorageEventKind::Set);

        Ok(())
    }

    fn forget(&mut self, key: &str) -> Result<()> {
        if self.storage.get(key)?.is_none() {
            return Ok(());
        }

        self.storage.remove(key)?;
        self.notify(key, StorageEventKind::Removed);

        Ok(())
    }

    fn notify(&self, key: &str, kind: StorageEventKind) {
        // no subscribers is the common case
        let _ = self.events.send(StorageEvent {
            key: key.to_owned(),
            kind,
        });
    }
}
