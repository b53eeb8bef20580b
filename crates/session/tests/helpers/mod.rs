use megagen_session::{
    Authenticator, Error, LoginInput, LoginResponse, LoginUser, MemoryStorage, Result, Role,
    RoleClaim, Roles, Session, SessionStore,
};

/// Answers every login with the configured reply.
#[allow(dead_code)]
pub enum StubAuthenticator {
    Accept(LoginResponse),
    Reject(Option<String>),
}

impl StubAuthenticator {
    #[allow(dead_code)]
    pub fn accept(email: &str, role: &str, token: &str) -> Self {
        Self::Accept(LoginResponse {
            token: token.to_owned(),
            user: LoginUser {
                email: email.to_owned(),
                role: Some(RoleClaim::One(role.to_owned())),
                roles: None,
            },
        })
    }
}

#[async_trait::async_trait]
impl Authenticator for StubAuthenticator {
    async fn authenticate(&self, _input: &LoginInput) -> Result<LoginResponse> {
        match self {
            StubAuthenticator::Accept(response) => Ok(response.clone()),
            StubAuthenticator::Reject(message) => Err(Error::authentication(message.clone())),
        }
    }
}

#[allow(dead_code)]
pub fn session(email: &str, roles: impl IntoIterator<Item = Role>, token: &str) -> Session {
    Session::new(email, roles.into_iter().collect::<Roles>(), token)
}

#[allow(dead_code)]
pub fn store_with(session: Session) -> anyhow::Result<SessionStore<MemoryStorage>> {
    let mut store = SessionStore::open(MemoryStorage::new())?;
    store.set_session(session)?;

    Ok(store)
}
