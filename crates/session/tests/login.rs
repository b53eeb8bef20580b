use megagen_session::{
    Error, IMPERSONATOR_KEY, LoginInput, MemoryStorage, Role, Roles, SessionStore, Storage,
    StorageEventKind, USER_KEY,
};

mod helpers;

use helpers::StubAuthenticator;

#[tokio::test]
async fn test_login_failure_persists_nothing() -> anyhow::Result<()> {
    let mut store = SessionStore::open(MemoryStorage::new())?;
    let auth = StubAuthenticator::Reject(Some("bad creds".to_owned()));

    let err = store
        .login(&auth, LoginInput::new("ana@megagen.cl", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Authentication(_)));
    assert_eq!(err.to_string(), "bad creds");
    assert!(store.current().is_none());
    assert_eq!(store.storage().get(USER_KEY)?, None);

    Ok(())
}

#[tokio::test]
async fn test_login_failure_default_message() -> anyhow::Result<()> {
    let mut store = SessionStore::open(MemoryStorage::new())?;

    let err = store
        .login(
            &StubAuthenticator::Reject(None),
            LoginInput::new("ana@megagen.cl", "secret"),
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");

    Ok(())
}

#[tokio::test]
async fn test_login_failure_keeps_previous_session() -> anyhow::Result<()> {
    let previous = helpers::session("old@megagen.cl", [Role::Admin], "t-old");
    let mut store = helpers::store_with(previous.clone())?;
    let persisted = store.storage().get(USER_KEY)?;

    let result = store
        .login(
            &StubAuthenticator::Reject(Some("bad creds".to_owned())),
            LoginInput::new("ana@megagen.cl", "secret"),
        )
        .await;

    assert!(result.is_err());
    assert_eq!(store.storage().get(USER_KEY)?, persisted);
    assert_eq!(store.current(), Some(&previous));

    Ok(())
}

#[tokio::test]
async fn test_login_rejects_invalid_input() -> anyhow::Result<()> {
    let mut store = SessionStore::open(MemoryStorage::new())?;
    let auth = StubAuthenticator::accept("ana@megagen.cl", "vendedor", "t1");

    let err = store
        .login(&auth, LoginInput::new("not-an-email", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validate(_)));
    assert!(store.current().is_none());

    Ok(())
}

#[tokio::test]
async fn test_login_success() -> anyhow::Result<()> {
    let mut store = SessionStore::open(MemoryStorage::new())?;
    let mut events = store.subscribe();
    let auth = StubAuthenticator::accept("ana@megagen.cl", "Vendedor", "t1");

    let session = store
        .login(&auth, LoginInput::new("ana@megagen.cl", "secret"))
        .await?;

    assert_eq!(session.email, "ana@megagen.cl");
    assert_eq!(session.roles, Roles::from([Role::Vendedor]));
    assert_eq!(session.token, "t1");
    assert_eq!(store.current(), Some(&session));
    assert!(store.storage().get(USER_KEY)?.is_some());
    assert_eq!(store.storage().get(IMPERSONATOR_KEY)?, None);

    let event = events.try_recv()?;
    assert_eq!(event.key, USER_KEY);
    assert_eq!(event.kind, StorageEventKind::Set);

    let reopened = SessionStore::open(store.into_storage())?;
    assert_eq!(reopened.current(), Some(&session));

    Ok(())
}

#[tokio::test]
async fn test_logout_clears_everything() -> anyhow::Result<()> {
    let mut store = SessionStore::open(MemoryStorage::new())?;
    let auth = StubAuthenticator::accept("ana@megagen.cl", "admin", "t1");
    store
        .login(&auth, LoginInput::new("ana@megagen.cl", "secret"))
        .await?;
    store.impersonate(megagen_session::ImpersonateInput::new(
        "vendedor@megagen.cl",
        [Role::Vendedor],
    ))?;

    let target = store.logout()?;

    assert_eq!(target, megagen_session::View::Login);
    assert!(store.current().is_none());
    assert!(!store.has_role([Role::Admin]));
    assert!(store.storage().is_empty());

    Ok(())
}

#[test]
fn test_corrupt_persisted_session_is_discarded() -> anyhow::Result<()> {
    let mut storage = MemoryStorage::new();
    storage.set(USER_KEY, "{not json")?;

    let store = SessionStore::open(storage)?;

    assert!(store.current().is_none());
    assert_eq!(store.storage().get(USER_KEY)?, None);

    Ok(())
}
