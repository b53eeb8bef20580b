mod helpers;

use megagen_crm::AppError;
use megagen_quote::Stage;
use megagen_session::{
    DashboardKind, Error, LoginInput, MemoryStorage, Role, SessionStore, Storage, USER_KEY,
};

#[tokio::test]
async fn test_login_through_the_api_persists_the_session() -> anyhow::Result<()> {
    let api = helpers::client().await?;
    let mut store = SessionStore::open(MemoryStorage::new())?;

    let session = store
        .login(&api, LoginInput::new("ana@megagen.cl", helpers::PASSWORD))
        .await?;

    assert_eq!(session.token, helpers::TOKEN);
    assert_eq!(
        session.roles.iter().copied().collect::<Vec<_>>(),
        vec![Role::Supervisor, Role::Vendedor]
    );
    assert!(store.storage().get(USER_KEY)?.is_some());

    Ok(())
}

#[tokio::test]
async fn test_refused_login_carries_the_server_message() -> anyhow::Result<()> {
    let api = helpers::client().await?;
    let mut store = SessionStore::open(MemoryStorage::new())?;

    let result = store
        .login(&api, LoginInput::new("ana@megagen.cl", "wrong"))
        .await;

    match result {
        Err(Error::Authentication(message)) => assert_eq!(message, "bad creds"),
        other => panic!("expected authentication error, got {other:?}"),
    }
    assert!(store.current().is_none());
    assert!(store.storage().get(USER_KEY)?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_unreachable_api_is_an_authentication_failure() -> anyhow::Result<()> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    let api = megagen_crm::api::ApiClient::new(&format!("http://{addr}"))?;
    let mut store = SessionStore::open(MemoryStorage::new())?;

    let result = store
        .login(&api, LoginInput::new("ana@megagen.cl", helpers::PASSWORD))
        .await;

    assert!(matches!(result, Err(Error::Authentication(_))));
    assert!(store.current().is_none());

    Ok(())
}

#[tokio::test]
async fn test_quotes_are_read_with_the_bearer_token() -> anyhow::Result<()> {
    let api = helpers::client().await?;

    let quotes = api.quotes(&helpers::session([Role::Vendedor])).await?;

    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].code, "COT-309");
    assert_eq!(quotes[0].stage, Stage::Despacho);
    assert_eq!(quotes[0].history.len(), 1);
    assert_eq!(quotes[1].stage, Stage::CotizacionConfirmada);
    assert!(quotes[1].history.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_wrong_token_is_a_data_fetch_error() -> anyhow::Result<()> {
    let api = helpers::client().await?;
    let mut session = helpers::session([Role::Vendedor]);
    session.token = "expired".to_owned();

    match api.quotes(&session).await {
        Err(AppError::DataFetch {
            resource,
            status,
            message,
        }) => {
            assert_eq!(resource, "quotes");
            assert_eq!(status, 401);
            assert_eq!(message, "missing token");
        }
        other => panic!("expected data fetch error, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn test_server_error_maps_to_a_refreshable_banner() -> anyhow::Result<()> {
    let api = helpers::client().await?;

    let error = api
        .clients(&helpers::session([Role::Vendedor]))
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("clients should fail"))?;

    assert!(matches!(
        error,
        AppError::DataFetch { status: 500, ref message, .. } if message == "boom"
    ));
    assert_eq!(
        error.user_message(),
        "Could not load clients. Refresh to try again."
    );

    Ok(())
}

#[tokio::test]
async fn test_dashboard_follows_the_role_set() -> anyhow::Result<()> {
    let api = helpers::client().await?;
    let session = helpers::session([Role::Superadmin]);

    let kind = DashboardKind::for_roles(&session.roles);
    assert_eq!(kind, Some(DashboardKind::Admin));

    let dashboard = api.dashboard(&session, DashboardKind::Admin).await?;
    assert_eq!(dashboard["ready"], 3);

    Ok(())
}

#[tokio::test]
async fn test_visits_are_listed() -> anyhow::Result<()> {
    let api = helpers::client().await?;

    let visits = api.visits(&helpers::session([Role::Vendedor])).await?;

    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0]["client"], "Centro Médico Norte");

    Ok(())
}
