use megagen_session::{DashboardKind, MemoryStorage, Role, Roles, SessionStore, View};

mod helpers;

#[test]
fn test_views_without_session() -> anyhow::Result<()> {
    let store = SessionStore::open(MemoryStorage::new())?;

    assert!(store.can_view(View::Login));
    assert!(!store.can_view(View::Dashboard));
    assert!(store.allowed_views().is_empty());

    Ok(())
}

#[test]
fn test_vendedor_views() -> anyhow::Result<()> {
    let store = helpers::store_with(helpers::session("v@megagen.cl", [Role::Vendedor], "t"))?;

    assert_eq!(
        store.allowed_views(),
        vec![
            View::Dashboard,
            View::Leads,
            View::Clients,
            View::Quotes,
            View::Calendar,
            View::Terrain,
        ]
    );
    assert!(!store.can_view(View::Users));
    assert!(!store.can_view(View::Bodega));

    Ok(())
}

#[test]
fn test_bodeguero_views() -> anyhow::Result<()> {
    let store = helpers::store_with(helpers::session("b@megagen.cl", [Role::Bodeguero], "t"))?;

    assert_eq!(
        store.allowed_views(),
        vec![View::Dashboard, View::Quotes, View::Bodega]
    );

    Ok(())
}

#[test]
fn test_superadmin_sees_everything() -> anyhow::Result<()> {
    let store = helpers::store_with(helpers::session("r@megagen.cl", [Role::Superadmin], "t"))?;

    assert_eq!(store.allowed_views().len(), 8);
    assert_eq!(View::Users.path(), "/users");

    Ok(())
}

#[test]
fn test_dashboard_kind_for_roles() {
    assert_eq!(
        DashboardKind::for_roles(&Roles::from([Role::Superadmin])),
        Some(DashboardKind::Admin)
    );
    assert_eq!(
        DashboardKind::for_roles(&Roles::from([Role::Supervisor, Role::Vendedor])),
        Some(DashboardKind::Supervisor)
    );
    assert_eq!(
        DashboardKind::for_roles(&Roles::from([Role::Bodeguero])),
        Some(DashboardKind::Bodega)
    );
    assert_eq!(DashboardKind::for_roles(&Roles::from([Role::Vendedor])), None);
    assert_eq!(DashboardKind::Bodega.path(), "/dashboard/bodega");
}
