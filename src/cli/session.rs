use megagen_crm::{AppError, Config};
use megagen_session::{ImpersonateInput, LoginInput, Role};

pub async fn login(config: &Config, email: String, password: String) -> anyhow::Result<()> {
    let mut store = super::open_store(config)?;
    let api = super::api(config)?;

    let session = store
        .login(&api, LoginInput::new(email, password))
        .await
        .map_err(AppError::from)?;

    println!(
        "Signed in as {} ({})",
        session.email,
        super::roles_label(&session)
    );

    Ok(())
}

pub fn logout(config: &Config) -> anyhow::Result<()> {
    let mut store = super::open_store(config)?;
    let target = store.logout()?;

    println!("Signed out. Continue at {}", target.path());

    Ok(())
}

pub fn whoami(config: &Config) -> anyhow::Result<()> {
    let store = super::open_store(config)?;

    let Some(session) = store.current() else {
        println!("Not signed in");
        return Ok(());
    };

    println!("{} ({})", session.email, super::roles_label(session));
    if let Some(real) = &session.impersonator {
        println!("Viewing as this user on behalf of {}", real.email);
    }

    let views = store
        .allowed_views()
        .iter()
        .map(|view| view.path())
        .collect::<Vec<_>>()
        .join(" ");
    println!("Views: {views}");

    Ok(())
}

pub fn impersonate(
    config: &Config,
    email: String,
    roles: Vec<Role>,
    token: Option<String>,
) -> anyhow::Result<()> {
    let mut store = super::open_store(config)?;

    if store.current().is_none() {
        return Err(AppError::Forbidden("not signed in".to_owned()).into());
    }

    if !store.has_role([Role::Admin]) {
        return Err(AppError::Forbidden("impersonation requires the admin role".to_owned()).into());
    }

    let mut input = ImpersonateInput::new(email, roles);
    input.token = token;
    store.impersonate(input)?;

    if let Some(session) = store.current() {
        println!(
            "Now viewing as {} ({})",
            session.email,
            super::roles_label(session)
        );
    }

    Ok(())
}

pub fn exit_impersonation(config: &Config) -> anyhow::Result<()> {
    let mut store = super::open_store(config)?;

    if !store.is_impersonating() {
        println!("Not impersonating anyone");
        return Ok(());
    }

    store.exit_impersonation()?;

    if let Some(session) = store.current() {
        println!("Back to {}", session.email);
    }

    Ok(())
}
