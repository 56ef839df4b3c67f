use anyhow::Result;

use crate::{dashboard, AppState};

pub async fn login(state: &AppState, email: &str) -> Result<()> {
    let user = state.db.find_or_create_user(email).await?;
    let session = state.auth.sign_in(user)?;
    println!("Signed in as {}", session.user.email);
    Ok(())
}

pub fn logout(state: &AppState) -> Result<()> {
    if !state.auth.is_authenticated() {
        println!("Not signed in");
        return Ok(());
    }
    dashboard::sign_out(&state.auth, &state.events)?;
    println!("Signed out");
    Ok(())
}

pub async fn status(state: &AppState) -> Result<()> {
    if let Some(path) = state.db.path() {
        println!("Database: {}", path.display());
    }

    let Some(session) = state.auth.current_session() else {
        println!("Not signed in. Run `handwash-monitor login <email>`.");
        return Ok(());
    };

    println!(
        "Signed in as {} since {}",
        session.user.email,
        session.signed_in_at.format("%Y-%m-%d %H:%M UTC")
    );
    if state.db.get_user(&session.user.id).await?.is_none() {
        log::warn!("Identity {} has no account in this database", session.user.id);
        println!("This account is missing from the database; run `login` again.");
    }
    Ok(())
}
