//! Account, session and navigation commands.

use tracing::debug;

use shopfront_storefront::pages::{LoginForm, NavBar, Notifier, SignupForm, login, signup};
use shopfront_storefront::{AppContext, Route};

use super::CliError;

pub async fn signup(
    ctx: &AppContext,
    name: String,
    email: String,
    password: String,
    notifier: &dyn Notifier,
) -> Result<(), CliError> {
    let form = SignupForm {
        name,
        email,
        password,
    };
    let next = signup::submit(ctx, &form, notifier).await?;
    debug!(next = %next, "Signup complete");
    Ok(())
}

pub async fn login(
    ctx: &mut AppContext,
    email: String,
    password: String,
    notifier: &dyn Notifier,
) -> Result<(), CliError> {
    let form = LoginForm { email, password };
    let next = login::submit(ctx, &form, notifier).await?;
    debug!(next = %next, "Login complete");

    if let Some(greeting) = NavBar::for_session(ctx.session()).greeting {
        notifier.notify(&greeting);
    }
    Ok(())
}

pub fn logout(ctx: &mut AppContext) -> Result<(), CliError> {
    login::logout(ctx)?;
    Ok(())
}

#[allow(clippy::print_stdout)]
pub fn whoami(ctx: &mut AppContext) -> Result<(), CliError> {
    ctx.expire_session()?;

    let nav = NavBar::for_session(ctx.session());
    match &nav.greeting {
        Some(greeting) => println!("{greeting}"),
        None => println!("Not logged in"),
    }
    for (route, label) in &nav.links {
        println!("  {label:<16} {route}");
    }
    Ok(())
}

/// Print the page a path actually lands on.
#[allow(clippy::print_stdout)]
pub fn open(ctx: &mut AppContext, path: &str) -> Result<(), CliError> {
    let requested = Route::from_path(path);
    let landed = ctx.navigate(requested)?;
    println!("{landed}");
    Ok(())
}
