//! Login, signup and logout commands.

use secrecy::SecretString;

use digital_market_storefront::error::{clear_sentry_user, set_sentry_user};
use digital_market_storefront::forms::{LoginForm, SignupForm};
use digital_market_storefront::{AppError, Location, Result, Storefront};

/// Sign in.
///
/// # Errors
///
/// Returns `AppError::Form` for blank fields and
/// `AppError::InvalidCredentials` if no account matches.
#[allow(clippy::print_stdout)]
pub async fn login(
    storefront: &Storefront,
    email: String,
    password: SecretString,
    redirect: Option<&str>,
) -> Result<()> {
    let form = LoginForm { email, password };
    form.validate()?;

    let auth = storefront.auth();
    let mut session = storefront.restore_session();
    if !session.login(&auth, &form.email, &form.password).await? {
        return Err(AppError::InvalidCredentials);
    }

    if let Some(user) = session.user() {
        set_sentry_user(&user.id, Some(user.email.as_str()));
        println!("Logged in as {}", user.name);
    }
    println!("Continue to {}", Location::after_auth(redirect));
    Ok(())
}

/// Create an account and sign in.
///
/// # Errors
///
/// Returns `AppError::Form` if the form is invalid and `AppError::Auth` if
/// the email is already registered.
#[allow(clippy::print_stdout)]
pub async fn signup(storefront: &Storefront, form: SignupForm, redirect: Option<&str>) -> Result<()> {
    form.validate()?;

    let auth = storefront.auth();
    let mut session = storefront.restore_session();
    let user = session
        .signup(&auth, &form.name, &form.email, &form.password)
        .await?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    println!("Welcome, {}!", user.name);
    println!("Continue to {}", Location::after_auth(redirect));
    Ok(())
}

/// Sign out and return to the home page.
#[allow(clippy::print_stdout)]
pub fn logout(storefront: &Storefront) {
    storefront.restore_session().logout();
    clear_sentry_user();
    println!("Logged out");
    println!("Continue to {}", Location::Home);
}

#[allow(clippy::print_stdout)]
pub fn whoami(storefront: &Storefront) {
    match storefront.restore_session().user() {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not logged in"),
    }
}
