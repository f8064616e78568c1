//! Signup and login against the seeded account store.

#![allow(clippy::unwrap_used)]

use digital_market_integration_tests::{DEMO_EMAIL, DEMO_PASSWORD, TestContext, secret};
use digital_market_storefront::services::AuthError;
use digital_market_storefront::{AppError, Location};

#[tokio::test]
async fn test_demo_login_example() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.storefront.auth();

    let user = auth.login(DEMO_EMAIL, &secret(DEMO_PASSWORD)).await.unwrap();
    assert_eq!(user.unwrap().name, "Demo User");

    let none = auth.login(DEMO_EMAIL, &secret("wrong")).await.unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn test_failed_login_leaves_session_unset() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.storefront.auth();
    let mut session = ctx.storefront.restore_session();

    assert!(!session.login(&auth, "nobody@example.com", &secret(DEMO_PASSWORD)).await.unwrap());
    assert!(!session.is_authenticated());
    assert!(!ctx.slot_path("currentUser").exists());
}

#[tokio::test]
async fn test_signup_conflict_message() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.storefront.auth();
    let mut session = ctx.storefront.restore_session();

    let err = session
        .signup(&auth, "Someone", DEMO_EMAIL, &secret("pw"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
    assert_eq!(
        AppError::from(err).user_message(),
        "An account with this email already exists"
    );
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_signup_then_login_with_new_account() {
    let ctx = TestContext::new().await.unwrap();
    let auth = ctx.storefront.auth();
    let mut session = ctx.storefront.restore_session();

    let user = session
        .signup(&auth, "Grace", "grace@example.com", &secret("cobol"))
        .await
        .unwrap()
        .clone();
    assert!(user.is_scrubbed());
    assert_eq!(Location::after_auth(Some("checkout")), Location::Checkout);

    session.logout();
    assert!(
        session
            .login(&auth, "grace@example.com", &secret("cobol"))
            .await
            .unwrap()
    );
    assert_eq!(session.user(), Some(&user));
}

#[tokio::test]
async fn test_signups_are_forgotten_on_restart() {
    let ctx = TestContext::new().await.unwrap();
    ctx.storefront
        .auth()
        .signup("Grace", "grace@example.com", &secret("cobol"))
        .await
        .unwrap();

    let ctx = ctx.restart().await.unwrap();
    let found = ctx
        .storefront
        .auth()
        .login("grace@example.com", &secret("cobol"))
        .await
        .unwrap();
    assert!(found.is_none());
}
