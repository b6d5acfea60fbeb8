use super::sendmail::{MailError, Mailer};

/// Verification mail carrying the 24h token link. Failure here is fatal to
/// the signup request.
pub async fn send_verification_email(
    mailer: &Mailer,
    to_email: &str,
    name: &str,
    frontend_url: &str,
    token: &str,
) -> Result<(), MailError> {
    let subject = "Verify Your Email - FlowPartner";
    let template_path = "src/mail/templates/Verification-email.html";
    let verification_link = format!("{}/#/verify-email/{}", frontend_url, token);
    let placeholders = vec![
        ("{{name}}".to_string(), name.to_string()),
        ("{{verification_link}}".to_string(), verification_link),
    ];

    mailer
        .send_email(to_email, subject, template_path, &placeholders)
        .await
}

/// Post-verification welcome mail. Best-effort, callers swallow the error.
pub async fn send_welcome_email(
    mailer: &Mailer,
    to_email: &str,
    name: &str,
    frontend_url: &str,
) -> Result<(), MailError> {
    let subject = "Welcome to FlowPartner - Email Verified!";
    let template_path = "src/mail/templates/Welcome-email.html";
    let placeholders = vec![
        ("{{name}}".to_string(), name.to_string()),
        ("{{dashboard_link}}".to_string(), frontend_url.to_string()),
    ];

    mailer
        .send_email(to_email, subject, template_path, &placeholders)
        .await
}
