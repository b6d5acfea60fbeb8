use std::fs;

use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),
    #[error("email template not found: {0}")]
    TemplateNotFound(String),
    #[error(transparent)]
    Address(#[from] lettre::address::AddressError),
    #[error(transparent)]
    Build(#[from] lettre::error::Error),
    #[error(transparent)]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// SMTP mail transport, constructed once at startup and shared through
/// AppState rather than re-created per send.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl Mailer {
    pub fn new(config: &Config) -> Result<Self, MailError> {
        // Port 465 is implicit TLS, everything else STARTTLS.
        let mut builder = if config.smtp_port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };

        builder = builder.port(config.smtp_port);

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        Ok(Mailer {
            transport: builder.build(),
            from: config.smtp_from.clone(),
        })
    }

    pub async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        template_path: &str,
        placeholders: &[(String, String)],
    ) -> Result<(), MailError> {
        if to_email.is_empty() || !to_email.contains('@') {
            return Err(MailError::InvalidAddress(to_email.to_string()));
        }

        let html_body = render_template(template_path, placeholders)?;

        let message = Message::builder()
            .from(self.from.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)?;

        self.transport.send(message).await?;

        tracing::info!("email sent to {}", to_email);
        Ok(())
    }
}

fn render_template(
    template_path: &str,
    placeholders: &[(String, String)],
) -> Result<String, MailError> {
    let mut html_template = match fs::read_to_string(template_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::error!("failed to read email template {}: {}", template_path, e);
            return Err(MailError::TemplateNotFound(template_path.to_string()));
        }
    };

    for (key, value) in placeholders {
        html_template = html_template.replace(key, value);
    }

    Ok(html_template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_every_placeholder() {
        let rendered = render_template(
            "src/mail/templates/Verification-email.html",
            &[
                ("{{name}}".to_string(), "Ada".to_string()),
                (
                    "{{verification_link}}".to_string(),
                    "http://localhost/#/verify-email/abc".to_string(),
                ),
            ],
        )
        .unwrap();

        assert!(rendered.contains("Ada"));
        assert!(rendered.contains("http://localhost/#/verify-email/abc"));
        assert!(!rendered.contains("{{name}}"));
        assert!(!rendered.contains("{{verification_link}}"));
    }

    #[test]
    fn missing_template_is_an_error() {
        let result = render_template("src/mail/templates/does-not-exist.html", &[]);
        assert!(result.is_err());
    }
}
