use coursehub_config::EmailConfig;
use coursehub_core::AppError;
use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, instrument};

/// Sends course update e-mails over SMTP.
///
/// With `SMTP_ENABLED=false` nothing leaves the process; each delivery is
/// logged instead.
#[derive(Debug, Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(self))]
    pub async fn send_course_updated(
        &self,
        to_email: &str,
        course_title: &str,
        course_link: &str,
    ) -> Result<(), AppError> {
        let subject = format!("Course updated: {}", course_title);
        let text_body = format!(
            "Hello,\n\n\
             The course \"{}\" you are subscribed to has been updated.\n\n\
             Open it here:\n\
             {}\n\n\
             You receive this e-mail because you subscribed to the course.\n\
             Toggle the subscription to stop these notifications.\n\n\
             Coursehub",
            course_title, course_link
        );
        let html_body = course_updated_template(course_title, course_link);

        if !self.config.enabled {
            info!(
                to = %to_email,
                subject = %subject,
                "SMTP disabled, skipping course update e-mail"
            );
            return Ok(());
        }

        self.send_email(to_email, &subject, &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal_error(format!("Invalid from email: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal_error(format!("Invalid to email: {}", e)))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal_error(format!("Failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal_error(format!("Failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal_error(format!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal_error(format!("Failed to send email: {}", e)))?;

        Ok(())
    }

    pub fn course_link(&self, course_id: impl std::fmt::Display) -> String {
        format!("{}/courses/{}", self.config.frontend_url, course_id)
    }
}

fn course_updated_template(course_title: &str, course_link: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Course updated</title>
</head>
<body style="margin: 0; padding: 20px; font-family: Arial, sans-serif; background-color: #f4f4f4;">
    <table width="600" cellpadding="0" cellspacing="0" style="margin: 0 auto; background-color: #ffffff; border-radius: 8px;">
        <tr>
            <td style="background-color: #0F766E; padding: 24px; text-align: center;">
                <h1 style="margin: 0; color: #ffffff; font-size: 24px;">Coursehub</h1>
            </td>
        </tr>
        <tr>
            <td style="padding: 32px;">
                <p style="color: #333333; font-size: 16px;">The course <strong>{title}</strong> you are subscribed to has been updated.</p>
                <p style="text-align: center; margin: 32px 0;">
                    <a href="{link}" style="background-color: #0F766E; color: #ffffff; padding: 12px 28px; text-decoration: none; border-radius: 5px;">Open course</a>
                </p>
                <p style="color: #777777; font-size: 13px;">Toggle your subscription to stop these notifications.</p>
            </td>
        </tr>
    </table>
</body>
</html>"#,
        title = course_title,
        link = course_link
    )
}
