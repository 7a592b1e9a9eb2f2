//! Transactional email delivery.
//!
//! Uses SMTP via lettre with Askama templates, plain text and HTML in one
//! multipart message. SMTP settings live in the settings store and can be
//! changed by an admin at runtime, so the transport is built per send
//! rather than held open.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use thiserror::Error;

use crate::models::{ContactMessage, Order, SmtpSettings};

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// One rendered line of an order email.
struct LineItem {
    name: String,
    label: String,
    quantity: u32,
    line_total: String,
}

#[derive(Template)]
#[template(path = "email/order_confirmed.html")]
struct OrderConfirmedHtml<'a> {
    name: &'a str,
    order_number: &'a str,
    items: &'a [LineItem],
    subtotal: String,
    discount: String,
    shipping: String,
    total: String,
}

#[derive(Template)]
#[template(path = "email/order_confirmed.txt")]
struct OrderConfirmedText<'a> {
    name: &'a str,
    order_number: &'a str,
    items: &'a [LineItem],
    subtotal: String,
    discount: String,
    shipping: String,
    total: String,
}

#[derive(Template)]
#[template(path = "email/order_status.html")]
struct OrderStatusHtml<'a> {
    name: &'a str,
    order_number: &'a str,
    status: String,
}

#[derive(Template)]
#[template(path = "email/order_status.txt")]
struct OrderStatusText<'a> {
    name: &'a str,
    order_number: &'a str,
    status: String,
}

#[derive(Template)]
#[template(path = "email/contact_notification.html")]
struct ContactNotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "email/contact_notification.txt")]
struct ContactNotificationText<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "email/smtp_test.html")]
struct SmtpTestHtml<'a> {
    server: &'a str,
}

#[derive(Template)]
#[template(path = "email/smtp_test.txt")]
struct SmtpTestText<'a> {
    server: &'a str,
}

/// Sends transactional email over the currently stored SMTP settings.
#[derive(Clone, Default)]
pub struct Mailer;

impl Mailer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Send the order-confirmation email after a verified payment.
    ///
    /// # Errors
    ///
    /// Returns error if the message fails to render, build, or send.
    pub async fn send_order_confirmation(
        &self,
        smtp: &SmtpSettings,
        order: &Order,
    ) -> Result<(), EmailError> {
        let items: Vec<LineItem> = order
            .items
            .iter()
            .map(|item| LineItem {
                name: item.product_name.clone(),
                label: item.variant_label.clone(),
                quantity: item.quantity,
                line_total: item.line_total.to_string(),
            })
            .collect();

        let html = OrderConfirmedHtml {
            name: &order.address.full_name,
            order_number: &order.order_number,
            items: &items,
            subtotal: order.subtotal.to_string(),
            discount: order.discount.to_string(),
            shipping: order.shipping.to_string(),
            total: order.total.to_string(),
        }
        .render()?;
        let text = OrderConfirmedText {
            name: &order.address.full_name,
            order_number: &order.order_number,
            items: &items,
            subtotal: order.subtotal.to_string(),
            discount: order.discount.to_string(),
            shipping: order.shipping.to_string(),
            total: order.total.to_string(),
        }
        .render()?;

        let subject = format!("Order {} confirmed", order.order_number);
        self.send_multipart(smtp, &order.user_email, &subject, &text, &html)
            .await
    }

    /// Send a status-change notification to the order's customer.
    ///
    /// # Errors
    ///
    /// Returns error if the message fails to render, build, or send.
    pub async fn send_order_status(
        &self,
        smtp: &SmtpSettings,
        order: &Order,
    ) -> Result<(), EmailError> {
        let html = OrderStatusHtml {
            name: &order.address.full_name,
            order_number: &order.order_number,
            status: order.status.to_string(),
        }
        .render()?;
        let text = OrderStatusText {
            name: &order.address.full_name,
            order_number: &order.order_number,
            status: order.status.to_string(),
        }
        .render()?;

        let subject = format!("Order {} is now {}", order.order_number, order.status);
        self.send_multipart(smtp, &order.user_email, &subject, &text, &html)
            .await
    }

    /// Forward a contact-form submission to the store inbox.
    ///
    /// # Errors
    ///
    /// Returns error if the message fails to render, build, or send.
    pub async fn send_contact_notification(
        &self,
        smtp: &SmtpSettings,
        to: &str,
        message: &ContactMessage,
    ) -> Result<(), EmailError> {
        let phone = message.phone.as_deref().unwrap_or("not provided");
        let html = ContactNotificationHtml {
            name: &message.name,
            email: &message.email,
            phone,
            message: &message.message,
        }
        .render()?;
        let text = ContactNotificationText {
            name: &message.name,
            email: &message.email,
            phone,
            message: &message.message,
        }
        .render()?;

        let subject = format!("New contact message from {}", message.name);
        self.send_multipart(smtp, to, &subject, &text, &html).await
    }

    /// Send a test email so an admin can verify stored SMTP settings.
    ///
    /// # Errors
    ///
    /// Returns error if the message fails to render, build, or send.
    pub async fn send_test(&self, smtp: &SmtpSettings, to: &str) -> Result<(), EmailError> {
        let html = SmtpTestHtml {
            server: &smtp.server,
        }
        .render()?;
        let text = SmtpTestText {
            server: &smtp.server,
        }
        .render()?;
        self.send_multipart(smtp, to, "SMTP test", &text, &html)
            .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart(
        &self,
        smtp: &SmtpSettings,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let credentials = Credentials::new(smtp.username.clone(), smtp.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.server)?
            .port(smtp.port)
            .credentials(credentials)
            .build();

        let email = Message::builder()
            .from(
                smtp.from_email
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(smtp.from_email.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        transport.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}
