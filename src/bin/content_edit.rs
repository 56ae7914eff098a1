//! Editor CLI - applies contact/section edits through the save queue
//!
//! Drives the same load -> edit -> flush path the inline editor uses, which
//! makes it handy for smoke-testing a deployment:
//!
//!   cargo run --bin content-edit -- --token secret --contact-phone "+7 900 000-00-00"

use clap::Parser;
use content_service::io::api_client::{ApiClientConfig, HttpContentApi};
use content_service::services::save_queue::{QueueStatus, SaveQueue};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "content-edit")]
#[command(about = "Edit conference site content through the content API")]
struct Args {
    /// Content API endpoint
    #[arg(long, default_value = "http://localhost:8080/api/content")]
    endpoint: String,

    /// Admin bearer token
    #[arg(long)]
    token: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    /// New contact phone
    #[arg(long)]
    contact_phone: Option<String>,

    /// New contact email
    #[arg(long)]
    contact_email: Option<String>,

    /// New contact website
    #[arg(long)]
    contact_website: Option<String>,

    /// New registration notifications title
    #[arg(long)]
    notifications_title: Option<String>,

    /// Print the current document and exit without saving
    #[arg(long)]
    show: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let api = HttpContentApi::new(ApiClientConfig {
        endpoint: args.endpoint.clone(),
        token: args.token.clone(),
        timeout: Duration::from_millis(args.timeout_ms),
    })?;
    let queue = SaveQueue::new(Arc::new(api));

    queue.load().await;
    if queue.status() == QueueStatus::Error {
        return Err(format!(
            "failed to load content: {}",
            queue.last_error().unwrap_or_default()
        )
        .into());
    }

    if args.show {
        println!("{}", serde_json::to_string_pretty(&queue.content())?);
        return Ok(());
    }

    queue.set_editing(true);

    if let Some(phone) = args.contact_phone {
        queue
            .apply_edit(|content| {
                let mut next = content.clone();
                next.contact_section.phone = phone;
                next
            })
            .await;
    }
    if let Some(email) = args.contact_email {
        queue
            .apply_edit(|content| {
                let mut next = content.clone();
                next.contact_section.email = email;
                next
            })
            .await;
    }
    if let Some(website) = args.contact_website {
        queue
            .apply_edit(|content| {
                let mut next = content.clone();
                next.contact_section.website = website;
                next
            })
            .await;
    }
    if let Some(title) = args.notifications_title {
        queue
            .apply_edit(|content| {
                let mut next = content.clone();
                next.registration_notifications.title = title;
                next
            })
            .await;
    }

    match queue.status() {
        QueueStatus::Error => Err(format!(
            "save failed: {}",
            queue.last_error().unwrap_or_default()
        )
        .into()),
        status => {
            info!(status = %status.as_str(), "edits_applied");
            println!("contact: {:?}", queue.content().contact_section);
            Ok(())
        }
    }
}
