use std::io;

use msggate::{Credentials, Message, MessageText, MsgGateClient, RawPhoneNumber, SendRequest};

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = required_env("MSGGATE_API_KEY")?;
    let api_secret = required_env("MSGGATE_API_SECRET")?;
    let to = required_env("MSGGATE_TO")?;
    let from = required_env("MSGGATE_FROM")?;
    let text = std::env::var("MSGGATE_TEXT")
        .unwrap_or_else(|_| "Hello from the msggate example.".to_owned());

    let client = MsgGateClient::new(Credentials::new(api_key, api_secret)?);
    let message = Message::new(
        RawPhoneNumber::new(to)?,
        RawPhoneNumber::new(from)?,
        MessageText::new(text)?,
    );

    let result = client.send(SendRequest::new(vec![message])?).await?;
    println!(
        "group: {:?}, total: {}, registered: {}, failed: {}",
        result.group_info.group_id,
        result.group_info.count.total,
        result.group_info.count.registered_success,
        result.group_info.count.registered_failed,
    );
    for rejected in &result.failed_messages {
        println!(
            "rejected {}: {} {}",
            rejected.to, rejected.error_code, rejected.error_message
        );
    }

    Ok(())
}
