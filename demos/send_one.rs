use std::io;

use msggate::{Credentials, Message, MessageText, MsgGateClient, RawPhoneNumber};

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

    let client = MsgGateClient::new(Credentials::new(api_key, api_secret)?);
    let message = Message::new(
        RawPhoneNumber::new(to)?,
        RawPhoneNumber::new(from)?,
        MessageText::new("Hello from the msggate example.")?,
    );

    let result = client.send_one(message).await?;
    println!(
        "message id: {}, status: {:?} {:?}",
        result.message_id.as_str(),
        result.status_code,
        result.status_message
    );

    Ok(())
}
