use std::io;

use msggate::{Credentials, ListMessagesFilter, MsgGateClient};

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

    let client = MsgGateClient::new(Credentials::new(api_key, api_secret)?);
    let filter = ListMessagesFilter {
        limit: Some(10),
        ..Default::default()
    };

    let result = client.list_messages(filter).await?;
    for (id, record) in &result.messages {
        println!(
            "{}: to {} status {:?} ({:?})",
            id.as_str(),
            record.to,
            record.status_code,
            record.date_received
        );
    }
    if let Some(next_key) = result.next_key {
        println!("more available after {next_key}");
    }

    Ok(())
}
