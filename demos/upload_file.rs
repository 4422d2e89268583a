use std::io;

use msggate::{Credentials, FileUploadKind, MsgGateClient};

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
    let path = required_env("MSGGATE_FILE")?;

    let content = std::fs::read(&path)?;
    let client = MsgGateClient::new(Credentials::new(api_key, api_secret)?);

    let file_id = client
        .upload_file(&content, FileUploadKind::Mms, None)
        .await?;
    println!("uploaded {path} as {}", file_id.as_str());

    Ok(())
}
