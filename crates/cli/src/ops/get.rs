use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use futures::StreamExt;

use gateway::error::GatewayError;

#[derive(Args, Debug, Clone)]
pub struct Get {
    /// Local pointer file to resolve
    #[arg(long)]
    pub path: PathBuf,

    /// Write the object here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetError {
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("download stream failed: {0}")]
    Stream(#[from] reqwest::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Get {
    type Error = GetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let pointer_file = File::open(&self.path)?;
        let object = ctx.gateway.get(pointer_file).await?;

        let mut sink: Box<dyn Write + Send> = match &self.output {
            Some(path) => Box::new(File::create(path)?),
            None => Box::new(std::io::stdout()),
        };

        let mut written = 0u64;
        let mut stream = object.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            sink.write_all(&chunk)?;
            written += chunk.len() as u64;
        }
        sink.flush()?;

        Ok(match &self.output {
            Some(path) => format!("Wrote {} bytes to {}", written, path.display()),
            None => String::new(),
        })
    }
}
