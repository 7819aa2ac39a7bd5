use std::path::PathBuf;

use clap::Args;

use gateway::error::GatewayError;

#[derive(Args, Debug, Clone)]
pub struct Shard {
    /// Local file whose bytes move to the remote
    #[arg(long)]
    pub path: PathBuf,

    /// Object name recorded remotely (defaults to the file name)
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ShardError {
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
    #[error("cannot derive an object name from {0}")]
    NoObjectName(String),
}

#[async_trait::async_trait]
impl crate::op::Op for Shard {
    type Error = ShardError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => self
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .map(String::from)
                .ok_or_else(|| ShardError::NoObjectName(self.path.display().to_string()))?,
        };

        let pointer = ctx.gateway.shard(&self.path, &name).await?;
        Ok(format!("Sharded {} -> {}", self.path.display(), pointer))
    }
}
