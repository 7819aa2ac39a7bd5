use std::path::PathBuf;

use clap::Args;

use gateway::recovery::{Recovery, RecoveryError};

#[derive(Args, Debug, Clone)]
pub struct Recover {
    /// Directory that receives the rebuilt pointer tree
    #[arg(long)]
    pub root: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum RecoverError {
    #[error(transparent)]
    Recovery(#[from] RecoveryError),
}

#[async_trait::async_trait]
impl crate::op::Op for Recover {
    type Error = RecoverError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let final_dir = Recovery::new(ctx.gateway.clone(), &self.root).run().await?;
        Ok(format!("Recovery completed: {}", final_dir.display()))
    }
}
