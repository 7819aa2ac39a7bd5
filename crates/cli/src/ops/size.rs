use clap::Args;

use gateway::error::GatewayError;
use gateway::pointer::Pointer;

#[derive(Args, Debug, Clone)]
pub struct Size {
    /// Remote object identifier (the pointer value)
    #[arg(long)]
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SizeError {
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

#[async_trait::async_trait]
impl crate::op::Op for Size {
    type Error = SizeError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let pointer = Pointer::new(self.id.clone())?;
        let size = ctx.gateway.file_size(&pointer).await?;
        Ok(format!("{}", size))
    }
}
