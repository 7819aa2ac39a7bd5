use clap::Args;

use gateway::error::GatewayError;

#[derive(Args, Debug, Clone)]
pub struct Health;

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

#[async_trait::async_trait]
impl crate::op::Op for Health {
    type Error = HealthError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let statuses = ctx.gateway.health().await?;
        if statuses.is_empty() {
            return Ok("No storage nodes reported".to_string());
        }

        let mut lines = Vec::new();
        for node in statuses {
            lines.push(format!(
                "{:<24} {:<12} {}",
                node.host, node.status, node.region
            ));
        }
        Ok(lines.join("\n"))
    }
}
