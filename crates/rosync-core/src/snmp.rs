use rosync_api::Gateway;
use tracing::info;

use crate::command;
use crate::error::CoreError;

/// Turn on the SNMP agent with v2 traps.
pub async fn enable_snmp<G: Gateway>(gateway: &G) -> Result<(), CoreError> {
    gateway.execute(&command::enable_snmp()).await?;
    info!("snmp enabled");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rosync_api::Error;

    use super::*;
    use crate::testing::ScriptedGateway;

    #[tokio::test]
    async fn enable_sends_single_set() {
        let gw = ScriptedGateway::new();
        enable_snmp(&gw).await.unwrap();

        let sent = gw.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_string(), "/snmp/set enabled=yes trap-version=2");
    }

    #[tokio::test]
    async fn rejection_is_returned() {
        let gw = ScriptedGateway::new().with_reply(
            command::SNMP_SET,
            Err(Error::Rejected {
                command: command::SNMP_SET.into(),
                status: 400,
                message: "Bad Request".into(),
                detail: None,
            }),
        );
        assert!(matches!(
            enable_snmp(&gw).await,
            Err(CoreError::Rejected { .. })
        ));
    }
}
