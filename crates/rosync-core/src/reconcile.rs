// ── Reconciliation engine ──
//
// Brings `caller-id` and `remote-address` on each PPP secret in line with
// what the router observes for that subscriber's live session.
//
// A pass fetches both tables, joins them by name with a nested scan in
// router order, and issues one `set` per matching pair. Nothing is
// deduplicated: two sessions sharing a secret's name produce two writes,
// and the router keeps the last one. The tables can change between the
// fetch and the writes; the pass is best-effort, not transactional.

use rosync_api::Gateway;
use tracing::{debug, info, warn};

use crate::command;
use crate::error::CoreError;
use crate::fetch::Fetcher;
use crate::model::{Annotation, CommandFailure, PartialOutcome, SyncAttribute, SyncReport};

/// Runs reconciliation passes against one gateway.
pub struct Reconciler<'g, G> {
    gateway: &'g G,
}

impl<'g, G: Gateway> Reconciler<'g, G> {
    pub fn new(gateway: &'g G) -> Self {
        Self { gateway }
    }

    /// Copy each live session's `caller-id` onto the secret with the same name.
    pub async fn sync_caller_id(&self) -> Result<SyncReport, CoreError> {
        self.sync(SyncAttribute::CallerId).await
    }

    /// Copy each live session's `address` onto the secret's `remote-address`.
    pub async fn sync_remote_address(&self) -> Result<SyncReport, CoreError> {
        self.sync(SyncAttribute::RemoteAddress).await
    }

    /// Run both passes, caller-id first.
    ///
    /// If the second pass fails, the error carries the first pass's report
    /// in its [`PartialOutcome`].
    pub async fn sync_all(&self) -> Result<Vec<SyncReport>, CoreError> {
        let mut reports = Vec::with_capacity(2);
        for attribute in [SyncAttribute::CallerId, SyncAttribute::RemoteAddress] {
            match self.sync(attribute).await {
                Ok(report) => reports.push(report),
                Err(err) if reports.is_empty() => return Err(err),
                Err(err) => return Err(carry_completed(reports, err)),
            }
        }
        Ok(reports)
    }

    /// One reconciliation pass for `attribute`.
    ///
    /// A failed fetch aborts the pass before any write. A failed write is
    /// recorded and the scan moves on to the next pair, unless the error is
    /// fatal to the gateway (refused credentials, router unreachable). Then
    /// the pass stops with [`CoreError::Interrupted`] holding the report so far.
    pub async fn sync(&self, attribute: SyncAttribute) -> Result<SyncReport, CoreError> {
        let fetcher = Fetcher::new(self.gateway);
        let secrets = fetcher.secrets(&Annotation::default()).await?;
        let active = fetcher.active_connections().await?;

        let mut report = SyncReport::new(attribute, secrets.len(), active.len());

        for secret in &secrets {
            for connection in active.iter().filter(|c| c.name == secret.name) {
                report.matched += 1;
                let value = attribute.observed(connection);
                let already_set = attribute.configured(secret) == value;

                let cmd = command::set_secret(&secret.name, attribute, value);
                debug!(%cmd, "updating secret");

                match self.gateway.execute(&cmd).await {
                    Ok(_) => {
                        report.updated += 1;
                        if already_set {
                            report.unchanged += 1;
                        }
                    }
                    Err(e) => {
                        warn!(
                            secret = %secret.name,
                            %attribute,
                            error = %e,
                            transient = e.is_transient(),
                            "update failed"
                        );
                        report.failures.push(CommandFailure {
                            target: secret.name.clone(),
                            command: cmd.to_string(),
                            message: e.to_string(),
                        });
                        if e.is_fatal() {
                            return Err(CoreError::interrupted(
                                PartialOutcome::Sync(vec![report]),
                                e,
                            ));
                        }
                    }
                }
            }
        }

        info!(
            %attribute,
            secrets = report.secrets,
            active = report.active,
            matched = report.matched,
            updated = report.updated,
            failed = report.failed(),
            "reconciliation pass complete"
        );
        Ok(report)
    }
}

/// Put the reports of finished passes in front of whatever `err` carries.
fn carry_completed(mut done: Vec<SyncReport>, err: CoreError) -> CoreError {
    match err {
        CoreError::Interrupted { partial, source } => {
            if let PartialOutcome::Sync(rest) = *partial {
                done.extend(rest);
            }
            CoreError::Interrupted {
                partial: Box::new(PartialOutcome::Sync(done)),
                source,
            }
        }
        other => CoreError::interrupted(PartialOutcome::Sync(done), other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use rosync_api::{Error, Record};

    use super::*;
    use crate::testing::{ScriptedGateway, record};

    fn secret(name: &str) -> Record {
        record(&[("name", name), ("caller-id", ""), ("remote-address", "")])
    }

    fn session(name: &str, caller_id: &str, address: &str) -> Record {
        record(&[("name", name), ("caller-id", caller_id), ("address", address)])
    }

    fn gateway(secrets: Vec<Record>, active: Vec<Record>) -> ScriptedGateway {
        ScriptedGateway::new()
            .with_rows(command::SECRET_PRINT, secrets)
            .with_rows(command::ACTIVE_PRINT, active)
    }

    fn words(gw: &ScriptedGateway) -> Vec<Vec<String>> {
        gw.sent_to(command::SECRET_SET)
            .iter()
            .map(rosync_api::Command::words)
            .collect()
    }

    #[tokio::test]
    async fn single_match_updates_both_attributes() {
        let gw = gateway(
            vec![secret("u1")],
            vec![session("u1", "AA:BB", "10.0.0.5")],
        );
        let reconciler = Reconciler::new(&gw);

        let caller = reconciler.sync_caller_id().await.unwrap();
        let remote = reconciler.sync_remote_address().await.unwrap();

        assert_eq!(
            words(&gw),
            vec![
                vec!["numbers=u1".to_string(), "caller-id=AA:BB".to_string()],
                vec!["numbers=u1".to_string(), "remote-address=10.0.0.5".to_string()],
            ]
        );
        assert_eq!((caller.matched, caller.updated), (1, 1));
        assert_eq!((remote.matched, remote.updated), (1, 1));
        assert!(caller.is_clean() && remote.is_clean());
    }

    #[tokio::test]
    async fn no_shared_names_issues_no_updates() {
        let gw = gateway(
            vec![secret("u1"), secret("u2")],
            vec![session("u3", "AA:BB", "10.0.0.5")],
        );

        let report = Reconciler::new(&gw).sync_caller_id().await.unwrap();

        assert!(gw.sent_to(command::SECRET_SET).is_empty());
        assert_eq!(report.matched, 0);
        assert_eq!((report.secrets, report.active), (2, 1));
    }

    #[tokio::test]
    async fn duplicate_sessions_are_not_deduplicated() {
        let gw = gateway(
            vec![secret("u1")],
            vec![
                session("u1", "AA:AA", "10.0.0.1"),
                session("u1", "BB:BB", "10.0.0.2"),
            ],
        );

        let report = Reconciler::new(&gw).sync_caller_id().await.unwrap();

        let sent = gw.sent_to(command::SECRET_SET);
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].get("caller-id"), Some("AA:AA"));
        assert_eq!(sent[1].get("caller-id"), Some("BB:BB"));
        assert_eq!(report.matched, 2);
    }

    #[tokio::test]
    async fn updates_follow_router_order_and_address_by_name() {
        let gw = gateway(
            vec![
                record(&[(".id", "*9"), ("name", "b")]),
                record(&[(".id", "*8"), ("name", "a")]),
            ],
            vec![session("a", "A", "10.0.0.1"), session("b", "B", "10.0.0.2")],
        );

        Reconciler::new(&gw).sync_caller_id().await.unwrap();

        let targets: Vec<String> = gw
            .sent_to(command::SECRET_SET)
            .iter()
            .filter_map(|c| c.get(command::TARGET).map(String::from))
            .collect();
        assert_eq!(targets, ["b", "a"]);
    }

    #[tokio::test]
    async fn rejected_update_is_recorded_and_scan_continues() {
        let gw = gateway(
            vec![secret("u1"), secret("u2")],
            vec![session("u1", "AA", "10.0.0.1"), session("u2", "BB", "10.0.0.2")],
        )
        .rejecting(command::SECRET_SET, "u1", "no such item");

        let report = Reconciler::new(&gw).sync_caller_id().await.unwrap();

        assert_eq!(gw.sent_to(command::SECRET_SET).len(), 2);
        assert_eq!(report.matched, 2);
        assert_eq!(report.updated, 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].target, "u1");
        assert_eq!(
            report.failures[0].command,
            "/ppp/secret/set numbers=u1 caller-id=AA"
        );
    }

    #[tokio::test]
    async fn fetch_failure_aborts_before_any_write() {
        let gw = ScriptedGateway::new()
            .with_rows(command::SECRET_PRINT, vec![secret("u1")])
            .with_reply(
                command::ACTIVE_PRINT,
                Err(Error::Timeout { timeout_secs: 30 }),
            );

        let err = Reconciler::new(&gw).sync_remote_address().await.unwrap_err();

        assert!(matches!(err, CoreError::Timeout { timeout_secs: 30 }));
        assert!(gw.sent_to(command::SECRET_SET).is_empty());
    }

    fn three_pairs() -> ScriptedGateway {
        gateway(
            vec![secret("u1"), secret("u2"), secret("u3")],
            vec![
                session("u1", "AA", "10.0.0.1"),
                session("u2", "BB", "10.0.0.2"),
                session("u3", "CC", "10.0.0.3"),
            ],
        )
    }

    #[tokio::test]
    async fn timed_out_update_is_recorded_and_scan_continues() {
        let gw = three_pairs()
            .with_reply(command::SECRET_SET, Ok(Vec::new()))
            .with_reply(command::SECRET_SET, Err(Error::Timeout { timeout_secs: 30 }));

        let report = Reconciler::new(&gw).sync_caller_id().await.unwrap();

        assert_eq!(gw.sent_to(command::SECRET_SET).len(), 3);
        assert_eq!((report.matched, report.updated), (3, 2));
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures[0].target, "u2");
        assert!(report.failures[0].message.contains("timed out"));
    }

    #[tokio::test]
    async fn fatal_failure_stops_pass_and_keeps_partial_report() {
        let gw = three_pairs()
            .with_reply(command::SECRET_SET, Ok(Vec::new()))
            .with_reply(
                command::SECRET_SET,
                Err(Error::Authentication {
                    message: "session revoked".into(),
                }),
            );

        let err = Reconciler::new(&gw).sync_caller_id().await.unwrap_err();

        assert_eq!(gw.sent_to(command::SECRET_SET).len(), 2);
        let CoreError::Interrupted { partial, source } = err else {
            panic!("expected an interrupted pass");
        };
        assert!(matches!(*source, CoreError::AuthenticationFailed { .. }));
        let PartialOutcome::Sync(reports) = *partial else {
            panic!("expected sync outcome");
        };
        assert_eq!(reports.len(), 1);
        assert_eq!((reports[0].matched, reports[0].updated), (2, 1));
        assert_eq!(reports[0].failures[0].target, "u2");
    }

    #[tokio::test]
    async fn second_pass_failure_keeps_first_pass_report() {
        let gw = gateway(
            vec![secret("u1")],
            vec![session("u1", "AA:BB", "10.0.0.5")],
        )
        .with_reply(command::ACTIVE_PRINT, Ok(vec![session("u1", "AA:BB", "10.0.0.5")]))
        .with_reply(command::ACTIVE_PRINT, Err(Error::Timeout { timeout_secs: 30 }));

        let err = Reconciler::new(&gw).sync_all().await.unwrap_err();

        let Some(PartialOutcome::Sync(reports)) = err.partial() else {
            panic!("expected sync outcome, got {err:?}");
        };
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].attribute, SyncAttribute::CallerId);
        assert_eq!(reports[0].updated, 1);
        assert!(
            matches!(&err, CoreError::Interrupted { source, .. } if matches!(**source, CoreError::Timeout { .. }))
        );
    }

    #[tokio::test]
    async fn values_already_in_sync_are_still_written() {
        let gw = gateway(
            vec![record(&[("name", "u1"), ("caller-id", "AA:BB")])],
            vec![session("u1", "AA:BB", "10.0.0.5")],
        );

        let report = Reconciler::new(&gw).sync_caller_id().await.unwrap();

        assert_eq!(report.unchanged, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(gw.sent_to(command::SECRET_SET).len(), 1);
    }

    #[tokio::test]
    async fn rejected_write_of_equal_value_is_not_unchanged() {
        let gw = gateway(
            vec![record(&[("name", "u1"), ("caller-id", "AA:BB")])],
            vec![session("u1", "AA:BB", "10.0.0.5")],
        )
        .rejecting(command::SECRET_SET, "u1", "no such item");

        let report = Reconciler::new(&gw).sync_caller_id().await.unwrap();

        assert_eq!(report.unchanged, 0);
        assert_eq!(report.updated, 0);
        assert_eq!(report.failed(), 1);
    }

    #[tokio::test]
    async fn sync_all_runs_both_passes_in_order() {
        let gw = gateway(
            vec![secret("u1")],
            vec![session("u1", "AA:BB", "10.0.0.5")],
        );

        let reports = Reconciler::new(&gw).sync_all().await.unwrap();

        let attributes: Vec<SyncAttribute> = reports.iter().map(|r| r.attribute).collect();
        assert_eq!(
            attributes,
            [SyncAttribute::CallerId, SyncAttribute::RemoteAddress]
        );
        assert_eq!(gw.sent_to(command::SECRET_PRINT).len(), 2);
        assert_eq!(gw.sent_to(command::ACTIVE_PRINT).len(), 2);
    }
}
