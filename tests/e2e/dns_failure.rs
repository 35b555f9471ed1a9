//! Name-resolution failure E2E tests.

use safe_result::prelude::*;
use safe_result::{ErrorCode, ErrorKind};
use std::io;

const UNRESOLVABLE: &str = "does-not-exist-dwadwad-dwadwa-dwad.invalid:443";

#[tokio::test]
async fn unresolvable_host_reports_enotfound() {
    let envelope = safe(tokio::net::lookup_host(UNRESOLVABLE)).await;

    assert!(envelope.result().is_none());
    assert_eq!(
        envelope.error().and_then(SafeError::code),
        Some(ErrorCode::not_found_host())
    );
    assert_eq!(envelope.error().map(SafeError::kind), Some(ErrorKind::Unexpected));
}

#[tokio::test]
async fn resolver_error_is_not_rewritten() {
    let envelope = safe(tokio::net::lookup_host(UNRESOLVABLE)).await;

    let message = envelope
        .error()
        .and_then(SafeError::operation)
        .map(io::Error::to_string);
    assert_eq!(
        message,
        envelope.error().map(SafeError::message),
        "operation errors surface their own message"
    );
}

#[tokio::test]
async fn predicate_is_skipped_when_lookup_fails() {
    let envelope = safe_with(
        async { tokio::net::lookup_host(UNRESOLVABLE).await.map(|addrs| addrs.count()) },
        |_| unreachable!("predicate must not run after a failed lookup"),
    )
    .await;

    let code = envelope
        .error()
        .and_then(SafeError::code)
        .map(|code| code.to_string());
    assert_eq!(code.as_deref(), Some("os:ENOTFOUND"));
}

#[tokio::test]
async fn serialized_report_carries_the_code() -> Result<(), serde_json::Error> {
    let envelope = safe(async {
        tokio::net::lookup_host(UNRESOLVABLE)
            .await
            .map(|addrs| addrs.count())
    })
    .await;

    let report = serde_json::to_value(&envelope)?;
    assert_eq!(report["result"], serde_json::Value::Null);
    assert_eq!(report["error"]["code"]["code"], "ENOTFOUND");
    Ok(())
}
