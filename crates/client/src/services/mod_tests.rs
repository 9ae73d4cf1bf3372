// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::*;

#[test]
fn page_tolerates_nulls_and_missing_fields() -> anyhow::Result<()> {
    let page: Page<Contact> = serde_json::from_value(json!({
        "content": [{ "id": "c1", "emails": ["a@b.c"], "names": null }],
        "currentPage": 1,
        "totalPages": null,
        "totalElements": 1,
        "hasNext": false
    }))?;
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].emails, vec!["a@b.c".to_owned()]);
    assert!(page.content[0].names.is_empty());
    assert_eq!(page.current_page, 1);
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.total_elements, 1);
    Ok(())
}

#[test]
fn pipeline_enums_use_backend_names() -> anyhow::Result<()> {
    assert_eq!(serde_json::to_value(PipelineStage::ApiCallerStarted)?, json!("API_CALLER_STARTED"));
    let state: PipelineState = serde_json::from_value(json!("SKIPPING"))?;
    assert_eq!(state, PipelineState::Skipping);
    assert!(!state.is_terminal());
    assert!(PipelineState::Cancelled.is_terminal());
    Ok(())
}

#[test]
fn proxy_protocols_round_names() -> anyhow::Result<()> {
    let protocol: ProxyProtocol = serde_json::from_value(json!("SHADOWSOCKS"))?;
    assert!(protocol.is_v2ray());
    assert_eq!(serde_json::to_value(ProxyProtocol::Socks5)?, json!("SOCKS5"));
    assert!(!ProxyProtocol::Https.is_v2ray());
    Ok(())
}

#[test]
fn proxy_stats_are_keyed_by_status() -> anyhow::Result<()> {
    let stats: ProxyStats =
        serde_json::from_value(json!({ "ACTIVE": 4, "FAILED": 1, "UNTESTED": 2 }))?;
    assert_eq!(stats.count(ProxyStatus::Active), 4);
    assert_eq!(stats.count(ProxyStatus::Inactive), 0);
    assert_eq!(stats.total(), 7);
    Ok(())
}

#[test]
fn email_request_omits_unused_fields() -> anyhow::Result<()> {
    let single = EmailRequest {
        recipient: Some("ada@example.com".to_owned()),
        subject: "Hi".to_owned(),
        body: "Hello".to_owned(),
        ..EmailRequest::default()
    };
    assert_eq!(
        serde_json::to_value(&single)?,
        json!({ "recipient": "ada@example.com", "subject": "Hi", "body": "Hello" })
    );

    let mass = EmailRequest {
        recipients: vec!["a@x.io".to_owned(), "b@x.io".to_owned()],
        template_name: Some("welcome".to_owned()),
        ..single
    };
    let value = serde_json::to_value(&mass)?;
    assert_eq!(value["recipients"], json!(["a@x.io", "b@x.io"]));
    assert_eq!(value["templateName"], "welcome");
    Ok(())
}

#[test]
fn generator_requests_leave_defaults_to_backend() -> anyhow::Result<()> {
    let request = EmailQueryRequest { industry: "dental".to_owned(), ..Default::default() };
    assert_eq!(serde_json::to_value(&request)?, json!({ "industry": "dental" }));

    let variations = VariationRequest { original_query: "dentists".to_owned(), count: Some(3) };
    assert_eq!(
        serde_json::to_value(&variations)?,
        json!({ "originalQuery": "dentists", "count": 3 })
    );

    let mass: MassEmailResponse = serde_json::from_value(json!({
        "message": "Mass email job started",
        "recipientCount": "2"
    }))?;
    assert_eq!(mass.recipient_count, "2");
    Ok(())
}
