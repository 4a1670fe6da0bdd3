//! Unit tests for the quote crate
//!
//! The submission pipeline is exercised end to end against the real
//! in-memory limiter and a stub mailer; nothing here touches the network.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use platform::rate_limit::{MemoryRateLimitStore, RateLimitConfig};

use crate::application::config::{IntakePolicy, QuoteConfig};
use crate::application::submit_quote::{SubmitQuoteInput, SubmitQuoteUseCase};
use crate::domain::mailer::{DispatchReceipt, EmailSender};
use crate::domain::value_objects::EmailMessage;
use crate::error::{QuoteError, QuoteResult};

#[derive(Clone, Copy)]
enum StubBehavior {
    Succeed,
    Reject,
    Unconfigured,
    Slow,
}

struct StubMailer {
    behavior: StubBehavior,
    sent: Mutex<Vec<EmailMessage>>,
}

impl StubMailer {
    fn new(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl EmailSender for StubMailer {
    async fn send(&self, message: &EmailMessage) -> QuoteResult<DispatchReceipt> {
        if let StubBehavior::Slow = self.behavior {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        match self.behavior {
            StubBehavior::Succeed | StubBehavior::Slow => {
                self.sent.lock().unwrap().push(message.clone());
                Ok(DispatchReceipt {
                    provider_message_id: Some("msg-1".to_string()),
                })
            }
            StubBehavior::Reject => Err(QuoteError::ProviderRejected {
                provider: "stub",
                status: 500,
                detail: "boom".to_string(),
            }),
            StubBehavior::Unconfigured => Err(QuoteError::ProviderUnconfigured),
        }
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

type TestUseCase = SubmitQuoteUseCase<MemoryRateLimitStore, StubMailer>;

fn use_case(policy: IntakePolicy, behavior: StubBehavior) -> (TestUseCase, Arc<StubMailer>) {
    use_case_with(policy, behavior, 10, QuoteConfig::default())
}

fn use_case_with(
    policy: IntakePolicy,
    behavior: StubBehavior,
    max_requests: u32,
    config: QuoteConfig,
) -> (TestUseCase, Arc<StubMailer>) {
    let limiter = Arc::new(MemoryRateLimitStore::new(RateLimitConfig::new(
        max_requests,
        300,
    )));
    let mailer = Arc::new(StubMailer::new(behavior));
    let use_case = SubmitQuoteUseCase::new(limiter, mailer.clone(), Arc::new(config), policy);
    (use_case, mailer)
}

fn input(raw_body: &str) -> SubmitQuoteInput {
    SubmitQuoteInput {
        raw_body: raw_body.to_string(),
        client_key: Some("1.2.3.4".to_string()),
    }
}

const VALID_BODY: &str = r#"{
    "name": "Ada",
    "email": "ada@example.com",
    "company": "Analytical Engines",
    "budget": "10-20k",
    "notes": "Build a site",
    "nda": true,
    "features": ["cms", "blog"]
}"#;

mod validation {
    use super::*;

    #[tokio::test]
    async fn missing_email_is_rejected_before_any_send() {
        let (use_case, mailer) = use_case(IntakePolicy::Strict, StubBehavior::Succeed);

        let result = use_case.execute(input(r#"{"name": "Ada"}"#)).await;

        assert!(matches!(result, Err(QuoteError::MissingRequired)));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn missing_name_is_rejected() {
        let (use_case, mailer) = use_case(IntakePolicy::Strict, StubBehavior::Succeed);

        let result = use_case
            .execute(input(r#"{"email": "ada@example.com"}"#))
            .await;

        assert!(matches!(result, Err(QuoteError::MissingRequired)));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn malformed_email_gets_format_specific_error() {
        let (use_case, mailer) = use_case(IntakePolicy::Strict, StubBehavior::Succeed);

        let result = use_case
            .execute(input(r#"{"name": "Ada", "email": "not-an-email"}"#))
            .await;

        assert!(matches!(&result, Err(QuoteError::InvalidEmail)));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid email format"
        );
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn invalid_json_is_rejected_under_quota() {
        let (use_case, mailer) = use_case(IntakePolicy::Strict, StubBehavior::Succeed);

        let result = use_case.execute(input("{not json")).await;

        assert!(matches!(result, Err(QuoteError::InvalidPayload(_))));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn unknown_fields_are_ignored() {
        let (use_case, _) = use_case(IntakePolicy::Strict, StubBehavior::Succeed);

        let result = use_case
            .execute(input(
                r#"{"name": "Ada", "email": "ada@example.com", "hcaptchaToken": "x"}"#,
            ))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn lenient_allows_missing_email() {
        let (use_case, mailer) = use_case(IntakePolicy::Lenient, StubBehavior::Succeed);

        let result = use_case.execute(input(r#"{"name": "Ada"}"#)).await;

        assert!(result.is_ok());
        assert_eq!(mailer.sent()[0].reply_to, None);
    }

    #[tokio::test]
    async fn lenient_still_rejects_malformed_email() {
        let (use_case, _) = use_case(IntakePolicy::Lenient, StubBehavior::Succeed);

        let result = use_case
            .execute(input(r#"{"name": "Ada", "email": "not-an-email"}"#))
            .await;

        assert!(matches!(result, Err(QuoteError::InvalidEmail)));
    }
}

mod dispatch {
    use super::*;

    #[tokio::test]
    async fn valid_request_dispatches_with_complete_rendering() {
        let (use_case, mailer) = use_case(IntakePolicy::Strict, StubBehavior::Succeed);

        let output = use_case.execute(input(VALID_BODY)).await.unwrap();

        assert!(output.delivered);
        assert_eq!(output.email_id, Some("msg-1".to_string()));

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        let message = &sent[0];

        assert_eq!(message.to, QuoteConfig::default().to_address);
        assert_eq!(message.reply_to, Some("ada@example.com".to_string()));
        assert!(message.subject.contains("Ada"));
        for needle in ["Build a site", "Analytical Engines", "10-20k", "cms, blog"] {
            assert!(message.text.contains(needle), "text missing {}", needle);
            assert!(message.html.contains(needle), "html missing {}", needle);
        }
    }

    #[tokio::test]
    async fn blank_optionals_are_omitted_from_rendering() {
        let (use_case, mailer) = use_case(IntakePolicy::Strict, StubBehavior::Succeed);

        use_case
            .execute(input(
                r#"{"name": "Ada", "email": "ada@example.com", "company": "   "}"#,
            ))
            .await
            .unwrap();

        assert!(!mailer.sent()[0].text.contains("Company"));
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_server_error() {
        let (use_case, _) = use_case(IntakePolicy::Strict, StubBehavior::Reject);

        let result = use_case.execute(input(VALID_BODY)).await;

        let err = result.unwrap_err();
        assert!(matches!(&err, QuoteError::ProviderRejected { .. }));
        assert!(err.kind().is_server_error());
    }

    #[tokio::test]
    async fn strict_without_provider_is_a_server_error() {
        let (use_case, _) = use_case(IntakePolicy::Strict, StubBehavior::Unconfigured);

        let result = use_case.execute(input(VALID_BODY)).await;

        assert!(matches!(result, Err(QuoteError::ProviderUnconfigured)));
    }

    #[tokio::test]
    async fn lenient_without_provider_accepts_the_request() {
        let (use_case, _) = use_case(IntakePolicy::Lenient, StubBehavior::Unconfigured);

        let output = use_case.execute(input(VALID_BODY)).await.unwrap();

        assert!(!output.delivered);
        assert_eq!(output.email_id, None);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_hits_the_dispatch_timeout() {
        let config = QuoteConfig {
            send_timeout: Duration::from_secs(1),
            ..QuoteConfig::default()
        };
        let (use_case, _) =
            use_case_with(IntakePolicy::Strict, StubBehavior::Slow, 10, config);

        let result = use_case.execute(input(VALID_BODY)).await;

        assert!(matches!(result, Err(QuoteError::ProviderTimeout)));
    }
}

mod rate_limiting {
    use super::*;

    #[tokio::test]
    async fn over_quota_rejection_happens_before_parsing() {
        let (use_case, mailer) = use_case_with(
            IntakePolicy::Strict,
            StubBehavior::Succeed,
            1,
            QuoteConfig::default(),
        );

        use_case.execute(input(VALID_BODY)).await.unwrap();

        // Garbage body: a parse would fail, but the quota check comes first.
        let result = use_case.execute(input("{not json")).await;

        assert!(matches!(result, Err(QuoteError::RateLimited { .. })));
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn clients_get_independent_quotas() {
        let (use_case, _) = use_case_with(
            IntakePolicy::Strict,
            StubBehavior::Succeed,
            1,
            QuoteConfig::default(),
        );

        use_case.execute(input(VALID_BODY)).await.unwrap();

        let other = SubmitQuoteInput {
            raw_body: VALID_BODY.to_string(),
            client_key: Some("5.6.7.8".to_string()),
        };
        assert!(use_case.execute(other).await.is_ok());
    }
}

mod wire_shapes {
    use super::*;
    use crate::presentation::dto::{
        LenientQuoteErrorResponse, LenientQuoteResponse, SendQuoteResponse,
    };

    #[test]
    fn send_quote_response_uses_camel_case_and_keeps_null_id() {
        let value = serde_json::to_value(SendQuoteResponse {
            success: true,
            message: "Quote request sent successfully".to_string(),
            email_id: None,
        })
        .unwrap();

        assert_eq!(value["success"], true);
        assert!(value.get("emailId").is_some());
        assert!(value["emailId"].is_null());
    }

    #[test]
    fn lenient_response_carries_no_provider_note() {
        let value = serde_json::to_value(LenientQuoteResponse {
            ok: true,
            received: true,
            note: Some("no-provider".to_string()),
            email_id: None,
        })
        .unwrap();

        assert_eq!(value["note"], "no-provider");
        assert!(value.get("emailId").is_none());
    }

    #[test]
    fn lenient_error_shape_matches_contract() {
        let value = serde_json::to_value(LenientQuoteErrorResponse {
            ok: false,
            error: "sendgrid_error".to_string(),
            status: Some(502),
            detail: "bad gateway".to_string(),
        })
        .unwrap();

        assert_eq!(value["ok"], false);
        assert_eq!(value["error"], "sendgrid_error");
        assert_eq!(value["status"], 502);
        assert_eq!(value["detail"], "bad gateway");
    }
}
