use super::GuildbotError;

#[test]
fn api_error_displays_status_and_message() {
    let err = GuildbotError::Api {
        status: 503,
        message: "model overloaded".to_string(),
    };
    let text = err.to_string();
    assert!(text.contains("503"));
    assert!(text.contains("model overloaded"));
}

#[test]
fn user_message_never_leaks_detail() {
    let err = GuildbotError::Api {
        status: 500,
        message: "internal stack trace: key=AIza...".to_string(),
    };
    assert!(!err.user_message().contains("AIza"));
}

#[test]
fn rate_limit_maps_to_rate_limit_reply() {
    let err = GuildbotError::RateLimit {
        retry_after: Some(30),
    };
    assert!(err.user_message().contains("Rate limit"));
}

#[test]
fn auth_and_config_map_to_admin_reply() {
    let auth = GuildbotError::Auth("bad key".to_string());
    let config = GuildbotError::Config("PORT out of range".to_string());
    assert_eq!(auth.user_message(), config.user_message());
    assert!(auth.user_message().contains("administrator"));
}

#[test]
fn anyhow_converts_via_internal() {
    fn inner() -> Result<(), GuildbotError> {
        Err(anyhow::anyhow!("boom"))?;
        Ok(())
    }
    let err = inner().unwrap_err();
    assert!(matches!(err, GuildbotError::Internal(_)));
}
