//! Tests for field adapters: value pipeline, errors and key handling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{Value, json};
use simpleform::field::{DEFAULT_EMPTY_MESSAGE, DEFAULT_MAX_LENGTH};
use simpleform::prelude::*;

type Delivered = Arc<Mutex<Vec<Payload>>>;

fn build_form() -> (FormCoordinator, SubmissionFlag, Delivered) {
    let flag = SubmissionFlag::new();
    let delivered: Delivered = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&delivered);
    let form = FormCoordinator::new(
        FormConfig::new(flag.clone(), move |payload| sink.lock().unwrap().push(payload))
            .focus_registry(FocusRegistry::new()),
    );
    (form, flag, delivered)
}

/// A form that counts how many submits started.
fn build_counting_form(
    configure: impl FnOnce(FormConfig) -> FormConfig,
) -> (FormCoordinator, SubmissionFlag, Delivered, Arc<AtomicUsize>) {
    let flag = SubmissionFlag::new();
    let delivered: Delivered = Arc::new(Mutex::new(Vec::new()));
    let submits = Arc::new(AtomicUsize::new(0));
    let (sink, counter) = (Arc::clone(&delivered), Arc::clone(&submits));
    let config = FormConfig::new(flag.clone(), move |payload| sink.lock().unwrap().push(payload))
        .focus_registry(FocusRegistry::new())
        .on_submitted(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    (FormCoordinator::new(configure(config)), flag, delivered, submits)
}

fn object(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(field: &FieldAdapter, text: &str) {
    for c in text.chars() {
        assert_eq!(field.handle_key(&key(KeyCode::Char(c))), EventResult::Consumed);
    }
}

// =============================================================================
// Value pipeline
// =============================================================================

#[test]
fn test_sanitize_reports_changes() {
    let (form, _, _) = build_form();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("name")
            .on_sanitize(|v| v.as_text().map(|s| s.trim().into()).unwrap_or_else(|| v.clone()))
            .on_did_sanitize(move |raw, clean| {
                sink.lock().unwrap().push((raw.clone(), clean.clone()));
            }),
    );

    field.surface().set_text("  Alex  ");
    assert_eq!(field.sanitized_value(), InputValue::from("Alex"));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![(InputValue::from("  Alex  "), InputValue::from("Alex"))]
    );

    seen.lock().unwrap().clear();
    field.surface().set_text("Alex");
    field.sanitized_value();
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_normalized_value_is_submitted() {
    let (form, _, delivered) = build_form();
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("code")
            .limits(FieldLimits::unbounded())
            .on_normalize(|v| v.as_text().map(|s| s.to_uppercase().into()).unwrap_or(v)),
    );
    field.surface().set_text("ab12");
    field.handle_blur();

    assert_eq!(field.store().value(), InputValue::from("ab12"));
    assert!(form.submit().is_completed());
    assert_eq!(*delivered.lock().unwrap(), vec![object(json!({"code": "AB12"}))]);
}

#[test]
fn test_custom_evaluation() {
    let (form, _, delivered) = build_form();
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("age")
            .kind(InputKind::Number)
            .limits(FieldLimits::unbounded())
            .on_evaluate(|name, value, _surface| {
                let n: i64 = value.as_text().and_then(|s| s.parse().ok()).unwrap_or(0);
                Evaluation::new(name, n)
            }),
    );
    field.surface().set_text("42");
    field.handle_blur();

    form.submit();
    assert_eq!(*delivered.lock().unwrap(), vec![object(json!({"age": 42}))]);
}

#[test]
fn test_length_limits_count_characters() {
    let (form, _, _) = build_form();
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("name").min_length(2).max_length(3),
    );

    field.surface().set_text("ééé");
    assert!(field.meets_min_length());
    assert!(field.meets_max_length());
    field.surface().set_text("éééé");
    assert!(!field.meets_max_length());
}

#[test]
fn test_optional_field_completes_when_empty() {
    let (form, _, delivered) = build_form();
    let field = FieldAdapter::mount(form.context(0), FieldConfig::new("nickname").optional(true));
    field.handle_blur();

    assert_eq!(form.submit(), SubmitOutcome::Completed);
    assert_eq!(*delivered.lock().unwrap(), vec![object(json!({"nickname": ""}))]);
    assert!(!field.store().is_empty());
    assert!(field.store().is_valid());
}

#[test]
fn test_custom_checker_replaces_emptiness() {
    let (form, _, _) = build_form();
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("name")
            .limits(FieldLimits::unbounded())
            .on_check(|v| v.as_text().is_none_or(|s| s.trim().is_empty())),
    );
    field.surface().set_text("   ");

    assert!(field.check());
    assert_eq!(form.submit(), SubmitOutcome::Incomplete);
}

#[test]
fn test_optional_empty_field_skips_custom_checker() {
    let (form, _, _) = build_form();
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("nickname").optional(true).on_check(|_| true),
    );

    assert!(!field.check());
    assert!(!field.store().is_empty());
    assert_eq!(form.submit(), SubmitOutcome::Completed);
}

// =============================================================================
// Validation and errors
// =============================================================================

#[test]
fn test_rule_error_is_visible_after_submit() {
    let (form, _, _) = build_form();
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("email")
            .kind(InputKind::Email)
            .limits(FieldLimits::unbounded())
            .on_validate(rules::email("Please enter a valid email")),
    );
    field.surface().set_text("alex");
    field.handle_blur();
    assert_eq!(field.visible_error(), None);

    assert_eq!(form.submit(), SubmitOutcome::Invalid);
    assert_eq!(
        field.visible_error().as_deref(),
        Some("Please enter a valid email")
    );

    field.dismiss_error();
    assert_eq!(field.visible_error(), None);
}

#[test]
fn test_length_checked_before_custom_validator() {
    let (form, _, _) = build_form();
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("pin")
            .min_length(4)
            .min_length_message("PIN too short")
            .on_validate(|_| Some("never reached".to_string())),
    );
    field.surface().set_text("12");

    assert!(!field.validate());
    assert_eq!(field.store().error_message().as_deref(), Some("PIN too short"));
}

#[test]
fn test_fixing_value_clears_invalid_state() {
    let (form, _, _) = build_form();
    let field = FieldAdapter::mount(form.context(0), FieldConfig::new("name").min_length(3));
    field.surface().set_text("Al");
    field.handle_blur();
    assert!(!field.store().is_valid());

    field.surface().set_text("Alex");
    field.handle_blur();
    assert!(field.store().is_valid());
    assert!(!field.store().is_empty());
}

#[test]
fn test_limits_from_settings() {
    let limits: FieldLimits = serde_json::from_str(r#"{"min_length": 2}"#).unwrap();
    assert_eq!(limits.min_length, 2);
    assert_eq!(limits.max_length, DEFAULT_MAX_LENGTH);
    assert_eq!(limits.empty_message(), DEFAULT_EMPTY_MESSAGE);

    let inverted = FieldLimits {
        min_length: 10,
        max_length: 5,
        ..Default::default()
    };
    assert!(matches!(
        inverted.check(),
        Err(ConfigError::InvalidLengthBounds { min: 10, max: 5 })
    ));
}

// =============================================================================
// Stores and lifecycle
// =============================================================================

#[test]
fn test_mount_with_application_store() {
    let (form, _, _) = build_form();
    let state = FieldState::new(InputValue::from("preset"));
    let field = FieldAdapter::mount_with_store(
        form.context(0),
        FieldConfig::new("name").limits(FieldLimits::unbounded()),
        Arc::new(state.clone()),
    );
    assert_eq!(field.surface().text(), "preset");

    field.surface().set_text("changed");
    field.handle_blur();
    assert_eq!(state.value(), InputValue::from("changed"));
}

#[test]
fn test_did_mount_and_change_hooks() {
    let (form, flag, _) = build_form();
    let log = Arc::new(Mutex::new(Vec::new()));
    let (mounted, changed) = (Arc::clone(&log), Arc::clone(&log));
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("name")
            .on_did_mount(move |field| {
                mounted.lock().unwrap().push(format!("mount {}", field.name()));
            })
            .on_change(move |value, _field| {
                changed
                    .lock()
                    .unwrap()
                    .push(format!("change {}", value.as_text().unwrap_or_default()));
            }),
    );
    flag.set_submitted(true);

    type_text(&field, "Al");
    assert_eq!(
        *log.lock().unwrap(),
        vec!["mount name", "change A", "change Al"]
    );
    assert!(!flag.get());
}

#[test]
fn test_field_survives_form_drop() {
    let (form, _, _) = build_form();
    let field = FieldAdapter::mount(form.context(0), FieldConfig::new("name"));
    drop(form);

    field.surface().set_text("Alex");
    field.handle_blur();
    assert!(!field.is_focused());
    assert_eq!(field.context().submit().ok(), None);
}

// =============================================================================
// Key handling
// =============================================================================

#[test]
fn test_typing_edits_surface_until_blur() {
    let (form, _, _) = build_form();
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("name").limits(FieldLimits::unbounded()),
    );

    type_text(&field, "Alx");
    field.handle_key(&key(KeyCode::Left));
    type_text(&field, "e");
    field.handle_key(&key(KeyCode::End));
    field.handle_key(&key(KeyCode::Backspace));
    assert_eq!(field.surface().text(), "Ale");
    assert_eq!(field.store().value(), InputValue::from(""));

    field.handle_blur();
    assert_eq!(field.store().value(), InputValue::from("Ale"));
}

#[test]
fn test_enter_submits_the_form() {
    let (form, _, delivered) = build_form();
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("name").limits(FieldLimits::unbounded()),
    );

    type_text(&field, "Alex");
    assert_eq!(field.handle_key(&key(KeyCode::Enter)), EventResult::Consumed);
    assert_eq!(*delivered.lock().unwrap(), vec![object(json!({"name": "Alex"}))]);
}

#[test]
fn test_enter_in_textarea_inserts_newline() {
    let (form, _, delivered) = build_form();
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("bio")
            .kind(InputKind::Textarea)
            .limits(FieldLimits::unbounded()),
    );

    type_text(&field, "a");
    field.handle_key(&key(KeyCode::Enter));
    type_text(&field, "b");
    assert_eq!(field.surface().text(), "a\nb");
    assert!(delivered.lock().unwrap().is_empty());
}

#[test]
fn test_auto_submitted_checkbox_submits_on_toggle() {
    let (form, _, delivered) = build_form();
    let _nickname =
        FieldAdapter::mount(form.context(0), FieldConfig::new("nickname").optional(true));
    let field = FieldAdapter::mount(
        form.context(1),
        FieldConfig::new("terms")
            .kind(InputKind::Checkbox)
            .auto_submitted(true),
    );

    assert_eq!(field.handle_key(&key(KeyCode::Char(' '))), EventResult::Consumed);
    assert_eq!(
        *delivered.lock().unwrap(),
        vec![object(json!({"nickname": "", "terms": true}))]
    );
    assert!(!field.surface().is_checked());
    assert_eq!(form.focused_position(), FocusPosition::Field(0));
}

#[test]
fn test_checkbox_toggle_focuses_it() {
    let (form, _, _) = build_form();
    let _name = FieldAdapter::mount(form.context(0), FieldConfig::new("name"));
    let field = FieldAdapter::mount(
        form.context(1),
        FieldConfig::new("newsletter").kind(InputKind::Checkbox),
    );

    field.handle_key(&key(KeyCode::Char(' ')));
    assert!(field.surface().is_checked());
    assert_eq!(form.focused_position(), FocusPosition::Field(1));
}

#[test]
fn test_enter_on_auto_submitted_field_submits_once() {
    let (form, flag, delivered, submits) = build_counting_form(|c| c);
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("name")
            .limits(FieldLimits::unbounded())
            .auto_submitted(true),
    );

    type_text(&field, "Alex");
    assert_eq!(field.handle_key(&key(KeyCode::Enter)), EventResult::Consumed);
    assert_eq!(submits.load(Ordering::SeqCst), 1);
    assert_eq!(*delivered.lock().unwrap(), vec![object(json!({"name": "Alex"}))]);
    assert!(!flag.get());
    assert_eq!(field.visible_error(), None);
}

#[test]
fn test_enter_on_empty_auto_submitted_field_still_submits() {
    let (form, flag, delivered, submits) = build_counting_form(|c| c);
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("name").auto_submitted(true),
    );

    field.handle_key(&key(KeyCode::Enter));
    assert_eq!(submits.load(Ordering::SeqCst), 1);
    assert!(delivered.lock().unwrap().is_empty());
    assert!(flag.get());
    assert_eq!(field.visible_error().as_deref(), Some("This field is required"));
}

#[test]
fn test_tab_on_auto_submitted_field_moves_after_submit() {
    let (form, flag, delivered, submits) =
        build_counting_form(|c| c.reset_when_finished(false));
    let first = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("first").limits(FieldLimits::unbounded()),
    );
    let second = FieldAdapter::mount(
        form.context(1),
        FieldConfig::new("second")
            .limits(FieldLimits::unbounded())
            .auto_submitted(true),
    );
    type_text(&first, "x");
    first.handle_blur();

    type_text(&second, "y");
    second.handle_key(&key(KeyCode::Tab));
    assert_eq!(submits.load(Ordering::SeqCst), 1);
    assert_eq!(delivered.lock().unwrap().len(), 1);
    assert_eq!(form.focused_position(), FocusPosition::Field(2));
    assert!(!flag.get());

    second.handle_key(&key(KeyCode::BackTab));
    assert_eq!(submits.load(Ordering::SeqCst), 2);
    assert_eq!(delivered.lock().unwrap().len(), 2);
    assert_eq!(form.focused_position(), FocusPosition::Field(0));
    assert!(!flag.get());
}

#[test]
fn test_checkbox_is_never_empty() {
    let (form, _, delivered) = build_form();
    let field = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("newsletter").kind(InputKind::Checkbox),
    );

    assert!(!field.check());
    assert_eq!(field.handle_key(&key(KeyCode::Char('x'))), EventResult::Ignored);
    assert!(form.submit().is_completed());
    assert_eq!(
        *delivered.lock().unwrap(),
        vec![object(json!({"newsletter": false}))]
    );
}

#[test]
fn test_disabled_field_ignores_keys() {
    let (form, _, _) = build_form();
    let field = FieldAdapter::mount(form.context(0), FieldConfig::new("name").disabled(true));

    assert_eq!(field.handle_key(&key(KeyCode::Char('a'))), EventResult::Ignored);
    assert_eq!(field.surface().text(), "");
}

#[test]
fn test_control_chords_are_ignored() {
    let (form, _, _) = build_form();
    let field = FieldAdapter::mount(form.context(0), FieldConfig::new("name"));

    let chord = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(field.handle_key(&chord), EventResult::Ignored);
    assert_eq!(field.surface().text(), "");
}
