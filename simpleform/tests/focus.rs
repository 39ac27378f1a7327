//! Tests for focus cursors across forms and fields.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use simpleform::prelude::*;

fn build_form(registry: &FocusRegistry, name: &str) -> FormCoordinator {
    FormCoordinator::new(
        FormConfig::new(SubmissionFlag::new(), |_| {})
            .name(name)
            .focus_registry(registry.clone()),
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn mount_fields(form: &FormCoordinator, count: usize) -> Vec<FieldAdapter> {
    (0..count)
        .map(|position| {
            FieldAdapter::mount(
                form.context(position),
                FieldConfig::new(format!("field{}", position)).limits(FieldLimits::unbounded()),
            )
        })
        .collect()
}

// =============================================================================
// Cursor movement
// =============================================================================

#[test]
fn test_first_field_focused_on_mount() {
    let registry = FocusRegistry::new();
    let form = build_form(&registry, "signup");
    let fields = mount_fields(&form, 2);

    assert!(fields[0].is_focused());
    assert!(fields[0].surface().take_focus_request());
    assert!(!fields[1].is_focused());
    assert!(!fields[1].surface().take_focus_request());
}

#[test]
fn test_tab_moves_forward_and_clears_submitted() {
    let registry = FocusRegistry::new();
    let form = build_form(&registry, "signup");
    let fields = mount_fields(&form, 2);
    form.set_submitted(true);

    assert_eq!(fields[0].handle_key(&key(KeyCode::Tab)), EventResult::Consumed);
    assert_eq!(form.focused_position(), FocusPosition::Field(1));
    assert!(!form.is_submitted());
    assert!(fields[1].is_focused());
}

#[test]
fn test_back_tab_moves_backward_and_stops_at_first() {
    let registry = FocusRegistry::new();
    let form = build_form(&registry, "signup");
    let fields = mount_fields(&form, 2);
    form.set_focused_position(FocusPosition::Field(1));

    fields[1].handle_key(&key(KeyCode::BackTab));
    assert_eq!(form.focused_position(), FocusPosition::Field(0));

    let shift_tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
    fields[0].handle_key(&shift_tab);
    assert_eq!(form.focused_position(), FocusPosition::Field(0));
}

#[test]
fn test_tab_commits_value() {
    let registry = FocusRegistry::new();
    let form = build_form(&registry, "signup");
    let fields = mount_fields(&form, 2);

    fields[0].handle_key(&key(KeyCode::Char('x')));
    fields[0].handle_key(&key(KeyCode::Tab));
    assert_eq!(fields[0].store().value(), InputValue::from("x"));
}

#[test]
fn test_escape_blurs_every_field() {
    let registry = FocusRegistry::new();
    let form = build_form(&registry, "signup");
    let fields = mount_fields(&form, 2);

    fields[0].handle_key(&key(KeyCode::Esc));
    assert_eq!(form.focused_position(), FocusPosition::Blank);
    assert!(fields.iter().all(|field| !field.is_focused()));
}

#[test]
fn test_focus_event_moves_cursor_to_field() {
    let registry = FocusRegistry::new();
    let form = build_form(&registry, "signup");
    let fields = mount_fields(&form, 3);

    fields[2].handle_focus();
    assert_eq!(form.focused_position(), FocusPosition::Field(2));
    assert!(fields[2].is_focused());
    assert!(!fields[0].is_focused());
}

// =============================================================================
// Active form
// =============================================================================

#[test]
fn test_newest_form_is_active() {
    let registry = FocusRegistry::new();
    let login = build_form(&registry, "login");
    let login_fields = mount_fields(&login, 1);
    let search = build_form(&registry, "search");
    let search_fields = mount_fields(&search, 1);

    assert!(search.is_active());
    assert!(!login.is_active());
    assert_eq!(registry.previous_form(), Some(FormId::new("login")));
    assert!(search_fields[0].is_focused());
    assert!(!login_fields[0].is_focused());
}

#[test]
fn test_focusing_field_activates_its_form() {
    let registry = FocusRegistry::new();
    let login = build_form(&registry, "login");
    let login_fields = mount_fields(&login, 1);
    let _search = build_form(&registry, "search");

    login_fields[0].handle_focus();
    assert!(login.is_active());
    assert!(login_fields[0].context().is_form_focused());
    assert_eq!(registry.active_form(), Some(FormId::new("login")));
}

#[test]
fn test_cursor_survives_form_rebuild() {
    let registry = FocusRegistry::new();
    let form = build_form(&registry, "signup");
    form.set_focused_position(FocusPosition::Field(2));
    drop(form);

    let rebuilt = build_form(&registry, "signup");
    assert_eq!(rebuilt.focused_position(), FocusPosition::Field(2));
}

#[test]
fn test_global_registry_is_shared() {
    let form = FormId::generate();
    FocusRegistry::global().set_position(&form, FocusPosition::Field(4));
    assert_eq!(
        FocusRegistry::global().position(&form),
        FocusPosition::Field(4)
    );
}
