//! Signup form driven by scripted key presses.
//!
//! Logs go to `signup.log` in the working directory.

use std::fs::File;
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use simpleform::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

fn press(field: &FieldAdapter, code: KeyCode) {
    field.handle_key(&KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(field: &FieldAdapter, text: &str) {
    for c in text.chars() {
        press(field, KeyCode::Char(c));
    }
}

fn show_errors(fields: &[&FieldAdapter]) {
    for field in fields {
        if let Some(error) = field.visible_error() {
            println!("  {}: {}", field.name(), error);
        }
    }
}

fn main() {
    let log_file = File::create("signup.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let submitted = SubmissionFlag::new();
    let delivered = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&delivered);

    let mut extra = Payload::new();
    extra.insert("source".into(), json!("terminal"));

    let form = FormCoordinator::new(
        FormConfig::new(submitted.clone(), move |payload| {
            if let Ok(mut slot) = sink.lock() {
                *slot = Some(payload);
            }
        })
        .name("signup")
        .included_data(extra),
    );

    let name = FieldAdapter::mount(
        form.context(0),
        FieldConfig::new("name")
            .min_length(2)
            .max_length(40)
            .on_sanitize(|v| match v.as_text() {
                Some(s) => s.trim().into(),
                None => v.clone(),
            }),
    );
    let email = FieldAdapter::mount(
        form.context(1),
        FieldConfig::new("email")
            .kind(InputKind::Email)
            .limits(FieldLimits::unbounded())
            .on_normalize(|v| match v.as_text() {
                Some(s) => s.to_lowercase().into(),
                None => v,
            })
            .on_validate(rules::email("Please enter a valid email")),
    );
    let password = FieldAdapter::mount(
        form.context(2),
        FieldConfig::new("password").kind(InputKind::Password),
    );
    let terms = FieldAdapter::mount(
        form.context(3),
        FieldConfig::new("terms")
            .kind(InputKind::Checkbox)
            .on_validate(rules::checked("Please accept the terms")),
    );
    let fields = [&name, &email, &password, &terms];

    println!("Submitting an empty form...");
    press(&name, KeyCode::Enter);
    show_errors(&fields);

    println!("Filling in the form...");
    type_text(&name, " Alex ");
    press(&name, KeyCode::Tab);
    type_text(&email, "Alex@Example");
    press(&email, KeyCode::Tab);
    type_text(&password, "hunter2");
    press(&password, KeyCode::Tab);
    press(&terms, KeyCode::Char(' '));
    press(&terms, KeyCode::Enter);
    show_errors(&fields);

    println!("Fixing mistakes...");
    press(&email, KeyCode::End);
    type_text(&email, ".com");
    press(&email, KeyCode::Tab);
    type_text(&password, "22");
    press(&password, KeyCode::Enter);
    show_errors(&fields);

    match delivered.lock().ok().and_then(|mut slot| slot.take()) {
        Some(payload) => match serde_json::to_string_pretty(&payload) {
            Ok(text) => println!("Submitted:\n{}", text),
            Err(e) => eprintln!("Error: {}", e),
        },
        None => println!("Form was not submitted"),
    }
}
