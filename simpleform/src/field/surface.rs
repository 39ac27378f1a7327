use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::value::{InputKind, InputValue};

/// Internal state for an input surface
#[derive(Debug, Default)]
struct SurfaceInner {
    /// Current text (text-like kinds)
    text: String,
    /// Cursor position (byte offset into `text`)
    cursor: usize,
    /// Checked state (checkbox)
    checked: bool,
    /// Selected files (file inputs)
    files: Vec<PathBuf>,
    /// Placeholder text
    placeholder: String,
}

/// The raw, editable side of a field.
///
/// This is what the user types into. Its contents are never submitted as-is;
/// the field sanitizes and normalizes them first. Renderers read the text and
/// cursor from here and poll [`InputSurface::take_focus_request`].
#[derive(Debug)]
pub struct InputSurface {
    kind: InputKind,
    inner: Arc<RwLock<SurfaceInner>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
    /// Focus request flag (checked by the renderer)
    focus_requested: Arc<AtomicBool>,
}

impl InputSurface {
    /// Create an empty surface of the given kind
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            inner: Arc::new(RwLock::new(SurfaceInner::default())),
            dirty: Arc::new(AtomicBool::new(false)),
            focus_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// The unsanitized value, shaped by the input kind.
    pub fn raw_value(&self) -> InputValue {
        let Ok(guard) = self.inner.read() else {
            return InputValue::empty_for(self.kind);
        };
        match self.kind {
            InputKind::Checkbox => InputValue::Bool(guard.checked),
            InputKind::File => InputValue::Files(guard.files.clone()),
            _ => InputValue::Text(guard.text.clone()),
        }
    }

    /// Get the current text
    pub fn text(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.text.clone())
            .unwrap_or_default()
    }

    /// Get the cursor position (byte offset)
    pub fn cursor(&self) -> usize {
        self.inner.read().map(|guard| guard.cursor).unwrap_or(0)
    }

    pub fn is_checked(&self) -> bool {
        self.inner.read().map(|guard| guard.checked).unwrap_or(false)
    }

    pub fn files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|guard| guard.files.clone())
            .unwrap_or_default()
    }

    pub fn placeholder(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.placeholder.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Replace the surface contents with a stored value.
    ///
    /// Values of the wrong shape are coerced: a checkbox takes the truthiness,
    /// a text input takes the text (or nothing).
    pub fn set_raw(&self, value: &InputValue) {
        if let Ok(mut guard) = self.inner.write() {
            match self.kind {
                InputKind::Checkbox => guard.checked = value.is_truthy(),
                InputKind::File => {
                    guard.files = value.as_files().map(<[PathBuf]>::to_vec).unwrap_or_default();
                }
                _ => {
                    guard.text = value.as_text().unwrap_or_default().to_string();
                    guard.cursor = guard.text.len();
                }
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Set the text and move the cursor to its end
    pub fn set_text(&self, text: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.text = text.into();
            guard.cursor = guard.text.len();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn set_checked(&self, checked: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.checked = checked;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Flip the checked state
    pub fn toggle(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.checked = !guard.checked;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn set_files(&self, files: Vec<PathBuf>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.files = files;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.placeholder = placeholder.into();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Text editing (driven by key events)
    // -------------------------------------------------------------------------

    /// Insert a character at the cursor position
    pub fn insert_char(&self, c: char) {
        if let Ok(mut guard) = self.inner.write() {
            let cursor = guard.cursor;
            guard.text.insert(cursor, c);
            guard.cursor += c.len_utf8();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Delete the character before the cursor (backspace)
    pub fn delete_char_before(&self) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if guard.cursor == 0 {
            return;
        }
        let prev = guard.text[..guard.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        guard.text.remove(prev);
        guard.cursor = prev;
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Delete the character at the cursor (delete key)
    pub fn delete_char_at(&self) {
        if let Ok(mut guard) = self.inner.write() {
            let cursor = guard.cursor;
            if cursor < guard.text.len() {
                guard.text.remove(cursor);
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    pub fn cursor_left(&self) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if guard.cursor > 0 {
            guard.cursor = guard.text[..guard.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn cursor_right(&self) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        let cursor = guard.cursor;
        if cursor < guard.text.len() {
            guard.cursor = guard.text[cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| cursor + i)
                .unwrap_or(guard.text.len());
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn cursor_home(&self) {
        if let Ok(mut guard) = self.inner.write() {
            if guard.cursor != 0 {
                guard.cursor = 0;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    pub fn cursor_end(&self) {
        if let Ok(mut guard) = self.inner.write() {
            let end = guard.text.len();
            if guard.cursor != end {
                guard.cursor = end;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Focus and dirty tracking
    // -------------------------------------------------------------------------

    /// Ask the renderer to give this surface terminal focus
    pub fn request_focus(&self) {
        self.focus_requested.store(true, Ordering::SeqCst);
    }

    /// Check and clear the focus request (called by the renderer)
    pub fn take_focus_request(&self) -> bool {
        self.focus_requested.swap(false, Ordering::SeqCst)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}
