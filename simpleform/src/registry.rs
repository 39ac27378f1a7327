//! Ordered callback registries shared between a form and its fields.
//!
//! A form keeps four registries (checkers, validators, resetters and
//! evaluators). Fields add their callbacks when they mount and remove them when
//! they unmount. Identity is the [`CallbackId`] carried by each handle, so
//! registering a clone of a handle that is already present does nothing.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::form::Evaluation;

/// Unique identifier for a callback handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(usize);

impl CallbackId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__callback_{}", self.0)
    }
}

/// A shareable callback with a stable identity.
///
/// Cloning a `Callback` keeps its id, which is what the registries compare.
/// Two callbacks built from the same closure body are still distinct.
pub struct Callback<F: ?Sized> {
    id: CallbackId,
    f: Arc<F>,
}

impl<F: ?Sized> Callback<F> {
    /// Get the identity of this callback
    pub fn id(&self) -> CallbackId {
        self.id
    }
}

impl<F: ?Sized> Clone for Callback<F> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            f: Arc::clone(&self.f),
        }
    }
}

impl<F: ?Sized> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.id).finish()
    }
}

/// Reports whether a field is empty. `true` means incomplete.
pub type Checker = Callback<dyn Fn() -> bool + Send + Sync>;

/// Reports whether a field's value is acceptable. `true` means valid.
pub type Validator = Callback<dyn Fn() -> bool + Send + Sync>;

/// Restores a field to its reset value.
pub type Resetter = Callback<dyn Fn() + Send + Sync>;

/// Produces the `{name, value}` pair a field contributes to the payload.
pub type Evaluator = Callback<dyn Fn() -> Evaluation + Send + Sync>;

impl Callback<dyn Fn() -> bool + Send + Sync> {
    /// Wrap a predicate (used for both checkers and validators).
    pub fn new(f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        let f: Arc<dyn Fn() -> bool + Send + Sync> = Arc::new(f);
        Self {
            id: CallbackId::new(),
            f,
        }
    }

    pub fn call(&self) -> bool {
        (self.f)()
    }
}

impl Callback<dyn Fn() + Send + Sync> {
    /// Wrap a resetter.
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        let f: Arc<dyn Fn() + Send + Sync> = Arc::new(f);
        Self {
            id: CallbackId::new(),
            f,
        }
    }

    pub fn call(&self) {
        (self.f)()
    }
}

impl Callback<dyn Fn() -> Evaluation + Send + Sync> {
    /// Wrap an evaluator.
    pub fn new(f: impl Fn() -> Evaluation + Send + Sync + 'static) -> Self {
        let f: Arc<dyn Fn() -> Evaluation + Send + Sync> = Arc::new(f);
        Self {
            id: CallbackId::new(),
            f,
        }
    }

    pub fn call(&self) -> Evaluation {
        (self.f)()
    }
}

/// Which of the four registries a callback belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    Checker,
    Validator,
    Resetter,
    Evaluator,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Checker => "checker",
            Self::Validator => "validator",
            Self::Resetter => "resetter",
            Self::Evaluator => "evaluator",
        };
        f.write_str(name)
    }
}

/// A callback tagged with the registry it goes into.
#[derive(Debug, Clone)]
pub enum FieldCallback {
    Checker(Checker),
    Validator(Validator),
    Resetter(Resetter),
    Evaluator(Evaluator),
}

impl FieldCallback {
    pub fn kind(&self) -> RegistryKind {
        match self {
            Self::Checker(_) => RegistryKind::Checker,
            Self::Validator(_) => RegistryKind::Validator,
            Self::Resetter(_) => RegistryKind::Resetter,
            Self::Evaluator(_) => RegistryKind::Evaluator,
        }
    }

    pub fn id(&self) -> CallbackId {
        match self {
            Self::Checker(c) | Self::Validator(c) => c.id(),
            Self::Resetter(c) => c.id(),
            Self::Evaluator(c) => c.id(),
        }
    }
}

/// The four ordered registries owned by a form.
#[derive(Debug, Default)]
pub struct Registries {
    checkers: Vec<Checker>,
    validators: Vec<Validator>,
    resetters: Vec<Resetter>,
    evaluators: Vec<Evaluator>,
}

impl Registries {
    /// Create empty registries
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback to its registry.
    ///
    /// Returns false if a callback with the same id is already registered.
    pub fn register(&mut self, callback: FieldCallback) -> bool {
        match callback {
            FieldCallback::Checker(c) => add(&mut self.checkers, c),
            FieldCallback::Validator(c) => add(&mut self.validators, c),
            FieldCallback::Resetter(c) => add(&mut self.resetters, c),
            FieldCallback::Evaluator(c) => add(&mut self.evaluators, c),
        }
    }

    /// Remove a callback from its registry.
    ///
    /// Returns false if it was not registered.
    pub fn deregister(&mut self, callback: &FieldCallback) -> bool {
        let id = callback.id();
        match callback.kind() {
            RegistryKind::Checker => remove(&mut self.checkers, id),
            RegistryKind::Validator => remove(&mut self.validators, id),
            RegistryKind::Resetter => remove(&mut self.resetters, id),
            RegistryKind::Evaluator => remove(&mut self.evaluators, id),
        }
    }

    /// Check if a callback is registered
    pub fn contains(&self, callback: &FieldCallback) -> bool {
        let id = callback.id();
        match callback.kind() {
            RegistryKind::Checker => self.checkers.iter().any(|c| c.id == id),
            RegistryKind::Validator => self.validators.iter().any(|c| c.id == id),
            RegistryKind::Resetter => self.resetters.iter().any(|c| c.id == id),
            RegistryKind::Evaluator => self.evaluators.iter().any(|c| c.id == id),
        }
    }

    /// Number of callbacks in one registry
    pub fn len(&self, kind: RegistryKind) -> usize {
        match kind {
            RegistryKind::Checker => self.checkers.len(),
            RegistryKind::Validator => self.validators.len(),
            RegistryKind::Resetter => self.resetters.len(),
            RegistryKind::Evaluator => self.evaluators.len(),
        }
    }

    /// True when all four registries are empty
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
            && self.validators.is_empty()
            && self.resetters.is_empty()
            && self.evaluators.is_empty()
    }

    pub fn checkers(&self) -> &[Checker] {
        &self.checkers
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn resetters(&self) -> &[Resetter] {
        &self.resetters
    }

    pub fn evaluators(&self) -> &[Evaluator] {
        &self.evaluators
    }
}

fn add<F: ?Sized>(list: &mut Vec<Callback<F>>, callback: Callback<F>) -> bool {
    if list.iter().any(|c| c.id == callback.id) {
        return false;
    }
    list.push(callback);
    true
}

fn remove<F: ?Sized>(list: &mut Vec<Callback<F>>, id: CallbackId) -> bool {
    match list.iter().position(|c| c.id == id) {
        Some(idx) => {
            list.remove(idx);
            true
        }
        None => false,
    }
}
