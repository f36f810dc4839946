use std::{collections::HashMap,
          io::Write,
          rc::{Rc, Weak}};

use crate::{error::RuntimeError,
            interpreter::{context::{BufferContext, Context},
                          evaluator::ExecResult,
                          runtime::class::{Class, ClassInstance, STR_METHOD}}};

/// A symbol table binding names to value holders.
///
/// One closure represents one lexical scope: the top-level program runs
/// against a single root closure, and every method call gets a fresh one
/// holding `self` plus the formal parameters. Instances reuse the same
/// shape for their field environment.
pub type Closure = HashMap<String, ObjectHolder>;

/// A runtime value of a Krait program.
///
/// Values live on the heap behind `Rc` and are reached through
/// [`ObjectHolder`]s; `None` has no variant here because it is the empty
/// holder. The reference graph is acyclic — instances point at classes and
/// at field values, classes point only at methods and parents — so
/// reference counting is all the memory management the language needs.
#[derive(Debug)]
pub enum Object {
    /// A signed 64-bit integer.
    Number(i64),
    /// A boolean.
    Bool(bool),
    /// An immutable string.
    String(String),
    /// A class declaration.
    Class(Rc<Class>),
    /// An instance of a class, with its mutable field environment.
    Instance(ClassInstance),
}

/// A reference wrapper around a heap value.
///
/// A holder is constructed in one of three modes:
/// - [`own`](Self::own) / [`from_rc`](Self::from_rc) — shares ownership;
///   clones of the holder point at the same value, so mutations are
///   visible through every copy.
/// - [`share`](Self::share) — references a value without contributing to
///   its lifetime. Used for binding `self` during method calls, which
///   keeps an instance that stores itself from ever forming an ownership
///   cycle. A shared holder whose referent has been dropped reads as
///   `None`.
/// - [`none`](Self::none) — the empty holder, the language's `None`.
#[derive(Debug, Clone, Default)]
pub struct ObjectHolder {
    data: Option<HolderData>,
}

#[derive(Debug, Clone)]
enum HolderData {
    Owned(Rc<Object>),
    Shared(Weak<Object>),
}

impl ObjectHolder {
    /// Moves `object` onto the heap and returns a holder owning it.
    #[must_use]
    pub fn own(object: Object) -> Self {
        Self::from_rc(Rc::new(object))
    }

    /// Returns a holder that shares ownership of an existing allocation.
    #[must_use]
    pub fn from_rc(object: Rc<Object>) -> Self {
        Self { data: Some(HolderData::Owned(object)) }
    }

    /// Returns a non-owning holder on `object`.
    #[must_use]
    pub fn share(object: &Rc<Object>) -> Self {
        Self { data: Some(HolderData::Shared(Rc::downgrade(object))) }
    }

    /// Returns the empty holder, representing `None`.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns the referenced value, or `None` for the empty holder (and
    /// for a non-owning holder whose referent is gone).
    #[must_use]
    pub fn get(&self) -> Option<Rc<Object>> {
        match &self.data {
            Some(HolderData::Owned(object)) => Some(Rc::clone(object)),
            Some(HolderData::Shared(object)) => object.upgrade(),
            None => None,
        }
    }

    /// `true` if the holder references a live value.
    #[must_use]
    pub fn is_some(&self) -> bool {
        self.get().is_some()
    }

    /// Returns the numeric payload if the referent is a `Number`.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self.get().as_deref() {
            Some(Object::Number(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the boolean payload if the referent is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.get().as_deref() {
            Some(Object::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns a copy of the payload if the referent is a `String`.
    #[must_use]
    pub fn as_string(&self) -> Option<String> {
        match self.get().as_deref() {
            Some(Object::String(value)) => Some(value.clone()),
            _ => None,
        }
    }
}

/// Decides the truth value of a holder.
///
/// `true` only for nonzero numbers, `True`, and non-empty strings. `None`,
/// classes and every instance are `false`.
#[must_use]
pub fn is_true(object: &ObjectHolder) -> bool {
    match object.get().as_deref() {
        Some(Object::Number(value)) => *value != 0,
        Some(Object::Bool(value)) => *value,
        Some(Object::String(value)) => !value.is_empty(),
        _ => false,
    }
}

/// Writes a holder's printed representation to the context's output.
///
/// Numbers print as decimal digits, strings as their raw bytes, booleans
/// as `True`/`False`, classes as `Class <name>`, and the empty holder as
/// `None`. An instance delegates to its `__str__` method when one with no
/// parameters exists, and otherwise prints its address — a debugging aid
/// with no stable format.
pub fn print_object(object: &ObjectHolder, context: &mut dyn Context) -> ExecResult<()> {
    let Some(value) = object.get() else {
        write!(context.output_stream(), "None").map_err(RuntimeError::from)?;
        return Ok(());
    };

    match &*value {
        Object::Number(n) => write!(context.output_stream(), "{n}"),
        Object::String(s) => write!(context.output_stream(), "{s}"),
        Object::Bool(b) => write!(context.output_stream(), "{}", if *b { "True" } else { "False" }),
        Object::Class(class) => write!(context.output_stream(), "Class {}", class.name()),
        Object::Instance(instance) => {
            if instance.has_method(STR_METHOD, 0) {
                let shown = ClassInstance::call(&value, STR_METHOD, &[], context)?;
                return print_object(&shown, context);
            }
            write!(context.output_stream(), "{:p}", Rc::as_ptr(&value))
        },
    }.map_err(RuntimeError::from)?;

    Ok(())
}

/// Renders a holder to a string through a scratch buffering context.
///
/// This is the engine behind `str(...)`: the value is printed into an
/// in-memory context and the buffer is handed back.
pub fn stringify(object: &ObjectHolder) -> ExecResult<String> {
    let mut scratch = BufferContext::new();
    print_object(object, &mut scratch)?;
    Ok(scratch.contents())
}
