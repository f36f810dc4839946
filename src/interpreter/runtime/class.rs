use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{ast::Statement,
            error::RuntimeError,
            interpreter::{context::Context,
                          evaluator::ExecResult,
                          runtime::object::{Closure, Object, ObjectHolder}}};

/// Initializer method, run by instantiation when its arity matches.
pub const INIT_METHOD: &str = "__init__";
/// Stringification method, used by printing and `str(...)`.
pub const STR_METHOD: &str = "__str__";
/// Equality method, used by `==` when the left operand is an instance.
pub const EQ_METHOD: &str = "__eq__";
/// Ordering method, used by `<` when the left operand is an instance.
pub const LT_METHOD: &str = "__lt__";
/// Addition method, used by `+` when the left operand is an instance.
pub const ADD_METHOD: &str = "__add__";

/// A method of a Krait class.
#[derive(Debug)]
pub struct Method {
    /// The method name.
    pub name:          String,
    /// Names of the formal parameters, in declaration order.
    pub formal_params: Vec<String>,
    /// The method body; a `MethodBody` node, so a `return` anywhere inside
    /// stops here.
    pub body:          Statement,
}

/// A Krait class: a name, its own methods, an optional parent, and the
/// method table used for dispatch.
///
/// All methods are virtual. The table is built at construction by copying
/// the parent's full table and overlaying the class's own methods, so an
/// override wins over any ancestor and grandparent methods stay reachable.
#[derive(Debug)]
pub struct Class {
    name:    String,
    methods: Vec<Rc<Method>>,
    parent:  Option<Rc<Class>>,
    vftable: HashMap<String, Rc<Method>>,
}

impl Class {
    /// Builds a class from its own methods and an optional parent.
    #[must_use]
    pub fn new(name: String, methods: Vec<Method>, parent: Option<Rc<Class>>) -> Self {
        let methods: Vec<Rc<Method>> = methods.into_iter().map(Rc::new).collect();

        let mut vftable = parent.as_ref()
                                .map(|p| p.vftable.clone())
                                .unwrap_or_default();
        for method in &methods {
            vftable.insert(method.name.clone(), Rc::clone(method));
        }

        Self { name, methods, parent, vftable }
    }

    /// Returns the class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent class, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Rc<Class>> {
        self.parent.as_ref()
    }

    /// Looks up a method by name in the dispatch table.
    #[must_use]
    pub fn get_method(&self, name: &str) -> Option<&Rc<Method>> {
        self.vftable.get(name)
    }

    /// Returns the class's own methods, without inherited ones.
    #[must_use]
    pub fn own_methods(&self) -> &[Rc<Method>] {
        &self.methods
    }
}

/// An instance of a Krait class.
///
/// Fields are not declared up front; they spring into existence on first
/// assignment, which is why the field environment is just a [`Closure`]
/// behind interior mutability.
#[derive(Debug)]
pub struct ClassInstance {
    class:  Rc<Class>,
    fields: RefCell<Closure>,
}

impl ClassInstance {
    /// Creates an instance of `class` with no fields.
    #[must_use]
    pub fn new(class: Rc<Class>) -> Self {
        Self { class,
               fields: RefCell::new(Closure::new()) }
    }

    /// Returns the instance's class.
    #[must_use]
    pub fn class(&self) -> &Rc<Class> {
        &self.class
    }

    /// `true` if the class dispatches `method` with exactly
    /// `argument_count` parameters.
    #[must_use]
    pub fn has_method(&self, method: &str, argument_count: usize) -> bool {
        self.class
            .get_method(method)
            .is_some_and(|m| m.formal_params.len() == argument_count)
    }

    /// Reads a field, or `None` if it was never assigned.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<ObjectHolder> {
        self.fields.borrow().get(name).cloned()
    }

    /// Creates or overwrites a field.
    pub fn set_field(&self, name: &str, value: ObjectHolder) {
        self.fields.borrow_mut().insert(name.to_owned(), value);
    }

    /// Invokes `method` on the instance held by `object`.
    ///
    /// `object` must hold an [`Object::Instance`]; the association lets the
    /// call bind `self` as a non-owning holder on the very allocation the
    /// caller sees. The method runs in a fresh closure containing `self`
    /// plus one entry per formal parameter.
    ///
    /// # Errors
    /// Fails with [`RuntimeError::UnknownMethod`] when the class does not
    /// dispatch `method`, and with [`RuntimeError::ArityMismatch`] when the
    /// argument count differs from the parameter count. Errors raised by
    /// the method body propagate.
    pub fn call(object: &Rc<Object>,
                method: &str,
                actual_args: &[ObjectHolder],
                context: &mut dyn Context)
                -> ExecResult<ObjectHolder> {
        let Object::Instance(instance) = &**object else {
            return Err(RuntimeError::UnknownMethod { name: method.to_owned() }.into());
        };

        let Some(method_ptr) = instance.class.get_method(method) else {
            return Err(RuntimeError::UnknownMethod { name: method.to_owned() }.into());
        };
        if method_ptr.formal_params.len() != actual_args.len() {
            return Err(RuntimeError::ArityMismatch { name:     method.to_owned(),
                                                     expected: method_ptr.formal_params.len(),
                                                     found:    actual_args.len(), }.into());
        }

        let mut closure = Closure::new();
        closure.insert("self".to_owned(), ObjectHolder::share(object));
        for (param, value) in method_ptr.formal_params.iter().zip(actual_args) {
            closure.insert(param.clone(), value.clone());
        }

        method_ptr.body.execute(&mut closure, context)
    }
}
