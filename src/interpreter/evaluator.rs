use std::{io::Write, rc::Rc};

use crate::{ast::{Comparator, Statement},
            error::RuntimeError,
            interpreter::{context::Context,
                          runtime::{class::{Class, ClassInstance, ADD_METHOD, INIT_METHOD},
                                    compare,
                                    object::{is_true, print_object, stringify, Closure, Object,
                                             ObjectHolder}}}};

/// Non-local exits of the evaluator.
///
/// Both `return` and a fatal error travel through the `Err` channel so
/// that `?` unwinds arbitrarily nested blocks. Only the `MethodBody` node
/// intercepts [`Interrupt::Return`]; everything else passes it upward
/// untouched. This is control flow, not an error type — a `Return` that
/// reaches the top level is turned into a runtime error there.
#[derive(Debug)]
pub enum Interrupt {
    /// A `return` statement, carrying the method's result.
    Return(ObjectHolder),
    /// A fatal runtime error; aborts the program.
    Error(RuntimeError),
}

impl From<RuntimeError> for Interrupt {
    fn from(e: RuntimeError) -> Self {
        Self::Error(e)
    }
}

/// Result type used by the evaluator.
pub type ExecResult<T = ObjectHolder> = Result<T, Interrupt>;

impl Statement {
    /// Evaluates the node against `closure` and `context`.
    ///
    /// Expressions yield their value; statements yield `None`. The closure
    /// is written by `Assignment` and `ClassDefinition`, the context by
    /// `Print`; everything else only reads.
    ///
    /// # Errors
    /// Any [`RuntimeError`] arising in this node or a child, or an
    /// [`Interrupt::Return`] travelling towards the enclosing method body.
    pub fn execute(&self, closure: &mut Closure, context: &mut dyn Context) -> ExecResult {
        match self {
            Self::NumericConst(value) => Ok(ObjectHolder::own(Object::Number(*value))),
            Self::StringConst(value) => Ok(ObjectHolder::own(Object::String(value.clone()))),
            Self::BoolConst(value) => Ok(ObjectHolder::own(Object::Bool(*value))),
            Self::NoneConst => Ok(ObjectHolder::none()),
            Self::VariableValue { dotted_ids } => lookup_chain(dotted_ids, closure),
            Self::MethodCall { object, method, args } => {
                exec_method_call(object, method, args, closure, context)
            },
            Self::NewInstance { class, args } => exec_new_instance(class, args, closure, context),
            Self::Stringify(argument) => {
                let value = argument.execute(closure, context)?;
                Ok(ObjectHolder::own(Object::String(stringify(&value)?)))
            },
            Self::Add { lhs, rhs } => exec_add(lhs, rhs, closure, context),
            Self::Sub { lhs, rhs } => {
                exec_numeric(lhs, rhs, closure, context, "subtraction", i64::checked_sub)
            },
            Self::Mult { lhs, rhs } => {
                exec_numeric(lhs, rhs, closure, context, "multiplication", i64::checked_mul)
            },
            Self::Div { lhs, rhs } => exec_div(lhs, rhs, closure, context),
            Self::Or { lhs, rhs } => {
                // Short-circuits, and deliberately yields a fresh Bool
                // rather than the operand itself.
                let result = is_true(&lhs.execute(closure, context)?)
                             || is_true(&rhs.execute(closure, context)?);
                Ok(ObjectHolder::own(Object::Bool(result)))
            },
            Self::And { lhs, rhs } => {
                // Both operands are evaluated unconditionally.
                let left = is_true(&lhs.execute(closure, context)?);
                let right = is_true(&rhs.execute(closure, context)?);
                Ok(ObjectHolder::own(Object::Bool(left && right)))
            },
            Self::Not(argument) => {
                let value = argument.execute(closure, context)?;
                Ok(ObjectHolder::own(Object::Bool(!is_true(&value))))
            },
            Self::Comparison { cmp, lhs, rhs } => {
                let left = lhs.execute(closure, context)?;
                let right = rhs.execute(closure, context)?;
                let result = match cmp {
                    Comparator::Equal => compare::equal(&left, &right, context)?,
                    Comparator::NotEqual => compare::not_equal(&left, &right, context)?,
                    Comparator::Less => compare::less(&left, &right, context)?,
                    Comparator::Greater => compare::greater(&left, &right, context)?,
                    Comparator::LessOrEqual => compare::less_or_equal(&left, &right, context)?,
                    Comparator::GreaterOrEqual => {
                        compare::greater_or_equal(&left, &right, context)?
                    },
                };
                Ok(ObjectHolder::own(Object::Bool(result)))
            },
            Self::Assignment { var, rv } => {
                let value = rv.execute(closure, context)?;
                closure.insert(var.clone(), value.clone());
                Ok(value)
            },
            Self::FieldAssignment { object, field_name, rv } => {
                exec_field_assignment(object, field_name, rv, closure, context)
            },
            Self::Print { args } => exec_print(args, closure, context),
            Self::Return { statement } => {
                let value = match statement {
                    Some(statement) => statement.execute(closure, context)?,
                    None => ObjectHolder::none(),
                };
                Err(Interrupt::Return(value))
            },
            Self::IfElse { condition, if_body, else_body } => {
                let condition = condition.execute(closure, context)?;
                if is_true(&condition) {
                    if_body.execute(closure, context)
                } else if let Some(else_body) = else_body {
                    else_body.execute(closure, context)
                } else {
                    Ok(ObjectHolder::none())
                }
            },
            Self::Compound { statements } => {
                for statement in statements {
                    statement.execute(closure, context)?;
                }
                Ok(ObjectHolder::none())
            },
            Self::ClassDefinition { class } => {
                closure.insert(class.name().to_owned(),
                               ObjectHolder::own(Object::Class(Rc::clone(class))));
                Ok(ObjectHolder::none())
            },
            Self::MethodBody { body } => match body.execute(closure, context) {
                Ok(_) => Ok(ObjectHolder::none()),
                Err(Interrupt::Return(value)) => Ok(value),
                Err(e) => Err(e),
            },
        }
    }
}

/// Resolves a dotted identifier chain.
///
/// The first element must be bound in the closure; every further element
/// requires the value so far to be an instance and reads one of its
/// fields.
fn lookup_chain(dotted_ids: &[String], closure: &mut Closure) -> ExecResult {
    let mut ids = dotted_ids.iter();
    let Some(first) = ids.next() else {
        return Err(RuntimeError::UnknownVariable { name: String::new() }.into());
    };

    let mut result = closure.get(first)
                            .cloned()
                            .ok_or_else(|| RuntimeError::UnknownVariable { name: first.clone() })?;

    let mut path = first.clone();
    for id in ids {
        let value = result.get();
        let Some(Object::Instance(instance)) = value.as_deref() else {
            return Err(RuntimeError::NotAnObject { name: path }.into());
        };
        result = instance.get_field(id)
                         .ok_or_else(|| RuntimeError::UnknownVariable { name: format!("{path}.{id}") })?;
        path.push('.');
        path.push_str(id);
    }

    Ok(result)
}

fn exec_method_call(object: &Statement,
                    method: &str,
                    args: &[Statement],
                    closure: &mut Closure,
                    context: &mut dyn Context)
                    -> ExecResult {
    let target = object.execute(closure, context)?;
    let Some(target) = target.get() else {
        return Ok(ObjectHolder::none());
    };
    if !matches!(&*target, Object::Instance(_)) {
        return Ok(ObjectHolder::none());
    }

    let actual_args = eval_args(args, closure, context)?;
    ClassInstance::call(&target, method, &actual_args, context)
}

fn exec_new_instance(class: &Rc<Class>,
                     args: &[Statement],
                     closure: &mut Closure,
                     context: &mut dyn Context)
                     -> ExecResult {
    let instance = Rc::new(Object::Instance(ClassInstance::new(Rc::clone(class))));

    let runs_init = match &*instance {
        Object::Instance(i) => i.has_method(INIT_METHOD, args.len()),
        _ => false,
    };
    if runs_init {
        let actual_args = eval_args(args, closure, context)?;
        ClassInstance::call(&instance, INIT_METHOD, &actual_args, context)?;
    }

    Ok(ObjectHolder::from_rc(instance))
}

fn exec_field_assignment(object: &Statement,
                         field_name: &str,
                         rv: &Statement,
                         closure: &mut Closure,
                         context: &mut dyn Context)
                         -> ExecResult {
    let target = object.execute(closure, context)?;
    let Some(target) = target.get() else {
        // Assigning through None is silently ignored.
        return Ok(ObjectHolder::none());
    };
    let Object::Instance(instance) = &*target else {
        return Err(RuntimeError::FieldOnNonObject.into());
    };

    let value = rv.execute(closure, context)?;
    instance.set_field(field_name, value.clone());
    Ok(value)
}

fn exec_print(args: &[Statement],
              closure: &mut Closure,
              context: &mut dyn Context)
              -> ExecResult {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(context.output_stream(), " ").map_err(RuntimeError::from)?;
        }
        let value = arg.execute(closure, context)?;
        print_object(&value, context)?;
    }
    writeln!(context.output_stream()).map_err(RuntimeError::from)?;
    Ok(ObjectHolder::none())
}

fn exec_add(lhs: &Statement,
            rhs: &Statement,
            closure: &mut Closure,
            context: &mut dyn Context)
            -> ExecResult {
    let left = lhs.execute(closure, context)?;
    let right = rhs.execute(closure, context)?;

    if let (Some(l), Some(r)) = (left.as_number(), right.as_number()) {
        let sum = l.checked_add(r).ok_or(RuntimeError::Overflow)?;
        return Ok(ObjectHolder::own(Object::Number(sum)));
    }
    if let (Some(l), Some(r)) = (left.as_string(), right.as_string()) {
        return Ok(ObjectHolder::own(Object::String(l + &r)));
    }
    if let Some(object) = left.get()
        && let Object::Instance(instance) = &*object
        && instance.has_method(ADD_METHOD, 1)
    {
        return ClassInstance::call(&object, ADD_METHOD, &[right], context);
    }

    Err(RuntimeError::UnsupportedOperands { operation: "addition" }.into())
}

/// Evaluates a numbers-only binary operator with a checked kernel.
fn exec_numeric(lhs: &Statement,
                rhs: &Statement,
                closure: &mut Closure,
                context: &mut dyn Context,
                operation: &'static str,
                kernel: fn(i64, i64) -> Option<i64>)
                -> ExecResult {
    let left = lhs.execute(closure, context)?;
    let right = rhs.execute(closure, context)?;

    let (Some(l), Some(r)) = (left.as_number(), right.as_number()) else {
        return Err(RuntimeError::UnsupportedOperands { operation }.into());
    };
    let result = kernel(l, r).ok_or(RuntimeError::Overflow)?;
    Ok(ObjectHolder::own(Object::Number(result)))
}

fn exec_div(lhs: &Statement,
            rhs: &Statement,
            closure: &mut Closure,
            context: &mut dyn Context)
            -> ExecResult {
    let left = lhs.execute(closure, context)?;
    let right = rhs.execute(closure, context)?;

    let (Some(l), Some(r)) = (left.as_number(), right.as_number()) else {
        return Err(RuntimeError::UnsupportedOperands { operation: "division" }.into());
    };
    if r == 0 {
        return Err(RuntimeError::DivisionByZero.into());
    }
    // Truncates toward zero; i64::MIN / -1 is the one remaining overflow.
    let result = l.checked_div(r).ok_or(RuntimeError::Overflow)?;
    Ok(ObjectHolder::own(Object::Number(result)))
}

fn eval_args(args: &[Statement],
             closure: &mut Closure,
             context: &mut dyn Context)
             -> ExecResult<Vec<ObjectHolder>> {
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(arg.execute(closure, context)?);
    }
    Ok(values)
}
