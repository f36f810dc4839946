//! Value comparison.
//!
//! Primitives of the same kind compare natively; a mismatched primitive
//! pair never falls through to dunder dispatch and fails instead. When the
//! left operand is an instance, `==` and `<` defer to `__eq__` / `__lt__`
//! with one parameter, and the result is required to be a boolean. All
//! remaining comparators derive from these two.

use crate::{error::RuntimeError,
            interpreter::{context::Context,
                          evaluator::ExecResult,
                          runtime::{class::{ClassInstance, EQ_METHOD, LT_METHOD},
                                    object::{Object, ObjectHolder}}}};

/// `lhs == rhs`.
///
/// Two `None` values are equal. Same-kind primitives compare by value; an
/// instance with a one-parameter `__eq__` decides for itself.
///
/// # Errors
/// Fails with [`RuntimeError::Incomparable`] when no rule applies, and
/// with [`RuntimeError::ExpectedBoolean`] when `__eq__` returns a
/// non-boolean.
pub fn equal(lhs: &ObjectHolder,
             rhs: &ObjectHolder,
             context: &mut dyn Context)
             -> ExecResult<bool> {
    let (left, right) = match (lhs.get(), rhs.get()) {
        (None, None) => return Ok(true),
        (Some(left), Some(right)) => (left, right),
        _ => return dunder_compare(lhs, rhs, EQ_METHOD, context),
    };

    match (&*left, &*right) {
        (Object::Number(l), Object::Number(r)) => Ok(l == r),
        (Object::String(l), Object::String(r)) => Ok(l == r),
        (Object::Bool(l), Object::Bool(r)) => Ok(l == r),
        _ => dunder_compare(lhs, rhs, EQ_METHOD, context),
    }
}

/// `lhs < rhs`.
///
/// Same-kind primitives compare by the native `<`; an instance with a
/// one-parameter `__lt__` decides for itself.
///
/// # Errors
/// Fails with [`RuntimeError::Incomparable`] when no rule applies, and
/// with [`RuntimeError::ExpectedBoolean`] when `__lt__` returns a
/// non-boolean.
pub fn less(lhs: &ObjectHolder,
            rhs: &ObjectHolder,
            context: &mut dyn Context)
            -> ExecResult<bool> {
    if let (Some(left), Some(right)) = (lhs.get(), rhs.get()) {
        match (&*left, &*right) {
            (Object::Number(l), Object::Number(r)) => return Ok(l < r),
            (Object::String(l), Object::String(r)) => return Ok(l < r),
            (Object::Bool(l), Object::Bool(r)) => return Ok(l < r),
            _ => {},
        }
    }
    dunder_compare(lhs, rhs, LT_METHOD, context)
}

/// `lhs != rhs`; the negation of [`equal`].
pub fn not_equal(lhs: &ObjectHolder,
                 rhs: &ObjectHolder,
                 context: &mut dyn Context)
                 -> ExecResult<bool> {
    Ok(!equal(lhs, rhs, context)?)
}

/// `lhs > rhs`, derived as neither less nor equal.
pub fn greater(lhs: &ObjectHolder,
               rhs: &ObjectHolder,
               context: &mut dyn Context)
               -> ExecResult<bool> {
    Ok(!(less(lhs, rhs, context)? || equal(lhs, rhs, context)?))
}

/// `lhs <= rhs`, derived as less or equal.
pub fn less_or_equal(lhs: &ObjectHolder,
                     rhs: &ObjectHolder,
                     context: &mut dyn Context)
                     -> ExecResult<bool> {
    Ok(less(lhs, rhs, context)? || equal(lhs, rhs, context)?)
}

/// `lhs >= rhs`; the negation of [`less`].
pub fn greater_or_equal(lhs: &ObjectHolder,
                        rhs: &ObjectHolder,
                        context: &mut dyn Context)
                        -> ExecResult<bool> {
    Ok(!less(lhs, rhs, context)?)
}

/// Defers a comparison to a dunder method on the left operand.
fn dunder_compare(lhs: &ObjectHolder,
                  rhs: &ObjectHolder,
                  method: &'static str,
                  context: &mut dyn Context)
                  -> ExecResult<bool> {
    if let Some(left) = lhs.get()
        && let Object::Instance(instance) = &*left
        && instance.has_method(method, 1)
    {
        let result = ClassInstance::call(&left, method, &[rhs.clone()], context)?;
        return result.as_bool()
                     .ok_or_else(|| RuntimeError::ExpectedBoolean { method }.into());
    }

    Err(RuntimeError::Incomparable.into())
}
