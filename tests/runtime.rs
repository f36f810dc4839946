use std::rc::Rc;

use krait::{ast::Statement,
            interpreter::{context::BufferContext,
                          evaluator::Interrupt,
                          runtime::{class::{Class, ClassInstance, Method},
                                    compare,
                                    object::{is_true, print_object, stringify, Object,
                                             ObjectHolder}}}};

fn number(value: i64) -> ObjectHolder {
    ObjectHolder::own(Object::Number(value))
}

fn string(value: &str) -> ObjectHolder {
    ObjectHolder::own(Object::String(value.to_owned()))
}

fn boolean(value: bool) -> ObjectHolder {
    ObjectHolder::own(Object::Bool(value))
}

/// A method whose body immediately returns the given expression.
fn returning(name: &str, formal_params: &[&str], result: Statement) -> Method {
    Method { name:          name.to_owned(),
             formal_params: formal_params.iter().map(|p| (*p).to_owned()).collect(),
             body:          Statement::MethodBody { body: Box::new(Statement::Return {
                                statement: Some(Box::new(result)),
                            }) }, }
}

fn instance_of(class: &Rc<Class>) -> Rc<Object> {
    Rc::new(Object::Instance(ClassInstance::new(Rc::clone(class))))
}

#[test]
fn owning_holders_share_their_referent() {
    let class = Rc::new(Class::new("Box".to_owned(), Vec::new(), None));
    let first = ObjectHolder::from_rc(instance_of(&class));
    let second = first.clone();

    let Some(object) = first.get() else {
        panic!("owning holder must dereference")
    };
    let Object::Instance(instance) = &*object else {
        panic!("expected an instance")
    };
    assert!(Rc::ptr_eq(instance.class(), &class));
    instance.set_field("value", number(7));

    let Some(via_second) = second.get() else {
        panic!("clone must dereference")
    };
    let Object::Instance(seen) = &*via_second else {
        panic!("expected an instance")
    };
    assert_eq!(seen.get_field("value").and_then(|v| v.as_number()), Some(7));
}

#[test]
fn empty_holder_is_none() {
    let holder = ObjectHolder::none();
    assert!(!holder.is_some());
    assert!(holder.get().is_none());
    assert!(!is_true(&holder));
}

#[test]
fn shared_holder_does_not_keep_its_referent_alive() {
    let class = Rc::new(Class::new("Box".to_owned(), Vec::new(), None));
    let owner = instance_of(&class);
    let shared = ObjectHolder::share(&owner);

    assert!(shared.is_some());
    drop(owner);
    assert!(!shared.is_some());
    assert!(shared.get().is_none());
}

#[test]
fn truthiness_matches_value_kinds() {
    assert!(is_true(&number(1)));
    assert!(is_true(&number(-1)));
    assert!(!is_true(&number(0)));
    assert!(is_true(&boolean(true)));
    assert!(!is_true(&boolean(false)));
    assert!(is_true(&string("x")));
    assert!(!is_true(&string("")));

    let class = Rc::new(Class::new("Box".to_owned(), Vec::new(), None));
    assert!(!is_true(&ObjectHolder::own(Object::Class(Rc::clone(&class)))));
    assert!(!is_true(&ObjectHolder::from_rc(instance_of(&class))));
}

#[test]
fn primitives_compare_by_value() {
    let mut context = BufferContext::new();

    assert!(compare::equal(&number(5), &number(5), &mut context).unwrap());
    assert!(!compare::equal(&number(5), &number(6), &mut context).unwrap());
    assert!(compare::equal(&string("ab"), &string("ab"), &mut context).unwrap());
    assert!(compare::equal(&boolean(true), &boolean(true), &mut context).unwrap());
    assert!(compare::equal(&ObjectHolder::none(), &ObjectHolder::none(), &mut context).unwrap());

    assert!(compare::less(&number(3), &number(5), &mut context).unwrap());
    assert!(!compare::less(&number(5), &number(5), &mut context).unwrap());
    assert!(compare::less(&string("abc"), &string("abd"), &mut context).unwrap());
    assert!(compare::less(&boolean(false), &boolean(true), &mut context).unwrap());
}

#[test]
fn derived_comparators_follow_equal_and_less() {
    let mut context = BufferContext::new();

    assert!(compare::not_equal(&number(1), &number(2), &mut context).unwrap());
    assert!(compare::greater(&number(2), &number(1), &mut context).unwrap());
    assert!(compare::less_or_equal(&number(2), &number(2), &mut context).unwrap());
    assert!(compare::greater_or_equal(&number(2), &number(2), &mut context).unwrap());
}

#[test]
fn mismatched_primitive_kinds_do_not_compare() {
    let mut context = BufferContext::new();

    assert!(matches!(compare::equal(&number(1), &string("1"), &mut context),
                     Err(Interrupt::Error(_))));
    assert!(matches!(compare::less(&boolean(true), &number(1), &mut context),
                     Err(Interrupt::Error(_))));
    assert!(matches!(compare::equal(&number(1), &ObjectHolder::none(), &mut context),
                     Err(Interrupt::Error(_))));
}

#[test]
fn instances_compare_through_dunder_methods() {
    let class = Rc::new(Class::new("Always".to_owned(),
                                   vec![returning("__eq__", &["other"],
                                                  Statement::BoolConst(true)),
                                        returning("__lt__", &["other"],
                                                  Statement::BoolConst(false))],
                                   None));
    let object = ObjectHolder::from_rc(instance_of(&class));
    let mut context = BufferContext::new();

    assert!(compare::equal(&object, &number(42), &mut context).unwrap());
    assert!(!compare::less(&object, &number(42), &mut context).unwrap());
    // Greater derives from the two dunder calls: not (less or equal).
    assert!(!compare::greater(&object, &number(42), &mut context).unwrap());
}

#[test]
fn dunder_comparison_must_return_bool() {
    let class = Rc::new(Class::new("Odd".to_owned(),
                                   vec![returning("__eq__", &["other"],
                                                  Statement::NumericConst(1))],
                                   None));
    let object = ObjectHolder::from_rc(instance_of(&class));
    let mut context = BufferContext::new();

    assert!(matches!(compare::equal(&object, &number(1), &mut context),
                     Err(Interrupt::Error(_))));
}

#[test]
fn vtable_overlays_own_methods_over_parents() {
    let parent = Rc::new(Class::new("Base".to_owned(),
                                    vec![returning("greet", &[],
                                                   Statement::StringConst("base".to_owned())),
                                         returning("only_base", &[],
                                                   Statement::NumericConst(1))],
                                    None));
    let child = Rc::new(Class::new("Derived".to_owned(),
                                   vec![returning("greet", &[],
                                                  Statement::StringConst("derived".to_owned()))],
                                   Some(Rc::clone(&parent))));
    // No own methods: everything must flow down from the ancestors.
    let grandchild = Rc::new(Class::new("Leaf".to_owned(),
                                        Vec::new(),
                                        Some(Rc::clone(&child))));

    assert!(parent.get_method("greet").is_some());
    assert!(child.get_method("only_base").is_some());
    assert!(grandchild.get_method("greet").is_some());
    assert!(grandchild.get_method("only_base").is_some());
    assert!(grandchild.get_method("missing").is_none());

    // The table flattens inheritance; the own-method lists do not.
    assert_eq!(parent.own_methods().len(), 2);
    assert_eq!(child.own_methods().len(), 1);
    assert!(grandchild.own_methods().is_empty());
    assert!(parent.parent().is_none());
    assert!(grandchild.parent().is_some_and(|p| Rc::ptr_eq(p, &child)));

    let mut context = BufferContext::new();
    let object = instance_of(&grandchild);
    let result = ClassInstance::call(&object, "greet", &[], &mut context).unwrap();
    assert_eq!(result.as_string().as_deref(), Some("derived"));
}

#[test]
fn calls_check_name_and_arity() {
    let class = Rc::new(Class::new("One".to_owned(),
                                   vec![returning("id", &["x"],
                                                  Statement::VariableValue {
                                                      dotted_ids: vec!["x".to_owned()],
                                                  })],
                                   None));
    let object = instance_of(&class);
    let mut context = BufferContext::new();

    let result = ClassInstance::call(&object, "id", &[number(9)], &mut context).unwrap();
    assert_eq!(result.as_number(), Some(9));

    assert!(matches!(ClassInstance::call(&object, "id", &[], &mut context),
                     Err(Interrupt::Error(_))));
    assert!(matches!(ClassInstance::call(&object, "absent", &[], &mut context),
                     Err(Interrupt::Error(_))));
}

#[test]
fn printing_follows_the_value_kind() {
    let mut context = BufferContext::new();
    print_object(&number(-3), &mut context).unwrap();
    print_object(&string(" abc "), &mut context).unwrap();
    print_object(&boolean(true), &mut context).unwrap();
    print_object(&boolean(false), &mut context).unwrap();
    print_object(&ObjectHolder::none(), &mut context).unwrap();

    let class = Rc::new(Class::new("Pt".to_owned(), Vec::new(), None));
    print_object(&ObjectHolder::own(Object::Class(class)), &mut context).unwrap();

    assert_eq!(context.contents(), "-3 abc TrueFalseNoneClass Pt");
}

#[test]
fn instances_print_through_str_when_present() {
    let class = Rc::new(Class::new("Named".to_owned(),
                                   vec![returning("__str__", &[],
                                                  Statement::StringConst("a named one".to_owned()))],
                                   None));
    let object = ObjectHolder::from_rc(instance_of(&class));

    assert_eq!(stringify(&object).unwrap(), "a named one");
}

#[test]
fn stringify_renders_primitives_and_none() {
    assert_eq!(stringify(&number(457)).unwrap(), "457");
    assert_eq!(stringify(&string("in plain sight")).unwrap(), "in plain sight");
    assert_eq!(stringify(&boolean(false)).unwrap(), "False");
    assert_eq!(stringify(&ObjectHolder::none()).unwrap(), "None");
}
