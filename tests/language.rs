use krait::{interpreter::context::BufferContext, run_program};

fn assert_output(source: &str, expected: &str) {
    let mut context = BufferContext::new();
    if let Err(e) = run_program(source, &mut context) {
        panic!("Script failed: {e}\n{source}");
    }
    assert_eq!(context.contents(), expected, "for script:\n{source}");
}

fn assert_failure(source: &str) {
    let mut context = BufferContext::new();
    if run_program(source, &mut context).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{source}")
    }
}

#[test]
fn simple_prints() {
    assert_output(r#"
print 57
print 10, 24, -8
print 'hello'
print "world"
print True, False
print
print None
"#,
                  "57\n10 24 -8\nhello\nworld\nTrue False\n\nNone\n");
}

#[test]
fn assignments_rebind_freely_across_kinds() {
    assert_output(r"
x = 57
print x
x = 'black belt'
print x
y = False
x = y
print x
x = None
print x, y
",
                  "57\nblack belt\nFalse\nNone False\n");
}

#[test]
fn arithmetic_precedence_and_associativity() {
    assert_output("print 1+2+3+4+5, 1*2*3*4*5, 1-2-3-4-5, 36/4/3, 2*5+10/2\n",
                  "15 120 -13 3 15\n");
    assert_output("print 2+3*4, (2+3)*4, 10 - -3\n", "14 20 13\n");
}

#[test]
fn division_truncates_toward_zero() {
    assert_output("print 7/2, -7/2, 7/-2, -7/-2\n", "3 -3 -3 3\n");
}

#[test]
fn string_concatenation() {
    assert_output("print 'ab' + 'cd' + ''\n", "abcd\n");
    assert_output("print str(42) + '!'\n", "42!\n");
}

#[test]
fn variables_are_pointers() {
    assert_output(r"
class Counter:
  def __init__():
    self.value = 0

  def add():
    self.value = self.value + 1

class Dummy:
  def do_add(counter):
    counter.add()

x = Counter()
y = x

x.add()
y.add()

print x.value

d = Dummy()
d.do_add(x)

print y.value
",
                  "2\n3\n");
}

#[test]
fn str_dispatch_and_none_printing() {
    assert_output(r"
class Inner:
  def __init__():
    self.x = 456

  def __str__():
    return str(self.x)

class Outer:
  def __init__():
    self.value = 123
    self.text = 'Abc'
    self.yes = True
    self.no = False
    self.nothing = None
    self.inner = Inner()

  def __str__():
    return str(self.inner) + ' ' + str(self.nothing) + ' ' + str(self.value) + ' ' + str(self.text) + ' ' + str(self.yes) + ' ' + str(self.no)

x = Outer()

print x
",
                  "456 None 123 Abc True False\n");
}

#[test]
fn field_reassignment_across_kinds() {
    assert_output(r#"
class Other:
  def __init__():
    self.x = "Other"

  def __str__():
    return str(self.x)

class Holder:
  def __init__():
    self.value = 0

  def set_value(value):
    self.value = value

  def __str__():
    return str(self.value)

x = Holder()
print x

y = 234
x.set_value(y)
print x

y = Other()
x.set_value(y)
print x

x.set_value("Str")
print x

x.set_value(None)
print x

x.set_value(True)
print x

x.set_value(False)
print x
"#,
                  "0\n234\nOther\nStr\nNone\nTrue\nFalse\n");
}

#[test]
fn self_reference_during_init() {
    assert_output(r"
class X:
  def __init__(p):
    p.x = self

class XHolder:
  def __init__():
    dummy = 0

xh = XHolder()
x = X(xh)
print 'ok'
",
                  "ok\n");
}

#[test]
fn inheritance_dispatches_through_the_instance_class() {
    assert_output(r"
class Animal:
  def sound():
    return 'generic'

  def describe():
    return self.sound()

class Dog(Animal):
  def sound():
    return 'woof'

a = Animal()
d = Dog()
print a.describe()
print d.describe()
",
                  "generic\nwoof\n");
}

#[test]
fn grandparent_methods_stay_reachable() {
    assert_output(r"
class A:
  def who():
    return 'A'

class B(A):
  def other():
    return 0

class C(B):
  def other2():
    return 1

c = C()
print c.who()
",
                  "A\n");
}

#[test]
fn if_else_branches() {
    assert_output(r"
x = 5
if x > 3:
  print 'big'
else:
  print 'small'
if x == 0:
  print 'zero'
",
                  "big\n");
}

#[test]
fn return_unwinds_nested_blocks() {
    assert_output(r"
class Classifier:
  def classify(n):
    if n < 0:
      if n < -100:
        return 'very negative'
      return 'negative'
    return 'non-negative'

c = Classifier()
print c.classify(-500)
print c.classify(-1)
print c.classify(3)
",
                  "very negative\nnegative\nnon-negative\n");
}

#[test]
fn method_without_return_yields_none() {
    assert_output(r"
class Quiet:
  def nothing():
    x = 1

q = Quiet()
print q.nothing()
",
                  "None\n");
}

#[test]
fn or_short_circuits_and_returns_bool() {
    assert_output(r"
class Tracker:
  def __init__():
    self.hits = 0

  def bump():
    self.hits = self.hits + 1
    return True

t = Tracker()
x = True or t.bump()
print x, t.hits
y = 0 or ''
print y, t.hits
",
                  "True 0\nFalse 0\n");
}

#[test]
fn and_evaluates_both_operands() {
    assert_output(r"
class Tracker:
  def __init__():
    self.hits = 0

  def bump():
    self.hits = self.hits + 1
    return True

t = Tracker()
x = False and t.bump()
print x, t.hits
y = t.bump() and 1
print y, t.hits
",
                  "False 1\nTrue 2\n");
}

#[test]
fn not_inverts_truthiness() {
    assert_output("print not 0, not 1, not '', not 'x', not None, not not True\n",
                  "True False True False True True\n");
}

#[test]
fn comparisons_yield_bools() {
    assert_output("print 1 < 2, 2 <= 2, 3 > 4, 3 >= 4, 5 == 5, 5 != 5\n",
                  "True True False False True False\n");
    assert_output("print 'abc' < 'abd', 'a' == 'a', None == None\n",
                  "True True True\n");
}

#[test]
fn dunder_comparisons_dispatch_on_the_left_operand() {
    assert_output(r"
class Money:
  def __init__(amount):
    self.amount = amount

  def __eq__(other):
    return self.amount == other.amount

  def __lt__(other):
    return self.amount < other.amount

a = Money(5)
b = Money(9)
print a < b, a > b, a == b, a != b, a <= b, a >= b
",
                  "True False False True True False\n");
}

#[test]
fn dunder_add_dispatches_on_the_left_operand() {
    assert_output(r"
class Acc:
  def __init__():
    self.total = 0

  def __add__(n):
    self.total = self.total + n
    return self.total

a = Acc()
print a + 3
print a + 4
",
                  "3\n7\n");
}

#[test]
fn instances_are_falsy_in_conditions() {
    assert_output(r"
class Empty:
  def __init__():
    self.x = 0

e = Empty()
if e:
  print 'truthy'
else:
  print 'falsy'
",
                  "falsy\n");
}

#[test]
fn method_call_on_non_instance_yields_none() {
    assert_output("x = 5\nprint x.anything()\n", "None\n");
}

#[test]
fn field_assignment_through_none_is_ignored() {
    assert_output("n = None\nn.x = 5\nprint n\n", "None\n");
}

#[test]
fn comments_are_invisible_to_programs() {
    assert_output(r"
# a program with comments
x = 1  # trailing
print x  # another
",
                  "1\n");
}

#[test]
fn classes_print_by_name() {
    assert_output(r"
class Cat:
  def noop():
    return None

print Cat
",
                  "Class Cat\n");
}

#[test]
fn division_by_zero_is_an_error() {
    assert_failure("print 1 / 0\n");
}

#[test]
fn unknown_variable_is_an_error() {
    assert_failure("print foo\n");
}

#[test]
fn chain_through_non_instance_is_an_error() {
    assert_failure("x = 5\nprint x.y\n");
}

#[test]
fn field_assignment_on_primitive_is_an_error() {
    assert_failure("x = 5\nx.y = 1\n");
}

#[test]
fn wrong_method_arity_is_an_error() {
    assert_failure(r"
class A:
  def m(x):
    return x

a = A()
a.m(1, 2)
");
}

#[test]
fn mixed_kind_arithmetic_is_an_error() {
    assert_failure("print 1 + 'a'\n");
    assert_failure("print 'a' - 'b'\n");
}

#[test]
fn mixed_kind_comparison_is_an_error() {
    assert_failure("print 1 < 'a'\n");
}

#[test]
fn return_at_top_level_is_an_error() {
    assert_failure("return 5\n");
}

#[test]
fn instantiating_an_undeclared_class_is_an_error() {
    assert_failure("x = Ghost()\n");
}

#[test]
fn inheriting_from_an_undeclared_class_is_an_error() {
    assert_failure(r"
class B(Missing):
  def m():
    return 1
");
}

#[test]
fn construction_without_matching_init_leaves_fields_unset() {
    // No __init__ with two parameters exists, so construction skips the
    // initializer and reading the field fails.
    assert_failure(r"
class P:
  def __init__():
    self.x = 1

p = P(1, 2)
print p.x
");
}
