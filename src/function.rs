use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::{Interpreter, Signal};
use crate::object::{Callable, Object};
use crate::stmt::FunctionData;
use crate::token::{Location, Token, Type};

/// A function value closes over the environment active at its declaration,
/// not at its call site. `closure` is captured once and never recreated.
/// `is_initializer` marks a class's `init` method: calling it always yields
/// the bound instance, regardless of what the method body itself returns.
#[derive(Debug, Clone)]
pub struct Function {
    pub declaration: Rc<FunctionData>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(declaration: FunctionData, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function { declaration: Rc::new(declaration), closure, is_initializer }
    }

    /// Returns a copy of this function with a fresh environment, parented at
    /// the original closure, in which `this` is bound to `instance`. Used
    /// both for plain method lookup and for binding a class's constructor.
    pub fn bind(&self, instance: Object) -> Function {
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.closure)))));
        environment.borrow_mut().define("this", instance);
        Function {
            declaration: Rc::clone(&self.declaration),
            closure: environment,
            is_initializer: self.is_initializer,
        }
    }

    fn this_binding(&self) -> Result<Object, RuntimeError> {
        let this = Token::new(Type::This, "this".to_string(), None, Location::new(0, 0));
        self.closure.borrow().get_at(0, &this)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.declaration, &other.declaration) && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let environment = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.closure)))));

        for (param, arg) in self.declaration.params.iter().zip(arguments.into_iter()) {
            environment.borrow_mut().define(&param.lexeme, arg);
        }

        match interpreter.execute_block(&self.declaration.body, environment) {
            Ok(()) if self.is_initializer => self.this_binding(),
            Ok(()) => Ok(Object::nil()),
            Err(Signal::Return(value)) if self.is_initializer => {
                let _ = value;
                self.this_binding()
            }
            Err(Signal::Return(value)) => Ok(value),
            Err(Signal::Error(err)) => Err(err),
        }
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub arity: usize,
    pub function: fn(&mut Interpreter, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.arity == other.arity
    }
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    /// The only native this language exposes, per its non-goals: no stdlib
    /// beyond a clock to drive benchmarks and timing-sensitive tests.
    pub fn globals() -> Vec<NativeFunction> {
        vec![NativeFunction {
            name: Token::new(Type::Identifier, "clock".to_owned(), None, Location::new(0, 0)),
            arity: 0,
            function: |_, _| {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .expect("system clock before the Unix epoch")
                    .as_secs_f64();
                Ok(Object::from(now))
            },
        }]
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn>")
    }
}
