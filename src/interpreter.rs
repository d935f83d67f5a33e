use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::environment::Environment;
use crate::error::{Error, RuntimeError};
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, GetData, GroupingData, LogicalData,
    SetData, ThisData, UnaryData, VariableData,
};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{
    BlockData, ClassData, ExpressionData, FunctionData, IfData, PrintData, ReturnData, Stmt,
    StmtVisitor, VarData, WhileData,
};
use crate::token::{Token, Type};

/// Non-local control flow produced while executing a statement: either a
/// runtime error, or a `return` unwinding back to the enclosing call. Both
/// are absorbed at the function-call boundary (see `Function::call`); a
/// `Return` that escapes all the way out of `interpret` would mean the
/// resolver failed to reject `return` outside a function.
pub enum Signal {
    Error(RuntimeError),
    Return(Object),
}

impl From<RuntimeError> for Signal {
    fn from(err: RuntimeError) -> Self {
        Signal::Error(err)
    }
}

pub type ExecResult = Result<(), Signal>;

pub struct Interpreter<'out> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<u64, usize>,
    out: &'out mut dyn Write,
}

impl<'out> Interpreter<'out> {
    pub fn new(out: &'out mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));
        for native in NativeFunction::globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter { environment: Rc::clone(&globals), globals, locals: HashMap::new(), out }
    }

    /// Records the lexical hop count the resolver computed for a `Variable`,
    /// `Assign` or `This` node, keyed by its synthetic node id.
    pub fn resolve(&mut self, id: u64, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Executes a whole program top to bottom, stopping at the first runtime
    /// error. Returns whether a runtime error occurred, for the driver's
    /// exit-code decision.
    pub fn interpret(&mut self, statements: &[Stmt]) -> bool {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {}
                Err(Signal::Error(err)) => {
                    err.report();
                    return true;
                }
                Err(Signal::Return(_)) => {
                    unreachable!("resolver guarantees return only appears inside a function")
                }
            }
        }
        false
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        expr.accept(self)
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        stmt.accept(self)
    }

    /// Runs `statements` under `environment`, restoring the previous
    /// environment afterward even if execution unwinds early via an error
    /// or a `return`. Shared between block statements and function calls.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            if let Err(signal) = self.execute(statement) {
                result = Err(signal);
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn lookup_variable(&self, id: u64, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(&distance) = self.locals.get(&id) {
            self.environment.borrow().get_at(distance, name)
        } else {
            self.globals.borrow().get(name)
        }
    }

    fn assign_variable(&mut self, id: u64, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if let Some(&distance) = self.locals.get(&id) {
            self.environment.borrow_mut().assign_at(distance, name, value);
            Ok(())
        } else {
            self.globals.borrow_mut().assign(name, value)
        }
    }

    fn numbers_error(&self, operator: &Token) -> RuntimeError {
        RuntimeError { token: operator.clone(), message: "Operands must be numbers.".to_string() }
    }

    fn compare(&self, operator: &Token, left: Object, right: Object, test: impl Fn(Ordering) -> bool) -> Result<Object, RuntimeError> {
        left.partial_cmp(&right).map(|ordering| Object::from(test(ordering))).ok_or_else(|| self.numbers_error(operator))
    }

    fn check_arity(&self, paren: &Token, arity: usize, got: usize) -> Result<(), RuntimeError> {
        if arity != got {
            Err(RuntimeError { token: paren.clone(), message: format!("Expected {arity} arguments but got {got}.") })
        } else {
            Ok(())
        }
    }

    fn instantiate(&mut self, paren: &Token, class: Rc<Class>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(&class))));
        let instance_object = Object::from(Rc::clone(&instance));

        if let Some(initializer) = class.find_method("init") {
            let bound = initializer.bind(instance_object.clone());
            self.check_arity(paren, bound.arity(), arguments.len())?;
            bound.call(self, arguments)?;
        } else {
            self.check_arity(paren, 0, arguments.len())?;
        }

        Ok(instance_object)
    }
}

impl<'out> ExprVisitor<Result<Object, RuntimeError>> for Interpreter<'out> {
    fn visit_assign_expr(&mut self, data: &AssignData) -> Result<Object, RuntimeError> {
        let value = self.evaluate(&data.value)?;
        self.assign_variable(data.id, &data.name, value.clone())?;
        Ok(value)
    }

    fn visit_binary_expr(&mut self, data: &BinaryData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;

        match data.operator.r#type {
            Type::Minus => (left - right).ok_or_else(|| self.numbers_error(&data.operator)),
            Type::Slash => (left / right).ok_or_else(|| self.numbers_error(&data.operator)),
            Type::Star => (left * right).ok_or_else(|| self.numbers_error(&data.operator)),
            Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: data.operator.clone(),
                message: "Operands must be two numbers or two strings.".to_string(),
            }),
            Type::Greater => self.compare(&data.operator, left, right, |o| o == Ordering::Greater),
            Type::GreaterEqual => self.compare(&data.operator, left, right, |o| o != Ordering::Less),
            Type::Less => self.compare(&data.operator, left, right, |o| o == Ordering::Less),
            Type::LessEqual => self.compare(&data.operator, left, right, |o| o != Ordering::Greater),
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            other => unreachable!("{other:?} is not a binary operator"),
        }
    }

    fn visit_call_expr(&mut self, data: &CallData) -> Result<Object, RuntimeError> {
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        match callee {
            Object::Function(function) => {
                self.check_arity(&data.paren, function.arity(), arguments.len())?;
                function.call(self, arguments)
            }
            Object::NativeFunction(native) => {
                self.check_arity(&data.paren, native.arity(), arguments.len())?;
                native.call(self, arguments)
            }
            Object::Class(class) => self.instantiate(&data.paren, class, arguments),
            _ => Err(RuntimeError {
                token: data.paren.clone(),
                message: "Can only call functions and classes.".to_string(),
            }),
        }
    }

    fn visit_get_expr(&mut self, data: &GetData) -> Result<Object, RuntimeError> {
        let object = self.evaluate(&data.object)?;
        match object {
            Object::Instance(ref instance) => instance.borrow().get(&data.name, &object),
            _ => Err(RuntimeError {
                token: data.name.clone(),
                message: "Only instances have properties.".to_string(),
            }),
        }
    }

    fn visit_grouping_expr(&mut self, data: &GroupingData) -> Result<Object, RuntimeError> {
        self.evaluate(&data.expr)
    }

    fn visit_literal_expr(&mut self, data: &Literal) -> Result<Object, RuntimeError> {
        Ok(Object::Literal(data.clone()))
    }

    fn visit_logical_expr(&mut self, data: &LogicalData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;
        let truthy = left.as_bool().unwrap_or(true);

        if data.operator.r#type == Type::Or {
            if truthy {
                return Ok(left);
            }
        } else if !truthy {
            return Ok(left);
        }

        self.evaluate(&data.right)
    }

    fn visit_set_expr(&mut self, data: &SetData) -> Result<Object, RuntimeError> {
        let object = self.evaluate(&data.object)?;
        let instance = match object {
            Object::Instance(ref instance) => Rc::clone(instance),
            _ => {
                return Err(RuntimeError {
                    token: data.name.clone(),
                    message: "Only instances have fields.".to_string(),
                })
            }
        };

        let value = self.evaluate(&data.value)?;
        instance.borrow_mut().set(&data.name, value.clone());
        Ok(value)
    }

    fn visit_this_expr(&mut self, data: &ThisData) -> Result<Object, RuntimeError> {
        self.lookup_variable(data.id, &data.keyword)
    }

    fn visit_unary_expr(&mut self, data: &UnaryData) -> Result<Object, RuntimeError> {
        let right = self.evaluate(&data.expr)?;
        match data.operator.r#type {
            Type::Minus => (-right).ok_or_else(|| self.numbers_error(&data.operator)),
            Type::Bang => Ok((!right).expect("logical not is defined for every object")),
            other => unreachable!("{other:?} is not a unary operator"),
        }
    }

    fn visit_variable_expr(&mut self, data: &VariableData) -> Result<Object, RuntimeError> {
        self.lookup_variable(data.id, &data.name)
    }
}

impl<'out> StmtVisitor<ExecResult> for Interpreter<'out> {
    fn visit_block_stmt(&mut self, data: &BlockData) -> ExecResult {
        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_class_stmt(&mut self, data: &ClassData) -> ExecResult {
        self.environment.borrow_mut().define(&data.name.lexeme, Object::nil());

        let mut methods = HashMap::new();
        for method in &data.methods {
            if let Stmt::Function(declaration) = method {
                let is_initializer = declaration.name.lexeme == "init";
                let function = Function::new(declaration.clone(), Rc::clone(&self.environment), is_initializer);
                methods.insert(declaration.name.lexeme.clone(), function);
            }
        }

        let class = Rc::new(Class::new(data.name.lexeme.clone(), methods));
        self.environment.borrow_mut().assign(&data.name, Object::from(class))?;
        Ok(())
    }

    fn visit_expression_stmt(&mut self, data: &ExpressionData) -> ExecResult {
        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_function_stmt(&mut self, data: &FunctionData) -> ExecResult {
        let function = Function::new(data.clone(), Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
        Ok(())
    }

    fn visit_if_stmt(&mut self, data: &IfData) -> ExecResult {
        let condition = self.evaluate(&data.condition)?;
        if condition.as_bool().unwrap_or(true) {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_print_stmt(&mut self, data: &PrintData) -> ExecResult {
        let value = self.evaluate(&data.expr)?;
        writeln!(self.out, "{value}").expect("writing to the output sink never fails");
        Ok(())
    }

    fn visit_return_stmt(&mut self, data: &ReturnData) -> ExecResult {
        let value = match &data.value {
            Some(expr) => self.evaluate(expr)?,
            None => Object::nil(),
        };
        Err(Signal::Return(value))
    }

    fn visit_var_stmt(&mut self, data: &VarData) -> ExecResult {
        let value = match &data.initializer {
            Some(expr) => self.evaluate(expr)?,
            None => Object::nil(),
        };
        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_while_stmt(&mut self, data: &WhileData) -> ExecResult {
        while self.evaluate(&data.condition)?.as_bool().unwrap_or(true) {
            self.execute(&data.body)?;
        }
        Ok(())
    }
}
