use std::collections::HashMap;
use std::mem;

use crate::error::{Error, ResolveError};
use crate::expr::{
    AssignData, BinaryData, CallData, GetData, GroupingData, LogicalData, SetData, ThisData,
    UnaryData, VariableData,
};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::stmt::{
    BlockData, ClassData, ExpressionData, FunctionData, IfData, PrintData, ReturnData, Stmt,
    VarData, WhileData,
};
use crate::expr::{Expr, ExprVisitor};
use crate::stmt::StmtVisitor;
use crate::token::Token;

#[derive(Clone, Copy, PartialEq)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

#[derive(Clone, Copy, PartialEq)]
enum ClassType {
    None,
    Class,
}

/// Static resolution pass: walks the parsed tree once, before evaluation,
/// to compute the lexical hop count for every variable reference and to
/// reject a handful of errors that are invariants of scoping rather than
/// of control flow (`return` outside a function, `this` outside a method,
/// reading a local from its own initializer).
pub struct Resolver<'a, 'out> {
    interpreter: &'a mut Interpreter<'out>,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
    had_error: bool,
}

impl<'a, 'out> Resolver<'a, 'out> {
    pub fn new(interpreter: &'a mut Interpreter<'out>) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
            had_error: false,
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_function(&mut self, function: &FunctionData, r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn error(&mut self, token: Token, message: String) {
        ResolveError { token, message }.report();
        self.had_error = true;
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            self.error(name.clone(), "Already a variable with this name in this scope.".to_string());
        }
        scope.insert(name.lexeme.clone(), false);
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    fn resolve_local(&mut self, id: u64, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(id, i);
                return;
            }
        }
        // Not found in any scope: treated as global, resolved at call time.
    }
}

impl<'a, 'out> ExprVisitor<()> for Resolver<'a, 'out> {
    fn visit_assign_expr(&mut self, data: &AssignData) {
        self.resolve_expr(&data.value);
        self.resolve_local(data.id, &data.name);
    }

    fn visit_binary_expr(&mut self, data: &BinaryData) {
        self.resolve_expr(&data.left);
        self.resolve_expr(&data.right);
    }

    fn visit_call_expr(&mut self, data: &CallData) {
        self.resolve_expr(&data.callee);
        for argument in &data.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_get_expr(&mut self, data: &GetData) {
        self.resolve_expr(&data.object);
    }

    fn visit_grouping_expr(&mut self, data: &GroupingData) {
        self.resolve_expr(&data.expr);
    }

    fn visit_literal_expr(&mut self, _data: &Literal) {}

    fn visit_logical_expr(&mut self, data: &LogicalData) {
        self.resolve_expr(&data.left);
        self.resolve_expr(&data.right);
    }

    fn visit_set_expr(&mut self, data: &SetData) {
        self.resolve_expr(&data.value);
        self.resolve_expr(&data.object);
    }

    fn visit_this_expr(&mut self, data: &ThisData) {
        if self.current_class == ClassType::None {
            self.error(data.keyword.clone(), "Can't use 'this' outside of a class.".to_string());
            return;
        }

        self.resolve_local(data.id, &data.keyword);
    }

    fn visit_unary_expr(&mut self, data: &UnaryData) {
        self.resolve_expr(&data.expr);
    }

    fn visit_variable_expr(&mut self, data: &VariableData) {
        if let Some(scope) = self.scopes.last() {
            if scope.get(&data.name.lexeme) == Some(&false) {
                self.error(
                    data.name.clone(),
                    "Can't read local variable in its own initializer.".to_string(),
                );
            }
        }

        self.resolve_local(data.id, &data.name);
    }
}

impl<'a, 'out> StmtVisitor<()> for Resolver<'a, 'out> {
    fn visit_block_stmt(&mut self, data: &BlockData) {
        self.begin_scope();
        self.resolve(&data.statements);
        self.end_scope();
    }

    fn visit_class_stmt(&mut self, data: &ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&data.name);
        self.define(&data.name);

        self.begin_scope();
        self.scopes.last_mut().expect("scope just pushed").insert("this".to_string(), true);

        for method in &data.methods {
            let Stmt::Function(function) = method else { unreachable!("class body holds only methods") };
            let kind = if function.name.lexeme == "init" { FunctionType::Initializer } else { FunctionType::Method };
            self.resolve_function(function, kind);
        }

        self.end_scope();

        self.current_class = enclosing_class;
    }

    fn visit_expression_stmt(&mut self, data: &ExpressionData) {
        self.resolve_expr(&data.expr);
    }

    fn visit_function_stmt(&mut self, data: &FunctionData) {
        self.declare(&data.name);
        self.define(&data.name);

        self.resolve_function(data, FunctionType::Function);
    }

    fn visit_if_stmt(&mut self, data: &IfData) {
        self.resolve_expr(&data.condition);
        self.resolve_stmt(&data.then_branch);
        if let Some(else_branch) = &data.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_print_stmt(&mut self, data: &PrintData) {
        self.resolve_expr(&data.expr);
    }

    fn visit_return_stmt(&mut self, data: &ReturnData) {
        if self.current_function == FunctionType::None {
            self.error(data.keyword.clone(), "Can't return from top-level code.".to_string());
        }

        if let Some(value) = &data.value {
            if self.current_function == FunctionType::Initializer {
                self.error(data.keyword.clone(), "Can't return a value from an initializer.".to_string());
                return;
            }
            self.resolve_expr(value);
        }
    }

    fn visit_var_stmt(&mut self, data: &VarData) {
        self.declare(&data.name);
        if let Some(initializer) = &data.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&data.name);
    }

    fn visit_while_stmt(&mut self, data: &WhileData) {
        self.resolve_expr(&data.condition);
        self.resolve_stmt(&data.body);
    }
}
