use std::fmt::Display;

use crate::ast::{
    expressions::{
        AssignmentExpr, BinaryExpr, BinaryOp, CallExpr, DictExpr, Expr, IndexExpr,
        ListComprehensionExpr, ListExpr, MethodCallExpr, SliceExpr, UnaryExpr, UnaryOp,
        VariableExpr,
    },
    statements::{
        BlockStmt, ChannelDeclStmt, ForStmt, FuncDeclStmt, IfStmt, ReturnStmt, Stmt, VarDeclStmt,
        WhileStmt,
    },
    types::{ChannelKind, Type},
    Program,
};

use super::symbol_table::{Symbol, SymbolKind, SymbolTable};

/// A single semantic finding, tied to the source line it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: u32,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Semantic error at line {}: {}", self.line, self.message)
    }
}

/// The outcome of analyzing a program. `ok` is true exactly when no
/// diagnostics were produced; warnings never affect it.
#[derive(Debug)]
pub struct Analysis {
    pub ok: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub warnings: Vec<String>,
}

/// Analyzes a whole program and returns every finding at once.
pub fn analyze(program: &Program) -> Analysis {
    let mut analyzer = Analyzer::new();
    analyzer.visit_program(program);

    Analysis {
        ok: analyzer.diagnostics.is_empty(),
        diagnostics: analyzer.diagnostics,
        warnings: analyzer.warnings,
    }
}

struct Analyzer {
    table: SymbolTable,
    diagnostics: Vec<Diagnostic>,
    warnings: Vec<String>,
    current_return_type: Option<Type>,
    in_loop: bool,
}

impl Analyzer {
    fn new() -> Analyzer {
        let mut analyzer = Analyzer {
            table: SymbolTable::new(),
            diagnostics: vec![],
            warnings: vec![],
            current_return_type: None,
            in_loop: false,
        };
        analyzer.register_builtins();
        analyzer
    }

    fn register_builtins(&mut self) {
        let builtins: [(&str, Vec<Type>, Type); 11] = [
            ("print", vec![Type::Any], Type::Void),
            ("input", vec![Type::String], Type::Any),
            ("len", vec![Type::Any], Type::Number),
            ("to_string", vec![Type::Any], Type::String),
            ("to_number", vec![Type::String], Type::Number),
            ("sleep", vec![Type::Number], Type::Void),
            ("pow", vec![Type::Number, Type::Number], Type::Number),
            ("sqrt", vec![Type::Number], Type::Number),
            ("abs", vec![Type::Number], Type::Number),
            ("isalpha", vec![Type::String], Type::Bool),
            ("isnum", vec![Type::String], Type::Bool),
        ];

        for (name, param_types, return_type) in builtins {
            self.table
                .add_symbol(Symbol::function(name, param_types, return_type, 0));
        }
    }

    fn error(&mut self, line: u32, message: String) {
        self.diagnostics.push(Diagnostic { line, message });
    }

    fn is_type_compatible(&self, expected: Type, actual: Type) -> bool {
        if expected == actual {
            return true;
        }
        if expected == Type::Any || actual == Type::Any {
            return true;
        }
        // bool can be used as number (0 or 1)
        if expected == Type::Number && actual == Type::Bool {
            return true;
        }
        false
    }

    // ========== Program and declarations ==========

    fn visit_program(&mut self, program: &Program) {
        for declaration in &program.declarations {
            self.visit_stmt(declaration);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(decl) => self.visit_var_decl(decl),
            Stmt::FuncDecl(decl) => self.visit_func_decl(decl),
            Stmt::ChannelDecl(decl) => self.visit_channel_decl(decl),
            Stmt::Block(block) => self.visit_scoped_block(block, "block"),
            Stmt::If(if_stmt) => self.visit_if(if_stmt),
            Stmt::While(while_stmt) => self.visit_while(while_stmt),
            Stmt::For(for_stmt) => self.visit_for(for_stmt),
            Stmt::Return(return_stmt) => self.visit_return(return_stmt),
            Stmt::Break(break_stmt) => {
                if !self.in_loop {
                    self.error(
                        break_stmt.span.start.line,
                        String::from("Break statement outside loop"),
                    );
                }
            }
            Stmt::Continue(continue_stmt) => {
                if !self.in_loop {
                    self.error(
                        continue_stmt.span.start.line,
                        String::from("Continue statement outside loop"),
                    );
                }
            }
            Stmt::Expression(expr_stmt) => {
                self.visit_expr(&expr_stmt.expression);
            }
            Stmt::Seq(seq) => self.visit_scoped_block(&seq.body, "seq_block"),
            Stmt::Par(par) => self.visit_scoped_block(&par.body, "par_block"),
        }
    }

    fn visit_var_decl(&mut self, decl: &VarDeclStmt) {
        let line = decl.span.start.line;

        if self.table.lookup_local(&decl.name).is_some() {
            self.error(
                line,
                format!("Variable '{}' already declared in current scope", decl.name),
            );
            return;
        }

        if let Some(value) = &decl.value {
            let value_type = self.visit_expr(value);
            if !self.is_type_compatible(decl.declared_type, value_type) {
                self.error(
                    line,
                    format!(
                        "Type mismatch: cannot assign {} to {} for variable '{}'",
                        value_type, decl.declared_type, decl.name
                    ),
                );
            }
        }

        self.table.add_symbol(Symbol::variable(
            &decl.name,
            decl.declared_type,
            line,
            decl.value.is_some(),
        ));
    }

    fn visit_func_decl(&mut self, decl: &FuncDeclStmt) {
        let line = decl.span.start.line;

        if self.table.lookup_local(&decl.name).is_some() {
            self.error(
                line,
                format!("Function '{}' already declared in current scope", decl.name),
            );
            return;
        }

        let param_types = decl
            .parameters
            .iter()
            .map(|parameter| parameter.declared_type)
            .collect::<Vec<_>>();

        self.table.add_symbol(Symbol::function(
            &decl.name,
            param_types,
            decl.return_type,
            line,
        ));

        // Default values are evaluated in the enclosing scope.
        for parameter in &decl.parameters {
            if let Some(default) = &parameter.default {
                let default_type = self.visit_expr(default);
                if !self.is_type_compatible(parameter.declared_type, default_type) {
                    self.error(
                        line,
                        format!(
                            "Type mismatch: cannot assign {} to {} for variable '{}'",
                            default_type, parameter.declared_type, parameter.name
                        ),
                    );
                }
            }
        }

        self.table.enter_function_scope(&format!("func_{}", decl.name));

        for parameter in &decl.parameters {
            if self.table.lookup_local(&parameter.name).is_some() {
                self.error(
                    line,
                    format!("Parameter '{}' already declared", parameter.name),
                );
            } else {
                self.table.add_symbol(Symbol::parameter(
                    &parameter.name,
                    parameter.declared_type,
                    line,
                ));
            }
        }

        let old_return_type = self.current_return_type;
        self.current_return_type = Some(decl.return_type);
        // A loop around the declaration does not extend into the body.
        let old_in_loop = self.in_loop;
        self.in_loop = false;

        for stmt in &decl.body.statements {
            self.visit_stmt(stmt);
        }

        if decl.return_type != Type::Void && !block_has_return(&decl.body) {
            // Not a hard error: there is no full control flow analysis.
            self.warnings.push(format!(
                "Function '{}' may not return a value on all paths",
                decl.name
            ));
        }

        self.in_loop = old_in_loop;
        self.current_return_type = old_return_type;
        self.table.exit_scope();
    }

    fn visit_channel_decl(&mut self, decl: &ChannelDeclStmt) {
        let line = decl.span.start.line;

        if self.table.lookup_local(&decl.name).is_some() {
            self.error(
                line,
                format!("Channel '{}' already declared in current scope", decl.name),
            );
            return;
        }

        let expected = match decl.kind {
            ChannelKind::Server => 4,
            ChannelKind::Client => 2,
        };
        if decl.arguments.len() != expected {
            self.error(
                line,
                format!(
                    "{} '{}' expects {} arguments, got {}",
                    decl.kind,
                    decl.name,
                    expected,
                    decl.arguments.len()
                ),
            );
        }

        self.table
            .add_symbol(Symbol::channel(&decl.name, decl.kind, line));

        for argument in &decl.arguments {
            self.visit_expr(argument);
        }
    }

    // ========== Statements ==========

    fn visit_scoped_block(&mut self, block: &BlockStmt, scope_name: &str) {
        self.table.enter_scope(scope_name);
        for stmt in &block.statements {
            self.visit_stmt(stmt);
        }
        self.table.exit_scope();
    }

    fn visit_if(&mut self, if_stmt: &IfStmt) {
        let condition_type = self.visit_expr(&if_stmt.condition);
        if condition_type != Type::Bool && condition_type != Type::Any {
            self.error(
                if_stmt.span.start.line,
                format!("If condition must be boolean, got {}", condition_type),
            );
        }

        self.visit_scoped_block(&if_stmt.then_branch, "block");
        if let Some(else_branch) = &if_stmt.else_branch {
            self.visit_stmt(else_branch);
        }
    }

    fn visit_while(&mut self, while_stmt: &WhileStmt) {
        let condition_type = self.visit_expr(&while_stmt.condition);
        if condition_type != Type::Bool && condition_type != Type::Any {
            self.error(
                while_stmt.span.start.line,
                format!("While condition must be boolean, got {}", condition_type),
            );
        }

        let old_in_loop = self.in_loop;
        self.in_loop = true;
        self.visit_scoped_block(&while_stmt.body, "block");
        self.in_loop = old_in_loop;
    }

    fn visit_for(&mut self, for_stmt: &ForStmt) {
        self.table.enter_scope("for_loop");

        // An unannotated cursor defaults to any.
        self.table.add_symbol(Symbol::variable(
            &for_stmt.cursor,
            for_stmt.declared_type.unwrap_or(Type::Any),
            for_stmt.span.start.line,
            true,
        ));

        let iterable_type = self.visit_expr(&for_stmt.iterable);
        if !matches!(iterable_type, Type::List | Type::String | Type::Any) {
            self.error(
                for_stmt.span.start.line,
                format!("Cannot iterate over type '{}'", iterable_type),
            );
        }

        let old_in_loop = self.in_loop;
        self.in_loop = true;
        self.visit_scoped_block(&for_stmt.body, "block");
        self.in_loop = old_in_loop;

        self.table.exit_scope();
    }

    fn visit_return(&mut self, return_stmt: &ReturnStmt) {
        let line = return_stmt.span.start.line;

        let expected = match self.current_return_type {
            Some(expected) => expected,
            None => {
                self.error(line, String::from("Return statement outside function"));
                return;
            }
        };

        match &return_stmt.value {
            Some(value) => {
                let value_type = self.visit_expr(value);
                if !self.is_type_compatible(expected, value_type) {
                    self.error(
                        line,
                        format!(
                            "Return type mismatch: expected {}, got {}",
                            expected, value_type
                        ),
                    );
                }
            }
            None => {
                if expected != Type::Void {
                    self.error(
                        line,
                        format!("Missing return value: function should return {}", expected),
                    );
                }
            }
        }
    }

    // ========== Expressions ==========

    fn visit_expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::Assignment(assignment) => self.visit_assignment(assignment),
            Expr::Binary(binary) => self.visit_binary(binary),
            Expr::Unary(unary) => self.visit_unary(unary),
            Expr::Call(call) => self.visit_call(call),
            Expr::MethodCall(call) => self.visit_method_call(call),
            Expr::Index(index) => self.visit_index(index),
            Expr::Slice(slice) => self.visit_slice(slice),
            Expr::Variable(variable) => self.visit_variable(variable),
            Expr::Number(_) => Type::Number,
            Expr::String(_) => Type::String,
            Expr::Bool(_) => Type::Bool,
            Expr::List(list) => self.visit_list(list),
            Expr::Dict(dict) => self.visit_dict(dict),
            Expr::ListComprehension(comprehension) => self.visit_comprehension(comprehension),
        }
    }

    fn visit_assignment(&mut self, assignment: &AssignmentExpr) -> Type {
        let line = assignment.span.start.line;

        let (symbol_kind, data_type) = match self.table.lookup(&assignment.name) {
            Some(symbol) => (symbol.kind, symbol.data_type),
            None => {
                self.error(
                    line,
                    format!("Undefined variable '{}'", assignment.name),
                );
                return Type::Any;
            }
        };

        if symbol_kind == SymbolKind::Function {
            self.error(
                line,
                format!("Cannot assign to function '{}'", assignment.name),
            );
            return Type::Any;
        }

        let value_type = self.visit_expr(&assignment.value);
        if !self.is_type_compatible(data_type, value_type) {
            self.error(
                line,
                format!(
                    "Type mismatch: cannot assign {} to {} for variable '{}'",
                    value_type, data_type, assignment.name
                ),
            );
        }

        self.table.mark_initialized(&assignment.name);
        data_type
    }

    fn visit_binary(&mut self, binary: &BinaryExpr) -> Type {
        let line = binary.span.start.line;
        let left_type = self.visit_expr(&binary.left);
        let right_type = self.visit_expr(&binary.right);

        match binary.operator {
            BinaryOp::Add
            | BinaryOp::Subtract
            | BinaryOp::Multiply
            | BinaryOp::Divide
            | BinaryOp::Modulo => {
                // String and list concatenation
                if binary.operator == BinaryOp::Add {
                    if left_type == Type::String && right_type == Type::String {
                        return Type::String;
                    }
                    if left_type == Type::List && right_type == Type::List {
                        return Type::List;
                    }
                }

                if (left_type != Type::Number || right_type != Type::Number)
                    && left_type != Type::Any
                    && right_type != Type::Any
                {
                    self.error(
                        line,
                        format!(
                            "Arithmetic operator '{}' requires numbers, got {} and {}",
                            binary.operator, left_type, right_type
                        ),
                    );
                }
                Type::Number
            }
            BinaryOp::Less | BinaryOp::LessEquals | BinaryOp::Greater | BinaryOp::GreaterEquals => {
                if (left_type != Type::Number || right_type != Type::Number)
                    && left_type != Type::Any
                    && right_type != Type::Any
                {
                    self.error(
                        line,
                        format!(
                            "Comparison operator '{}' requires numbers, got {} and {}",
                            binary.operator, left_type, right_type
                        ),
                    );
                }
                Type::Bool
            }
            // Any two values can be compared for equality.
            BinaryOp::Equals | BinaryOp::NotEquals => Type::Bool,
            BinaryOp::And | BinaryOp::Or => {
                if left_type != Type::Bool && left_type != Type::Any {
                    self.error(
                        line,
                        format!("Logical operator requires boolean, got {}", left_type),
                    );
                }
                if right_type != Type::Bool && right_type != Type::Any {
                    self.error(
                        line,
                        format!("Logical operator requires boolean, got {}", right_type),
                    );
                }
                Type::Bool
            }
        }
    }

    fn visit_unary(&mut self, unary: &UnaryExpr) -> Type {
        let line = unary.span.start.line;
        let operand_type = self.visit_expr(&unary.operand);

        match unary.operator {
            UnaryOp::Negate => {
                if operand_type != Type::Number && operand_type != Type::Any {
                    self.error(
                        line,
                        format!("Unary minus requires number, got {}", operand_type),
                    );
                }
                Type::Number
            }
            UnaryOp::Not => {
                if operand_type != Type::Bool && operand_type != Type::Any {
                    self.error(
                        line,
                        format!("Logical NOT requires boolean, got {}", operand_type),
                    );
                }
                Type::Bool
            }
        }
    }

    fn visit_call(&mut self, call: &CallExpr) -> Type {
        let line = call.span.start.line;

        let (symbol_kind, param_types, return_type) = match self.table.lookup(&call.name) {
            Some(symbol) => (
                symbol.kind,
                symbol.param_types.clone(),
                symbol.return_type,
            ),
            None => {
                self.error(line, format!("Undefined function '{}'", call.name));
                return Type::Any;
            }
        };

        if symbol_kind != SymbolKind::Function {
            self.error(line, format!("'{}' is not a function", call.name));
            return Type::Any;
        }

        // Argument count is relaxed for the variadic built-ins.
        if let Some(param_types) = &param_types {
            if call.name != "print" && call.name != "input" {
                if call.arguments.len() != param_types.len() {
                    self.error(
                        line,
                        format!(
                            "Function '{}' expects {} arguments, got {}",
                            call.name,
                            param_types.len(),
                            call.arguments.len()
                        ),
                    );
                }
            }
        }

        for (i, argument) in call.arguments.iter().enumerate() {
            let argument_type = self.visit_expr(argument);
            if let Some(param_types) = &param_types {
                if let Some(&expected) = param_types.get(i) {
                    if expected != Type::Any && !self.is_type_compatible(expected, argument_type) {
                        self.error(
                            line,
                            format!(
                                "Argument {} to '{}': expected {}, got {}",
                                i + 1,
                                call.name,
                                expected,
                                argument_type
                            ),
                        );
                    }
                }
            }
        }

        return_type.unwrap_or(Type::Void)
    }

    fn visit_method_call(&mut self, call: &MethodCallExpr) -> Type {
        let line = call.span.start.line;

        // Channel methods are resolved through the symbol, everything
        // else through the object's type.
        let (object_type, channel_name) = match call.object.as_ref() {
            Expr::Variable(variable) => match self.table.lookup(&variable.name) {
                Some(symbol) if symbol.kind == SymbolKind::Channel => {
                    (Type::Any, Some(variable.name.clone()))
                }
                Some(symbol) => (symbol.data_type, None),
                None => {
                    self.error(line, format!("Undefined object '{}'", variable.name));
                    return Type::Any;
                }
            },
            other => (self.visit_expr(other), None),
        };

        if let Some(channel) = channel_name {
            return match call.method.as_str() {
                // send returns the response string from the server
                "send" => {
                    self.visit_arguments(&call.arguments);
                    Type::String
                }
                "receive" => {
                    self.visit_arguments(&call.arguments);
                    Type::String
                }
                "close" => {
                    self.visit_arguments(&call.arguments);
                    Type::Void
                }
                _ => {
                    self.error(
                        line,
                        format!(
                            "Unknown method '{}' for channel '{}'",
                            call.method, channel
                        ),
                    );
                    Type::Any
                }
            };
        }

        if object_type == Type::List {
            return match call.method.as_str() {
                "append" => {
                    if call.arguments.len() != 1 {
                        self.error(
                            line,
                            format!(
                                "append() takes exactly 1 argument, got {}",
                                call.arguments.len()
                            ),
                        );
                    }
                    self.visit_arguments(&call.arguments);
                    Type::Void
                }
                "pop" => {
                    if call.arguments.len() > 1 {
                        self.error(
                            line,
                            format!(
                                "pop() takes at most 1 argument, got {}",
                                call.arguments.len()
                            ),
                        );
                    }
                    self.visit_arguments(&call.arguments);
                    Type::Any
                }
                "insert" => {
                    if call.arguments.len() != 2 {
                        self.error(
                            line,
                            format!(
                                "insert() takes exactly 2 arguments, got {}",
                                call.arguments.len()
                            ),
                        );
                    }
                    self.visit_arguments(&call.arguments);
                    Type::Void
                }
                "remove" => {
                    if call.arguments.len() != 1 {
                        self.error(
                            line,
                            format!(
                                "remove() takes exactly 1 argument, got {}",
                                call.arguments.len()
                            ),
                        );
                    }
                    self.visit_arguments(&call.arguments);
                    Type::Void
                }
                "sort" => {
                    if !call.arguments.is_empty() {
                        self.error(
                            line,
                            format!("sort() takes no arguments, got {}", call.arguments.len()),
                        );
                    }
                    Type::Void
                }
                _ => {
                    self.error(line, format!("Unknown method '{}' for list", call.method));
                    Type::Any
                }
            };
        }

        if object_type == Type::String {
            return match call.method.as_str() {
                "strip" | "lower" | "upper" | "lstrip" | "rstrip" => {
                    if !call.arguments.is_empty() {
                        self.error(line, format!("{}() takes no arguments", call.method));
                    }
                    Type::String
                }
                "split" => {
                    if call.arguments.len() > 1 {
                        self.error(
                            line,
                            format!(
                                "split() takes at most 1 argument, got {}",
                                call.arguments.len()
                            ),
                        );
                    }
                    self.visit_arguments(&call.arguments);
                    Type::List
                }
                "replace" => {
                    if call.arguments.len() != 2 {
                        self.error(
                            line,
                            format!(
                                "replace() takes exactly 2 arguments, got {}",
                                call.arguments.len()
                            ),
                        );
                    }
                    self.visit_arguments(&call.arguments);
                    Type::String
                }
                "startswith" | "endswith" => {
                    if call.arguments.len() != 1 {
                        self.error(
                            line,
                            format!(
                                "{}() takes exactly 1 argument, got {}",
                                call.method,
                                call.arguments.len()
                            ),
                        );
                    }
                    self.visit_arguments(&call.arguments);
                    Type::Bool
                }
                "to_number" => {
                    if !call.arguments.is_empty() {
                        self.error(line, String::from("to_number() takes no arguments"));
                    }
                    Type::Number
                }
                _ => {
                    self.error(
                        line,
                        format!("Unknown method '{}' for string", call.method),
                    );
                    Type::Any
                }
            };
        }

        if object_type == Type::Any {
            // Nothing to check without a concrete type.
            self.visit_arguments(&call.arguments);
            return Type::Any;
        }

        self.error(
            line,
            format!("Method calls not supported for type {}", object_type),
        );
        Type::Any
    }

    fn visit_arguments(&mut self, arguments: &[Expr]) {
        for argument in arguments {
            self.visit_expr(argument);
        }
    }

    fn visit_index(&mut self, index: &IndexExpr) -> Type {
        let line = index.span.start.line;
        let object_type = self.visit_expr(&index.object);
        let index_type = self.visit_expr(&index.index);

        if index_type != Type::Number && index_type != Type::Any {
            self.error(line, format!("Index must be number, got {}", index_type));
        }

        // Indexing a string yields a single-character string.
        if object_type == Type::String {
            return Type::String;
        }
        Type::Any
    }

    fn visit_slice(&mut self, slice: &SliceExpr) -> Type {
        let line = slice.span.start.line;
        let object_type = self.visit_expr(&slice.object);

        if let Some(start) = &slice.start {
            let start_type = self.visit_expr(start);
            if start_type != Type::Number && start_type != Type::Any {
                self.error(
                    line,
                    format!("Slice start must be number, got {}", start_type),
                );
            }
        }

        if let Some(end) = &slice.end {
            let end_type = self.visit_expr(end);
            if end_type != Type::Number && end_type != Type::Any {
                self.error(line, format!("Slice end must be number, got {}", end_type));
            }
        }

        match object_type {
            Type::String => Type::String,
            Type::List => Type::List,
            other => other,
        }
    }

    fn visit_variable(&mut self, variable: &VariableExpr) -> Type {
        match self.table.lookup(&variable.name) {
            Some(symbol) => symbol.data_type,
            None => {
                self.error(
                    variable.span.start.line,
                    format!("Undefined variable '{}'", variable.name),
                );
                Type::Any
            }
        }
    }

    fn visit_list(&mut self, list: &ListExpr) -> Type {
        for element in &list.elements {
            self.visit_expr(element);
        }
        Type::List
    }

    fn visit_dict(&mut self, dict: &DictExpr) -> Type {
        for (key, value) in &dict.entries {
            self.visit_expr(key);
            self.visit_expr(value);
        }
        Type::Dict
    }

    fn visit_comprehension(&mut self, comprehension: &ListComprehensionExpr) -> Type {
        self.table.enter_scope("list_comp");

        self.table.add_symbol(Symbol::variable(
            &comprehension.cursor,
            Type::Any,
            comprehension.span.start.line,
            true,
        ));

        let iterable_type = self.visit_expr(&comprehension.iterable);
        if !matches!(iterable_type, Type::List | Type::String | Type::Any) {
            self.error(
                comprehension.span.start.line,
                format!("Cannot iterate over type '{}'", iterable_type),
            );
        }

        self.visit_expr(&comprehension.element);
        if let Some(condition) = &comprehension.condition {
            self.visit_expr(condition);
        }

        self.table.exit_scope();
        Type::List
    }
}

/// Simple heuristic: a block returns if any direct statement is a
/// return, or an if statement where both branches return.
fn block_has_return(block: &BlockStmt) -> bool {
    for stmt in &block.statements {
        match stmt {
            Stmt::Return(_) => return true,
            Stmt::If(if_stmt) => {
                if let Some(else_branch) = &if_stmt.else_branch {
                    if block_has_return(&if_stmt.then_branch) && stmt_has_return(else_branch) {
                        return true;
                    }
                }
            }
            _ => {}
        }
    }
    false
}

fn stmt_has_return(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return(_) => true,
        Stmt::Block(block) => block_has_return(block),
        Stmt::If(if_stmt) => match &if_stmt.else_branch {
            Some(else_branch) => {
                block_has_return(&if_stmt.then_branch) && stmt_has_return(else_branch)
            }
            None => false,
        },
        _ => false,
    }
}
