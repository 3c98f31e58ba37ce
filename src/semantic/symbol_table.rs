use std::collections::HashMap;

use crate::ast::types::{ChannelKind, Type};

/// The role a symbol plays in the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Parameter,
    Channel,
}

/// A named entity visible in some scope.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub data_type: Type,
    pub scope_level: usize,
    pub line: u32,
    pub initialized: bool,
    /// For functions: declared parameter types.
    pub param_types: Option<Vec<Type>>,
    /// For functions: declared return type.
    pub return_type: Option<Type>,
    /// For channels: which end of the channel this names.
    pub channel_kind: Option<ChannelKind>,
}

impl Symbol {
    pub fn variable(name: &str, data_type: Type, line: u32, initialized: bool) -> Symbol {
        Symbol {
            name: name.to_string(),
            kind: SymbolKind::Variable,
            data_type,
            scope_level: 0,
            line,
            initialized,
            param_types: None,
            return_type: None,
            channel_kind: None,
        }
    }

    pub fn parameter(name: &str, data_type: Type, line: u32) -> Symbol {
        Symbol {
            kind: SymbolKind::Parameter,
            initialized: true,
            ..Symbol::variable(name, data_type, line, true)
        }
    }

    pub fn function(name: &str, param_types: Vec<Type>, return_type: Type, line: u32) -> Symbol {
        Symbol {
            name: name.to_string(),
            kind: SymbolKind::Function,
            data_type: return_type,
            scope_level: 0,
            line,
            initialized: true,
            param_types: Some(param_types),
            return_type: Some(return_type),
            channel_kind: None,
        }
    }

    pub fn channel(name: &str, kind: ChannelKind, line: u32) -> Symbol {
        Symbol {
            name: name.to_string(),
            kind: SymbolKind::Channel,
            data_type: Type::Any,
            scope_level: 0,
            line,
            initialized: true,
            param_types: None,
            return_type: None,
            channel_kind: Some(kind),
        }
    }
}

/// A single scope: its symbols plus the arena index of its parent.
#[derive(Debug)]
pub struct Scope {
    pub level: usize,
    pub name: String,
    pub parent: Option<usize>,
    symbols: HashMap<String, Symbol>,
}

/// Symbol table with scope management.
///
/// All scopes ever created live in `scopes`; `stack` holds the indices
/// of the currently open ones, with the innermost last. Exiting a
/// scope pops the stack but keeps the scope in the arena, so symbols
/// remain inspectable after analysis.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    stack: Vec<usize>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {
            scopes: vec![Scope {
                level: 0,
                name: String::from("global"),
                parent: None,
                symbols: HashMap::new(),
            }],
            stack: vec![0],
        }
    }

    fn current_index(&self) -> usize {
        *self.stack.last().unwrap()
    }

    pub fn enter_scope(&mut self, name: &str) {
        let level = self.scopes.len();
        let parent = Some(self.current_index());
        self.scopes.push(Scope {
            level,
            name: name.to_string(),
            parent,
            symbols: HashMap::new(),
        });
        self.stack.push(level);
    }

    /// Opens a scope whose parent is the global scope, regardless of
    /// where declaration happened. A function body sees its own
    /// parameters and locals plus globals, never the caller's scope.
    pub fn enter_function_scope(&mut self, name: &str) {
        let level = self.scopes.len();
        self.scopes.push(Scope {
            level,
            name: name.to_string(),
            parent: Some(0),
            symbols: HashMap::new(),
        });
        self.stack.push(level);
    }

    pub fn exit_scope(&mut self) {
        // The global scope is never popped.
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Adds a symbol to the current scope. Returns false if a symbol
    /// with the same name already exists there.
    pub fn add_symbol(&mut self, mut symbol: Symbol) -> bool {
        let index = self.current_index();
        let scope = &mut self.scopes[index];
        if scope.symbols.contains_key(&symbol.name) {
            return false;
        }
        symbol.scope_level = scope.level;
        scope.symbols.insert(symbol.name.clone(), symbol);
        true
    }

    /// Looks up a symbol in the current scope or any enclosing scope.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        let mut index = Some(self.current_index());
        while let Some(scope_index) = index {
            let scope = &self.scopes[scope_index];
            if let Some(symbol) = scope.symbols.get(name) {
                return Some(symbol);
            }
            index = scope.parent;
        }
        None
    }

    /// Looks up a symbol only in the current scope.
    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.scopes[self.current_index()].symbols.get(name)
    }

    /// Marks the nearest visible symbol with this name as initialized.
    pub fn mark_initialized(&mut self, name: &str) {
        let mut index = Some(self.current_index());
        while let Some(scope_index) = index {
            if let Some(symbol) = self.scopes[scope_index].symbols.get_mut(name) {
                symbol.initialized = true;
                return;
            }
            index = self.scopes[scope_index].parent;
        }
    }

    pub fn current_scope_level(&self) -> usize {
        self.scopes[self.current_index()].level
    }

    pub fn is_global_scope(&self) -> bool {
        self.current_index() == 0
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}
