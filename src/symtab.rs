use crate::ast::Ty;
use crate::value::{EvalError, Val};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Entry {
    declared: Option<Ty>,
    value: Option<Val>,
}

/// One row of a symbol-table snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub declared: Option<Ty>,
    pub value: Option<Val>,
}

/// Declared-type + current-value store for one interpreter run. Constructed
/// fresh per interpreter and owned by it exclusively.
#[derive(Debug, Default, PartialEq)]
pub struct SymbolTable {
    entries: FxHashMap<Rc<str>, Entry>,
    // First-touch order, so snapshots come out in declaration order.
    order: Vec<Rc<str>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Default::default()
    }

    fn entry(&mut self, name: &Rc<str>) -> &mut Entry {
        if !self.entries.contains_key(&**name) {
            self.order.push(name.clone());
        }
        self.entries.entry(name.clone()).or_default()
    }

    /// Records a declared type. Idempotent: a repeated declaration overwrites
    /// the type and leaves any stored value alone.
    pub fn declare(&mut self, name: Rc<str>, ty: Ty) {
        self.entry(&name).declared = Some(ty);
    }

    /// Stores a value, creating the entry if absent, and returns it. No check
    /// against the declared type; declared types are recorded, not enforced.
    pub fn assign(&mut self, name: Rc<str>, val: Val) -> Val {
        self.entry(&name).value = Some(val);
        val
    }

    /// A name can be read only after some assignment stored a value for it; a
    /// bare declaration is not enough.
    pub fn lookup(&self, name: &Rc<str>) -> Result<Val, EvalError> {
        self.entries
            .get(&**name)
            .and_then(|e| e.value)
            .ok_or_else(|| EvalError::Undefined(name.clone()))
    }

    pub fn get(&self, name: &str) -> Option<Val> {
        self.entries.get(name).and_then(|e| e.value)
    }

    /// Entries in first-touch order.
    pub fn snapshot(&self) -> Vec<Symbol> {
        self.order
            .iter()
            .filter_map(|name| {
                self.entries.get(&**name).map(|e| Symbol {
                    name: name.to_string(),
                    declared: e.declared,
                    value: e.value,
                })
            })
            .collect()
    }
}
