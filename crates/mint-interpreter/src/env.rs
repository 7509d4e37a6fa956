//! Variable tables for the Mint interpreter.
//!
//! A [`Scope`] owns its tables outright. Nested blocks run against a copy,
//! and only values of names the parent already held flow back.

use std::collections::BTreeMap;

use log::trace;
use mint_syntax::ast::{SymbolTable, Type};
use serde::Serialize;

use crate::value::Value;

/// Identifier → current value, ordered for deterministic snapshots.
pub type ValueTable = BTreeMap<String, Value>;

/// Declared types plus current values; also the snapshot a run returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scope {
    pub symbols: SymbolTable,
    pub values: ValueTable,
}

impl Scope {
    pub fn new(symbols: SymbolTable, values: ValueTable) -> Self {
        Self { symbols, values }
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub(crate) fn declare(&mut self, name: &str, ty: Type) {
        trace!("declare {}: {}", name, ty);
        self.symbols.insert(name.to_string(), ty);
    }

    /// Reads a declared name; one that was never assigned reads as `Null`.
    pub fn get(&self, name: &str) -> Option<Value> {
        if !self.is_declared(name) {
            return None;
        }
        Some(self.values.get(name).cloned().unwrap_or(Value::Null))
    }

    pub(crate) fn set(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Copies back the values of a finished nested block, skipping names the
    /// block introduced itself.
    pub(crate) fn merge_from(&mut self, inner: ValueTable) {
        for (name, value) in inner {
            if let Some(slot) = self.values.get_mut(&name) {
                *slot = value;
            }
        }
    }

    pub(crate) fn remove(&mut self, name: &str) {
        self.symbols.remove(name);
        self.values.remove(name);
    }
}
