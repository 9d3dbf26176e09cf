use std::hash::{Hash, Hasher};
use std::rc::Rc;

use bimap::BiMap;

/// An interned name. Equality and hashing use the handle, never the text.
#[derive(Debug, Clone)]
pub struct Symbol {
    id: u32,
    name: Rc<str>,
}

impl Symbol {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Interner {
    names: BiMap<Rc<str>, u32>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, name: &str) -> Symbol {
        if let Some(symbol) = self.lookup(name) {
            return symbol;
        }
        let id = u32::try_from(self.names.len()).unwrap_or(u32::MAX);
        let name: Rc<str> = Rc::from(name);
        self.names.insert(name.clone(), id);
        Symbol { id, name }
    }

    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        let id = *self.names.get_by_left(name)?;
        self.resolve(id)
    }

    pub fn resolve(&self, id: u32) -> Option<Symbol> {
        let name = self.names.get_by_right(&id)?;
        Some(Symbol {
            id,
            name: name.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
