//! Scope chains.
//!
//! A [`Context`] maps symbols to values and borrows its parent, so a child
//! frame can only outlive the call that created it by a compile error. Every
//! write goes to the innermost frame; reads walk outwards and see the nearest
//! binding only.

use ordermap::OrderMap;

use crate::ast::{Node, Symbol};

#[derive(Debug, Clone, Default)]
pub struct Context<'p> {
    bindings: OrderMap<Symbol, Node>,
    parent: Option<&'p Context<'p>>,
}

impl<'p> Context<'p> {
    pub fn new() -> Self {
        Self {
            bindings: OrderMap::new(),
            parent: None,
        }
    }

    /// A fresh frame whose lookups fall back to `self`.
    pub fn child(&self) -> Context<'_> {
        Context {
            bindings: OrderMap::new(),
            parent: Some(self),
        }
    }

    pub fn get(&self, sym: &Symbol) -> Option<&Node> {
        match self.bindings.get(sym) {
            Some(node) => Some(node),
            None => self.parent.and_then(|parent| parent.get(sym)),
        }
    }

    /// Binds in this frame and hands back the bound value.
    pub fn set(&mut self, sym: Symbol, val: Node) -> Node {
        self.bindings.insert(sym, val.clone());
        val
    }

    pub fn remove(&mut self, sym: &Symbol) -> Option<Node> {
        self.bindings.remove(sym)
    }

    /// Number of frames from here to the root, counting both.
    pub fn depth(&self) -> usize {
        1 + self.parent.map_or(0, Context::depth)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&Symbol, &Node)> {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Interner;

    #[test]
    fn nearest_binding_wins() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let y = interner.intern("y");

        let mut root = Context::new();
        root.set(x.clone(), Node::number(1.0));
        root.set(y.clone(), Node::number(2.0));

        {
            let mut frame = root.child();
            frame.set(x.clone(), Node::number(10.0));
            assert_eq!(frame.get(&x), Some(&Node::number(10.0)));
            assert_eq!(frame.get(&y), Some(&Node::number(2.0)));
            assert_eq!(frame.depth(), 2);
        }

        assert_eq!(root.get(&x), Some(&Node::number(1.0)));
        assert_eq!(root.depth(), 1);
    }

    #[test]
    fn unbound_symbol() {
        let mut interner = Interner::new();
        let z = interner.intern("z");
        let root = Context::new();
        assert!(root.child().get(&z).is_none());
    }
}
