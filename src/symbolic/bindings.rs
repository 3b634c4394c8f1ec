//! Variable environment: name -> currently bound expression. Bound expressions may be symbolic
//! (`z := 2 + x`), so looking a variable up does not imply it evaluates to a number.
use crate::datastructures::assoc_store::{AssocStore, DEFAULT_CAPACITY};
use crate::datastructures::container_errors::ContainerError;
use crate::symbolic::expr_node::ExprNode;

#[derive(Clone, Debug, Default)]
pub struct Bindings {
    variables: AssocStore<String, ExprNode>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Bindings {
            variables: AssocStore::with_capacity(capacity),
        }
    }

    pub fn get(&self, name: &str) -> Result<&ExprNode, ContainerError> {
        self.variables.get(name)
    }

    /// binds (or rebinds) `name`
    pub fn put(&mut self, name: &str, value: ExprNode) {
        self.variables.put(name.to_string(), value);
    }

    pub fn remove(&mut self, name: &str) -> Result<ExprNode, ContainerError> {
        self.variables.remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn size(&self) -> usize {
        self.variables.size()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// bindings in store slot order (reordered by removals)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExprNode)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), value))
    }
}
