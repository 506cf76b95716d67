//! # Contract Registry
//!
//! Maps a code cell's representation hash to the logic that runs it.

use crate::ports::ContractLogic;
use shared_cell::{Cell, Hash};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Code hash → contract logic.
#[derive(Clone, Default)]
pub struct ContractRegistry {
    contracts: HashMap<Hash, Arc<dyn ContractLogic>>,
}

impl ContractRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `logic` for `code`, replacing any previous entry.
    pub fn register(&mut self, code: &Cell, logic: Arc<dyn ContractLogic>) -> &mut Self {
        self.contracts.insert(code.hash(), logic);
        self
    }

    #[must_use]
    pub fn resolve(&self, code_hash: &Hash) -> Option<Arc<dyn ContractLogic>> {
        self.contracts.get(code_hash).cloned()
    }

    #[must_use]
    pub fn contains(&self, code_hash: &Hash) -> bool {
        self.contracts.contains_key(code_hash)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

impl fmt::Debug for ContractRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self
            .contracts
            .iter()
            .map(|(hash, logic)| format!("{}={hash}", logic.name()))
            .collect();
        names.sort();
        f.debug_struct("ContractRegistry")
            .field("contracts", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContractOutcome, ExitCode, GetMethodContext, MessageContext, StackValue};

    struct Echo;

    impl ContractLogic for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn on_internal(
            &self,
            _ctx: &MessageContext,
            data: &Cell,
        ) -> Result<ContractOutcome, ExitCode> {
            Ok(ContractOutcome::new(Arc::new(data.clone())))
        }

        fn get_method(
            &self,
            _ctx: &GetMethodContext,
            _data: &Cell,
            _method: &str,
            _args: &[StackValue],
        ) -> Result<Vec<StackValue>, ExitCode> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let code = Cell::empty();
        let mut registry = ContractRegistry::new();
        registry.register(&code, Arc::new(Echo));
        assert_eq!(registry.len(), 1);
        let logic = registry.resolve(&code.hash()).unwrap();
        assert_eq!(logic.name(), "echo");
        assert!(registry.resolve(&Hash::ZERO).is_none());
        assert!(format!("{registry:?}").contains("echo"));
    }
}
