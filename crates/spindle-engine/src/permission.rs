//! Per-scope tracking of whether commands may run.
//!
//! Every lexical scope gets its own entry, initialised from the enclosing
//! scope when it opens. Directives only ever touch the innermost entry, so a
//! permission granted inside a block ends with that block.

use thiserror::Error;

/// Raised when a close would remove the root scope.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cannot close the root scope")]
pub struct RootScopeError;

/// Stack of per-scope permissions. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionStack {
    scopes: Vec<bool>,
}

impl PermissionStack {
    /// Creates a stack holding only the root scope.
    #[must_use]
    pub fn new(root: bool) -> Self {
        Self { scopes: vec![root] }
    }

    /// Opens a scope that inherits the current permission.
    pub fn push(&mut self) {
        let inherited = self.top();
        self.scopes.push(inherited);
    }

    /// Closes the innermost scope.
    ///
    /// # Errors
    ///
    /// Returns [`RootScopeError`] and leaves the stack untouched when only
    /// the root scope is open.
    pub fn pop(&mut self) -> Result<(), RootScopeError> {
        if self.scopes.len() <= 1 {
            return Err(RootScopeError);
        }
        self.scopes.pop();
        Ok(())
    }

    /// Whether commands may run in the innermost scope.
    #[must_use]
    pub fn top(&self) -> bool {
        self.scopes.last().copied().unwrap_or(false)
    }

    /// Overwrites the innermost scope's permission.
    pub fn set_top(&mut self, allowed: bool) {
        if let Some(top) = self.scopes.last_mut() {
            *top = allowed;
        }
    }

    /// Number of open scopes, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for PermissionStack {
    /// Commands are denied until a directive allows them.
    fn default() -> Self {
        Self::new(false)
    }
}
