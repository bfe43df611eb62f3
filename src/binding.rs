//! Caller-shared visibility flag.

use std::cell::Cell;
use std::rc::Rc;

/// Read/write boolean shared between a caller and a presentation.
///
/// Cloning a binding yields another handle to the same flag, so a write
/// through any clone is observed by all of them.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    value: Rc<Cell<bool>>,
}

impl Binding {
    #[must_use]
    pub fn new(value: bool) -> Self {
        Self {
            value: Rc::new(Cell::new(value)),
        }
    }

    #[must_use]
    pub fn get(&self) -> bool {
        self.value.get()
    }

    pub fn set(&self, value: bool) {
        self.value.set(value);
    }

    /// Returns true if both handles point at the same flag.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let binding = Binding::new(false);
        let shared = binding.clone();

        shared.set(true);
        assert!(binding.get());
        assert!(binding.ptr_eq(&shared));
    }

    #[test]
    fn test_independent_bindings() {
        let a = Binding::new(true);
        let b = Binding::new(true);

        b.set(false);
        assert!(a.get());
        assert!(!a.ptr_eq(&b));
    }
}
