//! # Navigator Operations
//!
//! Common stack transforms expressed on top of a single `navigate` call.
//! Every operation is one navigation: one plan, one set of side effects.

use std::fmt::Debug;

use super::error::NavigationError;

pub trait StackNavigator<C>
where
    C: Clone + PartialEq + Debug,
{
    /// Replaces the configuration stack with `transform(current)`.
    fn navigate<F>(&self, transform: F) -> Result<(), NavigationError>
    where
        F: FnOnce(&[C]) -> Vec<C>;

    /// Pushes `configuration` on top. Fails if it is already in the stack.
    fn push(&self, configuration: C) -> Result<(), NavigationError> {
        self.navigate(move |stack| {
            let mut next = stack.to_vec();
            next.push(configuration);
            next
        })
    }

    /// Pushes `configuration` unless it is already the active one.
    fn push_new(&self, configuration: C) -> Result<(), NavigationError> {
        self.navigate(move |stack| {
            let mut next = stack.to_vec();
            if next.last() != Some(&configuration) {
                next.push(configuration);
            }
            next
        })
    }

    /// Pops the active configuration. Returns `false` when only one is left.
    fn pop(&self) -> Result<bool, NavigationError> {
        let mut popped = false;
        self.navigate(|stack| {
            if stack.len() > 1 {
                popped = true;
                stack[..stack.len() - 1].to_vec()
            } else {
                stack.to_vec()
            }
        })?;
        Ok(popped)
    }

    /// Pops while `predicate` holds for the top configuration, always
    /// keeping the bottom one.
    fn pop_while<P>(&self, predicate: P) -> Result<(), NavigationError>
    where
        P: Fn(&C) -> bool,
    {
        self.navigate(|stack| {
            let mut len = stack.len();
            while len > 1 && predicate(&stack[len - 1]) {
                len -= 1;
            }
            stack[..len].to_vec()
        })
    }

    /// Pops everything above `index`. Returns `false` if `index` is out of
    /// range or already the top.
    fn pop_to(&self, index: usize) -> Result<bool, NavigationError> {
        let mut popped = false;
        self.navigate(|stack| {
            if index + 1 < stack.len() {
                popped = true;
                stack[..=index].to_vec()
            } else {
                stack.to_vec()
            }
        })?;
        Ok(popped)
    }

    /// Swaps the active configuration for `configuration`.
    fn replace_current(&self, configuration: C) -> Result<(), NavigationError> {
        self.navigate(move |stack| {
            let mut next = stack[..stack.len().saturating_sub(1)].to_vec();
            next.push(configuration);
            next
        })
    }

    /// Replaces the whole stack.
    fn replace_all(&self, configurations: Vec<C>) -> Result<(), NavigationError> {
        self.navigate(move |_| configurations)
    }

    /// Moves `configuration` to the top, pushing it if it is not in the stack.
    fn bring_to_front(&self, configuration: C) -> Result<(), NavigationError> {
        self.navigate(move |stack| {
            let mut next: Vec<C> = stack
                .iter()
                .filter(|c| **c != configuration)
                .cloned()
                .collect();
            next.push(configuration);
            next
        })
    }
}
