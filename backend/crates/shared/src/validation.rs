//! Validation Pipeline
//!
//! A validator is an ordered list of [`Rule`]s run against a mutable entity.
//! Rules run strictly in order, may normalise the entity in place (later rules
//! see the result), and the first failure aborts the run. Nothing has been
//! persisted at that point, so there is nothing to roll back.
//!
//! Rules are `async` because some of them (uniqueness checks) consult a store.
//! Most are plain functions wrapped in [`Check`].

use async_trait::async_trait;

/// One step of a validation pipeline.
#[async_trait]
pub trait Rule<T, E>: Send + Sync
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Stable identifier, used in logs and ordering tests.
    fn name(&self) -> &'static str;

    /// Check and/or normalise `entity`.
    async fn apply(&self, entity: &mut T) -> Result<(), E>;
}

/// Adapts a synchronous `fn(&mut T) -> Result<(), E>` into a [`Rule`].
///
/// ```
/// use kernel::validation::{Check, Rule};
///
/// fn trim(s: &mut String) -> Result<(), ()> {
///     *s = s.trim().to_string();
///     Ok(())
/// }
///
/// let rule = Check::new("trim", trim);
/// assert_eq!(Rule::<String, ()>::name(&rule), "trim");
/// ```
pub struct Check<F> {
    name: &'static str,
    check: F,
}

impl<F> Check<F> {
    pub const fn new(name: &'static str, check: F) -> Self {
        Self { name, check }
    }
}

#[async_trait]
impl<T, E, F> Rule<T, E> for Check<F>
where
    T: Send + 'static,
    E: Send + 'static,
    F: Fn(&mut T) -> Result<(), E> + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    async fn apply(&self, entity: &mut T) -> Result<(), E> {
        (self.check)(entity)
    }
}

/// Run `rules` in order against `entity`, returning the first failure.
pub async fn run<T, E>(entity: &mut T, rules: &[&dyn Rule<T, E>]) -> Result<(), E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    for rule in rules {
        if let Err(err) = rule.apply(entity).await {
            tracing::debug!(rule = rule.name(), "Validation rule rejected entity");
            return Err(err);
        }
    }
    Ok(())
}
