//! Field-level diff accumulator

/// Names of the attributes written during one reconciliation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldChanges(Vec<&'static str>);

impl FieldChanges {
    /// Assign `incoming` to `current` only if they differ, recording `field`
    pub fn set<T: PartialEq>(&mut self, field: &'static str, current: &mut T, incoming: T) {
        if *current != incoming {
            *current = incoming;
            self.0.push(field);
        }
    }

    /// Reconcile an optional attribute group.
    ///
    /// Present on both sides, `diff` compares the group attribute by
    /// attribute. Otherwise the whole group is replaced, which also clears
    /// a local group whose remote counterpart is gone.
    pub fn set_group<T, F>(
        &mut self,
        group: &'static str,
        current: &mut Option<T>,
        incoming: Option<T>,
        diff: F,
    ) where
        T: PartialEq,
        F: FnOnce(&mut Self, &mut T, T),
    {
        match (current, incoming) {
            (Some(current), Some(incoming)) => diff(self, current, incoming),
            (current, incoming) => self.set(group, current, incoming),
        }
    }

    /// Whether nothing was written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the written fields, in write order
    #[must_use]
    pub fn fields(&self) -> &[&'static str] {
        &self.0
    }

    /// Consume into the list of written fields
    #[must_use]
    pub fn into_fields(self) -> Vec<&'static str> {
        self.0
    }
}
