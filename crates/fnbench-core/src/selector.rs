// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 6 October 2026

use crate::InputCatalog;
use std::sync::atomic::{AtomicUsize, Ordering};

/// The outcome of one selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection<'a> {
    pub input: &'a str,
    /// Rotation slot the input was taken from, `None` when a tag pinned it.
    pub slot: Option<usize>,
}

impl Selection<'_> {
    pub fn overridden(&self) -> bool {
        self.slot.is_none()
    }
}

/// Round-robin selection over an [`InputCatalog`].
///
/// The cursor always holds the *next* slot to hand out and stays within
/// `0..catalog.len()`. Every advance is a single atomic read-modify-write,
/// so concurrent callers never receive the same slot for the same turn.
#[derive(Debug)]
pub struct Selector {
    catalog: InputCatalog,
    cursor: AtomicUsize,
}

impl Selector {
    pub fn new(catalog: InputCatalog) -> Self {
        Self {
            catalog,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Pick the input for one call. A tag bound in the catalog returns its
    /// input and leaves the cursor alone; any other tag falls back to the
    /// rotation.
    pub fn select(&self, tag: Option<&str>) -> Selection<'_> {
        if let Some(input) = tag.and_then(|t| self.catalog.resolve_tag(t)) {
            return Selection { input, slot: None };
        }

        let len = self.catalog.len();
        let slot = match self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| Some((c + 1) % len))
        {
            Ok(prev) | Err(prev) => prev,
        };

        Selection {
            // The cursor never leaves 0..len, but fall back to slot 0 rather
            // than panic inside a worker.
            input: self
                .catalog
                .get(slot)
                .or_else(|| self.catalog.get(0))
                .unwrap_or_default(),
            slot: Some(slot),
        }
    }

    /// The slot the next untagged call will receive.
    pub fn position(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    pub fn catalog(&self) -> &InputCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::Selector;
    use crate::InputCatalog;

    fn selector() -> Selector {
        let catalog = InputCatalog::new(["a", "b", "c"])
            .unwrap()
            .with_tag("record", "rec.jpg")
            .unwrap()
            .with_tag("replay", "rep.jpg")
            .unwrap();
        Selector::new(catalog)
    }

    #[test]
    fn starts_at_zero_and_cycles() {
        let selector = selector();
        let picks = (0..7)
            .map(|_| selector.select(None).input)
            .collect::<Vec<_>>();

        assert_eq!(picks, vec!["a", "b", "c", "a", "b", "c", "a"]);
        assert_eq!(selector.position(), 1);
    }

    #[test]
    fn tags_do_not_advance() {
        let selector = selector();
        selector.select(None);

        let rec = selector.select(Some("record"));
        assert_eq!(rec.input, "rec.jpg");
        assert!(rec.overridden());

        let rep = selector.select(Some("replay"));
        assert_eq!(rep.input, "rep.jpg");
        assert_eq!(selector.position(), 1);

        assert_eq!(selector.select(None).input, "b");
    }

    #[test]
    fn unknown_tag_falls_back_to_rotation() {
        let selector = selector();
        let pick = selector.select(Some("something-else"));
        assert_eq!(pick.input, "a");
        assert_eq!(pick.slot, Some(0));
    }

    #[test]
    fn single_input_catalog() {
        let selector = Selector::new(InputCatalog::new(["only"]).unwrap());
        for _ in 0..3 {
            assert_eq!(selector.select(None).slot, Some(0));
        }
        assert_eq!(selector.position(), 0);
    }
}
