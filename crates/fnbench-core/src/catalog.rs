// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 6 October 2026

use crate::ConfigError;

/// The fixed, ordered list of inputs a function rotates through, plus
/// optional tags that pin a request to one specific input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputCatalog {
    inputs: Vec<String>,
    tags: Vec<(String, String)>,
}

impl InputCatalog {
    /// Build a catalog from an ordered list of inputs. Fails if the list is empty.
    pub fn new<I, S>(inputs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let inputs = inputs.into_iter().map(Into::into).collect::<Vec<_>>();
        if inputs.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        Ok(Self {
            inputs,
            tags: vec![],
        })
    }

    /// Bind `tag` to `input`. A request carrying this tag resolves to
    /// `input` instead of taking the next slot of the rotation. The input
    /// does not need to be part of the rotation itself.
    pub fn with_tag(
        mut self,
        tag: impl Into<String>,
        input: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let tag = tag.into();
        if self.tags.iter().any(|(t, _)| *t == tag) {
            return Err(ConfigError::DuplicateTag(tag));
        }

        self.tags.push((tag, input.into()));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Always false for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.inputs.get(index).map(String::as_str)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(String::as_str)
    }

    pub fn tags(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().map(|(t, i)| (t.as_str(), i.as_str()))
    }

    /// The input bound to `tag`, if any.
    pub fn resolve_tag(&self, tag: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, input)| input.as_str())
    }
}
