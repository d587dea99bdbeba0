// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 10 October 2026

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

const BUILTIN: &[&str] = &[
    "tench",
    "goldfish",
    "sulphur-crested_cockatoo",
    "Welsh_springer_spaniel",
    "tabby",
    "Egyptian_cat",
    "sports_car",
    "warbler",
    "pumice",
    "cab",
];

/// Class index to human readable label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// A small table for running without any model files.
    pub fn builtin() -> Self {
        Self {
            labels: BUILTIN.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed opening label table {:?}", path))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("failed reading label table {:?}", path))
    }

    /// Parse an ImageNet style class index: `{"0": ["n01440764", "tench"], ...}`.
    /// Indices must cover `0..n` without gaps.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let index: HashMap<String, (String, String)> = serde_json::from_reader(reader)?;
        if index.is_empty() {
            bail!("label table is empty");
        }

        let mut labels = vec![None; index.len()];
        for (key, (_synset, label)) in index {
            let idx: usize = key
                .parse()
                .with_context(|| format!("class index {:?} is not a number", key))?;

            match labels.get_mut(idx) {
                Some(slot) => *slot = Some(label),
                None => bail!("class index {} out of range for {} classes", idx, labels.len()),
            }
        }

        let labels = labels
            .into_iter()
            .enumerate()
            .map(|(idx, label)| label.ok_or_else(|| anyhow::anyhow!("missing class {}", idx)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Pick the label for a blob of input data: the first eight bytes of
    /// the SHA-256 digest, big endian, modulo the table size. Identical data
    /// maps to the same label on every build and platform.
    pub fn predict(&self, data: &[u8]) -> &str {
        let digest = Sha256::digest(data);
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        let idx = (u64::from_be_bytes(head) % self.labels.len() as u64) as usize;

        &self.labels[idx]
    }
}
