//! Render limits.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::Error;

/// Immutable limits that bound every render.
///
/// Outer limits apply to the value passed to the renderer; inner limits apply
/// to everything nested inside it.  `max_collection_size_per_depth[d]` is the
/// number of items rendered for a container at depth `d`, and its length is
/// the depth at which containers collapse to `...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderLimits {
    max_string_outer: usize,
    max_string_inner: usize,
    max_other_outer: usize,
    max_other_inner: usize,
    max_collection_size_per_depth: Vec<usize>,
}

impl Default for RenderLimits {
    fn default() -> Self {
        Self {
            max_string_outer: DEFAULT_MAX_STRING_OUTER,
            max_string_inner: DEFAULT_MAX_STRING_INNER,
            max_other_outer: DEFAULT_MAX_OTHER_OUTER,
            max_other_inner: DEFAULT_MAX_OTHER_INNER,
            max_collection_size_per_depth: DEFAULT_MAX_COLLECTION_SIZE_PER_DEPTH.to_vec(),
        }
    }
}

impl RenderLimits {
    pub fn new(
        max_string_outer: usize,
        max_string_inner: usize,
        max_other_outer: usize,
        max_other_inner: usize,
        max_collection_size_per_depth: Vec<usize>,
    ) -> Result<Self, Error> {
        let limits = Self {
            max_string_outer,
            max_string_inner,
            max_other_outer,
            max_other_inner,
            max_collection_size_per_depth,
        };
        limits.validate()?;
        Ok(limits)
    }

    /// Load limits from a JSON object.  Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let limits: Self = serde_json::from_str(text)?;
        limits.validate()?;
        Ok(limits)
    }

    // The self-containment escape only terminates if its depth is past the
    // ceiling.
    fn validate(&self) -> Result<(), Error> {
        if self.max_collection_size_per_depth.len() >= SELF_CONTAINMENT_DEPTH {
            return Err(Error::Limits(format!(
                "at most {} collection depths are supported, got {}",
                SELF_CONTAINMENT_DEPTH - 1,
                self.max_collection_size_per_depth.len()
            )));
        }
        Ok(())
    }

    pub fn max_string_outer(&self) -> usize {
        self.max_string_outer
    }

    pub fn max_string_inner(&self) -> usize {
        self.max_string_inner
    }

    pub fn max_other_outer(&self) -> usize {
        self.max_other_outer
    }

    pub fn max_other_inner(&self) -> usize {
        self.max_other_inner
    }

    pub fn max_collection_size_per_depth(&self) -> &[usize] {
        &self.max_collection_size_per_depth
    }

    /// Depth at which containers stop being expanded.
    pub fn max_depth(&self) -> usize {
        self.max_collection_size_per_depth.len()
    }

    /// Item budget at `depth`, or `None` past the depth ceiling.
    pub fn collection_limit(&self, depth: usize) -> Option<usize> {
        self.max_collection_size_per_depth.get(depth).copied()
    }

    pub(crate) fn string_limit(&self, depth: usize) -> usize {
        if depth > 0 {
            self.max_string_inner
        } else {
            self.max_string_outer
        }
    }

    pub(crate) fn other_limit(&self, depth: usize) -> usize {
        if depth > 0 {
            self.max_other_inner
        } else {
            self.max_other_outer
        }
    }
}
