//! Pattern Registry: the only place patterns are looked up from.
//!
//! Constructed once at process start from the built-in list and passed by
//! reference into the pipeline; there is no ambient global pattern state.
//! Registration after startup is supported for tests and per-deployment
//! extensions but the registry is read-only during request processing.

use conta_model::{ConvError, Result};
use tracing::debug;

use crate::pattern::{Pattern, PatternFamily, SourceColumns};

#[derive(Debug, Default)]
pub struct PatternRegistry {
    patterns: Vec<Pattern>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in pattern set.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for pattern in crate::builtin::all() {
            // Builtins are covered by tests; a failure here is a programming
            // error in the builtin module, not a runtime condition.
            registry
                .register(pattern)
                .expect("builtin patterns are valid");
        }
        registry
    }

    /// Validate and add a pattern. A duplicate name replaces the existing
    /// entry: the registry is built from a static list at startup, so "last
    /// write wins" lets deployments override a builtin deliberately.
    pub fn register(&mut self, pattern: Pattern) -> Result<()> {
        pattern.validate()?;
        if let Some(existing) = self.patterns.iter_mut().find(|p| p.name == pattern.name) {
            debug!(name = pattern.name, "replacing registered pattern");
            *existing = pattern;
        } else {
            self.patterns.push(pattern);
        }
        Ok(())
    }

    /// Like [`register`](Self::register) but refuses to overwrite.
    pub fn register_strict(&mut self, pattern: Pattern) -> Result<()> {
        if self.patterns.iter().any(|p| p.name == pattern.name) {
            return Err(ConvError::DuplicateKind {
                name: pattern.name.to_string(),
            });
        }
        self.register(pattern)
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Match a file against the registered patterns of one family.
    ///
    /// Deterministic selection: the pattern whose longest filename token
    /// matches wins; ties are broken by header inspection (a pattern whose
    /// declared source columns are all present beats one whose are not) and
    /// finally by registration order.
    pub fn match_file(
        &self,
        family: PatternFamily,
        filename: &str,
        headers: Option<&[String]>,
    ) -> Result<&Pattern> {
        let filename_lower = filename.to_lowercase();

        let mut best: Option<(&Pattern, usize, bool)> = None;
        for pattern in self.patterns.iter().filter(|p| p.family == family) {
            let Some(strength) = pattern.match_strength(&filename_lower) else {
                continue;
            };
            let headers_ok = headers.is_none_or(|h| columns_present(&pattern.columns, h));
            let candidate = (pattern, strength, headers_ok);
            best = Some(match best {
                None => candidate,
                Some(current) => {
                    let (_, cur_strength, cur_headers) = current;
                    if strength > cur_strength || (strength == cur_strength && headers_ok && !cur_headers)
                    {
                        candidate
                    } else {
                        current
                    }
                }
            });
        }

        match best {
            Some((pattern, strength, _)) => {
                debug!(
                    pattern = pattern.name,
                    strength, filename, "matched pattern"
                );
                Ok(pattern)
            }
            None => Err(ConvError::NoMatch {
                filename: filename.to_string(),
            }),
        }
    }
}

fn columns_present(columns: &SourceColumns, headers: &[String]) -> bool {
    columns
        .names()
        .iter()
        .all(|name| headers.iter().any(|h| h.trim() == *name))
}
