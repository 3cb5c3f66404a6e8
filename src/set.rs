//! An ordered collection of [`Variable`]s and the policies applied across it.
//!
//! The set is kept sorted by long flag name so that flags reported by a
//! command-line parser can be matched by binary search. Variables are never
//! inserted after construction; they are only mutated in place.

use std::cmp::Ordering;

use crate::env::Environ;
use crate::error::EnvfigError;
use crate::variable::Variable;

/// The standard ordering: by long flag name.
pub fn by_flag(a: &Variable, b: &Variable) -> Ordering {
    a.long().cmp(b.long())
}

#[derive(Debug)]
pub struct VariableSet {
    vars: Vec<Variable>,
    environ: Environ,
}

impl VariableSet {
    /// Build a set that inherits from the current process environment.
    pub fn new(vars: Vec<Variable>) -> Self {
        Self::with_environ(vars, Environ::process())
    }

    /// Build a set that inherits from `environ`. The set is sorted by flag.
    pub fn with_environ(vars: Vec<Variable>, environ: Environ) -> Self {
        let mut set = Self { vars, environ };
        set.sort_by(by_flag);
        set
    }

    pub fn environ(&self) -> &Environ {
        &self.environ
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.vars.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Variable> {
        self.vars.iter_mut()
    }

    /// Find a variable by long flag name.
    pub fn get(&self, long: &str) -> Option<&Variable> {
        self.lookup(|v| v.long() == long)
    }

    /// Decode `raw` into the variable named `long`, consulting this set's
    /// environment. Returns `false` when no such variable exists.
    pub fn set(&mut self, long: &str, raw: &str) -> Result<bool, EnvfigError> {
        let Some(var) = self.vars.iter_mut().find(|v| v.long() == long) else {
            return Ok(false);
        };
        var.set(raw, &self.environ)?;
        Ok(true)
    }

    /// Apply the global source policy to every variable not given on the
    /// command line.
    ///
    /// - `suppress_default`: drop compiled defaults.
    /// - `suppress_env`: drop inherited values and stop inheriting.
    /// - otherwise, a variable whose identifier is present in the
    ///   environment is re-decoded from it. A value that fails to decode is
    ///   logged as a warning and skipped, whether or not defaults are
    ///   suppressed.
    ///
    /// User-defined variables are never touched.
    pub fn override_with(&mut self, suppress_env: bool, suppress_default: bool) -> &mut Self {
        tracing::debug!(suppress_env, suppress_default, "overriding configuration sources");
        for var in self.vars.iter_mut().filter(|v| !v.is_user_defined()) {
            if suppress_default {
                var.suppress_default();
            }
            if suppress_env {
                var.suppress_env();
                continue;
            }
            let Some(inherited) = self.environ.get(var.ident()) else {
                continue;
            };
            // With defaults suppressed only the environment side is decoded,
            // so its failure comes back as `Ok(Some(_))`.
            let error = match var.resolve(inherited, &self.environ) {
                Ok(None) => continue,
                Ok(Some(e)) => e.to_string(),
                Err(e) => e.to_string(),
            };
            tracing::warn!(
                ident = var.ident(),
                flag = var.long(),
                %error,
                "cannot inherit value from environment"
            );
        }
        self
    }

    /// Stable in-place sort.
    pub fn sort_by<F>(&mut self, order: F) -> &mut Self
    where
        F: FnMut(&Variable, &Variable) -> Ordering,
    {
        self.vars.sort_by(order);
        self
    }

    /// First variable matching `want`, in current order.
    pub fn lookup<F>(&self, mut want: F) -> Option<&Variable>
    where
        F: FnMut(&Variable) -> bool,
    {
        self.vars.iter().find(|v| want(v))
    }

    pub fn lookup_mut<F>(&mut self, mut want: F) -> Option<&mut Variable>
    where
        F: FnMut(&Variable) -> bool,
    {
        self.vars.iter_mut().find(|v| want(v))
    }

    /// Run `action` on each variable whose long flag appears in `supplied`.
    ///
    /// `supplied` enumerates the flags actually given on the command line.
    /// Names are matched by binary search; the set is re-sorted by flag first
    /// if a custom ordering left it unsorted. Returns `true` if `action`
    /// returned `true` for at least one match.
    pub fn apply_to_matching_flags<I, S, F>(&mut self, supplied: I, mut action: F) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(&mut Variable) -> bool,
    {
        if !self.vars.is_sorted_by(|a, b| by_flag(a, b).is_le()) {
            self.sort_by(by_flag);
        }
        let mut applied = false;
        for name in supplied {
            let name = name.as_ref();
            if let Ok(i) = self.vars.binary_search_by(|v| v.long().cmp(name)) {
                tracing::debug!(flag = name, "flag given on command line");
                applied = action(&mut self.vars[i]) || applied;
            }
        }
        applied
    }

    /// Fail on the first variable whose resolved value is empty or blank.
    pub fn validate(&self) -> Result<(), EnvfigError> {
        match self.vars.iter().find(|v| v.value().trim().is_empty()) {
            Some(var) if var.ident().is_empty() => {
                Err(EnvfigError::UndefinedIdent(format!("--{}", var.long())))
            }
            Some(var) => Err(EnvfigError::UndefinedIdent(var.ident().to_string())),
            None => Ok(()),
        }
    }

    /// Set the variable named by `flag` (long or short) to `raw` and mark it
    /// user-defined, unless the user already defined it.
    ///
    /// Returns whether a variable was changed.
    pub fn force(&mut self, flag: &str, raw: &str) -> Result<bool, EnvfigError> {
        self.force_with(flag, |_| raw.to_string())
    }

    /// Like [`force`](Self::force), computing the new raw text from the
    /// current resolved value.
    pub fn force_with<F>(&mut self, flag: &str, rewrite: F) -> Result<bool, EnvfigError>
    where
        F: FnOnce(&str) -> String,
    {
        let found = self
            .vars
            .iter_mut()
            .find(|v| v.long() == flag || (!v.short().is_empty() && v.short() == flag));
        let Some(var) = found else {
            return Ok(false);
        };
        if var.is_user_defined() {
            return Ok(false);
        }
        let raw = rewrite(&var.value());
        var.set(&raw, &self.environ)?;
        var.set_user_defined(true);
        tracing::debug!(flag = var.long(), value = %raw, "forced value");
        Ok(true)
    }
}

impl<'a> IntoIterator for &'a VariableSet {
    type Item = &'a Variable;
    type IntoIter = std::slice::Iter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}
