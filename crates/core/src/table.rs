//! The argument table: switch registration and argv parsing.
//!
//! An [`ArgumentTable`] is both the registry (aliases, validators) and the
//! parse-time engine. Parsing walks `argv` left to right, cutting it into
//! groups at every recognized switch token, and hands each group's value
//! tokens to the validator registered for that switch. The leading tokens
//! before the first switch form the default group, addressed by the empty
//! alias.

use std::any::Any;
use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use crate::error::Error::{DuplicateAlias, NoAliases, NoPrefixes, UnknownArgument};
use crate::error::{Error, Result, ValidationFailure};

/// A parsed argument value, type-erased so one store can hold whatever type
/// each validator produces.
pub type Value = Box<dyn Any>;

/// What a validator returns: the argument's value, or the failure that gets
/// wrapped in [`Error::Validation`].
pub type ValidatorResult = std::result::Result<Value, ValidationFailure>;

/// A registered validation function: receives the raw value tokens of one
/// argument group and produces the argument's value.
pub type Validator = Box<dyn Fn(&[String]) -> ValidatorResult>;

/// How registered argument names are matched against argv tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameComparison {
    /// Aliases match tokens byte for byte.
    CaseSensitive,
    /// Aliases match tokens ignoring letter case.
    #[default]
    CaseInsensitive,
}

impl NameComparison {
    /// Folds a name into the form used as a lookup key.
    fn key(self, name: &str) -> String {
        match self {
            Self::CaseSensitive => name.to_string(),
            Self::CaseInsensitive => name.to_lowercase(),
        }
    }
}

/// Registry and parser for a flat command-line argument vector.
///
/// Usage is one construction, any number of [`register`](Self::register)
/// calls, one [`parse`](Self::parse) call, then reads through the value
/// accessors and [`raw_arguments`](Self::raw_arguments). All maps are owned
/// by the table; nothing internal is exposed mutably.
pub struct ArgumentTable {
    /// Prefix strings sorted longest first, so `--` is tested before `-`.
    prefixes: Vec<String>,
    comparison: NameComparison,
    /// Folded alias -> primary name as registered.
    primaries: HashMap<String, String>,
    /// Folded primary -> the full alias group as registered, for error
    /// attribution that shows every spelling.
    alias_groups: HashMap<String, Vec<String>>,
    /// Folded primary -> validator.
    validators: HashMap<String, Validator>,
    /// Folded primary -> validated value. Write-once per primary; the
    /// presence check is what rejects an argument encountered twice.
    values: HashMap<String, Value>,
    /// Literal switch token as seen -> the value tokens that followed it.
    raw_arguments: IndexMap<String, Vec<String>>,
}

impl ArgumentTable {
    /// Creates a table recognizing switches by the given prefixes, matching
    /// names case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPrefixes`] if `prefixes` is empty.
    pub fn new<I, S>(prefixes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_comparison(prefixes, NameComparison::default())
    }

    /// Creates a table with an explicit name-comparison policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPrefixes`] if `prefixes` is empty.
    pub fn with_comparison<I, S>(prefixes: I, comparison: NameComparison) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        if prefixes.is_empty() {
            return Err(NoPrefixes);
        }

        // Longest first, so a prefix that extends another is tested before it.
        prefixes.sort_by_key(|prefix| std::cmp::Reverse(prefix.len()));

        Ok(Self {
            prefixes,
            comparison,
            primaries: HashMap::new(),
            alias_groups: HashMap::new(),
            validators: HashMap::new(),
            values: HashMap::new(),
            raw_arguments: IndexMap::new(),
        })
    }

    /// Registers an argument: a validator plus every spelling it answers to.
    ///
    /// Each alias includes its prefix (`"--verbose"`, not `"verbose"`). The
    /// first alias becomes the primary name the argument is stored under.
    /// The empty string is a valid alias and denotes the default group: the
    /// tokens before the first switch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoAliases`] if `aliases` is empty, or
    /// [`Error::DuplicateAlias`] if any alias is already registered (to this
    /// call or any earlier one). A failed call leaves the table unchanged.
    pub fn register<F>(&mut self, validator: F, aliases: &[&str]) -> Result<()>
    where
        F: Fn(&[String]) -> ValidatorResult + 'static,
    {
        if aliases.is_empty() {
            return Err(NoAliases);
        }

        // Check the whole alias list before touching the maps, so a rejected
        // call leaves no partial registration behind.
        let mut keys: Vec<String> = Vec::with_capacity(aliases.len());
        for alias in aliases {
            let key = self.comparison.key(alias);
            if self.primaries.contains_key(&key) || keys.contains(&key) {
                return Err(DuplicateAlias((*alias).to_string()));
            }
            keys.push(key);
        }

        let primary = aliases[0].to_string();
        let primary_key = keys[0].clone();

        for key in keys {
            self.primaries.insert(key, primary.clone());
        }
        self.alias_groups.insert(
            primary_key.clone(),
            aliases.iter().map(|alias| (*alias).to_string()).collect(),
        );
        self.validators.insert(primary_key, Box::new(validator));

        debug!("Registered `{primary}` with {} alias(es)", aliases.len());
        Ok(())
    }

    /// Parses an argv-style token sequence (without the program name).
    ///
    /// Tokens starting with a registered prefix are switches; everything else
    /// accumulates into the current group's value tokens. Closing a group
    /// records its raw tokens and dispatches its validator, so on success the
    /// raw store holds one entry per switch seen plus the default group, and
    /// the value store holds one entry per argument seen.
    ///
    /// The default group is always finalized, even when empty, so a table
    /// that parses must have the empty alias registered.
    ///
    /// A table parses once: the stores persist for its lifetime, a failed
    /// parse leaves them unspecified, and the duplicate-argument tracking is
    /// never reset, so reuse a fresh table instead of calling this twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownArgument`] for a switch token with no
    /// registered alias, [`Error::DuplicateArgument`] when an argument (via
    /// any of its aliases) appears twice, and [`Error::Validation`] when a
    /// group's validator rejects its tokens or no validator exists for it.
    pub fn parse<I, S>(&mut self, argv: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut current_raw = String::new();
        let mut buffer: Vec<String> = Vec::new();

        for token in argv {
            let token = token.into();

            if !self.is_switch(&token) {
                buffer.push(token);
                continue;
            }

            let Some(primary_key) = self.primary_key_of(&token) else {
                return Err(UnknownArgument(token));
            };
            if self.values.contains_key(&primary_key) {
                return Err(Error::DuplicateArgument {
                    aliases: self.aliases_of(&primary_key),
                });
            }

            let previous = std::mem::replace(&mut current_raw, token);
            let finished = std::mem::take(&mut buffer);
            self.close_group(&previous, finished)?;
        }

        self.close_group(&current_raw, buffer)
    }

    /// Retrieves the parsed value for any alias of an argument, untyped.
    ///
    /// Returns `None` when the alias is not registered or its argument never
    /// produced a value during parsing.
    pub fn value(&self, name: &str) -> Option<&dyn Any> {
        let primary_key = self.primary_key_of(name)?;
        self.values.get(&primary_key).map(|value| &**value)
    }

    /// Retrieves the parsed value for any alias of an argument, downcast to
    /// `T`. Absence and a type mismatch both yield `None`, never an error.
    pub fn value_as<T: Any>(&self, name: &str) -> Option<&T> {
        self.value(name)?.downcast_ref::<T>()
    }

    /// Like [`value_as`](Self::value_as), but returns `default` when there
    /// is no usable value.
    pub fn value_or<T: Any + Clone>(&self, name: &str, default: T) -> T {
        self.value_as::<T>(name).cloned().unwrap_or(default)
    }

    /// Whether parsing produced a value for the argument owning `name`.
    pub fn was_seen(&self, name: &str) -> bool {
        self.primary_key_of(name)
            .is_some_and(|primary_key| self.values.contains_key(&primary_key))
    }

    /// The raw command-line input: each literal switch token as it appeared
    /// (the empty string for the default group) mapped to the value tokens
    /// that followed it, in encounter order. Read-only.
    pub fn raw_arguments(&self) -> &IndexMap<String, Vec<String>> {
        &self.raw_arguments
    }

    fn is_switch(&self, token: &str) -> bool {
        self.prefixes.iter().any(|prefix| token.starts_with(prefix))
    }

    /// Resolves any alias spelling to the folded key of its primary name.
    fn primary_key_of(&self, name: &str) -> Option<String> {
        self.primaries
            .get(&self.comparison.key(name))
            .map(|primary| self.comparison.key(primary))
    }

    fn aliases_of(&self, primary_key: &str) -> Vec<String> {
        self.alias_groups
            .get(primary_key)
            .cloned()
            .unwrap_or_default()
    }

    /// Finalizes one group: records the raw tokens under the literal switch
    /// token, then runs the group's validator and stores its value.
    fn close_group(&mut self, raw_token: &str, tokens: Vec<String>) -> Result<()> {
        debug!(
            "Closing group `{raw_token}` with {} value token(s)",
            tokens.len()
        );
        self.raw_arguments.insert(raw_token.to_string(), tokens.clone());

        let Some(primary_key) = self.primary_key_of(raw_token) else {
            // Reachable when value tokens accumulate under an unregistered
            // default group; surfaced rather than dropped.
            return Err(Error::Validation {
                aliases: vec![raw_token.to_string()],
                source: "no validator registered".into(),
            });
        };

        // Adjacent aliases of one argument pass the pre-check in `parse`
        // because the first of them is still the open group; the store is
        // the final arbiter of "encountered twice".
        if self.values.contains_key(&primary_key) {
            return Err(Error::DuplicateArgument {
                aliases: self.aliases_of(&primary_key),
            });
        }

        let Some(validator) = self.validators.get(&primary_key) else {
            return Err(Error::Validation {
                aliases: self.aliases_of(&primary_key),
                source: "no validator registered".into(),
            });
        };

        let value = match validator(&tokens) {
            Ok(value) => value,
            Err(source) => {
                return Err(Error::Validation {
                    aliases: self.aliases_of(&primary_key),
                    source,
                })
            }
        };

        self.values.insert(primary_key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(token_count: usize) -> impl Fn(&[String]) -> ValidatorResult {
        move |tokens: &[String]| {
            assert_eq!(tokens.len(), token_count);
            let value: Value = Box::new(tokens.to_vec());
            Ok(value)
        }
    }

    #[test]
    fn test_new_requires_a_prefix() {
        let result = ArgumentTable::new(Vec::<String>::new());
        assert!(matches!(result, Err(NoPrefixes)));
    }

    #[test]
    fn test_register_requires_an_alias() {
        let mut table = ArgumentTable::new(["-"]).unwrap();
        let result = table.register(stored(0), &[]);
        assert!(matches!(result, Err(NoAliases)));
    }

    #[test]
    fn test_register_rejects_alias_collision_within_one_call() {
        let mut table = ArgumentTable::new(["-"]).unwrap();
        let result = table.register(stored(0), &["-a", "-A"]);
        match result {
            Err(DuplicateAlias(alias)) => assert_eq!(alias, "-A"),
            other => panic!("Expected DuplicateAlias, got {other:?}"),
        }
    }

    #[test]
    fn test_longer_prefix_listed_last_still_resolves() {
        // Prefix order at construction must not matter; the table sorts
        // longest-first itself.
        let mut table = ArgumentTable::new(["-", "--"]).unwrap();
        table.register(stored(0), &[""]).unwrap();
        table.register(stored(1), &["--out"]).unwrap();
        table.parse(["--out", "a.txt"]).unwrap();

        assert!(table.was_seen("--out"));
    }

    #[test]
    fn test_case_insensitive_lookup_by_default() {
        let mut table = ArgumentTable::new(["-"]).unwrap();
        table.register(stored(0), &[""]).unwrap();
        table.register(stored(0), &["-X"]).unwrap();
        table.parse(["-x"]).unwrap();

        assert!(table.was_seen("-X"));
        assert!(table.was_seen("-x"));
    }

    #[test]
    fn test_case_sensitive_policy_distinguishes_spellings() {
        let mut table =
            ArgumentTable::with_comparison(["-"], NameComparison::CaseSensitive).unwrap();
        table.register(stored(0), &[""]).unwrap();
        table.register(stored(0), &["-x"]).unwrap();
        table.register(stored(0), &["-X"]).unwrap();
        table.parse(["-x"]).unwrap();

        assert!(table.was_seen("-x"));
        assert!(!table.was_seen("-X"));
    }

    #[test]
    fn test_value_accessors_check_the_runtime_type() {
        let mut table = ArgumentTable::new(["-"]).unwrap();
        table
            .register(
                |_tokens| {
                    let value: Value = Box::new(42i64);
                    Ok(value)
                },
                &[""],
            )
            .unwrap();
        table.parse(Vec::<String>::new()).unwrap();

        assert_eq!(table.value_as::<i64>(""), Some(&42));
        assert_eq!(table.value_as::<String>(""), None);
        assert_eq!(table.value_or("", 0i64), 42);
        assert_eq!(table.value_or("", "fallback".to_string()), "fallback");
    }
}
