use std::{
    any::{Any, TypeId},
    borrow::Cow,
    collections::HashMap,
    fmt,
    rc::Rc,
};

/// Trait implemented by values that can be stored in an environment.
pub trait EnvValue: Any + Sized {
    fn into_storage(self) -> Rc<dyn Any>;
    fn from_storage(storage: Rc<dyn Any>) -> Option<Self>;
}

/// Configuration values available to the decorators of a form, keyed by type.
#[derive(Clone)]
pub struct Environment {
    map: HashMap<TypeId, Rc<dyn Any>>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Environment")
            .field("entries", &self.map.len())
            .finish_non_exhaustive()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    /// Creates a new, empty environment.
    pub fn new() -> Environment {
        Environment { map: HashMap::new() }
    }

    /// Creates a new environment that adds or overrides a given key.
    #[must_use]
    pub fn add<T: EnvValue>(mut self, value: T) -> Environment {
        self.set(value);
        self
    }

    /// Adds or overrides a given key in the given environment.
    pub fn set<T: EnvValue>(&mut self, value: T) {
        self.map.insert(TypeId::of::<T>(), value.into_storage());
    }

    /// Returns the value corresponding to the key.
    pub fn get<T: EnvValue>(&self) -> Option<T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|v| T::from_storage(v.clone()))
    }

    /// Merges two environments. Values in `other` take precedence.
    #[must_use]
    pub fn union(mut self, other: Environment) -> Environment {
        self.map.extend(other.map);
        self
    }

    /// User-facing strings, or the built-in defaults if none were provided.
    pub fn strings(&self) -> Strings {
        self.get::<Strings>().unwrap_or_default()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Keys of the strings rendered by the library itself.
pub mod keys {
    /// Error shown under a blank required field.
    pub const MUST_NOT_BE_BLANK: &str = "must-not-be-blank";
    /// Label of the button that appends an element to a list field.
    pub const ADD_ITEM: &str = "add-item";
    /// Label of the button that removes an element from a list field.
    pub const REMOVE_ITEM: &str = "remove-item";
}

/// Translatable strings.
///
/// The library doesn't ship a string catalog; applications insert their own `Strings` in the environment of a
/// form to translate the few texts that decorators render.
#[derive(Clone, Debug, Default)]
pub struct Strings(Rc<HashMap<Cow<'static, str>, String>>);

impl Strings {
    pub fn new() -> Strings {
        Strings::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<Cow<'static, str>>, text: impl Into<String>) -> Strings {
        Rc::make_mut(&mut self.0).insert(key.into(), text.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }
}

impl EnvValue for Strings {
    fn into_storage(self) -> Rc<dyn Any> {
        Rc::new(self)
    }

    fn from_storage(storage: Rc<dyn Any>) -> Option<Self> {
        storage.downcast::<Strings>().ok().map(|strings| (*strings).clone())
    }
}
