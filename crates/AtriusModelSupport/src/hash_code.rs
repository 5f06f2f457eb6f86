use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::OnceLock;

/// Lazily computed hash code cached on an immutable instance.
///
/// The cache never participates in the owner's equality or hashing: two
/// instances compare equal regardless of whether either has computed its hash
/// yet, and hashing an owner does not feed the cached value back in.
#[derive(Default)]
pub struct HashCode(OnceLock<u64>);

impl HashCode {
    pub const fn new() -> Self {
        HashCode(OnceLock::new())
    }

    /// Returns the cached hash of `owner`, computing it on first use.
    pub fn get_or_compute<T: Hash + ?Sized>(&self, owner: &T) -> u64 {
        *self.0.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            owner.hash(&mut hasher);
            hasher.finish()
        })
    }

    pub fn is_computed(&self) -> bool {
        self.0.get().is_some()
    }
}

// A clone starts with an empty cache; the value is recomputed on demand.
impl Clone for HashCode {
    fn clone(&self) -> Self {
        HashCode::new()
    }
}

impl fmt::Debug for HashCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get() {
            Some(code) => write!(f, "HashCode({code:#x})"),
            None => f.write_str("HashCode(<lazy>)"),
        }
    }
}

impl PartialEq for HashCode {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HashCode {}

impl Hash for HashCode {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Hash)]
    struct Owner {
        name: &'static str,
        cache: HashCode,
    }

    #[test]
    fn computed_once_and_stable() {
        let owner = Owner { name: "a", cache: HashCode::new() };
        assert!(!owner.cache.is_computed());
        let first = owner.cache.get_or_compute(&owner);
        assert!(owner.cache.is_computed());
        assert_eq!(first, owner.cache.get_or_compute(&owner));
    }

    #[test]
    fn cache_is_transparent_to_hashing() {
        let warm = Owner { name: "a", cache: HashCode::new() };
        warm.cache.get_or_compute(&warm);
        let cold = Owner { name: "a", cache: HashCode::new() };
        assert_eq!(warm.cache.get_or_compute(&warm), cold.cache.get_or_compute(&cold));
        assert_eq!(warm.name, cold.name);
    }

    #[test]
    fn clone_resets_cache() {
        let cache = HashCode::new();
        cache.get_or_compute(&1u8);
        assert!(!cache.clone().is_computed());
    }
}
