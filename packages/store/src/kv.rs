/// String key/value storage with the semantics of the browser `Storage` API.
///
/// Implementations never fail loudly: an unavailable or full backend reads as
/// empty and drops writes. Callers layer typed access on top (see
/// [`crate::SessionStore`]).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn clear(&self);
}
