//! Hash-based routes.
//!
//! URL format: `#/coin/<id>` for a coin, `#/` (or no hash) for the catalog.
//! Anything else is kept as a literal path with no parameters.

use std::collections::BTreeMap;

use crate::config::routes::{COIN_PATTERN, COIN_PREFIX, ROOT};

/// A parsed fragment route: path pattern plus extracted parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Pattern for recognized routes (`/coin/:id`), literal path otherwise.
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl Route {
    /// The catalog root.
    pub fn root() -> Self {
        Self::literal(ROOT)
    }

    /// A route with no parameters.
    pub fn literal(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: BTreeMap::new(),
        }
    }

    /// The detail route for a coin.
    pub fn coin(id: impl Into<String>) -> Self {
        let mut params = BTreeMap::new();
        params.insert("id".to_string(), id.into());
        Self {
            path: COIN_PATTERN.to_string(),
            params,
        }
    }

    /// Parse a `location.hash` value.
    ///
    /// The coin id match is greedy: `#/coin/a/b` yields id `a/b`.
    /// Slashes are not normalized.
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.strip_prefix('#').unwrap_or(hash);
        if path.is_empty() {
            return Self::root();
        }

        match path.strip_prefix(COIN_PREFIX) {
            Some(id) if !id.is_empty() => Self::coin(id),
            _ => Self::literal(path),
        }
    }

    /// Look up a path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Coin id when this is a coin detail route.
    pub fn coin_id(&self) -> Option<&str> {
        if self.path == COIN_PATTERN {
            self.param("id")
        } else {
            None
        }
    }

    pub fn is_root(&self) -> bool {
        self.path == ROOT
    }

    /// Concrete path with parameters substituted, e.g. `/coin/abc`.
    pub fn to_path(&self) -> String {
        match self.coin_id() {
            Some(id) => format!("{}{}", COIN_PREFIX, id),
            None => self.path.clone(),
        }
    }

    /// Fragment link for anchors, e.g. `#/coin/abc`.
    pub fn href(&self) -> String {
        format!("#{}", self.to_path())
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::from_hash(""), Route::root());
        assert_eq!(Route::from_hash("#"), Route::root());
        assert_eq!(Route::from_hash("#/"), Route::root());
        assert_eq!(Route::from_hash("#/coin/denarius-7"), Route::coin("denarius-7"));
        assert_eq!(Route::from_hash("#/upload"), Route::literal("/upload"));
    }

    #[test]
    fn test_coin_id_is_greedy() {
        for id in ["a", "a/b", "a/b/", "x y", "%20", "/"] {
            let route = Route::from_hash(&format!("#/coin/{}", id));
            assert_eq!(route.path, "/coin/:id");
            assert_eq!(route.param("id"), Some(id));
            assert_eq!(route.coin_id(), Some(id));
        }
    }

    #[test]
    fn test_unmatched_paths_pass_through() {
        // Empty id does not match the coin pattern.
        assert_eq!(Route::from_hash("#/coin/"), Route::literal("/coin/"));
        assert_eq!(Route::from_hash("#/coin"), Route::literal("/coin"));
        assert_eq!(Route::from_hash("#//about//"), Route::literal("//about//"));
        assert!(Route::from_hash("#/about").params.is_empty());
        assert_eq!(Route::from_hash("#/about").coin_id(), None);
    }

    #[test]
    fn test_route_to_href() {
        assert_eq!(Route::root().href(), "#/");
        assert_eq!(Route::coin("abc").href(), "#/coin/abc");
        assert_eq!(Route::literal("/upload").href(), "#/upload");
        assert_eq!(Route::from_hash(&Route::coin("a/b").href()), Route::coin("a/b"));
    }
}
