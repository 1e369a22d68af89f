use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table, TableLike};

/// Locate an accessible [`syn::Path`] for a retag crate as seen from the
/// Cargo.toml of the crate that invokes a proc-macro.
///
/// # Example
///
/// ```rust
/// # use retag_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("retag_reflect"));
/// ```
///
/// Reading the manifest touches the file system, so callers should resolve a
/// path once per macro invocation and pass it around.
///
/// # Resolution rules
///
/// 1. If the requested package is a dependency, return `::dep_name`
///    (`dep_name` is the key in `[dependencies]`, which differs from the
///    package name when the dependency is renamed with `package = "..."`).
/// 2. If the requested package name starts with `retag_` and the facade
///    package `retag` is a dependency, return `::facade_dep::short_name`
///    (e.g. `retag_reflect` -> `::retag::reflect`).
/// 3. Repeat steps 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to `::package_name`.
///
/// A crate that expands its own derive macros should add
/// `extern crate self as retag_reflect;` so that step 4 also works inside it.
#[derive(Debug)]
pub struct Manifest {
    // package name -> dependency key
    dependencies: BTreeMap<String, String>,
    dev_dependencies: BTreeMap<String, String>,
    modified_time: SystemTime,
}

const FACADE_NAME: &str = "retag";
const CRATE_PREFIX: &str = "retag_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn load(path: &Path, modified_time: SystemTime) -> Self {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()));
        let document = Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()));

        Self {
            dependencies: Self::collect(document.get("dependencies")),
            dev_dependencies: Self::collect(document.get("dev-dependencies")),
            modified_time,
        }
    }

    // Map every dependency to its package name, honoring `package = "..."` renames.
    fn collect(table: Option<&Item>) -> BTreeMap<String, String> {
        let Some(Item::Table(table)) = table else {
            return BTreeMap::new();
        };
        Self::collect_table(table)
    }

    fn collect_table(table: &Table) -> BTreeMap<String, String> {
        table
            .iter()
            .map(|(key, item)| {
                let package = item
                    .as_table_like()
                    .and_then(|t: &dyn TableLike| t.get("package"))
                    .and_then(Item::as_str)
                    .unwrap_or(key);
                (package.to_owned(), key.replace('-', "_"))
            })
            .collect()
    }

    #[inline]
    fn parse_path(path: &str) -> syn::Path {
        syn::parse_str(path).unwrap()
    }

    fn find_in(deps: &BTreeMap<String, String>, name: &str) -> Option<syn::Path> {
        if let Some(key) = deps.get(name) {
            return Some(Self::parse_path(&format!("::{key}")));
        }

        let module = name.strip_prefix(CRATE_PREFIX)?;
        let facade = deps.get(FACADE_NAME)?;
        Some(Self::parse_path(&format!("::{facade}::{module}")))
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the type documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        Self::find_in(&self.dependencies, name)
            .or_else(|| Self::find_in(&self.dev_dependencies, name))
            .unwrap_or_else(|| Self::parse_path(&format!("::{name}")))
    }

    /// Run `func` with the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// Parsed manifests are cached per path and reparsed when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time = Self::modified_time(&path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Self::load(&path, modified_time);
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
