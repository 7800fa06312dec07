//! In-process registry tree

use super::{RegistryResult, RegistryStore};
use crate::RegistryError;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// A value stored in a [`MemoryRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryValue {
    /// REG_DWORD
    Dword(u32),
    /// REG_MULTI_SZ
    MultiString(Vec<String>),
    /// REG_SZ
    String(String),
}

#[derive(Debug, Default)]
struct Node {
    name: String,
    // Keyed by lower-cased name.
    values: BTreeMap<String, MemoryValue>,
    children: BTreeMap<String, Node>,
}

impl Node {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn find(&self, parts: &[&str]) -> Option<&Node> {
        parts
            .iter()
            .try_fold(self, |node, part| node.children.get(&part.to_lowercase()))
    }

    fn find_mut(&mut self, parts: &[&str]) -> Option<&mut Node> {
        parts
            .iter()
            .try_fold(self, |node, part| node.children.get_mut(&part.to_lowercase()))
    }

    fn find_or_create(&mut self, parts: &[&str]) -> &mut Node {
        let mut node = self;
        for part in parts {
            node = node
                .children
                .entry(part.to_lowercase())
                .or_insert_with(|| Node::named(part));
        }
        node
    }
}

/// Registry backend that keeps everything in memory.
///
/// Behaves like the Windows registry for the operations the facade uses:
/// case-insensitive names, subkeys enumerated in name order, and deleting a
/// key that still has children is refused.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    root: Mutex<Node>,
    read_only: AtomicBool,
}

impl MemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every write with [`RegistryError::AccessDenied`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Store an arbitrary value, creating the key if needed.
    ///
    /// Ignores the read-only flag so tests can seed state.
    pub fn set_value(&self, path: &str, name: &str, value: MemoryValue) -> RegistryResult<()> {
        let parts = split_path(path)?;
        let mut root = self.root.lock();
        root.find_or_create(&parts)
            .values
            .insert(name.to_lowercase(), value);
        Ok(())
    }

    /// Fetch a stored value of any type.
    pub fn value(&self, path: &str, name: &str) -> RegistryResult<Option<MemoryValue>> {
        let parts = split_path(path)?;
        let root = self.root.lock();
        Ok(root
            .find(&parts)
            .and_then(|node| node.values.get(&name.to_lowercase()).cloned()))
    }

    fn check_writable(&self, path: &str) -> RegistryResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(RegistryError::AccessDenied(path.to_string()));
        }
        Ok(())
    }

    fn read_typed<T>(
        &self,
        path: &str,
        name: &str,
        expected: &'static str,
        extract: impl FnOnce(&MemoryValue) -> Option<T>,
    ) -> RegistryResult<Option<T>> {
        match self.value(path, name)? {
            None => Ok(None),
            Some(value) => extract(&value).map(Some).ok_or_else(|| RegistryError::UnexpectedType {
                path: path.to_string(),
                name: name.to_string(),
                expected,
            }),
        }
    }

    fn write_value(&self, path: &str, name: &str, value: MemoryValue) -> RegistryResult<()> {
        self.check_writable(path)?;
        self.set_value(path, name, value)
    }
}

fn split_path(path: &str) -> RegistryResult<Vec<&str>> {
    let parts: Vec<&str> = path.split('\\').collect();
    if parts.iter().any(|part| part.is_empty()) {
        return Err(RegistryError::InvalidPath(path.to_string()));
    }
    Ok(parts)
}

impl RegistryStore for MemoryRegistry {
    fn key_exists(&self, path: &str) -> RegistryResult<bool> {
        let parts = split_path(path)?;
        Ok(self.root.lock().find(&parts).is_some())
    }

    fn create_key(&self, path: &str) -> RegistryResult<()> {
        let parts = split_path(path)?;
        self.check_writable(path)?;
        self.root.lock().find_or_create(&parts);
        Ok(())
    }

    fn delete_key(&self, path: &str) -> RegistryResult<bool> {
        let parts = split_path(path)?;
        let Some((last, parent_parts)) = parts.split_last() else {
            return Err(RegistryError::InvalidPath(path.to_string()));
        };
        self.check_writable(path)?;

        let mut root = self.root.lock();
        let Some(parent) = root.find_mut(parent_parts) else {
            return Ok(false);
        };
        let child_name = last.to_lowercase();
        let has_children = match parent.children.get(&child_name) {
            None => return Ok(false),
            Some(child) => !child.children.is_empty(),
        };
        if has_children {
            return Err(RegistryError::AccessDenied(path.to_string()));
        }
        Ok(parent.children.remove(&child_name).is_some())
    }

    fn subkey_names(&self, path: &str) -> RegistryResult<Option<Vec<String>>> {
        let parts = split_path(path)?;
        let root = self.root.lock();
        Ok(root
            .find(&parts)
            .map(|node| node.children.values().map(|child| child.name.clone()).collect()))
    }

    fn read_dword(&self, path: &str, name: &str) -> RegistryResult<Option<u32>> {
        self.read_typed(path, name, "REG_DWORD", |value| match value {
            MemoryValue::Dword(v) => Some(*v),
            _ => None,
        })
    }

    fn write_dword(&self, path: &str, name: &str, value: u32) -> RegistryResult<()> {
        self.write_value(path, name, MemoryValue::Dword(value))
    }

    fn read_multi_string(&self, path: &str, name: &str) -> RegistryResult<Option<Vec<String>>> {
        self.read_typed(path, name, "REG_MULTI_SZ", |value| match value {
            MemoryValue::MultiString(v) => Some(v.clone()),
            _ => None,
        })
    }

    fn write_multi_string(&self, path: &str, name: &str, values: &[String]) -> RegistryResult<()> {
        self.write_value(path, name, MemoryValue::MultiString(values.to_vec()))
    }
}
