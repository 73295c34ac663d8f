//! System abstraction for filesystem operations
//!
//! This module provides a trait-based abstraction over filesystem operations,
//! so installing, adding and listing hooks can be tested without a real disk.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file (or anything that is not a directory)
    File,
    /// Directory
    Dir,
}

/// A single entry returned by [`System::read_dir`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name of the entry (no directory part)
    pub name: String,
    /// Whether the entry is a file or a directory
    pub kind: EntryKind,
}

impl DirEntry {
    /// Whether the entry is a directory
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Whether the entry is a file
    #[inline]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// The subset of file metadata hookah cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// Entry kind
    pub kind: EntryKind,
    /// Unix permission bits (`0o644` style)
    pub mode: u32,
    /// Size in bytes (0 for directories)
    pub len: u64,
}

impl FileStat {
    /// Whether any execute bit is set
    #[inline]
    pub fn is_executable(&self) -> bool {
        self.kind == EntryKind::File && self.mode & 0o111 != 0
    }
}

/// Abstraction over filesystem operations
///
/// This trait allows us to implement different backends:
/// - `RealSystem`: Actual filesystem operations
/// - `MemorySystem`: In-memory tree for tests
pub trait System {
    /// Read a file's contents
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write a file's contents with optional permissions, creating parent directories
    fn write_file(&self, path: &Path, content: &[u8], mode: Option<u32>) -> Result<()>;

    /// Create a directory and all of its parents; an existing directory is not an error
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// List a directory, sorted by file name
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Get file metadata
    fn metadata(&self, path: &Path) -> Result<FileStat>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Rename a file or directory
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Check if a path is a directory
    fn is_dir(&self, path: &Path) -> bool {
        self.metadata(path)
            .is_ok_and(|stat| stat.kind == EntryKind::Dir)
    }
}

/// Real filesystem implementation
///
/// This implementation performs actual filesystem operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealSystem;

impl System for RealSystem {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn write_file(&self, path: &Path, content: &[u8], mode: Option<u32>) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            self.create_dir_all(parent)?;
        }

        fs::write(path, content).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        #[cfg(unix)]
        if let Some(mode) = mode {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(mode);
            fs::set_permissions(path, permissions).map_err(|e| Error::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        #[cfg(not(unix))]
        let _ = mode;

        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        match fs::create_dir_all(path) {
            Ok(()) => Ok(()),
            // Lost a race with another process creating the same directory
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            Err(e) => Err(Error::DirectoryCreate {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let read_err = |e| Error::DirectoryRead {
            path: path.to_path_buf(),
            source: e,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            // Follow symlinks so a linked script counts as a file
            let kind = if entry.path().is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }

        // Sort by filename for consistent ordering
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn metadata(&self, path: &Path) -> Result<FileStat> {
        let metadata = fs::metadata(path).map_err(|e| Error::Metadata {
            path: path.to_path_buf(),
            source: e,
        })?;

        #[cfg(unix)]
        let mode = {
            use std::os::unix::fs::PermissionsExt;
            metadata.permissions().mode() & 0o7777
        };

        #[cfg(not(unix))]
        let mode = if metadata.permissions().readonly() {
            0o444
        } else {
            0o644
        };

        Ok(FileStat {
            kind: if metadata.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            },
            mode,
            len: if metadata.is_dir() { 0 } else { metadata.len() },
        })
    }

    fn exists(&self, path: &Path) -> bool {
        // A dangling symlink still occupies the slot
        path.symlink_metadata().is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).map_err(|e| Error::Rename {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source: e,
        })
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| Error::Remove {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[derive(Debug, Clone)]
enum Node {
    File { content: Vec<u8>, mode: u32 },
    Dir,
}

/// In-memory filesystem
///
/// Paths are stored as given, so tests should use absolute paths
/// (`/repo/.git/hooks`). The root directory always exists.
#[derive(Debug, Default)]
pub struct MemorySystem {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
}

impl MemorySystem {
    /// Create an empty in-memory filesystem
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{}: no such file or directory", path.display()),
        )
    }

    fn is_root(path: &Path) -> bool {
        path.parent().is_none()
    }

    fn node(&self, path: &Path) -> Option<Node> {
        if Self::is_root(path) {
            return Some(Node::Dir);
        }
        self.nodes.borrow().get(path).cloned()
    }

    fn ensure_dirs(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.ancestors().collect::<Vec<_>>().into_iter().rev() {
            if Self::is_root(ancestor) || ancestor.as_os_str().is_empty() {
                continue;
            }
            match nodes.get(ancestor) {
                Some(Node::Dir) => {}
                Some(Node::File { .. }) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("{} exists and is not a directory", ancestor.display()),
                    ));
                }
                None => {
                    nodes.insert(ancestor.to_path_buf(), Node::Dir);
                }
            }
        }
        Ok(())
    }
}

impl System for MemorySystem {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        match self.node(path) {
            Some(Node::File { content, .. }) => Ok(content),
            Some(Node::Dir) => Err(Error::FileRead {
                path: path.to_path_buf(),
                source: io::Error::other("is a directory"),
            }),
            None => Err(Error::FileRead {
                path: path.to_path_buf(),
                source: Self::not_found(path),
            }),
        }
    }

    fn write_file(&self, path: &Path, content: &[u8], mode: Option<u32>) -> Result<()> {
        let write_err = |source| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            self.ensure_dirs(parent).map_err(write_err)?;
        }

        let mut nodes = self.nodes.borrow_mut();
        let mode = match (nodes.get(path), mode) {
            (Some(Node::Dir), _) => return Err(write_err(io::Error::other("is a directory"))),
            (_, Some(mode)) => mode,
            (Some(Node::File { mode, .. }), None) => *mode,
            (None, None) => 0o644,
        };
        nodes.insert(
            path.to_path_buf(),
            Node::File {
                content: content.to_vec(),
                mode,
            },
        );
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.ensure_dirs(path).map_err(|e| Error::DirectoryCreate {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let read_err = |source| Error::DirectoryRead {
            path: path.to_path_buf(),
            source,
        };

        match self.node(path) {
            Some(Node::Dir) => {}
            Some(Node::File { .. }) => return Err(read_err(io::Error::other("not a directory"))),
            None => return Err(read_err(Self::not_found(path))),
        }

        // BTreeMap iteration keeps children sorted by name
        let entries = self
            .nodes
            .borrow()
            .iter()
            .filter(|(child, _)| child.parent() == Some(path))
            .filter_map(|(child, node)| {
                let name = child.file_name()?.to_string_lossy().into_owned();
                let kind = match node {
                    Node::Dir => EntryKind::Dir,
                    Node::File { .. } => EntryKind::File,
                };
                Some(DirEntry { name, kind })
            })
            .collect();
        Ok(entries)
    }

    fn metadata(&self, path: &Path) -> Result<FileStat> {
        match self.node(path) {
            Some(Node::Dir) => Ok(FileStat {
                kind: EntryKind::Dir,
                mode: 0o755,
                len: 0,
            }),
            Some(Node::File { content, mode }) => Ok(FileStat {
                kind: EntryKind::File,
                mode,
                len: content.len() as u64,
            }),
            None => Err(Error::Metadata {
                path: path.to_path_buf(),
                source: Self::not_found(path),
            }),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.node(path).is_some()
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let rename_err = |source| Error::Rename {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        };

        if self.node(from).is_none() || Self::is_root(from) {
            return Err(rename_err(Self::not_found(from)));
        }
        if self.exists(to) {
            return Err(rename_err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", to.display()),
            )));
        }
        if let Some(parent) = to.parent() {
            self.ensure_dirs(parent).map_err(rename_err)?;
        }

        let mut nodes = self.nodes.borrow_mut();
        let moved: Vec<PathBuf> = nodes
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = nodes.remove(&old) {
                let suffix = old.strip_prefix(from).unwrap_or(Path::new(""));
                let new = if suffix.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(suffix)
                };
                nodes.insert(new, node);
            }
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        match nodes.get(path) {
            Some(Node::File { .. }) => {
                nodes.remove(path);
                Ok(())
            }
            Some(Node::Dir) => Err(Error::Remove {
                path: path.to_path_buf(),
                source: io::Error::other("is a directory"),
            }),
            None => Err(Error::Remove {
                path: path.to_path_buf(),
                source: Self::not_found(path),
            }),
        }
    }
}
