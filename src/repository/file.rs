use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::RwLock;

use crate::book::{Book, BookDraft, BookId, BookPatch};
use crate::repository::memory;
use crate::repository::{BookRepository, RepositoryError};

/// Repository persisted as a JSON array on disk.
///
/// The whole list is rewritten after every mutation: the snapshot goes to a
/// temporary sibling first and is then renamed over the data file. A
/// mutation whose write fails leaves the in-memory list untouched.
///
/// A sibling `.lock` file is held with an exclusive lock for the lifetime of
/// the repository, so two servers cannot share a data file.
pub struct FileRepository {
    path: PathBuf,
    books: RwLock<Vec<Book>>,
    _lock: File,
}

impl FileRepository {
    /// Open (or create) the data file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RepositoryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let lock_path = sibling(&path, "lock");
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|source| RepositoryError::Io {
                path: lock_path.clone(),
                source,
            })?;
        lock.try_lock_exclusive()
            .map_err(|_| RepositoryError::Locked { path: path.clone() })?;

        let books = load(&path)?;
        tracing::info!(path = %path.display(), books = books.len(), "Opened book data file");

        Ok(Self {
            path,
            books: RwLock::new(books),
            _lock: lock,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `op` against a copy of the list and commit it only if the write
    /// to disk succeeds.
    fn mutate<T>(&self, op: impl FnOnce(&mut Vec<Book>) -> T) -> Result<T, RepositoryError> {
        let mut guard = self.books.write();
        let mut next = guard.clone();
        let result = op(&mut next);
        if next != *guard {
            persist(&self.path, &next)?;
            *guard = next;
        }
        Ok(result)
    }
}

impl BookRepository for FileRepository {
    fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.books.read().clone())
    }

    fn get(&self, id: &BookId) -> Result<Option<Book>, RepositoryError> {
        Ok(memory::find(&self.books.read(), id).cloned())
    }

    fn insert(&self, draft: BookDraft) -> Result<Book, RepositoryError> {
        self.mutate(|books| memory::insert(books, draft))
    }

    fn update(&self, id: &BookId, patch: BookPatch) -> Result<Option<Book>, RepositoryError> {
        self.mutate(|books| memory::update(books, id, patch))
    }

    fn delete(&self, id: &BookId) -> Result<Option<Book>, RepositoryError> {
        self.mutate(|books| memory::delete(books, id))
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.books.read().len())
    }
}

fn sibling(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(extension);
    path.with_file_name(name)
}

fn load(path: &Path) -> Result<Vec<Book>, RepositoryError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read(path).map_err(|source| RepositoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&content).map_err(|source| RepositoryError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn persist(path: &Path, books: &[Book]) -> Result<(), RepositoryError> {
    let json = serde_json::to_vec_pretty(books).map_err(|source| RepositoryError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = sibling(path, "tmp");
    fs::write(&tmp, json).map_err(|source| RepositoryError::Io {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| RepositoryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_appends_extension_to_full_file_name() {
        let path = Path::new("/data/books.json");
        assert_eq!(sibling(path, "lock"), PathBuf::from("/data/books.json.lock"));
        assert_eq!(sibling(path, "tmp"), PathBuf::from("/data/books.json.tmp"));
    }
}
