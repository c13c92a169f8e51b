//! Classification of directory entries and the access filter.

use {
    crate::{
        error::Error,
        fs::{EntryKind, Filesystem},
        item::ItemType,
        utils::Result,
    },
    log::{debug, error},
    nix::errno::Errno,
    std::path::Path,
};

/// Determine the item type of the entry at `path`.
///
/// Fails when the entry cannot be examined; used for the requested entry,
/// where the client has to learn about the failure.
pub fn classify_entry<Fs: Filesystem>(fs: &Fs, path: &Path) -> Result<ItemType> {
    let classification = |source| Error::Classification {
        path: path.to_path_buf(),
        source,
    };

    match fs.stat(path).map_err(classification)? {
        EntryKind::Directory => Ok(ItemType::Directory),
        EntryKind::Regular => {
            let mime = fs.sniff(path).map_err(classification)?;
            Ok(ItemType::from_mime(&mime))
        }
        EntryKind::Other => Ok(ItemType::Unknown),
    }
}

/// Determine the item type of the entry at `path`.
///
/// An entry that cannot be examined is `Unknown`, which is never served.
pub fn classify<Fs: Filesystem>(fs: &Fs, path: &Path) -> ItemType {
    classify_entry(fs, path).unwrap_or_else(|e| {
        debug!("{}", e);
        ItemType::Unknown
    })
}

/// Whether the server may serve the entry at `path` as an item of type
/// `typ`.
///
/// Missing entries and missing permissions just make the entry inaccessible.
/// Other failures are logged, and the entry is inaccessible as well.
pub fn accessible<Fs: Filesystem>(fs: &Fs, path: &Path, typ: ItemType) -> bool {
    let Some(mode) = typ.required_access() else {
        return false;
    };

    match fs.access(path, mode) {
        Ok(()) => true,
        Err(Errno::EACCES) | Err(Errno::ENOENT) => {
            debug!("missing rights: {:?}", path);
            false
        }
        Err(e) => {
            error!("access error: {:?}: {}", path, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fs::HostFs, memfs::MemFs};

    fn tree() -> MemFs {
        MemFs::new()
            .dir("/srv")
            .dir("/srv/pub")
            .text("/srv/readme", "hello\n")
            .file("/srv/index.html", "text/html", b"<html></html>")
            .file("/srv/logo.gif", "image/gif", b"GIF89a")
            .file("/srv/photo.png", "image/png", b"\x89PNG")
            .file("/srv/song.ogg", "application/ogg", b"OggS")
            .file("/srv/src.tar.gz", "application/x-gzip", b"\x1f\x8b")
            .file("/srv/prog", "application/x-executable", b"\x7fELF")
            .special("/srv/fifo")
    }

    #[test]
    fn classification() {
        let fs = tree();
        let typ = |p: &str| classify(&fs, Path::new(p));
        assert_eq!(typ("/srv/pub"), ItemType::Directory);
        assert_eq!(typ("/srv/readme"), ItemType::File);
        assert_eq!(typ("/srv/index.html"), ItemType::Html);
        assert_eq!(typ("/srv/logo.gif"), ItemType::Gif);
        assert_eq!(typ("/srv/photo.png"), ItemType::Image);
        assert_eq!(typ("/srv/song.ogg"), ItemType::Audio);
        assert_eq!(typ("/srv/src.tar.gz"), ItemType::Archive);
        assert_eq!(typ("/srv/prog"), ItemType::Binary);
        assert_eq!(typ("/srv/fifo"), ItemType::Unknown);
        assert_eq!(typ("/srv/missing"), ItemType::Unknown);
    }

    #[test]
    fn text_with_short_signature_prefix() {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in [
            ("bmw.txt", "BMW service notes\nchange oil\n"),
            ("initials.txt", "MZ is my initials\n"),
            ("tags.txt", "ID3 tags explained\n"),
        ] {
            let file = dir.path().join(name);
            std::fs::write(&file, content).unwrap();
            assert_eq!(classify(&HostFs, &file), ItemType::File, "{}", name);
        }
    }

    #[test]
    fn classification_failure_is_reported() {
        let fs = tree();
        match classify_entry(&fs, Path::new("/srv/missing")) {
            Err(Error::Classification { path, .. }) => assert_eq!(path, Path::new("/srv/missing")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn access_filter() {
        let fs = tree()
            .deny("/srv/readme", Errno::EACCES)
            .deny("/srv/logo.gif", Errno::EIO);

        assert!(accessible(&fs, Path::new("/srv/pub"), ItemType::Directory));
        assert!(accessible(&fs, Path::new("/srv/prog"), ItemType::Binary));
        assert!(!accessible(&fs, Path::new("/srv/readme"), ItemType::File));
        assert!(!accessible(&fs, Path::new("/srv/logo.gif"), ItemType::Gif));
        assert!(!accessible(&fs, Path::new("/srv/missing"), ItemType::File));
        // never served, whatever the permissions
        assert!(!accessible(&fs, Path::new("/srv/fifo"), ItemType::Unknown));
    }
}
