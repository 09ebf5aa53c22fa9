use anyhow::{Context, Result};

use crate::{context, storage};

pub fn init_data_dir(ctx: &context::Context) -> Result<()> {
    std::fs::create_dir_all(&ctx.data_dir)?;
    Ok(())
}

pub fn init_storage(ctx: &context::Context) -> Result<storage::SqliteStorage> {
    let sqlite = storage::SqliteStorage::new(ctx.db_path());
    if ctx.reset {
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;
    Ok(sqlite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{NewBook, Storage};

    fn ctx(dir: &std::path::Path, reset: bool) -> context::Context {
        context::Context {
            data_dir: dir.join("data"),
            db_file: "catalog.db".to_string(),
            listen: "127.0.0.1:0".parse().unwrap(),
            log_file: None,
            reset,
        }
    }

    #[test]
    fn init_creates_data_dir_and_database() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx(dir.path(), false);

        init_data_dir(&ctx).unwrap();
        init_storage(&ctx).unwrap();

        assert!(ctx.db_path().exists());
    }

    #[test]
    fn reset_starts_from_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let keep = ctx(dir.path(), false);
        init_data_dir(&keep).unwrap();
        let storage = init_storage(&keep).unwrap();
        storage
            .add_book(&NewBook {
                title: "Emma".to_string(),
                author: "Austen".to_string(),
                genre: None,
                publication_year: None,
                isbn: "1".to_string(),
            })
            .unwrap();

        let reopened = init_storage(&keep).unwrap();
        assert_eq!(reopened.list_books().unwrap().len(), 1);

        let reset = init_storage(&ctx(dir.path(), true)).unwrap();
        assert!(reset.list_books().unwrap().is_empty());
    }
}
