use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally zipped.
    /// Returns the written path, or `None` when the user declined to overwrite.
    pub fn backup(
        pool: &DbPool,
        cfg: &Config,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);
        let dest = Path::new(dest_file);

        if !src.exists() {
            return Err(AppError::Other(format!(
                "database not found: {}",
                src.display()
            )));
        }
        if !dest.is_absolute() {
            return Err(AppError::InvalidInput(format!(
                "backup path must be absolute: {dest_file}"
            )));
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let target = if compress { dest.with_extension("zip") } else { dest.to_path_buf() };
        if compress && target == dest {
            return Err(AppError::InvalidInput(
                "with --compress the backup file must not already end in .zip".into(),
            ));
        }
        if target.exists()
            && !force
            && !confirm(&format!("The file '{}' already exists. Overwrite?", target.display()))?
        {
            info("Backup cancelled.");
            return Ok(None);
        }

        // flush the WAL / pending pages into the main file before copying
        pool.conn.execute_batch("PRAGMA wal_checkpoint(FULL);").ok();

        fs::copy(src, dest)?;

        let final_path = if compress {
            let zipped = compress_backup(dest)?;
            if let Err(e) = fs::remove_file(dest) {
                warning(format!("Failed to remove uncompressed copy: {e}"));
            }
            zipped
        } else {
            dest.to_path_buf()
        };

        success(format!("Backup created: {}", final_path.display()));

        audit_quiet(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(Some(final_path))
    }
}

fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wastedesk.sqlite".to_string());

    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name, options)
        .map_err(|e| AppError::Other(format!("zip error: {e}")))?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish()
        .map_err(|e| AppError::Other(format!("zip error: {e}")))?;

    Ok(zip_path)
}
