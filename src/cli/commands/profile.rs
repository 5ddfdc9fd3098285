use super::{image_arg, report_migration};
use crate::cli::parser::{Commands, ProfileAction};
use crate::config::Config;
use crate::core::migration::MigrationReport;
use crate::core::profile::ProfileLogic;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::files::{ImageRef, PrivateFileStore};
use crate::models::Profile;
use crate::store::{Repository, SqlitePreferences};
use crate::ui::messages::{header, success, warning};
use crate::utils::colors::{availability, colorize_optional};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Profile { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let repo = Repository::new(SqlitePreferences::new(&pool.conn));
    let files = PrivateFileStore::from_config(cfg);

    // Opening the profile screen migrates a foreign ID image.
    let (profile, moved) = ProfileLogic::open(&repo, &files)?;
    report_migration(
        &pool.conn,
        &MigrationReport {
            profile_id: moved,
            ..Default::default()
        },
    );

    match action {
        ProfileAction::Show => show(&profile, &files),

        ProfileAction::Set { name, apartment } => {
            if name.is_none() && apartment.is_none() {
                warning("Nothing to update: use --name and/or --apartment.");
                return Ok(());
            }
            let updated = ProfileLogic::update(&repo, name.as_deref(), apartment.as_deref())?;
            ttlog_quiet(&pool.conn, "profile", "profile", "name/apartment updated");
            success("Profile updated.");
            show(&updated, &files);
        }

        ProfileAction::SetId { file } => {
            let updated = ProfileLogic::set_id_image(&repo, &files, &image_arg(file))?;
            ttlog_quiet(&pool.conn, "profile", "my_id", updated.my_id_uri.as_str());
            success(format!("ID image saved as {}", updated.my_id_uri));
        }

        ProfileAction::SetPhoto { file } => {
            let updated = ProfileLogic::set_photo(&repo, &files, &image_arg(file))?;
            ttlog_quiet(&pool.conn, "profile", "photo", updated.profile_photo_uri.as_str());
            success(format!("Profile photo saved as {}", updated.profile_photo_uri));
        }

        ProfileAction::Id => {
            let path = ProfileLogic::id_card_path(&profile, &files)?;
            println!("🪪 {}", path.display());
        }
    }

    Ok(())
}

fn show(profile: &Profile, files: &PrivateFileStore) {
    let image_status = |r: &ImageRef| {
        if r.is_blank() {
            colorize_optional("-")
        } else {
            availability(files.is_readable(r))
        }
    };

    header("Profile");
    println!("Name      : {}", colorize_optional(&profile.name));
    println!("Apartment : {}", colorize_optional(&profile.apartment));
    println!("Photo     : {}", image_status(&profile.profile_photo_uri));
    println!("My ID     : {}", image_status(&profile.my_id_uri));
}
