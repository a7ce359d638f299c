//! `tomebridge` command line.
//!
//! Loads a world snapshot, runs one use case against it and renders the
//! report through the notification port. The snapshot is only written back
//! with `--write`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tomebridge_domain::OwnershipLevel;

use crate::app::App;
use crate::infrastructure::filesystem::{FileInputSource, LocalAssetProbe, LocalFolderBrowser};
use crate::infrastructure::ports::NotificationPort;
use crate::infrastructure::settings::ImportSettings;
use crate::infrastructure::snapshot_store::SnapshotStore;
use crate::use_cases::{
    ImageSource, ImportReport, ImportRequest, LinkReport, MergeReport, MergeRequest,
    OwnershipReport, RefreshReport,
};

#[derive(Debug, Parser)]
#[command(
    name = "tomebridge",
    version,
    about = "Import characters into actor folders and reconcile duplicates"
)]
pub struct Cli {
    /// World snapshot to operate on (an empty world if missing)
    #[arg(long)]
    pub world: PathBuf,

    /// Persist the resulting snapshot; otherwise the run is a dry run
    #[arg(long, global = true)]
    pub write: bool,

    /// Root that image paths are relative to
    #[arg(long, global = true, default_value = ".")]
    pub data_root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import a characters JSON document into the import folder
    Import(ImportArgs),
    /// Move actors from the import folder into the canonical folder
    Merge(MergeArgs),
    /// Import, then merge the import folder into the canonical folder
    Sync(SyncArgs),
    /// Enable "Link Actor Data" for every actor in a folder
    Link(FolderArgs),
    /// Set the default ownership level for every actor in a folder
    Ownership(OwnershipArgs),
    /// Re-resolve actor images by probing the image base path
    RefreshImages(RefreshArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Characters JSON document
    #[arg(long)]
    pub characters: PathBuf,

    /// Folder to browse for images, relative to the data root
    #[arg(long, required_unless_present = "probe", conflicts_with = "probe")]
    pub images: Option<String>,

    /// Probe the image base path instead of browsing a folder
    #[arg(long)]
    pub probe: bool,

    /// Base path probed with `--probe`
    #[arg(long, requires = "probe")]
    pub image_base: Option<String>,

    /// Folder that receives the actors
    #[arg(long)]
    pub folder: Option<String>,
}

impl ImportArgs {
    fn request(&self, settings: &ImportSettings) -> ImportRequest {
        let images = match &self.images {
            Some(root) => ImageSource::Browse { root: root.clone() },
            None => ImageSource::Probe {
                base: self
                    .image_base
                    .clone()
                    .unwrap_or_else(|| settings.image_base.clone()),
            },
        };
        ImportRequest {
            folder: self
                .folder
                .clone()
                .unwrap_or_else(|| settings.import_folder.clone()),
            images,
        }
    }
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub target: Option<String>,
    /// Include actors in subfolders of the source and target folders
    #[arg(long)]
    pub include_subfolders: bool,
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub import: ImportArgs,
    #[arg(long)]
    pub target: Option<String>,
    #[arg(long)]
    pub include_subfolders: bool,
}

#[derive(Debug, Args)]
pub struct FolderArgs {
    #[arg(long)]
    pub folder: Option<String>,
}

#[derive(Debug, Args)]
pub struct OwnershipArgs {
    #[arg(long)]
    pub folder: Option<String>,
    /// inherit, none, limited, observer or owner
    #[arg(long, default_value = "limited")]
    pub level: OwnershipLevel,
}

#[derive(Debug, Args)]
pub struct RefreshArgs {
    #[arg(long)]
    pub folder: Option<String>,
    #[arg(long)]
    pub image_base: Option<String>,
}

/// Run one command against the world snapshot.
pub async fn run(
    cli: Cli,
    settings: ImportSettings,
    notifier: &dyn NotificationPort,
) -> anyhow::Result<()> {
    let world = cli.world;
    let store = Arc::new(
        SnapshotStore::load(&world)
            .await
            .with_context(|| format!("loading world snapshot {}", world.display()))?,
    );
    let app = App::new(
        store.clone(),
        store.clone(),
        Arc::new(LocalFolderBrowser::new(&cli.data_root)),
        Arc::new(LocalAssetProbe::new(&cli.data_root)),
        settings.mapping_defaults(),
    );

    match cli.command {
        Command::Import(args) => {
            let input = FileInputSource::new(&args.characters);
            let report = app
                .use_cases
                .import
                .execute(&input, &args.request(&settings))
                .await?;
            render_import(&report, notifier);
        }
        Command::Merge(args) => {
            let request = MergeRequest {
                source: args.source.unwrap_or_else(|| settings.import_folder.clone()),
                target: args.target.unwrap_or_else(|| settings.target_folder.clone()),
                include_subfolders: args.include_subfolders || settings.include_subfolders,
            };
            let report = app.use_cases.merge.execute(&request).await?;
            render_merge(&report, notifier);
        }
        Command::Sync(args) => {
            let input = FileInputSource::new(&args.import.characters);
            let target = args
                .target
                .unwrap_or_else(|| settings.target_folder.clone());
            let report = app
                .use_cases
                .sync
                .execute(
                    &input,
                    &args.import.request(&settings),
                    &target,
                    args.include_subfolders || settings.include_subfolders,
                )
                .await?;
            render_import(&report.import, notifier);
            render_merge(&report.merge, notifier);
        }
        Command::Link(args) => {
            let folder = args
                .folder
                .unwrap_or_else(|| settings.target_folder.clone());
            let report = app
                .use_cases
                .maintenance
                .link_actor_data
                .execute(&folder)
                .await?;
            render_link(&report, notifier);
        }
        Command::Ownership(args) => {
            let folder = args
                .folder
                .unwrap_or_else(|| settings.target_folder.clone());
            let report = app
                .use_cases
                .maintenance
                .default_ownership
                .execute(&folder, args.level)
                .await?;
            render_ownership(&report, notifier);
        }
        Command::RefreshImages(args) => {
            let folder = args
                .folder
                .unwrap_or_else(|| settings.target_folder.clone());
            let base = args
                .image_base
                .unwrap_or_else(|| settings.image_base.clone());
            let report = app
                .use_cases
                .maintenance
                .refresh_images
                .execute(&folder, &base)
                .await?;
            render_refresh(&report, notifier);
        }
    }

    if cli.write {
        store
            .save(&world)
            .await
            .with_context(|| format!("writing world snapshot {}", world.display()))?;
        tracing::info!(path = %world.display(), "Saved world snapshot");
    } else {
        notifier.info("Dry run: world snapshot not written (pass --write to save).");
    }
    Ok(())
}

// =============================================================================
// Report rendering
// =============================================================================

pub fn render_import(report: &ImportReport, notifier: &dyn NotificationPort) {
    notifier.info(&format!(
        "Import: {} new, {} updated - Folder \"{}\" (Images from: {}).",
        report.created, report.updated, report.folder, report.images_from
    ));
    if !report.without_portrait.is_empty() {
        notifier.info(&format!(
            "No portrait found for {} character(s): {}",
            report.without_portrait.len(),
            report.without_portrait.join(", ")
        ));
    }
}

pub fn render_merge(report: &MergeReport, notifier: &dyn NotificationPort) {
    match report {
        MergeReport::NothingToDo {
            source,
            include_subfolders,
        } => {
            let scope = if *include_subfolders {
                " (including subfolders)"
            } else {
                ""
            };
            notifier.warn(&format!("No Actors found in folder \"{source}\"{scope}."));
        }
        MergeReport::AllDuplicates {
            target,
            eligible,
            skipped,
        } => {
            notifier.info(&format!(
                "Nothing to move - all {eligible} Actor(s) already exist with the same names in \"{target}\"."
            ));
            render_skipped(skipped, notifier);
        }
        MergeReport::Moved {
            target,
            moved,
            skipped,
        } => {
            notifier.info(&format!(
                "Moved: {moved} Actor(s) to \"{target}\". Skipped (duplicates): {}.",
                skipped.len()
            ));
            render_skipped(skipped, notifier);
        }
    }
}

fn render_skipped(skipped: &[String], notifier: &dyn NotificationPort) {
    if !skipped.is_empty() {
        notifier.info(&format!("Skipped (name duplicates): {}", skipped.join(", ")));
    }
}

pub fn render_link(report: &LinkReport, notifier: &dyn NotificationPort) {
    match report {
        LinkReport::FolderEmpty { folder } => {
            notifier.warn(&format!("No Actors found in folder \"{folder}\"."));
        }
        LinkReport::AlreadyLinked { total, .. } => notifier.info(&format!(
            "All {total} Actor(s) in the folder already have \"Link Actor Data\" enabled."
        )),
        LinkReport::Linked {
            folder, updated, ..
        } => notifier.info(&format!(
            "\"Link Actor Data\" enabled for {updated} Actor(s) in folder \"{folder}\"."
        )),
    }
}

pub fn render_ownership(report: &OwnershipReport, notifier: &dyn NotificationPort) {
    match report {
        OwnershipReport::FolderEmpty { folder } => {
            notifier.warn(&format!("No Actors found in \"{folder}\"."));
        }
        OwnershipReport::Updated {
            folder,
            updated,
            level,
        } => notifier.info(&format!(
            "Ownership set: {updated} Actor(s) in \"{folder}\" -> All Players = {level}."
        )),
    }
}

pub fn render_refresh(report: &RefreshReport, notifier: &dyn NotificationPort) {
    for name in &report.unmatched {
        notifier.info(&format!("No image files found for {name}."));
    }
    notifier.info(&format!(
        "Actor images updated: {} Actor(s), {} without images.",
        report.updated,
        report.unmatched.len()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockNotificationPort, NoticeLevel};
    use crate::infrastructure::snapshot_store::WorldSnapshot;
    use std::ffi::OsString;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;
    use tomebridge_domain::FolderKind;

    /// Notifier that records every message.
    #[derive(Default)]
    struct Recorder(Mutex<Vec<(NoticeLevel, String)>>);

    impl NotificationPort for Recorder {
        fn notify(&self, level: NoticeLevel, message: &str) {
            self.0
                .lock()
                .expect("lock")
                .push((level, message.to_string()));
        }
    }

    impl Recorder {
        fn messages(&self) -> Vec<(NoticeLevel, String)> {
            self.0.lock().expect("lock").clone()
        }
    }

    #[test]
    fn parses_import_with_browse_folder() {
        let cli = Cli::try_parse_from([
            "tomebridge",
            "--world",
            "world.json",
            "import",
            "--characters",
            "characters.json",
            "--images",
            "portraits",
        ])
        .expect("parse");

        let Command::Import(args) = cli.command else {
            panic!("expected import");
        };
        let request = args.request(&ImportSettings::default());
        assert_eq!(request.folder, "Tome");
        assert_eq!(
            request.images,
            ImageSource::Browse {
                root: "portraits".to_string()
            }
        );
    }

    #[test]
    fn import_requires_an_image_source() {
        let result = Cli::try_parse_from([
            "tomebridge",
            "--world",
            "world.json",
            "import",
            "--characters",
            "characters.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn probe_uses_configured_base_unless_overridden() {
        let cli = Cli::try_parse_from([
            "tomebridge",
            "--world",
            "w.json",
            "import",
            "--characters",
            "c.json",
            "--probe",
        ])
        .expect("parse");
        let Command::Import(args) = cli.command else {
            panic!("expected import");
        };
        assert_eq!(
            args.request(&ImportSettings::default()).images,
            ImageSource::Probe {
                base: "assets/images/dnd/characters".to_string()
            }
        );
    }

    #[test]
    fn ownership_level_parses_by_name() {
        let cli = Cli::try_parse_from([
            "tomebridge",
            "--world",
            "w.json",
            "ownership",
            "--level",
            "observer",
        ])
        .expect("parse");
        let Command::Ownership(args) = cli.command else {
            panic!("expected ownership");
        };
        assert_eq!(args.level, OwnershipLevel::Observer);
    }

    #[test]
    fn merge_nothing_to_do_warns_with_subfolder_hint() {
        let mut notifier = MockNotificationPort::new();
        notifier
            .expect_notify()
            .withf(|level, message| {
                *level == NoticeLevel::Warn
                    && message == "No Actors found in folder \"Tome\" (including subfolders)."
            })
            .times(1)
            .return_const(());

        render_merge(
            &MergeReport::NothingToDo {
                source: "Tome".to_string(),
                include_subfolders: true,
            },
            &notifier,
        );
    }

    #[test]
    fn merge_moved_lists_skipped_names() {
        let recorder = Recorder::default();
        render_merge(
            &MergeReport::Moved {
                target: "NPCs".to_string(),
                moved: 3,
                skipped: vec!["Guard".to_string(), "Mira".to_string()],
            },
            &recorder,
        );

        assert_eq!(
            recorder.messages(),
            vec![
                (
                    NoticeLevel::Info,
                    "Moved: 3 Actor(s) to \"NPCs\". Skipped (duplicates): 2.".to_string()
                ),
                (
                    NoticeLevel::Info,
                    "Skipped (name duplicates): Guard, Mira".to_string()
                ),
            ]
        );
    }

    #[tokio::test]
    async fn sync_with_write_persists_the_snapshot() {
        let dir = TempDir::new().expect("tempdir");
        let data = dir.path().join("data");
        fs::create_dir_all(data.join("portraits")).expect("mkdir");
        fs::write(data.join("portraits/mira.png"), b"png").expect("write");
        fs::write(data.join("portraits/mira token.png"), b"png").expect("write");
        let characters = dir.path().join("characters.json");
        fs::write(
            &characters,
            r#"[{"name":"Mira","race":"Elf","content":{"excerpt":"A scout."}}]"#,
        )
        .expect("write");
        let world = dir.path().join("world.json");

        let args: Vec<OsString> = vec![
            "tomebridge".into(),
            "--world".into(),
            world.clone().into_os_string(),
            "--write".into(),
            "--data-root".into(),
            data.into_os_string(),
            "sync".into(),
            "--characters".into(),
            characters.into_os_string(),
            "--images".into(),
            "portraits".into(),
        ];
        let cli = Cli::try_parse_from(args).expect("parse");

        let recorder = Recorder::default();
        run(cli, ImportSettings::default(), &recorder)
            .await
            .expect("run");

        let saved: WorldSnapshot =
            serde_json::from_str(&fs::read_to_string(&world).expect("read")).expect("parse");
        let npcs = saved
            .folders
            .iter()
            .find(|f| f.name == "NPCs" && f.kind == FolderKind::Actor)
            .expect("NPCs created");
        assert_eq!(saved.actors.len(), 1);
        let mira = &saved.actors[0];
        assert_eq!(mira.folder, Some(npcs.id));
        assert_eq!(mira.img.as_deref(), Some("portraits/mira.png"));
        assert_eq!(
            mira.prototype_token.texture.src.as_deref(),
            Some("portraits/mira token.png")
        );

        let messages = recorder.messages();
        assert_eq!(
            messages[0].1,
            "Import: 1 new, 0 updated - Folder \"Tome\" (Images from: portraits)."
        );
        assert_eq!(messages[1].1, "Moved: 1 Actor(s) to \"NPCs\". Skipped (duplicates): 0.");
    }

    #[tokio::test]
    async fn dry_run_leaves_no_snapshot_behind() {
        let dir = TempDir::new().expect("tempdir");
        let world = dir.path().join("world.json");
        let args: Vec<OsString> = vec![
            "tomebridge".into(),
            "--world".into(),
            world.clone().into_os_string(),
            "merge".into(),
        ];
        let cli = Cli::try_parse_from(args).expect("parse");

        let recorder = Recorder::default();
        let err = run(cli, ImportSettings::default(), &recorder)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Folder \"Tome\" not found"));
        assert!(!world.exists());
    }
}
