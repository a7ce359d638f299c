//! Application state and composition.

use std::sync::Arc;

use tomebridge_domain::MappingDefaults;

use crate::entities;
use crate::infrastructure::ports::{ActorRepo, AssetProbe, FolderBrowser, FolderRepo};
use crate::use_cases;

/// Main application state.
///
/// Holds the entity modules and use cases, wired over whatever store and
/// file-source adapters the caller provides.
pub struct App {
    pub entities: Entities,
    pub use_cases: UseCases,
}

/// Container for entity modules.
pub struct Entities {
    pub actor: Arc<entities::Actor>,
    pub folder: Arc<entities::Folder>,
}

/// Container for all use cases.
pub struct UseCases {
    pub import: Arc<use_cases::ImportCharacters>,
    pub merge: Arc<use_cases::MergeFolders>,
    pub sync: Arc<use_cases::SyncCharacters>,
    pub maintenance: use_cases::MaintenanceUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        actor_repo: Arc<dyn ActorRepo>,
        folder_repo: Arc<dyn FolderRepo>,
        browser: Arc<dyn FolderBrowser>,
        probe: Arc<dyn AssetProbe>,
        defaults: MappingDefaults,
    ) -> Self {
        let actor = Arc::new(entities::Actor::new(actor_repo));
        let folder = Arc::new(entities::Folder::new(folder_repo));
        let images = Arc::new(use_cases::ResolveImages::new(browser, probe));

        let import = Arc::new(use_cases::ImportCharacters::new(
            actor.clone(),
            folder.clone(),
            images.clone(),
            defaults,
        ));
        let merge = Arc::new(use_cases::MergeFolders::new(actor.clone(), folder.clone()));
        let sync = Arc::new(use_cases::SyncCharacters::new(import.clone(), merge.clone()));

        let maintenance = use_cases::MaintenanceUseCases::new(
            Arc::new(use_cases::LinkActorData::new(actor.clone(), folder.clone())),
            Arc::new(use_cases::SetDefaultOwnership::new(
                actor.clone(),
                folder.clone(),
            )),
            Arc::new(use_cases::RefreshImages::new(
                actor.clone(),
                folder.clone(),
                images,
            )),
        );

        Self {
            entities: Entities { actor, folder },
            use_cases: UseCases {
                import,
                merge,
                sync,
                maintenance,
            },
        }
    }
}
