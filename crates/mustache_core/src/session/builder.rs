//! Assemble a session from configuration plus platform services.

use std::sync::Arc;

use super::prompt::Prompter;
use super::runtime::Session;
use crate::assets::{AssetStore, DirectoryAssetStore};
use crate::capture::{CaptureController, ScreenRecorder};
use crate::catalog::CatalogClient;
use crate::config::ConfigManager;
use crate::media::{DirectoryMediaLibrary, MediaLibrary};
use crate::models::StyleCatalog;
use crate::overlay::{OverlayAttachmentManager, SceneGraph};
use crate::publish::{CoverOptions, PublishPipeline, PublishServices};
use crate::selection::{CurrentSelection, SelectionBus};

/// Services supplied by the host platform.
pub struct Platform {
    pub recorder: Arc<dyn ScreenRecorder>,
    pub prompter: Arc<dyn Prompter>,
    /// Media library to publish from. Defaults to the recordings folder.
    pub media: Option<Arc<dyn MediaLibrary>>,
}

impl<S: SceneGraph> Session<S> {
    /// Build a session wired to `bus`.
    ///
    /// The publish-time selection tracker is subscribed before the session
    /// forwarder, so both see every selection in the same order.
    pub fn from_config(
        scene: S,
        config: &ConfigManager,
        bus: &SelectionBus,
        platform: Platform,
    ) -> Self {
        let settings = config.settings();
        let styles = Arc::new(StyleCatalog::builtin());
        let assets: Arc<dyn AssetStore> = Arc::new(DirectoryAssetStore::new(config.assets_root()));
        let media: Arc<dyn MediaLibrary> = match platform.media {
            Some(media) => media,
            None => Arc::new(DirectoryMediaLibrary::new(config.recordings_folder())),
        };

        let services = PublishServices {
            media,
            assets: Arc::clone(&assets),
            uploader: Arc::new(CatalogClient::new(&settings.catalog.base_url)),
            styles: Arc::clone(&styles),
            selection: CurrentSelection::attach(bus, styles.len()),
            cover: CoverOptions::from(&settings.cover),
        };
        let publisher = PublishPipeline::new(services).with_logging(
            settings.logging.publish_log_dir(),
            settings.logging.log_config(),
        );

        let overlay = OverlayAttachmentManager::new(styles, assets);
        let capture = CaptureController::new(platform.recorder)
            .with_microphone(settings.capture.microphone_enabled);

        tracing::info!(
            catalog = %settings.catalog.base_url,
            assets = %config.assets_root().display(),
            "Session configured"
        );

        let session = Session::new(scene, overlay, capture, publisher, platform.prompter);
        session.connect_selection(bus);
        session
    }
}
