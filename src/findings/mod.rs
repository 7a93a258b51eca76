mod finding;
pub mod persistence;
mod store;

pub use finding::{Finding, FindingId, RegionBox, Severity};
pub use persistence::{
    DocumentLoaded, LoadReviewRequest, ReviewFile, ReviewLoadError, SaveBegan, SaveOutcome,
    SaveReviewRequest,
};
pub use store::{ActiveFinding, HoveredFinding, ReviewDocument};

use bevy::prelude::*;
use std::path::PathBuf;

pub struct FindingsPlugin {
    /// Review document passed on the command line, if any
    pub startup_review: Option<PathBuf>,
}

impl Plugin for FindingsPlugin {
    fn build(&self, app: &mut App) {
        let startup_review = self.startup_review.clone();

        app.init_resource::<ReviewDocument>()
            .init_resource::<ActiveFinding>()
            .init_resource::<HoveredFinding>()
            .init_resource::<ReviewLoadError>()
            .add_message::<LoadReviewRequest>()
            .add_message::<SaveReviewRequest>()
            .add_message::<DocumentLoaded>()
            .add_message::<SaveBegan>()
            .add_message::<SaveOutcome>()
            .add_systems(
                Startup,
                move |mut load_events: MessageWriter<LoadReviewRequest>,
                      config: Res<crate::config::AppConfig>| {
                    if let Some(path) = startup_review
                        .clone()
                        .or_else(|| config.data.last_review_path.clone())
                    {
                        load_events.write(LoadReviewRequest { path });
                    }
                },
            )
            .add_systems(
                Update,
                (
                    persistence::load_review_system.run_if(on_message::<LoadReviewRequest>),
                    persistence::apply_commit_system,
                    persistence::save_review_system.run_if(on_message::<SaveReviewRequest>),
                )
                    .chain(),
            );
    }
}
