//! Build session

use std::path::{Path, PathBuf};

use glam::IVec3;
use serde_json::Value;
use url::Url;

use crate::block::BlockSet;
use crate::core::error::Error;
use crate::core::types::Result;
use crate::export;
use crate::gallery::BuildProject;
use crate::generation::{GenerationOutcome, GenerationRequest, GenerationTicket, ImagePayload};
use crate::history::HistoryStore;
use crate::math::Ray;
use crate::scene::{BlockHit, PointerEvent, RenderInstance, SceneConfig, SceneController};
use super::state::GenerationState;

/// Name of a build that has not been generated or loaded
pub const DEFAULT_BUILD_NAME: &str = "Untitled Build";

/// What became of a completed generation
#[derive(Clone, Debug, PartialEq)]
pub enum GenerationResolution {
    /// The result is now the current build. `project` is the autosave
    /// candidate, present when the build has blocks.
    Applied { project: Option<BuildProject> },
    /// The result was not awaited, or the session was cleared or reloaded
    /// since it was requested.
    Discarded,
}

/// One user's building session.
///
/// Owns the history of block snapshots and the scene controller. Every
/// edit, generation or load goes through here; the scene only ever sees
/// the current snapshot.
pub struct BuildSession {
    history: HistoryStore<BlockSet>,
    scene: SceneController,
    state: GenerationState,
    /// Bumped by clear and load so in-flight results go stale
    epoch: u64,
    next_request_id: u64,
    build_name: String,
}

impl BuildSession {
    /// Empty session
    pub fn new(config: SceneConfig) -> Self {
        Self {
            history: HistoryStore::new(BlockSet::empty()),
            scene: SceneController::new(config),
            state: GenerationState::Idle,
            epoch: 0,
            next_request_id: 0,
            build_name: DEFAULT_BUILD_NAME.to_string(),
        }
    }

    /// The block set on screen
    pub fn current(&self) -> &BlockSet {
        self.history.current()
    }

    pub fn history(&self) -> &HistoryStore<BlockSet> {
        &self.history
    }

    pub fn scene(&self) -> &SceneController {
        &self.scene
    }

    pub fn build_name(&self) -> &str {
        &self.build_name
    }

    pub fn generation_state(&self) -> &GenerationState {
        &self.state
    }

    pub fn is_generating(&self) -> bool {
        !self.state.is_idle()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // --- Generation ---

    /// Start a generation request.
    ///
    /// Only one request may be outstanding. Ends explode mode. The caller
    /// hands the returned ticket and the request to a dispatcher.
    pub fn begin_generation(&mut self, request: &GenerationRequest) -> Result<GenerationTicket> {
        if !self.state.is_idle() {
            return Err(Error::GenerationInFlight);
        }
        request.validate()?;

        self.scene.set_exploded(false);
        self.next_request_id += 1;
        let ticket = GenerationTicket {
            id: self.next_request_id,
            epoch: self.epoch,
        };

        log::info!(
            "Generation {} requested: {:?} ({} density{})",
            ticket.id,
            request.build_name(),
            request.density,
            if request.image.is_some() { ", with image" } else { "" }
        );

        self.state = GenerationState::AwaitingGeneration {
            ticket,
            build_name: request.build_name(),
            prompt: request.prompt_text().map(str::to_string),
            image_data_url: request.image.as_ref().map(ImagePayload::to_data_url),
        };
        Ok(ticket)
    }

    /// Hand back the result for `ticket`.
    ///
    /// A failed generation returns [`Error::Generation`] and leaves the
    /// history untouched. Either way the session is idle again once the
    /// awaited ticket comes back.
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        result: Result<Vec<Value>>,
    ) -> Result<GenerationResolution> {
        if self.state.awaited() != Some(ticket) {
            log::debug!("Ignoring result for unexpected generation {}", ticket.id);
            return Ok(GenerationResolution::Discarded);
        }

        let GenerationState::AwaitingGeneration { build_name, prompt, image_data_url, .. } =
            std::mem::take(&mut self.state)
        else {
            return Ok(GenerationResolution::Discarded);
        };

        if ticket.epoch != self.epoch {
            log::info!("Discarding stale generation {} for {:?}", ticket.id, build_name);
            return Ok(GenerationResolution::Discarded);
        }

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Generation {} failed: {}", ticket.id, e);
                return Err(match e {
                    Error::Generation(_) => e,
                    other => Error::Generation(other.to_string()),
                });
            }
        };

        let set = BlockSet::from_generation_result(&raw);
        log::info!("Generation {} produced {} blocks for {:?}", ticket.id, set.len(), build_name);
        self.history.push(set.clone());
        self.build_name = build_name;

        let project = (!set.is_empty()).then(|| {
            let mut project = BuildProject::new(prompt.as_deref().unwrap_or_default(), set);
            project.original_prompt = prompt;
            project.original_image = image_data_url;
            project
        });
        Ok(GenerationResolution::Applied { project })
    }

    /// Feed a dispatcher outcome into the session
    pub fn resolve(&mut self, outcome: GenerationOutcome) -> Result<GenerationResolution> {
        self.complete_generation(outcome.ticket, outcome.result)
    }

    // --- Editing ---

    /// Apply a click. Returns whether the build changed.
    ///
    /// An add into an occupied cell fails with [`Error::Conflict`] and
    /// leaves the build as it was.
    pub fn click(&mut self, event: &PointerEvent) -> Result<bool> {
        let Some(intent) = self.scene.handle_click(self.history.current(), event) else {
            return Ok(false);
        };
        let next = intent.apply(self.history.current())?;
        self.history.push(next);
        Ok(true)
    }

    /// Block under a world-space ray, if any
    pub fn pick(&self, world_ray: &Ray) -> Option<BlockHit> {
        self.scene.pick(self.history.current(), world_ray)
    }

    pub fn undo(&mut self) {
        self.history.undo();
    }

    pub fn redo(&mut self) {
        self.history.redo();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Start over with an empty build
    pub fn clear(&mut self) {
        self.restart(BlockSet::empty());
        log::info!("Cleared build");
    }

    /// Replace the build with a saved project
    pub fn load_project(&mut self, project: &BuildProject) {
        self.restart(project.blocks.clone());
        self.build_name = project.name.clone();
        log::info!("Loaded {:?} ({} blocks)", project.name, project.block_count());
    }

    fn restart(&mut self, initial: BlockSet) {
        self.history.reset(initial);
        self.scene.set_exploded(false);
        self.scene.set_hover(None);
        self.epoch += 1;
    }

    // --- Scene ---

    pub fn is_exploded(&self) -> bool {
        self.scene.is_exploded()
    }

    pub fn set_exploded(&mut self, exploded: bool) {
        self.scene.set_exploded(exploded);
    }

    pub fn toggle_exploded(&mut self) -> bool {
        self.scene.toggle_exploded()
    }

    pub fn set_hover(&mut self, position: Option<IVec3>) {
        self.scene.set_hover(position);
    }

    /// Advance the scene animation
    pub fn tick(&mut self, dt: f32, elapsed: f32) {
        self.scene.tick(self.history.current(), dt, elapsed);
    }

    pub fn render_instances(&self) -> impl Iterator<Item = RenderInstance> + '_ {
        self.scene.render_instances(self.history.current())
    }

    // --- Saving and export ---

    /// The current build as a new gallery project
    pub fn snapshot_project(&self) -> BuildProject {
        BuildProject::new(&self.build_name, self.history.current().clone())
    }

    pub fn export_obj(&self) -> String {
        export::to_obj(self.history.current(), &self.build_name)
    }

    pub fn export_instructions(&self) -> String {
        export::to_instructions(self.history.current(), &self.build_name)
    }

    /// Write both export files into `dir`
    pub fn write_exports(&self, dir: impl AsRef<Path>) -> Result<(PathBuf, PathBuf)> {
        export::write_exports(dir, self.history.current(), &self.build_name)
    }

    pub fn share_link(&self) -> Result<Url> {
        export::share_link(&self.build_name)
    }
}

impl Default for BuildSession {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
