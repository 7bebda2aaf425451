//! Generation gating

use crate::generation::GenerationTicket;

/// Whether a generation request is outstanding. At most one may be.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum GenerationState {
    #[default]
    Idle,
    AwaitingGeneration {
        ticket: GenerationTicket,
        /// Name the build gets if the result is applied
        build_name: String,
        /// Trimmed prompt text, if the request had one
        prompt: Option<String>,
        /// Reference image as a data URL
        image_data_url: Option<String>,
    },
}

impl GenerationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GenerationState::Idle)
    }

    /// Ticket being waited on, if any
    pub fn awaited(&self) -> Option<GenerationTicket> {
        match self {
            GenerationState::Idle => None,
            GenerationState::AwaitingGeneration { ticket, .. } => Some(*ticket),
        }
    }
}
