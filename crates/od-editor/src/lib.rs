pub mod config;
pub mod input;
pub mod style;
pub mod sync;
pub mod text;
pub mod tools;

pub use config::EditorConfig;
pub use input::InputEvent;
pub use style::{ColorPicker, ScriptedPicker, StyleState};
pub use sync::{SyncEngine, SyncOutcome, SyncReport};
pub use text::{MemoryTextArea, TextArea, TextPos};
pub use tools::{Interaction, SceneMutation, ShapeTool, ToolContext, ToolResponse};
