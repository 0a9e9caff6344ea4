//! # Keiro - Conditional Navigation Engine for Multi-Step Forms
//!
//! **Keiro** decides which question screen a respondent sees next. A form is a
//! set of ordered steps, each with optional branching rules; the engine walks
//! them one session at a time, keeps an accurate back-stack, gates every
//! advance on kind-specific required fields and runs the submission side effect
//! exactly once at the end.
//!
//! ## Core Workflow
//!
//! The engine is storage-agnostic. It operates on a canonical model of a form,
//! the `FormDefinition`. The primary workflow is:
//!
//! 1.  **Load Your Form**: Read your stored form (JSON, a database row, etc.) into your own Rust structs.
//! 2.  **Convert to Keiro's Model**: Implement the `IntoForm` trait for your structs, or load the canonical JSON directly with `FormDefinition::from_json`.
//! 3.  **Build the Graph**: Use `StepGraph::builder` to index the steps, options and rules. The graph is read-only and can be shared by every session of that form.
//! 4.  **Navigate**: Create a `NavigationController` per respondent and drive it with `advance`, `retreat` and `add_another`.
//!
//! ## Quick Start
//!
//! ```rust
//! use keiro::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let json = r#"{
//!         "steps": [
//!             { "id": "kind", "order": 1, "required": true, "kind": { "type": "card_selection" } },
//!             { "id": "size", "order": 2, "kind": { "type": "dimensions" } },
//!             { "id": "photo", "order": 3, "kind": { "type": "file_upload" } }
//!         ],
//!         "options": [
//!             { "id": "window", "step_id": "kind", "label": "Window" },
//!             { "id": "door", "step_id": "kind", "label": "Door" }
//!         ],
//!         "step_logic": [{
//!             "step_id": "kind",
//!             "rules": [{
//!                 "id": "doors-skip-size",
//!                 "order": 0,
//!                 "conditions": [{ "field_type": "option", "option_id": "door" }],
//!                 "action": { "target_step_id": "photo" }
//!             }]
//!         }]
//!     }"#;
//!
//!     let graph = StepGraph::builder(FormDefinition::from_json(json)?).build()?;
//!     let mut session = NavigationController::builder(graph).build();
//!
//!     // A required step refuses to advance without an answer.
//!     assert!(session.advance(Answer::empty()).is_err());
//!
//!     // Choosing "door" skips the dimensions step.
//!     session.advance(Answer::option("door"))?;
//!     assert_eq!(session.current_index(), Some(2));
//!
//!     // Back returns to where the respondent actually was.
//!     session.retreat()?;
//!     assert_eq!(session.current_index(), Some(0));
//!     Ok(())
//! }
//! ```

pub mod answer;
pub mod error;
pub mod form;
pub mod graph;
pub mod logic;
pub mod navigation;
pub mod prelude;
pub mod presentation;
pub mod trace;
