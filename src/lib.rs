//! Scene coordinate and direct-manipulation engine for millimeter canvases.
//!
//! A fixed-size paper sheet is shown inside a pannable, zoomable, rotatable
//! workspace. This crate turns raw pointer, wheel, drop, and keyboard events
//! into mutations of the assets placed on that sheet: dragging, duplicating,
//! uniform scaling, height adjustment, rotation, and two-click pen lines. The
//! host owns rendering and DOM wiring and applies the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`]: event handlers and the interaction state machine |
//! | [`camera`] | Workspace transform and screen ↔ millimeter conversion |
//! | [`units`] | Millimeter / pixel conversion |
//! | [`doc`] | Asset records, canvas sheet, and the [`doc::SceneGateway`] store boundary |
//! | [`geometry`] | Per-kind extents, handle placement, and containment |
//! | [`hit`] | Hit-testing handles and asset bodies |
//! | [`input`] | Input event types and [`input::InteractionSession`] |
//! | [`text_edit`] | Inline text editing sub-mode |
//! | [`config`] | [`config::EngineConfig`] defaults and environment overrides |
//! | [`replay`] | Scripted event replay for the `planboard-replay` tool |
//! | [`consts`] | Shared clamps, handle metrics, and pen defaults |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod replay;
pub mod text_edit;
pub mod units;
