/// Chart layer: turns a [`ChartRequest`] into a renderable [`Artifact`].
///
/// ```text
///   widget state ──► ChartRequest ──► dispatch(&Dataset) ──► Artifact ──► ui::plot
/// ```
///
/// Dispatch is pure; the UI never computes statistics itself.

pub mod artifact;
pub mod dispatch;
pub mod request;

pub use artifact::Artifact;
pub use dispatch::dispatch;
pub use request::{ChartKind, ChartRequest, CrosstabDisplay};
